//! Session assembly: which muscle groups a training day hits, how many
//! exercises each gets, and how long the day is expected to take.
//!
//! Full-body days scale with the target session length and split their
//! exercises between upper and lower body. Every other focus reads a fixed
//! per-group table.

use crate::progression::{estimate_exercise_minutes, estimate_session_minutes, sets_for_week};
use crate::scheme::resolve_scheme;
use crate::selector::{select_exercises, ExerciseFilter, SelectionFallback};
use crate::{
    Catalog, GeneratorConfig, MuscleGroup, MusclePriority, PlannedExercise, Profile,
    SchemeValues, SessionFocus, SplitLabel,
};
use rand::Rng;

/// Exercises per muscle group for every focus except full body
pub const FOCUS_GROUPS: &[(SessionFocus, &[(MuscleGroup, usize)])] = &[
    (
        SessionFocus::Upper,
        &[
            (MuscleGroup::Chest, 2),
            (MuscleGroup::Back, 2),
            (MuscleGroup::Shoulders, 2),
            (MuscleGroup::Arms, 2),
            (MuscleGroup::Abs, 1),
        ],
    ),
    (
        SessionFocus::Lower,
        &[
            (MuscleGroup::Quads, 2),
            (MuscleGroup::Hamstrings, 2),
            (MuscleGroup::Glutes, 2),
            (MuscleGroup::Calves, 1),
            (MuscleGroup::Abs, 1),
        ],
    ),
    (
        SessionFocus::Push,
        &[
            (MuscleGroup::Chest, 3),
            (MuscleGroup::Shoulders, 2),
            (MuscleGroup::Arms, 2),
        ],
    ),
    (
        SessionFocus::Pull,
        &[
            (MuscleGroup::Back, 3),
            (MuscleGroup::Shoulders, 1),
            (MuscleGroup::Arms, 2),
        ],
    ),
    (
        SessionFocus::Legs,
        &[
            (MuscleGroup::Quads, 2),
            (MuscleGroup::Hamstrings, 2),
            (MuscleGroup::Glutes, 2),
            (MuscleGroup::Calves, 2),
        ],
    ),
    (SessionFocus::ActiveRecovery, &[]),
];

/// Per-group counts for a fixed-table focus; empty for full body
pub fn focus_groups(focus: SessionFocus) -> &'static [(MuscleGroup, usize)] {
    FOCUS_GROUPS
        .iter()
        .find(|(f, _)| *f == focus)
        .map(|(_, groups)| *groups)
        .unwrap_or(&[])
}

/// Total exercises of a full-body day for a target session length
pub fn full_body_target(session_minutes: u32) -> usize {
    match session_minutes {
        0..=30 => 5,
        31..=45 => 6,
        46..=60 => 8,
        _ => 9,
    }
}

/// Share of a full-body day given to upper-body groups
pub fn upper_fraction(priority: Option<MusclePriority>) -> f64 {
    match priority {
        Some(MusclePriority::Upper) => 0.65,
        Some(MusclePriority::Lower) => 0.35,
        None => 0.5,
    }
}

/// A session's exercises before it is titled and placed in a week
#[derive(Clone, Debug)]
pub struct AssembledSession {
    pub exercises: Vec<PlannedExercise>,
    pub estimated_minutes: u32,
    /// Fallbacks taken, by the group being selected at the time
    pub fallbacks: Vec<(MuscleGroup, SelectionFallback)>,
}

/// Assemble one training day for `week` (1-based)
pub fn assemble_session<R: Rng + ?Sized>(
    catalog: &Catalog,
    label: &SplitLabel,
    profile: &Profile,
    week: u32,
    config: &GeneratorConfig,
    rng: &mut R,
) -> AssembledSession {
    let avoid = profile.avoided_equipment();
    let filter = ExerciseFilter {
        fallback_slice_len: config.fallback_slice_len,
        ..ExerciseFilter::new(&profile.equipment_available, &avoid)
    };

    let scheme = resolve_scheme(profile.objective, profile.experience);
    let sets = sets_for_week(scheme.sets, week);

    let mut builder = SessionBuilder {
        catalog,
        filter,
        scheme: &scheme,
        sets,
        exercises: Vec::new(),
        fallbacks: Vec::new(),
    };

    if label.focus == SessionFocus::FullBody {
        let target = full_body_target(profile.session_duration_minutes);
        let upper = (target as f64 * upper_fraction(profile.muscle_priority)) as usize;
        let lower = target - upper;
        let cap = config.full_body_group_cap.max(1);

        builder.fill_half(&MuscleGroup::UPPER, upper, cap, rng);
        builder.fill_half(&MuscleGroup::LOWER, lower, cap, rng);

        if builder.exercises.len() < target {
            builder.add(MuscleGroup::Abs, 1, rng);
        }
    } else {
        for (group, count) in focus_groups(label.focus) {
            builder.add(*group, *count, rng);
        }
    }

    let minutes: Vec<u32> = builder
        .exercises
        .iter()
        .map(|ex| ex.estimated_minutes)
        .collect();
    let estimated_minutes = estimate_session_minutes(&minutes, config.transition_minutes);

    tracing::debug!(
        "Assembled '{}' week {}: {} exercises, {} sets each, ~{} min",
        label,
        week,
        builder.exercises.len(),
        sets,
        estimated_minutes
    );

    AssembledSession {
        exercises: builder.exercises,
        estimated_minutes,
        fallbacks: builder.fallbacks,
    }
}

struct SessionBuilder<'c, 'f> {
    catalog: &'c Catalog,
    filter: ExerciseFilter<'f>,
    scheme: &'f SchemeValues,
    sets: u32,
    exercises: Vec<PlannedExercise>,
    fallbacks: Vec<(MuscleGroup, SelectionFallback)>,
}

impl SessionBuilder<'_, '_> {
    /// Spread `budget` exercises over `groups`, at most `cap` per group
    fn fill_half<R: Rng + ?Sized>(
        &mut self,
        groups: &[MuscleGroup],
        budget: usize,
        cap: usize,
        rng: &mut R,
    ) {
        let mut remaining = budget;
        for group in groups {
            if remaining == 0 {
                break;
            }
            let added = self.add(*group, cap.min(remaining), rng);
            remaining = remaining.saturating_sub(added);
        }
    }

    /// Select and prescribe up to `count` exercises; returns how many were added
    fn add<R: Rng + ?Sized>(&mut self, group: MuscleGroup, count: usize, rng: &mut R) -> usize {
        let selection = select_exercises(self.catalog, group, count, &self.filter, rng);
        self.fallbacks
            .extend(selection.fallbacks.iter().map(|fallback| (group, *fallback)));

        let added = selection.exercises.len();
        let sets = self.sets;
        let minutes = estimate_exercise_minutes(sets);
        let scheme = self.scheme;
        self.exercises
            .extend(selection.exercises.into_iter().map(|exercise| PlannedExercise {
                exercise: exercise.clone(),
                sets,
                reps: scheme.reps.clone(),
                rpe: scheme.rpe,
                estimated_minutes: minutes,
            }));
        added
    }
}
