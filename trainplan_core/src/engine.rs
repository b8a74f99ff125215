//! Program generation engine.
//!
//! Drives the session assembler over every planned week:
//! 1. Plan the weekly split once
//! 2. For each week and each split day, assemble a session
//! 3. Turn selection fallbacks into [`Diagnostic`]s
//!
//! Every week is computed; callers decide how many to expose
//! (see [`Program::first_week_only`]).

use crate::selector::SelectionFallback;
use crate::session::assemble_session;
use crate::split::plan_split;
use crate::{
    Catalog, Diagnostic, Error, Generation, GeneratorConfig, Profile, Program, Result, Session,
    Week,
};
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

/// Title used when the caller does not provide one
pub const DEFAULT_TITLE: &str = "Programme personnalisé";

/// Generate a program with default generator settings
pub fn generate_program<R: Rng + ?Sized>(
    catalog: &Catalog,
    profile: &Profile,
    title: &str,
    rng: &mut R,
) -> Result<Generation> {
    generate_program_with(catalog, profile, title, &GeneratorConfig::default(), rng)
}

/// Generate a program
///
/// Fails only when the catalog is empty or the profile breaks its
/// invariants. Every other irregularity degrades into a diagnostic.
pub fn generate_program_with<R: Rng + ?Sized>(
    catalog: &Catalog,
    profile: &Profile,
    title: &str,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Generation> {
    if catalog.is_empty() {
        tracing::error!("Refusing to generate a program from an empty catalog");
        return Err(Error::EmptyCatalog);
    }
    profile.validate()?;

    let split = plan_split(profile.frequency, profile.preferred_split_method, rng);

    let mut diagnostics = Vec::new();
    let mut weeks = Vec::with_capacity(profile.duration_weeks as usize);

    for week_number in 1..=profile.duration_weeks {
        let mut sessions = Vec::with_capacity(split.len());

        for (day_index, label) in split.iter().enumerate() {
            let assembled = assemble_session(catalog, label, profile, week_number, config, rng);

            for (muscle_group, fallback) in &assembled.fallbacks {
                let muscle_group = *muscle_group;
                diagnostics.push(match fallback {
                    SelectionFallback::EquipmentRelaxed => Diagnostic::EquipmentFilterRelaxed {
                        week: week_number,
                        day_index,
                        muscle_group,
                    },
                    SelectionFallback::CatalogSlice => Diagnostic::CatalogSliceFallback {
                        week: week_number,
                        day_index,
                        muscle_group,
                    },
                });
            }

            sessions.push(Session {
                day_index,
                title: format!("{} - Semaine {}", label.name, week_number),
                focus: label.name.clone(),
                estimated_minutes: assembled.estimated_minutes,
                exercises: assembled.exercises,
            });
        }

        weeks.push(Week {
            week_number,
            sessions,
        });
    }

    let title = if title.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        title
    };

    let program = Program {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        title: title.to_string(),
        objective: profile.objective,
        duration_weeks: profile.duration_weeks,
        user_id: profile.user_id.clone(),
        weeks,
    };

    tracing::info!(
        "Generated '{}': {} weeks × {} sessions, {} diagnostics",
        program.title,
        program.weeks.len(),
        split.len(),
        diagnostics.len()
    );

    Ok(Generation {
        program,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::intake::ProfileRequest;
    use crate::{Exercise, MuscleGroup, Objective, SplitMethod};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scenario_profile() -> Profile {
        let request = ProfileRequest {
            frequency: Some(3),
            duration_weeks: Some(4),
            objective: Some("Prise de masse".into()),
            level: Some("Intermédiaire".into()),
            preferred_method: Some("fullbody".into()),
            ..Default::default()
        };
        let (profile, diagnostics) = request.into_profile();
        assert!(diagnostics.is_empty());
        profile
    }

    #[test]
    fn test_full_body_scenario() {
        crate::logging::init_test();
        let catalog = build_default_catalog();
        let mut rng = StdRng::seed_from_u64(2024);

        let generation =
            generate_program(&catalog, &scenario_profile(), "Bloc masse", &mut rng).unwrap();
        let program = generation.program;

        assert_eq!(program.title, "Bloc masse");
        assert_eq!(program.objective, Objective::Hypertrophy);
        assert_eq!(program.weeks.len(), 4);

        let week1 = &program.weeks[0];
        let focuses: Vec<&str> = week1.sessions.iter().map(|s| s.focus.as_str()).collect();
        assert_eq!(focuses, vec!["Full Body A", "Full Body B", "Full Body C"]);
        assert_eq!(week1.sessions[1].title, "Full Body B - Semaine 1");

        for session in &week1.sessions {
            assert_eq!(session.exercises.len(), 6);
            for planned in &session.exercises {
                assert_eq!(planned.sets, 3);
                assert_eq!(planned.reps, "8-12");
                assert_eq!(planned.rpe, 7.5);
            }
        }
        assert!(generation.diagnostics.is_empty());
    }

    #[test]
    fn test_knee_injury_excludes_risky_equipment() {
        let catalog = build_default_catalog();
        let mut profile = scenario_profile();
        profile.injury_sites = vec![crate::InjurySite::Knees];

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let generation = generate_program(&catalog, &profile, "", &mut rng).unwrap();

            for (_, session) in generation.program.sessions() {
                for planned in &session.exercises {
                    let lower = planned
                        .exercise
                        .muscle()
                        .map_or(false, |g| MuscleGroup::LOWER.contains(&g));
                    if lower {
                        let tag = planned.exercise.equipment_tag();
                        assert!(
                            !["squat", "lunge", "jump"].iter().any(|t| tag.contains(t)),
                            "seed {}: {} selected with '{}'",
                            seed,
                            planned.exercise.slug,
                            tag
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate_program(&Catalog::default(), &scenario_profile(), "", &mut rng);
        assert!(matches!(result, Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let catalog = build_default_catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let profile = Profile {
            frequency: 7,
            ..Profile::default()
        };
        let result = generate_program(&catalog, &profile, "", &mut rng);
        assert!(matches!(result, Err(Error::InvalidProfile(_))));

        let profile = Profile {
            duration_weeks: Profile::MAX_DURATION_WEEKS + 1,
            ..Profile::default()
        };
        let result = generate_program(&catalog, &profile, "", &mut rng);
        assert!(matches!(result, Err(Error::InvalidProfile(_))));
    }

    #[test]
    fn test_missing_equipment_reports_relaxed_filter() {
        // One machine exercise per group, but the athlete only has dumbbells
        let exercises = MuscleGroup::UPPER
            .iter()
            .chain(MuscleGroup::LOWER.iter())
            .map(|group| Exercise {
                slug: format!("{}-machine", group),
                name: format!("{} machine", group),
                muscle_group: group.to_string(),
                equipment: "machine".into(),
                description: None,
            })
            .collect();
        let catalog = Catalog::new(exercises);
        let profile = Profile {
            frequency: 2,
            duration_weeks: 1,
            equipment_available: vec!["dumbbell".into()],
            preferred_split_method: Some(SplitMethod::FullBody),
            ..Profile::default()
        };
        let mut rng = StdRng::seed_from_u64(11);

        let generation = generate_program(&catalog, &profile, "", &mut rng).unwrap();

        for day_index in 0..2 {
            assert!(generation
                .diagnostics
                .contains(&Diagnostic::EquipmentFilterRelaxed {
                    week: 1,
                    day_index,
                    muscle_group: MuscleGroup::Chest,
                }));
        }
        assert!(generation
            .diagnostics
            .iter()
            .all(|d| matches!(d, Diagnostic::EquipmentFilterRelaxed { .. })));
        for (_, session) in generation.program.sessions() {
            assert!(session
                .exercises
                .iter()
                .all(|ex| ex.exercise.equipment == "machine"));
        }
    }

    #[test]
    fn test_biweekly_progression_across_weeks() {
        let catalog = build_default_catalog();
        let mut rng = StdRng::seed_from_u64(9);
        let profile = Profile {
            duration_weeks: 8,
            preferred_split_method: Some(SplitMethod::PushPullLegs),
            ..Profile::default()
        };

        let program = generate_program(&catalog, &profile, "", &mut rng)
            .unwrap()
            .program;

        let sets_by_week: Vec<u32> = program
            .weeks
            .iter()
            .map(|week| week.sessions[0].exercises[0].sets)
            .collect();
        assert_eq!(sets_by_week, vec![3, 3, 4, 4, 3, 3, 4, 4]);

        for week in &program.weeks {
            for session in &week.sessions {
                assert!(session
                    .exercises
                    .iter()
                    .all(|ex| ex.sets == sets_by_week[week.week_number as usize - 1]));
            }
        }
    }

    #[test]
    fn test_session_minutes_formula_holds() {
        let catalog = build_default_catalog();
        let profile = Profile {
            frequency: 5,
            duration_weeks: 4,
            ..Profile::default()
        };

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let program = generate_program(&catalog, &profile, "", &mut rng)
                .unwrap()
                .program;
            for (_, session) in program.sessions() {
                let n = session.exercises.len() as u32;
                let work: u32 = session.exercises.iter().map(|e| e.estimated_minutes).sum();
                let expected = if n == 0 { 0 } else { work + (1.5 * (n - 1) as f64) as u32 };
                assert_eq!(session.estimated_minutes, expected);
            }
        }
    }

    #[test]
    fn test_first_week_only_and_default_title() {
        let catalog = build_default_catalog();
        let mut rng = StdRng::seed_from_u64(3);
        let program = generate_program(&catalog, &scenario_profile(), "  ", &mut rng)
            .unwrap()
            .program;
        assert_eq!(program.title, DEFAULT_TITLE);

        let first = program.first_week_only();
        assert_eq!(first.weeks.len(), 1);
        assert_eq!(first.duration_weeks, 4);
        assert_eq!(first.sessions().count(), 3);
    }

    #[test]
    fn test_sparse_catalog_reports_fallbacks() {
        let catalog = Catalog::new(vec![Exercise {
            slug: "burpee".into(),
            name: "Burpee".into(),
            muscle_group: "cardio".into(),
            equipment: "bodyweight".into(),
            description: None,
        }]);
        let mut rng = StdRng::seed_from_u64(3);
        let profile = Profile {
            frequency: 2,
            duration_weeks: 1,
            ..Profile::default()
        };

        let generation = generate_program(&catalog, &profile, "", &mut rng).unwrap();

        for (_, session) in generation.program.sessions() {
            assert!(!session.exercises.is_empty());
        }
        assert!(generation
            .diagnostics
            .iter()
            .all(|d| matches!(d, Diagnostic::CatalogSliceFallback { week: 1, .. })));
        assert!(!generation.diagnostics.is_empty());
    }

    #[test]
    fn test_same_seed_same_program() {
        let catalog = build_default_catalog();
        let profile = Profile {
            frequency: 4,
            ..Profile::default()
        };

        let slugs = |seed: u64| -> Vec<String> {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_program(&catalog, &profile, "", &mut rng)
                .unwrap()
                .program
                .sessions()
                .flat_map(|(_, s)| s.exercises.iter().map(|e| e.exercise.slug.clone()))
                .collect()
        };

        assert_eq!(slugs(77), slugs(77));
    }
}
