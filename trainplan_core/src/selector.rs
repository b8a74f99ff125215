//! Exercise selection for one muscle group.
//!
//! Selection never fails. The filters run in this order:
//! 1. Muscle group: catalog entries whose tag normalizes to the requested group
//! 2. Equipment (advisory): keep entries usable with the available equipment,
//!    unless that would leave nothing
//! 3. Injuries (exclusionary): drop entries whose equipment is on the avoid list
//! 4. If nothing is left, take the first entries of the whole catalog
//!
//! The survivors are shuffled and the first `count` returned.

use crate::{Catalog, Exercise, MuscleGroup};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of catalog entries used when a group has no eligible exercise
pub const DEFAULT_FALLBACK_SLICE_LEN: usize = 10;

/// Constraints applied to every selection of a session
#[derive(Clone, Copy, Debug)]
pub struct ExerciseFilter<'a> {
    /// Empty means any equipment
    pub equipment_available: &'a [String],
    pub avoid_equipment: &'a [&'static str],
    pub fallback_slice_len: usize,
}

impl<'a> ExerciseFilter<'a> {
    pub fn new(equipment_available: &'a [String], avoid_equipment: &'a [&'static str]) -> Self {
        Self {
            equipment_available,
            avoid_equipment,
            fallback_slice_len: DEFAULT_FALLBACK_SLICE_LEN,
        }
    }
}

/// A degradation taken while selecting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionFallback {
    /// Equipment narrowing was discarded because it matched nothing
    EquipmentRelaxed,
    /// Every filter left nothing; entries came from the catalog head
    CatalogSlice,
}

/// Exercises picked for one group, with the fallbacks that produced them
#[derive(Clone, Debug)]
pub struct Selection<'a> {
    pub exercises: Vec<&'a Exercise>,
    pub fallbacks: Vec<SelectionFallback>,
}

/// Pick up to `count` exercises for `group`
pub fn select_exercises<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    group: MuscleGroup,
    count: usize,
    filter: &ExerciseFilter<'_>,
    rng: &mut R,
) -> Selection<'a> {
    let mut fallbacks = Vec::new();

    let mut candidates: Vec<&Exercise> = catalog
        .exercises
        .iter()
        .filter(|ex| ex.muscle() == Some(group))
        .collect();

    if !filter.equipment_available.is_empty() {
        let usable: Vec<&Exercise> = candidates
            .iter()
            .copied()
            .filter(|ex| usable_with(ex, filter.equipment_available))
            .collect();
        if usable.is_empty() {
            if !candidates.is_empty() {
                tracing::debug!(
                    "No {} exercise matches available equipment, ignoring equipment filter",
                    group
                );
                fallbacks.push(SelectionFallback::EquipmentRelaxed);
            }
        } else {
            candidates = usable;
        }
    }

    if !filter.avoid_equipment.is_empty() {
        candidates.retain(|ex| !is_avoided(ex, filter.avoid_equipment));
    }

    if candidates.is_empty() {
        tracing::debug!(
            "No eligible {} exercise, falling back to the first {} catalog entries",
            group,
            filter.fallback_slice_len
        );
        fallbacks.push(SelectionFallback::CatalogSlice);
        candidates = catalog
            .exercises
            .iter()
            .take(filter.fallback_slice_len.max(1))
            .collect();
    }

    candidates.shuffle(rng);
    candidates.truncate(count);

    Selection {
        exercises: candidates,
        fallbacks,
    }
}

/// Bodyweight and untagged exercises need no equipment
fn usable_with(exercise: &Exercise, available: &[String]) -> bool {
    let tag = exercise.equipment_tag();
    tag.is_empty()
        || tag.contains("bodyweight")
        || available
            .iter()
            .any(|eq| !eq.is_empty() && tag.contains(&eq.to_lowercase()))
}

fn is_avoided(exercise: &Exercise, avoid: &[&str]) -> bool {
    let tag = exercise.equipment_tag();
    avoid.iter().any(|a| tag.contains(a))
}
