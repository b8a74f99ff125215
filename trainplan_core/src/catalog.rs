//! Built-in exercise catalog and catalog checks.
//!
//! The built-in catalog covers every muscle group with a mix of free-weight,
//! machine and bodyweight movements, so a program can be generated without
//! any external catalog file.

use crate::intake::fold_text;
use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashSet};

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// (name, muscle group, equipment)
const DEFAULT_EXERCISES: &[(&str, &str, &str)] = &[
    // Chest
    ("Bench Press", "Pectoraux", "barbell"),
    ("Incline Dumbbell Press", "Pectoraux", "dumbbell"),
    ("Push-up", "Pectoraux", "bodyweight"),
    ("Cable Fly", "Pectoraux", "cable"),
    // Back
    ("Pull-up", "Dos", "pullup_bar"),
    ("Seated Cable Row", "Dos", "cable"),
    ("One-arm Dumbbell Row", "Dos", "dumbbell"),
    ("Lat Pulldown", "Dos", "machine"),
    // Shoulders
    ("Overhead Press", "Épaules", "barbell overhead"),
    ("Lateral Raise", "Épaules", "dumbbell"),
    ("Face Pull", "Épaules", "cable"),
    ("Pike Push-up", "Épaules", "bodyweight"),
    // Arms
    ("Dumbbell Curl", "Bras", "dumbbell"),
    ("Triceps Pushdown", "Bras", "cable"),
    ("Bench Dip", "Bras", "bodyweight"),
    ("Hammer Curl", "Bras", "dumbbell"),
    // Abs
    ("Plank", "Abdos", "bodyweight"),
    ("Dead Bug", "Abdos", "bodyweight"),
    ("Cable Crunch", "Abdos", "cable"),
    // Quads
    ("Back Squat", "Quadriceps", "barbell squat"),
    ("Leg Extension", "Quadriceps", "machine"),
    ("Leg Press", "Quadriceps", "machine"),
    ("Walking Lunge", "Quadriceps", "dumbbell lunge"),
    ("Jump Squat", "Quadriceps", "bodyweight jump"),
    // Hamstrings
    ("Romanian Deadlift", "Ischios", "dumbbell"),
    ("Lying Leg Curl", "Ischios", "machine"),
    ("Nordic Curl", "Ischios", "bodyweight"),
    // Glutes
    ("Hip Thrust", "Fessiers", "barbell"),
    ("Glute Bridge", "Fessiers", "bodyweight"),
    ("Cable Kickback", "Fessiers", "cable"),
    ("Bulgarian Split Squat", "Fessiers", "dumbbell squat"),
    // Calves
    ("Standing Calf Raise", "Mollets", "machine"),
    ("Seated Calf Raise", "Mollets", "machine"),
    ("Single-leg Calf Raise", "Mollets", "bodyweight"),
];

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds a fresh copy of the built-in catalog
pub fn build_default_catalog() -> Catalog {
    let exercises = DEFAULT_EXERCISES
        .iter()
        .map(|(name, group, equipment)| Exercise {
            slug: make_slug(name, group),
            name: (*name).to_string(),
            muscle_group: (*group).to_string(),
            equipment: (*equipment).to_string(),
            description: None,
        })
        .collect();
    Catalog { exercises }
}

/// Stable identifier from an exercise name and its muscle group
///
/// `("Bench Press", "Pectoraux")` → `"bench-press-pectoraux"`
pub fn make_slug(name: &str, muscle_group: &str) -> String {
    let source = fold_text(&format!("{} {}", name, muscle_group));
    let mut slug = String::with_capacity(source.len());
    for c in source.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

impl Catalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Exercises grouped by canonical muscle group; unrecognized tags are skipped
    pub fn by_group(&self) -> BTreeMap<MuscleGroup, Vec<&Exercise>> {
        let mut groups: BTreeMap<MuscleGroup, Vec<&Exercise>> = BTreeMap::new();
        for exercise in &self.exercises {
            if let Some(group) = exercise.muscle() {
                groups.entry(group).or_default().push(exercise);
            }
        }
        groups
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.exercises.is_empty() {
            errors.push("Catalog has no exercises".to_string());
            return errors;
        }

        let mut seen = HashSet::new();
        for (idx, exercise) in self.exercises.iter().enumerate() {
            if exercise.slug.is_empty() {
                errors.push(format!("Exercise at index {} has empty slug", idx));
            } else if !seen.insert(exercise.slug.as_str()) {
                errors.push(format!("Duplicate exercise slug '{}'", exercise.slug));
            }
            if exercise.name.trim().is_empty() {
                errors.push(format!("Exercise '{}' has empty name", exercise.slug));
            }
            if exercise.muscle().is_none() {
                errors.push(format!(
                    "Exercise '{}' has unrecognized muscle group '{}'",
                    exercise.slug, exercise.muscle_group
                ));
            }
        }

        errors
    }
}
