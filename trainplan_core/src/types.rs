//! Core domain types for the training-program generator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Closed enums for goals, levels, split methods and body regions
//! - Exercises and the catalog they live in
//! - Profiles, prescriptions, sessions and generated programs
//! - Diagnostics emitted when the generator degrades gracefully

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::intake::fold_text;

// ============================================================================
// Profile Enums
// ============================================================================

/// Training goal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Strength,
    Hypertrophy,
    Toning,
    Endurance,
}

impl Objective {
    pub const ALL: [Objective; 4] = [
        Objective::Strength,
        Objective::Hypertrophy,
        Objective::Toning,
        Objective::Endurance,
    ];
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Objective::Strength => "strength",
            Objective::Hypertrophy => "hypertrophy",
            Objective::Toning => "toning",
            Objective::Endurance => "endurance",
        };
        f.write_str(name)
    }
}

/// Training experience level
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

impl Experience {
    pub const ALL: [Experience; 3] = [
        Experience::Beginner,
        Experience::Intermediate,
        Experience::Advanced,
    ];
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Experience::Beginner => "beginner",
            Experience::Intermediate => "intermediate",
            Experience::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

/// Which half of the body gets the larger share of a full-body session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MusclePriority {
    Upper,
    Lower,
}

/// Weekly split style requested by the user
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    FullBody,
    UpperLower,
    PushPullLegs,
    Split,
    /// Explicitly no style: the stock rotation table decides.
    NoPreference,
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SplitMethod::FullBody => "full_body",
            SplitMethod::UpperLower => "upper_lower",
            SplitMethod::PushPullLegs => "push_pull_legs",
            SplitMethod::Split => "split",
            SplitMethod::NoPreference => "no_preference",
        };
        f.write_str(name)
    }
}

/// Injured body region
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InjurySite {
    Back,
    Shoulders,
    Knees,
    Elbows,
    Wrists,
}

impl InjurySite {
    /// Equipment tags that stress this region and must be excluded.
    pub fn avoided_equipment(self) -> &'static [&'static str] {
        match self {
            InjurySite::Back => &["barbell", "heavy"],
            InjurySite::Shoulders => &["overhead", "press"],
            InjurySite::Knees => &["squat", "lunge", "jump"],
            InjurySite::Elbows => &["heavy", "barbell"],
            InjurySite::Wrists => &["barbell", "heavy"],
        }
    }
}

// ============================================================================
// Muscle Groups
// ============================================================================

/// Canonical muscle group categories
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Abs,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
}

/// Alias table, checked in order with substring matching on folded text.
///
/// Order matters: "abdos" contains "dos", so abs is checked before back.
const MUSCLE_ALIASES: &[(MuscleGroup, &[&str])] = &[
    (MuscleGroup::Abs, &["abs", "abdo", "core"]),
    (MuscleGroup::Quads, &["quad"]),
    (MuscleGroup::Hamstrings, &["hamstring", "ischio"]),
    (MuscleGroup::Glutes, &["glute", "fessier"]),
    (MuscleGroup::Calves, &["calf", "calves", "mollet"]),
    (MuscleGroup::Chest, &["chest", "pectora", "pecs"]),
    (MuscleGroup::Shoulders, &["shoulder", "epaule", "delt"]),
    (MuscleGroup::Back, &["back", "dos", "dorsa", "lats"]),
    (MuscleGroup::Arms, &["arm", "bras", "biceps", "triceps"]),
];

impl MuscleGroup {
    pub const UPPER: [MuscleGroup; 4] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
    ];

    pub const LOWER: [MuscleGroup; 4] = [
        MuscleGroup::Quads,
        MuscleGroup::Hamstrings,
        MuscleGroup::Glutes,
        MuscleGroup::Calves,
    ];

    /// Normalize a free-form muscle tag ("Pectoraux", "upper chest", "quadris")
    pub fn from_tag(tag: &str) -> Option<Self> {
        let folded = fold_text(tag);
        if folded.is_empty() {
            return None;
        }
        MUSCLE_ALIASES
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|alias| folded.contains(alias)))
            .map(|(group, _)| *group)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Abs => "abs",
            MuscleGroup::Quads => "quads",
            MuscleGroup::Hamstrings => "hamstrings",
            MuscleGroup::Glutes => "glutes",
            MuscleGroup::Calves => "calves",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Exercise and Catalog Types
// ============================================================================

/// A catalog exercise. Muscle group and equipment are kept as supplied.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub slug: String,
    pub name: String,
    pub muscle_group: String,
    pub equipment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Exercise {
    /// Canonical muscle group, if the tag is recognized
    pub fn muscle(&self) -> Option<MuscleGroup> {
        MuscleGroup::from_tag(&self.muscle_group)
    }

    /// Lower-cased equipment tag
    pub fn equipment_tag(&self) -> String {
        self.equipment.trim().to_lowercase()
    }
}

/// Ordered, read-only collection of exercises
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,
}

// ============================================================================
// Profile
// ============================================================================

/// Validated training profile consumed by the generator
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub frequency: u32,
    pub duration_weeks: u32,
    pub objective: Objective,
    pub experience: Experience,
    pub session_duration_minutes: u32,
    pub muscle_priority: Option<MusclePriority>,
    pub injury_sites: Vec<InjurySite>,
    pub equipment_available: Vec<String>,
    pub preferred_split_method: Option<SplitMethod>,
    pub user_id: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            frequency: 3,
            duration_weeks: 4,
            objective: Objective::Hypertrophy,
            experience: Experience::Intermediate,
            session_duration_minutes: 45,
            muscle_priority: None,
            injury_sites: Vec::new(),
            equipment_available: Vec::new(),
            preferred_split_method: None,
            user_id: None,
        }
    }
}

impl Profile {
    pub const MIN_FREQUENCY: u32 = 2;
    pub const MAX_FREQUENCY: u32 = 6;
    pub const MAX_INJURY_SITES: usize = 2;
    pub const MAX_DURATION_WEEKS: u32 = 52;

    /// Check the invariants the generator relies on
    pub fn validate(&self) -> crate::Result<()> {
        if !(Self::MIN_FREQUENCY..=Self::MAX_FREQUENCY).contains(&self.frequency) {
            return Err(crate::Error::InvalidProfile(format!(
                "frequency {} outside [{}, {}]",
                self.frequency,
                Self::MIN_FREQUENCY,
                Self::MAX_FREQUENCY
            )));
        }
        if !(1..=Self::MAX_DURATION_WEEKS).contains(&self.duration_weeks) {
            return Err(crate::Error::InvalidProfile(format!(
                "duration_weeks {} outside [1, {}]",
                self.duration_weeks,
                Self::MAX_DURATION_WEEKS
            )));
        }
        if self.injury_sites.len() > Self::MAX_INJURY_SITES {
            return Err(crate::Error::InvalidProfile(format!(
                "at most {} injury sites are supported, got {}",
                Self::MAX_INJURY_SITES,
                self.injury_sites.len()
            )));
        }
        Ok(())
    }

    /// Equipment tags excluded because of injuries, without duplicates
    pub fn avoided_equipment(&self) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = Vec::new();
        for site in &self.injury_sites {
            for tag in site.avoided_equipment() {
                if !tags.contains(tag) {
                    tags.push(*tag);
                }
            }
        }
        tags
    }
}

// ============================================================================
// Split Types
// ============================================================================

/// Family of a session, deciding which muscle groups it trains
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionFocus {
    FullBody,
    Upper,
    Lower,
    Push,
    Pull,
    Legs,
    ActiveRecovery,
}

/// One scheduled training day in the weekly split
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SplitLabel {
    pub name: String,
    pub focus: SessionFocus,
}

impl SplitLabel {
    pub fn new(name: impl Into<String>, focus: SessionFocus) -> Self {
        Self {
            name: name.into(),
            focus,
        }
    }
}

impl fmt::Display for SplitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// Prescription and Program Types
// ============================================================================

/// Baseline set/rep/intensity prescription for a goal and level
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SchemeValues {
    pub sets: u32,
    pub reps: String,
    pub rpe: f64,
}

/// An exercise placed in a session with its prescription
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub exercise: Exercise,
    pub sets: u32,
    pub reps: String,
    pub rpe: f64,
    pub estimated_minutes: u32,
}

/// One training day of one week
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub day_index: usize,
    pub title: String,
    pub focus: String,
    pub estimated_minutes: u32,
    pub exercises: Vec<PlannedExercise>,
}

/// All sessions of one week
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Week {
    pub week_number: u32,
    pub sessions: Vec<Session>,
}

/// A generated multi-week program
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Program {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub title: String,
    pub objective: Objective,
    pub duration_weeks: u32,
    pub user_id: Option<String>,
    pub weeks: Vec<Week>,
}

impl Program {
    /// Keep only week 1, the slice the calling layer stores today.
    ///
    /// `duration_weeks` still describes the planned length.
    pub fn first_week_only(mut self) -> Self {
        self.weeks.truncate(1);
        self
    }

    /// Iterate over every session with its week number
    pub fn sessions(&self) -> impl Iterator<Item = (u32, &Session)> {
        self.weeks
            .iter()
            .flat_map(|week| week.sessions.iter().map(move |s| (week.week_number, s)))
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// A soft degradation taken while building a program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Free-text input was not recognized and a default was applied
    InputDefaulted {
        field: String,
        input: String,
        applied: String,
    },
    /// Equipment narrowing would have emptied the candidates and was dropped
    EquipmentFilterRelaxed {
        week: u32,
        day_index: usize,
        muscle_group: MuscleGroup,
    },
    /// No eligible exercise for the group; a slice of the catalog was used
    CatalogSliceFallback {
        week: u32,
        day_index: usize,
        muscle_group: MuscleGroup,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InputDefaulted {
                field,
                input,
                applied,
            } => write!(f, "{field}: '{input}' not recognized, using {applied}"),
            Diagnostic::EquipmentFilterRelaxed {
                week,
                day_index,
                muscle_group,
            } => write!(
                f,
                "week {week} day {day_index}: no {muscle_group} exercise matches the available equipment, filter dropped"
            ),
            Diagnostic::CatalogSliceFallback {
                week,
                day_index,
                muscle_group,
            } => write!(
                f,
                "week {week} day {day_index}: no eligible {muscle_group} exercise, picked from the start of the catalog"
            ),
        }
    }
}

/// Output of one generation call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Generation {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}
