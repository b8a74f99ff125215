//! Set/rep/intensity schemes per training goal and experience level.

use crate::{Experience, Objective, SchemeValues};

/// RPE ceiling for advanced lifters
const MAX_RPE: f64 = 9.0;

/// Minimum working sets once the beginner reduction is applied
const MIN_SETS: u32 = 2;

/// Baseline prescription for an intermediate lifter
fn base_scheme(objective: Objective) -> SchemeValues {
    let (sets, reps, rpe) = match objective {
        Objective::Strength => (4, "4-6", 8.5),
        Objective::Hypertrophy => (3, "8-12", 7.5),
        Objective::Toning => (3, "12-15", 7.0),
        Objective::Endurance => (2, "15-20", 6.5),
    };
    SchemeValues {
        sets,
        reps: reps.to_string(),
        rpe,
    }
}

/// Resolve the prescription for a goal, adjusted for experience
///
/// - Beginner: one set fewer (never below 2), RPE lowered by 1
/// - Advanced: one set more, RPE raised by 0.5 up to 9
pub fn resolve_scheme(objective: Objective, experience: Experience) -> SchemeValues {
    let mut scheme = base_scheme(objective);

    match experience {
        Experience::Beginner => {
            scheme.sets = scheme.sets.saturating_sub(1).max(MIN_SETS);
            scheme.rpe -= 1.0;
        }
        Experience::Advanced => {
            scheme.sets += 1;
            scheme.rpe = (scheme.rpe + 0.5).min(MAX_RPE);
        }
        Experience::Intermediate => {}
    }

    scheme
}
