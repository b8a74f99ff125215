//! Progressive overload and time-budget rules.
//!
//! Set counts follow a bi-weekly wave: weeks 1–2 use the baseline, weeks
//! 3–4 add one set, weeks 5–6 return to baseline, and so on. Time estimates
//! are derived from the resulting set count.

/// Working sets for `week` (1-based) given the baseline from the scheme
///
/// One extra set is added on every odd two-week block.
pub fn sets_for_week(base_sets: u32, week: u32) -> u32 {
    let block = week.saturating_sub(1) / 2;
    if block % 2 == 1 {
        base_sets + 1
    } else {
        base_sets
    }
}

/// Estimated minutes for one exercise, including rest between its sets
pub fn estimate_exercise_minutes(sets: u32) -> u32 {
    match sets {
        6.. => 12,
        5 => 10,
        4 => 8,
        3 => 6,
        2 => 4,
        _ => 3,
    }
}

/// Session length: exercise minutes plus a transition between consecutive exercises
///
/// The transition budget is rounded down to whole minutes. An empty session lasts 0.
pub fn estimate_session_minutes(exercise_minutes: &[u32], transition_minutes: f64) -> u32 {
    if exercise_minutes.is_empty() {
        return 0;
    }
    let work: u32 = exercise_minutes.iter().sum();
    let transitions = (exercise_minutes.len() - 1) as f64 * transition_minutes.max(0.0);
    work + transitions.floor() as u32
}
