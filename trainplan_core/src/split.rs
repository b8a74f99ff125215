//! Weekly split planning.
//!
//! Maps a weekly frequency and an optional preferred method to the ordered
//! list of session labels for one week. The result always has exactly
//! `frequency` entries.

use crate::{SessionFocus, SplitLabel, SplitMethod};
use rand::seq::SliceRandom;
use rand::Rng;

const PUSH_PULL_LEGS: [(&str, SessionFocus); 3] = [
    ("Push", SessionFocus::Push),
    ("Pull", SessionFocus::Pull),
    ("Legs", SessionFocus::Legs),
];

/// Seven-day rotation used past the explicit stock table
const STOCK_ROTATION: [(&str, SessionFocus); 7] = [
    ("Push", SessionFocus::Push),
    ("Pull", SessionFocus::Pull),
    ("Legs", SessionFocus::Legs),
    ("Upper Body", SessionFocus::Upper),
    ("Lower Body", SessionFocus::Lower),
    ("Full Body", SessionFocus::FullBody),
    ("Active Recovery", SessionFocus::ActiveRecovery),
];

/// Plan the weekly split
///
/// Without a preferred method the style is drawn at random:
/// - frequency ≤ 2: always full body
/// - frequency 3: full body, upper/lower or split
/// - frequency ≥ 4: any of the four styles
pub fn plan_split<R: Rng + ?Sized>(
    frequency: u32,
    preferred_method: Option<SplitMethod>,
    rng: &mut R,
) -> Vec<SplitLabel> {
    let method = match preferred_method {
        Some(method) => method,
        None => choose_method(frequency, rng),
    };

    tracing::info!("Planning {}-day split with method {}", frequency, method);

    let labels = labels_for(method, frequency as usize);
    debug_assert_eq!(labels.len(), frequency as usize);
    labels
}

fn choose_method<R: Rng + ?Sized>(frequency: u32, rng: &mut R) -> SplitMethod {
    let options: &[SplitMethod] = match frequency {
        0..=2 => &[SplitMethod::FullBody],
        3 => &[
            SplitMethod::FullBody,
            SplitMethod::UpperLower,
            SplitMethod::Split,
        ],
        _ => &[
            SplitMethod::FullBody,
            SplitMethod::UpperLower,
            SplitMethod::Split,
            SplitMethod::PushPullLegs,
        ],
    };

    let method = options
        .choose(rng)
        .copied()
        .unwrap_or(SplitMethod::FullBody);
    tracing::debug!("No preferred method, drew {} for frequency {}", method, frequency);
    method
}

fn labels_for(method: SplitMethod, frequency: usize) -> Vec<SplitLabel> {
    match method {
        SplitMethod::FullBody => full_body(frequency),
        SplitMethod::UpperLower => (0..frequency)
            .map(|i| {
                if i % 2 == 0 {
                    SplitLabel::new("Upper Body", SessionFocus::Upper)
                } else {
                    SplitLabel::new("Lower Body", SessionFocus::Lower)
                }
            })
            .collect(),
        SplitMethod::Split => match frequency {
            1 => full_body(1),
            2 => vec![
                SplitLabel::new("Upper Body", SessionFocus::Upper),
                SplitLabel::new("Lower Body", SessionFocus::Lower),
            ],
            3..=5 => named(&STOCK_ROTATION[..frequency]),
            _ => stock_table(frequency),
        },
        SplitMethod::PushPullLegs => PUSH_PULL_LEGS
            .iter()
            .cycle()
            .take(frequency)
            .map(|(name, focus)| SplitLabel::new(*name, *focus))
            .collect(),
        SplitMethod::NoPreference => stock_table(frequency),
    }
}

fn named(entries: &[(&str, SessionFocus)]) -> Vec<SplitLabel> {
    entries
        .iter()
        .map(|(name, focus)| SplitLabel::new(*name, *focus))
        .collect()
}

fn full_body(frequency: usize) -> Vec<SplitLabel> {
    if frequency == 3 {
        ["Full Body A", "Full Body B", "Full Body C"]
            .iter()
            .map(|name| SplitLabel::new(*name, SessionFocus::FullBody))
            .collect()
    } else {
        vec![SplitLabel::new("Full Body", SessionFocus::FullBody); frequency]
    }
}

/// Hard-coded table for methods without a dedicated rule
fn stock_table(frequency: usize) -> Vec<SplitLabel> {
    match frequency {
        0..=3 => full_body(frequency),
        4 => named(&[
            ("Upper Body A", SessionFocus::Upper),
            ("Lower Body A", SessionFocus::Lower),
            ("Upper Body B", SessionFocus::Upper),
            ("Lower Body B", SessionFocus::Lower),
        ]),
        5 => named(&STOCK_ROTATION[..5]),
        6 => named(&[
            ("Push A", SessionFocus::Push),
            ("Pull A", SessionFocus::Pull),
            ("Legs A", SessionFocus::Legs),
            ("Push B", SessionFocus::Push),
            ("Pull B", SessionFocus::Pull),
            ("Legs B", SessionFocus::Legs),
        ]),
        _ => STOCK_ROTATION
            .iter()
            .cycle()
            .take(frequency)
            .map(|(name, focus)| SplitLabel::new(*name, *focus))
            .collect(),
    }
}
