//! Parse-once boundary from free-form questionnaire answers to a [`Profile`].
//!
//! Answers arrive as loose text ("Prise de masse", "Débutant", "60 min",
//! "Genoux"). They are mapped here to closed enums; everything downstream
//! only sees the enums. Unrecognized answers fall back to defaults and the
//! fallback is reported as a [`Diagnostic::InputDefaulted`].

use crate::{
    Diagnostic, Experience, InjurySite, MusclePriority, Objective, Profile, SplitMethod,
};
use serde::{Deserialize, Serialize};

/// Session length used when the answer is missing or unparseable
pub const DEFAULT_SESSION_MINUTES: u32 = 45;

/// Raw generation request, as collected from the onboarding questionnaire
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub frequency: Option<i64>,
    pub duration_weeks: Option<i64>,
    pub objective: Option<String>,
    pub level: Option<String>,
    pub session_duration: Option<String>,
    pub priority: Option<String>,
    pub injuries: Vec<String>,
    pub equipment_available: Vec<String>,
    pub preferred_method: Option<String>,
    pub user_id: Option<String>,
}

impl ProfileRequest {
    /// Map the request to a valid profile, collecting the defaults applied
    pub fn into_profile(self) -> (Profile, Vec<Diagnostic>) {
        self.into_profile_with_default_minutes(DEFAULT_SESSION_MINUTES)
    }

    /// Same as [`into_profile`](Self::into_profile) with a configured session length
    pub fn into_profile_with_default_minutes(
        self,
        default_minutes: u32,
    ) -> (Profile, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();

        let frequency = self
            .frequency
            .unwrap_or(3)
            .clamp(Profile::MIN_FREQUENCY as i64, Profile::MAX_FREQUENCY as i64)
            as u32;
        let duration_weeks = match self.duration_weeks {
            None => 4,
            Some(weeks) if weeks > Profile::MAX_DURATION_WEEKS as i64 => note_default(
                &mut diagnostics,
                "duration_weeks",
                &weeks.to_string(),
                Profile::MAX_DURATION_WEEKS,
            ),
            Some(weeks) => weeks.max(1) as u32,
        };

        let objective = match self.objective.as_deref() {
            Some(text) => parse_objective(text).unwrap_or_else(|| {
                note_default(&mut diagnostics, "objective", text, Objective::Hypertrophy)
            }),
            None => Objective::Hypertrophy,
        };

        let experience = match self.level.as_deref() {
            Some(text) => parse_experience(text).unwrap_or_else(|| {
                note_default(&mut diagnostics, "level", text, Experience::Intermediate)
            }),
            None => Experience::Intermediate,
        };

        let session_duration_minutes = match self.session_duration.as_deref() {
            Some(text) => parse_session_minutes(text).unwrap_or_else(|| {
                note_default(&mut diagnostics, "session_duration", text, default_minutes)
            }),
            None => default_minutes,
        };

        let muscle_priority = self
            .priority
            .as_deref()
            .and_then(parse_muscle_priority);

        let mut injury_sites = Vec::new();
        for text in self.injuries.iter().take(Profile::MAX_INJURY_SITES) {
            match parse_injury_site(text) {
                Some(site) if !injury_sites.contains(&site) => injury_sites.push(site),
                Some(_) => {}
                None => {
                    if !text.trim().is_empty() {
                        note_default(&mut diagnostics, "injury", text, "no restriction");
                    }
                }
            }
        }

        let equipment_available = self
            .equipment_available
            .iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        let preferred_split_method = self
            .preferred_method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(|text| {
                parse_split_method(text).unwrap_or_else(|| {
                    note_default(
                        &mut diagnostics,
                        "preferred_method",
                        text,
                        SplitMethod::NoPreference,
                    )
                })
            });

        let profile = Profile {
            frequency,
            duration_weeks,
            objective,
            experience,
            session_duration_minutes,
            muscle_priority,
            injury_sites,
            equipment_available,
            preferred_split_method,
            user_id: self.user_id,
        };

        (profile, diagnostics)
    }
}

fn note_default<T: std::fmt::Display>(
    diagnostics: &mut Vec<Diagnostic>,
    field: &str,
    input: &str,
    applied: T,
) -> T {
    tracing::warn!("Unrecognized {} '{}', using {}", field, input, applied);
    diagnostics.push(Diagnostic::InputDefaulted {
        field: field.to_string(),
        input: input.to_string(),
        applied: applied.to_string(),
    });
    applied
}

/// Lowercase and strip the French accents the questionnaire uses
pub fn fold_text(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// "Force" → strength, "Prise de masse" → hypertrophy, "Tonification" → toning
pub fn parse_objective(text: &str) -> Option<Objective> {
    let folded = fold_text(text);
    if folded.contains("force") || folded.contains("strength") {
        Some(Objective::Strength)
    } else if folded.contains("masse") || folded.contains("volume") || folded.contains("hypertroph")
    {
        Some(Objective::Hypertrophy)
    } else if folded.contains("tonif") || folded.contains("toning") {
        Some(Objective::Toning)
    } else if folded.contains("endurance") || folded.contains("cardio") {
        Some(Objective::Endurance)
    } else {
        None
    }
}

pub fn parse_experience(text: &str) -> Option<Experience> {
    let folded = fold_text(text);
    if folded.contains("debutant") || folded.contains("beginner") {
        Some(Experience::Beginner)
    } else if folded.contains("avance") || folded.contains("advanced") {
        Some(Experience::Advanced)
    } else if folded.contains("interm") {
        Some(Experience::Intermediate)
    } else {
        None
    }
}

/// Parse "45", "60 min" or "30min"; zero and garbage yield None
pub fn parse_session_minutes(text: &str) -> Option<u32> {
    let cleaned: String = text.replace("min", "").split_whitespace().collect();
    cleaned.parse::<u32>().ok().filter(|m| *m > 0)
}

pub fn parse_muscle_priority(text: &str) -> Option<MusclePriority> {
    match fold_text(text).as_str() {
        "haut" | "upper" => Some(MusclePriority::Upper),
        "bas" | "lower" => Some(MusclePriority::Lower),
        _ => None,
    }
}

pub fn parse_injury_site(text: &str) -> Option<InjurySite> {
    match fold_text(text).as_str() {
        "dos" | "back" => Some(InjurySite::Back),
        "epaules" | "epaule" | "shoulders" | "shoulder" => Some(InjurySite::Shoulders),
        "genoux" | "genou" | "knees" | "knee" => Some(InjurySite::Knees),
        "coudes" | "coude" | "elbows" | "elbow" => Some(InjurySite::Elbows),
        "poignets" | "poignet" | "wrists" | "wrist" => Some(InjurySite::Wrists),
        _ => None,
    }
}

pub fn parse_split_method(text: &str) -> Option<SplitMethod> {
    let compact: String = fold_text(text)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    match compact.as_str() {
        "fullbody" => Some(SplitMethod::FullBody),
        "upperlower" | "hautbas" => Some(SplitMethod::UpperLower),
        "ppl" | "pushpulllegs" => Some(SplitMethod::PushPullLegs),
        "split" => Some(SplitMethod::Split),
        "none" | "aucune" | "nopreference" => Some(SplitMethod::NoPreference),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_objectives() {
        assert_eq!(parse_objective("Force"), Some(Objective::Strength));
        assert_eq!(parse_objective("Prise de masse"), Some(Objective::Hypertrophy));
        assert_eq!(parse_objective("Volume"), Some(Objective::Hypertrophy));
        assert_eq!(parse_objective("Tonification"), Some(Objective::Toning));
        assert_eq!(parse_objective("Cardio"), Some(Objective::Endurance));
        assert_eq!(parse_objective("yoga"), None);
    }

    #[test]
    fn test_parse_experience_handles_accents() {
        assert_eq!(parse_experience("Débutant"), Some(Experience::Beginner));
        assert_eq!(parse_experience("debutant"), Some(Experience::Beginner));
        assert_eq!(parse_experience("Avancé"), Some(Experience::Advanced));
        assert_eq!(parse_experience("Intermédiaire"), Some(Experience::Intermediate));
        assert_eq!(parse_experience("pro"), None);
    }

    #[test]
    fn test_parse_session_minutes() {
        assert_eq!(parse_session_minutes("45"), Some(45));
        assert_eq!(parse_session_minutes("60 min"), Some(60));
        assert_eq!(parse_session_minutes("30min"), Some(30));
        assert_eq!(parse_session_minutes("0"), None);
        assert_eq!(parse_session_minutes("une heure"), None);
    }

    #[test]
    fn test_parse_split_methods() {
        assert_eq!(parse_split_method("fullbody"), Some(SplitMethod::FullBody));
        assert_eq!(parse_split_method("Full Body"), Some(SplitMethod::FullBody));
        assert_eq!(parse_split_method("upper_lower"), Some(SplitMethod::UpperLower));
        assert_eq!(parse_split_method("PPL"), Some(SplitMethod::PushPullLegs));
        assert_eq!(parse_split_method("split"), Some(SplitMethod::Split));
        assert_eq!(parse_split_method("crossfit"), None);
    }

    #[test]
    fn test_request_defaults() {
        let (profile, diagnostics) = ProfileRequest::default().into_profile();

        assert_eq!(profile.frequency, 3);
        assert_eq!(profile.duration_weeks, 4);
        assert_eq!(profile.objective, Objective::Hypertrophy);
        assert_eq!(profile.experience, Experience::Intermediate);
        assert_eq!(profile.session_duration_minutes, 45);
        assert!(profile.preferred_split_method.is_none());
        assert!(diagnostics.is_empty());
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_request_clamps_frequency_and_weeks() {
        let request = ProfileRequest {
            frequency: Some(9),
            duration_weeks: Some(0),
            ..Default::default()
        };
        let (profile, _) = request.into_profile();
        assert_eq!(profile.frequency, 6);
        assert_eq!(profile.duration_weeks, 1);

        let request = ProfileRequest {
            frequency: Some(1),
            ..Default::default()
        };
        assert_eq!(request.into_profile().0.frequency, 2);
    }

    #[test]
    fn test_oversized_weeks_capped_and_reported() {
        // 2^32 would wrap to 0 with a plain cast
        let request = ProfileRequest {
            duration_weeks: Some(4_294_967_296),
            ..Default::default()
        };
        let (profile, diagnostics) = request.into_profile();

        assert_eq!(profile.duration_weeks, Profile::MAX_DURATION_WEEKS);
        assert!(profile.validate().is_ok());
        assert_eq!(
            diagnostics,
            vec![Diagnostic::InputDefaulted {
                field: "duration_weeks".into(),
                input: "4294967296".into(),
                applied: "52".into(),
            }]
        );

        let request = ProfileRequest {
            frequency: Some(i64::MAX),
            duration_weeks: Some(i64::MIN),
            ..Default::default()
        };
        let (profile, _) = request.into_profile();
        assert_eq!(profile.frequency, 6);
        assert_eq!(profile.duration_weeks, 1);
    }

    #[test]
    fn test_unrecognized_inputs_are_reported() {
        let request = ProfileRequest {
            objective: Some("yoga".into()),
            session_duration: Some("longtemps".into()),
            preferred_method: Some("crossfit".into()),
            injuries: vec!["Cheville".into()],
            ..Default::default()
        };
        let (profile, diagnostics) = request.into_profile();

        assert_eq!(profile.objective, Objective::Hypertrophy);
        assert_eq!(profile.session_duration_minutes, 45);
        assert_eq!(profile.preferred_split_method, Some(SplitMethod::NoPreference));
        assert!(profile.injury_sites.is_empty());
        assert_eq!(diagnostics.len(), 4);
        assert!(diagnostics.iter().all(|d| matches!(d, Diagnostic::InputDefaulted { .. })));
    }

    #[test]
    fn test_injuries_deduplicated_and_capped() {
        let request = ProfileRequest {
            injuries: vec!["Genoux".into(), "genoux".into(), "Dos".into()],
            ..Default::default()
        };
        let (profile, _) = request.into_profile();
        // Only the first two answers are considered
        assert_eq!(profile.injury_sites, vec![InjurySite::Knees]);

        let request = ProfileRequest {
            injuries: vec!["Épaules".into(), "Poignets".into()],
            ..Default::default()
        };
        let (profile, _) = request.into_profile();
        assert_eq!(
            profile.injury_sites,
            vec![InjurySite::Shoulders, InjurySite::Wrists]
        );
    }

    #[test]
    fn test_priority_and_equipment() {
        let request = ProfileRequest {
            priority: Some("Haut".into()),
            equipment_available: vec![" Dumbbell ".into(), "".into()],
            ..Default::default()
        };
        let (profile, _) = request.into_profile();
        assert_eq!(profile.muscle_priority, Some(MusclePriority::Upper));
        assert_eq!(profile.equipment_available, vec!["dumbbell".to_string()]);

        assert_eq!(parse_muscle_priority("specifique"), None);
    }
}
