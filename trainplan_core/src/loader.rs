//! External catalog loading from JSON or CSV files.
//!
//! JSON files hold an array of exercise records. Several field spellings are
//! accepted since catalogs come from different exporters:
//! - muscle group: `muscle_group`, `primary_muscle`, `category` or `group`
//! - equipment: a string or a list (first entry wins)
//! - description: `description`, `cues`, `common_errors` and
//!   `movement_pattern`, joined with " | "
//!
//! Fields may hold any JSON value. Lists are joined with ", " and other
//! scalars use their JSON text.
//!
//! CSV files need `name` and `muscle_group` columns; `equipment`,
//! `description` and `slug` are optional.

use crate::catalog::make_slug;
use crate::{Catalog, Error, Exercise, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Exercise record as found in exported JSON catalogs
#[derive(Debug, Default, Deserialize)]
struct RawExercise {
    name: Option<Value>,
    slug: Option<Value>,
    muscle_group: Option<Value>,
    primary_muscle: Option<Value>,
    category: Option<Value>,
    group: Option<Value>,
    equipment: Option<Value>,
    description: Option<Value>,
    cues: Option<Value>,
    common_errors: Option<Value>,
    movement_pattern: Option<Value>,
}

/// Row of a CSV catalog
#[derive(Debug, Deserialize)]
struct CsvExercise {
    name: String,
    muscle_group: String,
    #[serde(default)]
    equipment: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    slug: Option<String>,
}

/// Load a catalog, picking the format from the file extension
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let catalog = match extension.as_deref() {
        Some("csv") => load_csv_catalog(path)?,
        Some("json") | None => load_json_catalog(path)?,
        Some(other) => {
            return Err(Error::CatalogValidation(format!(
                "Unsupported catalog format '.{}' for {:?}",
                other, path
            )))
        }
    };

    tracing::info!("Loaded {} exercises from {:?}", catalog.len(), path);
    Ok(catalog)
}

/// Load a JSON array of exercise records
pub fn load_json_catalog(path: &Path) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path)?;
    parse_json_catalog(&contents)
}

/// Parse a JSON array of exercise records
pub fn parse_json_catalog(contents: &str) -> Result<Catalog> {
    let value: Value = serde_json::from_str(contents)?;
    let items = value.as_array().ok_or_else(|| {
        Error::CatalogValidation("Catalog JSON must be an array of exercises".into())
    })?;

    let mut exercises = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        if !item.is_object() {
            return Err(Error::CatalogValidation(format!(
                "Exercise at index {} must be an object",
                idx
            )));
        }
        let raw: RawExercise = serde_json::from_value(item.clone())?;
        exercises.push(normalize(raw, idx)?);
    }

    Ok(Catalog::new(exercises))
}

/// Load a CSV catalog with a header row
pub fn load_csv_catalog(path: &Path) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut exercises = Vec::new();
    for (idx, row) in reader.deserialize::<CsvExercise>().enumerate() {
        let row = row?;
        let raw = RawExercise {
            name: Some(Value::String(row.name)),
            slug: row.slug.map(Value::String),
            muscle_group: Some(Value::String(row.muscle_group)),
            equipment: row.equipment.map(Value::String),
            description: row.description.map(Value::String),
            ..RawExercise::default()
        };
        exercises.push(normalize(raw, idx)?);
    }

    Ok(Catalog::new(exercises))
}

/// Text form of a field; `null` and blank values count as missing
fn text(value: Option<Value>) -> Option<String> {
    let rendered = match value? {
        Value::Null => return None,
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| text(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    };
    let trimmed = rendered.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// First usable entry of a list, or the value itself
fn first_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Array(items) => items.into_iter().find_map(|item| text(Some(item))),
        other => text(Some(other)),
    }
}

fn normalize(raw: RawExercise, idx: usize) -> Result<Exercise> {
    let name = text(raw.name).ok_or_else(|| {
        Error::CatalogValidation(format!("Exercise at index {} is missing 'name'", idx))
    })?;

    let muscle_group = text(raw.muscle_group)
        .or_else(|| text(raw.primary_muscle))
        .or_else(|| text(raw.category))
        .or_else(|| text(raw.group))
        .unwrap_or_else(|| "other".to_string())
        .to_lowercase();

    let equipment = first_text(raw.equipment)
        .unwrap_or_else(|| "bodyweight".to_string())
        .to_lowercase();

    let mut parts = Vec::new();
    if let Some(description) = text(raw.description) {
        parts.push(description);
    }
    if let Some(cues) = text(raw.cues) {
        parts.push(format!("Cues: {}", cues));
    }
    if let Some(errors) = text(raw.common_errors) {
        parts.push(format!("Common errors: {}", errors));
    }
    if let Some(pattern) = text(raw.movement_pattern) {
        parts.push(format!("Pattern: {}", pattern));
    }
    let description = (!parts.is_empty()).then(|| parts.join(" | "));

    let slug = text(raw.slug).unwrap_or_else(|| make_slug(&name, &muscle_group));

    Ok(Exercise {
        slug,
        name,
        muscle_group,
        equipment,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MuscleGroup;

    #[test]
    fn test_parse_json_with_alternate_fields() {
        let json = r#"[
            {"name": "Squat", "muscle_group": "Quadriceps", "equipment": "Barbell Squat",
             "description": "Back squat", "cues": "Brace"},
            {"name": "Row", "primary_muscle": "back", "equipment": ["Dumbbell", "Bench"]},
            {"name": " Plank ", "category": "core"}
        ]"#;

        let catalog = parse_json_catalog(json).unwrap();
        assert_eq!(catalog.len(), 3);

        let squat = &catalog.exercises[0];
        assert_eq!(squat.slug, "squat-quadriceps");
        assert_eq!(squat.muscle_group, "quadriceps");
        assert_eq!(squat.equipment, "barbell squat");
        assert_eq!(squat.description.as_deref(), Some("Back squat | Cues: Brace"));
        assert_eq!(squat.muscle(), Some(MuscleGroup::Quads));

        let row = &catalog.exercises[1];
        assert_eq!(row.equipment, "dumbbell");
        assert_eq!(row.muscle(), Some(MuscleGroup::Back));

        let plank = &catalog.exercises[2];
        assert_eq!(plank.name, "Plank");
        assert_eq!(plank.equipment, "bodyweight");
        assert_eq!(plank.muscle(), Some(MuscleGroup::Abs));
        assert!(plank.description.is_none());
    }

    #[test]
    fn test_structured_fields_are_rendered() {
        let json = r#"[
            {"name": "Squat", "muscle_group": "quads", "cues": ["Brace", "Knees out"],
             "common_errors": ["Heels lift"], "equipment": [null, 42, "Rack"]},
            {"name": 1080, "muscle_group": "abs", "movement_pattern": {"plane": "sagittal"}}
        ]"#;

        let catalog = parse_json_catalog(json).unwrap();

        let squat = &catalog.exercises[0];
        assert_eq!(
            squat.description.as_deref(),
            Some("Cues: Brace, Knees out | Common errors: Heels lift")
        );
        assert_eq!(squat.equipment, "42");

        let spin = &catalog.exercises[1];
        assert_eq!(spin.name, "1080");
        assert_eq!(
            spin.description.as_deref(),
            Some(r#"Pattern: {"plane":"sagittal"}"#)
        );
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let json = r#"[{"name": "Curl", "muscle_group": "arms"}, {"muscle_group": "arms"}]"#;
        let err = parse_json_catalog(json).unwrap_err();
        assert!(matches!(err, Error::CatalogValidation(ref msg) if msg.contains("index 1")));
    }

    #[test]
    fn test_non_array_is_rejected() {
        let err = parse_json_catalog(r#"{"name": "Curl"}"#).unwrap_err();
        assert!(matches!(err, Error::CatalogValidation(_)));
    }

    #[test]
    fn test_missing_group_defaults_to_other() {
        let catalog = parse_json_catalog(r#"[{"name": "Mystery"}]"#).unwrap();
        assert_eq!(catalog.exercises[0].muscle_group, "other");
        assert_eq!(catalog.validate().len(), 1);
    }

    #[test]
    fn test_load_csv_catalog() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("exercises.csv");
        std::fs::write(
            &path,
            "name,muscle_group,equipment,description,slug\n\
             Leg Press,Quadriceps,machine,,\n\
             Nordic Curl,Ischios,,Eccentric focus,nordic\n",
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.exercises[0].slug, "leg-press-quadriceps");
        assert_eq!(catalog.exercises[1].slug, "nordic");
        assert_eq!(catalog.exercises[1].equipment, "bodyweight");
        assert_eq!(
            catalog.exercises[1].description.as_deref(),
            Some("Eccentric focus")
        );
    }

    #[test]
    fn test_load_json_file_and_reject_unknown_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("exercises.json");
        std::fs::write(&path, r#"[{"name": "Dip", "muscle_group": "Bras"}]"#).unwrap();
        assert_eq!(load_catalog(&path).unwrap().len(), 1);

        let yaml = temp_dir.path().join("exercises.yaml");
        std::fs::write(&yaml, "- name: Dip").unwrap();
        assert!(matches!(
            load_catalog(&yaml),
            Err(Error::CatalogValidation(_))
        ));
    }
}
