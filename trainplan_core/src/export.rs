//! Program export to JSON and CSV files.
//!
//! Files are written atomically: contents go to a temp file in the target
//! directory, which is locked, synced and then renamed over the destination.

use crate::{Error, Program, Result, Session};
use fs2::FileExt;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// One prescribed exercise of a session, in the order it is performed
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgramSetRow {
    pub order_index: usize,
    pub exercise_slug: String,
    pub exercise_name: String,
    pub sets: u32,
    pub reps: String,
    /// Load is chosen by the athlete; generated rows never carry one
    pub weight: Option<f64>,
    pub rpe: f64,
    pub notes: String,
}

/// Flattened CSV record: one row per planned exercise
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    week: u32,
    day_index: usize,
    session_title: &'a str,
    focus: &'a str,
    session_minutes: u32,
    order_index: usize,
    slug: &'a str,
    name: &'a str,
    sets: u32,
    reps: &'a str,
    rpe: f64,
    exercise_minutes: u32,
}

/// Rows stored for a session; `order_index` starts at 0
pub fn session_rows(session: &Session) -> Vec<ProgramSetRow> {
    session
        .exercises
        .iter()
        .enumerate()
        .map(|(order_index, planned)| ProgramSetRow {
            order_index,
            exercise_slug: planned.exercise.slug.clone(),
            exercise_name: planned.exercise.name.clone(),
            sets: planned.sets,
            reps: planned.reps.clone(),
            weight: None,
            rpe: planned.rpe,
            notes: format!("{} séries", planned.sets),
        })
        .collect()
}

/// Write the program as CSV with a header row
pub fn write_csv<W: Write>(program: &Program, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    for (week, session) in program.sessions() {
        for (order_index, planned) in session.exercises.iter().enumerate() {
            writer.serialize(CsvRow {
                week,
                day_index: session.day_index,
                session_title: &session.title,
                focus: &session.focus,
                session_minutes: session.estimated_minutes,
                order_index,
                slug: &planned.exercise.slug,
                name: &planned.exercise.name,
                sets: planned.sets,
                reps: &planned.reps,
                rpe: planned.rpe,
                exercise_minutes: planned.estimated_minutes,
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Save the program as pretty-printed JSON
pub fn write_program_json(program: &Program, path: &Path) -> Result<()> {
    write_atomic(path, |file| {
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, program)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    })?;
    tracing::info!("Wrote program '{}' to {:?}", program.title, path);
    Ok(())
}

/// Save the program as CSV
pub fn write_program_csv(program: &Program, path: &Path) -> Result<()> {
    write_atomic(path, |file| write_csv(program, BufWriter::new(file)))?;
    tracing::info!("Wrote program '{}' to {:?}", program.title, path);
    Ok(())
}

fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&File) -> Result<()>,
{
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    // Temp file in the same directory so the rename stays on one filesystem
    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    write(temp.as_file())?;

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
