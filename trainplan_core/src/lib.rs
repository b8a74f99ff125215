#![forbid(unsafe_code)]

//! Core domain model and business logic for trainplan.
//!
//! This crate provides:
//! - Domain types (profiles, exercises, sessions, programs, diagnostics)
//! - Intake parsing of free-text questionnaire answers
//! - Catalog management (built-in catalog, JSON/CSV loading)
//! - Split planning, scheme resolution and exercise selection
//! - Session assembly and the multi-week program generator
//! - Program export

pub mod types;
pub mod error;
pub mod intake;
pub mod catalog;
pub mod loader;
pub mod config;
pub mod logging;
pub mod scheme;
pub mod split;
pub mod selector;
pub mod progression;
pub mod session;
pub mod engine;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, default_catalog};
pub use config::{Config, GeneratorConfig};
pub use intake::ProfileRequest;
pub use loader::load_catalog;
pub use engine::{generate_program, generate_program_with};
pub use export::{write_program_csv, write_program_json};
