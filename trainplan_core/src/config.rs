//! Configuration file support for trainplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/trainplan/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Where exercises come from
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON or CSV catalog replacing the built-in one
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Tunables of the generator
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_session_minutes")]
    pub default_session_minutes: u32,

    /// Rest/transition budget between consecutive exercises
    #[serde(default = "default_transition_minutes")]
    pub transition_minutes: f64,

    /// Catalog entries used when a muscle group has no eligible exercise
    #[serde(default = "default_fallback_slice_len")]
    pub fallback_slice_len: usize,

    /// Most exercises drawn for one muscle group in a full-body session
    #[serde(default = "default_full_body_group_cap")]
    pub full_body_group_cap: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_session_minutes: default_session_minutes(),
            transition_minutes: default_transition_minutes(),
            fallback_slice_len: default_fallback_slice_len(),
            full_body_group_cap: default_full_body_group_cap(),
        }
    }
}

/// Output location for exported programs
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

// Default value functions
fn default_output_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("trainplan")
}

fn default_session_minutes() -> u32 {
    crate::intake::DEFAULT_SESSION_MINUTES
}

fn default_transition_minutes() -> f64 {
    1.5
}

fn default_fallback_slice_len() -> usize {
    crate::selector::DEFAULT_FALLBACK_SLICE_LEN
}

fn default_full_body_group_cap() -> usize {
    2
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the generator cannot work with
    pub fn validate(&self) -> Result<()> {
        let generator = &self.generator;
        if generator.default_session_minutes == 0 {
            return Err(Error::Config(
                "generator.default_session_minutes must be positive".into(),
            ));
        }
        if !generator.transition_minutes.is_finite() || generator.transition_minutes < 0.0 {
            return Err(Error::Config(format!(
                "generator.transition_minutes must be a non-negative number, got {}",
                generator.transition_minutes
            )));
        }
        if generator.fallback_slice_len == 0 {
            return Err(Error::Config(
                "generator.fallback_slice_len must be at least 1".into(),
            ));
        }
        if generator.full_body_group_cap == 0 {
            return Err(Error::Config(
                "generator.full_body_group_cap must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Place a relative export path under `output.dir`; absolute paths are kept
    pub fn resolve_output_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output.dir.join(path)
        }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("trainplan").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
