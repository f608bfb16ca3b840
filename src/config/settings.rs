//! Application settings loading from config.toml
//!
//! Controls how the dashboard buckets payments into "this month", whether the
//! sample data is seeded on start, and where reports are exported. Every section
//! is optional; a missing file yields the defaults.

use crate::core::month::MonthMatch;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Dashboard aggregation settings
    pub dashboard: DashboardSettings,
    /// Startup seeding settings
    pub seed: SeedSettings,
    /// Report export settings
    pub export: ExportSettings,
}

/// `[dashboard]` section
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Rule bucketing payments into the reference month
    pub month_match: MonthMatch,
}

/// `[seed]` section
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
    /// Insert the sample vehicles, payments and gold records into an empty store
    pub sample_data: bool,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self { sample_data: true }
    }
}

/// `[export]` section
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory that receives every report on start, if set
    pub directory: Option<PathBuf>,
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads settings from `path`, or returns the defaults when the file does not exist.
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        tracing::warn!(
            "No configuration file at {}, using defaults",
            path_ref.display()
        );
        return Ok(Settings::default());
    }
    load_settings(path_ref)
}

/// Loads settings from the default location (./config.toml)
pub fn load_default_settings() -> Result<Settings> {
    load_settings_or_default("config.toml")
}
