//! Application settings loading from config.toml
//!
//! The file currently carries the default retroplanning template: the phases a
//! plan is built from when a project is scheduled without explicit tasks.

use crate::{
    core::retroplanning::{TaskColor, TaskStub},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable naming the settings file.
pub const CONFIG_PATH_VAR: &str = "AGENCY_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Retroplanning defaults
    #[serde(default)]
    pub retroplanning: RetroplanningSettings,
}

/// Retroplanning section of the settings.
#[derive(Debug, Deserialize)]
pub struct RetroplanningSettings {
    /// Phases of the default template, in order
    pub phases: Vec<PhaseConfig>,
}

/// One phase of the default template.
#[derive(Debug, Deserialize, Clone)]
pub struct PhaseConfig {
    /// Display label
    pub label: String,
    /// Length in days
    pub duration_days: i64,
    /// Color tag
    pub color: TaskColor,
}

impl Default for RetroplanningSettings {
    fn default() -> Self {
        let phase = |label: &str, duration_days, color| PhaseConfig {
            label: label.to_string(),
            duration_days,
            color,
        };
        Self {
            phases: vec![
                phase("Brief", 2, TaskColor::Gray),
                phase("Conception", 5, TaskColor::Purple),
                phase("Production", 10, TaskColor::Blue),
                phase("Validation client", 3, TaskColor::Amber),
                phase("Livraison", 1, TaskColor::Green),
            ],
        }
    }
}

impl RetroplanningSettings {
    /// Turns the template into scheduler input, ids `phase-0`, `phase-1`, ...
    #[must_use]
    pub fn stubs(&self) -> Vec<TaskStub> {
        self.phases
            .iter()
            .enumerate()
            .map(|(i, p)| TaskStub::new(format!("phase-{i}"), &p.label, p.duration_days, p.color))
            .collect()
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid TOML, or
/// declares a phase shorter than one day.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;
    parse_settings(&contents)
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns an error for invalid TOML or a phase shorter than one day.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    crate::core::retroplanning::validate_stubs(&settings.retroplanning.stubs())?;
    Ok(settings)
}

/// Loads settings from `$AGENCY_CONFIG` (default `./config.toml`).
///
/// A missing file yields the built-in defaults; a present but broken file is
/// an error.
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        debug!("Loading settings from {}", path);
        load_settings(&path)
    } else {
        warn!("No settings file at {}, using defaults", path);
        Ok(Settings::default())
    }
}
