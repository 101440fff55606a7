//! Dashboard Configuration Module
//! Optional JSON config file with defaults for every field.

use crate::schedule::{format_minutes, parse_start_minutes};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid time '{0}' in config, expected HH:MM")]
    Time(String),
    #[error("Time window is empty: {min} is after {max}")]
    EmptyWindow { min: String, max: String },
}

/// Header names of the four schedule columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub day: String,
    pub time: String,
    pub course: String,
    pub location: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            day: "Tag".to_string(),
            time: "Uhrzeit".to_string(),
            course: "Kurs".to_string(),
            location: "Ort".to_string(),
        }
    }
}

/// Bounds and step of the time range slider, as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeWindowConfig {
    pub min: String,
    pub max: String,
    pub step_minutes: u16,
}

impl Default for TimeWindowConfig {
    fn default() -> Self {
        Self {
            min: "06:00".to_string(),
            max: "23:00".to_string(),
            step_minutes: 30,
        }
    }
}

/// Resolved slider window in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub min: u16,
    pub max: u16,
    pub step: u16,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            min: 6 * 60,
            max: 23 * 60,
            step: 30,
        }
    }
}

impl TimeWindowConfig {
    pub fn resolve(&self) -> Result<TimeWindow, ConfigError> {
        let min = parse_start_minutes(&self.min).ok_or_else(|| ConfigError::Time(self.min.clone()))?;
        let max = parse_start_minutes(&self.max).ok_or_else(|| ConfigError::Time(self.max.clone()))?;
        if min > max {
            return Err(ConfigError::EmptyWindow {
                min: format_minutes(min),
                max: format_minutes(max),
            });
        }
        Ok(TimeWindow {
            min,
            max,
            step: self.step_minutes.max(1),
        })
    }
}

/// Initial state of the view toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub hide_empty_hours: bool,
    pub compact: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 900.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub csv_path: PathBuf,
    pub columns: ColumnNames,
    pub time_window: TimeWindowConfig,
    pub view: ViewConfig,
    pub window: WindowConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("Wellpass.csv"),
            columns: ColumnNames::default(),
            time_window: TimeWindowConfig::default(),
            view: ViewConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read the config at `path`, or the defaults if no file exists there.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.time_window.resolve()?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "columns": { "location": "Studio" } }"#).unwrap();
        assert_eq!(config.columns.location, "Studio");
        assert_eq!(config.columns.day, "Tag");
        assert_eq!(config.csv_path, PathBuf::from("Wellpass.csv"));
        assert_eq!(config.time_window.resolve().unwrap(), TimeWindow::default());
    }

    #[test]
    fn window_resolves_to_minutes() {
        let window = TimeWindowConfig {
            min: "7:30".to_string(),
            max: "21:00".to_string(),
            step_minutes: 15,
        }
        .resolve()
        .unwrap();
        assert_eq!(window, TimeWindow { min: 450, max: 1260, step: 15 });
    }

    #[test]
    fn inverted_window_is_rejected() {
        let result = TimeWindowConfig {
            min: "22:00".to_string(),
            max: "06:00".to_string(),
            step_minutes: 30,
        }
        .resolve();
        assert!(matches!(result, Err(ConfigError::EmptyWindow { .. })));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            DashboardConfig::load_or_default(&path),
            Err(ConfigError::Json { .. })
        ));
    }
}
