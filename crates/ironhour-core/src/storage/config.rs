//! TOML-based application configuration.
//!
//! Holds the phase duration overrides and display preferences. Stored at
//! `<data_dir>/config.toml`; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::session::{PhaseDurations, DURATION_CALIBRATION, DURATION_FOCUS, DURATION_REVIEW};

/// Phase duration overrides, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationsConfig {
    #[serde(default = "default_calibration_secs")]
    pub calibration_secs: u32,
    #[serde(default = "default_focus_secs")]
    pub focus_secs: u32,
    #[serde(default = "default_review_secs")]
    pub review_secs: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub durations: DurationsConfig,
    /// Number of cells in the history wall (a year by default).
    #[serde(default = "default_wall_slots")]
    pub wall_slots: u32,
}

fn default_calibration_secs() -> u32 {
    DURATION_CALIBRATION
}
fn default_focus_secs() -> u32 {
    DURATION_FOCUS
}
fn default_review_secs() -> u32 {
    DURATION_REVIEW
}
fn default_wall_slots() -> u32 {
    365
}

impl Default for DurationsConfig {
    fn default() -> Self {
        Self {
            calibration_secs: default_calibration_secs(),
            focus_secs: default_focus_secs(),
            review_secs: default_review_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            durations: DurationsConfig::default(),
            wall_slots: default_wall_slots(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("<data dir>"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The machine-facing durations this config resolves to.
    pub fn phase_durations(&self) -> PhaseDurations {
        PhaseDurations {
            calibration_secs: self.durations.calibration_secs,
            focus_secs: self.durations.focus_secs,
            review_secs: self.durations.review_secs,
        }
    }

    /// All keys addressable via `config get`/`config set`.
    pub fn keys() -> [&'static str; 4] {
        [
            "durations.calibration_secs",
            "durations.focus_secs",
            "durations.review_secs",
            "wall_slots",
        ]
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "durations.calibration_secs" => Ok(self.durations.calibration_secs.to_string()),
            "durations.focus_secs" => Ok(self.durations.focus_secs.to_string()),
            "durations.review_secs" => Ok(self.durations.review_secs.to_string()),
            "wall_slots" => Ok(self.wall_slots.to_string()),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parsed: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{value}' is not a non-negative integer"),
        })?;
        let slot = match key {
            "durations.calibration_secs" => &mut self.durations.calibration_secs,
            "durations.focus_secs" => &mut self.durations.focus_secs,
            "durations.review_secs" => &mut self.durations.review_secs,
            "wall_slots" => &mut self.wall_slots,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        if parsed == 0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        *slot = parsed;
        Ok(())
    }
}
