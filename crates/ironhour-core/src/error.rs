//! Core error types for ironhour-core.
//!
//! Validation rejects are deliberately separate from infrastructure errors:
//! a reject leaves the session machine untouched and is always recoverable
//! by the user, while store/config errors surface real I/O failures.

use std::path::PathBuf;
use thiserror::Error;

use serde::{Deserialize, Serialize};

/// Reason a user action was rejected by session validation.
///
/// Serialized as the wire tags the presentation layer keys its messaging on
/// (`MISSING_GOAL`, `MISSING_WHY`, ...). A reject never changes machine state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reject {
    /// Calibration cannot complete without a target for the hour.
    #[error("MISSING_GOAL: direction before action, set a goal first")]
    MissingGoal,
    /// Calibration cannot complete without a rationale.
    #[error("MISSING_WHY: connect this hour to something that matters")]
    MissingWhy,
    /// FOUNDATION plan requires all three gratitude entries.
    #[error("MISSING_GRATITUDES: gratitude is the foundation, list all 3")]
    MissingGratitudes,
    /// Review cannot be submitted without a reflection.
    #[error("MISSING_REFLECTION: reflect to refine, don't skip the mirror")]
    MissingReflection,
}

/// Storage errors from the on-device key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the database file.
    #[error("failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed.
    #[error("store query failed: {0}")]
    QueryFailed(String),

    /// The data directory could not be resolved or created.
    #[error("failed to prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),

    /// A stored document could not be (de)serialized.
    #[error("stored document is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration.
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration.
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key.
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Core error type for ironhour-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A session action was rejected by validation.
    #[error("action rejected: {0}")]
    Rejected(#[from] Reject),

    /// An action was issued to a machine state that cannot accept it.
    #[error("invalid session action: {0}")]
    InvalidAction(String),

    /// An unrecognized field name was passed to `set_field`.
    #[error("unknown session field: '{0}'")]
    UnknownField(String),

    /// A field value failed to parse.
    #[error("invalid value for field '{field}': {message}")]
    InvalidFieldValue { field: String, message: String },

    /// Storage errors.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_serializes_to_wire_tag() {
        let json = serde_json::to_string(&Reject::MissingGratitudes).unwrap();
        assert_eq!(json, "\"MISSING_GRATITUDES\"");
    }

    #[test]
    fn reject_display_leads_with_the_wire_tag() {
        assert!(Reject::MissingGoal.to_string().starts_with("MISSING_GOAL:"));
        assert!(CoreError::from(Reject::MissingWhy)
            .to_string()
            .contains("MISSING_WHY"));
    }
}
