//! Error types for the DroneView core crate.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid limit '{field}': {reason}")]
    InvalidLimit { field: &'static str, reason: String },

    #[error("Invalid ICAO code '{0}'")]
    InvalidIcao(String),

    #[error("A preset for this airport already exists.")]
    DuplicatePreset(String),

    #[error("Invalid cruise speed {0} m/s")]
    InvalidSpeed(f64),

    #[error("Failed to access settings file '{0}'")]
    SettingsIo(PathBuf, #[source] std::io::Error),

    #[error("Malformed settings file '{0}'")]
    SettingsFormat(PathBuf, #[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
