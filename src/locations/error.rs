use std::path::PathBuf;
use thiserror::Error;

/// The location list could not be obtained. Fatal: no fetch is attempted.
#[derive(Debug, Error)]
pub enum LocationSourceError {
    #[error("Config file not found: '{0}'")]
    Missing(PathBuf),

    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Config file '{0}' does not list any locations")]
    Empty(PathBuf),

    #[error("Location '{name}' is listed more than once in '{path}'")]
    DuplicateName { path: PathBuf, name: String },

    #[error("Location '{name}' has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        name: String,
        latitude: f64,
        longitude: f64,
    },
}
