use std::path::PathBuf;

use crate::validation::ConfigGuardRailError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),

    #[error("invalid server url '{value}': {source}")]
    InvalidServerUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{var} must be a duration like '500ms' or '2s', got '{value}'")]
    InvalidDuration {
        var: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
}
