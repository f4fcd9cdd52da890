use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    ENV_CONFIG_JSON, ENV_CONFIG_PATH, ENV_MAX_POLL_ATTEMPTS, ENV_POLL_INTERVAL,
    ENV_REQUEST_TIMEOUT, ENV_SERVER_URL,
};
use crate::util::non_blank_var;

/// Source that produced the file-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "built-in defaults"),
            ConfigSource::EnvPath(path) => {
                write!(f, "{} (via {ENV_CONFIG_PATH})", path.display())
            }
            ConfigSource::EnvInline => write!(f, "{ENV_CONFIG_JSON}"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Raw configuration as defined in a TOML or JSON file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub acquisition: FileAcquisitionConfig,
    #[serde(default)]
    pub gallery: FileGalleryConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAcquisitionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_poll_attempts: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileGalleryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe_threshold_px: Option<f32>,
}

/// Environment-derived configuration values, kept raw until the loader
/// parses them so errors can name the offending variable.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub config_json: Option<String>,
    pub server_url: Option<String>,
    pub request_timeout: Option<String>,
    pub poll_interval: Option<String>,
    pub max_poll_attempts: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: non_blank_var(ENV_CONFIG_PATH).map(PathBuf::from),
            config_json: non_blank_var(ENV_CONFIG_JSON),
            server_url: non_blank_var(ENV_SERVER_URL),
            request_timeout: non_blank_var(ENV_REQUEST_TIMEOUT),
            poll_interval: non_blank_var(ENV_POLL_INTERVAL),
            max_poll_attempts: non_blank_var(ENV_MAX_POLL_ATTEMPTS),
        }
    }
}
