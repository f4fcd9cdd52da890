//! Layered configuration loading.
//!
//! Evaluation order:
//! 1) `.env` in the working directory (optional),
//! 2) `$CARSIFT_CONFIG_PATH` (TOML or JSON file),
//! 3) `$CARSIFT_CONFIG_JSON` (inline JSON),
//! 4) the first existing default file candidate,
//! 5) built-in defaults,
//!
//! after which individual `CARSIFT_*` variables override single fields.

pub mod error;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use url::Url;

use crate::{
    constants::{
        DEFAULT_FILE_CANDIDATES, DEFAULT_SERVER_URL, ENV_MAX_POLL_ATTEMPTS,
        ENV_POLL_INTERVAL, ENV_REQUEST_TIMEOUT,
    },
    models::{
        AcquisitionConfig, GalleryConfig, ServerConfig, ViewerConfig,
        sources::{ConfigSource, EnvConfig, FileConfig},
    },
    util::parse_duration,
    validation::{ConfigGuardRailError, validate},
};

use self::error::ConfigLoadError;

/// Result of a successful load, including where the values came from.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: ViewerConfig,
    pub source: ConfigSource,
    pub env_file_loaded: bool,
    /// Environment variables that overrode a file or default value.
    pub overrides: Vec<&'static str>,
}

impl ConfigLoad {
    /// Apply a command-line server URL on top of the loaded values and
    /// re-check the guard rails. On error the load is left untouched.
    pub fn override_server_url(
        &mut self,
        url: Url,
    ) -> Result<(), ConfigGuardRailError> {
        let mut config = self.config.clone();
        config.server.base_url = url;
        validate(&config)?;
        self.config = config;
        self.overrides.push("--server-url");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env: Option<EnvConfig>,
    search_root: PathBuf,
    load_dotenv: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            env: None,
            search_root: PathBuf::from("."),
            load_dotenv: true,
        }
    }

    /// Use an explicit environment snapshot instead of the process
    /// environment. Also disables `.env` loading.
    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = Some(env);
        self.load_dotenv = false;
        self
    }

    /// Directory searched for the default file candidates.
    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_root = root.into();
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = if self.load_dotenv {
            match dotenvy::dotenv() {
                Ok(_) => true,
                Err(err) if err.not_found() => false,
                Err(err) => return Err(err.into()),
            }
        } else {
            false
        };

        let env = match &self.env {
            Some(env) => env.clone(),
            None => EnvConfig::gather(),
        };

        let (file, source) = self.load_file_layer(&env)?;
        let mut overrides = Vec::new();
        let config = resolve(file, &env, &mut overrides)?;
        validate(&config)?;

        Ok(ConfigLoad {
            config,
            source,
            env_file_loaded,
            overrides,
        })
    }

    fn load_file_layer(
        &self,
        env: &EnvConfig,
    ) -> Result<(FileConfig, ConfigSource), ConfigLoadError> {
        if let Some(path) = env.config_path.as_ref() {
            let config = load_from_file(path)?;
            return Ok((config, ConfigSource::EnvPath(path.clone())));
        }

        if let Some(raw) = env.config_json.as_deref() {
            let config = serde_json::from_str(raw).map_err(|err| {
                ConfigLoadError::Parse {
                    origin: "inline json".to_string(),
                    message: err.to_string(),
                }
            })?;
            return Ok((config, ConfigSource::EnvInline));
        }

        if let Some(path) = self.find_default_file() {
            let config = load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((FileConfig::default(), ConfigSource::Default))
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        DEFAULT_FILE_CANDIDATES
            .iter()
            .map(|candidate| self.search_root.join(candidate))
            .find(|path| path.exists())
    }
}

pub fn load_from_file(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

    let origin = path.display().to_string();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents).map_err(|err| {
            ConfigLoadError::Parse {
                origin,
                message: err.to_string(),
            }
        }),
        Some("toml") | Some("tml") => {
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                origin,
                message: err.to_string(),
            })
        }
        _ => parse_from_str(&contents, &origin),
    }
}

/// Try TOML first, then JSON.
pub fn parse_from_str(
    contents: &str,
    origin: &str,
) -> Result<FileConfig, ConfigLoadError> {
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| {
            ConfigLoadError::Parse {
                origin: origin.to_string(),
                message: format!(
                    "toml error: {toml_err}; json error: {json_err}"
                ),
            }
        })
    })
}

fn resolve(
    file: FileConfig,
    env: &EnvConfig,
    overrides: &mut Vec<&'static str>,
) -> Result<ViewerConfig, ConfigLoadError> {
    let raw_url = match env.server_url.as_deref() {
        Some(url) => {
            overrides.push(crate::constants::ENV_SERVER_URL);
            url.to_string()
        }
        None => file
            .server
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
    };
    let base_url = Url::parse(raw_url.trim()).map_err(|source| {
        ConfigLoadError::InvalidServerUrl {
            value: raw_url.clone(),
            source,
        }
    })?;

    let mut server = ServerConfig::with_base_url(base_url);
    if let Some(secs) = file.server.request_timeout_secs {
        server.request_timeout = Duration::from_secs(secs);
    }
    if let Some(raw) = env.request_timeout.as_deref() {
        server.request_timeout = env_duration(ENV_REQUEST_TIMEOUT, raw)?;
        overrides.push(ENV_REQUEST_TIMEOUT);
    }

    let mut acquisition = AcquisitionConfig::default();
    if let Some(ms) = file.acquisition.poll_interval_ms {
        acquisition.poll_interval = Duration::from_millis(ms);
    }
    if let Some(attempts) = file.acquisition.max_poll_attempts {
        acquisition.max_poll_attempts = attempts;
    }
    if let Some(raw) = env.poll_interval.as_deref() {
        acquisition.poll_interval = env_duration(ENV_POLL_INTERVAL, raw)?;
        overrides.push(ENV_POLL_INTERVAL);
    }
    if let Some(raw) = env.max_poll_attempts.as_deref() {
        acquisition.max_poll_attempts = raw.trim().parse().map_err(|_| {
            ConfigLoadError::InvalidNumber {
                var: ENV_MAX_POLL_ATTEMPTS,
                value: raw.to_string(),
            }
        })?;
        overrides.push(ENV_MAX_POLL_ATTEMPTS);
    }

    let mut gallery = GalleryConfig::default();
    if let Some(threshold) = file.gallery.swipe_threshold_px {
        gallery.swipe_threshold_px = threshold;
    }

    Ok(ViewerConfig {
        server,
        acquisition,
        gallery,
    })
}

fn env_duration(
    var: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    parse_duration(raw).map_err(|source| ConfigLoadError::InvalidDuration {
        var,
        value: raw.to_string(),
        source,
    })
}
