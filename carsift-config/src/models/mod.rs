pub mod sources;

use std::time::Duration;

use url::Url;

use crate::constants::{
    DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SWIPE_THRESHOLD_PX,
};

/// Fully resolved viewer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub server: ServerConfig,
    pub acquisition: AcquisitionConfig,
    pub gallery: GalleryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Backend origin, without a trailing slash or API prefix.
    pub base_url: Url,
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Base URL as a string with any trailing slash removed.
    pub fn base_url_str(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}

/// Bounded polling policy for acquisition jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionConfig {
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

impl AcquisitionConfig {
    /// Upper bound on how long a job may run before the gallery gives up.
    ///
    /// Saturates at [`Duration::MAX`]; [`crate::validation::validate`]
    /// rejects settings that would reach it.
    pub fn ceiling(&self) -> Duration {
        self.checked_ceiling().unwrap_or(Duration::MAX)
    }

    pub fn checked_ceiling(&self) -> Option<Duration> {
        self.poll_interval.checked_mul(self.max_poll_attempts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryConfig {
    pub swipe_threshold_px: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
        }
    }
}

impl ServerConfig {
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}
