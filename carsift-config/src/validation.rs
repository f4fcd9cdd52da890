use crate::models::ViewerConfig;

/// Settings that parse fine but would leave the viewer unable to work.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigGuardRailError {
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
    #[error("max poll attempts must be greater than zero")]
    ZeroPollAttempts,
    #[error("poll interval times max attempts does not fit in a duration")]
    PollCeilingOverflow,
    #[error("server url scheme '{0}' is not supported; use http or https")]
    UnsupportedScheme(String),
    #[error("swipe threshold must be positive, got {0}")]
    NonPositiveSwipeThreshold(f32),
}

pub fn validate(config: &ViewerConfig) -> Result<(), ConfigGuardRailError> {
    match config.server.base_url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigGuardRailError::UnsupportedScheme(
                other.to_string(),
            ));
        }
    }

    if config.acquisition.poll_interval.is_zero() {
        return Err(ConfigGuardRailError::ZeroPollInterval);
    }

    if config.acquisition.max_poll_attempts == 0 {
        return Err(ConfigGuardRailError::ZeroPollAttempts);
    }

    if config.acquisition.checked_ceiling().is_none() {
        return Err(ConfigGuardRailError::PollCeilingOverflow);
    }

    let threshold = config.gallery.swipe_threshold_px;
    if threshold.is_nan() || threshold <= 0.0 {
        return Err(ConfigGuardRailError::NonPositiveSwipeThreshold(threshold));
    }

    Ok(())
}
