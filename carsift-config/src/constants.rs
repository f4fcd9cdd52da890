//! Compiled defaults for every tunable.

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Delay between the end of one poll and the start of the next.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
/// 20 polls at 500 ms gives roughly ten seconds for the first asset to land.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 20;

/// Minimum horizontal travel (logical px) for a swipe to page the gallery.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

pub const ENV_CONFIG_PATH: &str = "CARSIFT_CONFIG_PATH";
pub const ENV_CONFIG_JSON: &str = "CARSIFT_CONFIG_JSON";
pub const ENV_SERVER_URL: &str = "CARSIFT_SERVER_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "CARSIFT_REQUEST_TIMEOUT";
pub const ENV_POLL_INTERVAL: &str = "CARSIFT_POLL_INTERVAL";
pub const ENV_MAX_POLL_ATTEMPTS: &str = "CARSIFT_MAX_POLL_ATTEMPTS";

pub const DEFAULT_FILE_CANDIDATES: &[&str] =
    &["carsift.toml", "carsift.json", "config/carsift.toml"];
