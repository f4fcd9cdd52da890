use std::time::Duration;

/// Read an environment variable, treating unset and whitespace-only values
/// the same way.
pub fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// Parse a human-friendly duration such as `500ms`, `2s` or `1m 30s`.
///
/// A bare integer is read as milliseconds.
pub fn parse_duration(raw: &str) -> Result<Duration, humantime::DurationError> {
    let trimmed = raw.trim();
    if let Ok(millis) = trimmed.parse::<u64>() {
        return Ok(Duration::from_millis(millis));
    }
    humantime::parse_duration(trimmed)
}
