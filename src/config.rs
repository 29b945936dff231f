//! Client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_STATUS_POLL_MS: u64 = 2000;
pub const DEFAULT_STATS_POLL_MS: u64 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub status: Duration,
    pub stats: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            status: Duration::from_millis(DEFAULT_STATUS_POLL_MS),
            stats: Duration::from_millis(DEFAULT_STATS_POLL_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub poll: PollIntervals,
    pub timeouts: HttpTimeouts,
    pub notification_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            poll: PollIntervals::default(),
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            notification_ttl: Duration::from_millis(DEFAULT_NOTIFICATION_TTL_MS),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `SCAREPI_BASE_URL`: backend origin, trailing slash stripped
    /// - `SCAREPI_STATUS_POLL_MS` / `SCAREPI_STATS_POLL_MS`: poll periods
    /// - `SCAREPI_REQUEST_TIMEOUT_SECS` / `SCAREPI_CONNECT_TIMEOUT_SECS`
    /// - `SCAREPI_NOTIFICATION_TTL_MS`: how long a toast stays visible
    ///
    /// Unparsable or zero values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("SCAREPI_BASE_URL")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        Self {
            base_url: normalize_base_url(&base_url),
            poll: PollIntervals {
                status: Duration::from_millis(env_parse_nonzero("SCAREPI_STATUS_POLL_MS", DEFAULT_STATUS_POLL_MS)),
                stats: Duration::from_millis(env_parse_nonzero("SCAREPI_STATS_POLL_MS", DEFAULT_STATS_POLL_MS)),
            },
            timeouts: HttpTimeouts {
                request_secs: env_parse_nonzero("SCAREPI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse_nonzero("SCAREPI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
            notification_ttl: Duration::from_millis(env_parse_nonzero(
                "SCAREPI_NOTIFICATION_TTL_MS",
                DEFAULT_NOTIFICATION_TTL_MS,
            )),
        }
    }

    /// Replace the base URL, normalizing it the same way `from_env` does.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn env_parse_nonzero(key: &str, default: u64) -> u64 {
    match env_parse(key, default) {
        0 => default,
        value => value,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
