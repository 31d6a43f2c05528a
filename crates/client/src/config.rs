use std::time::Duration;

/// Default listing server address.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3002";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Where the client sends listing requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the listing server, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `AUTOLIST_SERVER_URL` | `http://localhost:3002` |
    /// | `AUTOLIST_TIMEOUT_MS` | `10000`                 |
    ///
    /// An unparsable timeout falls back to the default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("AUTOLIST_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.into());

        let timeout_ms = std::env::var("AUTOLIST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            timeout: Duration::from_millis(timeout_ms),
            ..Self::new(&base_url)
        }
    }
}
