//! Client configuration: target environment and retry backoff.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::Error;

/// Production API base URL.
pub const PRODUCTION: &str = "https://api.10000ft.com/api/v1";
/// Staging API base URL.
pub const STAGING: &str = "https://vnext.10000ft.com/api/v1";

/// Header carrying the API token on every request.
pub const AUTH_HEADER: &str = "auth";

/// Environment variable holding the default retry budget.
pub const MAX_RETRIES_VAR: &str = "TENKFT_MAX_RETRIES";

/// The two deployments a client may talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Staging,
}

impl Environment {
    /// Base URL every resource path is appended to.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION,
            Environment::Staging => STAGING,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Staging => write!(f, "staging"),
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    /// Accepts `production`, `staging`, or either exact base URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            PRODUCTION => Ok(Environment::Production),
            STAGING => Ok(Environment::Staging),
            other if other.eq_ignore_ascii_case("production") => Ok(Environment::Production),
            other if other.eq_ignore_ascii_case("staging") => Ok(Environment::Staging),
            other => Err(Error::Config(format!(
                "env must be either {}, or {} (got {:?})",
                PRODUCTION, STAGING, other
            ))),
        }
    }
}

/// Fixed waits inserted before a retry attempt. No exponential growth, no jitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait after an HTTP 429 response.
    pub rate_limit_backoff: Duration,
    /// Wait after any other non-success response.
    pub error_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            rate_limit_backoff: Duration::from_secs(10),
            error_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn fixed(rate_limit_backoff: Duration, error_backoff: Duration) -> Self {
        Self {
            rate_limit_backoff,
            error_backoff,
        }
    }

    /// Reads backoff overrides (in seconds) from the environment, keeping the
    /// defaults for anything missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rate_limit_backoff: env_secs(
                "TENKFT_RATE_LIMIT_BACKOFF_SECS",
                defaults.rate_limit_backoff,
            ),
            error_backoff: env_secs("TENKFT_ERROR_BACKOFF_SECS", defaults.error_backoff),
        }
    }
}

/// Default retry budget from `TENKFT_MAX_RETRIES`, or 0.
pub fn max_retries_from_env() -> u32 {
    std::env::var(MAX_RETRIES_VAR)
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .unwrap_or(0)
}

fn env_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}
