// ABOUTME: Retry and timeout configuration for control plane calls.
// ABOUTME: Defines bounded retry parameters with sensible defaults.

use serde::Deserialize;
use std::time::Duration;

/// Retry behavior for transient control plane failures.
///
/// `retries` is the number of additional attempts after the first, so a value
/// of 3 means at most 4 calls. Backoff doubles from `base_delay` per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_retries")]
    pub retries: u32,

    #[serde(default = "default_base_delay", with = "humantime_serde")]
    pub base_delay: Duration,

    #[serde(default = "default_call_timeout", with = "humantime_serde")]
    pub call_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            base_delay: default_base_delay(),
            call_timeout: default_call_timeout(),
        }
    }
}

fn default_retries() -> u32 {
    3
}

fn default_base_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_call_timeout() -> Duration {
    Duration::from_secs(10)
}
