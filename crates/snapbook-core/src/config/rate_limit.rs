//! Per-caller request rate limiting configuration.

use serde::{Deserialize, Serialize};

/// Fixed-window rate limit applied per authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_seconds: default_window(),
        }
    }
}

fn default_max_requests() -> u32 {
    100
}

fn default_window() -> u64 {
    60
}
