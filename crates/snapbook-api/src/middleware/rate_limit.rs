//! Fixed-window request rate limiter.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use snapbook_core::config::rate_limit::RateLimitConfig;

/// In-memory fixed-window rate limiter keyed by caller identity.
///
/// Process-wide; checked by the session guard on every rate-limited
/// request. Safe under concurrent requests from the same caller.
#[derive(Debug)]
pub struct RateLimiter {
    /// Identity → current window state.
    windows: Mutex<HashMap<String, Window>>,
    /// Maximum requests per window.
    max_requests: u32,
    /// Window length.
    window: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    /// Creates a new rate limiter from configuration.
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_seconds),
        }
    }

    /// Records a request for the given key.
    ///
    /// Returns `false` when the key has exhausted its quota for the current
    /// window.
    pub fn check(&self, key: &str) -> bool {
        let mut windows = self.windows.lock().expect("rate limit map poisoned");
        let now = Instant::now();

        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.max_requests {
            return false;
        }
        window.count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use snapbook_core::config::rate_limit::RateLimitConfig;

    use super::RateLimiter;

    #[test]
    fn quota_is_enforced_per_key() {
        let limiter = RateLimiter::new(&RateLimitConfig {
            max_requests: 3,
            window_seconds: 60,
        });

        assert!(limiter.check("a@example.com"));
        assert!(limiter.check("a@example.com"));
        assert!(limiter.check("a@example.com"));
        assert!(!limiter.check("a@example.com"), "fourth request rejected");

        // Another caller has an independent window.
        assert!(limiter.check("b@example.com"));
    }

    #[test]
    fn window_resets_after_expiry() {
        let limiter = RateLimiter::new(&RateLimitConfig {
            max_requests: 1,
            window_seconds: 0,
        });

        assert!(limiter.check("c@example.com"));
        // Zero-length window: the next check starts a fresh one.
        assert!(limiter.check("c@example.com"));
    }
}
