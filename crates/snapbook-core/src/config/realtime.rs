//! Realtime hub configuration.

use serde::{Deserialize, Serialize};

/// Settings for the chat/location hub and the dashboard hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Per-connection outbound send buffer size.
    #[serde(default = "default_send_buffer")]
    pub send_buffer_size: usize,
    /// Interval between periodic metrics broadcasts, in seconds.
    #[serde(default = "default_metrics_interval")]
    pub metrics_interval_seconds: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: default_send_buffer(),
            metrics_interval_seconds: default_metrics_interval(),
        }
    }
}

fn default_send_buffer() -> usize {
    64
}

fn default_metrics_interval() -> u64 {
    30
}
