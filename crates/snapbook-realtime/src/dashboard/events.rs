//! Wire-message types for dashboard connections.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::MetricsSnapshot;

/// The three dashboard connection pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolCategory {
    /// Operational announcements for administrators.
    Admin,
    /// Periodic and on-demand system metrics.
    Metrics,
    /// System alert stream.
    Alerts,
}

impl PoolCategory {
    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Metrics => "metrics",
            Self::Alerts => "alerts",
        }
    }
}

impl fmt::Display for PoolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PoolCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "metrics" => Ok(Self::Metrics),
            "alerts" => Ok(Self::Alerts),
            _ => Err(()),
        }
    }
}

/// Requests a dashboard client may send on its connection.
///
/// The protocol is served for every accepted connection, pooled or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardClientEvent {
    /// Liveness probe; answered with a pong.
    Ping,
    /// On-demand metrics snapshot request.
    MetricsRequest,
    /// Any unrecognized request type; ignored.
    #[serde(other)]
    Unknown,
}

/// Events the server sends to dashboard clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardServerEvent {
    /// Reply to a ping.
    Pong,
    /// Reply to a metrics request.
    MetricsResponse {
        /// Current snapshot.
        data: MetricsSnapshot,
    },
    /// Periodic metrics push to the metrics pool.
    MetricsUpdate {
        /// Metrics payload.
        data: serde_json::Value,
        /// Broadcast timestamp.
        timestamp: DateTime<Utc>,
    },
    /// Alert push to the alerts pool.
    Alert {
        /// Alert classification.
        alert_type: String,
        /// Alert text.
        message: String,
        /// Broadcast timestamp.
        timestamp: DateTime<Utc>,
    },
    /// Announcement push to the admin pool.
    AdminMessage {
        /// Announcement payload.
        data: serde_json::Value,
        /// Broadcast timestamp.
        timestamp: DateTime<Utc>,
    },
}
