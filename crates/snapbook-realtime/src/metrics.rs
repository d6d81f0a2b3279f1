//! Metrics-source collaborator interface.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chat::hub::ChatHub;
use crate::dashboard::hub::DashboardHub;

/// A point-in-time system metrics snapshot served to dashboard clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Identities currently registered on the chat hub.
    pub active_users: u64,
    /// Live connections across both hubs.
    pub active_sessions: u64,
    /// Coarse health indicator.
    pub system_health: String,
}

impl Default for MetricsSnapshot {
    /// The stub snapshot reported when no collaborator is available.
    fn default() -> Self {
        Self {
            active_users: 0,
            active_sessions: 0,
            system_health: "good".to_string(),
        }
    }
}

/// Interface to whatever produces system metrics.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Returns the current snapshot.
    async fn current_snapshot(&self) -> MetricsSnapshot;
}

/// Metrics source backed by the live hub counters.
#[derive(Debug, Clone)]
pub struct HubMetricsSource {
    chat: Arc<ChatHub>,
    dashboard: Arc<DashboardHub>,
}

impl HubMetricsSource {
    /// Creates a source reading from both hubs.
    pub fn new(chat: Arc<ChatHub>, dashboard: Arc<DashboardHub>) -> Self {
        Self { chat, dashboard }
    }
}

#[async_trait]
impl MetricsSource for HubMetricsSource {
    async fn current_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            active_users: self.chat.registered_user_count() as u64,
            active_sessions: (self.chat.connection_count() + self.dashboard.connection_count())
                as u64,
            system_health: "good".to_string(),
        }
    }
}
