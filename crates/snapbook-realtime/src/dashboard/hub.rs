//! The dashboard hub — three category pools with per-pool broadcast.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::connection::{ConnectionHandle, ConnectionId};

use super::events::{DashboardServerEvent, PoolCategory};

/// Shared state for all dashboard connections.
///
/// Each pool keeps its connections in insertion order; broadcasts walk that
/// order and evict members whose send fails without interrupting delivery
/// to the rest of the pool.
#[derive(Debug)]
pub struct DashboardHub {
    pools: Mutex<HashMap<PoolCategory, Vec<Arc<ConnectionHandle>>>>,
}

impl DashboardHub {
    /// Creates a hub with the three empty pools.
    pub fn new() -> Self {
        let mut pools = HashMap::new();
        pools.insert(PoolCategory::Admin, Vec::new());
        pools.insert(PoolCategory::Metrics, Vec::new());
        pools.insert(PoolCategory::Alerts, Vec::new());
        Self {
            pools: Mutex::new(pools),
        }
    }

    /// Tracks an accepted connection in its declared pool.
    ///
    /// A connection with no recognized category stays accepted but
    /// untracked; it can still use the request/response protocol.
    pub fn connect(&self, handle: Arc<ConnectionHandle>, category: Option<PoolCategory>) {
        match category {
            Some(category) => {
                let mut pools = self.pools.lock().expect("dashboard pools poisoned");
                pools.entry(category).or_default().push(handle.clone());
                info!(conn_id = %handle.id, pool = %category, "Dashboard connection pooled");
            }
            None => {
                debug!(conn_id = %handle.id, "Dashboard connection accepted without pool");
            }
        }
    }

    /// Removes a connection from its pool. A connection that is not a
    /// member (unknown category, or already evicted) is a no-op.
    pub fn disconnect(&self, conn_id: ConnectionId, category: Option<PoolCategory>) {
        if let Some(category) = category {
            let mut pools = self.pools.lock().expect("dashboard pools poisoned");
            if let Some(pool) = pools.get_mut(&category) {
                pool.retain(|handle| handle.id != conn_id);
            }
        }
        debug!(conn_id = %conn_id, "Dashboard connection removed");
    }

    /// Pushes a metrics payload to every connection in the metrics pool.
    pub fn broadcast_metrics(&self, data: serde_json::Value) {
        let event = DashboardServerEvent::MetricsUpdate {
            data,
            timestamp: Utc::now(),
        };
        self.broadcast(PoolCategory::Metrics, &event);
    }

    /// Pushes an alert to every connection in the alerts pool.
    pub fn broadcast_alert(&self, alert_type: &str, message: &str) {
        let event = DashboardServerEvent::Alert {
            alert_type: alert_type.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        };
        self.broadcast(PoolCategory::Alerts, &event);
    }

    /// Pushes an announcement to every connection in the admin pool.
    pub fn send_admin_message(&self, data: serde_json::Value) {
        let event = DashboardServerEvent::AdminMessage {
            data,
            timestamp: Utc::now(),
        };
        self.broadcast(PoolCategory::Admin, &event);
    }

    /// Delivers an event to a pool snapshot, evicting failed recipients.
    fn broadcast(&self, category: PoolCategory, event: &DashboardServerEvent) {
        let Ok(frame) = serde_json::to_string(event) else {
            warn!(pool = %category, "Failed to serialize dashboard event");
            return;
        };

        let snapshot: Vec<Arc<ConnectionHandle>> = {
            let pools = self.pools.lock().expect("dashboard pools poisoned");
            pools.get(&category).cloned().unwrap_or_default()
        };

        let mut dead = Vec::new();
        for handle in &snapshot {
            if !handle.send(frame.clone()) {
                dead.push(handle.id);
            }
        }

        if !dead.is_empty() {
            let mut pools = self.pools.lock().expect("dashboard pools poisoned");
            if let Some(pool) = pools.get_mut(&category) {
                pool.retain(|handle| !dead.contains(&handle.id));
            }
            debug!(pool = %category, evicted = dead.len(), "Evicted dead dashboard connections");
        }
    }

    /// Number of connections in one pool.
    pub fn pool_len(&self, category: PoolCategory) -> usize {
        let pools = self.pools.lock().expect("dashboard pools poisoned");
        pools.get(&category).map(Vec::len).unwrap_or(0)
    }

    /// Total pooled connections across all categories.
    pub fn connection_count(&self) -> usize {
        let pools = self.pools.lock().expect("dashboard pools poisoned");
        pools.values().map(Vec::len).sum()
    }

    /// Marks every pooled connection dead and clears the pools.
    pub fn close_all(&self) {
        let mut pools = self.pools.lock().expect("dashboard pools poisoned");
        for pool in pools.values_mut() {
            for handle in pool.iter() {
                handle.mark_dead();
            }
            pool.clear();
        }
        info!("Dashboard hub closed");
    }
}

impl Default for DashboardHub {
    fn default() -> Self {
        Self::new()
    }
}
