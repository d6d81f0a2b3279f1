//! # snapbook-realtime
//!
//! Realtime connection management for Snapbook:
//!
//! - `chat` — identity-keyed messaging hub with direct delivery and the
//!   location-updates broadcast room
//! - `dashboard` — category-keyed connection pools (admin/metrics/alerts)
//!   with typed JSON broadcasts and a per-connection request protocol
//! - `connection` — the shared per-connection handle
//! - `metrics` — the metrics-source collaborator interface

pub mod chat;
pub mod connection;
pub mod dashboard;
pub mod metrics;

pub use chat::hub::ChatHub;
pub use connection::{ConnectionHandle, ConnectionId};
pub use dashboard::hub::DashboardHub;
pub use metrics::{HubMetricsSource, MetricsSnapshot, MetricsSource};
