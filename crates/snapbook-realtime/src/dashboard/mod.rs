//! Dashboard connection hub: category pools and typed JSON broadcasts.

pub mod events;
pub mod hub;

pub use events::{DashboardClientEvent, DashboardServerEvent, PoolCategory};
pub use hub::DashboardHub;
