//! # snapbook-api
//!
//! HTTP and WebSocket surface for Snapbook:
//!
//! - `router` — route definitions and middleware layering
//! - `state` — shared application state injected into handlers
//! - `extractors` — the session guard (`CurrentAccount` and its policy
//!   wrappers)
//! - `middleware` — rate limiting and request logging
//! - `handlers` — auth, dashboard, health, and WebSocket endpoints
//! - `dto` — request/response bodies
//!
//! The `AppError` → HTTP response mapping lives with the error type in
//! `snapbook-core`.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
