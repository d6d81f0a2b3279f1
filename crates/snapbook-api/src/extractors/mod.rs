//! Request extractors, including the session guard.

pub mod auth;

pub use auth::{ActiveAccount, AdminAccount, CurrentAccount};
