//! # snapbook-store
//!
//! Account persistence for Snapbook:
//!
//! - The [`Account`] entity and its creation payload
//! - The [`AccountStore`] collaborator interface the auth core depends on
//! - A PostgreSQL implementation backed by sqlx
//! - An in-memory implementation used by tests

pub mod account;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod store;

pub use account::{Account, AccountKind, NewAccount};
pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;
pub use store::AccountStore;
