//! Identity-keyed messaging hub: direct chat delivery and location broadcast.

pub mod events;
pub mod hub;

pub use events::{ChatClientEvent, ChatServerEvent, LOCATION_ROOM};
pub use hub::ChatHub;
