//! Wire-message types for the chat/location connection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The one well-known broadcast room for photographer location updates.
pub const LOCATION_ROOM: &str = "location_updates";

/// Events sent by the client over the chat connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatClientEvent {
    /// Bind this connection to a user identity.
    RegisterUser {
        /// The identity to bind.
        user_id: String,
    },
    /// Deliver a direct chat message.
    SendMessage {
        /// Sender identity.
        sender_id: String,
        /// Receiver identity.
        receiver_id: String,
        /// Message text.
        message: String,
    },
    /// Share a photographer's live position.
    UpdateLocation {
        /// Photographer identity.
        photographer_id: String,
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// Subscribe to the location-updates room.
    JoinLocationUpdates,
    /// Unsubscribe from the location-updates room.
    LeaveLocationUpdates,
    /// Any unrecognized event type; ignored.
    #[serde(other)]
    Unknown,
}

/// Events emitted by the server over the chat connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatServerEvent {
    /// An incoming direct message.
    NewMessage {
        /// Sender identity.
        sender_id: String,
        /// Message text.
        message: String,
        /// Delivery timestamp.
        timestamp: DateTime<Utc>,
    },
    /// A photographer's position changed.
    LocationUpdate {
        /// Photographer identity.
        photographer_id: String,
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
        /// Broadcast timestamp.
        timestamp: DateTime<Utc>,
    },
}
