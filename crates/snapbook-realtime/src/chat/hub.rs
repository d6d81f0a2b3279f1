//! The chat/location hub — connection lifecycle, identity bindings, rooms.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, info};

use crate::connection::{ConnectionHandle, ConnectionId};

use super::events::ChatServerEvent;

/// Shared state for all chat/location connections.
///
/// One instance per process, created at startup and injected wherever
/// delivery is needed. All maps tolerate concurrent access from the
/// per-connection tasks.
#[derive(Debug, Default)]
pub struct ChatHub {
    /// All tracked connections, registered or not.
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    /// Identity → connection binding, last write wins.
    identities: DashMap<String, ConnectionId>,
    /// Room name → subscribed connections.
    rooms: DashMap<String, HashSet<ConnectionId>>,
}

impl ChatHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks a freshly accepted connection. No identity is bound yet.
    pub fn connect(&self, handle: Arc<ConnectionHandle>) {
        debug!(conn_id = %handle.id, "Chat connection accepted");
        self.connections.insert(handle.id, handle);
    }

    /// Binds an identity to a connection, replacing any prior binding for
    /// the same identity.
    pub fn register(&self, conn_id: ConnectionId, user_id: &str) {
        self.identities.insert(user_id.to_string(), conn_id);
        info!(user = %user_id, conn_id = %conn_id, "User registered on chat hub");
    }

    /// Removes a connection: unbinds its identity (reverse scan), leaves all
    /// rooms, and drops the handle.
    pub fn disconnect(&self, conn_id: ConnectionId) {
        // Reverse lookup: the map is keyed by identity, so find the entry
        // pointing at this connection.
        let identity = self
            .identities
            .iter()
            .find(|entry| *entry.value() == conn_id)
            .map(|entry| entry.key().clone());
        if let Some(identity) = identity {
            self.identities.remove(&identity);
            info!(user = %identity, conn_id = %conn_id, "User unregistered from chat hub");
        }

        let mut emptied = Vec::new();
        for mut room in self.rooms.iter_mut() {
            room.value_mut().remove(&conn_id);
            if room.value().is_empty() {
                emptied.push(room.key().clone());
            }
        }
        for name in emptied {
            self.rooms.remove_if(&name, |_, members| members.is_empty());
        }

        if let Some((_, handle)) = self.connections.remove(&conn_id) {
            handle.mark_dead();
        }
        debug!(conn_id = %conn_id, "Chat connection removed");
    }

    /// Delivers a direct message to the receiver's live connection.
    ///
    /// Delivery is best-effort: an offline receiver or a failed send drops
    /// the message at this layer. Durable storage belongs to the account
    /// store's side of the system, not the hub.
    pub fn send_message(&self, sender_id: &str, receiver_id: &str, message: &str) {
        let Some(conn_id) = self.identities.get(receiver_id).map(|e| *e.value()) else {
            debug!(receiver = %receiver_id, "Receiver offline, message dropped");
            return;
        };

        let event = ChatServerEvent::NewMessage {
            sender_id: sender_id.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        };
        let Ok(frame) = serde_json::to_string(&event) else {
            return;
        };

        if let Some(handle) = self.connections.get(&conn_id) {
            if !handle.send(frame) {
                debug!(receiver = %receiver_id, conn_id = %conn_id, "Direct delivery failed");
            }
        }
    }

    /// Broadcasts a location update to every member of the location room.
    ///
    /// Membership is snapshotted at the instant of broadcast; a failed send
    /// to one member never aborts delivery to the rest.
    pub fn update_location(&self, photographer_id: &str, latitude: f64, longitude: f64) {
        let event = ChatServerEvent::LocationUpdate {
            photographer_id: photographer_id.to_string(),
            latitude,
            longitude,
            timestamp: Utc::now(),
        };
        let Ok(frame) = serde_json::to_string(&event) else {
            return;
        };

        let members: Vec<ConnectionId> = self
            .rooms
            .get(super::events::LOCATION_ROOM)
            .map(|room| room.iter().copied().collect())
            .unwrap_or_default();

        for conn_id in members {
            if let Some(handle) = self.connections.get(&conn_id) {
                if !handle.send(frame.clone()) {
                    debug!(conn_id = %conn_id, "Location broadcast delivery failed");
                }
            }
        }
    }

    /// Adds a connection to a room. Joining twice is a no-op.
    pub fn join_room(&self, conn_id: ConnectionId, room: &str) {
        self.rooms
            .entry(room.to_string())
            .or_default()
            .insert(conn_id);
        debug!(conn_id = %conn_id, room = %room, "Joined room");
    }

    /// Removes a connection from a room. Leaving a room the connection is
    /// not in is a no-op.
    pub fn leave_room(&self, conn_id: ConnectionId, room: &str) {
        if let Some(mut members) = self.rooms.get_mut(room) {
            members.remove(&conn_id);
            if members.is_empty() {
                drop(members);
                self.rooms.remove_if(room, |_, m| m.is_empty());
            }
        }
    }

    /// Number of identities currently bound to a live connection.
    pub fn registered_user_count(&self) -> usize {
        self.identities.len()
    }

    /// Number of tracked connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Whether a connection is currently a member of a room.
    pub fn is_in_room(&self, conn_id: ConnectionId, room: &str) -> bool {
        self.rooms
            .get(room)
            .is_some_and(|members| members.contains(&conn_id))
    }

    /// Marks every connection dead and clears all state. Used at shutdown.
    pub fn close_all(&self) {
        for entry in self.connections.iter() {
            entry.value().mark_dead();
        }
        self.connections.clear();
        self.identities.clear();
        self.rooms.clear();
        info!("Chat hub closed");
    }
}
