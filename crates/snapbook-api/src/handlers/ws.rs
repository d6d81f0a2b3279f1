//! WebSocket upgrade handlers for the chat and dashboard hubs.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use snapbook_realtime::chat::events::{ChatClientEvent, LOCATION_ROOM};
use snapbook_realtime::dashboard::events::{DashboardClientEvent, DashboardServerEvent, PoolCategory};
use snapbook_realtime::ConnectionHandle;

use crate::state::AppState;

/// GET /ws/chat — chat/location WebSocket upgrade.
///
/// Connections are accepted without authentication; the client declares its
/// identity in-band with a `register_user` event.
pub async fn chat_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_chat_socket(state, socket))
}

/// Handles an established chat connection.
async fn handle_chat_socket(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (tx, mut outbound_rx) = mpsc::channel(state.config.realtime.send_buffer_size);
    let handle = Arc::new(ConnectionHandle::new(tx));
    let conn_id = handle.id;

    state.chat_hub.connect(handle.clone());
    info!(conn_id = %conn_id, "Chat WebSocket connected");

    // Forward queued outbound frames into the socket.
    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let event: ChatClientEvent = match serde_json::from_str(text.as_str()) {
                    Ok(event) => event,
                    Err(e) => {
                        // Malformed payloads are ignored, never fatal.
                        debug!(conn_id = %conn_id, error = %e, "Unparseable chat event");
                        continue;
                    }
                };

                match event {
                    ChatClientEvent::RegisterUser { user_id } => {
                        state.chat_hub.register(conn_id, &user_id);
                    }
                    ChatClientEvent::SendMessage {
                        sender_id,
                        receiver_id,
                        message,
                    } => {
                        state.chat_hub.send_message(&sender_id, &receiver_id, &message);
                    }
                    ChatClientEvent::UpdateLocation {
                        photographer_id,
                        latitude,
                        longitude,
                    } => {
                        state
                            .chat_hub
                            .update_location(&photographer_id, latitude, longitude);
                    }
                    ChatClientEvent::JoinLocationUpdates => {
                        state.chat_hub.join_room(conn_id, LOCATION_ROOM);
                    }
                    ChatClientEvent::LeaveLocationUpdates => {
                        state.chat_hub.leave_room(conn_id, LOCATION_ROOM);
                    }
                    ChatClientEvent::Unknown => {}
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "Chat WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.chat_hub.disconnect(conn_id);
    info!(conn_id = %conn_id, "Chat WebSocket closed");
}

/// GET /ws/dashboard/{category} — dashboard WebSocket upgrade.
///
/// The client declares its pool in the path. Unknown categories are
/// accepted but stay out of every pool.
pub async fn dashboard_ws(
    State(state): State<AppState>,
    Path(category): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    let category = PoolCategory::from_str(&category).ok();
    ws.on_upgrade(move |socket| handle_dashboard_socket(state, category, socket))
}

/// Handles an established dashboard connection.
async fn handle_dashboard_socket(
    state: AppState,
    category: Option<PoolCategory>,
    socket: WebSocket,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (tx, mut outbound_rx) = mpsc::channel(state.config.realtime.send_buffer_size);
    let handle = Arc::new(ConnectionHandle::new(tx));
    let conn_id = handle.id;

    state.dashboard_hub.connect(handle.clone(), category);
    info!(conn_id = %conn_id, category = ?category, "Dashboard WebSocket connected");

    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let event: DashboardClientEvent = match serde_json::from_str(text.as_str()) {
                    Ok(event) => event,
                    Err(e) => {
                        debug!(conn_id = %conn_id, error = %e, "Unparseable dashboard request");
                        continue;
                    }
                };

                let reply = match event {
                    DashboardClientEvent::Ping => Some(DashboardServerEvent::Pong),
                    DashboardClientEvent::MetricsRequest => {
                        let snapshot = state.metrics.current_snapshot().await;
                        Some(DashboardServerEvent::MetricsResponse { data: snapshot })
                    }
                    DashboardClientEvent::Unknown => None,
                };

                if let Some(reply) = reply {
                    if let Ok(frame) = serde_json::to_string(&reply) {
                        handle.send(frame);
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "Dashboard WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.dashboard_hub.disconnect(conn_id, category);
    info!(conn_id = %conn_id, "Dashboard WebSocket closed");
}
