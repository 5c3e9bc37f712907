//! WebSocket push channel for sign displays.
//!
//! Displays that cannot poll connect here instead. They receive the current
//! assignments on connect, then a fresh snapshot after every accepted
//! assignment, plus periodic heartbeats.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use chrono::Utc;
use futures::{stream::SplitSink, SinkExt, StreamExt};
use queueboard_core::{AssignmentObserver, Snapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info, warn};

use crate::metrics::{WS_CONNECTIONS_ACTIVE, WS_CONNECTIONS_TOTAL, WS_LAG_EVENTS, WS_MESSAGES_SENT};
use crate::state::AppState;

/// WebSocket message sent to sign displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Full set of active assignments.
    Assignments { assignments: Snapshot },
    /// Server heartbeat (sent periodically to keep connection alive).
    Heartbeat { timestamp: i64 },
}

impl WsMessage {
    fn kind(&self) -> &'static str {
        match self {
            WsMessage::Assignments { .. } => "assignments",
            WsMessage::Heartbeat { .. } => "heartbeat",
        }
    }
}

/// Broadcaster for WebSocket messages using tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct WsBroadcaster {
    sender: broadcast::Sender<WsMessage>,
}

impl WsBroadcaster {
    /// Create a new broadcaster with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Broadcast a message to all connected displays.
    pub fn broadcast(&self, msg: WsMessage) {
        // No receivers just means no display is connected
        let _ = self.sender.send(msg);
    }

    /// Subscribe to receive messages.
    pub fn subscribe(&self) -> broadcast::Receiver<WsMessage> {
        self.sender.subscribe()
    }

    /// Broadcast the assignments after a change.
    pub fn assignments_updated(&self, assignments: Snapshot) {
        self.broadcast(WsMessage::Assignments { assignments });
    }
}

// Runs under the registry lock; `broadcast::Sender::send` never waits.
impl AssignmentObserver for WsBroadcaster {
    fn assignments_changed(&self, snapshot: &Snapshot) {
        self.assignments_updated(snapshot.clone());
    }
}

impl Default for WsBroadcaster {
    fn default() -> Self {
        Self::new(256)
    }
}

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle a single display connection.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Pushes happen under the registry lock, so the channel then holds
    // only changes newer than the initial snapshot
    let (assignments, mut rx) = state
        .registry()
        .snapshot_with(|| state.ws_broadcaster().subscribe());
    let initial = WsMessage::Assignments { assignments };
    let heartbeat_every = Duration::from_secs(state.config().signage.heartbeat_secs);

    WS_CONNECTIONS_TOTAL.inc();
    WS_CONNECTIONS_ACTIVE.inc();

    info!("Sign display connected");

    let send_task = tokio::spawn(async move {
        if send_message(&mut sender, &initial).await.is_err() {
            debug!("WebSocket send failed, display disconnected");
            return;
        }

        let mut heartbeat = interval_at(Instant::now() + heartbeat_every, heartbeat_every);

        loop {
            let msg = tokio::select! {
                result = rx.recv() => match result {
                    Ok(msg) => msg,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        // Every update carries the full snapshot, nothing to replay
                        warn!("Sign display lagged, skipped {} updates", n);
                        WS_LAG_EVENTS.inc();
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                },
                _ = heartbeat.tick() => WsMessage::Heartbeat {
                    timestamp: Utc::now().timestamp(),
                },
            };

            if send_message(&mut sender, &msg).await.is_err() {
                debug!("WebSocket send failed, display disconnected");
                break;
            }
        }
    });

    // Displays don't send anything meaningful; watch for close and errors
    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Close(_)) => {
                debug!("Sign display requested close");
                break;
            }
            Ok(Message::Text(text)) => {
                debug!("Ignoring text message from display: {}", text);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("WebSocket receive error: {}", e);
                break;
            }
        }
    }

    send_task.abort();
    WS_CONNECTIONS_ACTIVE.dec();
    info!("Sign display disconnected");
}

async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &WsMessage,
) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(msg) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize WsMessage: {}", e);
            return Ok(());
        }
    };
    sender.send(Message::Text(json.into())).await?;
    WS_MESSAGES_SENT.with_label_values(&[msg.kind()]).inc();
    Ok(())
}
