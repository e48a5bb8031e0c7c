//! WebSocket endpoint forwarding bus events to connected dashboards.
//!
//! Each connection gets its own bus subscription; events are serialized
//! to JSON text frames. The socket is read only to notice close frames.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::state::AppState;

/// GET /api/v1/stream -- upgrade to a WebSocket carrying monitor events.
pub async fn stream_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_stream(socket, state))
}

async fn handle_stream(socket: WebSocket, state: AppState) {
    let conn_id = Uuid::new_v4();
    tracing::info!(conn_id = %conn_id, "Stream WebSocket connected");

    let mut events = state.event_bus.subscribe();
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!(conn_id = %conn_id, error = %e, "Failed to serialize event");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // Slow consumer; drop the backlog and keep streaming.
                    tracing::warn!(conn_id = %conn_id, skipped, "Stream subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // ignore text, binary, ping, pong
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Stream WS receive error");
                    break;
                }
            },
        }
    }

    tracing::info!(conn_id = %conn_id, "Stream WebSocket disconnected");
}
