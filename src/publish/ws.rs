//! WebSocket surface for the onboarding UI.
//!
//! `/ws/chat` streams every published chat-topic frame to connected clients;
//! the frame payload is forwarded verbatim so the UI sees exactly the wire
//! JSON of each structured event.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use super::BroadcastPublisher;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct ChatState {
    pub publisher: Arc<BroadcastPublisher>,
}

/// Build the Axum router with the chat WebSocket and health routes.
pub fn chat_routes(publisher: Arc<BroadcastPublisher>) -> Router {
    let state = ChatState { publisher };

    Router::new()
        .route("/ws/chat", get(ws_handler))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "voice-assist"
    }))
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<ChatState>) -> impl IntoResponse {
    info!("Chat WebSocket client connecting");
    ws.on_upgrade(|socket| handle_socket(socket, state.publisher))
}

async fn handle_socket(mut socket: WebSocket, publisher: Arc<BroadcastPublisher>) {
    info!("Chat WebSocket client connected");

    let mut rx = publisher.subscribe();

    loop {
        tokio::select! {
            // Forward published frames to this client
            result = rx.recv() => {
                match result {
                    Ok(frame) => {
                        if socket.send(Message::Text(frame.payload.into())).await.is_err() {
                            debug!("Client disconnected during send");
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        // Events are fire-and-forget; a lagged client just
                        // misses them (at-most-once, no replay buffer).
                        warn!(missed = n, "Chat WS client lagged behind broadcast");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                }
            }

            // The UI never sends pipeline input over this socket; handle
            // only keepalive and close frames.
            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Chat WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Chat WebSocket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("Chat WebSocket connection closed");
}
