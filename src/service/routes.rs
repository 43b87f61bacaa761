//! WebSocket + REST endpoints for the journey engine.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::engine::{AgentEngine, Trigger};
use crate::error::{Error, JourneyError};
use crate::journey::SessionEvent;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AgentEngine>,
}

/// Build the Axum router with the chat WebSocket and REST routes.
pub fn service_routes(engine: Arc<AgentEngine>) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .route("/api/journeys", get(list_journeys))
        .route("/api/session", get(get_session))
        .route("/api/session/reset", post(reset_session))
        .route("/api/dispatch", post(dispatch))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "fin-assist"
    }))
}

// ── REST ────────────────────────────────────────────────────────────────

async fn list_journeys(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::to_value(state.engine.templates()).unwrap_or_default())
}

async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.engine.snapshot().await)
}

async fn reset_session(State(state): State<AppState>) -> impl IntoResponse {
    state.engine.reset().await;
    Json(state.engine.snapshot().await)
}

async fn dispatch(
    State(state): State<AppState>,
    Json(trigger): Json<Trigger>,
) -> impl IntoResponse {
    match state.engine.dispatch(trigger).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(error: Error) -> axum::response::Response {
    let status = match &error {
        Error::Journey(JourneyError::UnknownAction { .. })
        | Error::Journey(JourneyError::UnknownJourney { .. }) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(serde_json::json!({ "error": error.to_string() })),
    )
        .into_response()
}

// ── WebSocket ───────────────────────────────────────────────────────────

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    info!("WebSocket client connecting");
    ws.on_upgrade(|socket| handle_socket(socket, state.engine))
}

async fn handle_socket(mut socket: WebSocket, engine: Arc<AgentEngine>) {
    info!("WebSocket client connected");

    // Full state sync on connect
    let sync = SessionEvent::Sync {
        snapshot: engine.snapshot().await,
    };
    if let Ok(json) = serde_json::to_string(&sync) {
        if socket.send(Message::Text(json.into())).await.is_err() {
            warn!("Failed to send initial sync, client disconnected");
            return;
        }
    }

    // Subscribe to session events for real-time updates
    let mut rx = engine.subscribe();

    loop {
        tokio::select! {
            // Forward session events to this client
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if let Ok(json) = serde_json::to_string(&event) {
                            if socket.send(Message::Text(json.into())).await.is_err() {
                                debug!("Client disconnected during send");
                                break;
                            }
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        warn!(missed = n, "WS client lagged behind broadcast");
                        // Re-sync with the full session state
                        let sync = SessionEvent::Sync {
                            snapshot: engine.snapshot().await,
                        };
                        if let Ok(json) = serde_json::to_string(&sync) {
                            if socket.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                }
            }

            // Receive triggers from the client
            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_message(&text, &engine, &mut socket).await;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }
}

async fn handle_client_message(text: &str, engine: &Arc<AgentEngine>, socket: &mut WebSocket) {
    let trigger: Trigger = match serde_json::from_str(text) {
        Ok(trigger) => trigger,
        Err(e) => {
            warn!(error = %e, "Invalid trigger from WS client");
            let err = serde_json::json!({ "type": "error", "message": format!("invalid trigger: {e}") });
            let _ = socket.send(Message::Text(err.to_string().into())).await;
            return;
        }
    };

    // The dispatch result itself is not sent back over this socket — the
    // broadcast stream already carries every append in order.
    if let Err(e) = engine.dispatch(trigger).await {
        warn!(error = %e, "Trigger dispatch failed");
        let err = serde_json::json!({ "type": "error", "message": e.to_string() });
        let _ = socket.send(Message::Text(err.to_string().into())).await;
    }
}
