mod config;
mod error;
mod registry;
mod relay;
mod signaling;

pub use config::*;
pub use error::*;
pub use registry::*;
pub use relay::*;
pub use signaling::*;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub signaling: SignalingService,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let signaling = SignalingService::new();
        let relay = Relay::new(Arc::new(Registry::new()), Arc::new(signaling.clone()))
            .with_leave_notifications(config.notify_on_leave);

        Self {
            relay: Arc::new(relay),
            signaling,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "rooms": state.relay.registry().room_count(),
        "connections": state.signaling.connection_count(),
    }))
}

/// Serves the relay on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
