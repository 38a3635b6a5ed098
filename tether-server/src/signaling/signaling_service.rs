use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tether_core::{ConnectionId, ServerMessage};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

struct SignalingInner {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Outbox of every open WebSocket. Each connection drains its own ordered
/// queue, which keeps per-sender order intact.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
            }),
        }
    }

    pub fn add_connection(&self, connection: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.connections.insert(connection, tx);
    }

    pub fn remove_connection(&self, connection: &ConnectionId) {
        self.inner.connections.remove(connection);
    }

    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    pub fn send_signal(&self, connection: ConnectionId, msg: ServerMessage) {
        let Some(outbox) = self.inner.connections.get(&connection) else {
            warn!(
                "Attempted to send {} to closed connection {}",
                msg.event_name(),
                connection
            );
            return;
        };

        match msg.encode() {
            Ok(json) => {
                debug!("-> {} {}", connection, msg.event_name());
                if let Err(e) = outbox.send(Message::Text(json.into())) {
                    error!("Failed to queue WS message to {}: {:?}", connection, e);
                }
            }
            Err(e) => error!("Failed to serialize signal message: {}", e),
        }
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send(&self, connection: ConnectionId, msg: ServerMessage) {
        self.send_signal(connection, msg);
    }
}
