use async_trait::async_trait;
use tether_core::{ConnectionId, ServerMessage};

/// Outbound side of the relay: delivers a message to one live connection.
///
/// Delivery is fire-and-forget. A connection that has gone away simply
/// misses the message.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send(&self, connection: ConnectionId, msg: ServerMessage);
}
