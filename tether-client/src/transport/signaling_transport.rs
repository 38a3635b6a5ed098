use crate::error::TransportError;
use async_trait::async_trait;
use tether_core::ClientMessage;

/// Outbound half of the signaling channel. Inbound messages arrive on the
/// receiver the transport hands out when it connects.
#[async_trait]
pub trait SignalingTransport: Send + Sync {
    async fn send(&self, msg: ClientMessage) -> Result<(), TransportError>;
}
