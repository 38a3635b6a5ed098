use crate::peer::SignalingState;
use tether_core::{ProtocolError, SdpType};
use thiserror::Error;

/// Failure reported by the underlying peer-connection capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CapabilityError(String);

impl CapabilityError {
    pub fn new(msg: impl std::fmt::Display) -> Self {
        Self(msg.to_string())
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct MediaError(String);

impl MediaError {
    pub fn new(msg: impl std::fmt::Display) -> Self {
        Self(msg.to_string())
    }
}

/// Why a remote description was not applied.
#[derive(Debug, Error)]
pub enum RejectReason {
    #[error("signaling state is {0:?}, expected stable")]
    WrongSignalingState(SignalingState),

    #[error("expected an {expected:?}, got {actual:?}")]
    UnexpectedType { expected: SdpType, actual: SdpType },

    #[error("peer connection refused it: {0}")]
    Apply(CapabilityError),
}

#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("remote description rejected: {0}")]
    Rejected(#[from] RejectReason),

    #[error("peer connection failed: {0}")]
    Capability(#[from] CapabilityError),

    #[error("unreadable description: {0}")]
    Malformed(#[from] ProtocolError),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("signaling channel closed")]
    Closed,

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("local media unavailable: {0}")]
    MediaAcquisitionFailed(#[source] MediaError),

    #[error(transparent)]
    Negotiation(#[from] NegotiationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
