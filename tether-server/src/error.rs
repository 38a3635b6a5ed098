use tether_core::{ConnectionId, Identity};
use thiserror::Error;

/// Reasons the relay dropped an inbound message. None of them are fatal to
/// the connection; the caller logs and carries on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("no live connection for `{0}`")]
    TargetUnreachable(Identity),

    #[error("connection {0} has not joined a room yet")]
    UnknownSender(ConnectionId),

    #[error("join-room needs both a room id and an identity")]
    InvalidJoin,
}
