use tether_core::{ConnectionId, Identity};

/// The other side of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePeer {
    pub identity: Identity,
    /// Relay handle used to address ICE candidates. Unknown until the relay
    /// tells us.
    pub connection: Option<ConnectionId>,
}

impl RemotePeer {
    pub fn is(&self, identity: &Identity, connection: ConnectionId) -> bool {
        self.identity == *identity && self.connection.is_none_or(|c| c == connection)
    }
}
