use tether_core::{ConnectionId, Identity, RoomId};

/// What `Registry::unregister` cleaned up for a closed connection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Identity the connection had announced, if it ever joined.
    pub identity: Option<Identity>,
    /// True when the identity no longer resolves to any connection. False when
    /// the identity had already moved to a newer connection.
    pub freed: bool,
    /// Rooms the connection was in, with the members still present.
    pub rooms: Vec<(RoomId, Vec<ConnectionId>)>,
}

impl Departure {
    /// The identity released by this departure, if any.
    pub fn freed_identity(&self) -> Option<&Identity> {
        self.identity.as_ref().filter(|_| self.freed)
    }
}
