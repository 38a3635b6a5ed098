use crate::registry::Departure;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tether_core::{ConnectionId, Identity, RoomId};
use tracing::debug;

#[derive(Default)]
struct RegistryInner {
    identities: HashMap<Identity, ConnectionId>,
    connections: HashMap<ConnectionId, Identity>,
    /// Members in join order.
    rooms: HashMap<RoomId, Vec<ConnectionId>>,
}

/// Identity ↔ connection mapping plus room membership.
///
/// The two maps and the room table change together, so every operation runs
/// under one lock. Share it behind an `Arc`.
#[derive(Default)]
pub struct Registry {
    inner: Mutex<RegistryInner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Points `identity` at `connection`, replacing any earlier handle.
    /// Returns the handle that was replaced.
    pub fn register(&self, identity: Identity, connection: ConnectionId) -> Option<ConnectionId> {
        let mut inner = self.lock();

        // A connection announcing a new identity gives up its old one.
        if let Some(old) = inner.connections.insert(connection, identity.clone()) {
            if old != identity && inner.identities.get(&old) == Some(&connection) {
                inner.identities.remove(&old);
            }
        }

        let replaced = inner
            .identities
            .insert(identity, connection)
            .filter(|prev| *prev != connection);

        // The stale handle stays mapped until it closes but no longer
        // counts as a room member.
        if let Some(stale) = replaced {
            inner.rooms.retain(|room, members| {
                members.retain(|member| *member != stale);
                if members.is_empty() {
                    debug!("Room {} is empty, dropping it", room);
                    return false;
                }
                true
            });
        }

        replaced
    }

    pub fn resolve(&self, identity: &Identity) -> Option<ConnectionId> {
        self.lock().identities.get(identity).copied()
    }

    pub fn identity_of(&self, connection: &ConnectionId) -> Option<Identity> {
        self.lock().connections.get(connection).cloned()
    }

    /// Adds `connection` to `room` and returns the members that were already
    /// there, in join order. Never includes `connection` itself.
    pub fn join_room(&self, room: RoomId, connection: ConnectionId) -> Vec<ConnectionId> {
        let mut inner = self.lock();
        let members = inner.rooms.entry(room).or_default();

        let others = members
            .iter()
            .copied()
            .filter(|member| *member != connection)
            .collect();

        if !members.contains(&connection) {
            members.push(connection);
        }

        others
    }

    /// Forgets everything about a closed connection. The identity mapping is
    /// only dropped when it still points at this connection, so a stale
    /// close after a reconnect leaves the new handle in place. Rooms left
    /// empty are removed.
    pub fn unregister(&self, connection: &ConnectionId) -> Departure {
        let mut inner = self.lock();
        let mut departure = Departure::default();

        if let Some(identity) = inner.connections.remove(connection) {
            if inner.identities.get(&identity) == Some(connection) {
                inner.identities.remove(&identity);
                departure.freed = true;
            }
            departure.identity = Some(identity);
        }

        inner.rooms.retain(|room, members| {
            let before = members.len();
            members.retain(|member| member != connection);
            if members.len() != before {
                departure.rooms.push((room.clone(), members.clone()));
            }
            if members.is_empty() {
                debug!("Room {} is empty, dropping it", room);
                return false;
            }
            true
        });

        departure
    }

    pub fn room_members(&self, room: &RoomId) -> Vec<ConnectionId> {
        self.lock().rooms.get(room).cloned().unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.lock().rooms.len()
    }

    pub fn participant_count(&self) -> usize {
        self.lock().identities.len()
    }
}
