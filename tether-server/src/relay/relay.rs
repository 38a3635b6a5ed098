use crate::error::RelayError;
use crate::registry::{Departure, Registry};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tether_core::{ClientMessage, ConnectionId, Identity, Payload, RoomId, ServerMessage};
use tracing::{debug, info, warn};

/// Routes client messages to the right connection. Holds no state of its own
/// besides the injected registry.
pub struct Relay {
    registry: Arc<Registry>,
    output: Arc<dyn SignalingOutput>,
    notify_on_leave: bool,
}

impl Relay {
    pub fn new(registry: Arc<Registry>, output: Arc<dyn SignalingOutput>) -> Self {
        Self {
            registry,
            output,
            notify_on_leave: false,
        }
    }

    /// Tell remaining room members when a connection closes.
    pub fn with_leave_notifications(mut self, enabled: bool) -> Self {
        self.notify_on_leave = enabled;
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub async fn handle(&self, sender: ConnectionId, msg: ClientMessage) -> Result<(), RelayError> {
        match msg {
            ClientMessage::JoinRoom { room_id, identity } => {
                self.join_room(sender, room_id, identity).await
            }
            ClientMessage::Offer { target, sdp } => {
                let (to, from) = self.route(sender, &target)?;
                info!("{} is calling {}", from, target);
                self.output
                    .send(
                        to,
                        ServerMessage::IncomingOffer {
                            from,
                            sdp,
                            connection: sender,
                        },
                    )
                    .await;
                Ok(())
            }
            ClientMessage::Answer { target, sdp } => {
                let (to, from) = self.route(sender, &target)?;
                info!("Call accepted by {}", from);
                self.output
                    .send(
                        to,
                        ServerMessage::CallAccepted {
                            from,
                            sdp,
                            connection: sender,
                        },
                    )
                    .await;
                Ok(())
            }
            ClientMessage::IceCandidate { target, candidate } => {
                self.relay_candidate(sender, target, candidate).await;
                Ok(())
            }
        }
    }

    async fn join_room(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
        identity: Identity,
    ) -> Result<(), RelayError> {
        if room_id.is_empty() || identity.is_empty() {
            return Err(RelayError::InvalidJoin);
        }

        if let Some(replaced) = self.registry.register(identity.clone(), sender) {
            info!("{} reconnected on {} (was {})", identity, sender, replaced);
        }
        let others = self.registry.join_room(room_id.clone(), sender);

        self.output
            .send(
                sender,
                ServerMessage::JoinedRoom {
                    room_id: room_id.clone(),
                },
            )
            .await;

        let notice = ServerMessage::UserJoined {
            identity: identity.clone(),
            connection: sender,
        };
        for member in others {
            self.output.send(member, notice.clone()).await;
        }

        info!("{} joined room {}", identity, room_id);
        Ok(())
    }

    /// Resolves the target's connection and the sender's identity.
    fn route(
        &self,
        sender: ConnectionId,
        target: &Identity,
    ) -> Result<(ConnectionId, Identity), RelayError> {
        let Some(to) = self.registry.resolve(target) else {
            warn!("No target found for {}", target);
            return Err(RelayError::TargetUnreachable(target.clone()));
        };
        let Some(from) = self.registry.identity_of(&sender) else {
            warn!("Dropping call from {}: sender never joined", sender);
            return Err(RelayError::UnknownSender(sender));
        };
        Ok((to, from))
    }

    async fn relay_candidate(
        &self,
        sender: ConnectionId,
        target: Option<ConnectionId>,
        candidate: Option<Payload>,
    ) {
        let (Some(target), Some(candidate)) = (target, candidate) else {
            debug!("Dropping ICE candidate from {} without target or body", sender);
            return;
        };
        if candidate.is_empty() {
            debug!("Dropping empty ICE candidate from {}", sender);
            return;
        }

        self.output
            .send(
                target,
                ServerMessage::IceCandidateRelayed {
                    from: sender,
                    candidate,
                },
            )
            .await;
        debug!("ICE candidate sent to: {}", target);
    }

    /// Cleans up after a closed connection.
    pub async fn disconnect(&self, connection: ConnectionId) -> Departure {
        let departure = self.registry.unregister(&connection);

        match &departure.identity {
            Some(identity) => info!("Disconnected: {} ({})", identity, connection),
            None => info!("Disconnected: {}", connection),
        }

        if self.notify_on_leave {
            if let Some(identity) = &departure.identity {
                let notice = ServerMessage::UserLeft {
                    identity: identity.clone(),
                    connection,
                };
                for (room, members) in &departure.rooms {
                    debug!("Notifying {} members of {} about departure", members.len(), room);
                    for member in members {
                        self.output.send(*member, notice.clone()).await;
                    }
                }
            }
        }

        departure
    }
}
