use crate::error::{ClientError, MediaError};
use crate::media::MediaSource;
use crate::negotiation::Negotiation;
use crate::peer::{PeerConnection, PeerEvent};
use crate::session::{RemotePeer, SessionEvents};
use crate::transport::SignalingTransport;
use std::future::Future;
use std::sync::Arc;
use tether_core::{ClientMessage, ConnectionId, IceCandidate, Identity, RoomId, ServerMessage};
use tracing::{debug, info, warn};

/// Drives one call: reacts to relay messages and peer events, and sends
/// whatever the other side needs to hear.
pub struct SessionController<P: PeerConnection, T: SignalingTransport> {
    negotiation: Arc<Negotiation<P>>,
    transport: T,
    local: Option<(RoomId, Identity)>,
    remote: Option<RemotePeer>,
    /// Local candidates gathered before the remote connection was known.
    queued_candidates: Vec<IceCandidate>,
}

impl<P: PeerConnection, T: SignalingTransport> SessionController<P, T> {
    pub fn new(peer: Arc<P>, transport: T) -> Self {
        Self {
            negotiation: Arc::new(Negotiation::new(peer)),
            transport,
            local: None,
            remote: None,
            queued_candidates: Vec::new(),
        }
    }

    pub fn negotiation(&self) -> &Arc<Negotiation<P>> {
        &self.negotiation
    }

    /// Room and identity announced by [`join`](Self::join).
    pub fn local(&self) -> Option<&(RoomId, Identity)> {
        self.local.as_ref()
    }

    pub fn remote(&self) -> Option<&RemotePeer> {
        self.remote.as_ref()
    }

    pub fn queued_candidate_count(&self) -> usize {
        self.queued_candidates.len()
    }

    /// Acquires local media and attaches every track to the peer.
    /// Failure here is terminal for the session.
    pub async fn start<M>(&self, media: &M) -> Result<(), ClientError>
    where
        M: MediaSource<P::LocalTrack> + ?Sized,
    {
        let tracks = media
            .acquire()
            .await
            .map_err(ClientError::MediaAcquisitionFailed)?;
        info!("Attaching {} local track(s)", tracks.len());

        for track in tracks {
            self.negotiation
                .peer()
                .add_track(track)
                .await
                .map_err(|e| ClientError::MediaAcquisitionFailed(MediaError::new(e)))?;
        }
        Ok(())
    }

    pub async fn join(
        &mut self,
        room_id: impl Into<RoomId>,
        identity: impl Into<Identity>,
    ) -> Result<(), ClientError> {
        let room_id = room_id.into();
        let identity = identity.into();
        info!("Joining room {} as {}", room_id, identity);

        self.transport
            .send(ClientMessage::JoinRoom {
                room_id: room_id.clone(),
                identity: identity.clone(),
            })
            .await?;
        self.local = Some((room_id, identity));
        Ok(())
    }

    /// Processes signaling and peer events until `shutdown` resolves or the
    /// signaling channel closes. Failures of individual events are logged and
    /// do not end the session.
    pub async fn run<F>(mut self, mut events: SessionEvents<P::RemoteStream>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Session shutting down");
                    break;
                }
                signal = events.signals.recv() => match signal {
                    Some(msg) => {
                        let event = msg.event_name();
                        if let Err(e) = self.handle_signal(msg).await {
                            warn!("Failed to handle {}: {}", event, e);
                        }
                    }
                    None => {
                        info!("Signaling channel closed");
                        break;
                    }
                },
                Some(event) = events.peer.recv() => {
                    if let Err(e) = self.handle_peer_event(event).await {
                        warn!("Failed to handle peer event: {}", e);
                    }
                }
            }
        }

        // Dropping the receivers detaches every handler feeding them.
        drop(events);
        if let Err(e) = self.negotiation.peer().close().await {
            warn!("Failed to close peer connection: {}", e);
        }
        debug!("Session closed");
    }

    pub async fn handle_signal(&mut self, msg: ServerMessage) -> Result<(), ClientError> {
        match msg {
            ServerMessage::JoinedRoom { room_id } => {
                info!("Joined room {}", room_id);
            }
            ServerMessage::UserJoined {
                identity,
                connection,
            } => {
                info!("{} joined, calling", identity);
                self.set_remote(identity.clone(), connection).await?;

                let offer = self.negotiation.create_offer().await?;
                self.transport
                    .send(ClientMessage::Offer {
                        target: identity,
                        sdp: offer.to_payload()?,
                    })
                    .await?;
            }
            ServerMessage::IncomingOffer {
                from,
                sdp,
                connection,
            } => {
                info!("Incoming call from {}", from);
                self.set_remote(from.clone(), connection).await?;

                let answer = self.negotiation.create_answer(sdp).await?;
                self.transport
                    .send(ClientMessage::Answer {
                        target: from,
                        sdp: answer.to_payload()?,
                    })
                    .await?;
            }
            ServerMessage::CallAccepted {
                from,
                sdp,
                connection,
            } => {
                info!("Call accepted by {}", from);
                self.set_remote(from, connection).await?;
                self.negotiation.set_remote_answer(sdp).await?;
            }
            ServerMessage::IceCandidateRelayed { from, candidate } => {
                debug!("Remote candidate from {}", from);
                let candidate = IceCandidate::from_payload(&candidate)?;
                self.negotiation.add_ice_candidate(candidate).await?;
            }
            ServerMessage::UserLeft {
                identity,
                connection,
            } => {
                let is_remote = self
                    .remote
                    .as_ref()
                    .is_some_and(|remote| remote.is(&identity, connection));
                if is_remote {
                    info!("{} left the call", identity);
                    self.remote = None;
                } else {
                    debug!("{} left the room", identity);
                }
            }
        }
        Ok(())
    }

    pub async fn handle_peer_event(
        &mut self,
        event: PeerEvent<P::RemoteStream>,
    ) -> Result<(), ClientError> {
        match event {
            PeerEvent::Track(stream) => self.negotiation.set_remote_stream(stream),
            PeerEvent::NegotiationNeeded => {
                let Some(target) = self.remote.as_ref().map(|r| r.identity.clone()) else {
                    debug!("Negotiation needed but no remote peer yet");
                    return Ok(());
                };
                if let Some(offer) = self.negotiation.renegotiate().await? {
                    info!("Renegotiating with {}", target);
                    self.transport
                        .send(ClientMessage::Offer {
                            target,
                            sdp: offer.to_payload()?,
                        })
                        .await?;
                }
            }
            PeerEvent::LocalCandidate(candidate) => {
                match self.remote.as_ref().and_then(|r| r.connection) {
                    Some(target) => self.send_candidate(target, &candidate).await?,
                    None => {
                        debug!("Queueing local candidate until the remote peer is known");
                        self.queued_candidates.push(candidate);
                    }
                }
            }
        }
        Ok(())
    }

    async fn set_remote(
        &mut self,
        identity: Identity,
        connection: ConnectionId,
    ) -> Result<(), ClientError> {
        if let Some(remote) = &self.remote {
            if remote.identity != identity {
                info!("Remote peer changed from {} to {}", remote.identity, identity);
            }
        }
        self.remote = Some(RemotePeer {
            identity,
            connection: Some(connection),
        });

        let queued = std::mem::take(&mut self.queued_candidates);
        if !queued.is_empty() {
            debug!("Flushing {} queued local candidate(s)", queued.len());
        }
        for candidate in &queued {
            self.send_candidate(connection, candidate).await?;
        }
        Ok(())
    }

    async fn send_candidate(
        &self,
        target: ConnectionId,
        candidate: &IceCandidate,
    ) -> Result<(), ClientError> {
        self.transport
            .send(ClientMessage::IceCandidate {
                target: Some(target),
                candidate: Some(candidate.to_payload()?),
            })
            .await?;
        Ok(())
    }
}
