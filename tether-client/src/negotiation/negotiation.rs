use crate::error::{CapabilityError, NegotiationError, RejectReason};
use crate::negotiation::{AnswerOutcome, CandidateOutcome, NegotiationState, RemoteDescription};
use crate::peer::{PeerConnection, SignalingState};
use std::sync::Arc;
use tether_core::{IceCandidate, SdpType, SessionDescription};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

#[derive(Default)]
struct NegotiationInner {
    remote_description_set: bool,
    /// Remote candidates that arrived before any remote description.
    pending_candidates: Vec<IceCandidate>,
}

/// Offer/answer state machine for a single peer connection.
///
/// Every operation that touches the peer's descriptions runs under one
/// async lock, so a `track` or `negotiation-needed` event firing mid-exchange
/// cannot interleave with an answer being applied.
pub struct Negotiation<P: PeerConnection> {
    peer: Arc<P>,
    inner: Mutex<NegotiationInner>,
    state: watch::Sender<NegotiationState>,
    remote_stream: watch::Sender<Option<P::RemoteStream>>,
}

impl<P: PeerConnection> Negotiation<P> {
    pub fn new(peer: Arc<P>) -> Self {
        Self {
            peer,
            inner: Mutex::new(NegotiationInner::default()),
            state: watch::channel(NegotiationState::Idle).0,
            remote_stream: watch::channel(None).0,
        }
    }

    pub fn peer(&self) -> &Arc<P> {
        &self.peer
    }

    pub fn state(&self) -> NegotiationState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<NegotiationState> {
        self.state.subscribe()
    }

    fn set_state(&self, state: NegotiationState) {
        let previous = self.state.send_replace(state);
        if previous != state {
            debug!("Negotiation {:?} -> {:?}", previous, state);
        }
    }

    /// Latest remote stream, if any has arrived.
    pub fn remote_stream(&self) -> Option<P::RemoteStream> {
        self.remote_stream.borrow().clone()
    }

    pub fn subscribe_remote_stream(&self) -> watch::Receiver<Option<P::RemoteStream>> {
        self.remote_stream.subscribe()
    }

    /// Records the stream from a `track` event. Later tracks replace it.
    pub fn set_remote_stream(&self, stream: P::RemoteStream) {
        info!("Remote stream received");
        self.remote_stream.send_replace(Some(stream));
    }

    /// Creates an offer and applies it locally.
    pub async fn create_offer(&self) -> Result<SessionDescription, NegotiationError> {
        let _inner = self.inner.lock().await;
        let prior = self.state();
        self.offer_locked(prior).await
    }

    async fn offer_locked(
        &self,
        prior: NegotiationState,
    ) -> Result<SessionDescription, NegotiationError> {
        self.set_state(NegotiationState::LocalOfferPending);

        let offer = match self.peer.create_offer().await {
            Ok(offer) => offer,
            Err(e) => {
                self.set_state(prior);
                return Err(e.into());
            }
        };
        if let Err(e) = self.peer.set_local_description(offer.clone()).await {
            self.set_state(prior);
            return Err(e.into());
        }

        self.set_state(NegotiationState::LocalOfferSent);
        Ok(offer)
    }

    /// Applies a remote offer and produces the local answer.
    ///
    /// Only accepted while the peer is stable. If both sides offered at once,
    /// the incoming offer is refused and the local offer stays outstanding.
    pub async fn create_answer(
        &self,
        offer: impl Into<RemoteDescription>,
    ) -> Result<SessionDescription, NegotiationError> {
        let mut inner = self.inner.lock().await;
        let offer = offer.into().normalize()?;
        if offer.kind != SdpType::Offer {
            return Err(RejectReason::UnexpectedType {
                expected: SdpType::Offer,
                actual: offer.kind,
            }
            .into());
        }

        let signaling = self.peer.signaling_state();
        if signaling != SignalingState::Stable {
            warn!(
                "Refusing remote offer, signaling state is {:?} (state {:?})",
                signaling,
                self.state()
            );
            return Err(RejectReason::WrongSignalingState(signaling).into());
        }

        let prior = self.state();
        let had_remote = inner.remote_description_set;
        self.set_state(NegotiationState::RemoteOfferReceived);
        if let Err(e) = self.peer.set_remote_description(offer).await {
            self.set_state(prior);
            return Err(RejectReason::Apply(e).into());
        }
        inner.remote_description_set = true;
        self.flush_candidates(&mut inner).await;

        let answer = match self.answer_locked().await {
            Ok(answer) => answer,
            Err(e) => {
                // Back to stable so a later offer in either direction is
                // accepted.
                if let Err(undo) = self.peer.set_local_description(rollback()).await {
                    debug!("Rollback after failed answer refused: {}", undo);
                }
                inner.remote_description_set = had_remote;
                self.set_state(prior);
                return Err(e.into());
            }
        };

        self.set_state(NegotiationState::LocalAnswerSent);
        self.set_state(NegotiationState::Stable);
        Ok(answer)
    }

    async fn answer_locked(&self) -> Result<SessionDescription, CapabilityError> {
        let answer = self.peer.create_answer().await?;
        self.peer.set_local_description(answer.clone()).await?;
        Ok(answer)
    }

    /// Applies the answer to our offer. A duplicate answer that arrives after
    /// the connection is already stable is logged and ignored.
    pub async fn set_remote_answer(
        &self,
        answer: impl Into<RemoteDescription>,
    ) -> Result<AnswerOutcome, NegotiationError> {
        let mut inner = self.inner.lock().await;
        let answer = answer.into().normalize()?;

        if self.peer.signaling_state() == SignalingState::Stable {
            warn!("Ignoring remote answer, connection is already stable");
            return Ok(AnswerOutcome::AlreadyStable);
        }
        if !matches!(answer.kind, SdpType::Answer | SdpType::Pranswer) {
            return Err(RejectReason::UnexpectedType {
                expected: SdpType::Answer,
                actual: answer.kind,
            }
            .into());
        }

        self.peer
            .set_remote_description(answer)
            .await
            .map_err(RejectReason::Apply)?;
        inner.remote_description_set = true;
        self.flush_candidates(&mut inner).await;

        self.set_state(NegotiationState::Stable);
        Ok(AnswerOutcome::Applied)
    }

    /// Adds a remote candidate, or holds it until a remote description
    /// exists.
    pub async fn add_ice_candidate(
        &self,
        candidate: IceCandidate,
    ) -> Result<CandidateOutcome, NegotiationError> {
        let mut inner = self.inner.lock().await;
        if !inner.remote_description_set {
            debug!("Buffering early remote candidate");
            inner.pending_candidates.push(candidate);
            return Ok(CandidateOutcome::Buffered);
        }

        self.peer.add_ice_candidate(candidate).await?;
        Ok(CandidateOutcome::Applied)
    }

    async fn flush_candidates(&self, inner: &mut NegotiationInner) {
        for candidate in inner.pending_candidates.drain(..) {
            if let Err(e) = self.peer.add_ice_candidate(candidate).await {
                warn!("Dropping buffered candidate: {}", e);
            }
        }
    }

    pub async fn pending_candidate_count(&self) -> usize {
        self.inner.lock().await.pending_candidates.len()
    }

    /// Produces a fresh offer after local tracks changed.
    ///
    /// Returns `None` when an exchange is already in flight; the peer raises
    /// `negotiation-needed` again once it settles.
    pub async fn renegotiate(&self) -> Result<Option<SessionDescription>, NegotiationError> {
        let _inner = self.inner.lock().await;
        let prior = self.state();
        if prior.is_negotiating() {
            debug!("Renegotiation skipped while {:?}", prior);
            return Ok(None);
        }

        self.set_state(NegotiationState::Renegotiating);
        self.offer_locked(prior).await.map(Some)
    }
}

fn rollback() -> SessionDescription {
    SessionDescription {
        kind: SdpType::Rollback,
        sdp: String::new(),
    }
}
