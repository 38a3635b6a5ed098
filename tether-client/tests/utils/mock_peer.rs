use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tether_client::{CapabilityError, PeerConnection, PeerEvent, SignalingState};
use tether_core::{IceCandidate, SdpType, SessionDescription};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTrack(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockStream(pub String);

pub type MockPeerEvents = mpsc::UnboundedReceiver<PeerEvent<MockStream>>;

struct MockPeerState {
    signaling: SignalingState,
    local: Option<SessionDescription>,
    remote: Option<SessionDescription>,
    /// Remote description to restore if a pending offer is rolled back.
    stable_remote: Option<SessionDescription>,
    candidates: Vec<IceCandidate>,
    tracks: Vec<MockTrack>,
    descriptions_created: u32,
}

/// In-memory peer connection following the standard signaling state
/// transitions. Every local track adds an `m=audio` line to the SDP it
/// produces, and applying a remote description with media raises a
/// `Track` event. Description operations yield once before touching
/// state, so concurrent callers really interleave.
pub struct MockPeer {
    name: String,
    state: Mutex<MockPeerState>,
    events: mpsc::UnboundedSender<PeerEvent<MockStream>>,
    fail_offers: AtomicBool,
    fail_answers: AtomicBool,
    closed: AtomicBool,
}

impl MockPeer {
    pub fn new(name: &str) -> (Arc<Self>, MockPeerEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        let peer = Self {
            name: name.to_owned(),
            state: Mutex::new(MockPeerState {
                signaling: SignalingState::Stable,
                local: None,
                remote: None,
                stable_remote: None,
                candidates: Vec::new(),
                tracks: Vec::new(),
                descriptions_created: 0,
            }),
            events: tx,
            fail_offers: AtomicBool::new(false),
            fail_answers: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        };
        (Arc::new(peer), rx)
    }

    pub fn fail_offers(&self, fail: bool) {
        self.fail_offers.store(fail, Ordering::SeqCst);
    }

    pub fn fail_answers(&self, fail: bool) {
        self.fail_answers.store(fail, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn emit(&self, event: PeerEvent<MockStream>) {
        let _ = self.events.send(event);
    }

    pub fn local_description(&self) -> Option<SessionDescription> {
        self.state.lock().unwrap().local.clone()
    }

    pub fn remote_description(&self) -> Option<SessionDescription> {
        self.state.lock().unwrap().remote.clone()
    }

    pub fn applied_candidates(&self) -> Vec<IceCandidate> {
        self.state.lock().unwrap().candidates.clone()
    }

    pub fn tracks(&self) -> Vec<MockTrack> {
        self.state.lock().unwrap().tracks.clone()
    }

    /// Overrides the signaling state, e.g. to stage an offer collision.
    pub fn force_signaling(&self, signaling: SignalingState) {
        self.state.lock().unwrap().signaling = signaling;
    }

    fn describe(&self, kind: SdpType) -> SessionDescription {
        let mut state = self.state.lock().unwrap();
        state.descriptions_created += 1;
        let mut sdp = format!(
            "v=0\r\no=mock-{} {} 0 IN IP4 127.0.0.1\r\ns=-\r\n",
            self.name, state.descriptions_created
        );
        for track in &state.tracks {
            sdp.push_str(&format!("m=audio 9 UDP/TLS/RTP/SAVPF 111\r\na=msid:{}\r\n", track.0));
        }
        SessionDescription { kind, sdp }
    }
}

fn invalid(action: &str, signaling: SignalingState) -> CapabilityError {
    CapabilityError::new(format!("cannot {} in {:?}", action, signaling))
}

#[async_trait]
impl PeerConnection for MockPeer {
    type LocalTrack = MockTrack;
    type RemoteStream = MockStream;

    async fn create_offer(&self) -> Result<SessionDescription, CapabilityError> {
        if self.fail_offers.load(Ordering::SeqCst) {
            return Err(CapabilityError::new("offer generation failed"));
        }
        tokio::task::yield_now().await;
        Ok(self.describe(SdpType::Offer))
    }

    async fn create_answer(&self) -> Result<SessionDescription, CapabilityError> {
        let signaling = self.signaling_state();
        if signaling != SignalingState::HaveRemoteOffer {
            return Err(invalid("create answer", signaling));
        }
        if self.fail_answers.load(Ordering::SeqCst) {
            return Err(CapabilityError::new("answer generation failed"));
        }
        Ok(self.describe(SdpType::Answer))
    }

    async fn set_local_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), CapabilityError> {
        let mut state = self.state.lock().unwrap();
        if desc.kind == SdpType::Rollback {
            match state.signaling {
                SignalingState::HaveLocalOffer => state.local = None,
                SignalingState::HaveRemoteOffer => state.remote = state.stable_remote.take(),
                signaling => return Err(invalid("roll back", signaling)),
            }
            state.signaling = SignalingState::Stable;
            return Ok(());
        }
        state.signaling = match (state.signaling, desc.kind) {
            (SignalingState::Stable | SignalingState::HaveLocalOffer, SdpType::Offer) => {
                SignalingState::HaveLocalOffer
            }
            (SignalingState::HaveRemoteOffer, SdpType::Answer) => SignalingState::Stable,
            (signaling, _) => return Err(invalid("set local description", signaling)),
        };
        state.local = Some(desc);
        Ok(())
    }

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), CapabilityError> {
        let has_media = desc.sdp.contains("m=audio");
        tokio::task::yield_now().await;
        {
            let mut state = self.state.lock().unwrap();
            state.signaling = match (state.signaling, desc.kind) {
                (SignalingState::Stable, SdpType::Offer) => {
                    state.stable_remote = state.remote.clone();
                    SignalingState::HaveRemoteOffer
                }
                (SignalingState::HaveLocalOffer, SdpType::Answer) => SignalingState::Stable,
                (SignalingState::HaveLocalOffer, SdpType::Pranswer) => {
                    SignalingState::HaveRemotePranswer
                }
                (signaling, _) => return Err(invalid("set remote description", signaling)),
            };
            state.remote = Some(desc);
        }
        if has_media {
            self.emit(PeerEvent::Track(MockStream(format!("{}-remote", self.name))));
        }
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), CapabilityError> {
        let mut state = self.state.lock().unwrap();
        if state.remote.is_none() {
            return Err(CapabilityError::new("no remote description"));
        }
        state.candidates.push(candidate);
        Ok(())
    }

    async fn add_track(&self, track: MockTrack) -> Result<(), CapabilityError> {
        let established = {
            let mut state = self.state.lock().unwrap();
            state.tracks.push(track);
            state.remote.is_some()
        };
        if established {
            self.emit(PeerEvent::NegotiationNeeded);
        }
        Ok(())
    }

    fn signaling_state(&self) -> SignalingState {
        self.state.lock().unwrap().signaling
    }

    async fn close(&self) -> Result<(), CapabilityError> {
        self.closed.store(true, Ordering::SeqCst);
        self.state.lock().unwrap().signaling = SignalingState::Closed;
        Ok(())
    }
}
