use crate::error::CapabilityError;
use async_trait::async_trait;
use tether_core::{IceCandidate, SessionDescription};

/// Signaling state of the underlying peer connection, as the WebRTC
/// standard names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalingState {
    Stable,
    HaveLocalOffer,
    HaveRemoteOffer,
    HaveLocalPranswer,
    HaveRemotePranswer,
    Closed,
}

/// The media engine the session drives.
///
/// Implementations push their own [`PeerEvent`](crate::PeerEvent)s into
/// the channel handed to them at construction.
#[async_trait]
pub trait PeerConnection: Send + Sync + 'static {
    type LocalTrack: Send + Sync + 'static;
    type RemoteStream: Clone + Send + Sync + 'static;

    async fn create_offer(&self) -> Result<SessionDescription, CapabilityError>;

    async fn create_answer(&self) -> Result<SessionDescription, CapabilityError>;

    async fn set_local_description(&self, desc: SessionDescription)
    -> Result<(), CapabilityError>;

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), CapabilityError>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), CapabilityError>;

    async fn add_track(&self, track: Self::LocalTrack) -> Result<(), CapabilityError>;

    fn signaling_state(&self) -> SignalingState;

    /// Stops media and network activity. Closing twice is harmless.
    async fn close(&self) -> Result<(), CapabilityError>;
}
