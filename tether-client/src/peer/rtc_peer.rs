use crate::config::ClientConfig;
use crate::error::CapabilityError;
use crate::peer::{PeerConnection, PeerEvent, RemoteMedia, SignalingState, StreamGroups};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use tether_core::{IceCandidate, SdpType, SessionDescription};
use tokio::sync::mpsc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::sdp_type::RTCSdpType;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::peer_connection::signaling_state::RTCSignalingState;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_remote::TrackRemote;

/// Remote media as webrtc-rs delivers it.
pub type RtcRemoteMedia = RemoteMedia<Arc<TrackRemote>>;

pub type RtcPeerEvents = mpsc::UnboundedReceiver<PeerEvent<RtcRemoteMedia>>;

/// [`PeerConnection`] backed by webrtc-rs.
pub struct RtcPeer {
    peer_connection: Arc<RTCPeerConnection>,
}

impl RtcPeer {
    pub async fn new(config: &ClientConfig) -> Result<(Self, RtcPeerEvents), CapabilityError> {
        let mut media_engine = MediaEngine::default();
        media_engine
            .register_default_codecs()
            .map_err(CapabilityError::new)?;
        let registry = register_default_interceptors(Registry::new(), &mut media_engine)
            .map_err(CapabilityError::new)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(
            api.new_peer_connection(rtc_config)
                .await
                .map_err(CapabilityError::new)?,
        );

        let (event_tx, event_rx) = mpsc::unbounded_channel();

        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                Box::pin(async move {
                    info!("Peer connection state changed: {:?}", s);
                })
            },
        ));

        let track_tx = event_tx.clone();
        let groups = Arc::new(Mutex::new(StreamGroups::new()));
        peer_connection.on_track(Box::new(move |track, _receiver, _transceiver| {
            let tx = track_tx.clone();
            let groups = groups.clone();
            Box::pin(async move {
                let stream_id = track.stream_id();
                let media = groups
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .add(&stream_id, track);
                debug!("Remote track added to stream {}", stream_id);
                let _ = tx.send(PeerEvent::Track(media));
            })
        }));

        let negotiation_tx = event_tx.clone();
        peer_connection.on_negotiation_needed(Box::new(move || {
            let tx = negotiation_tx.clone();
            Box::pin(async move {
                let _ = tx.send(PeerEvent::NegotiationNeeded);
            })
        }));

        let ice_tx = event_tx;
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let Ok(json) = serde_json::to_string(&init) else {
                    return;
                };
                match serde_json::from_str::<IceCandidate>(&json) {
                    Ok(candidate) => {
                        let _ = tx.send(PeerEvent::LocalCandidate(candidate));
                    }
                    Err(e) => debug!("Skipping unreadable local candidate: {}", e),
                }
            })
        }));

        Ok((Self { peer_connection }, event_rx))
    }
}

fn to_rtc(desc: SessionDescription) -> Result<RTCSessionDescription, CapabilityError> {
    let result = match desc.kind {
        SdpType::Offer => RTCSessionDescription::offer(desc.sdp),
        SdpType::Answer => RTCSessionDescription::answer(desc.sdp),
        SdpType::Pranswer => RTCSessionDescription::pranswer(desc.sdp),
        SdpType::Rollback => {
            let mut rollback = RTCSessionDescription::default();
            rollback.sdp_type = RTCSdpType::Rollback;
            return Ok(rollback);
        }
    };
    result.map_err(CapabilityError::new)
}

fn from_rtc(desc: RTCSessionDescription) -> Result<SessionDescription, CapabilityError> {
    let kind = match desc.sdp_type {
        RTCSdpType::Offer => SdpType::Offer,
        RTCSdpType::Answer => SdpType::Answer,
        RTCSdpType::Pranswer => SdpType::Pranswer,
        RTCSdpType::Rollback => SdpType::Rollback,
        RTCSdpType::Unspecified => {
            return Err(CapabilityError::new("description has no type"));
        }
    };
    Ok(SessionDescription {
        kind,
        sdp: desc.sdp,
    })
}

#[async_trait]
impl PeerConnection for RtcPeer {
    type LocalTrack = Arc<dyn TrackLocal + Send + Sync>;
    type RemoteStream = RtcRemoteMedia;

    async fn create_offer(&self) -> Result<SessionDescription, CapabilityError> {
        let offer = self
            .peer_connection
            .create_offer(None)
            .await
            .map_err(CapabilityError::new)?;
        from_rtc(offer)
    }

    async fn create_answer(&self) -> Result<SessionDescription, CapabilityError> {
        let answer = self
            .peer_connection
            .create_answer(None)
            .await
            .map_err(CapabilityError::new)?;
        from_rtc(answer)
    }

    async fn set_local_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), CapabilityError> {
        self.peer_connection
            .set_local_description(to_rtc(desc)?)
            .await
            .map_err(CapabilityError::new)
    }

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), CapabilityError> {
        self.peer_connection
            .set_remote_description(to_rtc(desc)?)
            .await
            .map_err(CapabilityError::new)
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), CapabilityError> {
        let json = serde_json::to_string(&candidate).map_err(CapabilityError::new)?;
        let init: RTCIceCandidateInit =
            serde_json::from_str(&json).map_err(CapabilityError::new)?;
        self.peer_connection
            .add_ice_candidate(init)
            .await
            .map_err(CapabilityError::new)
    }

    async fn add_track(&self, track: Self::LocalTrack) -> Result<(), CapabilityError> {
        self.peer_connection
            .add_track(track)
            .await
            .map_err(CapabilityError::new)?;
        Ok(())
    }

    fn signaling_state(&self) -> SignalingState {
        match self.peer_connection.signaling_state() {
            RTCSignalingState::Unspecified | RTCSignalingState::Stable => SignalingState::Stable,
            RTCSignalingState::HaveLocalOffer => SignalingState::HaveLocalOffer,
            RTCSignalingState::HaveRemoteOffer => SignalingState::HaveRemoteOffer,
            RTCSignalingState::HaveLocalPranswer => SignalingState::HaveLocalPranswer,
            RTCSignalingState::HaveRemotePranswer => SignalingState::HaveRemotePranswer,
            RTCSignalingState::Closed => SignalingState::Closed,
        }
    }

    async fn close(&self) -> Result<(), CapabilityError> {
        self.peer_connection
            .close()
            .await
            .map_err(CapabilityError::new)
    }
}
