use crate::config::ClientConfig;
use crate::error::{ClientError, NegotiationError};
use crate::peer::{RtcPeer, RtcRemoteMedia};
use crate::session::{SessionController, SessionEvents};
use crate::transport::WsTransport;
use std::sync::Arc;

pub type RtcSession = SessionController<RtcPeer, WsTransport>;

/// Opens the signaling socket and a webrtc-rs peer connection, ready for
/// [`SessionController::start`] and [`SessionController::join`].
pub async fn connect(
    config: &ClientConfig,
) -> Result<(RtcSession, SessionEvents<RtcRemoteMedia>), ClientError> {
    let (transport, signals) = WsTransport::connect(&config.url).await?;
    let (peer, peer_events) = RtcPeer::new(config)
        .await
        .map_err(NegotiationError::Capability)?;

    let controller = SessionController::new(Arc::new(peer), transport);
    Ok((
        controller,
        SessionEvents {
            signals,
            peer: peer_events,
        },
    ))
}
