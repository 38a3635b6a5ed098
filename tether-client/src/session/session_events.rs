use crate::peer::PeerEvent;
use tether_core::ServerMessage;
use tokio::sync::mpsc;

/// Everything a running session listens to.
pub struct SessionEvents<S> {
    pub signals: mpsc::UnboundedReceiver<ServerMessage>,
    pub peer: mpsc::UnboundedReceiver<PeerEvent<S>>,
}
