pub mod session_tests;

use std::sync::Arc;
use tracing::Level;

use tether_client::{Negotiation, SessionController};

use crate::utils::{MockPeer, MockPeerEvents, MockTransport};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_negotiation(name: &str) -> (Negotiation<MockPeer>, Arc<MockPeer>) {
    let (peer, _events) = MockPeer::new(name);
    (Negotiation::new(peer.clone()), peer)
}

pub struct TestSession {
    pub controller: SessionController<MockPeer, MockTransport>,
    pub peer: Arc<MockPeer>,
    pub peer_events: MockPeerEvents,
    pub transport: MockTransport,
}

pub fn create_test_session(name: &str) -> TestSession {
    let (peer, peer_events) = MockPeer::new(name);
    let transport = MockTransport::new();
    let controller = SessionController::new(peer.clone(), transport.clone());
    TestSession {
        controller,
        peer,
        peer_events,
        transport,
    }
}
