use tether_client::{
    NegotiationError, NegotiationState, PeerConnection, RejectReason, SignalingState,
};

use crate::integration::{create_negotiation, init_tracing};

#[tokio::test]
async fn test_offer_collision_keeps_local_offer() {
    init_tracing();

    let (alice, alice_peer) = create_negotiation("alice");
    let (bob, _) = create_negotiation("bob");

    let alice_offer = alice.create_offer().await.unwrap();
    let bob_offer = bob.create_offer().await.unwrap();

    let result = alice.create_answer(bob_offer).await;
    assert!(matches!(
        result,
        Err(NegotiationError::Rejected(RejectReason::WrongSignalingState(
            SignalingState::HaveLocalOffer
        )))
    ));

    assert_eq!(alice.state(), NegotiationState::LocalOfferSent);
    assert_eq!(alice_peer.signaling_state(), SignalingState::HaveLocalOffer);
    assert_eq!(alice_peer.remote_description(), None);
    assert_eq!(alice_peer.local_description(), Some(alice_offer));
}

#[tokio::test]
async fn test_offer_refused_when_peer_closed() {
    init_tracing();

    let (bob, bob_peer) = create_negotiation("bob");
    let (alice, _) = create_negotiation("alice");
    bob_peer.force_signaling(SignalingState::Closed);

    let offer = alice.create_offer().await.unwrap();
    assert!(matches!(
        bob.create_answer(offer).await,
        Err(NegotiationError::Rejected(RejectReason::WrongSignalingState(
            SignalingState::Closed
        )))
    ));
    assert_eq!(bob.state(), NegotiationState::Idle);
}
