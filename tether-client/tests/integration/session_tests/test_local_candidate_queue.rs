use tether_client::PeerEvent;
use tether_core::{ClientMessage, ConnectionId, IceCandidate, ServerMessage};

use crate::integration::{create_test_session, init_tracing};

#[tokio::test]
async fn test_candidates_wait_for_remote_connection() {
    init_tracing();

    let mut session = create_test_session("alice");
    let gathered = IceCandidate::new("candidate:1 1 udp 2122260223 10.0.0.1 5000 typ host");

    session
        .controller
        .handle_peer_event(PeerEvent::LocalCandidate(gathered.clone()))
        .await
        .unwrap();
    assert!(session.transport.sent().is_empty());
    assert_eq!(session.controller.queued_candidate_count(), 1);

    let bob_conn = ConnectionId::new();
    session
        .controller
        .handle_signal(ServerMessage::UserJoined {
            identity: "bob@y.com".into(),
            connection: bob_conn,
        })
        .await
        .unwrap();

    let sent = session.transport.take();
    assert_eq!(sent.len(), 2);
    let ClientMessage::IceCandidate {
        target: Some(target),
        candidate: Some(payload),
    } = &sent[0]
    else {
        panic!("expected the queued candidate first, got {:?}", sent[0]);
    };
    assert_eq!(*target, bob_conn);
    assert_eq!(IceCandidate::from_payload(payload).unwrap(), gathered);
    assert!(matches!(sent[1], ClientMessage::Offer { .. }));
    assert_eq!(session.controller.queued_candidate_count(), 0);
}

#[tokio::test]
async fn test_candidates_go_straight_out_once_remote_known() {
    init_tracing();

    let mut session = create_test_session("bob");
    let alice_conn = ConnectionId::new();
    session
        .controller
        .handle_signal(ServerMessage::UserJoined {
            identity: "alice@x.com".into(),
            connection: alice_conn,
        })
        .await
        .unwrap();
    session.transport.take();

    session
        .controller
        .handle_peer_event(PeerEvent::LocalCandidate(IceCandidate::new(
            "candidate:2 1 udp 1686052607 203.0.113.7 6000 typ srflx",
        )))
        .await
        .unwrap();

    let sent = session.transport.take();
    assert!(matches!(
        sent.as_slice(),
        [ClientMessage::IceCandidate { target: Some(t), .. }] if *t == alice_conn
    ));
}

#[tokio::test]
async fn test_relayed_candidate_before_offer_is_buffered() {
    init_tracing();

    let mut session = create_test_session("bob");
    let candidate = IceCandidate::new("candidate:1 1 udp 2122260223 10.0.0.1 5000 typ host");
    session
        .controller
        .handle_signal(ServerMessage::IceCandidateRelayed {
            from: ConnectionId::new(),
            candidate: candidate.to_payload().unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(session.controller.negotiation().pending_candidate_count().await, 1);
    assert!(session.peer.applied_candidates().is_empty());
}
