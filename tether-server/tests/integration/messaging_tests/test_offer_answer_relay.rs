use tether_core::{ClientMessage, Identity, ServerMessage};

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{answer_payload, join, offer_payload};

#[tokio::test]
async fn test_offer_answer_relay() {
    init_tracing();

    let (relay, output) = create_test_relay();

    let alice = join(&relay, "r1", "alice@x.com").await.expect("alice joins");
    let bob = join(&relay, "r1", "bob@y.com").await.expect("bob joins");

    relay
        .handle(
            alice,
            ClientMessage::Offer {
                target: Identity::from("bob@y.com"),
                sdp: offer_payload(),
            },
        )
        .await
        .expect("offer relayed");

    let to_bob = output.delivered_to(&bob).await;
    let Some(ServerMessage::IncomingOffer {
        from,
        sdp,
        connection,
    }) = to_bob.last()
    else {
        panic!("bob should receive incoming-call, got {:?}", to_bob);
    };
    assert_eq!(from, &Identity::from("alice@x.com"));
    assert_eq!(connection, &alice);
    assert_eq!(sdp.as_str(), offer_payload().as_str());

    relay
        .handle(
            bob,
            ClientMessage::Answer {
                target: Identity::from("alice@x.com"),
                sdp: answer_payload(),
            },
        )
        .await
        .expect("answer relayed");

    let to_alice = output.delivered_to(&alice).await;
    assert_eq!(
        to_alice.last(),
        Some(&ServerMessage::CallAccepted {
            from: Identity::from("bob@y.com"),
            sdp: answer_payload(),
            connection: bob,
        })
    );
}

#[tokio::test]
async fn test_offer_from_connection_that_never_joined() {
    init_tracing();

    let (relay, output) = create_test_relay();
    join(&relay, "r1", "bob@y.com").await.expect("bob joins");
    let before = output.all().await.len();

    let stranger = tether_core::ConnectionId::new();
    let result = relay
        .handle(
            stranger,
            ClientMessage::Offer {
                target: Identity::from("bob@y.com"),
                sdp: offer_payload(),
            },
        )
        .await;

    assert_eq!(result, Err(tether_server::RelayError::UnknownSender(stranger)));
    assert_eq!(output.all().await.len(), before);
}
