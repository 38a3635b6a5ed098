use tether_core::{Identity, RoomId, ServerMessage};

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::join;

#[tokio::test]
async fn test_join_room_notifies_existing_member() {
    init_tracing();

    let (relay, output) = create_test_relay();

    let alice = join(&relay, "r1", "alice@x.com").await.expect("alice joins");
    let bob = join(&relay, "r1", "bob@y.com").await.expect("bob joins");

    // Alice hears about Bob exactly once, never about herself.
    assert_eq!(
        output.delivered_to(&alice).await,
        vec![
            ServerMessage::JoinedRoom {
                room_id: RoomId::from("r1")
            },
            ServerMessage::UserJoined {
                identity: Identity::from("bob@y.com"),
                connection: bob,
            },
        ]
    );

    // Bob only gets his own acknowledgement.
    assert_eq!(
        output.delivered_to(&bob).await,
        vec![ServerMessage::JoinedRoom {
            room_id: RoomId::from("r1")
        }]
    );
}

#[tokio::test]
async fn test_rooms_are_isolated() {
    init_tracing();

    let (relay, output) = create_test_relay();

    let alice = join(&relay, "r1", "alice@x.com").await.expect("alice joins");
    join(&relay, "r2", "bob@y.com").await.expect("bob joins");

    let user_joined = output
        .count_matching(|d| d.to == alice && matches!(d.msg, ServerMessage::UserJoined { .. }))
        .await;
    assert_eq!(user_joined, 0);
    assert_eq!(relay.registry().room_count(), 2);
}

#[tokio::test]
async fn test_join_without_identity_is_rejected() {
    init_tracing();

    let (relay, output) = create_test_relay();

    let err = join(&relay, "r1", "  ").await.unwrap_err();
    assert!(err.to_string().contains("failed to join"));
    assert!(output.all().await.is_empty());
    assert_eq!(relay.registry().room_count(), 0);
}
