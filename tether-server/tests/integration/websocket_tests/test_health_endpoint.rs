use serde_json::Value;
use std::net::SocketAddr;
use tether_core::ServerMessage;
use tether_server::ServerConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::integration::init_tracing;
use crate::utils::TestServer;

async fn get_health(addr: SocketAddr) -> Value {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
    let (_, body) = response.split_once("\r\n\r\n").expect("headers end");
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn test_health_reports_rooms_and_connections() {
    init_tracing();

    let server = TestServer::start(ServerConfig::default())
        .await
        .expect("server starts");

    let idle = get_health(server.addr).await;
    assert_eq!(idle["status"], "ok");
    assert_eq!(idle["rooms"], 0);
    assert_eq!(idle["connections"], 0);

    let mut client = server.connect().await.expect("client connects");
    client
        .send_raw(r#"{"event":"join-room","data":{"roomId":"r1","emailId":"alice@x.com"}}"#)
        .await
        .unwrap();
    assert!(matches!(
        client.recv().await.unwrap(),
        ServerMessage::JoinedRoom { .. }
    ));

    let busy = get_health(server.addr).await;
    assert_eq!(busy["rooms"], 1);
    assert_eq!(busy["connections"], 1);
}
