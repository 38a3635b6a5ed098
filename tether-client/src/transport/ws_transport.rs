use crate::error::TransportError;
use crate::transport::SignalingTransport;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tether_core::{ClientMessage, ServerMessage};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

pub type SignalReceiver = mpsc::UnboundedReceiver<ServerMessage>;

/// Signaling over a WebSocket to the relay.
#[derive(Clone)]
pub struct WsTransport {
    outbox: mpsc::UnboundedSender<ClientMessage>,
}

impl WsTransport {
    pub async fn connect(url: &str) -> Result<(Self, SignalReceiver), TransportError> {
        let (stream, _) = connect_async(url).await?;
        info!("Connected to signaling server at {}", url);

        let (mut sender, mut receiver) = stream.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ClientMessage>();
        let (in_tx, in_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let text = match msg.encode() {
                    Ok(text) => text,
                    Err(e) => {
                        error!("Failed to encode {}: {}", msg.event_name(), e);
                        continue;
                    }
                };
                if sender.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            let _ = sender.close().await;
        });

        tokio::spawn(async move {
            while let Some(frame) = receiver.next().await {
                match frame {
                    Ok(Message::Text(text)) => match ServerMessage::decode(text.as_str()) {
                        Ok(msg) => {
                            if in_tx.send(msg).is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("Dropping signaling frame: {}", e),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Signaling socket error: {}", e);
                        break;
                    }
                }
            }
            debug!("Signaling stream closed");
        });

        Ok((Self { outbox: out_tx }, in_rx))
    }
}

#[async_trait]
impl SignalingTransport for WsTransport {
    async fn send(&self, msg: ClientMessage) -> Result<(), TransportError> {
        self.outbox.send(msg).map_err(|_| TransportError::Closed)
    }
}
