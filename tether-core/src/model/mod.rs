mod connection;
mod description;
mod identity;
mod payload;
mod room;
mod signaling;

pub use connection::ConnectionId;
pub use description::{IceCandidate, IceServerConfig, SdpType, SessionDescription};
pub use identity::Identity;
pub use payload::Payload;
pub use room::RoomId;
pub use signaling::{ClientMessage, ServerMessage, events};
