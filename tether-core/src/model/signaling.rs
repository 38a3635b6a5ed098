//! Signaling frames exchanged over the relay.
//!
//! Every frame is a JSON text message `{"event": "<name>", "data": {...}}`.
//! Negotiation payloads (`offer`, `ans`, `candidate`) stay raw JSON so that a
//! relayed frame carries exactly the bytes its sender produced.

use crate::error::ProtocolError;
use crate::model::{ConnectionId, Identity, Payload, RoomId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Wire event names.
pub mod events {
    pub const JOIN_ROOM: &str = "join-room";
    pub const JOINED_ROOM: &str = "joined-room";
    pub const USER_JOINED: &str = "user-joined";
    pub const USER_LEFT: &str = "user-left";
    pub const CALL_USER: &str = "call-user";
    pub const INCOMING_CALL: &str = "incoming-call";
    pub const CALL_ACCEPTED: &str = "call-accepted";
    pub const ICE_CANDIDATE: &str = "ice-candidate";
}

/// Messages a client sends to the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// `join-room`
    JoinRoom { room_id: RoomId, identity: Identity },
    /// `call-user`
    Offer { target: Identity, sdp: Payload },
    /// `call-accepted`
    Answer { target: Identity, sdp: Payload },
    /// `ice-candidate`. Missing, empty or malformed fields decode to `None`.
    IceCandidate {
        target: Option<ConnectionId>,
        candidate: Option<Payload>,
    },
}

/// Messages the relay sends to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// `joined-room`, sent to the joiner only.
    JoinedRoom { room_id: RoomId },
    /// `user-joined`, sent to the other members of the room.
    UserJoined {
        identity: Identity,
        connection: ConnectionId,
    },
    /// `user-left`, sent to remaining members when leave notifications are on.
    UserLeft {
        identity: Identity,
        connection: ConnectionId,
    },
    /// `incoming-call`
    IncomingOffer {
        from: Identity,
        sdp: Payload,
        connection: ConnectionId,
    },
    /// `call-accepted`
    CallAccepted {
        from: Identity,
        sdp: Payload,
        connection: ConnectionId,
    },
    /// `ice-candidate`
    IceCandidateRelayed {
        from: ConnectionId,
        candidate: Payload,
    },
}

#[derive(Serialize, Deserialize)]
struct Frame {
    event: String,
    data: Box<RawValue>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinRoomData {
    room_id: RoomId,
    email_id: Identity,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallUserData {
    email_id: Identity,
    offer: Payload,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallAcceptedData {
    email_id: Identity,
    ans: Payload,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IceCandidateData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_socket_id: Option<String>,
    #[serde(default)]
    candidate: Option<Payload>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinedRoomData {
    room_id: RoomId,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberData {
    email_id: Identity,
    socket_id: ConnectionId,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingCallData {
    from: Identity,
    offer: Payload,
    socket_id: ConnectionId,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallAcceptedRelayData {
    from: Identity,
    ans: Payload,
    socket_id: ConnectionId,
}

#[derive(Serialize, Deserialize)]
struct IceRelayData {
    from: ConnectionId,
    candidate: Payload,
}

fn write_frame<T: Serialize>(event: &str, data: &T) -> Result<String, ProtocolError> {
    let frame = Frame {
        event: event.to_owned(),
        data: serde_json::value::to_raw_value(data)?,
    };
    Ok(serde_json::to_string(&frame)?)
}

fn read_frame(text: &str) -> Result<Frame, ProtocolError> {
    serde_json::from_str(text).map_err(ProtocolError::Frame)
}

fn read_data<T: DeserializeOwned>(frame: &Frame) -> Result<T, ProtocolError> {
    serde_json::from_str(frame.data.get()).map_err(|source| ProtocolError::Payload {
        event: frame.event.clone(),
        source,
    })
}

impl ClientMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            ClientMessage::JoinRoom { .. } => events::JOIN_ROOM,
            ClientMessage::Offer { .. } => events::CALL_USER,
            ClientMessage::Answer { .. } => events::CALL_ACCEPTED,
            ClientMessage::IceCandidate { .. } => events::ICE_CANDIDATE,
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        let event = self.event_name();
        match self {
            ClientMessage::JoinRoom { room_id, identity } => write_frame(
                event,
                &JoinRoomData {
                    room_id: room_id.clone(),
                    email_id: identity.clone(),
                },
            ),
            ClientMessage::Offer { target, sdp } => write_frame(
                event,
                &CallUserData {
                    email_id: target.clone(),
                    offer: sdp.clone(),
                },
            ),
            ClientMessage::Answer { target, sdp } => write_frame(
                event,
                &CallAcceptedData {
                    email_id: target.clone(),
                    ans: sdp.clone(),
                },
            ),
            ClientMessage::IceCandidate { target, candidate } => write_frame(
                event,
                &IceCandidateData {
                    target_socket_id: target.map(|t| t.to_string()),
                    candidate: candidate.clone(),
                },
            ),
        }
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let frame = read_frame(text)?;
        match frame.event.as_str() {
            events::JOIN_ROOM => {
                let data: JoinRoomData = read_data(&frame)?;
                Ok(ClientMessage::JoinRoom {
                    room_id: data.room_id,
                    identity: data.email_id,
                })
            }
            events::CALL_USER => {
                let data: CallUserData = read_data(&frame)?;
                Ok(ClientMessage::Offer {
                    target: data.email_id,
                    sdp: data.offer,
                })
            }
            events::CALL_ACCEPTED => {
                let data: CallAcceptedData = read_data(&frame)?;
                Ok(ClientMessage::Answer {
                    target: data.email_id,
                    sdp: data.ans,
                })
            }
            events::ICE_CANDIDATE => {
                let data: IceCandidateData = read_data(&frame)?;
                Ok(ClientMessage::IceCandidate {
                    target: data
                        .target_socket_id
                        .and_then(|id| id.parse::<ConnectionId>().ok()),
                    candidate: data.candidate.filter(|c| !c.is_empty()),
                })
            }
            other => Err(ProtocolError::UnknownEvent(other.to_owned())),
        }
    }
}

impl ServerMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            ServerMessage::JoinedRoom { .. } => events::JOINED_ROOM,
            ServerMessage::UserJoined { .. } => events::USER_JOINED,
            ServerMessage::UserLeft { .. } => events::USER_LEFT,
            ServerMessage::IncomingOffer { .. } => events::INCOMING_CALL,
            ServerMessage::CallAccepted { .. } => events::CALL_ACCEPTED,
            ServerMessage::IceCandidateRelayed { .. } => events::ICE_CANDIDATE,
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        let event = self.event_name();
        match self {
            ServerMessage::JoinedRoom { room_id } => write_frame(
                event,
                &JoinedRoomData {
                    room_id: room_id.clone(),
                },
            ),
            ServerMessage::UserJoined {
                identity,
                connection,
            }
            | ServerMessage::UserLeft {
                identity,
                connection,
            } => write_frame(
                event,
                &MemberData {
                    email_id: identity.clone(),
                    socket_id: *connection,
                },
            ),
            ServerMessage::IncomingOffer {
                from,
                sdp,
                connection,
            } => write_frame(
                event,
                &IncomingCallData {
                    from: from.clone(),
                    offer: sdp.clone(),
                    socket_id: *connection,
                },
            ),
            ServerMessage::CallAccepted {
                from,
                sdp,
                connection,
            } => write_frame(
                event,
                &CallAcceptedRelayData {
                    from: from.clone(),
                    ans: sdp.clone(),
                    socket_id: *connection,
                },
            ),
            ServerMessage::IceCandidateRelayed { from, candidate } => write_frame(
                event,
                &IceRelayData {
                    from: *from,
                    candidate: candidate.clone(),
                },
            ),
        }
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let frame = read_frame(text)?;
        match frame.event.as_str() {
            events::JOINED_ROOM => {
                let data: JoinedRoomData = read_data(&frame)?;
                Ok(ServerMessage::JoinedRoom {
                    room_id: data.room_id,
                })
            }
            events::USER_JOINED => {
                let data: MemberData = read_data(&frame)?;
                Ok(ServerMessage::UserJoined {
                    identity: data.email_id,
                    connection: data.socket_id,
                })
            }
            events::USER_LEFT => {
                let data: MemberData = read_data(&frame)?;
                Ok(ServerMessage::UserLeft {
                    identity: data.email_id,
                    connection: data.socket_id,
                })
            }
            events::INCOMING_CALL => {
                let data: IncomingCallData = read_data(&frame)?;
                Ok(ServerMessage::IncomingOffer {
                    from: data.from,
                    sdp: data.offer,
                    connection: data.socket_id,
                })
            }
            events::CALL_ACCEPTED => {
                let data: CallAcceptedRelayData = read_data(&frame)?;
                Ok(ServerMessage::CallAccepted {
                    from: data.from,
                    sdp: data.ans,
                    connection: data.socket_id,
                })
            }
            events::ICE_CANDIDATE => {
                let data: IceRelayData = read_data(&frame)?;
                Ok(ServerMessage::IceCandidateRelayed {
                    from: data.from,
                    candidate: data.candidate,
                })
            }
            other => Err(ProtocolError::UnknownEvent(other.to_owned())),
        }
    }
}
