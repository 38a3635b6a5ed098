use crate::error::ProtocolError;
use crate::model::Payload;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Pranswer,
    Answer,
    Rollback,
}

/// Structured session description, the shape browsers exchange
/// (`{"type": "offer", "sdp": "v=0..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub kind: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpType::Answer,
            sdp: sdp.into(),
        }
    }

    /// Accepts both the structured object and its stringified form.
    pub fn from_payload(payload: &Payload) -> Result<Self, ProtocolError> {
        let json = payload
            .unwrap_stringified()
            .map_err(ProtocolError::Description)?;
        serde_json::from_str(&json).map_err(ProtocolError::Description)
    }

    pub fn to_payload(&self) -> Result<Payload, ProtocolError> {
        Ok(Payload::encode(self)?)
    }
}

/// Trickle ICE candidate in the browser's `RTCIceCandidateInit` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_fragment: Option<String>,
}

impl IceCandidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            sdp_mid: None,
            sdp_m_line_index: None,
            username_fragment: None,
        }
    }

    pub fn from_payload(payload: &Payload) -> Result<Self, ProtocolError> {
        let json = payload
            .unwrap_stringified()
            .map_err(ProtocolError::Candidate)?;
        serde_json::from_str(&json).map_err(ProtocolError::Candidate)
    }

    pub fn to_payload(&self) -> Result<Payload, ProtocolError> {
        Ok(Payload::encode(self)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}
