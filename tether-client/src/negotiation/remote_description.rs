use tether_core::{Payload, ProtocolError, SessionDescription};

/// A description received from the other side, in whichever form it
/// arrived.
#[derive(Debug, Clone)]
pub enum RemoteDescription {
    Structured(SessionDescription),
    /// Raw relay payload. May be an object or a JSON string holding one.
    Payload(Payload),
    /// A serialized description, e.g. `{"type":"offer","sdp":"..."}`.
    Text(String),
}

impl RemoteDescription {
    pub fn normalize(self) -> Result<SessionDescription, ProtocolError> {
        match self {
            Self::Structured(desc) => Ok(desc),
            Self::Payload(payload) => SessionDescription::from_payload(&payload),
            Self::Text(text) => {
                let payload = Payload::from_json(text).map_err(ProtocolError::Description)?;
                SessionDescription::from_payload(&payload)
            }
        }
    }
}

impl From<SessionDescription> for RemoteDescription {
    fn from(desc: SessionDescription) -> Self {
        Self::Structured(desc)
    }
}

impl From<Payload> for RemoteDescription {
    fn from(payload: Payload) -> Self {
        Self::Payload(payload)
    }
}

impl From<String> for RemoteDescription {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
