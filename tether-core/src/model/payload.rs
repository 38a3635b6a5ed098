use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Negotiation payload (SDP or ICE) carried as the exact JSON text the sender
/// produced. The relay forwards it without parsing or re-serializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Box<RawValue>);

impl Payload {
    /// Wraps already-serialized JSON. Fails if `json` is not valid JSON.
    pub fn from_json(json: impl Into<String>) -> Result<Self, serde_json::Error> {
        RawValue::from_string(json.into()).map(Self)
    }

    pub fn encode<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::value::to_raw_value(value).map(Self)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.0.get())
    }

    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// `null`, `""` and `{}` carry nothing worth relaying.
    pub fn is_empty(&self) -> bool {
        matches!(self.0.get().trim(), "" | "null" | "\"\"" | "{}")
    }

    /// Some senders stringify the object before sending it. Returns the JSON
    /// text of the inner value in that case, the raw text otherwise.
    pub(crate) fn unwrap_stringified(&self) -> Result<String, serde_json::Error> {
        let raw = self.0.get();
        if raw.trim_start().starts_with('"') {
            serde_json::from_str::<String>(raw)
        } else {
            Ok(raw.to_owned())
        }
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Payload {}
