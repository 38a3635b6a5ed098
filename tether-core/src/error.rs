use thiserror::Error;

/// Failures while reading or writing signaling frames.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Frame(#[source] serde_json::Error),

    #[error("unknown event `{0}`")]
    UnknownEvent(String),

    #[error("invalid `{event}` payload: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid session description: {0}")]
    Description(#[source] serde_json::Error),

    #[error("invalid ICE candidate: {0}")]
    Candidate(#[source] serde_json::Error),

    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}
