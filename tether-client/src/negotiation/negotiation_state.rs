/// Where the local side is in the offer/answer exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegotiationState {
    #[default]
    Idle,
    LocalOfferPending,
    LocalOfferSent,
    RemoteOfferReceived,
    LocalAnswerSent,
    Stable,
    Renegotiating,
}

impl NegotiationState {
    /// True while an exchange is in flight.
    pub fn is_negotiating(&self) -> bool {
        !matches!(self, Self::Idle | Self::Stable)
    }
}

/// Result of applying a remote answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Applied,
    /// The connection was already stable; the answer was ignored.
    AlreadyStable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOutcome {
    Applied,
    /// No remote description yet; held until one is set.
    Buffered,
}
