use tether_core::IceCandidate;

/// Events a peer connection raises on its own.
#[derive(Debug)]
pub enum PeerEvent<S> {
    /// Remote media arrived.
    Track(S),
    /// Local tracks changed and the session needs a fresh offer.
    NegotiationNeeded,
    /// A local ICE candidate was gathered.
    LocalCandidate(IceCandidate),
}
