mod peer_connection;
mod peer_event;
mod remote_media;
#[cfg(feature = "rtc")]
mod rtc_peer;

pub use peer_connection::*;
pub use peer_event::*;
pub use remote_media::*;
#[cfg(feature = "rtc")]
pub use rtc_peer::*;
