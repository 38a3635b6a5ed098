#[cfg(feature = "rtc")]
mod connect;
mod remote_peer;
mod session_controller;
mod session_events;

#[cfg(feature = "rtc")]
pub use connect::*;
pub use remote_peer::*;
pub use session_controller::*;
pub use session_events::*;
