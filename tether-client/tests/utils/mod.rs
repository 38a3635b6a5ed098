pub mod mock_peer;

pub use mock_media::*;
pub use mock_peer::*;
pub use mock_transport::*;
pub use test_server::*;

use std::time::Duration;

pub const SIGNAL_TIMEOUT_MS: u64 = 2000;

pub fn signal_timeout() -> Duration {
    Duration::from_millis(SIGNAL_TIMEOUT_MS)
}
