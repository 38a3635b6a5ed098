pub use tether_core::{ConnectionId, Identity, RoomId};

pub mod model {
    pub use tether_core::model::*;
    pub use tether_core::{ProtocolError, utils};
}

#[cfg(feature = "server")]
pub mod server {
    pub use tether_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use tether_client::*;
}
