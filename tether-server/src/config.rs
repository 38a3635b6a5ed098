use clap::Parser;
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, Parser)]
#[command(name = "tether-server", version, about = "WebRTC signaling relay")]
pub struct ServerConfig {
    /// Address the HTTP/WebSocket listener binds to.
    #[arg(long, env = "TETHER_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Send `user-left` to the remaining room members when a connection closes.
    #[arg(long, env = "TETHER_NOTIFY_ON_LEAVE")]
    pub notify_on_leave: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            notify_on_leave: false,
        }
    }
}
