use anyhow::{Context, Result};
use clap::Parser;
use tether_server::{AppState, ServerConfig, serve};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    info!(
        "Signaling server running on http://{}",
        listener.local_addr()?
    );
    if config.notify_on_leave {
        info!("Leave notifications enabled");
    }

    serve(listener, AppState::new(&config), shutdown_signal()).await?;

    info!("Signaling server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
