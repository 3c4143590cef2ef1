//! tinyircd - a small multi-threaded IRC server.
//!
//! Clients register with PASS/NICK/USER, then chat in channels with
//! operator-controlled modes, invitations, kicks and topics.

mod config;
mod error;
mod handlers;
mod network;
mod state;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::network::Gateway;
use crate::state::{Matrix, Outbox};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    let outbox = Arc::new(Outbox::new());
    let matrix = Arc::new(Matrix::new(&config.server, outbox.clone()));

    let info = &matrix.server_info;
    info!(
        server = %info.name,
        network = %info.network,
        version = %info.version,
        description = %info.description,
        "Starting tinyircd"
    );

    let gateway = Gateway::bind(
        config.listen.address,
        Arc::clone(&matrix),
        outbox,
        config.limits.clone(),
    )
    .await?;

    tokio::select! {
        result = gateway.run() => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!(
                clients = matrix.client_count(),
                channels = matrix.channel_count(),
                "Shutting down"
            );
        }
    }

    Ok(())
}
