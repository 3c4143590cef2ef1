//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listen socket, creates a client record for each
//! accepted peer and spawns a [`Connection`] task to serve it.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::config::LimitsConfig;
use crate::handlers::Registry;
use crate::network::Connection;
use crate::state::{Matrix, Outbox};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    matrix: Arc<Matrix>,
    registry: Arc<Registry>,
    outbox: Arc<Outbox>,
    limits: LimitsConfig,
}

impl Gateway {
    /// Bind the gateway to `addr`.
    pub async fn bind(
        addr: SocketAddr,
        matrix: Arc<Matrix>,
        outbox: Arc<Outbox>,
        limits: LimitsConfig,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(address = %listener.local_addr()?, "Listener bound");

        Ok(Self {
            listener,
            matrix,
            registry: Arc::new(Registry::new()),
            outbox,
            limits,
        })
    }

    /// Address actually bound (useful when binding port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let uid = self.matrix.add_client(addr.ip().to_string());
                    info!(%addr, uid = %uid, "Connection accepted");

                    let connection = Connection::new(
                        uid,
                        stream,
                        addr,
                        Arc::clone(&self.matrix),
                        Arc::clone(&self.registry),
                        Arc::clone(&self.outbox),
                        self.limits.clone(),
                    );
                    tokio::spawn(connection.run());
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
