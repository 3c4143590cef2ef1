//! Test server management.
//!
//! Spawns and manages tinyircd instances for integration testing.

use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use tempfile::TempDir;
use tokio::time::sleep;

/// Password every test client registers with.
pub const PASSWORD: &str = "letmein";

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    // Holds the generated config until the server is gone.
    _dir: TempDir,
}

impl TestServer {
    /// Spawn a server on a free local port with default limits.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with_limits("").await
    }

    /// Spawn a server with an extra `[limits]` body appended to the config.
    pub async fn spawn_with_limits(limits: &str) -> anyhow::Result<Self> {
        let port = free_port()?;
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("config.toml");
        let config_content = format!(
            r#"
[server]
name = "test.server"
network = "TestNet"
password = "{PASSWORD}"
description = "Test IRC Server"

[listen]
address = "127.0.0.1:{port}"

[limits]
{limits}
"#
        );
        std::fs::write(&config_path, config_content)?;

        let child = Command::new(env!("CARGO_BIN_EXE_tinyircd"))
            .arg(&config_path)
            .env("RUST_LOG", "warn")
            .stdout(Stdio::null())
            .spawn()?;

        let server = Self {
            child,
            port,
            _dir: dir,
        };
        server.wait_until_ready().await?;
        Ok(server)
    }

    /// Wait until the server is accepting connections.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Connect a client without registering it.
    pub async fn connect(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(&self.address(), nick).await
    }

    /// Connect and register a client.
    pub async fn register(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        let mut client = self.connect(nick).await?;
        client.register(PASSWORD).await?;
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
