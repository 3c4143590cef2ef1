//! Test IRC client.
//!
//! Provides an IRC client for integration testing that can send commands
//! and assert on received responses.

use std::time::Duration;

use tinyirc_proto::Message;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test IRC client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

#[allow(dead_code)]
impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            nick: nick.to_string(),
        })
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Send a raw IRC line; `\r\n` is appended if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with("\r\n") {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single message from the server.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a message with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Message> {
        let mut line = String::new();
        let read = timeout(dur, self.reader.read_line(&mut line)).await??;
        if read == 0 {
            anyhow::bail!("connection closed");
        }
        line.trim_end()
            .parse::<Message>()
            .map_err(|e| anyhow::anyhow!("Parse error: {e}"))
    }

    /// Receive messages until the predicate accepts one; returns them all.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<Message>>
    where
        F: FnMut(&Message) -> bool,
    {
        let mut messages = Vec::new();
        loop {
            let msg = self.recv().await?;
            let done = predicate(&msg);
            messages.push(msg);
            if done {
                break;
            }
        }
        Ok(messages)
    }

    /// Receive until the given numeric arrives and return it.
    pub async fn expect_numeric(&mut self, code: u16) -> anyhow::Result<Message> {
        let messages = self
            .recv_until(|msg| msg.numeric().is_some_and(|r| r.code() == code))
            .await?;
        messages
            .into_iter()
            .last()
            .ok_or_else(|| anyhow::anyhow!("no {code:03} received"))
    }

    /// Receive until a message with the given command arrives and return it.
    pub async fn expect_command(&mut self, command: &str) -> anyhow::Result<Message> {
        let messages = self.recv_until(|msg| msg.command == command).await?;
        messages
            .into_iter()
            .last()
            .ok_or_else(|| anyhow::anyhow!("no {command} received"))
    }

    /// Assert that nothing arrives for a short while.
    pub async fn expect_silence(&mut self) -> anyhow::Result<()> {
        match self.recv_timeout(Duration::from_millis(300)).await {
            Ok(msg) => anyhow::bail!("unexpected message: {msg}"),
            Err(_) => Ok(()),
        }
    }

    /// Register with the server (PASS + NICK + USER) and consume the
    /// welcome burst.
    pub async fn register(&mut self, password: &str) -> anyhow::Result<()> {
        self.send_raw(&format!("PASS {password}")).await?;
        self.send_raw(&format!("NICK {}", self.nick)).await?;
        self.send_raw(&format!("USER {0} 0 * :Test User {0}", self.nick))
            .await?;
        self.expect_numeric(1).await?;
        self.expect_numeric(3).await?;
        Ok(())
    }

    /// Join a channel and consume the replies up to end of names.
    pub async fn join(&mut self, channel: &str) -> anyhow::Result<Vec<Message>> {
        self.send_raw(&format!("JOIN {channel}")).await?;
        self.recv_until(|msg| msg.numeric().is_some_and(|r| r.code() == 366))
            .await
    }

    /// Send a PRIVMSG.
    pub async fn privmsg(&mut self, target: &str, text: &str) -> anyhow::Result<()> {
        self.send_raw(&format!("PRIVMSG {target} :{text}")).await
    }

    /// Send QUIT.
    pub async fn quit(&mut self, reason: &str) -> anyhow::Result<()> {
        self.send_raw(&format!("QUIT :{reason}")).await
    }
}
