//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task:
//!
//! ```text
//!  socket ──▶ FramedRead<LineCodec> ──▶ Registry::dispatch ──▶ Matrix
//!                                                                │
//!  socket ◀── FramedWrite<LineCodec> ◀── writer task ◀── mpsc ◀──┘
//! ```
//!
//! Commands from one connection are handled strictly in order. Outgoing
//! lines from any task go through the connection's bounded queue, which a
//! separate writer task drains. If that queue overflows the connection is
//! evicted and torn down like any other disconnect.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tinyirc_proto::{LineCodec, Message, MessageRef, ProtocolError};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, instrument, warn};

use crate::config::LimitsConfig;
use crate::error::HandlerError;
use crate::handlers::{Context, Registry};
use crate::state::{Matrix, Outbox, Uid};

/// Quit reason when the transport goes away.
const CONNECTION_CLOSED: &str = "Connection closed";

/// A client connection handler.
pub struct Connection {
    uid: Uid,
    addr: SocketAddr,
    matrix: Arc<Matrix>,
    registry: Arc<Registry>,
    outbox: Arc<Outbox>,
    limits: LimitsConfig,
    stream: TcpStream,
}

impl Connection {
    /// Create a new connection handler for an accepted stream whose client
    /// record already exists.
    pub fn new(
        uid: Uid,
        stream: TcpStream,
        addr: SocketAddr,
        matrix: Arc<Matrix>,
        registry: Arc<Registry>,
        outbox: Arc<Outbox>,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            uid,
            addr,
            matrix,
            registry,
            outbox,
            limits,
            stream,
        }
    }

    /// Serve the connection until QUIT, EOF or a transport error, then tear
    /// the client down.
    #[instrument(skip(self), fields(uid = %self.uid, addr = %self.addr), name = "connection")]
    pub async fn run(self) {
        let Self {
            uid,
            matrix,
            registry,
            outbox,
            limits,
            stream,
            ..
        } = self;

        let (read_half, write_half) = stream.into_split();
        let reader = FramedRead::new(read_half, LineCodec::with_max_len(limits.max_line_len));
        let writer = FramedWrite::new(write_half, LineCodec::with_max_len(limits.max_line_len));

        let (tx, rx) = mpsc::channel(limits.sendq.max(1));
        let mut evicted = outbox.register(&uid, tx);
        let writer_task = tokio::spawn(write_loop(writer, rx));

        info!("Client connected");
        let (reason, was_evicted) = tokio::select! {
            reason = read_loop(&uid, &matrix, &registry, reader) => (reason, false),
            Ok(reason) = &mut evicted => (reason.to_string(), true),
        };

        matrix.disconnect(&uid, &reason).await;
        if was_evicted || evicted.try_recv().is_ok() {
            // The writer may be stuck on a peer that stopped reading.
            writer_task.abort();
        } else {
            // Dropping the last sender lets the writer flush what's queued and stop.
            outbox.unregister(&uid);
            if let Err(e) = writer_task.await {
                warn!(error = %e, "Writer task failed");
            }
        }
        info!(reason = %reason, "Client connection closed");
    }
}

/// Read and dispatch lines until the session ends. Returns the quit reason.
async fn read_loop(
    uid: &str,
    matrix: &Matrix,
    registry: &Registry,
    mut reader: FramedRead<OwnedReadHalf, LineCodec>,
) -> String {
    loop {
        let line = match reader.next().await {
            Some(Ok(line)) => line,
            Some(Err(ProtocolError::MessageTooLong { actual, limit })) => {
                warn!(actual, limit, "Line too long, closing connection");
                return CONNECTION_CLOSED.to_string();
            }
            Some(Err(e)) => {
                debug!(error = %e, "Read error");
                return CONNECTION_CLOSED.to_string();
            }
            None => {
                debug!("Peer closed connection");
                return CONNECTION_CLOSED.to_string();
            }
        };

        let msg = match MessageRef::parse(&line) {
            Ok(msg) => msg,
            Err(e) => {
                debug!(error = %e, line = %line, "Ignoring unparseable line");
                continue;
            }
        };

        let ctx = Context::new(uid, matrix);
        if let Err(e) = registry.dispatch(&ctx, &msg).await {
            return match e {
                HandlerError::Quit(Some(reason)) => reason,
                other => other.to_string(),
            };
        }
    }
}

/// Drain the outbound queue onto the socket.
async fn write_loop(
    mut writer: FramedWrite<OwnedWriteHalf, LineCodec>,
    mut rx: mpsc::Receiver<Message>,
) {
    while let Some(msg) = rx.recv().await {
        if let Err(e) = writer.send(msg.to_string()).await {
            debug!(error = %e, "Write failed, dropping outbound queue");
            break;
        }
    }
}
