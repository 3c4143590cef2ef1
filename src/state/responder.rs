//! Delivery of outgoing lines to connections.

use async_trait::async_trait;
use dashmap::DashMap;
use tinyirc_proto::Message;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::Uid;

/// Sends one message to one connection.
///
/// Fire-and-forget: delivery to a connection that is gone is silently
/// dropped, and a send never waits on a slow reader. Never call this while
/// holding a client or channel lock.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn send(&self, uid: &str, msg: Message);
}

/// Quit reason for a connection evicted because its queue filled up.
pub const SENDQ_EXCEEDED: &str = "SendQ exceeded";

/// One connection's outbound queue and its eviction signal.
#[derive(Debug)]
struct Peer {
    queue: mpsc::Sender<Message>,
    evict: oneshot::Sender<&'static str>,
}

/// Per-connection outbound queues, keyed by connection id.
///
/// Each connection task registers the sending half of its bounded write
/// queue on accept and unregisters it on disconnect; dropping the last
/// sender lets the writer drain and close.
///
/// Sends never wait. A connection whose queue is full is evicted: its queue
/// is dropped and its task is told to disconnect with [`SENDQ_EXCEEDED`].
#[derive(Debug, Default)]
pub struct Outbox {
    peers: DashMap<Uid, Peer>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's queue. The returned receiver fires if the
    /// connection is evicted.
    pub fn register(
        &self,
        uid: &str,
        queue: mpsc::Sender<Message>,
    ) -> oneshot::Receiver<&'static str> {
        let (evict, evicted) = oneshot::channel();
        self.peers.insert(uid.to_string(), Peer { queue, evict });
        evicted
    }

    pub fn unregister(&self, uid: &str) {
        self.peers.remove(uid);
    }

    fn evict(&self, uid: &str, reason: &'static str) {
        if let Some((_, peer)) = self.peers.remove(uid) {
            warn!(uid = %uid, reason, "Evicting connection");
            let _ = peer.evict.send(reason);
        }
    }
}

#[async_trait]
impl Responder for Outbox {
    async fn send(&self, uid: &str, msg: Message) {
        // Clone the sender out so no map guard is held while evicting.
        let Some(queue) = self.peers.get(uid).map(|peer| peer.queue.clone()) else {
            debug!(uid = %uid, "Dropping message for unknown connection");
            return;
        };
        match queue.try_send(msg) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => self.evict(uid, SENDQ_EXCEEDED),
            Err(TrySendError::Closed(_)) => {
                debug!(uid = %uid, "Dropping message for closed connection");
            }
        }
    }
}
