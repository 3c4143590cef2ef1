//! The Matrix - central shared state for the server.
//!
//! The Matrix holds all clients, the nickname index and all channels in
//! concurrent maps accessible from any connection task.
//!
//! # Locking
//!
//! Each client and each channel sits behind its own `parking_lot::RwLock`.
//! Locks are taken in the order channel-table shard, then channel, then
//! client; the nickname index is only ever locked on its own. Guards are
//! `!Send`, so none can be held across the `.await` of a send: every
//! operation snapshots its recipients under the lock, releases it, and only
//! then delivers.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tinyirc_proto::{Message, Prefix};
use tracing::debug;

use super::uid::UidGenerator;
use super::{Channel, Client, Responder, Uid};
use crate::config::ServerConfig;

/// This server's identity, as shown in the welcome burst.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub network: String,
    pub version: String,
    pub description: String,
    /// Human readable start time (RPL_CREATED).
    pub created: String,
}

impl ServerInfo {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            name: config.name.clone(),
            network: config.network.clone(),
            version: format!("tinyircd-{}", env!("CARGO_PKG_VERSION")),
            description: config.description.clone(),
            created: chrono::Utc::now()
                .format("%a %b %e %Y at %H:%M:%S UTC")
                .to_string(),
        }
    }
}

/// The Matrix - central shared state container.
pub struct Matrix {
    /// All connected clients, indexed by connection id.
    pub clients: DashMap<Uid, Arc<RwLock<Client>>>,

    /// Nicknames of registered clients to connection id. Exact-match keys.
    pub nicks: DashMap<String, Uid>,

    /// All channels, indexed by exact name.
    pub channels: DashMap<String, Arc<RwLock<Channel>>>,

    /// This server's identity.
    pub server_info: ServerInfo,

    /// Connection id generator for new connections.
    pub uid_gen: UidGenerator,

    password: String,
    responder: Arc<dyn Responder>,
}

impl Matrix {
    pub fn new(config: &ServerConfig, responder: Arc<dyn Responder>) -> Self {
        Self {
            clients: DashMap::new(),
            nicks: DashMap::new(),
            channels: DashMap::new(),
            server_info: ServerInfo::from_config(config),
            uid_gen: UidGenerator::new(),
            password: config.password.clone(),
            responder,
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_info.name
    }

    pub fn server_prefix(&self) -> Prefix {
        Prefix::ServerName(self.server_info.name.clone())
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        candidate == self.password
    }

    /// Create the client record for a freshly accepted connection.
    pub fn add_client(&self, host: String) -> Uid {
        let uid = self.uid_gen.next();
        let client = Client::new(uid.clone(), host);
        self.clients.insert(uid.clone(), Arc::new(RwLock::new(client)));
        debug!(uid = %uid, "Client added");
        uid
    }

    pub fn client(&self, uid: &str) -> Option<Arc<RwLock<Client>>> {
        self.clients.get(uid).map(|c| Arc::clone(c.value()))
    }

    pub fn channel(&self, name: &str) -> Option<Arc<RwLock<Channel>>> {
        self.channels.get(name).map(|c| Arc::clone(c.value()))
    }

    /// Connection id currently holding `nick`.
    pub fn resolve_nick(&self, nick: &str) -> Option<Uid> {
        self.nicks.get(nick).map(|uid| uid.value().clone())
    }

    pub fn nick_of(&self, uid: &str) -> Option<String> {
        self.client(uid).and_then(|c| c.read().nick.clone())
    }

    /// Deliver one message to one connection.
    pub async fn send(&self, uid: &str, msg: Message) {
        self.responder.send(uid, msg).await;
    }

    /// Deliver a copy of `msg` to each connection in `uids`.
    pub async fn send_all(&self, uids: &[Uid], msg: &Message) {
        for uid in uids {
            self.responder.send(uid, msg.clone()).await;
        }
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}
