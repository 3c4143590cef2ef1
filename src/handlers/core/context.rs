//! Command handler context and the `Handler` trait.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tinyirc_proto::{Message, MessageRef, Prefix};

use crate::error::{HandlerError, HandlerResult};
use crate::state::{Client, Matrix};

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The connection's unique ID.
    pub uid: &'a str,
    /// Shared server state.
    pub matrix: &'a Matrix,
}

impl<'a> Context<'a> {
    pub fn new(uid: &'a str, matrix: &'a Matrix) -> Self {
        Self { uid, matrix }
    }

    /// This connection's client record.
    pub fn client(&self) -> Result<Arc<RwLock<Client>>, HandlerError> {
        self.matrix
            .client(self.uid)
            .ok_or_else(|| HandlerError::Internal(format!("no client {}", self.uid)))
    }

    /// Nickname for addressing numerics, `*` before one is set.
    pub fn nick(&self) -> String {
        self.matrix
            .nick_of(self.uid)
            .unwrap_or_else(|| "*".to_string())
    }

    /// `nick!user@host` of this connection.
    pub fn prefix(&self) -> Result<Prefix, HandlerError> {
        Ok(self.client()?.read().prefix())
    }

    pub fn is_registered(&self) -> bool {
        self.matrix
            .client(self.uid)
            .is_some_and(|c| c.read().is_registered())
    }

    pub fn server_name(&self) -> &str {
        self.matrix.server_name()
    }

    /// Send a message to this connection as is.
    pub async fn reply(&self, msg: Message) {
        self.matrix.send(self.uid, msg).await;
    }

    /// Send a numeric to this connection with the server as its prefix.
    pub async fn send_numeric(&self, msg: Message) {
        self.reply(msg.with_prefix(self.matrix.server_prefix())).await;
    }
}

/// A command handler.
///
/// Handlers validate, mutate shared state through the [`Matrix`] and send
/// replies. Every protocol fault is returned as a [`HandlerError`]; the
/// registry turns it into the matching numeric.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult;

    /// Fewer parameters than this yield ERR_NEEDMOREPARAMS without running
    /// the handler.
    fn min_params(&self) -> usize {
        0
    }

    /// Whether the command may be used before registration completes.
    fn pre_registration(&self) -> bool {
        false
    }
}
