//! NICK handler.

use async_trait::async_trait;
use tinyirc_proto::{Message, MessageRef, NickExt};
use tracing::debug;

use super::welcome::try_register;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};
use crate::state::NickChange;

/// Handler for NICK command.
///
/// `NICK <nickname>`
///
/// Before registration the nickname is only claimed when registration
/// completes. After it, the rename is announced once to everyone sharing a
/// channel with the client.
pub struct NickHandler;

#[async_trait]
impl Handler for NickHandler {
    fn pre_registration(&self) -> bool {
        true
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let nick = msg.arg(0).unwrap_or_default().trim_start();
        if nick.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        if ctx.matrix.nick_taken_by_other(ctx.uid, nick) {
            if let Some(client) = ctx.matrix.client(ctx.uid) {
                client.write().mark_nick_collision();
            }
            return Err(HandlerError::NicknameInUse(nick.to_string()));
        }

        if !nick.is_valid_nick() {
            return Err(HandlerError::ErroneousNickname(nick.to_string()));
        }

        let old_prefix = ctx.prefix()?;
        let registered = ctx.is_registered();

        match ctx.matrix.change_nick(ctx.uid, nick)? {
            NickChange::Unchanged => Ok(()),
            NickChange::Changed { old } if registered => {
                let peers = ctx.matrix.peers_of(ctx.uid);
                debug!(old = ?old, new = %nick, peers = peers.len(), "Announcing nick change");
                let line = Message::nick(nick).with_prefix(old_prefix);
                ctx.matrix.send_all(&peers, &line).await;
                Ok(())
            }
            NickChange::Changed { .. } => try_register(ctx).await,
        }
    }
}
