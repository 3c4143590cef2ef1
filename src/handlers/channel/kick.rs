//! KICK command handler.

use async_trait::async_trait;
use tinyirc_proto::{Message, MessageRef};
use tracing::info;

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

/// Handler for KICK command.
///
/// `KICK <channel> <nickname> [reason]`
///
/// Every member, the target included, sees the KICK.
pub struct KickHandler;

#[async_trait]
impl Handler for KickHandler {
    fn min_params(&self) -> usize {
        2
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let channel = msg.arg(0).unwrap_or_default();
        let target_nick = msg.arg(1).unwrap_or_default();
        let reason = msg.arg(2).unwrap_or_default();
        let prefix = ctx.prefix()?;

        let (recipients, target) = ctx.matrix.kick_member(ctx.uid, channel, target_nick)?;
        info!(
            channel = %channel,
            kicker = %ctx.nick(),
            target = %target_nick,
            target_uid = %target,
            "Member kicked"
        );

        let line = Message::kick(channel, target_nick, reason).with_prefix(prefix);
        ctx.matrix.send_all(&recipients, &line).await;
        Ok(())
    }
}
