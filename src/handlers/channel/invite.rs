//! INVITE command handler.

use async_trait::async_trait;
use tinyirc_proto::{Message, MessageRef, Response};
use tracing::debug;

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

/// Handler for INVITE command.
///
/// `INVITE <nickname> <channel>`
///
/// Operator only. The invitation lets the target past `+i` once.
pub struct InviteHandler;

#[async_trait]
impl Handler for InviteHandler {
    fn min_params(&self) -> usize {
        2
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let target_nick = msg.arg(0).unwrap_or_default();
        let channel = msg.arg(1).unwrap_or_default();

        let target = ctx
            .matrix
            .invite_to_channel(ctx.uid, target_nick, channel)?;
        debug!(uid = %ctx.uid, target = %target_nick, channel = %channel, "Invited");

        ctx.send_numeric(Response::rpl_inviting(&ctx.nick(), target_nick, channel))
            .await;

        let line = Message::invite(target_nick, channel).with_prefix(ctx.prefix()?);
        ctx.matrix.send(&target, line).await;
        Ok(())
    }
}
