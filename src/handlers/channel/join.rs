//! JOIN command handler.

use async_trait::async_trait;
use tinyirc_proto::{Message, MessageRef};
use tracing::debug;

use crate::error::HandlerResult;
use crate::handlers::helpers::{require_channel_name, send_names, send_topic_reply};
use crate::handlers::{Context, Handler};

/// Handler for JOIN command.
///
/// `JOIN <channel> [key]`
///
/// Creates the channel (with the joiner as operator) if it doesn't exist.
/// On success every member, the joiner included, sees the JOIN; the joiner
/// then gets the topic and the names list.
pub struct JoinHandler;

#[async_trait]
impl Handler for JoinHandler {
    fn min_params(&self) -> usize {
        1
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let name = require_channel_name(msg.arg(0).unwrap_or_default())?;
        let key = msg.arg(1);

        let outcome = ctx.matrix.join_channel(ctx.uid, name, key)?;
        debug!(uid = %ctx.uid, channel = %name, members = outcome.members.len(), "Joined channel");

        let line = Message::join(name).with_prefix(ctx.prefix()?);
        ctx.matrix.send_all(&outcome.member_ids(), &line).await;

        send_topic_reply(ctx, name, &outcome.topic).await;
        send_names(ctx, name, &outcome.members).await;
        Ok(())
    }
}
