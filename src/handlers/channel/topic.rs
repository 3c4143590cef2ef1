//! TOPIC command handler.

use async_trait::async_trait;
use tinyirc_proto::{Message, MessageRef};

use crate::error::HandlerResult;
use crate::handlers::helpers::send_topic_reply;
use crate::handlers::{Context, Handler};

/// Handler for TOPIC command.
///
/// `TOPIC <channel>` queries, `TOPIC <channel> :<text>` sets, and an empty
/// text clears.
pub struct TopicHandler;

#[async_trait]
impl Handler for TopicHandler {
    fn min_params(&self) -> usize {
        1
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let channel = msg.arg(0).unwrap_or_default();

        let Some(text) = msg.arg(1) else {
            let topic = ctx.matrix.channel_topic(ctx.uid, channel)?;
            send_topic_reply(ctx, channel, &topic).await;
            return Ok(());
        };

        let prefix = ctx.prefix()?;
        let recipients = ctx.matrix.set_channel_topic(ctx.uid, channel, text)?;

        // Clearing is announced as an empty TOPIC; queries then get RPL_NOTOPIC.
        let line = Message::topic(channel, text).with_prefix(prefix);
        ctx.matrix.send_all(&recipients, &line).await;
        Ok(())
    }
}
