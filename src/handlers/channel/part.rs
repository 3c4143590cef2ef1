//! PART command handler.

use async_trait::async_trait;
use tinyirc_proto::{Message, MessageRef};

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

/// Handler for PART command.
///
/// `PART <channel> [reason]`
pub struct PartHandler;

#[async_trait]
impl Handler for PartHandler {
    fn min_params(&self) -> usize {
        1
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let name = msg.arg(0).unwrap_or_default();
        let reason = msg.arg(1).unwrap_or_default();
        let prefix = ctx.prefix()?;

        let recipients = ctx.matrix.part_channel(ctx.uid, name)?;

        let line = Message::part(name, reason).with_prefix(prefix);
        ctx.matrix.send_all(&recipients, &line).await;
        Ok(())
    }
}
