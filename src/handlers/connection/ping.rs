//! PING and PONG handlers.

use async_trait::async_trait;
use tinyirc_proto::{Message, MessageRef};

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

/// Handler for PING command.
pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    fn pre_registration(&self) -> bool {
        true
    }

    fn min_params(&self) -> usize {
        1
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // PING <token>
        let token = msg.arg(0).unwrap_or_default();
        ctx.send_numeric(Message::pong(ctx.server_name(), token))
            .await;
        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

#[async_trait]
impl Handler for PongHandler {
    fn pre_registration(&self) -> bool {
        true
    }

    async fn handle(&self, _ctx: &Context<'_>, _msg: &MessageRef<'_>) -> HandlerResult {
        Ok(())
    }
}
