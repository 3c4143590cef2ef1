//! CAP handler.

use async_trait::async_trait;
use tinyirc_proto::MessageRef;
use tracing::debug;

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

/// Handler for CAP command.
///
/// No capabilities are offered; clients probing with `CAP LS` get no answer
/// and carry on with plain registration.
pub struct CapHandler;

#[async_trait]
impl Handler for CapHandler {
    fn pre_registration(&self) -> bool {
        true
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        debug!(uid = %ctx.uid, subcommand = ?msg.arg(0), "Ignoring CAP");
        Ok(())
    }
}
