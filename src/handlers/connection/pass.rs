//! PASS handler.

use async_trait::async_trait;
use tinyirc_proto::MessageRef;
use tracing::warn;

use super::welcome::try_register;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

/// Handler for PASS command.
///
/// `PASS <password>`
pub struct PassHandler;

#[async_trait]
impl Handler for PassHandler {
    fn pre_registration(&self) -> bool {
        true
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let password = msg.arg(0).unwrap_or_default();
        if password.trim().is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        let client = ctx.client()?;
        let accepted = client.read().state.password_accepted();
        if accepted {
            return Err(HandlerError::AlreadyRegistered);
        }

        if !ctx.matrix.check_password(password) {
            warn!(uid = %ctx.uid, "Password mismatch");
            return Err(HandlerError::PasswordMismatch);
        }

        client.write().accept_password();

        // NICK and USER may already be in.
        try_register(ctx).await
    }
}
