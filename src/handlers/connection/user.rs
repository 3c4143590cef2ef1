//! USER handler.

use async_trait::async_trait;
use tinyirc_proto::MessageRef;

use super::welcome::try_register;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

/// Handler for USER command.
///
/// `USER <username> <hostname> <servername> :<realname>`
pub struct UserHandler;

#[async_trait]
impl Handler for UserHandler {
    fn pre_registration(&self) -> bool {
        true
    }

    fn min_params(&self) -> usize {
        4
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let (Some(username), Some(hostname), Some(realname)) = (msg.arg(0), msg.arg(1), msg.arg(3))
        else {
            return Err(HandlerError::NeedMoreParams);
        };

        let client = ctx.client()?;
        {
            let mut client = client.write();
            if client.user.is_some() {
                return Err(HandlerError::AlreadyRegistered);
            }
            client.user = Some(username.to_string());
            client.hostname = Some(hostname.to_string());
            client.realname = realname.strip_prefix(':').unwrap_or(realname).to_string();
        }

        try_register(ctx).await
    }
}
