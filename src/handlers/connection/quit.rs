//! QUIT handler for terminating client sessions.

use async_trait::async_trait;
use tinyirc_proto::{Message, MessageRef};
use tracing::info;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

/// Reason used when QUIT carries none.
const DEFAULT_QUIT_REASON: &str = "Client Quit";

/// Handler for QUIT command.
///
/// Sends `ERROR :Closing Link` to the quitter and signals the connection to
/// close; the connection then runs the disconnect path with the reason.
pub struct QuitHandler;

#[async_trait]
impl Handler for QuitHandler {
    fn pre_registration(&self) -> bool {
        true
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let reason = msg
            .arg(0)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_QUIT_REASON);
        let host = ctx.client()?.read().host.clone();

        info!(uid = %ctx.uid, nick = %ctx.nick(), reason = %reason, "Client quit");

        ctx.reply(Message::error(&format!("Closing Link: {host} ({reason})")))
            .await;
        Err(HandlerError::Quit(Some(reason.to_string())))
    }
}
