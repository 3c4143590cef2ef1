//! Messaging handlers: PRIVMSG and NOTICE.
//!
//! Both route the same way; NOTICE never produces an error reply.

use async_trait::async_trait;
use tinyirc_proto::{Message, MessageRef};
use tracing::debug;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

/// Which of the two messaging commands is being routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Privmsg,
    Notice,
}

impl Kind {
    fn build(self, target: &str, text: &str) -> Message {
        match self {
            Self::Privmsg => Message::privmsg(target, text),
            Self::Notice => Message::notice(target, text),
        }
    }
}

/// Deliver `text` to a channel (every member but the sender) or to the
/// holder of a nickname.
async fn route(ctx: &Context<'_>, kind: Kind, target: &str, text: &str) -> HandlerResult {
    if text.is_empty() {
        return Err(HandlerError::NoTextToSend);
    }
    let line = kind.build(target, text).with_prefix(ctx.prefix()?);

    if target.starts_with('#') {
        let recipients = ctx.matrix.channel_recipients(ctx.uid, target)?;
        ctx.matrix.send_all(&recipients, &line).await;
    } else {
        let recipient = ctx
            .matrix
            .resolve_nick(target)
            .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
        ctx.matrix.send(&recipient, line).await;
    }
    Ok(())
}

/// Handler for PRIVMSG command.
///
/// `PRIVMSG <target> :<text>`
pub struct PrivmsgHandler;

#[async_trait]
impl Handler for PrivmsgHandler {
    fn min_params(&self) -> usize {
        2
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let target = msg.arg(0).unwrap_or_default();
        let text = msg.arg(1).unwrap_or_default();
        route(ctx, Kind::Privmsg, target, text).await
    }
}

/// Handler for NOTICE command.
///
/// `NOTICE <target> :<text>`
///
/// Accepted in any state so unregistered clients never get a reply; anything
/// undeliverable is dropped.
pub struct NoticeHandler;

#[async_trait]
impl Handler for NoticeHandler {
    fn pre_registration(&self) -> bool {
        true
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let (Some(target), Some(text)) = (msg.arg(0), msg.arg(1)) else {
            return Ok(());
        };
        if !ctx.is_registered() {
            return Ok(());
        }

        if let Err(e) = route(ctx, Kind::Notice, target, text).await {
            debug!(uid = %ctx.uid, target = %target, error = %e, "Dropped NOTICE");
        }
        Ok(())
    }
}
