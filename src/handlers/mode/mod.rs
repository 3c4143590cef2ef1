//! MODE command handler.
//!
//! Channel modes: `i` (invite only), `t` (topic lock), `k` (key),
//! `l` (member limit) and `o` (operator). User modes only answer queries
//! about oneself.

mod parse;

use async_trait::async_trait;
use tinyirc_proto::{Message, MessageRef, Response};
use tracing::info;

use self::parse::{format_changes, parse_channel_modes};
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

/// Handler for MODE command.
///
/// `MODE <channel> [modestring [args...]]` or `MODE <nickname>`
pub struct ModeHandler;

#[async_trait]
impl Handler for ModeHandler {
    fn min_params(&self) -> usize {
        1
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let target = msg.arg(0).unwrap_or_default();
        if target.starts_with('#') {
            channel_mode(ctx, target, msg).await
        } else {
            user_mode(ctx, target).await
        }
    }
}

async fn user_mode(ctx: &Context<'_>, target: &str) -> HandlerResult {
    match ctx.matrix.resolve_nick(target) {
        Some(uid) if uid == ctx.uid => {
            ctx.send_numeric(Response::rpl_umodeis(&ctx.nick(), "+"))
                .await;
            Ok(())
        }
        Some(_) => Err(HandlerError::UsersDontMatch),
        None => Err(HandlerError::NoSuchNick(target.to_string())),
    }
}

async fn channel_mode(ctx: &Context<'_>, channel: &str, msg: &MessageRef<'_>) -> HandlerResult {
    if ctx.matrix.channel(channel).is_none() {
        return Err(HandlerError::NoSuchChannel(channel.to_string()));
    }

    let Some(modestring) = msg.arg(1) else {
        let (modes, args) = ctx.matrix.channel_modes(ctx.uid, channel)?;
        ctx.send_numeric(Response::rpl_channelmodeis(
            &ctx.nick(),
            channel,
            &modes,
            &args,
        ))
        .await;
        return Ok(());
    };

    ctx.matrix.require_channel_operator(ctx.uid, channel)?;
    let requests = parse_channel_modes(channel, modestring, &msg.args()[2..])?;
    let prefix = ctx.prefix()?;
    let outcome = ctx
        .matrix
        .change_channel_modes(ctx.uid, channel, requests)?;
    if outcome.applied.is_empty() {
        return Ok(());
    }

    let (modes, args) = format_changes(&outcome.applied);
    info!(channel = %channel, setter = %ctx.nick(), modes = %modes, "Channel modes changed");

    let line = Message::mode(channel, &modes, &args).with_prefix(prefix);
    ctx.matrix.send_all(&outcome.members, &line).await;
    Ok(())
}
