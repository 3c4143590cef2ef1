//! Reply helpers shared by several handlers.

use tinyirc_proto::{ChannelExt, Response};

use super::core::Context;
use crate::error::HandlerError;

/// Reject anything that isn't a well-formed channel name with 403.
pub fn require_channel_name(name: &str) -> Result<&str, HandlerError> {
    if name.is_channel_name() {
        Ok(name)
    } else {
        Err(HandlerError::NoSuchChannel(name.to_string()))
    }
}

/// 331 or 332 depending on whether a topic is set.
pub async fn send_topic_reply(ctx: &Context<'_>, channel: &str, topic: &str) {
    let nick = ctx.nick();
    let reply = if topic.is_empty() {
        Response::rpl_notopic(&nick, channel)
    } else {
        Response::rpl_topic(&nick, channel, topic)
    };
    ctx.send_numeric(reply).await;
}

/// 353 followed by 366, operators marked with `@`.
pub async fn send_names(ctx: &Context<'_>, channel: &str, members: &[(String, bool)]) {
    let nick = ctx.nick();
    let names: Vec<String> = members
        .iter()
        .filter_map(|(uid, op)| {
            let member = ctx.matrix.nick_of(uid)?;
            Some(if *op { format!("@{member}") } else { member })
        })
        .collect();

    ctx.send_numeric(Response::rpl_namreply(&nick, channel, &names))
        .await;
    ctx.send_numeric(Response::rpl_endofnames(&nick, channel)).await;
}
