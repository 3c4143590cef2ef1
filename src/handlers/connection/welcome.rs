//! Registration completion and the welcome burst.

use tinyirc_proto::{Prefix, Response};
use tracing::info;

use crate::error::HandlerResult;
use crate::handlers::Context;

/// Complete registration if password, nickname and username are all in.
///
/// Fails with ERR_NICKNAMEINUSE if another connection registered the
/// nickname in the meantime.
pub(super) async fn try_register(ctx: &Context<'_>) -> HandlerResult {
    if !ctx.matrix.complete_registration(ctx.uid)? {
        return Ok(());
    }

    let (uid, prefix, hostname, realname) = {
        let client = ctx.client()?;
        let client = client.read();
        (
            client.uid.clone(),
            client.prefix(),
            client.hostname.clone(),
            client.realname.clone(),
        )
    };
    info!(
        uid = %uid,
        mask = %prefix,
        claimed_host = ?hostname,
        realname = %realname,
        "Client registered"
    );
    send_welcome_burst(ctx, &prefix).await;
    Ok(())
}

async fn send_welcome_burst(ctx: &Context<'_>, prefix: &Prefix) {
    let nick = ctx.nick();
    let info = &ctx.matrix.server_info;

    ctx.send_numeric(Response::rpl_welcome(
        &nick,
        &info.network,
        &prefix.to_string(),
    ))
    .await;
    ctx.send_numeric(Response::rpl_yourhost(&nick, &info.name, &info.version))
        .await;
    ctx.send_numeric(Response::rpl_created(&nick, &info.created))
        .await;
}
