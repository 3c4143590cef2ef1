//! Command handler registry and dispatch.

use std::collections::HashMap;

use tinyirc_proto::MessageRef;
use tracing::{Instrument, Level, debug, span};

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{
    channel::{InviteHandler, JoinHandler, KickHandler, PartHandler, TopicHandler},
    connection::{
        CapHandler, NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler,
    },
    messaging::{NoticeHandler, PrivmsgHandler},
    mode::ModeHandler,
};

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // Connection/registration handlers
        handlers.insert("PASS", Box::new(PassHandler));
        handlers.insert("NICK", Box::new(NickHandler));
        handlers.insert("USER", Box::new(UserHandler));
        handlers.insert("PING", Box::new(PingHandler));
        handlers.insert("PONG", Box::new(PongHandler));
        handlers.insert("QUIT", Box::new(QuitHandler));
        handlers.insert("CAP", Box::new(CapHandler));

        // Channel handlers
        handlers.insert("JOIN", Box::new(JoinHandler));
        handlers.insert("PART", Box::new(PartHandler));
        handlers.insert("INVITE", Box::new(InviteHandler));
        handlers.insert("KICK", Box::new(KickHandler));
        handlers.insert("TOPIC", Box::new(TopicHandler));
        handlers.insert("MODE", Box::new(ModeHandler));

        // Messaging handlers
        handlers.insert("PRIVMSG", Box::new(PrivmsgHandler));
        handlers.insert("NOTICE", Box::new(NoticeHandler));

        Self { handlers }
    }

    /// Dispatch a message to the appropriate handler.
    ///
    /// Enforces registration and minimum parameter count before the handler
    /// runs, and sends the one numeric reply for any error it returns. Only
    /// [`HandlerError::Quit`] is passed back, telling the connection to close.
    pub async fn dispatch(&self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let cmd_name = msg.command_name().to_ascii_uppercase();
        let registered = ctx.is_registered();

        let result = match self.handlers.get(cmd_name.as_str()) {
            None if registered => Err(HandlerError::UnknownCommand(cmd_name.clone())),
            None => Err(HandlerError::NotRegistered),
            Some(handler) if !registered && !handler.pre_registration() => {
                Err(HandlerError::NotRegistered)
            }
            Some(handler) if msg.args().len() < handler.min_params() => {
                Err(HandlerError::NeedMoreParams)
            }
            Some(handler) => {
                let irc_span = span!(
                    Level::DEBUG,
                    "irc.command",
                    command = %cmd_name,
                    uid = %ctx.uid,
                    channel = msg.arg(0).filter(|a| a.starts_with('#')),
                );
                handler.handle(ctx, msg).instrument(irc_span).await
            }
        };

        match result {
            Ok(()) => Ok(()),
            Err(HandlerError::Quit(reason)) => Err(HandlerError::Quit(reason)),
            Err(e) => {
                debug!(command = %cmd_name, uid = %ctx.uid, error = %e, code = e.error_code(), "Command error");
                if let Some(reply) = e.to_irc_reply(ctx.server_name(), &ctx.nick(), &cmd_name) {
                    ctx.reply(reply).await;
                }
                Ok(())
            }
        }
    }
}
