//! Error handling for tinyircd.
//!
//! Every protocol fault a command can hit is a [`HandlerError`] variant, and
//! every variant maps to exactly one numeric reply (or none, for the few that
//! end or abort processing instead).

use thiserror::Error;
use tinyirc_proto::{Message, Prefix, Response};

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("password incorrect")]
    PasswordMismatch,

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("not registered")]
    NotRegistered,

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no text to send")]
    NoTextToSend,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("unknown mode {mode} for {channel}")]
    UnknownMode { mode: char, channel: String },

    #[error("cannot change mode for other users")]
    UsersDontMatch,

    #[error("{channel}: {source}")]
    Channel {
        channel: String,
        #[source]
        source: ChannelError,
    },

    #[error("client quit: {0:?}")]
    Quit(Option<String>),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::AlreadyRegistered => "already_registered",
            Self::PasswordMismatch => "password_mismatch",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NotRegistered => "not_registered",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::NoTextToSend => "no_text_to_send",
            Self::UnknownCommand(_) => "unknown_command",
            Self::UnknownMode { .. } => "unknown_mode",
            Self::UsersDontMatch => "users_dont_match",
            Self::Channel { source, .. } => source.error_code(),
            Self::Quit(_) => "quit",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Convert to a numeric reply addressed to `nick`.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply
    /// (quit, internal errors).
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let msg = match self {
            Self::NeedMoreParams => Response::err_needmoreparams(nick, cmd_name),
            Self::AlreadyRegistered => Response::err_alreadyregistered(nick),
            Self::PasswordMismatch => Response::err_passwdmismatch(nick),
            Self::NicknameInUse(bad_nick) => Response::err_nicknameinuse(nick, bad_nick),
            Self::ErroneousNickname(bad_nick) => Response::err_erroneousnickname(nick, bad_nick),
            Self::NotRegistered => Response::err_notregistered(nick),
            Self::NoSuchChannel(bad_chan) => Response::err_nosuchchannel(nick, bad_chan),
            Self::NoSuchNick(target) => Response::err_nosuchnick(nick, target),
            Self::NoTextToSend => Response::err_notexttosend(nick),
            Self::UnknownCommand(cmd) => Response::err_unknowncommand(nick, cmd),
            Self::UnknownMode { mode, channel } => Response::err_unknownmode(nick, *mode, channel),
            Self::UsersDontMatch => Response::err_usersdontmatch(nick),
            Self::Channel { channel, source } => return Some(source.to_irc_reply(server_name, nick, channel)),

            Self::Quit(_) | Self::Internal(_) => return None,
        };

        Some(msg.with_prefix(Prefix::ServerName(server_name.to_string())))
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Channel Errors (membership and privilege rules)
// ============================================================================

/// Channel rule violations.
///
/// Raised by [`crate::state::Channel`] checks; the channel name is attached
/// when the error is lifted into a [`HandlerError`] with [`ChannelError::on`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("not on channel")]
    NotOnChannel,

    #[error("you're not channel operator")]
    ChanOpPrivsNeeded,

    #[error("user {0} is not on that channel")]
    UserNotInChannel(String),

    #[error("user {0} is already on that channel")]
    UserOnChannel(String),

    #[error("cannot join channel (+i)")]
    InviteOnlyChan,

    #[error("cannot join channel (+l)")]
    ChannelIsFull,

    #[error("cannot join channel (+k)")]
    BadChannelKey,
}

impl ChannelError {
    /// Attach the channel this error concerns.
    pub fn on(self, channel: &str) -> HandlerError {
        HandlerError::Channel {
            channel: channel.to_string(),
            source: self,
        }
    }

    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotOnChannel => "not_on_channel",
            Self::ChanOpPrivsNeeded => "chanop_privs_needed",
            Self::UserNotInChannel(_) => "user_not_in_channel",
            Self::UserOnChannel(_) => "user_on_channel",
            Self::InviteOnlyChan => "invite_only_chan",
            Self::ChannelIsFull => "channel_is_full",
            Self::BadChannelKey => "bad_channel_key",
        }
    }

    /// Convert to a numeric reply addressed to `nick`.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, channel: &str) -> Message {
        let msg = match self {
            Self::NotOnChannel => Response::err_notonchannel(nick, channel),
            Self::ChanOpPrivsNeeded => Response::err_chanoprivsneeded(nick, channel),
            Self::UserNotInChannel(target) => Response::err_usernotinchannel(nick, target, channel),
            Self::UserOnChannel(target) => Response::err_useronchannel(nick, target, channel),
            Self::InviteOnlyChan => Response::err_inviteonlychan(nick, channel),
            Self::ChannelIsFull => Response::err_channelisfull(nick, channel),
            Self::BadChannelKey => Response::err_badchannelkey(nick, channel),
        };

        msg.with_prefix(Prefix::ServerName(server_name.to_string()))
    }
}

// ============================================================================
// State Errors (registry invariants)
// ============================================================================

/// Violations of the server registry's own invariants.
///
/// These indicate a bug rather than a client mistake and are logged at error
/// level rather than replied to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("client {0} not found")]
    UnknownClient(String),

    #[error("client {uid} still belongs to {channels:?}")]
    StillInChannels { uid: String, channels: Vec<String> },
}
