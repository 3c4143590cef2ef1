//! Messages in both directions.
//!
//! [`MessageRef`] is the borrowed form handed to command handlers;
//! [`Message`] is the owned form the server builds and writes out.
//!
//! # Serialization
//!
//! `Display` renders the complete wire line including `\r\n`. The last
//! parameter is written as a `:trailing` parameter when it is empty, contains
//! a space or starts with `:`; otherwise it is written bare.

mod borrowed;
mod parser;

use std::fmt;
use std::str::FromStr;

pub use self::borrowed::MessageRef;
pub use self::parser::MAX_PARAMS;

use crate::error::MessageParseError;
use crate::prefix::Prefix;
use crate::response::Response;

/// An owned protocol line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Origin of the message, if any.
    pub prefix: Option<Prefix>,
    /// Command name or three digit numeric.
    pub command: String,
    /// Parameters, the trailing one included.
    pub params: Vec<String>,
}

impl Message {
    /// Create an unprefixed message.
    pub fn new<S: Into<String>>(command: impl Into<String>, params: impl IntoIterator<Item = S>) -> Self {
        Self {
            prefix: None,
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a numeric reply.
    pub fn response(response: Response, params: Vec<String>) -> Self {
        Self {
            prefix: None,
            command: response.to_string(),
            params,
        }
    }

    /// Attach a prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// The numeric code, if this is a numeric reply.
    pub fn numeric(&self) -> Option<Response> {
        self.command.parse().ok()
    }

    /// True if this is the given numeric reply.
    pub fn is_response(&self, response: Response) -> bool {
        self.numeric() == Some(response)
    }

    /// Parameter at `index`.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Name carried in the prefix (nickname or server name).
    pub fn source_nick(&self) -> Option<&str> {
        self.prefix.as_ref().map(Prefix::name)
    }

    /// `PRIVMSG <target> :<text>`
    pub fn privmsg(target: &str, text: &str) -> Self {
        Self::new("PRIVMSG", [target, text])
    }

    /// `NOTICE <target> :<text>`
    pub fn notice(target: &str, text: &str) -> Self {
        Self::new("NOTICE", [target, text])
    }

    /// `JOIN <channel>`
    pub fn join(channel: &str) -> Self {
        Self::new("JOIN", [channel])
    }

    /// `PART <channel> :<reason>`
    pub fn part(channel: &str, reason: &str) -> Self {
        Self::new("PART", [channel, reason])
    }

    /// `KICK <channel> <nick> :<reason>`
    pub fn kick(channel: &str, nick: &str, reason: &str) -> Self {
        Self::new("KICK", [channel, nick, reason])
    }

    /// `INVITE <nick> <channel>`
    pub fn invite(nick: &str, channel: &str) -> Self {
        Self::new("INVITE", [nick, channel])
    }

    /// `TOPIC <channel> :<text>`
    pub fn topic(channel: &str, text: &str) -> Self {
        Self::new("TOPIC", [channel, text])
    }

    /// `NICK <nick>`
    pub fn nick(nick: &str) -> Self {
        Self::new("NICK", [nick])
    }

    /// `QUIT :<reason>`
    pub fn quit(reason: &str) -> Self {
        Self::new("QUIT", [reason])
    }

    /// `MODE <target> <modestring> [args...]`
    pub fn mode(target: &str, modes: &str, args: &[String]) -> Self {
        let mut params = Vec::with_capacity(args.len() + 2);
        params.push(target.to_string());
        params.push(modes.to_string());
        params.extend(args.iter().cloned());
        Self::new("MODE", params)
    }

    /// `PONG <server> :<token>`
    pub fn pong(server: &str, token: &str) -> Self {
        Self::new("PONG", [server, token])
    }

    /// `ERROR :<text>`
    pub fn error(text: &str) -> Self {
        Self::new("ERROR", [text])
    }
}

fn needs_trailing(param: &str) -> bool {
    param.is_empty() || param.contains(' ') || param.starts_with(':')
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{prefix} ")?;
        }
        f.write_str(&self.command)?;

        if let Some((last, middle)) = self.params.split_last() {
            for param in middle {
                write!(f, " {param}")?;
            }
            if needs_trailing(last) {
                write!(f, " :{last}")?;
            } else {
                write!(f, " {last}")?;
            }
        }

        f.write_str("\r\n")
    }
}

impl FromStr for Message {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let msg = MessageRef::parse(s)?;
        Ok(Self {
            prefix: msg.prefix().map(Prefix::parse),
            command: msg.command_name().to_string(),
            params: msg.args().iter().map(|a| a.to_string()).collect(),
        })
    }
}

impl<'a> From<&MessageRef<'a>> for Message {
    fn from(msg: &MessageRef<'a>) -> Self {
        Self {
            prefix: msg.prefix().map(Prefix::parse),
            command: msg.command_name().to_string(),
            params: msg.args().iter().map(|a| a.to_string()).collect(),
        }
    }
}
