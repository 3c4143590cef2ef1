//! Message prefix types.
//!
//! A prefix identifies the origin of a message: either the server itself or
//! a user's `nick!user@host` mask.

use std::fmt;

/// Origin of a message.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Prefix {
    /// Server name (e.g., "irc.example.com").
    ServerName(String),
    /// User prefix: (nickname, username, hostname).
    Nickname(String, String, String),
}

impl Prefix {
    /// Create a user prefix from nick, user and host components.
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix::Nickname(nick.into(), user.into(), host.into())
    }

    /// Parse a raw prefix (without the leading `:`).
    ///
    /// Lenient: a bare token containing a dot is taken as a server name,
    /// anything else as a (possibly partial) user mask.
    pub fn parse(s: &str) -> Self {
        let (rest, host) = match s.split_once('@') {
            Some((rest, host)) => (rest, Some(host)),
            None => (s, None),
        };
        let (name, user) = match rest.split_once('!') {
            Some((name, user)) => (name, Some(user)),
            None => (rest, None),
        };

        if user.is_none() && host.is_none() && name.contains('.') {
            return Prefix::ServerName(name.to_string());
        }

        Prefix::Nickname(
            name.to_string(),
            user.unwrap_or_default().to_string(),
            host.unwrap_or_default().to_string(),
        )
    }

    /// The nickname or server name at the front of the prefix.
    pub fn name(&self) -> &str {
        match self {
            Prefix::ServerName(name) => name,
            Prefix::Nickname(nick, _, _) => nick,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => {
                f.write_str(nick)?;
                if !user.is_empty() {
                    write!(f, "!{user}")?;
                }
                if !host.is_empty() {
                    write!(f, "@{host}")?;
                }
                Ok(())
            }
        }
    }
}
