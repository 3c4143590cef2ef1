//! Numeric reply codes.
//!
//! Only the numerics this server actually emits are listed. Each has a
//! constructor on [`Response`] that fills in the conventional text.

#![allow(non_camel_case_types)]

mod constructors;

use std::fmt;
use std::str::FromStr;

macro_rules! numerics {
    ($($(#[$meta:meta])* $name:ident = $code:literal,)*) => {
        /// Server numeric reply code.
        ///
        /// - 001-099: connection registration
        /// - 200-399: command replies
        /// - 400-599: error replies
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum Response {
            $($(#[$meta])* $name = $code,)*
        }

        impl Response {
            /// Look up a numeric by code.
            pub fn from_code(code: u16) -> Option<Response> {
                match code {
                    $($code => Some(Response::$name),)*
                    _ => None,
                }
            }
        }
    };
}

numerics! {
    /// 001 - Welcome to the network
    RPL_WELCOME = 1,
    /// 002 - Your host is ..., running version ...
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 221 - Current user modes
    RPL_UMODEIS = 221,
    /// 324 - Current channel modes
    RPL_CHANNELMODEIS = 324,
    /// 331 - No topic is set
    RPL_NOTOPIC = 331,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 341 - Invitation was sent
    RPL_INVITING = 341,
    /// 353 - Channel member list
    RPL_NAMREPLY = 353,
    /// 366 - End of member list
    RPL_ENDOFNAMES = 366,
    /// 401 - No such nick/channel
    ERR_NOSUCHNICK = 401,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 412 - No text to send
    ERR_NOTEXTTOSEND = 412,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 432 - Erroneous nickname
    ERR_ERRONEOUSNICKNAME = 432,
    /// 433 - Nickname is already in use
    ERR_NICKNAMEINUSE = 433,
    /// 441 - They aren't on that channel
    ERR_USERNOTINCHANNEL = 441,
    /// 442 - You're not on that channel
    ERR_NOTONCHANNEL = 442,
    /// 443 - Is already on channel
    ERR_USERONCHANNEL = 443,
    /// 451 - You have not registered
    ERR_NOTREGISTERED = 451,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 462 - Already registered
    ERR_ALREADYREGISTERED = 462,
    /// 464 - Password incorrect
    ERR_PASSWDMISMATCH = 464,
    /// 471 - Channel is full (+l)
    ERR_CHANNELISFULL = 471,
    /// 472 - Unknown mode char
    ERR_UNKNOWNMODE = 472,
    /// 473 - Invite only channel (+i)
    ERR_INVITEONLYCHAN = 473,
    /// 475 - Bad channel key (+k)
    ERR_BADCHANNELKEY = 475,
    /// 482 - You're not channel operator
    ERR_CHANOPRIVSNEEDED = 482,
    /// 502 - Can't change mode for other users
    ERR_USERSDONTMATCH = 502,
}

impl Response {
    /// The numeric code.
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// True for 4xx and 5xx replies.
    #[inline]
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.code())
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

/// Error returned when a string is not a known numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResponseError;

impl fmt::Display for ParseResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not a known numeric reply")
    }
}

impl std::error::Error for ParseResponseError {}

impl FromStr for Response {
    type Err = ParseResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 {
            return Err(ParseResponseError);
        }
        s.parse::<u16>()
            .ok()
            .and_then(Response::from_code)
            .ok_or(ParseResponseError)
    }
}
