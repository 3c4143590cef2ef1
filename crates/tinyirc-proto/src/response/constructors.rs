//! Reply constructors for `Response`.
//!
//! Every constructor takes the recipient's nickname (`*` before one is
//! known) as `client` and returns an unprefixed [`Message`]; the server adds
//! its own prefix when sending.

use crate::message::Message;
use crate::response::Response;

macro_rules! impl_err {
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str) -> Message {
            Self::reply(Response::$resp, vec![client.to_string(), $msg.to_string()])
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $arg:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str, $arg: &str) -> Message {
            Self::reply(
                Response::$resp,
                vec![client.to_string(), $arg.to_string(), $msg.to_string()],
            )
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $arg1:ident, $arg2:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str, $arg1: &str, $arg2: &str) -> Message {
            Self::reply(
                Response::$resp,
                vec![
                    client.to_string(),
                    $arg1.to_string(),
                    $arg2.to_string(),
                    $msg.to_string(),
                ],
            )
        }
    };
}

impl Response {
    fn reply(response: Response, params: Vec<String>) -> Message {
        Message::response(response, params)
    }

    // === 001-099 Registration ===

    /// `001 RPL_WELCOME`
    /// `:Welcome to the <network> Network, <nick>!<user>@<host>`
    pub fn rpl_welcome(client: &str, network: &str, mask: &str) -> Message {
        Self::reply(
            Response::RPL_WELCOME,
            vec![
                client.to_string(),
                format!("Welcome to the {network} Network, {mask}"),
            ],
        )
    }

    /// `002 RPL_YOURHOST`
    /// `:Your host is <server>, running version <version>`
    pub fn rpl_yourhost(client: &str, server: &str, version: &str) -> Message {
        Self::reply(
            Response::RPL_YOURHOST,
            vec![
                client.to_string(),
                format!("Your host is {server}, running version {version}"),
            ],
        )
    }

    /// `003 RPL_CREATED`
    /// `:This server was created <date>`
    pub fn rpl_created(client: &str, created: &str) -> Message {
        Self::reply(
            Response::RPL_CREATED,
            vec![
                client.to_string(),
                format!("This server was created {created}"),
            ],
        )
    }

    // === 200-399 Command replies ===

    /// `221 RPL_UMODEIS`
    /// `<modes>`
    pub fn rpl_umodeis(client: &str, modes: &str) -> Message {
        Self::reply(
            Response::RPL_UMODEIS,
            vec![client.to_string(), modes.to_string()],
        )
    }

    /// `324 RPL_CHANNELMODEIS`
    /// `<channel> <modes> [args...]`
    pub fn rpl_channelmodeis(client: &str, channel: &str, modes: &str, args: &[String]) -> Message {
        let mut params = vec![client.to_string(), channel.to_string(), modes.to_string()];
        params.extend(args.iter().cloned());
        Self::reply(Response::RPL_CHANNELMODEIS, params)
    }

    impl_err!(
        /// `331 RPL_NOTOPIC`
        /// `<channel> :No topic is set`
        rpl_notopic, RPL_NOTOPIC, channel, "No topic is set"
    );

    /// `332 RPL_TOPIC`
    /// `<channel> :<topic>`
    pub fn rpl_topic(client: &str, channel: &str, topic: &str) -> Message {
        Self::reply(
            Response::RPL_TOPIC,
            vec![client.to_string(), channel.to_string(), topic.to_string()],
        )
    }

    /// `341 RPL_INVITING`
    /// `<nick> <channel>`
    pub fn rpl_inviting(client: &str, nick: &str, channel: &str) -> Message {
        Self::reply(
            Response::RPL_INVITING,
            vec![client.to_string(), nick.to_string(), channel.to_string()],
        )
    }

    /// `353 RPL_NAMREPLY`
    /// `= <channel> :[@]<nick> [@]<nick> ...`
    pub fn rpl_namreply(client: &str, channel: &str, names: &[String]) -> Message {
        Self::reply(
            Response::RPL_NAMREPLY,
            vec![
                client.to_string(),
                "=".to_string(),
                channel.to_string(),
                names.join(" "),
            ],
        )
    }

    impl_err!(
        /// `366 RPL_ENDOFNAMES`
        /// `<channel> :End of /NAMES list`
        rpl_endofnames, RPL_ENDOFNAMES, channel, "End of /NAMES list"
    );

    // === 400-599 Errors ===

    impl_err!(
        /// `401 ERR_NOSUCHNICK`
        /// `<nickname> :No such nick/channel`
        err_nosuchnick, ERR_NOSUCHNICK, nickname, "No such nick/channel"
    );

    impl_err!(
        /// `403 ERR_NOSUCHCHANNEL`
        /// `<channel> :No such channel`
        err_nosuchchannel, ERR_NOSUCHCHANNEL, channel, "No such channel"
    );

    impl_err!(
        /// `412 ERR_NOTEXTTOSEND`
        /// `:No text to send`
        err_notexttosend, ERR_NOTEXTTOSEND, "No text to send"
    );

    impl_err!(
        /// `421 ERR_UNKNOWNCOMMAND`
        /// `<command> :Unknown command`
        err_unknowncommand, ERR_UNKNOWNCOMMAND, command, "Unknown command"
    );

    impl_err!(
        /// `432 ERR_ERRONEOUSNICKNAME`
        /// `<nick> :Erroneous nickname`
        err_erroneousnickname, ERR_ERRONEOUSNICKNAME, nick, "Erroneous nickname"
    );

    impl_err!(
        /// `433 ERR_NICKNAMEINUSE`
        /// `<nick> :Nickname is already in use`
        err_nicknameinuse, ERR_NICKNAMEINUSE, nick, "Nickname is already in use"
    );

    impl_err!(
        /// `441 ERR_USERNOTINCHANNEL`
        /// `<nick> <channel> :They aren't on that channel`
        err_usernotinchannel, ERR_USERNOTINCHANNEL, nick, channel, "They aren't on that channel"
    );

    impl_err!(
        /// `442 ERR_NOTONCHANNEL`
        /// `<channel> :You're not on that channel`
        err_notonchannel, ERR_NOTONCHANNEL, channel, "You're not on that channel"
    );

    impl_err!(
        /// `443 ERR_USERONCHANNEL`
        /// `<nick> <channel> :is already on channel`
        err_useronchannel, ERR_USERONCHANNEL, nick, channel, "is already on channel"
    );

    impl_err!(
        /// `451 ERR_NOTREGISTERED`
        /// `:You have not registered`
        err_notregistered, ERR_NOTREGISTERED, "You have not registered"
    );

    impl_err!(
        /// `461 ERR_NEEDMOREPARAMS`
        /// `<command> :Not enough parameters`
        err_needmoreparams, ERR_NEEDMOREPARAMS, command, "Not enough parameters"
    );

    impl_err!(
        /// `462 ERR_ALREADYREGISTERED`
        /// `:You may not reregister`
        err_alreadyregistered, ERR_ALREADYREGISTERED, "You may not reregister"
    );

    impl_err!(
        /// `464 ERR_PASSWDMISMATCH`
        /// `:Password incorrect`
        err_passwdmismatch, ERR_PASSWDMISMATCH, "Password incorrect"
    );

    impl_err!(
        /// `471 ERR_CHANNELISFULL`
        /// `<channel> :Cannot join channel (+l)`
        err_channelisfull, ERR_CHANNELISFULL, channel, "Cannot join channel (+l)"
    );

    /// `472 ERR_UNKNOWNMODE`
    /// `<char> :is unknown mode char to me for <channel>`
    pub fn err_unknownmode(client: &str, mode: char, channel: &str) -> Message {
        Self::reply(
            Response::ERR_UNKNOWNMODE,
            vec![
                client.to_string(),
                mode.to_string(),
                format!("is unknown mode char to me for {channel}"),
            ],
        )
    }

    impl_err!(
        /// `473 ERR_INVITEONLYCHAN`
        /// `<channel> :Cannot join channel (+i)`
        err_inviteonlychan, ERR_INVITEONLYCHAN, channel, "Cannot join channel (+i)"
    );

    impl_err!(
        /// `475 ERR_BADCHANNELKEY`
        /// `<channel> :Cannot join channel (+k)`
        err_badchannelkey, ERR_BADCHANNELKEY, channel, "Cannot join channel (+k)"
    );

    impl_err!(
        /// `482 ERR_CHANOPRIVSNEEDED`
        /// `<channel> :You're not channel operator`
        err_chanoprivsneeded, ERR_CHANOPRIVSNEEDED, channel, "You're not channel operator"
    );

    impl_err!(
        /// `502 ERR_USERSDONTMATCH`
        /// `:Cant change mode for other users`
        err_usersdontmatch, ERR_USERSDONTMATCH, "Cant change mode for other users"
    );
}
