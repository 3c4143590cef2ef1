//! Per-connection client state.

use std::collections::HashSet;

use tinyirc_proto::Prefix;

use super::Uid;

/// Registration progress of a connection.
///
/// `PasswordAccepted` and `NickPending` both mean the password was accepted
/// but registration hasn't completed; `NickPending` additionally records
/// that the last NICK attempt collided while no nickname is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationState {
    #[default]
    Unauthenticated,
    PasswordAccepted,
    NickPending,
    Registered,
}

impl RegistrationState {
    pub fn password_accepted(self) -> bool {
        !matches!(self, Self::Unauthenticated)
    }

    pub fn is_registered(self) -> bool {
        matches!(self, Self::Registered)
    }
}

/// A connected client.
///
/// Lives in the client table behind its own lock. Channel memberships are
/// stored by name; the channel side holds the matching [`Uid`].
#[derive(Debug)]
pub struct Client {
    pub uid: Uid,
    pub nick: Option<String>,
    pub user: Option<String>,
    /// Hostname the client claimed in USER.
    pub hostname: Option<String>,
    pub realname: String,
    /// Peer address, used as the host part of the client's prefix.
    pub host: String,
    pub state: RegistrationState,
    pub channels: HashSet<String>,
}

impl Client {
    pub fn new(uid: Uid, host: String) -> Self {
        Self {
            uid,
            nick: None,
            user: None,
            hostname: None,
            realname: String::new(),
            host,
            state: RegistrationState::default(),
            channels: HashSet::new(),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.state.is_registered()
    }

    /// Nickname, or `*` before one is set (used as the target of numerics).
    pub fn nick_or_star(&self) -> &str {
        self.nick.as_deref().unwrap_or("*")
    }

    /// `nick!user@host` prefix for relayed commands.
    pub fn prefix(&self) -> Prefix {
        Prefix::new(
            self.nick_or_star(),
            self.user.as_deref().unwrap_or("*"),
            self.host.as_str(),
        )
    }

    pub fn accept_password(&mut self) {
        if self.state == RegistrationState::Unauthenticated {
            self.state = RegistrationState::PasswordAccepted;
        }
    }

    /// Record a successful nickname change.
    pub fn set_nick(&mut self, nick: String) {
        self.nick = Some(nick);
        if self.state == RegistrationState::NickPending {
            self.state = RegistrationState::PasswordAccepted;
        }
    }

    /// Record that the requested nickname was already taken.
    pub fn mark_nick_collision(&mut self) {
        if self.nick.is_none() && self.state == RegistrationState::PasswordAccepted {
            self.state = RegistrationState::NickPending;
        }
    }

    /// Forget a nickname that another connection registered first.
    pub fn drop_colliding_nick(&mut self) {
        self.nick = None;
        self.mark_nick_collision();
    }

    /// Password, nickname and username are all in, and registration hasn't
    /// completed yet.
    pub fn ready_to_register(&self) -> bool {
        self.state.password_accepted()
            && !self.state.is_registered()
            && self.nick.is_some()
            && self.user.is_some()
    }

    /// Move to `Registered` if ready. Returns true only on the transition
    /// itself, so callers send the welcome burst exactly once.
    pub fn try_complete_registration(&mut self) -> bool {
        let ready = self.ready_to_register();
        if ready {
            self.state = RegistrationState::Registered;
        }
        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new("CAAAAAA".into(), "127.0.0.1".into())
    }

    #[test]
    fn starts_unauthenticated_with_star_nick() {
        let client = client();
        assert_eq!(client.state, RegistrationState::Unauthenticated);
        assert_eq!(client.nick_or_star(), "*");
        assert!(!client.is_registered());
    }

    #[test]
    fn registers_only_with_all_three_parts() {
        let mut client = client();
        client.set_nick("alice".into());
        client.user = Some("al".into());
        assert!(!client.try_complete_registration());

        client.accept_password();
        assert!(client.try_complete_registration());
        assert!(client.is_registered());
        assert!(!client.try_complete_registration());
    }

    #[test]
    fn collision_moves_to_nick_pending_until_a_nick_is_set() {
        let mut client = client();
        client.accept_password();
        client.mark_nick_collision();
        assert_eq!(client.state, RegistrationState::NickPending);
        assert!(client.state.password_accepted());

        client.set_nick("alice2".into());
        assert_eq!(client.state, RegistrationState::PasswordAccepted);
    }

    #[test]
    fn collision_with_a_held_nick_changes_nothing() {
        let mut client = client();
        client.accept_password();
        client.set_nick("alice".into());
        client.mark_nick_collision();
        assert_eq!(client.state, RegistrationState::PasswordAccepted);
    }

    #[test]
    fn losing_a_nick_at_registration_waits_for_another() {
        let mut client = client();
        client.accept_password();
        client.set_nick("alice".into());
        client.user = Some("al".into());
        assert!(client.ready_to_register());

        client.drop_colliding_nick();
        assert_eq!(client.nick, None);
        assert_eq!(client.state, RegistrationState::NickPending);
        assert!(!client.ready_to_register());
    }

    #[test]
    fn prefix_uses_peer_host() {
        let mut client = client();
        client.set_nick("alice".into());
        client.user = Some("al".into());
        assert_eq!(client.prefix().to_string(), "alice!al@127.0.0.1");
    }
}
