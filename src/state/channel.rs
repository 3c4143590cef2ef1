//! Channel state and the membership/privilege rules around it.
//!
//! A [`Channel`] is plain data behind a lock in the channel table. Its methods
//! check and apply rules but never send anything; callers take a snapshot of
//! whatever they need to broadcast and release the lock first.

use std::collections::HashSet;

use super::Uid;
use crate::error::ChannelError;

/// Channel mode flags and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelModes {
    /// `+i`: joining requires an invitation.
    pub invite_only: bool,
    /// `+t`: only operators may set or clear the topic.
    pub topic_lock: bool,
    /// `+k`: joining requires this key.
    pub key: Option<String>,
    /// `+l`: joining is refused at this many members.
    pub limit: Option<usize>,
}

impl Default for ChannelModes {
    fn default() -> Self {
        Self {
            invite_only: false,
            topic_lock: true,
            key: None,
            limit: None,
        }
    }
}

impl ChannelModes {
    /// Mode string and its arguments as shown in RPL_CHANNELMODEIS.
    ///
    /// The key is replaced by `*` unless `reveal_key` is set.
    pub fn render(&self, reveal_key: bool) -> (String, Vec<String>) {
        let mut modes = String::from("+");
        let mut args = Vec::new();

        if self.invite_only {
            modes.push('i');
        }
        if self.topic_lock {
            modes.push('t');
        }
        if let Some(key) = &self.key {
            modes.push('k');
            args.push(if reveal_key { key.clone() } else { "*".to_string() });
        }
        if let Some(limit) = self.limit {
            modes.push('l');
            args.push(limit.to_string());
        }

        (modes, args)
    }
}

/// A single mode change, resolved and ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeChange {
    InviteOnly(bool),
    TopicLock(bool),
    Key(Option<String>),
    Limit(Option<usize>),
    Operator { grant: bool, uid: Uid, nick: String },
}

impl ModeChange {
    /// Sign, mode letter and argument as they appear on a MODE line.
    pub fn describe(&self) -> (bool, char, Option<String>) {
        match self {
            Self::InviteOnly(on) => (*on, 'i', None),
            Self::TopicLock(on) => (*on, 't', None),
            Self::Key(key) => (key.is_some(), 'k', key.clone()),
            Self::Limit(limit) => (limit.is_some(), 'l', limit.map(|l| l.to_string())),
            Self::Operator { grant, nick, .. } => (*grant, 'o', Some(nick.clone())),
        }
    }
}

/// A parsed mode change whose operator target is still a nickname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeRequest {
    Flag(ModeChange),
    Operator { grant: bool, nick: String },
}

/// A channel.
#[derive(Debug)]
pub struct Channel {
    pub name: String,
    /// Members in join order.
    members: Vec<Uid>,
    operators: HashSet<Uid>,
    /// Invited connections; an invitation is consumed by the join it
    /// permits and dies with the connection, whatever nick it goes by.
    invites: HashSet<Uid>,
    /// Empty when no topic is set.
    pub topic: String,
    pub modes: ChannelModes,
}

impl Channel {
    /// A new channel whose creator is its only member and operator.
    pub fn new(name: String, creator: Uid) -> Self {
        let mut operators = HashSet::new();
        operators.insert(creator.clone());
        Self {
            name,
            members: vec![creator],
            operators,
            invites: HashSet::new(),
            topic: String::new(),
            modes: ChannelModes::default(),
        }
    }

    pub fn members(&self) -> &[Uid] {
        &self.members
    }

    pub fn is_member(&self, uid: &str) -> bool {
        self.members.iter().any(|m| m == uid)
    }

    pub fn is_operator(&self, uid: &str) -> bool {
        self.operators.contains(uid)
    }

    pub fn is_invited(&self, uid: &str) -> bool {
        self.invites.contains(uid)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn require_member(&self, uid: &str) -> Result<(), ChannelError> {
        if self.is_member(uid) {
            Ok(())
        } else {
            Err(ChannelError::NotOnChannel)
        }
    }

    pub fn require_operator(&self, uid: &str) -> Result<(), ChannelError> {
        if self.is_operator(uid) {
            Ok(())
        } else {
            Err(ChannelError::ChanOpPrivsNeeded)
        }
    }

    /// Join checks, in order: invitation (+i), key (+k), limit (+l),
    /// existing membership.
    pub fn check_join(&self, uid: &str, nick: &str, key: Option<&str>) -> Result<(), ChannelError> {
        if self.modes.invite_only && !self.is_invited(uid) {
            return Err(ChannelError::InviteOnlyChan);
        }
        if let Some(expected) = &self.modes.key
            && key != Some(expected.as_str())
        {
            return Err(ChannelError::BadChannelKey);
        }
        if let Some(limit) = self.modes.limit
            && self.members.len() >= limit
        {
            return Err(ChannelError::ChannelIsFull);
        }
        if self.is_member(uid) {
            return Err(ChannelError::UserOnChannel(nick.to_string()));
        }
        Ok(())
    }

    /// Check and perform a join, consuming any invitation for `uid`.
    pub fn join(&mut self, uid: &str, nick: &str, key: Option<&str>) -> Result<(), ChannelError> {
        self.check_join(uid, nick, key)?;
        self.invites.remove(uid);
        self.members.push(uid.to_string());
        Ok(())
    }

    /// Remove a member (and its operator status). Returns false if it wasn't
    /// a member.
    pub fn remove_member(&mut self, uid: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != uid);
        self.operators.remove(uid);
        self.members.len() != before
    }

    /// Invite connection `target`, currently known as `nick`, on behalf of
    /// `inviter`.
    pub fn invite(&mut self, inviter: &str, target: &str, nick: &str) -> Result<(), ChannelError> {
        self.require_operator(inviter)?;
        if self.is_member(target) || self.is_invited(target) {
            return Err(ChannelError::UserOnChannel(nick.to_string()));
        }
        self.invites.insert(target.to_string());
        Ok(())
    }

    /// Forget any invitation held by a departing connection.
    pub fn forget_invite(&mut self, uid: &str) {
        self.invites.remove(uid);
    }

    /// Set (or, with empty text, clear) the topic.
    ///
    /// Setting requires membership; under `+t` both setting and clearing
    /// require operator status. Non-members are never operators.
    pub fn set_topic(&mut self, uid: &str, text: &str) -> Result<(), ChannelError> {
        if !text.is_empty() {
            self.require_member(uid)?;
        }
        if self.modes.topic_lock {
            self.require_operator(uid)?;
        }
        self.require_member(uid)?;
        self.topic = text.to_string();
        Ok(())
    }

    /// Check every change, then apply them all. Returns only the changes that
    /// actually altered state; nothing is applied if any check fails.
    pub fn apply_modes(
        &mut self,
        setter: &str,
        changes: Vec<ModeChange>,
    ) -> Result<Vec<ModeChange>, ChannelError> {
        self.require_operator(setter)?;
        for change in &changes {
            if let ModeChange::Operator { uid, nick, .. } = change
                && !self.is_member(uid)
            {
                return Err(ChannelError::UserNotInChannel(nick.clone()));
            }
        }

        Ok(changes
            .into_iter()
            .filter(|change| self.apply_one(change))
            .collect())
    }

    fn apply_one(&mut self, change: &ModeChange) -> bool {
        match change {
            ModeChange::InviteOnly(on) => replace(&mut self.modes.invite_only, *on),
            ModeChange::TopicLock(on) => replace(&mut self.modes.topic_lock, *on),
            ModeChange::Key(key) => replace(&mut self.modes.key, key.clone()),
            ModeChange::Limit(limit) => replace(&mut self.modes.limit, *limit),
            ModeChange::Operator { grant: true, uid, .. } => self.operators.insert(uid.clone()),
            ModeChange::Operator { grant: false, uid, .. } => self.operators.remove(uid),
        }
    }
}

/// Store `value`, reporting whether it differed from the old one.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
