//! Channel operations on the Matrix.
//!
//! Every operation here is synchronous: it takes the locks it needs, checks
//! the rules, mutates, snapshots whoever must hear about it, and returns.
//! Sending is left to the caller.
//!
//! Channel creation (in [`Matrix::join_channel`]) and destruction (in
//! [`Matrix::destroy_if_empty`]) both run under the channel table's entry
//! lock for that name, so a join can never land in a channel that is being
//! removed. A client's channel back-references are only changed while the
//! channel's own lock is held.

use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ChannelError, HandlerError};
use crate::state::{Channel, Matrix, ModeChange, ModeRequest, Uid};

/// What a joiner needs to hear back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// The join created the channel.
    pub created: bool,
    /// Every member after the join, with operator status, in join order.
    pub members: Vec<(Uid, bool)>,
    pub topic: String,
}

impl JoinOutcome {
    fn snapshot(channel: &Channel, created: bool) -> Self {
        Self {
            created,
            members: channel
                .members()
                .iter()
                .map(|uid| (uid.clone(), channel.is_operator(uid)))
                .collect(),
            topic: channel.topic.clone(),
        }
    }

    pub fn member_ids(&self) -> Vec<Uid> {
        self.members.iter().map(|(uid, _)| uid.clone()).collect()
    }
}

/// Mode changes that took effect and who must be told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeOutcome {
    pub applied: Vec<ModeChange>,
    pub members: Vec<Uid>,
}

impl Matrix {
    /// Join `uid` to `name`, creating the channel if it doesn't exist.
    pub fn join_channel(
        &self,
        uid: &str,
        name: &str,
        key: Option<&str>,
    ) -> Result<JoinOutcome, HandlerError> {
        let client = self
            .client(uid)
            .ok_or_else(|| HandlerError::Internal(format!("no client {uid}")))?;
        let nick = client.read().nick_or_star().to_string();

        let outcome = match self.channels.entry(name.to_string()) {
            Entry::Vacant(slot) => {
                let channel = Channel::new(name.to_string(), uid.to_string());
                let outcome = JoinOutcome::snapshot(&channel, true);
                client.write().channels.insert(name.to_string());
                slot.insert(Arc::new(RwLock::new(channel)));
                outcome
            }
            Entry::Occupied(slot) => {
                let mut channel = slot.get().write();
                channel.join(uid, &nick, key).map_err(|e| e.on(name))?;
                client.write().channels.insert(name.to_string());
                JoinOutcome::snapshot(&channel, false)
            }
        };

        if outcome.created {
            info!(channel = %name, nick = %nick, "Channel created");
        }
        Ok(outcome)
    }

    /// Remove `name` from the table if it has no members left.
    pub fn destroy_if_empty(&self, name: &str) -> bool {
        let removed = self
            .channels
            .remove_if(name, |_, channel| channel.read().is_empty())
            .is_some();
        if removed {
            info!(channel = %name, "Channel destroyed");
        }
        removed
    }

    fn existing_channel(&self, name: &str) -> Result<Arc<RwLock<Channel>>, HandlerError> {
        self.channel(name)
            .ok_or_else(|| HandlerError::NoSuchChannel(name.to_string()))
    }

    /// Remove `uid` from `name`. Returns the members before removal (the
    /// leaver included), who all see the PART.
    pub fn part_channel(&self, uid: &str, name: &str) -> Result<Vec<Uid>, HandlerError> {
        let channel = self.existing_channel(name)?;
        let recipients = {
            let mut channel = channel.write();
            channel.require_member(uid).map_err(|e| e.on(name))?;
            let recipients = channel.members().to_vec();
            channel.remove_member(uid);
            if let Some(client) = self.client(uid) {
                client.write().channels.remove(name);
            }
            debug!(channel = %name, uid = %uid, remaining = channel.len(), "Member parted");
            recipients
        };

        self.destroy_if_empty(name);
        Ok(recipients)
    }

    /// Kick `target_nick` out of `name` on behalf of `kicker`.
    ///
    /// Returns the members before removal (the target included) and the
    /// target's connection id.
    pub fn kick_member(
        &self,
        kicker: &str,
        name: &str,
        target_nick: &str,
    ) -> Result<(Vec<Uid>, Uid), HandlerError> {
        let channel = self.existing_channel(name)?;
        let target = self.resolve_nick(target_nick);

        let outcome = {
            let mut channel = channel.write();
            channel.require_operator(kicker).map_err(|e| e.on(name))?;
            let Some(target) = target.filter(|t| channel.is_member(t)) else {
                return Err(HandlerError::NoSuchNick(target_nick.to_string()));
            };

            let recipients = channel.members().to_vec();
            channel.remove_member(&target);
            if let Some(client) = self.client(&target) {
                client.write().channels.remove(name);
            }
            (recipients, target)
        };

        self.destroy_if_empty(name);
        Ok(outcome)
    }

    /// Add `target_nick` to the invite list of `name`. Returns the invitee's
    /// connection id.
    pub fn invite_to_channel(
        &self,
        inviter: &str,
        target_nick: &str,
        name: &str,
    ) -> Result<Uid, HandlerError> {
        let channel = self.existing_channel(name)?;
        let target = self.resolve_nick(target_nick);

        let mut channel = channel.write();
        channel.require_operator(inviter).map_err(|e| e.on(name))?;
        let target = target.ok_or_else(|| HandlerError::NoSuchNick(target_nick.to_string()))?;
        channel
            .invite(inviter, &target, target_nick)
            .map_err(|e| e.on(name))?;
        Ok(target)
    }

    /// Current topic of `name`; only members may ask.
    pub fn channel_topic(&self, uid: &str, name: &str) -> Result<String, HandlerError> {
        let channel = self.existing_channel(name)?;
        let channel = channel.read();
        channel.require_member(uid).map_err(|e| e.on(name))?;
        Ok(channel.topic.clone())
    }

    /// Set or clear the topic of `name`. Returns the members to notify.
    pub fn set_channel_topic(
        &self,
        uid: &str,
        name: &str,
        text: &str,
    ) -> Result<Vec<Uid>, HandlerError> {
        let channel = self.existing_channel(name)?;
        let mut channel = channel.write();
        channel.set_topic(uid, text).map_err(|e| e.on(name))?;
        Ok(channel.members().to_vec())
    }

    /// Mode string and arguments of `name`. The key is only shown to members.
    pub fn channel_modes(
        &self,
        uid: &str,
        name: &str,
    ) -> Result<(String, Vec<String>), HandlerError> {
        let channel = self.existing_channel(name)?;
        let channel = channel.read();
        Ok(channel.modes.render(channel.is_member(uid)))
    }

    /// Fail unless `uid` is an operator of `name`.
    pub fn require_channel_operator(&self, uid: &str, name: &str) -> Result<(), HandlerError> {
        let channel = self.existing_channel(name)?;
        let channel = channel.read();
        channel.require_operator(uid).map_err(|e| e.on(name))
    }

    /// Apply parsed mode changes to `name` on behalf of `setter`.
    ///
    /// Operator targets are resolved before the channel is locked; all
    /// checks (operator status, unknown nicknames, non-members) pass before
    /// anything is applied.
    pub fn change_channel_modes(
        &self,
        setter: &str,
        name: &str,
        requests: Vec<ModeRequest>,
    ) -> Result<ModeOutcome, HandlerError> {
        let channel = self.existing_channel(name)?;
        let resolved: Vec<(ModeRequest, Option<Uid>)> = requests
            .into_iter()
            .map(|request| {
                let uid = match &request {
                    ModeRequest::Operator { nick, .. } => self.resolve_nick(nick),
                    ModeRequest::Flag(_) => None,
                };
                (request, uid)
            })
            .collect();

        let mut channel = channel.write();
        channel.require_operator(setter).map_err(|e| e.on(name))?;

        let mut changes = Vec::with_capacity(resolved.len());
        for (request, uid) in resolved {
            match request {
                ModeRequest::Flag(change) => changes.push(change),
                ModeRequest::Operator { grant, nick } => {
                    let Some(uid) = uid else {
                        return Err(HandlerError::NoSuchNick(nick));
                    };
                    changes.push(ModeChange::Operator { grant, uid, nick });
                }
            }
        }

        let applied = channel
            .apply_modes(setter, changes)
            .map_err(|e| e.on(name))?;
        Ok(ModeOutcome {
            applied,
            members: channel.members().to_vec(),
        })
    }

    /// Recipients of a channel message from `uid`: every member but the
    /// sender. The sender must be a member.
    pub fn channel_recipients(&self, uid: &str, name: &str) -> Result<Vec<Uid>, HandlerError> {
        let channel = self.existing_channel(name)?;
        let channel = channel.read();
        if !channel.is_member(uid) {
            return Err(ChannelError::NotOnChannel.on(name));
        }
        Ok(channel
            .members()
            .iter()
            .filter(|member| *member != uid)
            .cloned()
            .collect())
    }
}
