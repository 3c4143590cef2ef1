//! Nickname ownership and peer lookup.

use std::collections::HashSet;

use dashmap::mapref::entry::Entry;
use tracing::info;

use crate::error::HandlerError;
use crate::state::{Matrix, Uid};

/// Result of a successful NICK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NickChange {
    /// The client already held this nickname.
    Unchanged,
    /// The nickname was claimed; `old` was released.
    Changed { old: Option<String> },
}

impl Matrix {
    /// True if `nick` is held by a registered connection other than `uid`.
    ///
    /// Only registered clients appear in the nickname index, so a
    /// connection that never completed registration can't reserve a
    /// nickname.
    pub fn nick_taken_by_other(&self, uid: &str, nick: &str) -> bool {
        self.nicks.get(nick).is_some_and(|owner| owner.value() != uid)
    }

    /// Give `uid` the nickname `nick`.
    ///
    /// A registered client claims the new nickname through the index entry
    /// lock, so two connections racing for the same nickname can't both
    /// win, and releases its old one. Before registration the nickname is
    /// only recorded on the client; [`Matrix::complete_registration`]
    /// claims it.
    pub fn change_nick(&self, uid: &str, nick: &str) -> Result<NickChange, HandlerError> {
        let client = self
            .client(uid)
            .ok_or_else(|| HandlerError::Internal(format!("no client {uid}")))?;

        let (old, registered) = {
            let client = client.read();
            (client.nick.clone(), client.is_registered())
        };
        if old.as_deref() == Some(nick) {
            return Ok(NickChange::Unchanged);
        }

        if registered {
            match self.nicks.entry(nick.to_string()) {
                Entry::Occupied(_) => return Err(HandlerError::NicknameInUse(nick.to_string())),
                Entry::Vacant(slot) => {
                    slot.insert(uid.to_string());
                }
            }
            if let Some(old) = &old {
                self.nicks.remove_if(old, |_, owner| owner == uid);
            }
        }
        client.write().set_nick(nick.to_string());

        info!(uid = %uid, old = ?old, new = %nick, registered, "Nick changed");
        Ok(NickChange::Changed { old })
    }

    /// Register `uid` once it has a password, a nickname and a username.
    ///
    /// The nickname is claimed in the index while the client lock is held.
    /// If another connection registered it first, the client loses the
    /// nickname and waits for a new NICK. Returns true only on the
    /// transition itself, so the welcome burst goes out once.
    pub fn complete_registration(&self, uid: &str) -> Result<bool, HandlerError> {
        let client = self
            .client(uid)
            .ok_or_else(|| HandlerError::Internal(format!("no client {uid}")))?;
        let mut client = client.write();

        if !client.ready_to_register() {
            return Ok(false);
        }
        let Some(nick) = client.nick.clone() else {
            return Ok(false);
        };

        match self.nicks.entry(nick.clone()) {
            Entry::Occupied(_) => {
                client.drop_colliding_nick();
                return Err(HandlerError::NicknameInUse(nick));
            }
            Entry::Vacant(slot) => {
                slot.insert(uid.to_string());
            }
        }
        Ok(client.try_complete_registration())
    }

    /// `uid` itself followed by every other client sharing at least one
    /// channel with it, each listed once.
    pub fn peers_of(&self, uid: &str) -> Vec<Uid> {
        let channels: Vec<String> = match self.client(uid) {
            Some(client) => client.read().channels.iter().cloned().collect(),
            None => return Vec::new(),
        };

        let mut seen = HashSet::new();
        let mut peers = vec![uid.to_string()];
        seen.insert(uid.to_string());

        for name in channels {
            let Some(channel) = self.channel(&name) else {
                continue;
            };
            let channel = channel.read();
            for member in channel.members() {
                if seen.insert(member.clone()) {
                    peers.push(member.clone());
                }
            }
        }

        peers
    }
}
