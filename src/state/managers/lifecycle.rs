//! Client teardown.

use std::collections::HashSet;

use tinyirc_proto::Message;
use tracing::{error, info};

use crate::error::StateError;
use crate::state::{Matrix, Uid};

impl Matrix {
    /// Remove a departing client from the server.
    ///
    /// Leaves every channel (destroying the ones it empties), drops its
    /// pending invitations, sends `QUIT :reason` once to each client that
    /// shared any channel, releases the nickname and drops the client
    /// record. Safe to call for a client that is already gone.
    pub async fn disconnect(&self, uid: &str, reason: &str) {
        let Some(client) = self.client(uid) else {
            return;
        };
        let (prefix, nick, channels) = {
            let client = client.read();
            let channels: Vec<String> = client.channels.iter().cloned().collect();
            (client.prefix(), client.nick.clone(), channels)
        };

        let mut seen: HashSet<Uid> = HashSet::new();
        let mut recipients = Vec::new();
        for name in &channels {
            if let Some(channel) = self.channel(name) {
                let mut channel = channel.write();
                if channel.remove_member(uid) {
                    for member in channel.members() {
                        if seen.insert(member.clone()) {
                            recipients.push(member.clone());
                        }
                    }
                }
                client.write().channels.remove(name);
            } else {
                client.write().channels.remove(name);
            }
            self.destroy_if_empty(name);
        }

        for channel in self.channels.iter() {
            channel.value().write().forget_invite(uid);
        }

        if !recipients.is_empty() {
            let quit = Message::quit(reason).with_prefix(prefix);
            self.send_all(&recipients, &quit).await;
        }

        if let Some(nick) = &nick {
            self.nicks.remove_if(nick, |_, owner| owner == uid);
        }

        match self.remove_client(uid) {
            Ok(()) => info!(uid = %uid, nick = ?nick, reason = %reason, "Client disconnected"),
            Err(e) => error!(uid = %uid, error = %e, "Failed to remove client"),
        }
    }

    /// Drop the client record for `uid`.
    ///
    /// Fails if the client still lists channel memberships: callers must
    /// leave every channel first.
    pub fn remove_client(&self, uid: &str) -> Result<(), StateError> {
        let client = self
            .client(uid)
            .ok_or_else(|| StateError::UnknownClient(uid.to_string()))?;

        let channels: Vec<String> = client.read().channels.iter().cloned().collect();
        if !channels.is_empty() {
            return Err(StateError::StillInChannels {
                uid: uid.to_string(),
                channels,
            });
        }

        self.clients.remove(uid);
        Ok(())
    }
}
