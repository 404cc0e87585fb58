//! Registry (component F): the process-wide indexes of clients and channels.
//! Everything the event loop and handlers touch goes through here rather than
//! holding direct references, so ownership stays a tree (clients and channels
//! both live in the registry; nothing points back into it).

use std::collections::HashMap;

use log::info;

use crate::channel::Channel;
use crate::client::Client;
use crate::types::ClientId;

pub struct Registry {
    clients: HashMap<ClientId, Client>,
    nicknames: HashMap<String, ClientId>,
    channels: HashMap<String, Channel>,
    /// The connection password set by `Config`, checked by PASS (§4.H).
    password: String,
}

impl Registry {
    pub fn new(password: String) -> Self {
        Registry {
            clients: HashMap::new(),
            nicknames: HashMap::new(),
            channels: HashMap::new(),
            password,
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn insert_client(&mut self, client: Client) {
        self.clients.insert(client.id, client);
    }

    /// Removes a client from the registry outright. Callers must have already
    /// pulled it out of every channel (see `leave_all_channels`) — this only
    /// drops the client record and its nickname mapping.
    pub fn remove_client(&mut self, id: ClientId) -> Option<Client> {
        let client = self.clients.remove(&id)?;
        if !client.nickname.is_empty() {
            self.nicknames.remove(&client.nickname);
        }
        Some(client)
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn client_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }

    /// Snapshot of every current client id paired with a reference, for the
    /// event loop's per-cycle quitting sweep and shutdown teardown.
    pub fn clients_iter(&self) -> impl Iterator<Item = (ClientId, &Client)> {
        self.clients.iter().map(|(&id, c)| (id, c))
    }

    pub fn client_by_nick(&self, nick: &str) -> Option<ClientId> {
        self.nicknames.get(nick).copied()
    }

    /// True if `nick` is held by some client other than `except` (NICK's
    /// uniqueness check must skip the caller's own record, §4.D).
    pub fn nickname_in_use(&self, nick: &str, except: ClientId) -> bool {
        matches!(self.nicknames.get(nick), Some(&id) if id != except)
    }

    /// Updates both the nickname index and the client's own field.
    pub fn set_nickname(&mut self, id: ClientId, new_nick: &str) {
        if let Some(client) = self.clients.get(&id) {
            if !client.nickname.is_empty() {
                self.nicknames.remove(&client.nickname);
            }
        }
        self.nicknames.insert(new_nick.to_string(), id);
        if let Some(client) = self.clients.get_mut(&id) {
            client.nickname = new_nick.to_string();
        }
    }

    pub fn nick_of(&self, id: ClientId) -> String {
        self.clients
            .get(&id)
            .map(|c| c.display_nick().to_string())
            .unwrap_or_else(|| "*".to_string())
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(name)
    }

    /// Registering a channel is the act of inserting it in the name index (§4.F).
    pub fn create_channel(&mut self, name: String, creator: ClientId, created_ts: u64) {
        info!("channel {name} created");
        self.channels.insert(name.clone(), Channel::new(name, creator, created_ts));
    }

    /// Removes `name` if it is currently empty. Returns true if it was removed.
    pub fn remove_channel_if_empty(&mut self, name: &str) -> bool {
        let empty = self.channels.get(name).map(Channel::is_empty).unwrap_or(false);
        if empty {
            info!("channel {name} destroyed (last occupant left)");
            self.channels.remove(name);
        }
        empty
    }

    pub fn channels_occupied_by(&self, id: ClientId) -> Vec<String> {
        self.channels
            .iter()
            .filter(|(_, chan)| chan.is_occupant(id))
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn channel_count_for(&self, id: ClientId) -> usize {
        self.channels.values().filter(|chan| chan.is_occupant(id)).count()
    }

    pub fn queue_line(&mut self, id: ClientId, line: &str) {
        if let Some(client) = self.clients.get_mut(&id) {
            client.queue(line);
        }
    }

    pub fn broadcast(&mut self, ids: &[ClientId], line: &str) {
        for &id in ids {
            self.queue_line(id, line);
        }
    }

    /// Removes `id` from every channel it occupies, destroying any channel left
    /// empty in the process. Returns, for each channel the client was in, the
    /// channel's name and a snapshot of the occupants who remain — the caller
    /// broadcasts the departure envelope to that snapshot (PART/KICK/QUIT all
    /// funnel through this so the snapshot-then-mutate ordering in §5 is
    /// enforced in exactly one place).
    pub fn leave_all_channels(&mut self, id: ClientId) -> Vec<(String, Vec<ClientId>)> {
        let names = self.channels_occupied_by(id);
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            if let Some(chan) = self.channels.get_mut(&name) {
                let remaining = chan.snapshot_except(id);
                chan.remove_occupant(id);
                let now_empty = chan.is_empty();
                out.push((name.clone(), remaining));
                if now_empty {
                    info!("channel {name} destroyed (last occupant left)");
                    self.channels.remove(&name);
                }
            }
        }
        out
    }
}
