use crate::types::ClientId;

/// The fixed 5-tuple of channel mode bits over `{i,t,k,o,l}` (§3).
#[derive(Debug, Clone, Default)]
pub struct ChannelModes {
    pub invite_only: bool,
    pub topic_locked: bool,
    pub key: Option<String>,
    /// Set true on every promotion, false on every demotion — a simple bit, not a
    /// recomputed "does an operator currently exist" check (§3: "set by promotion,
    /// cleared by demotion").
    pub any_operator_ever_set: bool,
    pub limit: Option<u32>,
}

/// Channel record (component E), created on first JOIN and destroyed when the
/// last occupant leaves. Membership order is insertion order throughout, since
/// NAMES listing and JOIN broadcast order are observable (§4.F).
pub struct Channel {
    pub name: String,
    pub topic: String,
    pub topic_author: String,
    pub topic_ts: String,
    pub members: Vec<ClientId>,
    pub operators: Vec<ClientId>,
    pub modes: ChannelModes,
    pub created_ts: u64,
}

impl Channel {
    pub fn new(name: String, creator: ClientId, created_ts: u64) -> Self {
        Channel {
            name,
            topic: String::new(),
            topic_author: String::new(),
            topic_ts: String::new(),
            members: Vec::new(),
            operators: vec![creator],
            modes: ChannelModes::default(),
            created_ts,
        }
    }

    pub fn is_operator(&self, id: ClientId) -> bool {
        self.operators.contains(&id)
    }

    pub fn is_member(&self, id: ClientId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_occupant(&self, id: ClientId) -> bool {
        self.is_operator(id) || self.is_member(id)
    }

    pub fn occupant_count(&self) -> usize {
        self.members.len() + self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupant_count() == 0
    }

    pub fn add_member(&mut self, id: ClientId) {
        if !self.is_occupant(id) {
            self.members.push(id);
        }
    }

    pub fn add_operator(&mut self, id: ClientId) {
        if !self.is_occupant(id) {
            self.operators.push(id);
        }
    }

    /// Removes the given client from whichever of members/operators it occupies.
    /// Returns true if it was present.
    pub fn remove_occupant(&mut self, id: ClientId) -> bool {
        if let Some(pos) = self.members.iter().position(|&m| m == id) {
            self.members.remove(pos);
            return true;
        }
        if let Some(pos) = self.operators.iter().position(|&m| m == id) {
            self.operators.remove(pos);
            return true;
        }
        false
    }

    /// `+o <nick>`: promotes a regular member to operator. Succeeds only if the
    /// client is currently a regular member.
    pub fn promote(&mut self, id: ClientId) -> bool {
        if let Some(pos) = self.members.iter().position(|&m| m == id) {
            self.members.remove(pos);
            self.operators.push(id);
            self.modes.any_operator_ever_set = true;
            true
        } else {
            false
        }
    }

    /// `-o <nick>`: demotes an operator to a regular member. Succeeds only if the
    /// client is currently an operator.
    pub fn demote(&mut self, id: ClientId) -> bool {
        if let Some(pos) = self.operators.iter().position(|&m| m == id) {
            self.operators.remove(pos);
            self.members.push(id);
            self.modes.any_operator_ever_set = false;
            true
        } else {
            false
        }
    }

    /// `get_activeModes()`: `+<letters>` over modes currently on, excluding `o`;
    /// empty modes produce `+`.
    pub fn active_modes_string(&self) -> String {
        let mut letters = String::new();
        if self.modes.invite_only {
            letters.push('i');
        }
        if self.modes.topic_locked {
            letters.push('t');
        }
        if self.modes.key.is_some() {
            letters.push('k');
        }
        if self.modes.limit.is_some() {
            letters.push('l');
        }
        format!("+{letters}")
    }

    /// `get_memberList()`: `@nick` per operator then `nick` per regular member,
    /// single-space separated, operators first.
    pub fn member_list_string(&self, nick_of: impl Fn(ClientId) -> String) -> String {
        let mut parts: Vec<String> = self.operators.iter().map(|&id| format!("@{}", nick_of(id))).collect();
        parts.extend(self.members.iter().map(|&id| nick_of(id)));
        parts.join(" ")
    }

    /// Snapshot of every current occupant (operators then members) for a
    /// broadcast, so structural mutation during iteration can never occur (§5).
    pub fn snapshot_all(&self) -> Vec<ClientId> {
        let mut all = self.operators.clone();
        all.extend(self.members.iter().copied());
        all
    }

    /// Same as `snapshot_all` but omitting one client, used to echo a client's own
    /// action to the rest of the channel.
    pub fn snapshot_except(&self, exclude: ClientId) -> Vec<ClientId> {
        self.snapshot_all().into_iter().filter(|&id| id != exclude).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: usize) -> ClientId {
        mio::Token(n)
    }

    #[test]
    fn creator_is_sole_operator() {
        let chan = Channel::new("#dev".to_string(), id(1), 0);
        assert!(chan.is_operator(id(1)));
        assert_eq!(chan.occupant_count(), 1);
    }

    #[test]
    fn promote_moves_member_to_operator() {
        let mut chan = Channel::new("#dev".to_string(), id(1), 0);
        chan.add_member(id(2));
        assert!(chan.promote(id(2)));
        assert!(chan.is_operator(id(2)));
        assert!(!chan.is_member(id(2)));
        assert!(chan.modes.any_operator_ever_set);
    }

    #[test]
    fn promote_fails_if_not_a_member() {
        let mut chan = Channel::new("#dev".to_string(), id(1), 0);
        assert!(!chan.promote(id(99)));
    }

    #[test]
    fn demote_clears_any_operator_flag() {
        let mut chan = Channel::new("#dev".to_string(), id(1), 0);
        chan.add_member(id(2));
        chan.promote(id(2));
        assert!(chan.demote(id(2)));
        assert!(chan.is_member(id(2)));
        assert!(!chan.modes.any_operator_ever_set);
    }

    #[test]
    fn active_modes_string_excludes_o_and_handles_empty() {
        let mut chan = Channel::new("#dev".to_string(), id(1), 0);
        assert_eq!(chan.active_modes_string(), "+");
        chan.modes.invite_only = true;
        chan.modes.limit = Some(10);
        assert_eq!(chan.active_modes_string(), "+il");
    }

    #[test]
    fn member_list_lists_operators_first_with_at_prefix() {
        let mut chan = Channel::new("#dev".to_string(), id(1), 0);
        chan.add_member(id(2));
        let list = chan.member_list_string(|c| format!("u{}", c.0));
        assert_eq!(list, "@u1 u2");
    }

    #[test]
    fn empty_after_last_occupant_removed() {
        let mut chan = Channel::new("#dev".to_string(), id(1), 0);
        assert!(chan.remove_occupant(id(1)));
        assert!(chan.is_empty());
    }

    #[test]
    fn snapshot_except_omits_given_client() {
        let mut chan = Channel::new("#dev".to_string(), id(1), 0);
        chan.add_member(id(2));
        chan.add_member(id(3));
        let snap = chan.snapshot_except(id(2));
        assert_eq!(snap, vec![id(1), id(3)]);
    }
}
