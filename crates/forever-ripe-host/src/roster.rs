//! Player directory backed by the set of players the host has seen.

use std::collections::BTreeMap;

use forever_ripe_core::PlayerDirectory;
use forever_ripe_types::{PlayerHandle, PlayerId};

/// Players currently known to the host, online or sleeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRoster {
    players: BTreeMap<PlayerId, PlayerHandle>,
}

impl PlayerRoster {
    /// An empty roster.
    pub const fn new() -> Self {
        Self {
            players: BTreeMap::new(),
        }
    }

    /// Add or replace a player.
    pub fn join(&mut self, id: PlayerId, display_name: impl Into<String>) {
        self.players.insert(id, PlayerHandle::new(id, display_name));
    }

    /// Forget a player entirely (e.g. after a wipe).
    pub fn forget(&mut self, id: PlayerId) -> bool {
        self.players.remove(&id).is_some()
    }

    /// Number of known players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether no players are known.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl PlayerDirectory for PlayerRoster {
    fn find_by_id(&self, id: PlayerId) -> Option<PlayerHandle> {
        if id.is_unset() {
            return None;
        }
        self.players.get(&id).cloned()
    }
}
