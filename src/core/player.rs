//! Player identification and the turn-ordered roster.
//!
//! ## PlayerId
//!
//! Opaque identifier minted by the caller (the session layer of the
//! surrounding system uses GUID-like ids; the engine only needs equality).
//!
//! ## PlayerRoster
//!
//! Insertion-ordered `PlayerId -> PlayerState` map. Iteration order **is**
//! turn order, so the roster is backed by a plain entry vector: order is
//! preserved by construction and survives serde round trips exactly.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Opaque player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Per-player state within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// May go negative; the engine enforces no bankruptcy rule.
    pub money: i64,
    /// Index into the board space loop.
    pub position: usize,
    /// Consumed and cleared the next time turn rotation would pick this player.
    pub skip_next_turn: bool,
}

impl PlayerState {
    /// Starting state: given money, at Go, not skipping.
    #[must_use]
    pub const fn starting(money: i64) -> Self {
        Self {
            money,
            position: 0,
            skip_next_turn: false,
        }
    }
}

/// One roster slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct RosterEntry {
    id: PlayerId,
    state: PlayerState,
}

/// Turn-ordered player map.
///
/// Lookup is linear, which is fine at board game player counts; what
/// matters is that iteration order is insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoster {
    entries: Vec<RosterEntry>,
}

impl PlayerRoster {
    /// Build a roster from ids in turn order, all starting in `initial`.
    ///
    /// Returns `None` if `ids` is empty or contains duplicates.
    #[must_use]
    pub fn new(ids: &[PlayerId], initial: PlayerState) -> Option<Self> {
        if ids.is_empty() {
            return None;
        }
        for (i, id) in ids.iter().enumerate() {
            if ids[i + 1..].contains(id) {
                return None;
            }
        }
        Some(Self {
            entries: ids
                .iter()
                .map(|&id| RosterEntry { id, state: initial })
                .collect(),
        })
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the roster has no players (never the case for a live game).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Get a player's state.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&PlayerState> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.state)
    }

    /// Get a player's state mutably.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.state)
    }

    /// Iterate ids in turn order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Iterate `(id, state)` in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &PlayerState)> {
        self.entries.iter().map(|e| (e.id, &e.state))
    }

    /// The id after `id` in cyclic turn order.
    ///
    /// Returns `None` if `id` is not in the roster.
    #[must_use]
    pub fn next_after(&self, id: PlayerId) -> Option<PlayerId> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries[(idx + 1) % self.entries.len()].id)
    }
}

impl Index<PlayerId> for PlayerRoster {
    type Output = PlayerState;

    fn index(&self, id: PlayerId) -> &PlayerState {
        self.get(id)
            .unwrap_or_else(|| panic!("{id} not in roster"))
    }
}

impl IndexMut<PlayerId> for PlayerRoster {
    fn index_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        self.get_mut(id)
            .unwrap_or_else(|| panic!("{id} not in roster"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u64) -> Vec<PlayerId> {
        (0..n).map(PlayerId::new).collect()
    }

    #[test]
    fn test_roster_preserves_insertion_order() {
        let ids = vec![PlayerId::new(9), PlayerId::new(3), PlayerId::new(7)];
        let roster = PlayerRoster::new(&ids, PlayerState::starting(1000)).unwrap();

        let order: Vec<_> = roster.ids().collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_roster_rejects_empty_and_duplicates() {
        assert!(PlayerRoster::new(&[], PlayerState::starting(0)).is_none());

        let dup = vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(1)];
        assert!(PlayerRoster::new(&dup, PlayerState::starting(0)).is_none());
    }

    #[test]
    fn test_next_after_cycles() {
        let ids = ids(3);
        let roster = PlayerRoster::new(&ids, PlayerState::starting(0)).unwrap();

        assert_eq!(roster.next_after(ids[0]), Some(ids[1]));
        assert_eq!(roster.next_after(ids[1]), Some(ids[2]));
        assert_eq!(roster.next_after(ids[2]), Some(ids[0]));
        assert_eq!(roster.next_after(PlayerId::new(99)), None);
    }

    #[test]
    fn test_get_mut() {
        let ids = ids(2);
        let mut roster = PlayerRoster::new(&ids, PlayerState::starting(500)).unwrap();

        roster.get_mut(ids[1]).unwrap().money -= 200;
        assert_eq!(roster[ids[1]].money, 300);
        assert_eq!(roster[ids[0]].money, 500);
    }

    #[test]
    fn test_serde_round_trip_keeps_order() {
        let ids = vec![PlayerId::new(42), PlayerId::new(1), PlayerId::new(17)];
        let roster = PlayerRoster::new(&ids, PlayerState::starting(1000)).unwrap();

        let json = serde_json::to_string(&roster).unwrap();
        let back: PlayerRoster = serde_json::from_str(&json).unwrap();

        assert_eq!(roster, back);
        let order: Vec<_> = back.ids().collect();
        assert_eq!(order, ids);
    }

    #[test]
    #[should_panic(expected = "not in roster")]
    fn test_index_panics_on_unknown_id() {
        let roster = PlayerRoster::new(&ids(2), PlayerState::starting(0)).unwrap();
        let _ = roster[PlayerId::new(99)];
    }
}
