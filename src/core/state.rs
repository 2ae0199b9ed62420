//! The game state snapshot.
//!
//! [`GameState`] is the single source of truth for one game in progress.
//! It is plain data: every transition takes a state and returns a new one,
//! and callers persist the result. Route and property sequences use `im`
//! persistent vectors so those per-transition clones are O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{CityPair, City, Space, ROUTE_COMPLETE, SPACES};

use super::config::RulesConfig;
use super::player::{PlayerId, PlayerRoster, PlayerState};

/// Sub-state within one player's turn.
///
/// `End` is transient: handlers that reach it immediately trigger turn
/// rollover, so persisted snapshots only ever carry the other three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Player has not rolled yet.
    Start,
    /// Player landed on a space and must pick one of its options.
    SpaceOption,
    /// Player must name a city pair (track placement or rebellion target).
    RouteSelect,
    /// End-of-turn housekeeping.
    End,
}

/// Accumulating track between two cities. Complete at 4 segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub pair: CityPair,
    pub tracks: u8,
}

impl Route {
    /// A fresh route with no track laid.
    #[must_use]
    pub const fn new(pair: CityPair) -> Self {
        Self { pair, tracks: 0 }
    }

    /// True once all 4 segments are laid.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tracks >= ROUTE_COMPLETE
    }

    /// Partially built routes (2 or 3 segments) can lose track to a
    /// rebellion.
    #[must_use]
    pub fn is_rebellion_target(&self) -> bool {
        self.tracks > 1 && self.tracks < ROUTE_COMPLETE
    }
}

/// An ownership card tied to a city.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub city: City,
    pub owner: PlayerId,
}

/// A bilateral exchange offer awaiting acceptance.
///
/// Each listed property must belong to one of the two parties and flips to
/// the other party on execution. `offerer_money` and `responder_money` are
/// the amounts each side pays in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub offerer: PlayerId,
    pub responder: PlayerId,
    pub properties: Vec<Property>,
    pub offerer_money: i64,
    pub responder_money: i64,
}

/// One game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Turn-ordered roster; iteration order is turn order.
    pub players: PlayerRoster,
    /// At most one entry per unordered city pair.
    pub routes: Vector<Route>,
    /// Drawn property cards, in draw order.
    pub properties: Vector<Property>,
    /// Latched true by the Last Spike; no handler mutates state after it
    /// except the finalizing payout that sets it.
    pub game_over: bool,
    /// Always a key in `players`.
    pub current_player: PlayerId,
    pub phase: TurnPhase,
    /// Last roll for the current player; (0, 0) when unrolled.
    pub dice: (u8, u8),
    pub pending_trade: Option<Trade>,
}

impl GameState {
    /// Create the starting state for the given players in turn order.
    ///
    /// Returns `None` if `ids` is empty or contains duplicates.
    #[must_use]
    pub fn new(ids: &[PlayerId], config: &RulesConfig) -> Option<Self> {
        let players = PlayerRoster::new(ids, PlayerState::starting(config.starting_money))?;
        Some(Self {
            current_player: ids[0],
            players,
            routes: Vector::new(),
            properties: Vector::new(),
            game_over: false,
            phase: TurnPhase::Start,
            dice: (0, 0),
            pending_trade: None,
        })
    }

    /// The space the current player occupies.
    #[must_use]
    pub fn current_space(&self) -> Space {
        SPACES[self.players[self.current_player].position % SPACES.len()]
    }

    /// How many drawn properties a player owns in total.
    #[must_use]
    pub fn owned_count(&self, player: PlayerId) -> usize {
        self.properties.iter().filter(|p| p.owner == player).count()
    }

    /// How many drawn properties a player owns in one city.
    #[must_use]
    pub fn owned_in_city(&self, player: PlayerId, city: City) -> usize {
        self.properties
            .iter()
            .filter(|p| p.owner == player && p.city == city)
            .count()
    }

    /// Index of the route for a pair, if any track was ever laid there.
    #[must_use]
    pub fn route_index(&self, pair: CityPair) -> Option<usize> {
        self.routes.iter().position(|r| r.pair == pair)
    }

    /// The route for a pair, if any track was ever laid there.
    #[must_use]
    pub fn route(&self, pair: CityPair) -> Option<&Route> {
        self.routes.iter().find(|r| r.pair == pair)
    }
}
