//! Core types: players, configuration, RNG, and the state snapshot.

pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{DeckPolicy, RulesConfig};
pub use player::{PlayerId, PlayerRoster, PlayerState};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, Property, Route, Trade, TurnPhase};
