//! # last-spike
//!
//! A deterministic, turn-based rules engine for a transcontinental
//! railway-building board game: players circle a board of 24 spaces, buy
//! land in the cities along the line, lay track on the routes between
//! them, and race to drive the Last Spike that links Vancouver to
//! Montreal.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `RailEngine::apply` never mutates its input.
//!    It clones the snapshot (O(1) thanks to `im`), resolves the action on
//!    the copy, and returns it inside an [`Outcome`].
//!
//! 2. **Explicit verdicts**: an illegal move is not an error and not a
//!    silent no-op. It comes back as `Verdict::Rejected` with a
//!    [`RejectReason`], alongside the unchanged state. Fatal
//!    [`EngineError`]s are reserved for structural problems.
//!
//! 3. **Deterministic replay**: all randomness flows through a seeded
//!    [`GameRng`] owned by the engine. Same seed, same actions, same game.
//!    The stream position can be checkpointed with [`GameRngState`].
//!
//! ## Modules
//!
//! - `board`: static data — cities, the space loop, route adjacency,
//!   payout tables
//! - `core`: players, configuration, RNG, the state snapshot
//! - `rules`: actions, per-space handlers, the engine itself
//! - `codec`: JSON snapshots

pub mod board;
pub mod codec;
pub mod core;
pub mod error;
pub mod rules;

pub use crate::board::{City, CityPair, Space, SpaceKind, SPACES, VALID_CITY_PAIRS};
pub use crate::core::{
    DeckPolicy, GameRng, GameRngState, GameState, PlayerId, PlayerRoster, PlayerState, Property,
    Route, RulesConfig, Trade, TurnPhase,
};
pub use crate::error::EngineError;
pub use crate::rules::{
    ActionKind, GameAction, Outcome, RailEngine, RejectReason, TradeResponse, ValidActions,
    Verdict,
};
