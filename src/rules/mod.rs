//! Rules: actions, the engine, and the per-space resolution logic.

pub mod action;
pub mod deck;
pub mod engine;
mod handlers;
pub mod network;
mod trade;

pub use action::{
    ActionKind, GameAction, Outcome, RejectReason, TradeResponse, Verdict,
};
pub use deck::remaining_deck;
pub use engine::{RailEngine, ValidActions};
pub use network::{is_game_over, rebellion_targets};
