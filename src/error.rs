//! Fatal engine errors.
//!
//! Player-level illegal moves are not errors; they are
//! [`Verdict::Rejected`](crate::rules::Verdict) outcomes. `EngineError`
//! covers the conditions that signal a programming or data error in the
//! caller, plus serialization failures.

use crate::board::SpaceKind;
use crate::core::{PlayerId, TurnPhase};

/// A fatal error: the caller passed something structurally wrong, or a
/// persisted state could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("cannot create a game with no players")]
    EmptyRoster,

    #[error("duplicate player id in roster")]
    DuplicatePlayer,

    #[error("{0} is not part of this game")]
    UnknownPlayer(PlayerId),

    #[error("no handler for space {space:?} in phase {phase:?}")]
    UnhandledSpace { space: SpaceKind, phase: TurnPhase },

    #[error("malformed game state: {0}")]
    Codec(#[from] serde_json::Error),
}
