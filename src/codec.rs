//! JSON serialization for state snapshots.
//!
//! Snapshots are plain data: everything a game needs to resume lives in
//! [`GameState`], and the engine's RNG position is checkpointed separately
//! via [`crate::core::GameRngState`].

use crate::core::GameState;
use crate::error::EngineError;

/// Serialize a state snapshot to a JSON string.
pub fn to_json(state: &GameState) -> Result<String, EngineError> {
    Ok(serde_json::to_string(state)?)
}

/// Deserialize a state snapshot from a JSON string.
pub fn from_json(json: &str) -> Result<GameState, EngineError> {
    Ok(serde_json::from_str(json)?)
}
