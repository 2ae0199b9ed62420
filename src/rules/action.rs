//! Actions submitted to the engine and the outcomes they produce.
//!
//! An action is a kind tag plus the acting player and, where the kind needs
//! one, a target city pair or a trade payload. The engine rejects illegal
//! submissions with an explicit [`Verdict`] instead of silently returning
//! the input state, so callers never have to diff snapshots to learn
//! whether anything happened.

use serde::{Deserialize, Serialize};

use crate::board::CityPair;
use crate::core::{GameState, PlayerId, Trade};

/// The kinds of action a player can submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Roll and move (at turn start), or resolve a LandClaims space.
    Roll,
    /// Acknowledge the current space and let its effect resolve.
    Ok,
    /// Decline the current space's purchase option.
    Pass,
    /// Buy the landed-on space: a property on Land, track rights on Track.
    Buy,
    /// Lay one track segment on a named city pair.
    PlaceTrack,
    /// Remove one track segment from a named rebellion target.
    Rebellion,
    /// Put a trade offer on the table.
    TradeOffer,
    /// Accept the pending trade offer.
    AcceptTradeOffer,
}

/// A complete player action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAction {
    pub kind: ActionKind,
    /// The acting player. Callers verify this matches the session
    /// participant and the current player before submitting; the engine
    /// only checks roster membership.
    pub player: PlayerId,
    /// Target pair for `PlaceTrack` / `Rebellion`.
    pub target: Option<CityPair>,
    /// Payload for `TradeOffer`.
    pub trade: Option<Trade>,
}

impl GameAction {
    /// An action with no target or payload.
    #[must_use]
    pub fn new(kind: ActionKind, player: PlayerId) -> Self {
        Self {
            kind,
            player,
            target: None,
            trade: None,
        }
    }

    /// A targeted action (`PlaceTrack`, `Rebellion`).
    #[must_use]
    pub fn with_target(kind: ActionKind, player: PlayerId, target: CityPair) -> Self {
        Self {
            kind,
            player,
            target: Some(target),
            trade: None,
        }
    }

    /// A trade offer.
    #[must_use]
    pub fn trade_offer(player: PlayerId, trade: Trade) -> Self {
        Self {
            kind: ActionKind::TradeOffer,
            player,
            target: None,
            trade: Some(trade),
        }
    }
}

/// Why an action was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The game has ended; only the snapshot survives.
    GameOver,
    /// The action kind is not legal for the current phase and space.
    WrongPhase,
    /// A targeted action arrived without a target.
    MissingTarget,
    /// The pair is not in the valid-adjacency table.
    UnknownCityPair,
    /// The route already has 4 tracks.
    RouteFull,
    /// The named route is not a rebellion target (needs 2 or 3 tracks).
    InvalidRebellionTarget,
    /// `TradeOffer` arrived without a trade payload.
    MissingTrade,
    /// No trade offer is pending.
    NoPendingTrade,
    /// The two trade parties must be distinct roster members.
    TradePartiesNotDistinct,
    /// A party cannot cover their stated money contribution.
    InsufficientFunds,
    /// A listed property belongs to neither trade party.
    UntradableProperty,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            RejectReason::GameOver => "game is over",
            RejectReason::WrongPhase => "action not legal in this phase",
            RejectReason::MissingTarget => "action requires a city pair target",
            RejectReason::UnknownCityPair => "city pair is not in the adjacency table",
            RejectReason::RouteFull => "route already complete",
            RejectReason::InvalidRebellionTarget => "route is not a rebellion target",
            RejectReason::MissingTrade => "trade offer requires a trade payload",
            RejectReason::NoPendingTrade => "no trade offer is pending",
            RejectReason::TradePartiesNotDistinct => "trade parties must be distinct players",
            RejectReason::InsufficientFunds => "a trade party cannot cover their contribution",
            RejectReason::UntradableProperty => "a traded property belongs to neither party",
        };
        f.write_str(msg)
    }
}

/// Whether a transition applied or was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Applied,
    Rejected(RejectReason),
}

/// Result of a transition: the (possibly unchanged) state plus the verdict.
///
/// On rejection `state` is the unchanged input snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub state: GameState,
    pub verdict: Verdict,
}

impl Outcome {
    pub(crate) fn applied(state: GameState) -> Self {
        Self {
            state,
            verdict: Verdict::Applied,
        }
    }

    pub(crate) fn rejected(state: GameState, reason: RejectReason) -> Self {
        Self {
            state,
            verdict: Verdict::Rejected(reason),
        }
    }

    /// True when the action changed the state.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.verdict == Verdict::Applied
    }
}

/// How a responder answers a pending trade offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeResponse {
    Accept,
    /// Decline; the caller decides whether the offer is cleared from the
    /// state or left for the offerer to amend.
    Decline { clear_offer: bool },
}
