//! The rules engine: action dispatch, the turn phase machine, and turn
//! rollover.
//!
//! `RailEngine` owns the configuration and the RNG; game state flows
//! through it. Every public method takes a state snapshot and returns a new
//! one inside an [`Outcome`] — the input is never mutated, so a caller can
//! keep the prior snapshot until the new one is persisted.

use smallvec::SmallVec;

use crate::board::SpaceKind;
use crate::core::{GameRng, GameRngState, GameState, PlayerId, RulesConfig, Trade, TurnPhase};
use crate::error::EngineError;

use super::action::{ActionKind, GameAction, Outcome, RejectReason, TradeResponse};
use super::handlers;
use super::trade::{execute_trade, validate_trade};

/// Advisory list of legal action kinds; fits inline for every phase.
pub type ValidActions = SmallVec<[ActionKind; 4]>;

/// The deterministic rules engine for one or more games.
///
/// Stateless apart from configuration and the RNG: it holds no game, so one
/// engine instance can serve many sessions as long as the caller serializes
/// read-modify-write cycles per session.
pub struct RailEngine {
    config: RulesConfig,
    rng: GameRng,
}

impl RailEngine {
    /// Create an engine with the given configuration and RNG seed.
    #[must_use]
    pub fn new(config: RulesConfig, seed: u64) -> Self {
        Self {
            config,
            rng: GameRng::new(seed),
        }
    }

    /// Create an engine around an existing RNG (e.g. a fork of a host
    /// master RNG).
    #[must_use]
    pub fn from_rng(config: RulesConfig, rng: GameRng) -> Self {
        Self { config, rng }
    }

    /// The engine's rule configuration.
    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Capture the RNG stream position for checkpointing.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Restore the RNG stream position from a checkpoint.
    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
    }

    /// Create the starting state for the given player ids in turn order.
    pub fn new_game(&self, ids: &[PlayerId]) -> Result<GameState, EngineError> {
        if ids.is_empty() {
            return Err(EngineError::EmptyRoster);
        }
        GameState::new(ids, &self.config).ok_or(EngineError::DuplicatePlayer)
    }

    /// The legal action kinds for the current player and phase.
    ///
    /// Advisory: `apply` re-validates every submission regardless.
    #[must_use]
    pub fn valid_actions(&self, state: &GameState) -> ValidActions {
        if state.game_over {
            return SmallVec::new();
        }

        // Rolling and trading are always available at turn start.
        if state.phase == TurnPhase::Start {
            return SmallVec::from_slice(&[ActionKind::Roll, ActionKind::TradeOffer]);
        }

        match (state.current_space().kind, state.phase) {
            (SpaceKind::Land, _) => {
                SmallVec::from_slice(&[ActionKind::Buy, ActionKind::Pass, ActionKind::TradeOffer])
            }
            (SpaceKind::Track, TurnPhase::RouteSelect) => {
                SmallVec::from_slice(&[ActionKind::PlaceTrack])
            }
            (SpaceKind::Track, _) => {
                SmallVec::from_slice(&[ActionKind::Buy, ActionKind::TradeOffer])
            }
            (SpaceKind::Rebellion, TurnPhase::RouteSelect) => {
                SmallVec::from_slice(&[ActionKind::Rebellion])
            }
            (SpaceKind::Rebellion, _) => SmallVec::from_slice(&[ActionKind::Ok]),
            (SpaceKind::LandClaims, _) => SmallVec::from_slice(&[ActionKind::Roll]),
            (
                SpaceKind::Go
                | SpaceKind::SettlerRents
                | SpaceKind::RoadbedCosts
                | SpaceKind::SurveyFees
                | SpaceKind::EndOfTrack
                | SpaceKind::Scandal,
                _,
            ) => SmallVec::from_slice(&[ActionKind::Ok]),
        }
    }

    /// Apply one action, producing a new state and a verdict.
    ///
    /// Fatal errors are reserved for structural problems (unknown player,
    /// a state/action combination no handler covers); ordinary illegal
    /// moves come back as `Verdict::Rejected`.
    pub fn apply(
        &mut self,
        state: &GameState,
        action: &GameAction,
    ) -> Result<Outcome, EngineError> {
        if !state.players.contains(action.player) {
            return Err(EngineError::UnknownPlayer(action.player));
        }
        if state.game_over {
            return Ok(Outcome::rejected(state.clone(), RejectReason::GameOver));
        }

        match action.kind {
            ActionKind::TradeOffer => {
                let on_land = state.phase == TurnPhase::SpaceOption
                    && state.current_space().kind == SpaceKind::Land;
                let on_track = state.phase == TurnPhase::SpaceOption
                    && state.current_space().kind == SpaceKind::Track;
                if state.phase != TurnPhase::Start && !on_land && !on_track {
                    return Ok(Outcome::rejected(state.clone(), RejectReason::WrongPhase));
                }
                match &action.trade {
                    Some(trade) => self.offer_trade(state, trade.clone()),
                    None => Ok(Outcome::rejected(state.clone(), RejectReason::MissingTrade)),
                }
            }
            ActionKind::AcceptTradeOffer => self.resolve_trade(state, TradeResponse::Accept),
            _ => {
                let mut work = state.clone();
                match self.dispatch(&mut work, action)? {
                    Ok(()) => {
                        if work.phase == TurnPhase::End && !work.game_over {
                            roll_over(&mut work);
                        }
                        Ok(Outcome::applied(work))
                    }
                    Err(reason) => Ok(Outcome::rejected(state.clone(), reason)),
                }
            }
        }
    }

    /// Put a trade offer on the table.
    ///
    /// The offer is validated now and again on acceptance, since money and
    /// ownership may change in between.
    pub fn offer_trade(&self, state: &GameState, trade: Trade) -> Result<Outcome, EngineError> {
        for party in [trade.offerer, trade.responder] {
            if !state.players.contains(party) {
                return Err(EngineError::UnknownPlayer(party));
            }
        }
        if state.game_over {
            return Ok(Outcome::rejected(state.clone(), RejectReason::GameOver));
        }

        match validate_trade(state, &trade) {
            Ok(()) => {
                let mut work = state.clone();
                work.pending_trade = Some(trade);
                Ok(Outcome::applied(work))
            }
            Err(reason) => Ok(Outcome::rejected(state.clone(), reason)),
        }
    }

    /// Answer the pending trade offer.
    ///
    /// Declining clears the offer only when the response says so; a failed
    /// acceptance keeps the offer in place for the caller to handle.
    pub fn resolve_trade(
        &self,
        state: &GameState,
        response: TradeResponse,
    ) -> Result<Outcome, EngineError> {
        if state.game_over {
            return Ok(Outcome::rejected(state.clone(), RejectReason::GameOver));
        }

        match response {
            TradeResponse::Accept => {
                let mut work = state.clone();
                match execute_trade(&mut work) {
                    Ok(()) => Ok(Outcome::applied(work)),
                    Err(reason) => Ok(Outcome::rejected(state.clone(), reason)),
                }
            }
            TradeResponse::Decline { clear_offer } => {
                if state.pending_trade.is_none() {
                    return Ok(Outcome::rejected(state.clone(), RejectReason::NoPendingTrade));
                }
                let mut work = state.clone();
                if clear_offer {
                    work.pending_trade = None;
                }
                Ok(Outcome::applied(work))
            }
        }
    }

    /// Route an action to its handler.
    ///
    /// Outer error: structural problem, fatal. Inner error: player-level
    /// rejection.
    fn dispatch(
        &mut self,
        work: &mut GameState,
        action: &GameAction,
    ) -> Result<Result<(), RejectReason>, EngineError> {
        let space = work.current_space().kind;

        match work.phase {
            TurnPhase::Start => match action.kind {
                ActionKind::Roll => {
                    let (d1, d2) = (self.rng.roll_die(), self.rng.roll_die());
                    handlers::move_player(work, &self.config, d1, d2);
                    Ok(Ok(()))
                }
                _ => Ok(Err(RejectReason::WrongPhase)),
            },

            TurnPhase::SpaceOption => Ok(self.space_option(work, space, action.kind)),

            TurnPhase::RouteSelect => match (space, action.kind) {
                (SpaceKind::Track, ActionKind::PlaceTrack) => match action.target {
                    Some(target) => {
                        Ok(handlers::place_track(work, target, &self.config, &mut self.rng))
                    }
                    None => Ok(Err(RejectReason::MissingTarget)),
                },
                (SpaceKind::Rebellion, ActionKind::Rebellion) => match action.target {
                    Some(target) => Ok(handlers::rebellion(work, target)),
                    None => Ok(Err(RejectReason::MissingTarget)),
                },
                (SpaceKind::Track | SpaceKind::Rebellion, _) => {
                    Ok(Err(RejectReason::WrongPhase))
                }
                // RouteSelect is only ever entered from a Track or
                // Rebellion space; anything else is a corrupted state.
                _ => Err(EngineError::UnhandledSpace {
                    space,
                    phase: work.phase,
                }),
            },

            TurnPhase::End => Ok(Err(RejectReason::WrongPhase)),
        }
    }

    /// Dispatch within `SpaceOption` by the landed space's kind.
    fn space_option(
        &mut self,
        work: &mut GameState,
        space: SpaceKind,
        kind: ActionKind,
    ) -> Result<(), RejectReason> {
        match (space, kind) {
            (SpaceKind::Land, ActionKind::Buy) => {
                handlers::buy_property(work, &self.config, &mut self.rng)
            }
            (SpaceKind::Land, ActionKind::Pass) => handlers::pass(work),
            (SpaceKind::Track, ActionKind::Buy) => handlers::buy_track(work),
            (SpaceKind::Rebellion, ActionKind::Ok) => handlers::start_rebellion(work),
            (SpaceKind::Go, ActionKind::Ok) => handlers::pass_go(work, &self.config),
            (SpaceKind::SettlerRents, ActionKind::Ok) => {
                handlers::settler_rents(work, &self.config)
            }
            (SpaceKind::RoadbedCosts, ActionKind::Ok) => {
                handlers::roadbed_costs(work, &self.config)
            }
            (SpaceKind::SurveyFees, ActionKind::Ok) => handlers::survey_fees(work, &self.config),
            (SpaceKind::LandClaims, ActionKind::Roll) => {
                handlers::land_claims(work, &self.config, &mut self.rng)
            }
            (SpaceKind::EndOfTrack, ActionKind::Ok) => handlers::end_of_track(work),
            (SpaceKind::Scandal, ActionKind::Ok) => handlers::scandal(work),
            _ => return Err(RejectReason::WrongPhase),
        }
        Ok(())
    }
}

/// End-of-turn housekeeping: reset dice, return to `Start`, and advance to
/// the next player in roster order, consuming one skip flag per player
/// skipped.
fn roll_over(state: &mut GameState) {
    let mut next = state
        .players
        .next_after(state.current_player)
        .expect("current player is in the roster");

    while state.players[next].skip_next_turn {
        state.players[next].skip_next_turn = false;
        next = state
            .players
            .next_after(next)
            .expect("current player is in the roster");
    }

    state.current_player = next;
    state.phase = TurnPhase::Start;
    state.dice = (0, 0);
}
