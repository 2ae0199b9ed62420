//! Space-effect handlers.
//!
//! One transition per board effect. Each handler mutates a working copy of
//! the state owned by the dispatcher and leaves the phase it resolves to:
//! `End` for effects that finish the sub-turn, `RouteSelect` for the two
//! that need a city pair, `SpaceOption` after a move.

use crate::board::{is_valid_pair, CityPair, ROUTE_COMPLETE, SPACES};
use crate::core::{DeckPolicy, GameRng, GameState, Route, RulesConfig, TurnPhase};

use super::action::RejectReason;
use super::deck::draw_property;
use super::network::{finish_route, rebellion_targets};

/// Debit the current player the cost of the space they occupy.
fn pay_space_cost(state: &mut GameState) -> i64 {
    let cost = state.current_space().cost;
    state.players[state.current_player].money -= cost;
    cost
}

/// Roll, advance, wrap. Wrapping credits the pass-go subsidy.
pub(crate) fn move_player(state: &mut GameState, config: &RulesConfig, d1: u8, d2: u8) {
    state.dice = (d1, d2);
    let player = &mut state.players[state.current_player];
    let landed = player.position + d1 as usize + d2 as usize;
    if landed >= SPACES.len() {
        player.position = landed - SPACES.len();
        player.money += config.pass_go_subsidy;
    } else {
        player.position = landed;
    }
    state.phase = TurnPhase::SpaceOption;
}

/// Go: credit the subsidy.
pub(crate) fn pass_go(state: &mut GameState, config: &RulesConfig) {
    state.players[state.current_player].money += config.pass_go_subsidy;
    state.phase = TurnPhase::End;
}

/// SettlerRents: collect rent per owned property.
pub(crate) fn settler_rents(state: &mut GameState, config: &RulesConfig) {
    let rent = config.rent_per_property * state.owned_count(state.current_player) as i64;
    state.players[state.current_player].money += rent;
    state.phase = TurnPhase::End;
}

/// RoadbedCosts: pay upkeep per owned property.
pub(crate) fn roadbed_costs(state: &mut GameState, config: &RulesConfig) {
    let upkeep = config.rent_per_property * state.owned_count(state.current_player) as i64;
    state.players[state.current_player].money -= upkeep;
    state.phase = TurnPhase::End;
}

/// SurveyFees: collect the fee from every other player.
pub(crate) fn survey_fees(state: &mut GameState, config: &RulesConfig) {
    let others = state.players.len() as i64 - 1;
    let mover = state.current_player;
    state.players[mover].money += config.survey_fee * others;

    for id in state.players.ids().collect::<Vec<_>>() {
        if id != mover {
            state.players[id].money -= config.survey_fee;
        }
    }
    state.phase = TurnPhase::End;
}

/// LandClaims: roll and pay per pip.
pub(crate) fn land_claims(state: &mut GameState, config: &RulesConfig, rng: &mut GameRng) {
    let (d1, d2) = (rng.roll_die(), rng.roll_die());
    state.dice = (d1, d2);
    state.players[state.current_player].money -=
        config.claim_cost_per_pip * (d1 as i64 + d2 as i64);
    state.phase = TurnPhase::End;
}

/// Buy on a Land space: pay the space cost, then draw a property.
///
/// When the deck is exhausted the draw is a no-op; whether the cost stands
/// is the configured [`DeckPolicy`].
pub(crate) fn buy_property(state: &mut GameState, config: &RulesConfig, rng: &mut GameRng) {
    let cost = pay_space_cost(state);
    let drawn = draw_property(state, rng);
    if !drawn && config.deck_policy == DeckPolicy::RefundWhenExhausted {
        state.players[state.current_player].money += cost;
    }
    state.phase = TurnPhase::End;
}

/// Buy on a Track space: pay the space cost, then pick where to lay track.
pub(crate) fn buy_track(state: &mut GameState) {
    pay_space_cost(state);
    state.phase = TurnPhase::RouteSelect;
}

/// Scandal: pay the fine.
pub(crate) fn scandal(state: &mut GameState) {
    pay_space_cost(state);
    state.phase = TurnPhase::End;
}

/// Rebellion space acknowledged: pick a target if any exists, otherwise
/// the effect fizzles.
pub(crate) fn start_rebellion(state: &mut GameState) {
    if rebellion_targets(state).is_empty() {
        state.phase = TurnPhase::End;
    } else {
        state.phase = TurnPhase::RouteSelect;
    }
}

/// Remove one track segment from a named rebellion target.
pub(crate) fn rebellion(state: &mut GameState, target: CityPair) -> Result<(), RejectReason> {
    let idx = state
        .route_index(target)
        .filter(|&i| state.routes[i].is_rebellion_target())
        .ok_or(RejectReason::InvalidRebellionTarget)?;

    state.routes[idx].tracks -= 1;
    state.phase = TurnPhase::End;
    Ok(())
}

/// Lay one track segment on a named pair.
///
/// First-ever track on a route awards the mover a drawn property; the
/// fourth segment completes the route and settles payouts.
pub(crate) fn place_track(
    state: &mut GameState,
    target: CityPair,
    config: &RulesConfig,
    rng: &mut GameRng,
) -> Result<(), RejectReason> {
    if !is_valid_pair(target) {
        return Err(RejectReason::UnknownCityPair);
    }

    let idx = match state.route_index(target) {
        Some(i) if state.routes[i].tracks >= ROUTE_COMPLETE => {
            return Err(RejectReason::RouteFull)
        }
        Some(i) => i,
        None => {
            state.routes.push_back(Route::new(target));
            state.routes.len() - 1
        }
    };

    let first_track = state.routes[idx].tracks == 0;
    state.routes[idx].tracks += 1;
    let completed = state.routes[idx].tracks == ROUTE_COMPLETE;

    if first_track {
        draw_property(state, rng);
    }
    if completed {
        finish_route(state, target, config);
    }

    state.phase = TurnPhase::End;
    Ok(())
}

/// EndOfTrack: the mover forfeits their next turn.
pub(crate) fn end_of_track(state: &mut GameState) {
    state.players[state.current_player].skip_next_turn = true;
    state.phase = TurnPhase::End;
}

/// Decline the space's option; nothing changes but the phase.
pub(crate) fn pass(state: &mut GameState) {
    state.phase = TurnPhase::End;
}
