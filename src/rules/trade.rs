//! Bilateral trades: validation and execution.
//!
//! A trade names two parties, the money each contributes, and a set of
//! properties to exchange. Every listed property must currently belong to
//! one of the two parties and flips to the *other* party on execution.

use crate::core::{GameState, Trade};

use super::action::RejectReason;

/// Check a trade against the current state.
///
/// Roster membership of the parties is the caller's fatal-error check; this
/// covers the player-level rejection conditions.
pub(crate) fn validate_trade(state: &GameState, trade: &Trade) -> Result<(), RejectReason> {
    if trade.offerer == trade.responder {
        return Err(RejectReason::TradePartiesNotDistinct);
    }

    let offerer = &state.players[trade.offerer];
    let responder = &state.players[trade.responder];
    if offerer.money < trade.offerer_money || responder.money < trade.responder_money {
        return Err(RejectReason::InsufficientFunds);
    }

    for property in &trade.properties {
        if property.owner != trade.offerer && property.owner != trade.responder {
            return Err(RejectReason::UntradableProperty);
        }
        // The listed card must actually exist in the drawn pool.
        if !state
            .properties
            .iter()
            .any(|p| p.city == property.city && p.owner == property.owner)
        {
            return Err(RejectReason::UntradableProperty);
        }
    }

    Ok(())
}

/// Execute the pending trade offer.
///
/// On success money deltas net to zero across the pair, each listed
/// property flips to the other party, and the pending offer is cleared.
/// On rejection the state (pending offer included) is untouched.
pub(crate) fn execute_trade(state: &mut GameState) -> Result<(), RejectReason> {
    let trade = state
        .pending_trade
        .clone()
        .ok_or(RejectReason::NoPendingTrade)?;

    validate_trade(state, &trade)?;

    state.players[trade.offerer].money += trade.responder_money - trade.offerer_money;
    state.players[trade.responder].money += trade.offerer_money - trade.responder_money;

    for traded in &trade.properties {
        let new_owner = if traded.owner == trade.offerer {
            trade.responder
        } else {
            trade.offerer
        };
        // validate_trade guarantees a matching entry exists.
        if let Some(idx) = state
            .properties
            .iter()
            .position(|p| p.city == traded.city && p.owner == traded.owner)
        {
            state.properties[idx].owner = new_owner;
        }
    }

    state.pending_trade = None;
    Ok(())
}
