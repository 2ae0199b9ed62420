//! The property deck.
//!
//! The deck is never stored: it is 5 copies of each city minus whatever has
//! already been drawn, regardless of who owns the drawn cards now. A draw
//! picks uniformly among the remainder and assigns to the current player.

use rustc_hash::FxHashMap;

use crate::board::{City, PROPERTIES_PER_CITY};
use crate::core::{GameRng, GameState, Property};

/// Compute the undrawn remainder of the deck.
#[must_use]
pub fn remaining_deck(state: &GameState) -> Vec<City> {
    let mut drawn: FxHashMap<City, usize> = FxHashMap::default();
    for property in &state.properties {
        *drawn.entry(property.city).or_default() += 1;
    }

    let mut deck = Vec::with_capacity(City::ALL.len() * PROPERTIES_PER_CITY);
    for city in City::ALL {
        let taken = drawn.get(&city).copied().unwrap_or(0);
        for _ in taken..PROPERTIES_PER_CITY {
            deck.push(city);
        }
    }
    deck
}

/// Draw one property for the current player.
///
/// Returns `false` (state untouched) when the deck is exhausted.
pub(crate) fn draw_property(state: &mut GameState, rng: &mut GameRng) -> bool {
    let deck = remaining_deck(state);
    match rng.choose(&deck) {
        Some(&city) => {
            state.properties.push_back(Property {
                city,
                owner: state.current_player,
            });
            true
        }
        None => false,
    }
}
