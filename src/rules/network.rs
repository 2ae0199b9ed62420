//! Route network: rebellion targets, completion payouts, and the
//! Last Spike game-over check.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::{city_values, City, CityPair, MIN_COMPLETED_ROUTES_FOR_GAME_OVER};
use crate::core::{GameState, PlayerId, RulesConfig};

/// Routes with 2 or 3 tracks, eligible to lose a segment to a rebellion.
#[must_use]
pub fn rebellion_targets(state: &GameState) -> Vec<CityPair> {
    state
        .routes
        .iter()
        .filter(|r| r.is_rebellion_target())
        .map(|r| r.pair)
        .collect()
}

/// Settle a just-completed route: pay every player from the city value
/// tables for both endpoints, then check whether this was the Last Spike.
///
/// Payouts use the table entry for each player's owned count in the city,
/// including the zero-count entry.
pub(crate) fn finish_route(state: &mut GameState, finished: CityPair, config: &RulesConfig) {
    let mut awards: FxHashMap<PlayerId, i64> = FxHashMap::default();

    for city in finished.cities() {
        let table = city_values(city);
        for id in state.players.ids().collect::<Vec<_>>() {
            let owned = state.owned_in_city(id, city).min(table.len() - 1);
            *awards.entry(id).or_default() += table[owned];
        }
    }

    for (id, award) in awards {
        state.players[id].money += award;
    }

    if is_game_over(state) {
        state.players[state.current_player].money += config.last_spike_bonus;
        state.game_over = true;
    }
}

/// The game ends once at least four routes are complete *and* the completed
/// routes connect the two termini.
#[must_use]
pub fn is_game_over(state: &GameState) -> bool {
    let completed: Vec<CityPair> = state
        .routes
        .iter()
        .filter(|r| r.is_complete())
        .map(|r| r.pair)
        .collect();

    if completed.len() < MIN_COMPLETED_ROUTES_FOR_GAME_OVER {
        return false;
    }

    connects_termini(&completed)
}

/// BFS over completed-route edges from the west terminus to the east.
fn connects_termini(edges: &[CityPair]) -> bool {
    let mut graph: FxHashMap<City, Vec<City>> = FxHashMap::default();
    for pair in edges {
        graph.entry(pair.west()).or_default().push(pair.east());
        graph.entry(pair.east()).or_default().push(pair.west());
    }

    if !graph.contains_key(&City::WEST_TERMINUS) || !graph.contains_key(&City::EAST_TERMINUS) {
        return false;
    }

    let mut queue = VecDeque::new();
    let mut visited = FxHashSet::default();
    queue.push_back(City::WEST_TERMINUS);
    visited.insert(City::WEST_TERMINUS);

    while let Some(city) = queue.pop_front() {
        if city == City::EAST_TERMINUS {
            return true;
        }
        if let Some(neighbors) = graph.get(&city) {
            for &next in neighbors {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    false
}
