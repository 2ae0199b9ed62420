//! The fixed board loop and its static tables.
//!
//! Space layout, the valid-adjacency table, and the per-city payout tables
//! are configuration data, not rules: handlers read them but never change
//! them.

use serde::{Deserialize, Serialize};

use super::city::{City, CityPair};

/// Copies of each city in the property deck.
pub const PROPERTIES_PER_CITY: usize = 5;

/// Track segments needed to complete a route.
pub const ROUTE_COMPLETE: u8 = 4;

/// Completed routes required before the terminus connectivity check can
/// end the game.
pub const MIN_COMPLETED_ROUTES_FOR_GAME_OVER: usize = 4;

/// Category of a board space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceKind {
    /// Start space; passing it credits the subsidy.
    Go,
    /// Purchasable land claim: buy a property card or pass.
    Land,
    /// Track space: buy the right to lay a track segment.
    Track,
    /// A rebellion breaks out on a partially built route.
    Rebellion,
    /// Collect rent per owned property.
    SettlerRents,
    /// Pay roadbed upkeep per owned property.
    RoadbedCosts,
    /// Collect survey fees from every other player.
    SurveyFees,
    /// Roll dice, pay per pip for disputed land claims.
    LandClaims,
    /// Forfeit the next turn.
    EndOfTrack,
    /// Pay the scandal fine.
    Scandal,
}

/// One space on the board loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub kind: SpaceKind,
    /// Cost charged by Buy/Scandal handlers; 0 for free spaces.
    pub cost: i64,
}

impl Space {
    const fn new(kind: SpaceKind, cost: i64) -> Self {
        Self { kind, cost }
    }
}

const TRACK_COST: i64 = 2_000;
const LAND_COST: i64 = 1_500;
const SCANDAL_FINE: i64 = 2_500;

/// The board: a fixed loop of 24 spaces, Go at index 0.
pub const SPACES: [Space; 24] = [
    Space::new(SpaceKind::Go, 0),
    Space::new(SpaceKind::Track, TRACK_COST),
    Space::new(SpaceKind::Land, LAND_COST),
    Space::new(SpaceKind::SettlerRents, 0),
    Space::new(SpaceKind::Track, TRACK_COST),
    Space::new(SpaceKind::Rebellion, 0),
    Space::new(SpaceKind::Land, LAND_COST),
    Space::new(SpaceKind::SurveyFees, 0),
    Space::new(SpaceKind::Track, TRACK_COST),
    Space::new(SpaceKind::Scandal, SCANDAL_FINE),
    Space::new(SpaceKind::Land, LAND_COST),
    Space::new(SpaceKind::LandClaims, 0),
    Space::new(SpaceKind::Track, TRACK_COST),
    Space::new(SpaceKind::RoadbedCosts, 0),
    Space::new(SpaceKind::Land, LAND_COST),
    Space::new(SpaceKind::EndOfTrack, 0),
    Space::new(SpaceKind::Track, TRACK_COST),
    Space::new(SpaceKind::Rebellion, 0),
    Space::new(SpaceKind::Land, LAND_COST),
    Space::new(SpaceKind::LandClaims, 0),
    Space::new(SpaceKind::Track, TRACK_COST),
    Space::new(SpaceKind::SettlerRents, 0),
    Space::new(SpaceKind::Land, LAND_COST),
    Space::new(SpaceKind::Scandal, SCANDAL_FINE),
];

/// City pairs that may ever receive track.
///
/// The main line west to east, plus the prairie and lakehead alternates.
pub const VALID_CITY_PAIRS: [CityPair; 11] = [
    CityPair::new(City::Vancouver, City::Kamloops),
    CityPair::new(City::Kamloops, City::Calgary),
    CityPair::new(City::Kamloops, City::Regina),
    CityPair::new(City::Calgary, City::Regina),
    CityPair::new(City::Calgary, City::Winnipeg),
    CityPair::new(City::Regina, City::Winnipeg),
    CityPair::new(City::Winnipeg, City::ThunderBay),
    CityPair::new(City::ThunderBay, City::Sudbury),
    CityPair::new(City::Sudbury, City::Ottawa),
    CityPair::new(City::Sudbury, City::Montreal),
    CityPair::new(City::Ottawa, City::Montreal),
];

/// Check whether a pair is in the static adjacency table.
#[must_use]
pub fn is_valid_pair(pair: CityPair) -> bool {
    VALID_CITY_PAIRS.contains(&pair)
}

/// Route-completion payout per player, keyed by how many properties the
/// player owns in the city (0..=5). The zero-count entry is part of the
/// table and must be looked up, not assumed.
#[must_use]
pub const fn city_values(city: City) -> [i64; 6] {
    match city {
        City::Vancouver => [0, 2_000, 5_000, 9_000, 14_000, 20_000],
        City::Kamloops => [0, 1_000, 3_000, 6_000, 10_000, 15_000],
        City::Calgary => [0, 2_000, 4_000, 8_000, 12_000, 18_000],
        City::Regina => [0, 1_000, 3_000, 6_000, 10_000, 15_000],
        City::Winnipeg => [0, 2_000, 4_000, 8_000, 12_000, 18_000],
        City::ThunderBay => [0, 1_000, 3_000, 6_000, 10_000, 15_000],
        City::Sudbury => [0, 1_000, 3_000, 6_000, 10_000, 15_000],
        City::Ottawa => [0, 2_000, 4_000, 8_000, 12_000, 18_000],
        City::Montreal => [0, 2_000, 5_000, 9_000, 14_000, 20_000],
    }
}
