//! Static board data: cities, the space loop, adjacency, payout tables.

mod city;
mod spaces;

pub use city::{City, CityPair};
pub use spaces::{
    city_values, is_valid_pair, Space, SpaceKind, MIN_COMPLETED_ROUTES_FOR_GAME_OVER,
    PROPERTIES_PER_CITY, ROUTE_COMPLETE, SPACES, VALID_CITY_PAIRS,
};
