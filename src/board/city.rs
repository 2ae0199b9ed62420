//! Cities and city pairs.
//!
//! The network has nine cities running west to east from Vancouver to
//! Montreal. A [`CityPair`] is an *unordered* pair: it is normalized on
//! construction so `(a, b)` and `(b, a)` compare, hash, and serialize
//! identically.

use serde::{Deserialize, Serialize};

/// A city on the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum City {
    Vancouver,
    Kamloops,
    Calgary,
    Regina,
    Winnipeg,
    ThunderBay,
    Sudbury,
    Ottawa,
    Montreal,
}

impl City {
    /// All cities, west to east.
    pub const ALL: [City; 9] = [
        City::Vancouver,
        City::Kamloops,
        City::Calgary,
        City::Regina,
        City::Winnipeg,
        City::ThunderBay,
        City::Sudbury,
        City::Ottawa,
        City::Montreal,
    ];

    /// Western terminus of the network.
    pub const WEST_TERMINUS: City = City::Vancouver;

    /// Eastern terminus of the network.
    pub const EAST_TERMINUS: City = City::Montreal;
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            City::Vancouver => "Vancouver",
            City::Kamloops => "Kamloops",
            City::Calgary => "Calgary",
            City::Regina => "Regina",
            City::Winnipeg => "Winnipeg",
            City::ThunderBay => "Thunder Bay",
            City::Sudbury => "Sudbury",
            City::Ottawa => "Ottawa",
            City::Montreal => "Montreal",
        };
        f.write_str(name)
    }
}

/// An unordered pair of distinct cities.
///
/// `west` always sorts before `east` in the `City` ordering, so two pairs
/// built from the same cities in either order are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityPair {
    west: City,
    east: City,
}

impl CityPair {
    /// Create a normalized pair from two cities in any order.
    #[must_use]
    pub const fn new(a: City, b: City) -> Self {
        if (a as u8) <= (b as u8) {
            Self { west: a, east: b }
        } else {
            Self { west: b, east: a }
        }
    }

    /// The westernmost city of the pair.
    #[must_use]
    pub const fn west(self) -> City {
        self.west
    }

    /// The easternmost city of the pair.
    #[must_use]
    pub const fn east(self) -> City {
        self.east
    }

    /// Both cities of the pair.
    #[must_use]
    pub const fn cities(self) -> [City; 2] {
        [self.west, self.east]
    }

    /// Check whether a city is an endpoint of this pair.
    #[must_use]
    pub fn contains(self, city: City) -> bool {
        self.west == city || self.east == city
    }
}

impl std::fmt::Display for CityPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.west, self.east)
    }
}
