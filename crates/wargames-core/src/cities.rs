//! City registry: the fixed, ordered city lists for both sides.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::Side;
use crate::error::SetupError;

/// A named city on the map. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub population: u64,
}

impl City {
    pub fn new(name: impl Into<String>, x: i32, y: i32, population: u64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            population,
        }
    }

    /// Map position as a floating-point point.
    pub fn position(&self) -> DVec2 {
        DVec2::new(f64::from(self.x), f64::from(self.y))
    }
}

const PLAYER_CITIES: [(&str, i32, i32, u64); 10] = [
    ("New York", 360, 203, 8_400_000),
    ("Houston", 255, 265, 3_900_000),
    ("Chicago", 298, 206, 2_700_000),
    ("Miami", 308, 280, 2_300_000),
    ("Phoenix", 210, 251, 1_600_000),
    ("Seattle", 189, 189, 1_500_000),
    ("San Francisco", 166, 204, 1_500_000),
    ("Denver", 242, 216, 1_400_000),
    ("Atlanta", 307, 236, 1_300_000),
    ("Las Vegas", 195, 232, 1_000_000),
];

const OPPONENT_CITIES: [(&str, i32, i32, u64); 10] = [
    ("Moscow", 750, 143, 8_700_000),
    ("Leningrad", 731, 128, 4_600_000),
    ("Kiev", 751, 173, 2_500_000),
    ("Tashkent", 886, 211, 2_000_000),
    ("Minsk", 725, 157, 1_600_000),
    ("Yakutsk", 1082, 129, 1_100_000),
    ("Novosibirsk", 950, 155, 1_400_000),
    ("Murmansk", 740, 90, 1_300_000),
    ("Sverdlovsk", 810, 132, 1_300_000),
    ("Vladivostok", 1122, 202, 900_000),
];

/// Both sides' city lists. Indices are stable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRegistry {
    player: Vec<City>,
    opponent: Vec<City>,
}

impl Default for CityRegistry {
    fn default() -> Self {
        let load = |table: &[(&str, i32, i32, u64)]| {
            table
                .iter()
                .map(|&(name, x, y, population)| City::new(name, x, y, population))
                .collect()
        };
        Self {
            player: load(&PLAYER_CITIES),
            opponent: load(&OPPONENT_CITIES),
        }
    }
}

impl CityRegistry {
    /// Build a registry from explicit city lists. Both sides need at least one city.
    pub fn new(player: Vec<City>, opponent: Vec<City>) -> Result<Self, SetupError> {
        for (side, cities) in [(Side::Player, &player), (Side::Opponent, &opponent)] {
            if cities.is_empty() {
                return Err(SetupError::EmptyRegistry { side });
            }
        }
        Ok(Self { player, opponent })
    }

    pub fn cities(&self, side: Side) -> &[City] {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn city(&self, side: Side, index: usize) -> Option<&City> {
        self.cities(side).get(index)
    }

    pub fn len(&self, side: Side) -> usize {
        self.cities(side).len()
    }

    pub fn is_empty(&self, side: Side) -> bool {
        self.cities(side).is_empty()
    }

    /// Sum of all city populations on one side.
    pub fn total_population(&self, side: Side) -> u64 {
        self.cities(side).iter().map(|c| c.population).sum()
    }

    /// Nearest city on `side` within `radius` pixels of `point`, if any.
    pub fn city_at(&self, side: Side, point: DVec2, radius: f64) -> Option<usize> {
        self.cities(side)
            .iter()
            .enumerate()
            .map(|(index, city)| (index, city.position().distance(point)))
            .filter(|&(_, distance)| distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
