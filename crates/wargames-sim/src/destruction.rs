//! Destroyed-city bookkeeping for both sides.

use wargames_core::cities::CityRegistry;
use wargames_core::enums::Side;

/// Destroyed flags and the order in which cities fell, for one side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideDestruction {
    destroyed: Vec<bool>,
    names: Vec<String>,
}

impl SideDestruction {
    fn new(city_count: usize) -> Self {
        Self {
            destroyed: vec![false; city_count],
            names: Vec::new(),
        }
    }

    pub fn is_destroyed(&self, index: usize) -> bool {
        self.destroyed.get(index).copied().unwrap_or(false)
    }

    /// Destroyed city names in order of destruction.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Indices of destroyed cities, ascending.
    pub fn destroyed_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.destroyed
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d)
            .map(|(i, _)| i)
    }
}

/// Per-side destruction record. Append-only during a wave, cleared per game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestructionRecord {
    player: SideDestruction,
    opponent: SideDestruction,
}

impl DestructionRecord {
    pub fn new(registry: &CityRegistry) -> Self {
        Self {
            player: SideDestruction::new(registry.len(Side::Player)),
            opponent: SideDestruction::new(registry.len(Side::Opponent)),
        }
    }

    pub fn side(&self, side: Side) -> &SideDestruction {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideDestruction {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub fn is_destroyed(&self, side: Side, index: usize) -> bool {
        self.side(side).is_destroyed(index)
    }

    /// Mark a city destroyed. Returns false if it was already destroyed or
    /// the index is out of range; the record is unchanged in that case.
    pub fn destroy(&mut self, side: Side, index: usize, name: &str) -> bool {
        let record = self.side_mut(side);
        match record.destroyed.get_mut(index) {
            Some(flag) if !*flag => {
                *flag = true;
                record.names.push(name.to_owned());
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self, registry: &CityRegistry) {
        *self = Self::new(registry);
    }
}
