//! Bounded city selections.

use std::collections::BTreeSet;

use wargames_core::constants::{DEFENSE_LIMIT, TARGET_LIMIT};
use wargames_core::enums::{Role, Side};

/// A set of city indices capped at `limit` entries.
///
/// Iteration is always in ascending index order, which is also the order
/// used to pair targets with launch cities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    indices: BTreeSet<usize>,
    limit: usize,
}

impl SelectionSet {
    pub fn new(limit: usize) -> Self {
        Self {
            indices: BTreeSet::new(),
            limit,
        }
    }

    /// Build a full set from indices chosen elsewhere (the opponent's picks).
    /// Entries beyond `limit` are dropped.
    pub fn from_indices(limit: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let sorted: BTreeSet<usize> = indices.into_iter().collect();
        Self {
            indices: sorted.into_iter().take(limit).collect(),
            limit,
        }
    }

    /// Remove `index` if selected, otherwise add it if there is room.
    /// Returns false only when the set is full and `index` is not in it.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.indices.remove(&index) {
            return true;
        }
        if self.indices.len() < self.limit {
            self.indices.insert(index);
            return true;
        }
        false
    }

    /// True once the selection holds exactly `limit` cities.
    pub fn can_advance(&self) -> bool {
        self.indices.len() == self.limit
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Selected indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }
}

/// One side's defense and target selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selections {
    /// Indices into this side's own cities.
    pub defenses: SelectionSet,
    /// Indices into the enemy side's cities.
    pub targets: SelectionSet,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            defenses: SelectionSet::new(DEFENSE_LIMIT),
            targets: SelectionSet::new(TARGET_LIMIT),
        }
    }
}

impl Selections {
    pub fn get(&self, role: Role) -> &SelectionSet {
        match role {
            Role::Defense => &self.defenses,
            Role::Target => &self.targets,
        }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut SelectionSet {
        match role {
            Role::Defense => &mut self.defenses,
            Role::Target => &mut self.targets,
        }
    }

    pub fn clear(&mut self) {
        self.defenses.clear();
        self.targets.clear();
    }
}

/// Selections for both sides. The opponent's stay empty until launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideSelections {
    pub player: Selections,
    pub opponent: Selections,
}

impl SideSelections {
    pub fn side(&self, side: Side) -> &Selections {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut Selections {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub fn clear(&mut self) {
        self.player.clear();
        self.opponent.clear();
    }
}
