//! Uniform sampling of city indices without replacement.

use std::collections::BTreeSet;

use rand::seq::index;
use rand::Rng;
use thiserror::Error;

use wargames_core::constants::{DEFENSE_LIMIT, TARGET_LIMIT};

/// The requested sample is larger than the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot pick {limit} distinct cities from a pool of {pool_size}")]
pub struct SelectionError {
    pub pool_size: usize,
    pub limit: usize,
}

/// Draw exactly `limit` distinct indices from `0..pool_size`.
pub fn select<R: Rng + ?Sized>(
    rng: &mut R,
    pool_size: usize,
    limit: usize,
) -> Result<BTreeSet<usize>, SelectionError> {
    if limit > pool_size {
        return Err(SelectionError { pool_size, limit });
    }
    Ok(index::sample(rng, pool_size, limit).into_iter().collect())
}

/// The opponent's choices for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpponentPlan {
    /// Indices into the opponent's own cities.
    pub defenses: BTreeSet<usize>,
    /// Indices into the player's cities.
    pub targets: BTreeSet<usize>,
}

/// Pick the opponent's defenses from its own pool and targets from the player's pool.
pub fn select_plan<R: Rng + ?Sized>(
    rng: &mut R,
    own_pool: usize,
    enemy_pool: usize,
) -> Result<OpponentPlan, SelectionError> {
    Ok(OpponentPlan {
        defenses: select(rng, own_pool, DEFENSE_LIMIT)?,
        targets: select(rng, enemy_pool, TARGET_LIMIT)?,
    })
}
