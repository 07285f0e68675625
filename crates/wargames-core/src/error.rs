//! Setup errors. Gameplay never errors: disallowed actions are no-ops.

use thiserror::Error;

use crate::enums::{Role, Side};

/// Configuration invariant violations detected before a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// A selection limit is larger than the city pool it draws from.
    #[error("{role:?} limit {limit} exceeds the {pool} cities available on the {side:?} side")]
    LimitExceedsPool {
        role: Role,
        side: Side,
        limit: usize,
        pool: usize,
    },

    /// One side has no cities at all.
    #[error("no cities registered for the {side:?} side")]
    EmptyRegistry { side: Side },
}
