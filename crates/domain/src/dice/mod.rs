//! Dice pools: the dice the roll builder asks for, and how they score.

mod die;
mod pool;

pub use die::{ArtifactDie, DieKind, POOL_DIE_SIDES};
pub use pool::{DiceGroup, DiceParseError, DicePool, PoolRoll, RolledDie, MAX_POOL_DICE};
