//! Weapon attacks against targeted tokens.

mod targeting;
mod weapon;

pub use targeting::{
    plan_attack, AttackPlan, GridPosition, TargetPlan, TargetingError, TargetingRules,
    TokenPlacement, DEFAULT_MOVEMENT_ACTION_DISTANCE, DEFAULT_RANGED_ENGAGEMENT_FACTOR,
};
pub use weapon::{RangeBand, WeaponProfile};
