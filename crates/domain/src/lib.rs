//! Rules core for Davokar dice-pool characters.
//!
//! Pure data and logic only: no I/O, no async, no logging. Randomness is
//! injected as a closure wherever dice are rolled.

pub mod character;
pub mod combat;
pub mod dice;
pub mod error;
pub mod ids;
pub mod rolls;
pub mod trackers;

pub use character::{
    Attribute, CharacterSnapshot, CorruptionTrack, Rating, Skill, Spellcasting,
    SpellcastingSource,
};

pub use combat::{
    plan_attack, AttackPlan, GridPosition, RangeBand, TargetPlan, TargetingError,
    TargetingRules, TokenPlacement, WeaponProfile,
};

pub use dice::{ArtifactDie, DiceGroup, DiceParseError, DicePool, DieKind, PoolRoll, RolledDie};

pub use error::DomainError;

pub use ids::{RollId, TokenId};

pub use rolls::{
    AssembledPool, BuiltRoll, FormulaFragment, FormulaSegment, PoolAssembler, Resolution,
    RollFormulaBuilder, RollRequest, RollSelection, RollTerm, SheetRollTarget, SkillChoice,
    TermResolver, UnknownTermError,
};

pub use trackers::{CorruptionBarLayout, UserRole, WrathChange, WrathTracker};
