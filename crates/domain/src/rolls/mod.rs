//! Dice-pool roll formulas.
//!
//! A roll is requested as an ordered list of term identifiers. Each term is
//! resolved against a character snapshot into a labeled pool of dice or a
//! group of artifact dice, and the pieces are joined into one formula string
//! for the dice roller.

mod assembler;
mod builder;
mod request;
mod resolver;
mod selection;
mod term;

pub use assembler::{AssembledPool, FormulaSegment, PoolAssembler, POOL_DIE_MARKER, SEGMENT_SEPARATOR};
pub use builder::{BuiltRoll, RollFormulaBuilder, DEFAULT_PRIMARY_ATTRIBUTE};
pub use request::RollRequest;
pub use resolver::{
    FormulaFragment, Resolution, TermResolver, UnknownTermError, CORRUPTION_LABEL,
    SPELLCASTING_LABEL,
};
pub use selection::{RollSelection, SheetRollTarget, SkillChoice};
pub use term::{RollTerm, CORRUPTION_KEY, MAX_ARTIFACT_DICE, SPELLCASTING_KEY};
