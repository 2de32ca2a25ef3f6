//! Character values read at roll time.
//!
//! Everything here is a snapshot: totals are computed from the stored value
//! and bonus, and nothing in this module is mutated while a roll is built.

mod attribute;
mod corruption;
mod skill;
mod snapshot;

pub use attribute::Attribute;
pub use corruption::CorruptionTrack;
pub use skill::Skill;
pub use snapshot::{CharacterSnapshot, Rating, Spellcasting, SpellcastingSource};
