//! Use cases - User story orchestration over the domain rules and host ports.

pub mod attack;
pub mod modifier;
pub mod push;
pub mod skill_roll;
pub mod wrath;

pub use attack::{AttackRoll, AttackRollError, AttackRollOutcome};
pub use modifier::apply_modifier;
pub use push::PushRoll;
pub use skill_roll::{SkillRoll, SkillRollError, SkillRollOutcome};
pub use wrath::AdjustWrath;
