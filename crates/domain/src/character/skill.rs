use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Attribute;
use crate::error::DomainError;

/// Specific competencies. Spellcasting is not listed here: it is a composite
/// resolved through [`super::Spellcasting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    // Physique
    Endurance,
    Force,
    Melee,
    // Finesse
    Dexterity,
    Discreet,
    Marksmanship,
    Mobility,
    // Wits
    Crafting,
    Lore,
    Medicus,
    Survival,
    Vigilance,
    // Empathy
    Insight,
    Instinct,
    Persuasion,
    Volition,
}

impl Skill {
    pub const ALL: [Skill; 16] = [
        Skill::Endurance,
        Skill::Force,
        Skill::Melee,
        Skill::Dexterity,
        Skill::Discreet,
        Skill::Marksmanship,
        Skill::Mobility,
        Skill::Crafting,
        Skill::Lore,
        Skill::Medicus,
        Skill::Survival,
        Skill::Vigilance,
        Skill::Insight,
        Skill::Instinct,
        Skill::Persuasion,
        Skill::Volition,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Skill::Endurance => "endurance",
            Skill::Force => "force",
            Skill::Melee => "melee",
            Skill::Dexterity => "dexterity",
            Skill::Discreet => "discreet",
            Skill::Marksmanship => "marksmanship",
            Skill::Mobility => "mobility",
            Skill::Crafting => "crafting",
            Skill::Lore => "lore",
            Skill::Medicus => "medicus",
            Skill::Survival => "survival",
            Skill::Vigilance => "vigilance",
            Skill::Insight => "insight",
            Skill::Instinct => "instinct",
            Skill::Persuasion => "persuasion",
            Skill::Volition => "volition",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Skill::Endurance => "Endurance",
            Skill::Force => "Force",
            Skill::Melee => "Melee",
            Skill::Dexterity => "Dexterity",
            Skill::Discreet => "Discreet",
            Skill::Marksmanship => "Marksmanship",
            Skill::Mobility => "Mobility",
            Skill::Crafting => "Crafting",
            Skill::Lore => "Lore",
            Skill::Medicus => "Medicus",
            Skill::Survival => "Survival",
            Skill::Vigilance => "Vigilance",
            Skill::Insight => "Insight",
            Skill::Instinct => "Instinct",
            Skill::Persuasion => "Persuasion",
            Skill::Volition => "Volition",
        }
    }

    /// Attribute a roll defaults to when started from this skill.
    pub fn parent_attribute(&self) -> Attribute {
        match self {
            Skill::Endurance | Skill::Force | Skill::Melee => Attribute::Physique,
            Skill::Dexterity | Skill::Discreet | Skill::Marksmanship | Skill::Mobility => {
                Attribute::Finesse
            }
            Skill::Crafting | Skill::Lore | Skill::Medicus | Skill::Survival | Skill::Vigilance => {
                Attribute::Wits
            }
            Skill::Insight | Skill::Instinct | Skill::Persuasion | Skill::Volition => {
                Attribute::Empathy
            }
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|skill| skill.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| DomainError::parse(format!("Unknown skill: {}", s)))
    }
}
