use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Skill;
use crate::error::DomainError;

/// The broad capabilities every character is rated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Physique,
    Finesse,
    Wits,
    Empathy,
    /// Catch-all rating used by creatures with a single attribute
    Singular,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Physique,
        Attribute::Finesse,
        Attribute::Wits,
        Attribute::Empathy,
        Attribute::Singular,
    ];

    /// Identifier used in roll terms and stored data.
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Physique => "physique",
            Attribute::Finesse => "finesse",
            Attribute::Wits => "wits",
            Attribute::Empathy => "empathy",
            Attribute::Singular => "singular",
        }
    }

    /// Long display name, used as the dice pool label.
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Physique => "Physique",
            Attribute::Finesse => "Finesse",
            Attribute::Wits => "Wits",
            Attribute::Empathy => "Empathy",
            Attribute::Singular => "Singular",
        }
    }

    /// Skill preselected when a roll is started from this attribute.
    pub fn default_skill(&self) -> Option<Skill> {
        match self {
            Attribute::Physique => Some(Skill::Force),
            Attribute::Finesse => Some(Skill::Dexterity),
            Attribute::Wits => Some(Skill::Crafting),
            Attribute::Empathy => Some(Skill::Insight),
            Attribute::Singular => None,
        }
    }

    /// Case-insensitive lookup by key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| DomainError::parse(format!("Unknown attribute: {}", s)))
    }
}
