use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Attribute, CorruptionTrack, Skill};
use crate::error::DomainError;

/// A stored rating plus its bonus from effects and gear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    pub value: i32,
    pub bonus: i32,
}

impl Rating {
    pub fn new(value: i32, bonus: i32) -> Self {
        Self { value, bonus }
    }

    pub fn total(&self) -> i32 {
        self.value.saturating_add(self.bonus)
    }
}

/// What the spellcasting composite adds on top of its attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SpellcastingSource {
    Skill(Skill),
    Corruption,
}

impl TryFrom<String> for SpellcastingSource {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("corruption") {
            return Ok(Self::Corruption);
        }
        value
            .parse::<Skill>()
            .map(Self::Skill)
            .map_err(|_| DomainError::parse(format!("Unknown spellcasting source: {}", value)))
    }
}

impl From<SpellcastingSource> for String {
    fn from(source: SpellcastingSource) -> Self {
        match source {
            SpellcastingSource::Skill(skill) => skill.key().to_string(),
            SpellcastingSource::Corruption => "corruption".to_string(),
        }
    }
}

/// Per-character configuration of the spellcasting composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spellcasting {
    pub attribute: Attribute,
    #[serde(rename = "skill")]
    pub source: SpellcastingSource,
}

impl Default for Spellcasting {
    fn default() -> Self {
        Self {
            attribute: Attribute::Wits,
            source: SpellcastingSource::Corruption,
        }
    }
}

/// Read-only view of a character at the moment a roll starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSnapshot {
    pub name: String,
    pub attributes: BTreeMap<Attribute, Rating>,
    pub skills: BTreeMap<Skill, Rating>,
    pub spellcasting: Spellcasting,
    pub corruption: CorruptionTrack,
}

impl CharacterSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute, rating: Rating) -> Self {
        self.attributes.insert(attribute, rating);
        self
    }

    pub fn with_skill(mut self, skill: Skill, rating: Rating) -> Self {
        self.skills.insert(skill, rating);
        self
    }

    pub fn with_spellcasting(mut self, spellcasting: Spellcasting) -> Self {
        self.spellcasting = spellcasting;
        self
    }

    pub fn with_corruption(mut self, corruption: CorruptionTrack) -> Self {
        self.corruption = corruption;
        self
    }

    /// Missing attributes count as zero.
    pub fn attribute_total(&self, attribute: Attribute) -> i32 {
        self.attributes
            .get(&attribute)
            .map(Rating::total)
            .unwrap_or(0)
    }

    /// Missing skills count as zero.
    pub fn skill_total(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).map(Rating::total).unwrap_or(0)
    }

    pub fn corruption_total(&self) -> i32 {
        self.corruption.total()
    }

    /// Attribute total plus the configured skill or corruption total.
    pub fn spellcasting_total(&self) -> i32 {
        let addend = match self.spellcasting.source {
            SpellcastingSource::Skill(skill) => self.skill_total(skill),
            SpellcastingSource::Corruption => self.corruption_total(),
        };
        self.attribute_total(self.spellcasting.attribute).saturating_add(addend)
    }
}
