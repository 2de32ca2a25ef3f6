//! Term resolution: one roll term in, one formula fragment out.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::term::RollTerm;
use crate::character::CharacterSnapshot;
use crate::dice::ArtifactDie;

pub const SPELLCASTING_LABEL: &str = "Spellcasting";
pub const CORRUPTION_LABEL: &str = "Corruption Total";

/// A requested term matched no attribute, skill, spellcasting, corruption
/// or artifact die. Recoverable: the term is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Unknown roll term: {term}")]
pub struct UnknownTermError {
    pub term: String,
}

/// A labeled pool of same-sided dice sized by a character total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaFragment {
    pub dice_count: u32,
    pub label: String,
}

impl FormulaFragment {
    /// Totals at or below zero produce an empty fragment.
    pub fn from_total(total: i32, label: impl Into<String>) -> Self {
        Self {
            dice_count: u32::try_from(total).unwrap_or(0),
            label: label.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dice_count == 0
    }
}

/// What a term contributes to the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Pool(FormulaFragment),
    Artifact { die: ArtifactDie, count: u32 },
}

/// Resolves terms against a character snapshot. Holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct TermResolver<'a> {
    snapshot: &'a CharacterSnapshot,
}

impl<'a> TermResolver<'a> {
    pub fn new(snapshot: &'a CharacterSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn resolve(&self, term: &RollTerm) -> Result<Resolution, UnknownTermError> {
        let fragment = match term {
            RollTerm::Attribute(attribute) => FormulaFragment::from_total(
                self.snapshot.attribute_total(*attribute),
                attribute.label(),
            ),
            RollTerm::Skill(skill) => {
                FormulaFragment::from_total(self.snapshot.skill_total(*skill), skill.label())
            }
            RollTerm::Spellcasting => FormulaFragment::from_total(
                self.snapshot.spellcasting_total(),
                SPELLCASTING_LABEL,
            ),
            RollTerm::Corruption => {
                FormulaFragment::from_total(self.snapshot.corruption_total(), CORRUPTION_LABEL)
            }
            RollTerm::Artifact { die, count } => {
                return Ok(Resolution::Artifact {
                    die: *die,
                    count: *count,
                })
            }
            RollTerm::Unknown(raw) => {
                return Err(UnknownTermError { term: raw.clone() });
            }
        };
        Ok(Resolution::Pool(fragment))
    }

    pub fn resolve_key(&self, key: &str) -> Result<Resolution, UnknownTermError> {
        self.resolve(&RollTerm::parse(key))
    }
}
