//! Roll formula builder.
//!
//! Turns a [`RollRequest`] and a [`CharacterSnapshot`] into the formula string
//! handed to the dice roller. The steps are:
//!
//! 1. Parse each term identifier into a [`RollTerm`]
//! 2. Resolve it against the snapshot ([`TermResolver`])
//! 3. Assemble the surviving fragments in request order ([`PoolAssembler`])
//!
//! Unknown terms are skipped and returned as warnings; the modifier is passed
//! through for the caller to apply once the roll exists.

use serde::{Deserialize, Serialize};

use super::assembler::{FormulaSegment, PoolAssembler, SEGMENT_SEPARATOR};
use super::request::RollRequest;
use super::resolver::{TermResolver, UnknownTermError};
use super::term::RollTerm;
use crate::character::{Attribute, CharacterSnapshot};

/// Attribute used when nothing in a request points at one.
pub const DEFAULT_PRIMARY_ATTRIBUTE: Attribute = Attribute::Physique;

/// A roll ready for evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltRoll {
    pub segments: Vec<FormulaSegment>,
    pub formula: String,
    pub modifier: i32,
    /// Attribute labeling the fallback die
    pub primary: Attribute,
    pub warnings: Vec<UnknownTermError>,
}

impl BuiltRoll {
    pub fn total_dice(&self) -> u32 {
        self.segments
            .iter()
            .map(FormulaSegment::dice_count)
            .fold(0, u32::saturating_add)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Short caption for the roll log, e.g. "Physique + Melee + 1d8".
    pub fn flavor(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                FormulaSegment::Pool { label, .. } => label.clone(),
                FormulaSegment::Artifact { .. } => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RollFormulaBuilder;

impl RollFormulaBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, snapshot: &CharacterSnapshot, request: &RollRequest) -> BuiltRoll {
        let terms: Vec<RollTerm> = request.parsed_terms().collect();
        let primary = primary_attribute(snapshot, &terms);
        let resolver = TermResolver::new(snapshot);

        let mut assembler = PoolAssembler::new();
        let mut warnings = Vec::new();
        for term in &terms {
            match resolver.resolve(term) {
                Ok(resolution) => {
                    assembler.push_resolution(resolution);
                }
                Err(err) => warnings.push(err),
            }
        }

        let pool = assembler.assemble(primary);
        BuiltRoll {
            segments: pool.segments,
            formula: pool.formula,
            modifier: request.modifier,
            primary,
            warnings,
        }
    }
}

/// First attribute term; else the spellcasting attribute when spellcasting
/// was requested; else the parent of the first skill term.
fn primary_attribute(snapshot: &CharacterSnapshot, terms: &[RollTerm]) -> Attribute {
    let explicit = terms.iter().find_map(|term| match term {
        RollTerm::Attribute(attribute) => Some(*attribute),
        _ => None,
    });
    if let Some(attribute) = explicit {
        return attribute;
    }

    if terms.contains(&RollTerm::Spellcasting) {
        return snapshot.spellcasting.attribute;
    }

    terms
        .iter()
        .find_map(|term| match term {
            RollTerm::Skill(skill) => Some(skill.parent_attribute()),
            _ => None,
        })
        .unwrap_or(DEFAULT_PRIMARY_ATTRIBUTE)
}
