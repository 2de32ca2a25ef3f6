//! Pool assembly: ordered fragments in, one formula string out.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::resolver::{FormulaFragment, Resolution};
use crate::character::Attribute;
use crate::dice::ArtifactDie;

/// Marker for the labeled pool die in the roller's formula syntax.
pub const POOL_DIE_MARKER: &str = "ds";
pub const SEGMENT_SEPARATOR: &str = " + ";

/// One sub-expression of an assembled formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FormulaSegment {
    Pool { dice_count: u32, label: String },
    Artifact { count: u32, die: ArtifactDie },
}

impl FormulaSegment {
    pub fn dice_count(&self) -> u32 {
        match self {
            FormulaSegment::Pool { dice_count, .. } => *dice_count,
            FormulaSegment::Artifact { count, .. } => *count,
        }
    }
}

impl fmt::Display for FormulaSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaSegment::Pool { dice_count, label } => {
                write!(f, "{}{}[{}]", dice_count, POOL_DIE_MARKER, label)
            }
            FormulaSegment::Artifact { count, die } => write!(f, "{}{}", count, die.notation()),
        }
    }
}

impl From<FormulaFragment> for FormulaSegment {
    fn from(fragment: FormulaFragment) -> Self {
        FormulaSegment::Pool {
            dice_count: fragment.dice_count,
            label: fragment.label,
        }
    }
}

/// Result of assembling a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledPool {
    pub segments: Vec<FormulaSegment>,
    pub formula: String,
}

/// Collects segments in request order and renders them.
#[derive(Debug, Clone, Default)]
pub struct PoolAssembler {
    segments: Vec<FormulaSegment>,
}

impl PoolAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_fragment(&mut self, fragment: FormulaFragment) -> &mut Self {
        self.segments.push(fragment.into());
        self
    }

    pub fn push_artifact(&mut self, die: ArtifactDie, count: u32) -> &mut Self {
        self.segments.push(FormulaSegment::Artifact { count, die });
        self
    }

    pub fn push_resolution(&mut self, resolution: Resolution) -> &mut Self {
        match resolution {
            Resolution::Pool(fragment) => self.push_fragment(fragment),
            Resolution::Artifact { die, count } => self.push_artifact(die, count),
        }
    }

    /// Drops empty segments, then falls back to a single die labeled with
    /// `primary` when nothing is left.
    pub fn assemble(self, primary: Attribute) -> AssembledPool {
        let mut segments: Vec<FormulaSegment> = self
            .segments
            .into_iter()
            .filter(|segment| segment.dice_count() > 0)
            .collect();

        if segments.is_empty() {
            segments.push(FormulaSegment::Pool {
                dice_count: 1,
                label: primary.label().to_string(),
            });
        }

        let formula = segments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR);

        AssembledPool { segments, formula }
    }
}
