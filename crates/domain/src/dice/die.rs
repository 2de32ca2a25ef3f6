use std::fmt;

use serde::{Deserialize, Serialize};

/// Sides of the labeled pool die.
pub const POOL_DIE_SIDES: u8 = 6;

/// Fixed-size bonus dice added from gear or talents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactDie {
    D8,
    D10,
    D12,
}

impl ArtifactDie {
    pub const ALL: [ArtifactDie; 3] = [ArtifactDie::D8, ArtifactDie::D10, ArtifactDie::D12];

    pub fn sides(&self) -> u8 {
        match self {
            ArtifactDie::D8 => 8,
            ArtifactDie::D10 => 10,
            ArtifactDie::D12 => 12,
        }
    }

    /// `d8`, `d10` or `d12`.
    pub fn notation(&self) -> &'static str {
        match self {
            ArtifactDie::D8 => "d8",
            ArtifactDie::D10 => "d10",
            ArtifactDie::D12 => "d12",
        }
    }

    pub fn from_sides(sides: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|die| die.sides() == sides)
    }

    pub fn from_notation(notation: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|die| die.notation().eq_ignore_ascii_case(notation.trim()))
    }
}

impl fmt::Display for ArtifactDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

/// What kind of die a rolled face came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DieKind {
    Pool,
    Artifact(ArtifactDie),
}

impl DieKind {
    pub fn sides(&self) -> u8 {
        match self {
            DieKind::Pool => POOL_DIE_SIDES,
            DieKind::Artifact(die) => die.sides(),
        }
    }

    /// Successes scored by a face.
    ///
    /// Pool dice score one success on a 6. Artifact dice score one on 6-7,
    /// two on 8-9, three on 10-11 and four on 12.
    pub fn successes(&self, face: u8) -> u32 {
        match self {
            DieKind::Pool => u32::from(face >= POOL_DIE_SIDES),
            DieKind::Artifact(_) => match face {
                0..=5 => 0,
                6..=7 => 1,
                8..=9 => 2,
                10..=11 => 3,
                _ => 4,
            },
        }
    }

    /// A 1 on a pool die is a bane; artifact dice never produce banes.
    pub fn is_bane(&self, face: u8) -> bool {
        matches!(self, DieKind::Pool) && face == 1
    }
}
