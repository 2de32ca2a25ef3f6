use std::fmt;

use crate::character::{Attribute, Skill};
use crate::dice::ArtifactDie;

pub const SPELLCASTING_KEY: &str = "spellcasting";
pub const CORRUPTION_KEY: &str = "corruption";

/// Largest count accepted in a `d8:<count>` term.
pub const MAX_ARTIFACT_DICE: u32 = 10;

/// A single contributor named in a roll request.
///
/// Parsing never fails: identifiers that match nothing become
/// [`RollTerm::Unknown`] so the resolver can report them and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollTerm {
    Attribute(Attribute),
    Skill(Skill),
    Spellcasting,
    Corruption,
    /// Fixed-size artifact dice, written `d8` or `d8:<count>`
    Artifact { die: ArtifactDie, count: u32 },
    Unknown(String),
}

impl RollTerm {
    pub fn parse(raw: &str) -> Self {
        let key = raw.trim().to_ascii_lowercase();

        if let Some(attribute) = Attribute::from_key(&key) {
            return RollTerm::Attribute(attribute);
        }
        if let Some(skill) = Skill::from_key(&key) {
            return RollTerm::Skill(skill);
        }
        match key.as_str() {
            SPELLCASTING_KEY => return RollTerm::Spellcasting,
            CORRUPTION_KEY => return RollTerm::Corruption,
            _ => {}
        }

        Self::parse_artifact(&key).unwrap_or_else(|| RollTerm::Unknown(raw.trim().to_string()))
    }

    fn parse_artifact(key: &str) -> Option<Self> {
        let (die_str, count_str) = match key.split_once(':') {
            Some((die, count)) => (die, Some(count)),
            None => (key, None),
        };
        let die = ArtifactDie::from_notation(die_str)?;
        let count = match count_str {
            Some(count) => count.trim().parse::<u32>().ok()?,
            None => 1,
        };
        if count > MAX_ARTIFACT_DICE {
            return None;
        }
        Some(RollTerm::Artifact { die, count })
    }

    /// Canonical identifier for this term.
    pub fn key(&self) -> String {
        match self {
            RollTerm::Attribute(attribute) => attribute.key().to_string(),
            RollTerm::Skill(skill) => skill.key().to_string(),
            RollTerm::Spellcasting => SPELLCASTING_KEY.to_string(),
            RollTerm::Corruption => CORRUPTION_KEY.to_string(),
            RollTerm::Artifact { die, count } => format!("{}:{}", die.notation(), count),
            RollTerm::Unknown(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for RollTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<&str> for RollTerm {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_category() {
        assert_eq!(RollTerm::parse("physique"), RollTerm::Attribute(Attribute::Physique));
        assert_eq!(RollTerm::parse("Melee"), RollTerm::Skill(Skill::Melee));
        assert_eq!(RollTerm::parse("spellcasting"), RollTerm::Spellcasting);
        assert_eq!(RollTerm::parse("corruption"), RollTerm::Corruption);
        assert_eq!(
            RollTerm::parse("bogus"),
            RollTerm::Unknown("bogus".to_string())
        );
    }

    #[test]
    fn parses_artifact_terms() {
        assert_eq!(
            RollTerm::parse("d8:2"),
            RollTerm::Artifact {
                die: ArtifactDie::D8,
                count: 2
            }
        );
        assert_eq!(
            RollTerm::parse("d12"),
            RollTerm::Artifact {
                die: ArtifactDie::D12,
                count: 1
            }
        );
    }

    #[test]
    fn rejects_unsupported_artifact_sizes_and_counts() {
        assert!(matches!(RollTerm::parse("d6:2"), RollTerm::Unknown(_)));
        assert!(matches!(RollTerm::parse("d10:x"), RollTerm::Unknown(_)));
        assert!(matches!(RollTerm::parse("d10:-1"), RollTerm::Unknown(_)));
        assert!(matches!(RollTerm::parse("d8:11"), RollTerm::Unknown(_)));
        assert!(matches!(
            RollTerm::parse("d8:4294967295"),
            RollTerm::Unknown(_)
        ));
        assert!(matches!(
            RollTerm::parse("d8:10"),
            RollTerm::Artifact { count: 10, .. }
        ));
    }

    #[test]
    fn key_is_canonical() {
        assert_eq!(RollTerm::parse(" WITS ").key(), "wits");
        assert_eq!(RollTerm::parse("d10").key(), "d10:1");
    }
}
