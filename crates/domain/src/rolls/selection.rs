//! State of the roll selection dialog.
//!
//! The dialog edits an attribute, a skill (or corruption), a spellcasting
//! toggle, a modifier, and three artifact-die checkboxes. While spellcasting
//! is on, the attribute and skill are pinned to the character's spellcasting
//! composite and cannot be edited.

use serde::{Deserialize, Serialize};

use super::request::RollRequest;
use super::term::{CORRUPTION_KEY, SPELLCASTING_KEY};
use crate::character::{Attribute, CharacterSnapshot, Skill, SpellcastingSource};
use crate::dice::ArtifactDie;
use crate::error::DomainError;

/// Skill used when a roll is opened from an attribute with no default skill.
const FALLBACK_SKILL: Skill = Skill::Endurance;

/// Which sheet element the roll was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "key", rename_all = "camelCase")]
pub enum SheetRollTarget {
    Attribute(Attribute),
    Skill(Skill),
    Spellcasting,
}

/// Second dropdown of the dialog: a skill or the corruption total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillChoice {
    Skill(Skill),
    Corruption,
}

impl SkillChoice {
    pub fn key(&self) -> &'static str {
        match self {
            SkillChoice::Skill(skill) => skill.key(),
            SkillChoice::Corruption => CORRUPTION_KEY,
        }
    }
}

impl From<SpellcastingSource> for SkillChoice {
    fn from(source: SpellcastingSource) -> Self {
        match source {
            SpellcastingSource::Skill(skill) => SkillChoice::Skill(skill),
            SpellcastingSource::Corruption => SkillChoice::Corruption,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollSelection {
    attribute: Attribute,
    skill: SkillChoice,
    spellcasting: bool,
    modifier: i32,
    artifact_dice: Vec<ArtifactDie>,
    /// Composite the toggle pins the dropdowns to
    spell_attribute: Attribute,
    spell_skill: SkillChoice,
}

impl RollSelection {
    /// Opens the dialog with the defaults for the clicked sheet element.
    pub fn for_sheet_click(snapshot: &CharacterSnapshot, target: SheetRollTarget) -> Self {
        let spell_attribute = snapshot.spellcasting.attribute;
        let spell_skill = SkillChoice::from(snapshot.spellcasting.source);

        let (attribute, skill, spellcasting) = match target {
            SheetRollTarget::Skill(skill) => {
                (skill.parent_attribute(), SkillChoice::Skill(skill), false)
            }
            SheetRollTarget::Attribute(attribute) => {
                let skill = attribute.default_skill().unwrap_or(FALLBACK_SKILL);
                (attribute, SkillChoice::Skill(skill), false)
            }
            SheetRollTarget::Spellcasting => (spell_attribute, spell_skill, true),
        };

        Self {
            attribute,
            skill,
            spellcasting,
            modifier: 0,
            artifact_dice: Vec::new(),
            spell_attribute,
            spell_skill,
        }
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    pub fn skill(&self) -> SkillChoice {
        self.skill
    }

    pub fn is_spellcasting(&self) -> bool {
        self.spellcasting
    }

    /// Attribute and skill dropdowns are disabled while spellcasting is on.
    pub fn fields_locked(&self) -> bool {
        self.spellcasting
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    pub fn artifact_dice(&self) -> &[ArtifactDie] {
        &self.artifact_dice
    }

    pub fn set_attribute(&mut self, attribute: Attribute) -> Result<(), DomainError> {
        self.ensure_unlocked("attribute")?;
        self.attribute = attribute;
        Ok(())
    }

    pub fn set_skill(&mut self, skill: SkillChoice) -> Result<(), DomainError> {
        self.ensure_unlocked("skill")?;
        self.skill = skill;
        Ok(())
    }

    /// Turning spellcasting on pins both dropdowns to the composite. Turning
    /// it off unlocks them and leaves the pinned values selected.
    pub fn set_spellcasting(&mut self, enabled: bool) {
        self.spellcasting = enabled;
        if enabled {
            self.attribute = self.spell_attribute;
            self.skill = self.spell_skill;
        }
    }

    pub fn set_modifier(&mut self, modifier: i32) {
        self.modifier = modifier;
    }

    pub fn set_artifact_die(&mut self, die: ArtifactDie, checked: bool) {
        let present = self.artifact_dice.contains(&die);
        if checked && !present {
            self.artifact_dice.push(die);
            self.artifact_dice.sort();
        } else if !checked && present {
            self.artifact_dice.retain(|d| *d != die);
        }
    }

    /// Converts the confirmed dialog into the canonical term list.
    pub fn into_request(self) -> RollRequest {
        let mut request = if self.spellcasting {
            RollRequest::new([SPELLCASTING_KEY])
        } else {
            RollRequest::new([self.attribute.key(), self.skill.key()])
        };
        for die in &self.artifact_dice {
            request.push_term(die.notation());
        }
        request.with_modifier(self.modifier)
    }

    fn ensure_unlocked(&self, field: &str) -> Result<(), DomainError> {
        if self.spellcasting {
            return Err(DomainError::invalid_state_transition(format!(
                "cannot change {} while spellcasting is selected",
                field
            )));
        }
        Ok(())
    }
}
