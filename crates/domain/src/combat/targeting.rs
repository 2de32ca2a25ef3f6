//! Range maths for weapon attacks against selected tokens.
//!
//! Distances are measured on the grid in the same units as the configured
//! movement-action distance. One movement action covers
//! `movement_action_distance` units; anything beyond
//! `ranged_engagement_factor` actions counts as a ranged engagement.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::weapon::WeaponProfile;
use crate::character::{Attribute, Skill};
use crate::error::DomainError;
use crate::ids::TokenId;

pub const DEFAULT_MOVEMENT_ACTION_DISTANCE: f64 = 10.0;
pub const DEFAULT_RANGED_ENGAGEMENT_FACTOR: f64 = 1.9;

/// Penalty dice per movement action of shortfall.
const PENALTY_PER_ACTION: u32 = 2;

/// Attack cannot be planned; reported to the user as a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TargetingError {
    #[error("No targets selected")]
    NoTargets,
    #[error("No attacking token could be found")]
    NoAttacker,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: f64,
    pub y: f64,
}

impl GridPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &GridPosition) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A token on the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPlacement {
    pub token: TokenId,
    pub name: String,
    pub position: GridPosition,
}

impl TokenPlacement {
    pub fn new(token: impl Into<TokenId>, name: impl Into<String>, position: GridPosition) -> Self {
        Self {
            token: token.into(),
            name: name.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingRules {
    movement_action_distance: f64,
    ranged_engagement_factor: f64,
}

impl TargetingRules {
    pub fn new(
        movement_action_distance: f64,
        ranged_engagement_factor: f64,
    ) -> Result<Self, DomainError> {
        if movement_action_distance.is_nan() || movement_action_distance <= 0.0 {
            return Err(DomainError::validation(
                "movement action distance must be positive",
            ));
        }
        if ranged_engagement_factor.is_nan() || ranged_engagement_factor <= 0.0 {
            return Err(DomainError::validation(
                "ranged engagement factor must be positive",
            ));
        }
        Ok(Self {
            movement_action_distance,
            ranged_engagement_factor,
        })
    }

    pub fn movement_action_distance(&self) -> f64 {
        self.movement_action_distance
    }

    pub fn ranged_engagement_factor(&self) -> f64 {
        self.ranged_engagement_factor
    }

    /// Movement actions needed to cover `distance`, rounded up.
    pub fn movement_actions(&self, distance: f64) -> u32 {
        (distance / self.movement_action_distance).ceil() as u32
    }

    pub fn is_ranged(&self, distance: f64) -> bool {
        distance > self.ranged_engagement_factor * self.movement_action_distance
    }
}

impl Default for TargetingRules {
    fn default() -> Self {
        Self {
            movement_action_distance: DEFAULT_MOVEMENT_ACTION_DISTANCE,
            ranged_engagement_factor: DEFAULT_RANGED_ENGAGEMENT_FACTOR,
        }
    }
}

/// Outcome for one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPlan {
    pub target: TokenPlacement,
    pub distance: f64,
    pub movement_actions: u32,
    pub ranged: bool,
    pub penalty: u32,
    pub requires_throw_confirmation: bool,
    melee_weapon: bool,
}

impl TargetPlan {
    /// Modifier applied to this target's roll.
    pub fn modifier(&self) -> i32 {
        -i32::try_from(self.penalty).unwrap_or(i32::MAX)
    }

    /// Physique + melee for a melee weapon at close quarters, finesse +
    /// marksmanship for everything else, thrown swords included.
    pub fn attack_terms(&self) -> [&'static str; 2] {
        if self.melee_weapon && !self.ranged {
            [Attribute::Physique.key(), Skill::Melee.key()]
        } else {
            [Attribute::Finesse.key(), Skill::Marksmanship.key()]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackPlan {
    pub attacker: TokenPlacement,
    pub weapon: WeaponProfile,
    pub targets: Vec<TargetPlan>,
}

impl AttackPlan {
    /// True when at least one target would mean throwing away a melee
    /// weapon that does not come back.
    pub fn requires_throw_confirmation(&self) -> bool {
        self.targets.iter().any(|t| t.requires_throw_confirmation)
    }
}

/// Compute per-target range modifiers for an attack.
///
/// Penalty is `2 × max(0, weapon range − movement actions)`: being exactly at
/// the stated range, or beyond it, costs nothing.
pub fn plan_attack(
    attacker: Option<&TokenPlacement>,
    targets: &[TokenPlacement],
    weapon: &WeaponProfile,
    rules: &TargetingRules,
) -> Result<AttackPlan, TargetingError> {
    if targets.is_empty() {
        return Err(TargetingError::NoTargets);
    }
    let attacker = attacker.ok_or(TargetingError::NoAttacker)?;

    let melee_weapon = weapon.is_melee();
    let weapon_range = weapon.range.movement_actions();

    let plans = targets
        .iter()
        .map(|target| {
            let distance = attacker.position.distance_to(&target.position);
            let movement_actions = rules.movement_actions(distance);
            let ranged = rules.is_ranged(distance);
            let shortfall = weapon_range.saturating_sub(movement_actions);

            TargetPlan {
                target: target.clone(),
                distance,
                movement_actions,
                ranged,
                penalty: PENALTY_PER_ACTION * shortfall,
                requires_throw_confirmation: ranged && melee_weapon && !weapon.returning,
                melee_weapon,
            }
        })
        .collect();

    Ok(AttackPlan {
        attacker: attacker.clone(),
        weapon: weapon.clone(),
        targets: plans,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::RangeBand;

    fn token(id: &str, x: f64, y: f64) -> TokenPlacement {
        TokenPlacement::new(id, id.to_uppercase(), GridPosition::new(x, y))
    }

    fn bow(range: u32) -> WeaponProfile {
        WeaponProfile {
            bow: true,
            ..WeaponProfile::new("Bow").with_range(RangeBand::MovementActions(range))
        }
    }

    #[test]
    fn no_targets_is_reported_before_attacker() {
        let err = plan_attack(None, &[], &bow(3), &TargetingRules::default()).unwrap_err();
        assert_eq!(err, TargetingError::NoTargets);
    }

    #[test]
    fn missing_attacker() {
        let targets = [token("t1", 5.0, 0.0)];
        let err = plan_attack(None, &targets, &bow(3), &TargetingRules::default()).unwrap_err();
        assert_eq!(err, TargetingError::NoAttacker);
    }

    #[test]
    fn movement_actions_round_up() {
        let rules = TargetingRules::default();
        assert_eq!(rules.movement_actions(0.0), 0);
        assert_eq!(rules.movement_actions(10.0), 1);
        assert_eq!(rules.movement_actions(10.5), 2);
    }

    #[test]
    fn euclidean_distance() {
        let attacker = token("a", 0.0, 0.0);
        let targets = [token("t", 30.0, 40.0)];
        let plan = plan_attack(Some(&attacker), &targets, &bow(3), &TargetingRules::default())
            .unwrap();
        assert_eq!(plan.targets[0].distance, 50.0);
        assert_eq!(plan.targets[0].movement_actions, 5);
    }

    #[test]
    fn ranged_threshold_is_strict() {
        let rules = TargetingRules::default();
        assert!(!rules.is_ranged(19.0));
        assert!(rules.is_ranged(19.5));
    }

    #[test]
    fn penalty_doubles_the_shortfall() {
        let attacker = token("a", 0.0, 0.0);
        let targets = [token("near", 10.0, 0.0)];
        let plan = plan_attack(Some(&attacker), &targets, &bow(3), &TargetingRules::default())
            .unwrap();
        assert_eq!(plan.targets[0].penalty, 4);
        assert_eq!(plan.targets[0].modifier(), -4);
    }

    #[test]
    fn exactly_at_range_has_no_penalty() {
        let attacker = token("a", 0.0, 0.0);
        let targets = [token("t", 30.0, 0.0)];
        let plan = plan_attack(Some(&attacker), &targets, &bow(3), &TargetingRules::default())
            .unwrap();
        assert_eq!(plan.targets[0].penalty, 0);
    }

    #[test]
    fn beyond_range_is_not_a_bonus() {
        let attacker = token("a", 0.0, 0.0);
        let targets = [token("t", 80.0, 0.0)];
        let plan = plan_attack(Some(&attacker), &targets, &bow(3), &TargetingRules::default())
            .unwrap();
        assert_eq!(plan.targets[0].penalty, 0);
        assert_eq!(plan.targets[0].modifier(), 0);
    }

    #[test]
    fn thrown_melee_weapon_needs_confirmation() {
        let attacker = token("a", 0.0, 0.0);
        let targets = [token("close", 5.0, 0.0), token("far", 25.0, 0.0)];
        let sword = WeaponProfile::new("Sword");
        let plan =
            plan_attack(Some(&attacker), &targets, &sword, &TargetingRules::default()).unwrap();

        assert!(!plan.targets[0].requires_throw_confirmation);
        assert!(plan.targets[1].requires_throw_confirmation);
        assert!(plan.requires_throw_confirmation());
        assert_eq!(plan.targets[0].attack_terms(), ["physique", "melee"]);
        assert_eq!(plan.targets[1].attack_terms(), ["finesse", "marksmanship"]);
    }

    #[test]
    fn returning_weapon_skips_confirmation() {
        let attacker = token("a", 0.0, 0.0);
        let targets = [token("far", 25.0, 0.0)];
        let axe = WeaponProfile {
            returning: true,
            ..WeaponProfile::new("Axe")
        };
        let plan = plan_attack(Some(&attacker), &targets, &axe, &TargetingRules::default()).unwrap();
        assert!(!plan.requires_throw_confirmation());
    }

    #[test]
    fn rules_reject_non_positive_distance() {
        assert!(TargetingRules::new(0.0, 1.9).is_err());
        assert!(TargetingRules::new(5.0, -1.0).is_err());
        assert!(TargetingRules::new(5.0, 1.5).is_ok());
    }
}
