//! Attack roll use case.
//!
//! Rolls one attack per selected target, with a penalty for targets closer
//! than the weapon's stated range. Missing targets or attacker tokens are
//! user warnings, not errors.

use std::sync::Arc;

use davokar_domain::{
    plan_attack, CharacterSnapshot, RollRequest, TargetingError, TargetingRules, TokenPlacement,
    WeaponProfile,
};

use crate::infrastructure::ports::{NotificationSink, PostedRoll, RollError, SelectionPrompt};

use super::skill_roll::SkillRoll;

#[derive(Debug, Clone, PartialEq)]
pub enum AttackRollOutcome {
    /// Nothing to attack with or nothing to attack; the user was warned.
    Aborted(TargetingError),
    /// The user dismissed a prompt.
    Declined,
    Posted(Vec<PostedRoll>),
}

#[derive(Debug, thiserror::Error)]
pub enum AttackRollError {
    #[error("Attack roll failed: {0}")]
    Roll(#[from] RollError),
}

pub struct AttackRoll {
    prompt: Arc<dyn SelectionPrompt>,
    notifier: Arc<dyn NotificationSink>,
    rolls: Arc<SkillRoll>,
    rules: TargetingRules,
}

impl AttackRoll {
    pub fn new(
        prompt: Arc<dyn SelectionPrompt>,
        notifier: Arc<dyn NotificationSink>,
        rolls: Arc<SkillRoll>,
        rules: TargetingRules,
    ) -> Self {
        Self {
            prompt,
            notifier,
            rolls,
            rules,
        }
    }

    /// Execute an attack.
    ///
    /// # Arguments
    /// * `snapshot` - The attacking character
    /// * `weapon` - Weapon used for every target
    /// * `attacker_tokens` - The character's tokens on the scene
    /// * `targets` - Tokens the user has targeted
    pub async fn execute(
        &self,
        snapshot: &CharacterSnapshot,
        weapon: &WeaponProfile,
        attacker_tokens: &[TokenPlacement],
        targets: &[TokenPlacement],
    ) -> Result<AttackRollOutcome, AttackRollError> {
        if targets.is_empty() {
            return Ok(self.abort(TargetingError::NoTargets));
        }

        let attacker = match attacker_tokens {
            [] => None,
            [only] => Some(only.clone()),
            several => match self.prompt.choose_attacker(several).await {
                Some(chosen) => Some(chosen),
                None => return Ok(AttackRollOutcome::Declined),
            },
        };

        let plan = match plan_attack(attacker.as_ref(), targets, weapon, &self.rules) {
            Ok(plan) => plan,
            Err(err) => return Ok(self.abort(err)),
        };

        if plan.requires_throw_confirmation() && !self.prompt.confirm_throw(weapon).await {
            tracing::debug!(weapon = %weapon.name, "Throw declined");
            return Ok(AttackRollOutcome::Declined);
        }

        let mut posted = Vec::with_capacity(plan.targets.len());
        for target in &plan.targets {
            let request = RollRequest::new(target.attack_terms()).with_modifier(target.modifier());
            let built = self.rolls.build(snapshot, &request);
            let flavor = format!(
                "{}: {} vs {}",
                weapon.name,
                built.flavor(),
                target.target.name
            );
            let roll = self.rolls.post_built(&built, &flavor).await?;

            tracing::info!(
                attacker = %plan.attacker.name,
                target = %target.target.name,
                distance = target.distance,
                movement_actions = target.movement_actions,
                penalty = target.penalty,
                roll_id = %roll.id,
                "Attack rolled"
            );
            posted.push(roll);
        }

        Ok(AttackRollOutcome::Posted(posted))
    }

    fn abort(&self, err: TargetingError) -> AttackRollOutcome {
        tracing::warn!(error = %err, "Attack aborted");
        self.notifier.warn(&err.to_string());
        AttackRollOutcome::Aborted(err)
    }
}
