//! In-process roll evaluator.
//!
//! Rolls pool formulas with the domain dice rules instead of a host roller.
//! Used by the CLI and anywhere a host dice engine is unavailable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use davokar_domain::{DicePool, PoolRoll, RollId};

use crate::infrastructure::ports::{PostedRoll, RandomPort, RollError, RollEvaluator, RollHandle};

struct LiveRoll {
    formula: String,
    pool: DicePool,
    flavor: String,
    /// Set once posted
    result: Option<PoolRoll>,
}

pub struct LocalRollEvaluator {
    random: Arc<dyn RandomPort>,
    max_pushes: u32,
    rolls: DashMap<RollId, LiveRoll>,
    next_id: AtomicU64,
}

impl LocalRollEvaluator {
    pub fn new(random: Arc<dyn RandomPort>, max_pushes: u32) -> Self {
        Self {
            random,
            max_pushes,
            rolls: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn live_rolls(&self) -> usize {
        self.rolls.len()
    }

    fn release(&self, id: &RollId) {
        if self.rolls.remove(id).is_some() {
            tracing::debug!(roll_id = %id, "Roll released");
        }
    }

    fn posted_view(&self, id: &RollId, live: &LiveRoll, result: &PoolRoll) -> PostedRoll {
        PostedRoll {
            id: id.clone(),
            formula: live.formula.clone(),
            flavor: live.flavor.clone(),
            successes: result.successes(),
            banes: result.banes(),
            pushes: result.pushes,
            can_push: result.can_push(self.max_pushes),
            breakdown: result.breakdown(),
        }
    }
}

#[async_trait]
impl RollEvaluator for LocalRollEvaluator {
    async fn create(&self, formula: &str) -> Result<RollHandle, RollError> {
        let pool =
            DicePool::parse(formula).map_err(|e| RollError::invalid_formula(formula, e))?;

        let id = RollId::new(format!(
            "roll-{}",
            self.next_id.fetch_add(1, Ordering::Relaxed)
        ));
        self.rolls.insert(
            id.clone(),
            LiveRoll {
                formula: formula.to_string(),
                pool,
                flavor: String::new(),
                result: None,
            },
        );

        tracing::debug!(roll_id = %id, formula = %formula, "Roll created");
        Ok(RollHandle {
            id,
            formula: formula.to_string(),
        })
    }

    async fn modify(&self, roll: &RollHandle, modifier: i32) -> Result<(), RollError> {
        let mut live = self
            .rolls
            .get_mut(&roll.id)
            .ok_or_else(|| RollError::NotFound(roll.id.clone()))?;

        if live.result.is_some() {
            return Err(RollError::invalid_state(
                roll.id.clone(),
                "modify",
                "roll has already been posted",
            ));
        }

        live.pool.modify(modifier);
        tracing::debug!(
            roll_id = %roll.id,
            modifier,
            dice = live.pool.dice_count(),
            "Roll modified"
        );
        Ok(())
    }

    async fn post(&self, roll: &RollHandle, flavor: &str) -> Result<PostedRoll, RollError> {
        let posted = {
            let mut live = self
                .rolls
                .get_mut(&roll.id)
                .ok_or_else(|| RollError::NotFound(roll.id.clone()))?;

            if live.result.is_some() {
                return Err(RollError::invalid_state(
                    roll.id.clone(),
                    "post",
                    "roll has already been posted",
                ));
            }

            let result = live.pool.roll(|sides| self.random.roll_die(sides));
            live.flavor = flavor.to_string();
            let posted = self.posted_view(&roll.id, &live, &result);
            live.result = Some(result);
            posted
        };

        tracing::info!(
            roll_id = %posted.id,
            flavor = %posted.flavor,
            successes = posted.successes,
            banes = posted.banes,
            dice = %posted.breakdown,
            "Roll posted"
        );
        if !posted.can_push {
            self.release(&roll.id);
        }
        Ok(posted)
    }

    async fn push(&self, roll: &RollId) -> Result<PostedRoll, RollError> {
        let outcome = {
            let mut live = self
                .rolls
                .get_mut(roll)
                .ok_or_else(|| RollError::NotFound(roll.clone()))?;

            let mut result = live.result.take().ok_or_else(|| {
                RollError::invalid_state(roll.clone(), "push", "roll has not been posted")
            })?;

            let pushed = result.push(self.max_pushes, |sides| self.random.roll_die(sides));
            let posted = self.posted_view(roll, &live, &result);
            live.result = Some(result);
            pushed.map(|rerolled| (rerolled, posted))
        };

        let (rerolled, posted) = match outcome {
            Ok(done) => done,
            Err(e) => {
                self.release(roll);
                return Err(RollError::invalid_state(roll.clone(), "push", e));
            }
        };

        tracing::info!(
            roll_id = %roll,
            rerolled,
            successes = posted.successes,
            banes = posted.banes,
            dice = %posted.breakdown,
            "Roll pushed"
        );
        if !posted.can_push {
            self.release(roll);
        }
        Ok(posted)
    }

    async fn discard(&self, roll: &RollId) {
        self.release(roll);
    }
}
