//! Push a posted roll: reroll every die that scored nothing.

use std::sync::Arc;

use davokar_domain::RollId;

use crate::infrastructure::ports::{NotificationSink, PostedRoll, RollError, RollEvaluator};

pub struct PushRoll {
    evaluator: Arc<dyn RollEvaluator>,
    notifier: Arc<dyn NotificationSink>,
}

impl PushRoll {
    pub fn new(evaluator: Arc<dyn RollEvaluator>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            evaluator,
            notifier,
        }
    }

    /// Returns `Ok(None)` when the roll may not be pushed again; the user
    /// is told why.
    pub async fn execute(&self, roll: &RollId) -> Result<Option<PostedRoll>, RollError> {
        match self.evaluator.push(roll).await {
            Ok(posted) => {
                tracing::info!(
                    roll_id = %posted.id,
                    pushes = posted.pushes,
                    successes = posted.successes,
                    "Roll pushed"
                );
                Ok(Some(posted))
            }
            Err(err @ RollError::InvalidState { .. }) => {
                tracing::warn!(roll_id = %roll, error = %err, "Push refused");
                self.notifier.warn(&err.to_string());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
