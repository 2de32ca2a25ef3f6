//! Flat modifier step shared by every roll pipeline.

use crate::infrastructure::ports::{RollError, RollEvaluator, RollHandle};

/// Apply `modifier` to a created roll.
///
/// Zero means no call at all; any other value is exactly one `modify`.
pub async fn apply_modifier(
    evaluator: &dyn RollEvaluator,
    roll: &RollHandle,
    modifier: i32,
) -> Result<(), RollError> {
    if modifier == 0 {
        return Ok(());
    }
    evaluator.modify(roll, modifier).await
}
