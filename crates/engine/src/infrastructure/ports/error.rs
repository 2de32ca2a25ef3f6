//! Error types for port operations.

use davokar_domain::RollId;

/// Roll evaluator failures with enough context to act on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RollError {
    /// No live roll with this ID.
    #[error("Roll not found: {0}")]
    NotFound(RollId),

    /// The formula could not be read as a dice pool.
    #[error("Invalid formula '{formula}': {message}")]
    InvalidFormula { formula: String, message: String },

    /// The operation needs the roll in another state (e.g. modify after post).
    #[error("Roll {id} cannot be used for {operation}: {message}")]
    InvalidState {
        id: RollId,
        operation: &'static str,
        message: String,
    },

    /// Host evaluator failed.
    #[error("Roll evaluator error in {operation}: {message}")]
    Evaluator {
        operation: &'static str,
        message: String,
    },
}

impl RollError {
    pub fn invalid_formula(formula: impl ToString, message: impl ToString) -> Self {
        Self::InvalidFormula {
            formula: formula.to_string(),
            message: message.to_string(),
        }
    }

    pub fn invalid_state(id: RollId, operation: &'static str, message: impl ToString) -> Self {
        Self::InvalidState {
            id,
            operation,
            message: message.to_string(),
        }
    }

    pub fn evaluator(operation: &'static str, message: impl ToString) -> Self {
        Self::Evaluator {
            operation,
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_formula_keeps_context() {
        let err = RollError::invalid_formula("2d20", "Unsupported die size: d20");
        assert_eq!(
            err.to_string(),
            "Invalid formula '2d20': Unsupported die size: d20"
        );
    }

    #[test]
    fn not_found_is_detectable() {
        assert!(RollError::NotFound(RollId::new("r1")).is_not_found());
        assert!(!RollError::evaluator("post", "offline").is_not_found());
    }
}
