//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Dice evaluation and the shared roll log (host roller or the local one)
//! - Dialogs and prompts (host UI)
//! - Notifications and canvas drawing (host UI)
//! - Random (for testing)

mod error;
mod external;
mod prompts;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    BarDrawing, BarPainter, BarShape, NotificationSink, PostedRoll, RollEvaluator, RollHandle,
    WrathDisplay, WrathView,
};

pub use prompts::SelectionPrompt;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::RandomPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockBarPainter, MockNotificationSink, MockRollEvaluator, MockWrathDisplay};
#[cfg(test)]
pub use prompts::MockSelectionPrompt;
#[cfg(test)]
pub use testing::MockRandomPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RollError;
