//! Host output ports: dice evaluation, notifications and canvas drawing.

use async_trait::async_trait;
use davokar_domain::{RollId, TokenId};
use serde::{Deserialize, Serialize};

use super::error::RollError;

// =============================================================================
// Roll Evaluation
// =============================================================================

/// A created, not yet posted, roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollHandle {
    pub id: RollId,
    pub formula: String,
}

/// A roll as it appears in the shared log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedRoll {
    pub id: RollId,
    pub formula: String,
    pub flavor: String,
    pub successes: u32,
    pub banes: u32,
    pub pushes: u32,
    pub can_push: bool,
    /// Faces by die type, e.g. "ds[6, 3, 1] d8[7]"
    pub breakdown: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RollEvaluator: Send + Sync {
    /// Create a roll from a pool formula.
    async fn create(&self, formula: &str) -> Result<RollHandle, RollError>;

    /// Apply a flat dice modifier before the roll is evaluated.
    async fn modify(&self, roll: &RollHandle, modifier: i32) -> Result<(), RollError>;

    /// Evaluate and post to the shared log.
    async fn post(&self, roll: &RollHandle, flavor: &str) -> Result<PostedRoll, RollError>;

    /// Reroll the dice of a posted roll that scored nothing.
    async fn push(&self, roll: &RollId) -> Result<PostedRoll, RollError>;

    /// Release a roll that will never be posted or pushed.
    async fn discard(&self, roll: &RollId);
}

// =============================================================================
// Notifications
// =============================================================================

/// Non-blocking user-facing notices.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn warn(&self, message: &str);
}

// =============================================================================
// Canvas
// =============================================================================

/// One drawing instruction for a token resource bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BarShape {
    RoundedRect {
        x: f64,
        width: f64,
        height: f64,
        radius: f64,
        fill: u32,
        fill_alpha: f64,
        outline: u32,
    },
    VerticalLine {
        x: f64,
        height: f64,
        thickness: f64,
        color: u32,
    },
}

/// A complete replacement drawing for one bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDrawing {
    pub shapes: Vec<BarShape>,
    pub tooltip: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait BarPainter: Send + Sync {
    /// Clear the token's bar and draw `drawing` in its place.
    fn paint(&self, token: &TokenId, drawing: &BarDrawing);
}

/// State of the wrath orb shown to every user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrathView {
    pub points: u32,
    pub previous: u32,
    /// 0-100
    pub fill_percent: f64,
}

impl WrathView {
    /// Vertical offset of the liquid, in percent of the orb height.
    pub fn liquid_offset_percent(&self) -> f64 {
        100.0 - self.fill_percent
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait WrathDisplay: Send + Sync {
    fn render(&self, view: &WrathView);
}
