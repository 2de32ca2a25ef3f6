//! Table-wide trackers shown outside the character sheet.

mod corruption_bar;
mod wrath;

pub use corruption_bar::{CorruptionBarLayout, BAR_CORNER_RADIUS, DEFAULT_BAR_HEIGHT};
pub use wrath::{UserRole, WrathChange, WrathTracker, DEFAULT_WRATH_OVERFLOW};
