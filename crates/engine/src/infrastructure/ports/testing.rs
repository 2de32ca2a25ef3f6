//! Testability port for injecting randomness.

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// A face in `1..=sides`.
    fn roll_die(&self, sides: u8) -> u8;
}
