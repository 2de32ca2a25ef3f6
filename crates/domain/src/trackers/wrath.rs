//! Wrath points: a party-wide counter the game master raises and lowers.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const DEFAULT_WRATH_OVERFLOW: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    GameMaster,
    Player,
}

impl UserRole {
    pub fn is_game_master(&self) -> bool {
        matches!(self, UserRole::GameMaster)
    }
}

/// Before/after values of a wrath change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrathChange {
    pub previous: u32,
    pub current: u32,
}

impl WrathChange {
    pub fn delta(&self) -> i64 {
        i64::from(self.current) - i64::from(self.previous)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrathTracker {
    points: u32,
    previous: u32,
    /// Points at which the orb is full
    overflow: u32,
}

impl WrathTracker {
    pub fn new(points: u32, overflow: u32) -> Result<Self, DomainError> {
        if overflow == 0 {
            return Err(DomainError::validation("wrath overflow must be at least 1"));
        }
        Ok(Self {
            points,
            previous: points,
            overflow,
        })
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn previous(&self) -> u32 {
        self.previous
    }

    pub fn overflow(&self) -> u32 {
        self.overflow
    }

    pub fn increase(&mut self, role: UserRole) -> Result<WrathChange, DomainError> {
        Self::ensure_game_master(role)?;
        Ok(self.set(self.points.saturating_add(1)))
    }

    /// Lowering at zero is a no-op, not an error.
    pub fn decrease(&mut self, role: UserRole) -> Result<WrathChange, DomainError> {
        Self::ensure_game_master(role)?;
        Ok(self.set(self.points.saturating_sub(1)))
    }

    /// Adopt a value changed elsewhere, e.g. by another client.
    pub fn sync(&mut self, points: u32) -> WrathChange {
        self.set(points)
    }

    /// Fill level of the orb in `0.0..=1.0`. Points past overflow stay full.
    pub fn fill_fraction(&self) -> f64 {
        (f64::from(self.points) / f64::from(self.overflow)).min(1.0)
    }

    fn set(&mut self, points: u32) -> WrathChange {
        self.previous = self.points;
        self.points = points;
        WrathChange {
            previous: self.previous,
            current: self.points,
        }
    }

    fn ensure_game_master(role: UserRole) -> Result<(), DomainError> {
        if role.is_game_master() {
            Ok(())
        } else {
            Err(DomainError::constraint(
                "only the game master can change wrath points",
            ))
        }
    }
}

impl Default for WrathTracker {
    fn default() -> Self {
        Self {
            points: 0,
            previous: 0,
            overflow: DEFAULT_WRATH_OVERFLOW,
        }
    }
}
