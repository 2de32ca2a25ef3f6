//! Adjust wrath use case.
//!
//! Owns the party's wrath tracker and keeps the orb display in step with it.

use std::sync::Arc;

use tokio::sync::Mutex;

use davokar_domain::{DomainError, UserRole, WrathChange, WrathTracker};

use crate::infrastructure::ports::{WrathDisplay, WrathView};

pub struct AdjustWrath {
    tracker: Mutex<WrathTracker>,
    display: Arc<dyn WrathDisplay>,
}

impl AdjustWrath {
    pub fn new(tracker: WrathTracker, display: Arc<dyn WrathDisplay>) -> Self {
        Self {
            tracker: Mutex::new(tracker),
            display,
        }
    }

    /// Draw the orb for the current value.
    pub async fn refresh(&self) -> WrathView {
        let tracker = self.tracker.lock().await;
        self.render(&tracker)
    }

    pub async fn increase(&self, role: UserRole) -> Result<WrathChange, DomainError> {
        let mut tracker = self.tracker.lock().await;
        let change = tracker.increase(role).inspect_err(|err| {
            tracing::warn!(role = ?role, error = %err, "Wrath increase refused");
        })?;
        self.render(&tracker);
        Ok(change)
    }

    pub async fn decrease(&self, role: UserRole) -> Result<WrathChange, DomainError> {
        let mut tracker = self.tracker.lock().await;
        let change = tracker.decrease(role).inspect_err(|err| {
            tracing::warn!(role = ?role, error = %err, "Wrath decrease refused");
        })?;
        self.render(&tracker);
        Ok(change)
    }

    /// Apply a value changed by another client.
    pub async fn sync(&self, points: u32) -> WrathChange {
        let mut tracker = self.tracker.lock().await;
        let change = tracker.sync(points);
        self.render(&tracker);
        change
    }

    pub async fn points(&self) -> u32 {
        self.tracker.lock().await.points()
    }

    fn render(&self, tracker: &WrathTracker) -> WrathView {
        let view = WrathView {
            points: tracker.points(),
            previous: tracker.previous(),
            fill_percent: tracker.fill_fraction() * 100.0,
        };
        tracing::debug!(points = view.points, previous = view.previous, "Wrath updated");
        self.display.render(&view);
        view
    }
}
