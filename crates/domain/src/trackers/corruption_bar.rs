use serde::{Deserialize, Serialize};

use crate::character::CorruptionTrack;

pub const DEFAULT_BAR_HEIGHT: f64 = 8.0;
pub const BAR_CORNER_RADIUS: f64 = 3.0;

/// Geometry of the two-segment corruption bar drawn under a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorruptionBarLayout {
    pub width: f64,
    pub height: f64,
    pub permanent_width: f64,
    pub temporary_width: f64,
    pub threshold_x: f64,
    pub tooltip: String,
}

impl CorruptionBarLayout {
    /// `None` when the track has no positive maximum; the host's default bar
    /// is left alone in that case.
    pub fn compute(track: &CorruptionTrack, width: f64, height: f64) -> Option<Self> {
        let max = track.max();
        if max <= 0 {
            return None;
        }

        let scale = |value: i32| f64::from(value) / f64::from(max) * width;
        let permanent = track.permanent();
        let temporary = track.temporary();

        Some(Self {
            width,
            height,
            permanent_width: scale(permanent),
            temporary_width: scale(temporary),
            threshold_x: scale(track.threshold()),
            tooltip: format!(
                "Corruption: {} ({} perm + {} temp)",
                permanent + temporary,
                permanent,
                temporary
            ),
        })
    }

    /// Temporary corruption is drawn right after the permanent segment.
    pub fn temporary_x(&self) -> f64 {
        self.permanent_width
    }
}
