//! Replaces a token's second resource bar with the two-segment corruption bar.

use std::sync::Arc;

use davokar_domain::trackers::{BAR_CORNER_RADIUS, DEFAULT_BAR_HEIGHT};
use davokar_domain::{CorruptionBarLayout, CorruptionTrack, TokenId};

use crate::infrastructure::ports::{BarDrawing, BarPainter, BarShape};
use crate::infrastructure::settings::BarPalette;

/// Resource attribute a bar must be bound to for the decorator to act.
pub const CORRUPTION_ATTRIBUTE: &str = "corruption";

const BACKGROUND_COLOR: u32 = 0x000000;
const BACKGROUND_ALPHA: f64 = 0.5;
const OUTLINE_COLOR: u32 = 0x000000;
const THRESHOLD_LINE_WIDTH: f64 = 2.0;

pub struct CorruptionBarDecorator {
    painter: Arc<dyn BarPainter>,
    palette: BarPalette,
}

impl CorruptionBarDecorator {
    pub fn new(painter: Arc<dyn BarPainter>, palette: BarPalette) -> Self {
        Self { painter, palette }
    }

    /// Repaint the bar after the host has drawn its default.
    ///
    /// Returns `true` when the bar was replaced. Bars bound to another
    /// attribute, tokens without a corruption track, and tracks without a
    /// positive maximum keep the host's drawing.
    pub fn decorate(
        &self,
        token: &TokenId,
        bar_attribute: Option<&str>,
        track: Option<&CorruptionTrack>,
        width: f64,
    ) -> bool {
        let Some(track) = track else {
            return false;
        };
        if bar_attribute != Some(CORRUPTION_ATTRIBUTE) {
            return false;
        }
        let Some(layout) = CorruptionBarLayout::compute(track, width, DEFAULT_BAR_HEIGHT) else {
            return false;
        };

        let drawing = self.drawing_for(&layout);
        tracing::debug!(token_id = %token, tooltip = %drawing.tooltip, "Painting corruption bar");
        self.painter.paint(token, &drawing);
        true
    }

    fn drawing_for(&self, layout: &CorruptionBarLayout) -> BarDrawing {
        let segment = |x: f64, width: f64, fill: u32, fill_alpha: f64| BarShape::RoundedRect {
            x,
            width,
            height: layout.height,
            radius: BAR_CORNER_RADIUS,
            fill,
            fill_alpha,
            outline: OUTLINE_COLOR,
        };

        BarDrawing {
            shapes: vec![
                segment(0.0, layout.width, BACKGROUND_COLOR, BACKGROUND_ALPHA),
                segment(
                    0.0,
                    layout.permanent_width,
                    self.palette.permanent_color(),
                    1.0,
                ),
                segment(
                    layout.temporary_x(),
                    layout.temporary_width,
                    self.palette.temporary_color(),
                    1.0,
                ),
                BarShape::VerticalLine {
                    x: layout.threshold_x,
                    height: layout.height,
                    thickness: THRESHOLD_LINE_WIDTH,
                    color: self.palette.threshold_color(),
                },
            ],
            tooltip: layout.tooltip.clone(),
        }
    }
}
