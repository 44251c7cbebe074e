//! Funnel chart: stacked segments tapering from the full width to a narrow neck.

use std::sync::Mutex;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::canvas::{BrailleCanvas, COL_MULT, ROW_MULT};
use crate::error::Result;
use crate::layout::ComponentKind;
use crate::primitives::trapezoid;
use crate::widgets::segments::SegmentSeries;
use crate::widgets::{ensure_fits, lock, Component};

/// Width of the funnel's last scan line, in dots.
const BOTTOM_WIDTH: i32 = 5;

/// Funnel chart.
#[derive(Debug, Default)]
pub struct Funnel {
    series: Mutex<Option<SegmentSeries>>,
}

impl Funnel {
    /// Creates an empty funnel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and replaces values and colors.
    pub fn set_values(&self, values: &[i64], colors: Vec<Color>) -> Result<()> {
        let series = SegmentSeries::new(values, colors)?;
        self.set_series(series);
        Ok(())
    }

    /// Replaces the series with one that was already validated.
    pub fn set_series(&self, series: SegmentSeries) {
        *lock(&self.series) = Some(series);
    }

    /// A copy of the current series.
    #[must_use]
    pub fn series(&self) -> Option<SegmentSeries> {
        lock(&self.series).clone()
    }
}

impl Component for Funnel {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Funnel
    }

    fn draw(&self, area: Rect, buf: &mut Buffer) -> Result<()> {
        ensure_fits(area, self.minimum_size())?;
        let guard = lock(&self.series);
        let Some(series) = guard.as_ref().filter(|s| s.total() > 0) else {
            return Ok(());
        };

        let mut canvas = BrailleCanvas::new(area);
        let center_x = i32::from(area.width) * COL_MULT / 2;
        let funnel_height = f64::from(i32::from(area.height) * ROW_MULT - 2);
        let top_width = f64::from(i32::from(area.width) * COL_MULT - 2);
        let taper = top_width - f64::from(BOTTOM_WIDTH);

        let mut y = 1;
        let mut cumulative = 0.0;
        for (i, fraction) in series.fractions().enumerate() {
            let height = ((fraction * funnel_height) as i32).max(1);
            let upper = (top_width - taper * cumulative) as i32;
            cumulative += fraction;
            let lower = (top_width - taper * cumulative) as i32;

            trapezoid(&mut canvas, center_x, y, height, upper, lower, series.color_at(i));
            y += height;
        }

        canvas.copy_to(buf);
        Ok(())
    }

    fn aspect_ratio(&self) -> (u16, u16) {
        (4, 2)
    }
}
