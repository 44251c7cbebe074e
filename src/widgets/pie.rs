//! Pie chart drawn as a ring of colored slices.

use std::f64::consts::TAU;
use std::sync::Mutex;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::canvas::BrailleCanvas;
use crate::error::Result;
use crate::layout::ComponentKind;
use crate::primitives::{arc_sweep, mid_and_radii, ArcStep};
use crate::widgets::segments::SegmentSeries;
use crate::widgets::{ensure_fits, lock, Component};

/// Clearance between the ring and the region edge, in dots.
const MARGIN: i32 = 2;

/// Inner radius of the ring relative to the outer radius.
pub const INNER_RATIO: f64 = 0.6;

/// Pie chart with a hollow center.
///
/// Slices start at three o'clock and run clockwise, each spanning
/// `value / total` of the full turn.
#[derive(Debug, Default)]
pub struct PieChart {
    series: Mutex<Option<SegmentSeries>>,
    step: ArcStep,
    gap_free: bool,
}

impl PieChart {
    /// Creates an empty pie chart sampling arcs at [`ArcStep::DEFAULT`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the angular sampling step.
    #[must_use]
    pub fn arc_step(mut self, step: ArcStep) -> Self {
        self.step = step;
        self
    }

    /// Refines the step per draw so the outer edge never shows gaps.
    #[must_use]
    pub fn gap_free(mut self, enabled: bool) -> Self {
        self.gap_free = enabled;
        self
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

impl Component for PieChart {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Pie
    }

    fn draw(&self, area: Rect, buf: &mut Buffer) -> Result<()> {
        ensure_fits(area, self.minimum_size())?;
        let guard = lock(&self.series);
        let Some(series) = guard.as_ref().filter(|s| s.total() > 0) else {
            return Ok(());
        };

        let mut canvas = BrailleCanvas::new(area);
        let (mid, outer) = mid_and_radii(&canvas, MARGIN);
        let inner = outer.scale(INNER_RATIO);
        let step = if self.gap_free {
            self.step.densest(outer.x.max(outer.y))
        } else {
            self.step
        };

        let mut start = 0.0;
        for (i, fraction) in series.fractions().enumerate() {
            let end = start + fraction * TAU;
            arc_sweep(
                &mut canvas,
                mid,
                inner,
                outer,
                start,
                end,
                step,
                series.color_at(i),
            );
            start = end;
        }

        canvas.copy_to(buf);
        Ok(())
    }

    fn aspect_ratio(&self) -> (u16, u16) {
        (4, 2)
    }
}
