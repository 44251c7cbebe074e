//! Scatter plot on braille dots.

use std::sync::Mutex;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::canvas::BrailleCanvas;
use crate::error::Result;
use crate::layout::ComponentKind;
use crate::widgets::{ensure_fits, lock, Component};

/// Clearance between the region edge and the plot, in dots.
const PADDING: i32 = 4;

/// A point in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    /// Horizontal value.
    pub x: f64,
    /// Vertical value.
    pub y: f64,
}

impl ScatterPoint {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Default)]
struct ScatterState {
    points: Vec<ScatterPoint>,
    x_label: String,
    y_label: String,
}

/// Scatter plot of two numeric series.
#[derive(Debug)]
pub struct ScatterPlot {
    state: Mutex<ScatterState>,
    color: Color,
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ScatterPlot {
    /// Creates an empty scatter plot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ScatterState::default()),
            color: Color::Indexed(45),
        }
    }

    /// Sets the point and axis color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Replaces the point set and the axis labels.
    ///
    /// Points with a non-finite coordinate cannot be placed and are dropped.
    pub fn set_points(
        &self,
        points: Vec<ScatterPoint>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Result<()> {
        let points: Vec<ScatterPoint> = points
            .into_iter()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .collect();

        let mut state = lock(&self.state);
        state.points = points;
        state.x_label = x_label.into();
        state.y_label = y_label.into();
        Ok(())
    }

    /// Number of points currently plotted.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.state).points.len()
    }

    /// Whether the plot has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current `(x, y)` axis labels.
    #[must_use]
    pub fn labels(&self) -> (String, String) {
        let state = lock(&self.state);
        (state.x_label.clone(), state.y_label.clone())
    }
}

/// Min and max of one axis, widened by one unit on each side when degenerate.
fn axis_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (mut min, mut max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if (max - min).abs() < f64::EPSILON {
        max += 1.0;
        min -= 1.0;
    }
    (min, max)
}

impl Component for ScatterPlot {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Scatter
    }

    fn draw(&self, area: Rect, buf: &mut Buffer) -> Result<()> {
        ensure_fits(area, self.minimum_size())?;
        let state = lock(&self.state);
        if state.points.is_empty() {
            return Ok(());
        }

        let (min_x, max_x) = axis_bounds(state.points.iter().map(|p| p.x));
        let (min_y, max_y) = axis_bounds(state.points.iter().map(|p| p.y));

        let mut canvas = BrailleCanvas::new(area);
        let width = canvas.dot_width();
        let height = canvas.dot_height();
        let plot_w = width - PADDING * 2;
        let plot_h = height - PADDING * 2;
        if plot_w <= 0 || plot_h <= 0 {
            return Ok(());
        }

        // Origin sits bottom-left; dot rows grow downwards.
        let origin_x = PADDING;
        let origin_y = height - PADDING;

        for y in PADDING..origin_y {
            canvas.set_dot(origin_x, y, self.color);
        }
        for x in origin_x..width - PADDING {
            canvas.set_dot(x, origin_y, self.color);
        }

        for p in &state.points {
            let x_norm = (p.x - min_x) / (max_x - min_x);
            let y_norm = (p.y - min_y) / (max_y - min_y);
            let bx = origin_x + (x_norm * f64::from(plot_w)) as i32;
            let by = origin_y - (y_norm * f64::from(plot_h)) as i32;
            canvas.set_dot(bx, by, self.color);
        }

        canvas.copy_to(buf);
        Ok(())
    }

    fn aspect_ratio(&self) -> (u16, u16) {
        (2, 4)
    }
}
