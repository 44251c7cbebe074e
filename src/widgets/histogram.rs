//! Histogram with braille-resolution bars and an optional alert bin.

use std::sync::Mutex;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::canvas::BrailleCanvas;
use crate::error::Result;
use crate::layout::ComponentKind;
use crate::widgets::{ensure_fits, lock, Component};

/// Clearance between the region edge and the bars, in dots.
const PADDING: i32 = 4;

/// Bars at least this wide (in dots) get a one-dot gap to their right.
const GAP_MIN_WIDTH: i32 = 3;

/// Bin counts plus the domain they were computed over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinSeries {
    /// Count per bin, left to right.
    pub bins: Vec<u64>,
    /// Lower bound of the binned domain.
    pub min: f64,
    /// Upper bound of the binned domain.
    pub max: f64,
    /// Optional label per bin.
    pub labels: Vec<String>,
    /// Bin drawn in the alert color.
    pub alert: Option<usize>,
}

impl BinSeries {
    /// Creates a series without labels or alert.
    #[must_use]
    pub fn new(bins: Vec<u64>, min: f64, max: f64) -> Self {
        Self {
            bins,
            min,
            max,
            labels: Vec::new(),
            alert: None,
        }
    }

    /// Attaches bin labels.
    #[must_use]
    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Marks one bin for the alert color.
    #[must_use]
    pub fn alert(mut self, index: usize) -> Self {
        self.alert = Some(index);
        self
    }
}

#[derive(Debug)]
struct HistogramState {
    series: BinSeries,
    alert_color: Color,
}

/// Histogram of precomputed bins.
#[derive(Debug)]
pub struct Histogram {
    state: Mutex<HistogramState>,
    bar_color: Color,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Creates an empty histogram.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HistogramState {
                series: BinSeries::default(),
                alert_color: Color::Indexed(1),
            }),
            bar_color: Color::Indexed(42),
        }
    }

    /// Sets the base bar color.
    #[must_use]
    pub fn bar_color(mut self, color: Color) -> Self {
        self.bar_color = color;
        self
    }

    /// Replaces bins, domain, labels and alert index.
    pub fn set_bins(&self, series: BinSeries) -> Result<()> {
        lock(&self.state).series = series;
        Ok(())
    }

    /// Changes the alert bin color.
    pub fn set_alert_color(&self, color: Color) {
        lock(&self.state).alert_color = color;
    }

    /// A copy of the current series.
    #[must_use]
    pub fn series(&self) -> BinSeries {
        lock(&self.state).series.clone()
    }
}

impl Component for Histogram {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Histogram
    }

    fn draw(&self, area: Rect, buf: &mut Buffer) -> Result<()> {
        ensure_fits(area, self.minimum_size())?;
        let state = lock(&self.state);
        let bins = &state.series.bins;
        if bins.is_empty() {
            return Ok(());
        }

        let mut canvas = BrailleCanvas::new(area);
        let width = canvas.dot_width();
        let height = canvas.dot_height();
        let plot_w = width - PADDING * 2;
        let plot_h = height - PADDING * 2;
        if plot_w <= 0 || plot_h <= 0 {
            return Ok(());
        }

        let max_count = bins.iter().copied().max().unwrap_or(0).max(1);
        let bar_width = (plot_w / bins.len() as i32).max(1);
        let gap = i32::from(bar_width >= GAP_MIN_WIDTH);
        let fill_width = bar_width - gap;

        let origin_x = PADDING;
        let origin_y = height - PADDING;

        for (i, &count) in bins.iter().enumerate() {
            let bar_height = (count as f64 / max_count as f64 * f64::from(plot_h)) as i32;
            let color = if state.series.alert == Some(i) {
                state.alert_color
            } else {
                self.bar_color
            };

            let start_x = origin_x + i as i32 * bar_width;
            for x in 0..fill_width {
                for y in 0..bar_height {
                    canvas.set_dot(start_x + x, origin_y - 1 - y, color);
                }
            }
        }

        canvas.copy_to(buf);
        Ok(())
    }

    fn aspect_ratio(&self) -> (u16, u16) {
        (2, 4)
    }
}
