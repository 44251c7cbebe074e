//! Radar (spider) chart.
//!
//! Categories are laid out clockwise starting at twelve o'clock, in sorted
//! label order. Each category gets a spoke from the center to the outer ring;
//! the data polygon joins the value points and closes back on the first.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::Mutex;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::canvas::BrailleCanvas;
use crate::error::{Error, Result};
use crate::layout::ComponentKind;
use crate::primitives::{circle, line, mid_and_radii, polygon, Dot};
use crate::widgets::{ensure_fits, lock, Component};

/// Clearance between the outer ring and the region edge, in dots.
const MARGIN: i32 = 2;

/// Fewest categories a radar can plot.
pub const MIN_CATEGORIES: usize = 3;

/// Values per category plus the shared scale maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarValues {
    /// Value per category label.
    pub data: BTreeMap<String, f64>,
    /// Value that reaches the outer ring.
    pub max: f64,
}

impl RadarValues {
    /// Builds values from `(label, value)` pairs.
    #[must_use]
    pub fn new<I, S>(pairs: I, max: f64) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            data: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            max,
        }
    }

    /// Checks category count, the maximum, and every value against `[0, max]`.
    pub fn validate(&self) -> Result<()> {
        if self.data.len() < MIN_CATEGORIES {
            return Err(Error::TooFewCategories(self.data.len()));
        }
        if !(self.max.is_finite() && self.max > 0.0) {
            return Err(Error::NonPositiveMax(self.max));
        }
        for (label, &value) in &self.data {
            if !(0.0..=self.max).contains(&value) {
                return Err(Error::ValueOutOfRange {
                    label: label.clone(),
                    value,
                    max: self.max,
                });
            }
        }
        Ok(())
    }
}

/// Radar chart over three or more categories.
#[derive(Debug)]
pub struct Radar {
    values: Mutex<Option<RadarValues>>,
    axis_color: Color,
    data_color: Color,
}

impl Default for Radar {
    fn default() -> Self {
        Self::new()
    }
}

impl Radar {
    /// Creates a radar with no values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Mutex::new(None),
            axis_color: Color::Indexed(240),
            data_color: Color::Indexed(42),
        }
    }

    /// Sets the ring and spoke color.
    #[must_use]
    pub fn axis_color(mut self, color: Color) -> Self {
        self.axis_color = color;
        self
    }

    /// Sets the data polygon color.
    #[must_use]
    pub fn data_color(mut self, color: Color) -> Self {
        self.data_color = color;
        self
    }

    /// Replaces the plotted values.
    ///
    /// On a validation error the previous values stay in place.
    pub fn set_values(&self, values: RadarValues) -> Result<()> {
        values.validate()?;
        *lock(&self.values) = Some(values);
        Ok(())
    }

    /// A copy of the current values, if any were accepted.
    #[must_use]
    pub fn values(&self) -> Option<RadarValues> {
        lock(&self.values).clone()
    }
}

impl Component for Radar {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Radar
    }

    fn draw(&self, area: Rect, buf: &mut Buffer) -> Result<()> {
        ensure_fits(area, self.minimum_size())?;
        let guard = lock(&self.values);
        let Some(values) = guard.as_ref() else {
            return Ok(());
        };

        let mut canvas = BrailleCanvas::new(area);
        let (mid, radii) = mid_and_radii(&canvas, MARGIN);
        circle(&mut canvas, mid, radii, self.axis_color);

        let step = TAU / values.data.len() as f64;
        let vertices: Vec<Dot> = values
            .data
            .values()
            .enumerate()
            .map(|(i, &value)| {
                let angle = i as f64 * step - FRAC_PI_2;
                line(&mut canvas, mid, mid.polar(radii, angle), self.axis_color);
                mid.polar(radii.scale(value / values.max), angle)
            })
            .collect();

        polygon(&mut canvas, &vertices, self.data_color);
        canvas.copy_to(buf);
        Ok(())
    }

    fn aspect_ratio(&self) -> (u16, u16) {
        (4, 2)
    }
}
