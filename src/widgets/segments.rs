//! Value/color series shared by the funnel and pie charts.

use ratatui::style::Color;

use crate::error::{Error, Result};

/// Non-negative values paired with colors by position.
///
/// Colors wrap when there are more values than colors. A series whose total
/// is zero is valid but renders nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSeries {
    values: Vec<u64>,
    colors: Vec<Color>,
    total: u128,
}

impl SegmentSeries {
    /// Validates and builds a series.
    ///
    /// Fails when either list is empty or any value is negative.
    pub fn new(values: &[i64], colors: Vec<Color>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyValues);
        }
        if colors.is_empty() {
            return Err(Error::EmptyColors);
        }

        let values = values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                u64::try_from(value).map_err(|_| Error::NegativeValue { index, value })
            })
            .collect::<Result<Vec<u64>>>()?;
        let total = values.iter().map(|&v| u128::from(v)).sum();

        Ok(Self {
            values,
            colors,
            total,
        })
    }

    /// Values in order.
    #[must_use]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Configured colors.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Exact sum of all values.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.total
    }

    /// Color of segment `index`, wrapping around the palette.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Share of the total held by each value, in order.
    ///
    /// Empty when the total is zero.
    pub fn fractions(&self) -> impl Iterator<Item = f64> + '_ {
        let total = self.total as f64;
        self.values
            .iter()
            .take_while(move |_| self.total > 0)
            .map(move |&v| v as f64 / total)
    }
}
