//! Data snapshots and the per-widget derivations recomputed from them.
//!
//! A [`DataSnapshot`] is an immutable table of string records. The host
//! publishes snapshots into a [`SnapshotStore`]; every [`Feed`] reads the
//! latest one on its own tick, derives its widget's series, and pushes the
//! result through the widget's replace call.
//!
//! Records that cannot be parsed for a derivation are skipped, never fatal.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use ratatui::style::Color;
use tracing::debug;

use crate::error::{Error, Result};
use crate::widgets::{
    BinSeries, Cell, Funnel, Histogram, PieChart, Radar, RadarValues, ScatterPlot, ScatterPoint,
    Table,
};

/// Column used for radar labels when none is configured.
const DEFAULT_LABEL_INDEX: usize = 0;

/// Column used for radar and funnel values when none is configured.
const DEFAULT_VALUE_INDEX: usize = 1;

/// Header plus string records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSnapshot {
    header: Vec<String>,
    records: Vec<Vec<String>>,
}

impl DataSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub fn new(header: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { header, records }
    }

    /// Column names.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Records in source order.
    #[must_use]
    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    /// Index of the column called `name`.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    fn column_or(&self, name: Option<&str>, fallback: usize) -> Result<usize> {
        name.map_or(Ok(fallback), |n| self.column(n))
    }

    /// Parses `column` of every record, skipping records where that fails.
    fn parsed<T: std::str::FromStr>(&self, column: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter_map(move |(i, record)| {
                let Some(raw) = record.get(column) else {
                    debug!(record = i, column, "record too short, skipped");
                    return None;
                };
                match raw.trim().parse::<T>() {
                    Ok(v) => Some((i, v)),
                    Err(_) => {
                        debug!(record = i, column, value = %raw, "unparsable value, skipped");
                        None
                    }
                }
            })
    }

    /// Scatter points from two numeric columns.
    pub fn scatter_points(&self, x_col: &str, y_col: &str) -> Result<Vec<ScatterPoint>> {
        let x = self.column(x_col)?;
        let y = self.column(y_col)?;
        let xs: Vec<(usize, f64)> = self.parsed(x).collect();
        let ys: std::collections::HashMap<usize, f64> = self.parsed(y).collect();

        Ok(xs
            .into_iter()
            .filter_map(|(i, xv)| ys.get(&i).map(|&yv| ScatterPoint::new(xv, yv)))
            .collect())
    }

    /// Equal-width histogram of a numeric column over its observed range.
    pub fn bins(&self, value_col: &str, bin_count: usize) -> Result<BinSeries> {
        let column = self.column(value_col)?;
        let values: Vec<f64> = self
            .parsed::<f64>(column)
            .map(|(_, v)| v)
            .filter(|v| v.is_finite())
            .collect();
        Ok(equal_width_bins(&values, bin_count.max(1)))
    }

    /// Radar values keyed by label, scaled to the largest value.
    ///
    /// Later records overwrite earlier ones with the same label.
    pub fn radar_values(&self, label_col: Option<&str>, value_col: Option<&str>) -> Result<RadarValues> {
        let label = self.column_or(label_col, DEFAULT_LABEL_INDEX)?;
        let value = self.column_or(value_col, DEFAULT_VALUE_INDEX)?;

        let pairs = self.parsed::<f64>(value).filter_map(|(i, v)| {
            self.records[i].get(label).map(|l| (l.clone(), v))
        });
        let mut values = RadarValues::new(pairs, 0.0);
        values.max = values.data.values().copied().fold(0.0, f64::max);
        Ok(values)
    }

    /// Integer values of one column, for funnels and pies.
    pub fn segment_values(&self, value_col: Option<&str>) -> Result<Vec<i64>> {
        let column = self.column_or(value_col, DEFAULT_VALUE_INDEX)?;
        Ok(self.parsed::<i64>(column).map(|(_, v)| v).collect())
    }

    /// Header and records as table cells.
    #[must_use]
    pub fn table_cells(&self) -> (Vec<Cell>, Vec<Vec<Cell>>) {
        let header = self.header.iter().map(|h| Cell::new(h.as_str())).collect();
        let rows = self
            .records
            .iter()
            .map(|r| r.iter().map(|c| Cell::new(c.as_str())).collect())
            .collect();
        (header, rows)
    }
}

/// Splits `[min, max]` of `values` into `bin_count` equal-width bins.
///
/// The top edge is inclusive. When every value is equal they all land in the
/// first bin.
fn equal_width_bins(values: &[f64], bin_count: usize) -> BinSeries {
    let mut bins = vec![0_u64; bin_count];
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if values.is_empty() {
        return BinSeries::new(bins, 0.0, 0.0);
    }

    let width = (max - min) / bin_count as f64;
    for &v in values {
        let index = if width > 0.0 {
            (((v - min) / width) as usize).min(bin_count - 1)
        } else {
            0
        };
        bins[index] += 1;
    }

    let labels = (0..bin_count)
        .map(|i| format!("{:.1}", min + width * i as f64))
        .collect();
    BinSeries::new(bins, min, max).labels(labels)
}

/// Latest snapshot, shared between the host and the feeds.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Arc<DataSnapshot>>,
}

impl SnapshotStore {
    /// Creates a store holding `snapshot`.
    #[must_use]
    pub fn new(snapshot: DataSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The current snapshot. Cheap: only the `Arc` is cloned.
    #[must_use]
    pub fn load(&self) -> Arc<DataSnapshot> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Publishes a new snapshot; feeds pick it up on their next tick.
    pub fn replace(&self, snapshot: DataSnapshot) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Arc::new(snapshot);
    }
}

/// How one widget is derived from a snapshot.
#[derive(Debug, Clone)]
pub enum Binding {
    /// Points from two numeric columns.
    Scatter {
        /// Target widget.
        target: Arc<ScatterPlot>,
        /// Horizontal column.
        x_col: String,
        /// Vertical column.
        y_col: String,
    },
    /// Equal-width bins of one numeric column.
    Histogram {
        /// Target widget.
        target: Arc<Histogram>,
        /// Value column.
        value_col: String,
        /// Bin count.
        bins: usize,
    },
    /// Label/value pairs.
    Radar {
        /// Target widget.
        target: Arc<Radar>,
        /// Label column; the first column when unset.
        label_col: Option<String>,
        /// Value column; the second column when unset.
        value_col: Option<String>,
    },
    /// One integer column as funnel segments.
    Funnel {
        /// Target widget.
        target: Arc<Funnel>,
        /// Value column; the second column when unset.
        value_col: Option<String>,
    },
    /// One integer column as pie slices.
    Pie {
        /// Target widget.
        target: Arc<PieChart>,
        /// Value column; the second column when unset.
        value_col: Option<String>,
        /// Slice palette.
        colors: Vec<Color>,
    },
    /// The whole snapshot as a table.
    Table {
        /// Target widget.
        target: Arc<Table>,
    },
}

/// Funnel segment `i` is drawn in palette entry `i + 1`, wrapping past 255.
fn funnel_colors(count: usize) -> Vec<Color> {
    (0..count.max(1))
        .map(|i| Color::Indexed((i % 255) as u8 + 1))
        .collect()
}

/// A widget bound to the snapshot it is recomputed from.
#[derive(Debug, Clone)]
pub struct Feed {
    name: String,
    interval: Duration,
    binding: Binding,
    source: Arc<SnapshotStore>,
}

impl Feed {
    /// Creates a feed that recomputes `binding` from `source` every `interval`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        interval: Duration,
        binding: Binding,
        source: Arc<SnapshotStore>,
    ) -> Self {
        Self {
            name: name.into(),
            interval,
            binding,
            source,
        }
    }

    /// Name used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recompute interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Derives the series from the latest snapshot and replaces the widget's
    /// data. On error the widget keeps what it had.
    pub fn recompute(&self) -> Result<()> {
        let snapshot = self.source.load();
        match &self.binding {
            Binding::Scatter { target, x_col, y_col } => {
                let points = snapshot.scatter_points(x_col, y_col)?;
                target.set_points(points, x_col.as_str(), y_col.as_str())
            }
            Binding::Histogram {
                target,
                value_col,
                bins,
            } => target.set_bins(snapshot.bins(value_col, *bins)?),
            Binding::Radar {
                target,
                label_col,
                value_col,
            } => target.set_values(
                snapshot.radar_values(label_col.as_deref(), value_col.as_deref())?,
            ),
            Binding::Funnel { target, value_col } => {
                let values = snapshot.segment_values(value_col.as_deref())?;
                target.set_values(&values, funnel_colors(values.len()))
            }
            Binding::Pie {
                target,
                value_col,
                colors,
            } => {
                let values = snapshot.segment_values(value_col.as_deref())?;
                target.set_values(&values, colors.clone())
            }
            Binding::Table { target } => {
                let (header, rows) = snapshot.table_cells();
                target.set_data(header, rows)
            }
        }
    }
}
