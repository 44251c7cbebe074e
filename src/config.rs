//! Dashboard configuration.
//!
//! A dashboard is described by a single YAML document: global timing and
//! layout settings, an inline theme, and the list of widgets with the data
//! columns each one is derived from.
//!
//! ```yaml
//! title: Sales
//! refresh_ms: 2000
//! widgets:
//!   - kind: histogram
//!     value_col: amount
//!     bins: 12
//!   - kind: pie
//!     value_col: units
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{DEFAULT_HEADER_PERCENT, ROW_BUDGET};
use crate::primitives::ArcStep;
use crate::theme::Theme;

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 10;

/// One widget entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Widget kind (`scatter`, `histogram`, `radar`, `funnel`, `pie`, `table`).
    pub kind: String,

    /// Optional caption.
    #[serde(default)]
    pub title: Option<String>,

    /// Numeric column feeding histograms, radars, funnels and pies.
    #[serde(default)]
    pub value_col: Option<String>,

    /// Category column for radars.
    #[serde(default)]
    pub label_col: Option<String>,

    /// Horizontal column of a scatter plot.
    #[serde(default)]
    pub x_col: Option<String>,

    /// Vertical column of a scatter plot.
    #[serde(default)]
    pub y_col: Option<String>,

    /// Histogram bin count.
    #[serde(default)]
    pub bins: Option<usize>,

    /// Explicit layout width weight (0-100).
    #[serde(default)]
    pub weight: Option<u16>,

    /// Recompute interval override in milliseconds.
    #[serde(default)]
    pub refresh_ms: Option<u64>,
}

impl WidgetConfig {
    /// A widget of `kind` with every other field unset.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            title: None,
            value_col: None,
            label_col: None,
            x_col: None,
            y_col: None,
            bins: None,
            weight: None,
            refresh_ms: None,
        }
    }

    /// Bin count, falling back to [`DEFAULT_BINS`].
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.bins.unwrap_or(DEFAULT_BINS)
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Title shown in the header row.
    #[serde(default)]
    pub title: String,

    /// Per-widget recompute interval in milliseconds.
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,

    /// Host redraw interval in milliseconds.
    #[serde(default = "default_redraw_ms")]
    pub redraw_ms: u64,

    /// Share of the height reserved for the header row, in percent.
    #[serde(default = "default_header_percent")]
    pub header_percent: u16,

    /// Table rows per page.
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,

    /// Pie arc sampling step in radians.
    #[serde(default = "default_arc_step")]
    pub arc_step: f64,

    /// Refine the arc step per draw so pie rings have no gaps.
    #[serde(default)]
    pub arc_gap_free: bool,

    /// Inline theme.
    #[serde(default)]
    pub theme: Theme,

    /// Widgets in layout order.
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

fn default_refresh_ms() -> u64 {
    1000
}
fn default_redraw_ms() -> u64 {
    250
}
fn default_header_percent() -> u16 {
    DEFAULT_HEADER_PERCENT
}
fn default_rows_per_page() -> usize {
    5
}
fn default_arc_step() -> f64 {
    ArcStep::DEFAULT.radians()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            refresh_ms: default_refresh_ms(),
            redraw_ms: default_redraw_ms(),
            header_percent: default_header_percent(),
            rows_per_page: default_rows_per_page(),
            arc_step: default_arc_step(),
            arc_gap_free: false,
            theme: Theme::default(),
            widgets: Vec::new(),
        }
    }
}

fn invalid(key: impl Into<String>, message: impl Into<String>) -> Error {
    Error::ConfigInvalid {
        key: key.into(),
        message: message.into(),
    }
}

impl DashboardConfig {
    /// Creates a configuration with default values and no widgets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses and validates a YAML string.
    ///
    /// Syntax errors carry the offending line number.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Conventional location: `<config dir>/trueno-dash/dashboard.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trueno-dash").join("dashboard.yaml"))
    }

    /// Rejects values the dashboard cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_ms == 0 {
            return Err(invalid("refresh_ms", "must be greater than zero"));
        }
        if self.redraw_ms == 0 {
            return Err(invalid("redraw_ms", "must be greater than zero"));
        }
        if self.header_percent > ROW_BUDGET {
            return Err(invalid("header_percent", "must be at most 100"));
        }
        ArcStep::new(self.arc_step).map_err(|e| invalid("arc_step", e.to_string()))?;

        for (i, widget) in self.widgets.iter().enumerate() {
            if widget.bins == Some(0) {
                return Err(invalid(format!("widgets[{i}].bins"), "must be greater than zero"));
            }
            if widget.refresh_ms == Some(0) {
                return Err(invalid(
                    format!("widgets[{i}].refresh_ms"),
                    "must be greater than zero",
                ));
            }
        }
        Ok(())
    }

    /// Recompute interval for widgets without an override.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    /// Recompute interval for one widget.
    #[must_use]
    pub fn widget_interval(&self, widget: &WidgetConfig) -> Duration {
        Duration::from_millis(widget.refresh_ms.unwrap_or(self.refresh_ms))
    }

    /// Host redraw interval.
    #[must_use]
    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_ms)
    }

    /// The validated arc step, or the default if the value was never validated.
    #[must_use]
    pub fn arc_step(&self) -> ArcStep {
        ArcStep::new(self.arc_step).unwrap_or_default()
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = DashboardConfig::new();
        assert_eq!(config.refresh_ms, 1000);
        assert_eq!(config.redraw_ms, 250);
        assert_eq!(config.header_percent, 5);
        assert_eq!(config.rows_per_page, 5);
        assert_eq!(config.arc_step(), ArcStep::DEFAULT);
        assert!(config.widgets.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_minimal() {
        let config = DashboardConfig::parse("title: Ops").unwrap();
        assert_eq!(config.title, "Ops");
        assert_eq!(config.refresh_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r##"
title: Sales
refresh_ms: 2000
redraw_ms: 100
header_percent: 10
rows_per_page: 8
arc_step: 0.02
arc_gap_free: true
theme:
  bar: "#00ff00"
widgets:
  - kind: scatter
    x_col: price
    y_col: units
  - kind: histogram
    value_col: amount
    bins: 12
    weight: 60
  - kind: radar
    label_col: region
    value_col: amount
    refresh_ms: 500
"##;
        let config = DashboardConfig::parse(yaml).unwrap();
        assert_eq!(config.title, "Sales");
        assert_eq!(config.redraw_interval(), Duration::from_millis(100));
        assert_eq!(config.header_percent, 10);
        assert_eq!(config.rows_per_page, 8);
        assert!(config.arc_gap_free);
        assert_eq!(config.theme.bar, "#00ff00");
        assert_eq!(config.theme.alert, "1");
        assert_eq!(config.widgets.len(), 3);
        assert_eq!(config.widgets[0].x_col.as_deref(), Some("price"));
        assert_eq!(config.widgets[1].bin_count(), 12);
        assert_eq!(config.widgets[1].weight, Some(60));
        assert_eq!(config.widgets[0].bin_count(), DEFAULT_BINS);
        assert_eq!(
            config.widget_interval(&config.widgets[2]),
            Duration::from_millis(500)
        );
        assert_eq!(
            config.widget_interval(&config.widgets[0]),
            Duration::from_millis(2000)
        );
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = "title: ok\nrefresh_ms: [not a number\n";
        let err = DashboardConfig::parse(yaml).unwrap_err();
        match err {
            Error::ConfigParse { line, .. } => assert!(line >= 2, "line was {line}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_intervals() {
        for yaml in ["refresh_ms: 0", "redraw_ms: 0"] {
            assert!(matches!(
                DashboardConfig::parse(yaml),
                Err(Error::ConfigInvalid { .. })
            ));
        }
        let yaml = "widgets:\n  - kind: pie\n    refresh_ms: 0\n";
        let err = DashboardConfig::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { ref key, .. } if key == "widgets[0].refresh_ms"));
    }

    #[test]
    fn test_validate_rejects_bad_arc_step() {
        for step in ["0", "-0.1", "2.0"] {
            let err = DashboardConfig::parse(&format!("arc_step: {step}")).unwrap_err();
            assert!(matches!(err, Error::ConfigInvalid { ref key, .. } if key == "arc_step"));
        }
    }

    #[test]
    fn test_validate_rejects_zero_bins() {
        let yaml = "widgets:\n  - kind: histogram\n    bins: 0\n";
        assert!(DashboardConfig::parse(yaml).is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title: From disk\nwidgets:\n  - kind: table").unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "From disk");
        assert_eq!(config.widgets[0].kind, "table");
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = DashboardConfig::load("/nonexistent/dashboard.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
        let config = DashboardConfig::load_or_default("/nonexistent/dashboard.yaml");
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_default_path_layout() {
        if let Some(path) = DashboardConfig::default_path() {
            assert!(path.ends_with("trueno-dash/dashboard.yaml"));
        }
    }
}
