//! # Trueno-Dash
//!
//! Live terminal dashboards drawn at braille resolution.
//!
//! Every terminal cell is treated as a 2x4 grid of dots, so charts get four
//! times the vertical and twice the horizontal resolution of the cell grid.
//! Components are packed into rows by width weight, redrawn on a fixed
//! interval, and refreshed from the latest data snapshot by independent
//! background tasks.
//!
//! ## Layers
//!
//! - [`canvas`]: the dot grid and its copy into a `ratatui` buffer
//! - [`primitives`]: lines, ellipses, trapezoids and arc sweeps on the dot grid
//! - [`widgets`]: scatter, histogram, radar, funnel, pie and table components
//! - [`layout`]: greedy row packing into percentage regions
//! - [`dashboard`]: title row, panels and input routing
//! - [`feed`] and `scheduler`: periodic recompute from shared snapshots
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trueno_dash::prelude::*;
//!
//! let pie = Arc::new(PieChart::new());
//! pie.set_values(&[30, 50, 20], Theme::default().segment_colors())?;
//!
//! let mut dashboard = Dashboard::new("Sales");
//! dashboard.push(pie, Some("share".into()));
//!
//! terminal.draw(|frame| {
//!     for (index, err) in dashboard.render(frame.area(), frame.buffer_mut()) {
//!         eprintln!("component {index}: {err}");
//!     }
//! })?;
//! ```
//!
//! ## Feature Flags
//!
//! - `refresh` (default): tokio-based [`RefreshScheduler`](scheduler::RefreshScheduler)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Rendering Core
// ============================================================================

/// Braille dot canvas.
pub mod canvas;

/// Shapes rasterized onto the canvas.
pub mod primitives;

/// Visual components.
pub mod widgets;

/// Row packing of components into regions.
pub mod layout;

// ============================================================================
// Dashboard
// ============================================================================

/// Title row, panels and event routing.
pub mod dashboard;

/// Data snapshots and per-widget derivations.
pub mod feed;

/// Periodic refresh tasks.
#[cfg(feature = "refresh")]
#[cfg_attr(docsrs, doc(cfg(feature = "refresh")))]
pub mod scheduler;

// ============================================================================
// Configuration
// ============================================================================

/// YAML dashboard configuration.
pub mod config;

/// Colors.
pub mod theme;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for dashboard operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use trueno_dash::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::BrailleCanvas;
    pub use crate::config::{DashboardConfig, WidgetConfig};
    pub use crate::dashboard::{Control, Dashboard};
    pub use crate::error::{Error, Result};
    pub use crate::feed::{Binding, DataSnapshot, Feed, SnapshotStore};
    pub use crate::layout::{pack, ComponentKind, LayoutEntry, LayoutPlan};
    pub use crate::primitives::{ArcStep, Dot, Radii};
    #[cfg(feature = "refresh")]
    pub use crate::scheduler::RefreshScheduler;
    pub use crate::theme::Theme;
    pub use crate::widgets::{
        BinSeries, Cell, Component, Funnel, Histogram, Pagination, PieChart, Radar, RadarValues,
        ScatterPlot, ScatterPoint, SegmentSeries, Table, TableOptions,
    };
}
