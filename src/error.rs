//! Error types for dashboard operations.
//!
//! Errors fall into three groups:
//!
//! - **Construction errors** reject an update synchronously and leave the
//!   component's previous state untouched.
//! - **Draw-time errors** report that a region is too small to paint anything
//!   meaningful. They are recoverable: the next layout pass may hand out a
//!   larger region.
//! - **Configuration and I/O errors** come from the ambient layers around the
//!   rendering core.
//!
//! Per-record parse failures during a periodic recompute never surface here;
//! they are skipped and logged.

use std::io;
use thiserror::Error;

use crate::layout::ComponentKind;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dashboard operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A table row has a different column count than the header (or the first row).
    #[error("row {row} has {got} columns, expected {expected}")]
    ColumnCountMismatch {
        /// Expected column count.
        expected: usize,
        /// Column count of the offending row.
        got: usize,
        /// Index of the offending row.
        row: usize,
    },

    /// A segment series was given no values.
    #[error("values cannot be empty")]
    EmptyValues,

    /// A segment series was given no colors.
    #[error("colors cannot be empty")]
    EmptyColors,

    /// A segment value is negative.
    #[error("all values must be non-negative, got {value} at index {index}")]
    NegativeValue {
        /// Position of the offending value.
        index: usize,
        /// Offending value.
        value: i64,
    },

    /// A radar chart needs at least three axes.
    #[error("a radar chart requires at least 3 categories, got {0}")]
    TooFewCategories(usize),

    /// The radar maximum must be strictly positive.
    #[error("maximum value must be greater than zero, got {0}")]
    NonPositiveMax(f64),

    /// A radar value lies outside `[0, max]`.
    #[error("value {value} for '{label}' is outside the valid range [0, {max}]")]
    ValueOutOfRange {
        /// Category label.
        label: String,
        /// Offending value.
        value: f64,
        /// Upper bound.
        max: f64,
    },

    /// Arc sampling step is not a usable angle increment.
    #[error("arc step {0} must be finite and within (0, pi/2]")]
    InvalidArcStep(f64),

    /// The assigned region cannot hold the component.
    #[error("region {width}x{height} is smaller than the minimum {min_width}x{min_height}")]
    RegionTooSmall {
        /// Region width in cells.
        width: u16,
        /// Region height in cells.
        height: u16,
        /// Minimum width in cells.
        min_width: u16,
        /// Minimum height in cells.
        min_height: u16,
    },

    /// A table has neither headers nor rows to derive columns from.
    #[error("cannot draw a table without headers or rows")]
    NoColumns,

    /// The component does not accept input events.
    #[error("the {0} component doesn't support input events")]
    InputUnsupported(ComponentKind),

    /// A column referenced by a feed is missing from the snapshot header.
    #[error("column '{0}' not found in data snapshot")]
    ColumnNotFound(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },

    /// Terminal I/O error surfaced by the host.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl Error {
    /// Returns true for errors the host can recover from on the next layout pass.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::RegionTooSmall { .. } | Self::NoColumns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_mismatch_includes_counts() {
        let err = Error::ColumnCountMismatch {
            expected: 3,
            got: 2,
            row: 7,
        };
        let display = err.to_string();

        assert!(display.contains('3'), "Error should include expected: {display}");
        assert!(display.contains('2'), "Error should include got: {display}");
        assert!(display.contains('7'), "Error should include row: {display}");
    }

    #[test]
    fn test_value_out_of_range_includes_label() {
        let err = Error::ValueOutOfRange {
            label: "speed".to_string(),
            value: 12.0,
            max: 10.0,
        };
        let display = err.to_string();

        assert!(display.contains("speed"));
        assert!(display.contains("12"));
    }

    #[test]
    fn test_config_parse_error_includes_line_number() {
        let err = Error::ConfigParse {
            line: 42,
            message: "invalid value".to_string(),
        };
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_input_unsupported_names_component() {
        let err = Error::InputUnsupported(ComponentKind::Funnel);
        assert!(err.to_string().contains("funnel"));
    }

    #[test]
    fn test_recoverable_classification() {
        let small = Error::RegionTooSmall {
            width: 2,
            height: 2,
            min_width: 5,
            min_height: 5,
        };
        assert!(small.is_recoverable());
        assert!(!Error::EmptyValues.is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Terminal(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
