//! Visual components.
//!
//! Every chart owns its plotted data behind a single mutex. Updates replace
//! the whole state under the lock; [`Component::draw`] reads it under the same
//! lock, so a draw never observes a half-applied update.
//!
//! - [`ScatterPlot`]: points on L-shaped axes
//! - [`Histogram`]: vertical bars with an optional alert bin
//! - [`Radar`]: closed polygon over N radial axes
//! - [`Funnel`]: stacked tapering segments
//! - [`PieChart`]: ring slices
//! - [`Table`]: paginated grid with clickable prev/next controls

pub mod funnel;
pub mod histogram;
pub mod pie;
pub mod radar;
pub mod scatter;
pub mod segments;
pub mod table;

pub use funnel::Funnel;
pub use histogram::{BinSeries, Histogram};
pub use pie::PieChart;
pub use radar::{Radar, RadarValues};
pub use scatter::{ScatterPlot, ScatterPoint};
pub use segments::SegmentSeries;
pub use table::{Cell, Pagination, Table, TableOptions};

use std::sync::{Mutex, MutexGuard, PoisonError};

use crossterm::event::Event;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::error::{Error, Result};
use crate::layout::ComponentKind;

/// Smallest region, in cells, a braille chart will paint into.
pub const BRAILLE_MIN_SIZE: (u16, u16) = (5, 5);

/// The capability set a host needs to place, paint and feed input to a component.
///
/// Methods take `&self`: components guard their own state, so one instance can
/// be shared between the redraw pass and its refresh task.
pub trait Component: Send + Sync {
    /// What kind of component this is.
    fn kind(&self) -> ComponentKind;

    /// Paints the component into `area` of `buf`.
    ///
    /// Returns [`Error::RegionTooSmall`] when `area` cannot hold the component;
    /// the buffer is left untouched in that case.
    fn draw(&self, area: Rect, buf: &mut Buffer) -> Result<()>;

    /// Handles an input event. Most components decline all input.
    fn handle_input(&self, _event: &Event) -> Result<()> {
        Err(Error::InputUnsupported(self.kind()))
    }

    /// Whether the host should route mouse events to this component.
    fn wants_mouse(&self) -> bool {
        false
    }

    /// Minimum `(width, height)` in cells.
    fn minimum_size(&self) -> (u16, u16) {
        BRAILLE_MIN_SIZE
    }

    /// Preferred `(width, height)` ratio, for the host's own sizing.
    fn aspect_ratio(&self) -> (u16, u16);
}

/// Locks a component's state.
///
/// Updates validate before they assign, so a writer that panicked cannot have
/// left partial state behind and the poison flag is safe to ignore.
pub(crate) fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Rejects regions smaller than `min`.
pub(crate) fn ensure_fits(area: Rect, min: (u16, u16)) -> Result<()> {
    if area.width < min.0 || area.height < min.1 {
        return Err(Error::RegionTooSmall {
            width: area.width,
            height: area.height,
            min_width: min.0,
            min_height: min.1,
        });
    }
    Ok(())
}
