//! Dynamic grid packing.
//!
//! Components are wrapped greedily into rows whose width weights never exceed
//! 100%, and the rows split the vertical space left under the header evenly.
//! Packing is pure: the plan is recomputed on every redraw and regions are
//! never retained by the components that receive them.

use std::fmt;
use std::str::FromStr;

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Total width budget of a row, in percent.
pub const ROW_BUDGET: u16 = 100;

/// Header share used when a dashboard carries a title row.
pub const DEFAULT_HEADER_PERCENT: u16 = 5;

/// The kind of a visual component, used for layout weights and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Scatter plot.
    Scatter,
    /// Histogram / bar chart.
    Histogram,
    /// Radar chart.
    Radar,
    /// Funnel chart.
    Funnel,
    /// Pie (ring) chart.
    Pie,
    /// Donut gauge provided by a host.
    Donut,
    /// Gauge provided by a host.
    Gauge,
    /// Paginated table.
    Table,
    /// Free text provided by a host.
    Text,
}

impl ComponentKind {
    /// Default width weight: compact round charts take 30%, everything else 50%.
    #[must_use]
    pub fn width_weight(self) -> u16 {
        match self {
            Self::Pie | Self::Donut | Self::Gauge | Self::Radar => 30,
            _ => 50,
        }
    }

    /// Lowercase name of the kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Scatter => "scatter",
            Self::Histogram => "histogram",
            Self::Radar => "radar",
            Self::Funnel => "funnel",
            Self::Pie => "pie",
            Self::Donut => "donut",
            Self::Gauge => "gauge",
            Self::Table => "table",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scatter" => Ok(Self::Scatter),
            "histogram" | "bar" => Ok(Self::Histogram),
            "radar" => Ok(Self::Radar),
            "funnel" => Ok(Self::Funnel),
            "pie" => Ok(Self::Pie),
            "donut" => Ok(Self::Donut),
            "gauge" => Ok(Self::Gauge),
            "table" => Ok(Self::Table),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown component kind '{other}'")),
        }
    }
}

/// One component to place: its kind and an optional explicit width weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    /// Component kind.
    pub kind: ComponentKind,
    /// Explicit width weight (0-100); falls back to the kind's default.
    pub weight: Option<u16>,
}

impl LayoutEntry {
    /// Entry using the kind's default weight.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self { kind, weight: None }
    }

    /// Entry with an explicit weight, clamped to 100.
    #[must_use]
    pub fn weighted(kind: ComponentKind, weight: u16) -> Self {
        Self {
            kind,
            weight: Some(weight.min(ROW_BUDGET)),
        }
    }

    /// The effective width weight.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.weight
            .map_or_else(|| self.kind.width_weight(), |w| w.min(ROW_BUDGET))
    }
}

/// A component placed in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedCell {
    /// Index of the component in the input order.
    pub index: usize,
    /// Column width share in percent.
    pub width_percent: u16,
}

/// A packed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRow {
    /// Row height share in percent.
    pub height_percent: u16,
    /// Cells in left-to-right order.
    pub cells: Vec<PackedCell>,
}

impl PackedRow {
    /// Sum of the cell widths.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.cells.iter().map(|c| c.width_percent).sum()
    }
}

/// The result of a packing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Height share reserved for the header row.
    pub header_percent: u16,
    /// Rows top to bottom.
    pub rows: Vec<PackedRow>,
}

/// Concrete cell rectangles for one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Regions {
    /// Header rectangle, when a header share is reserved.
    pub header: Option<Rect>,
    /// `(component index, region)` in input order.
    pub cells: Vec<(usize, Rect)>,
}

impl Regions {
    /// Region assigned to a component, if it was placed.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Rect> {
        self.cells
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, r)| *r)
    }
}

/// Packs components into rows.
///
/// A row accumulates components until adding the next would exceed 100%,
/// then a new row starts with that component. A single component never wraps
/// on its own. The rows then share `100 - header_percent` evenly.
#[must_use]
pub fn pack(entries: &[LayoutEntry], header_percent: u16) -> LayoutPlan {
    let header_percent = header_percent.min(ROW_BUDGET);
    let mut rows: Vec<Vec<PackedCell>> = Vec::new();
    let mut current: Vec<PackedCell> = Vec::new();
    let mut current_width = 0_u16;

    for (index, entry) in entries.iter().enumerate() {
        let width = entry.width();
        if current_width + width > ROW_BUDGET && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(PackedCell {
            index,
            width_percent: width,
        });
        current_width += width;
    }
    if !current.is_empty() {
        rows.push(current);
    }

    let height_percent = if rows.is_empty() {
        0
    } else {
        (ROW_BUDGET - header_percent) / rows.len() as u16
    };

    LayoutPlan {
        header_percent,
        rows: rows
            .into_iter()
            .map(|cells| PackedRow {
                height_percent,
                cells,
            })
            .collect(),
    }
}

impl LayoutPlan {
    /// Converts the plan into cell rectangles inside `area`.
    ///
    /// Percentages that do not add up to 100 leave the remainder empty at the
    /// bottom or right edge.
    #[must_use]
    pub fn regions(&self, area: Rect) -> Regions {
        let has_header = self.header_percent > 0;
        let mut constraints = Vec::with_capacity(self.rows.len() + 1);
        if has_header {
            constraints.push(Constraint::Percentage(self.header_percent));
        }
        constraints.extend(
            self.rows
                .iter()
                .map(|r| Constraint::Percentage(r.height_percent)),
        );

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .flex(Flex::Start)
            .constraints(constraints)
            .split(area);

        let offset = usize::from(has_header);
        let header = has_header.then(|| row_areas[0]);

        let cells = self
            .rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                let col_areas = Layout::default()
                    .direction(Direction::Horizontal)
                    .flex(Flex::Start)
                    .constraints(
                        row.cells
                            .iter()
                            .map(|c| Constraint::Percentage(c.width_percent)),
                    )
                    .split(row_areas[i + offset]);
                row.cells
                    .iter()
                    .zip(col_areas.iter())
                    .map(|(c, r)| (c.index, *r))
                    .collect::<Vec<_>>()
            })
            .collect();

        Regions { header, cells }
    }
}
