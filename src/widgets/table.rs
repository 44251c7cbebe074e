//! Paginated table with clickable previous/next controls.
//!
//! The table shows a fixed number of rows per page. When the rows span more
//! than one page the bottom line carries a `" < Prev"` control on the left, a
//! `"Next > "` control on the right and a page indicator between them. The
//! control rectangles are recomputed on every draw, and a left mouse press
//! inside one of them is the only way the current page changes.

use std::sync::Mutex;

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};

use crate::error::{Error, Result};
use crate::layout::ComponentKind;
use crate::widgets::{ensure_fits, lock, Component};

const PREV_LABEL: &str = " < Prev";
const NEXT_LABEL: &str = "Next > ";

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell(pub String);

impl Cell {
    /// Creates a cell holding `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The cell text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Table display options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    rows_per_page: usize,
    min_col_width: u16,
    cell_fill: Color,
    cell_text: Color,
    header_fill: Color,
    header_text: Color,
    indicator_bg: Color,
    indicator_fg: Color,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            rows_per_page: 5,
            min_col_width: 10,
            cell_fill: Color::Reset,
            cell_text: Color::Reset,
            header_fill: Color::Black,
            header_text: Color::White,
            indicator_bg: Color::Black,
            indicator_fg: Color::White,
        }
    }
}

impl TableOptions {
    /// Rows shown per page. Zero is ignored.
    #[must_use]
    pub fn rows_per_page(mut self, count: usize) -> Self {
        if count > 0 {
            self.rows_per_page = count;
        }
        self
    }

    /// Narrowest column the table asks for, in cells.
    #[must_use]
    pub fn min_col_width(mut self, width: u16) -> Self {
        self.min_col_width = width;
        self
    }

    /// Background and text color of data rows.
    #[must_use]
    pub fn cell_colors(mut self, fill: Color, text: Color) -> Self {
        self.cell_fill = fill;
        self.cell_text = text;
        self
    }

    /// Background and text color of the header row.
    #[must_use]
    pub fn header_colors(mut self, fill: Color, text: Color) -> Self {
        self.header_fill = fill;
        self.header_text = text;
        self
    }

    /// Background and text color of the page indicator.
    #[must_use]
    pub fn indicator_colors(mut self, bg: Color, fg: Color) -> Self {
        self.indicator_bg = bg;
        self.indicator_fg = fg;
        self
    }

    /// Configured rows per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.rows_per_page
    }
}

/// Page position of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page shown.
    pub current_page: usize,
    /// Rows per page, always at least 1.
    pub rows_per_page: usize,
    /// Number of pages; zero when there are no rows.
    pub page_count: usize,
}

impl Pagination {
    /// Pagination on the first page of `row_count` rows.
    #[must_use]
    pub fn new(row_count: usize, rows_per_page: usize) -> Self {
        let rows_per_page = rows_per_page.max(1);
        Self {
            current_page: 0,
            rows_per_page,
            page_count: row_count.div_ceil(rows_per_page),
        }
    }

    /// Advances one page; no-op on the last page.
    pub fn next(&mut self) {
        if self.current_page + 1 < self.page_count {
            self.current_page += 1;
        }
    }

    /// Goes back one page; no-op on the first page.
    pub fn prev(&mut self) {
        self.current_page = self.current_page.saturating_sub(1);
    }

    /// Recomputes the page count for `row_count` rows and pulls the current
    /// page back onto the last page if it fell off the end.
    pub fn resize(&mut self, row_count: usize) {
        self.page_count = row_count.div_ceil(self.rows_per_page);
        if self.current_page >= self.page_count {
            self.current_page = self.page_count.saturating_sub(1);
        }
    }

    /// Row index range of the current page.
    #[must_use]
    pub fn range(&self, row_count: usize) -> std::ops::Range<usize> {
        let start = (self.current_page * self.rows_per_page).min(row_count);
        let end = (start + self.rows_per_page).min(row_count);
        start..end
    }
}

#[derive(Debug)]
struct TableState {
    headers: Vec<Cell>,
    rows: Vec<Vec<Cell>>,
    pagination: Pagination,
    prev_rect: Option<Rect>,
    next_rect: Option<Rect>,
}

impl TableState {
    fn column_count(&self) -> usize {
        column_count(&self.headers, &self.rows)
    }

    fn minimum_size(&self, options: &TableOptions) -> (u16, u16) {
        let cols = u16::try_from(self.column_count()).unwrap_or(u16::MAX);
        let mut height = u16::try_from(self.pagination.rows_per_page).unwrap_or(u16::MAX);
        if !self.headers.is_empty() {
            height = height.saturating_add(1);
        }
        if self.pagination.page_count > 1 {
            height = height.saturating_add(1);
        }
        (cols.saturating_mul(options.min_col_width), height)
    }
}

fn column_count(headers: &[Cell], rows: &[Vec<Cell>]) -> usize {
    if headers.is_empty() {
        rows.first().map_or(0, Vec::len)
    } else {
        headers.len()
    }
}

/// Checks that every row has as many columns as the header, or as the first
/// row when there is no header.
fn validate_columns(headers: &[Cell], rows: &[Vec<Cell>]) -> Result<()> {
    let expected = column_count(headers, rows);
    match rows.iter().position(|r| r.len() != expected) {
        Some(row) => Err(Error::ColumnCountMismatch {
            expected,
            got: rows[row].len(),
            row,
        }),
        None => Ok(()),
    }
}

/// Paginated table.
#[derive(Debug)]
pub struct Table {
    state: Mutex<TableState>,
    options: TableOptions,
}

impl Table {
    /// Creates a table, rejecting rows whose column count differs.
    pub fn new(headers: Vec<Cell>, rows: Vec<Vec<Cell>>, options: TableOptions) -> Result<Self> {
        validate_columns(&headers, &rows)?;
        let pagination = Pagination::new(rows.len(), options.rows_per_page);
        Ok(Self {
            state: Mutex::new(TableState {
                headers,
                rows,
                pagination,
                prev_rect: None,
                next_rect: None,
            }),
            options,
        })
    }

    /// Replaces headers and rows. The current page is kept when it still exists.
    pub fn set_data(&self, headers: Vec<Cell>, rows: Vec<Vec<Cell>>) -> Result<()> {
        validate_columns(&headers, &rows)?;
        let mut state = lock(&self.state);
        state.pagination.resize(rows.len());
        state.headers = headers;
        state.rows = rows;
        Ok(())
    }

    /// Current page position.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        lock(&self.state).pagination
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        lock(&self.state).rows.len()
    }

    /// Display options.
    #[must_use]
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    fn draw_row(&self, buf: &mut Buffer, area: Rect, y: u16, cells: &[Cell], col_width: u16, header: bool) {
        let (fill, text_color) = if header {
            (self.options.header_fill, self.options.header_text)
        } else {
            (self.options.cell_fill, self.options.cell_text)
        };

        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(" ").set_bg(fill);
            }
        }

        let style = Style::default().fg(text_color).bg(fill);
        let text_width = usize::from(col_width.saturating_sub(2));
        for (i, cell) in cells.iter().enumerate() {
            let x = area.x + i as u16 * col_width + 1;
            if header {
                buf.set_stringn(x, y, cell.text().to_uppercase(), text_width, style);
            } else {
                buf.set_stringn(x, y, cell.text(), text_width, style);
            }
        }
    }
}

impl Component for Table {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Table
    }

    fn draw(&self, area: Rect, buf: &mut Buffer) -> Result<()> {
        let mut state = lock(&self.state);
        // Controls only exist once this draw paints them.
        state.prev_rect = None;
        state.next_rect = None;

        let cols = state.column_count();
        if cols == 0 {
            return Err(Error::NoColumns);
        }
        ensure_fits(area, state.minimum_size(&self.options))?;

        let col_width = u16::try_from(cols).map_or(0, |c| area.width / c);
        if col_width == 0 {
            return Err(Error::RegionTooSmall {
                width: area.width,
                height: area.height,
                min_width: u16::try_from(cols).unwrap_or(u16::MAX),
                min_height: area.height,
            });
        }

        let row_count = state.rows.len();
        state.pagination.resize(row_count);
        let paged = state.pagination.page_count > 1;
        let last_body_row = if paged { area.bottom() - 1 } else { area.bottom() };

        let mut y = area.y;
        if !state.headers.is_empty() {
            self.draw_row(buf, area, y, &state.headers, col_width, true);
            y += 1;
        }
        for row in &state.rows[state.pagination.range(row_count)] {
            if y >= last_body_row {
                break;
            }
            self.draw_row(buf, area, y, row, col_width, false);
            y += 1;
        }

        if !paged {
            return Ok(());
        }

        let bar_y = area.bottom() - 1;
        let button = Style::default().bg(Color::Blue).fg(Color::White);
        let prev = Rect::new(area.x, bar_y, PREV_LABEL.len() as u16, 1).intersection(area);
        let next_width = (NEXT_LABEL.len() as u16).min(area.width);
        let next = Rect::new(area.right() - next_width, bar_y, next_width, 1);
        buf.set_stringn(prev.x, bar_y, PREV_LABEL, usize::from(prev.width), button);
        buf.set_stringn(next.x, bar_y, NEXT_LABEL, usize::from(next.width), button);

        let indicator = format!(
            "Page {} of {}",
            state.pagination.current_page + 1,
            state.pagination.page_count
        );
        let mid = (prev.right() + next.left()) / 2;
        if mid < next.left() {
            buf.set_stringn(
                mid,
                bar_y,
                indicator,
                usize::from(next.left() - mid),
                Style::default()
                    .bg(self.options.indicator_bg)
                    .fg(self.options.indicator_fg),
            );
        }

        state.prev_rect = Some(prev);
        state.next_rect = Some(next);
        Ok(())
    }

    /// Left mouse presses on the prev/next controls turn the page. Every
    /// other event is accepted and ignored.
    fn handle_input(&self, event: &Event) -> Result<()> {
        let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = event
        else {
            return Ok(());
        };

        let position = Position::new(*column, *row);
        let mut state = lock(&self.state);
        if state.prev_rect.is_some_and(|r| r.contains(position)) {
            state.pagination.prev();
        } else if state.next_rect.is_some_and(|r| r.contains(position)) {
            state.pagination.next();
        }
        Ok(())
    }

    fn wants_mouse(&self) -> bool {
        true
    }

    fn minimum_size(&self) -> (u16, u16) {
        lock(&self.state).minimum_size(&self.options)
    }

    fn aspect_ratio(&self) -> (u16, u16) {
        (1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn cells(texts: &[&str]) -> Vec<Cell> {
        texts.iter().map(|t| Cell::from(*t)).collect()
    }

    fn numbered_rows(n: usize) -> Vec<Vec<Cell>> {
        (0..n)
            .map(|i| vec![Cell::new(format!("r{i}")), Cell::new(format!("{}", i * 10))])
            .collect()
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let rows = vec![cells(&["a", "b"]), cells(&["c"])];
        let err = Table::new(cells(&["x", "y"]), rows, TableOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::ColumnCountMismatch {
                expected: 2,
                got: 1,
                row: 1
            }
        ));
    }

    #[test]
    fn test_headerless_rows_use_first_row_width() {
        let rows = vec![cells(&["a", "b", "c"]), cells(&["d", "e"])];
        assert!(Table::new(Vec::new(), rows, TableOptions::default()).is_err());
        assert!(Table::new(Vec::new(), numbered_rows(3), TableOptions::default()).is_ok());
    }

    #[test]
    fn test_pagination_page_count() {
        let table = Table::new(cells(&["n", "v"]), numbered_rows(12), TableOptions::default()).unwrap();
        let p = table.pagination();
        assert_eq!(p.page_count, 3);
        assert_eq!(p.current_page, 0);
        assert_eq!(p.range(12), 0..5);

        assert_eq!(Pagination::new(0, 5).page_count, 0);
        assert_eq!(Pagination::new(5, 5).page_count, 1);
        assert_eq!(Pagination::new(3, 0).rows_per_page, 1);
    }

    #[test]
    fn test_pagination_next_prev_bounds() {
        let mut p = Pagination::new(12, 5);
        p.prev();
        assert_eq!(p.current_page, 0);
        p.next();
        p.next();
        p.next();
        assert_eq!(p.current_page, 2);
        assert_eq!(p.range(12), 10..12);
    }

    #[test]
    fn test_zero_rows_per_page_ignored() {
        assert_eq!(TableOptions::default().rows_per_page(0).page_size(), 5);
        assert_eq!(TableOptions::default().rows_per_page(3).page_size(), 3);
    }

    #[test]
    fn test_minimum_size() {
        let table = Table::new(cells(&["n", "v"]), numbered_rows(12), TableOptions::default()).unwrap();
        // 2 columns * 10, 5 rows + header + pagination bar.
        assert_eq!(table.minimum_size(), (20, 7));

        let single = Table::new(Vec::new(), numbered_rows(2), TableOptions::default()).unwrap();
        assert_eq!(single.minimum_size(), (20, 5));
    }

    #[test]
    fn test_draw_header_and_first_page() {
        let table = Table::new(cells(&["name", "value"]), numbered_rows(12), TableOptions::default()).unwrap();
        let area = Rect::new(0, 0, 40, 7);
        let mut buf = Buffer::empty(area);
        table.draw(area, &mut buf).unwrap();

        let header = row_text(&buf, 0);
        assert!(header.contains("NAME"));
        assert!(header.contains("VALUE"));
        assert_eq!(buf[(1, 0)].bg, Color::Black);
        assert!(row_text(&buf, 1).contains("r0"));
        assert!(row_text(&buf, 5).contains("r4"));

        let bar = row_text(&buf, 6);
        assert!(bar.starts_with(" < Prev"));
        assert!(bar.ends_with("Next > "));
        assert!(bar.contains("Page 1 of 3"));
    }

    #[test]
    fn test_click_next_and_prev() {
        let table = Table::new(cells(&["n", "v"]), numbered_rows(12), TableOptions::default()).unwrap();
        let area = Rect::new(0, 0, 40, 7);
        let mut buf = Buffer::empty(area);
        table.draw(area, &mut buf).unwrap();

        table.handle_input(&click(38, 6)).unwrap();
        assert_eq!(table.pagination().current_page, 1);
        table.handle_input(&click(38, 6)).unwrap();
        table.handle_input(&click(38, 6)).unwrap();
        assert_eq!(table.pagination().current_page, 2);

        table.handle_input(&click(2, 6)).unwrap();
        assert_eq!(table.pagination().current_page, 1);

        let mut buf = Buffer::empty(area);
        table.draw(area, &mut buf).unwrap();
        assert!(row_text(&buf, 1).contains("r5"));
        assert!(row_text(&buf, 6).contains("Page 2 of 3"));
    }

    #[test]
    fn test_clicks_elsewhere_are_noops() {
        let table = Table::new(cells(&["n", "v"]), numbered_rows(12), TableOptions::default()).unwrap();

        // Before any draw there are no controls to hit.
        table.handle_input(&click(38, 6)).unwrap();
        assert_eq!(table.pagination().current_page, 0);

        let area = Rect::new(0, 0, 40, 7);
        let mut buf = Buffer::empty(area);
        table.draw(area, &mut buf).unwrap();
        table.handle_input(&click(20, 2)).unwrap();
        table
            .handle_input(&Event::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)))
            .unwrap();
        let release = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 38,
            row: 6,
            modifiers: KeyModifiers::NONE,
        });
        table.handle_input(&release).unwrap();
        assert_eq!(table.pagination().current_page, 0);
    }

    #[test]
    fn test_controls_follow_region() {
        let table = Table::new(cells(&["n", "v"]), numbered_rows(12), TableOptions::default()).unwrap();
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 20));
        table.draw(Rect::new(40, 10, 40, 7), &mut buf).unwrap();

        table.handle_input(&click(78, 16)).unwrap();
        assert_eq!(table.pagination().current_page, 1);
    }

    #[test]
    fn test_shrinking_data_clamps_page() {
        let table = Table::new(cells(&["n", "v"]), numbered_rows(12), TableOptions::default()).unwrap();
        let area = Rect::new(0, 0, 40, 7);
        let mut buf = Buffer::empty(area);
        table.draw(area, &mut buf).unwrap();
        table.handle_input(&click(38, 6)).unwrap();
        table.handle_input(&click(38, 6)).unwrap();
        assert_eq!(table.pagination().current_page, 2);

        table.set_data(cells(&["n", "v"]), numbered_rows(7)).unwrap();
        assert_eq!(table.pagination().current_page, 1);

        table.set_data(cells(&["n", "v"]), numbered_rows(3)).unwrap();
        let mut buf = Buffer::empty(area);
        table.draw(area, &mut buf).unwrap();
        assert_eq!(table.pagination().current_page, 0);
        // Single page: no pagination bar, clicks on its old spot do nothing.
        assert!(!row_text(&buf, 6).contains("Next"));
        table.handle_input(&click(38, 6)).unwrap();
        assert_eq!(table.pagination().current_page, 0);
    }

    #[test]
    fn test_set_data_rejects_ragged_and_keeps_rows() {
        let table = Table::new(cells(&["n", "v"]), numbered_rows(4), TableOptions::default()).unwrap();
        let bad = vec![cells(&["only"])];
        assert!(table.set_data(cells(&["n", "v"]), bad).is_err());
        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn test_no_columns() {
        let table = Table::new(Vec::new(), Vec::new(), TableOptions::default()).unwrap();
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        assert!(matches!(table.draw(area, &mut buf), Err(Error::NoColumns)));
    }

    #[test]
    fn test_region_too_small() {
        let table = Table::new(cells(&["a", "b", "c"]), numbered_rows(0), TableOptions::default())
            .unwrap();
        let area = Rect::new(0, 0, 29, 10);
        let mut buf = Buffer::empty(area);
        assert!(matches!(
            table.draw(area, &mut buf),
            Err(Error::RegionTooSmall { min_width: 30, .. })
        ));
    }

    #[test]
    fn test_failed_draw_drops_controls() {
        let table = Table::new(cells(&["n", "v"]), numbered_rows(12), TableOptions::default()).unwrap();
        let area = Rect::new(0, 0, 40, 7);
        let mut buf = Buffer::empty(area);
        table.draw(area, &mut buf).unwrap();

        let small = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(small);
        assert!(matches!(
            table.draw(small, &mut buf),
            Err(Error::RegionTooSmall { .. })
        ));

        table.handle_input(&click(38, 6)).unwrap();
        assert_eq!(table.pagination().current_page, 0);
    }

    #[test]
    fn test_more_columns_than_u16_is_too_small() {
        let headers: Vec<Cell> = (0..=usize::from(u16::MAX)).map(|i| Cell::new(i.to_string())).collect();
        let table = Table::new(headers, Vec::new(), TableOptions::default().min_col_width(0)).unwrap();
        let area = Rect::new(0, 0, 100, 10);
        let mut buf = Buffer::empty(area);
        assert!(matches!(
            table.draw(area, &mut buf),
            Err(Error::RegionTooSmall {
                min_width: u16::MAX,
                ..
            })
        ));
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_wants_mouse() {
        let table = Table::new(Vec::new(), Vec::new(), TableOptions::default()).unwrap();
        assert!(table.wants_mouse());
        assert_eq!(table.kind(), ComponentKind::Table);
    }
}
