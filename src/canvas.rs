//! Braille sub-cell canvas.
//!
//! Every terminal cell is split into a 2×4 grid of addressable dots, rendered
//! as a single Unicode braille pattern (U+2800-28FF):
//!
//! ```text
//!  col 0  col 1
//!   0x01   0x08   row 0
//!   0x02   0x10   row 1
//!   0x04   0x20   row 2
//!   0x40   0x80   row 3
//! ```
//!
//! The canvas is transient: it is built over the region a component was
//! assigned for one draw, accumulates dots, and is discarded after
//! [`BrailleCanvas::copy_to`].

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Horizontal dots per terminal cell.
pub const COL_MULT: i32 = 2;

/// Vertical dots per terminal cell.
pub const ROW_MULT: i32 = 4;

/// Codepoint of the empty braille pattern.
const BRAILLE_BASE: u32 = 0x2800;

/// Bit for each dot position, indexed as `[row][col]`.
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Accumulated state of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DotCell {
    mask: u8,
    color: Color,
}

/// A virtual dot grid over a rectangular region of terminal cells.
///
/// Dot coordinates are local to the region: `(0, 0)` is the top-left dot of
/// the region's top-left cell. Dots outside the region are clipped.
#[derive(Debug, Clone)]
pub struct BrailleCanvas {
    area: Rect,
    cells: Vec<Option<DotCell>>,
}

impl BrailleCanvas {
    /// Creates an empty canvas covering `area`.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            cells: vec![None; area.area() as usize],
        }
    }

    /// Returns the region this canvas covers, in cell coordinates.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Width in dots.
    #[must_use]
    pub fn dot_width(&self) -> i32 {
        i32::from(self.area.width) * COL_MULT
    }

    /// Height in dots.
    #[must_use]
    pub fn dot_height(&self) -> i32 {
        i32::from(self.area.height) * ROW_MULT
    }

    /// Marks one dot and sets the owning cell's color.
    ///
    /// The cell mask is OR-ed, so dots accumulate. The color is overwritten:
    /// the last writer of a cell decides its color, earlier colors are lost.
    pub fn set_dot(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.dot_width() || y >= self.dot_height() {
            return;
        }

        let col = x / COL_MULT;
        let row = y / ROW_MULT;
        let bit = DOT_BITS[(y % ROW_MULT) as usize][(x % COL_MULT) as usize];
        let idx = (row * i32::from(self.area.width) + col) as usize;

        let cell = self.cells[idx].get_or_insert(DotCell { mask: 0, color });
        cell.mask |= bit;
        cell.color = color;
    }

    /// Returns whether the dot at `(x, y)` is set. Out-of-range dots are unset.
    #[must_use]
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.dot_width() || y >= self.dot_height() {
            return false;
        }
        let idx = ((y / ROW_MULT) * i32::from(self.area.width) + x / COL_MULT) as usize;
        let bit = DOT_BITS[(y % ROW_MULT) as usize][(x % COL_MULT) as usize];
        self.cells[idx].is_some_and(|c| c.mask & bit != 0)
    }

    /// Returns the glyph and color of a touched cell (region-local coordinates).
    #[must_use]
    pub fn cell(&self, col: u16, row: u16) -> Option<(char, Color)> {
        if col >= self.area.width || row >= self.area.height {
            return None;
        }
        let idx = usize::from(row) * usize::from(self.area.width) + usize::from(col);
        self.cells[idx].map(|c| (glyph(c.mask), c.color))
    }

    /// Number of cells touched by at least one dot.
    #[must_use]
    pub fn touched_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Writes every touched cell into `buf` as a braille glyph plus its color.
    ///
    /// Untouched cells keep whatever the buffer already holds.
    pub fn copy_to(&self, buf: &mut Buffer) {
        let width = usize::from(self.area.width.max(1));
        for (idx, cell) in self.cells.iter().enumerate() {
            let Some(cell) = cell else { continue };
            let x = self.area.x + (idx % width) as u16;
            let y = self.area.y + (idx / width) as u16;
            if let Some(target) = buf.cell_mut((x, y)) {
                target.set_char(glyph(cell.mask)).set_fg(cell.color);
            }
        }
    }
}

/// Converts a dot mask into its braille character.
#[must_use]
pub fn glyph(mask: u8) -> char {
    char::from_u32(BRAILLE_BASE + u32::from(mask)).unwrap_or(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(buf: &Buffer, x: u16, y: u16) -> String {
        buf[(x, y)].symbol().to_string()
    }

    #[test]
    fn test_canvas_resolution() {
        let canvas = BrailleCanvas::new(Rect::new(3, 2, 10, 5));
        assert_eq!(canvas.dot_width(), 20);
        assert_eq!(canvas.dot_height(), 20);
    }

    #[test]
    fn test_set_dot_bit_layout() {
        let mut canvas = BrailleCanvas::new(Rect::new(0, 0, 1, 1));
        canvas.set_dot(0, 0, Color::Red);
        assert_eq!(canvas.cell(0, 0), Some(('\u{2801}', Color::Red)));

        canvas.set_dot(1, 3, Color::Red);
        assert_eq!(canvas.cell(0, 0).map(|c| c.0), Some('\u{2881}'));
    }

    #[test]
    fn test_all_dots_fill_cell() {
        let mut canvas = BrailleCanvas::new(Rect::new(0, 0, 1, 1));
        for y in 0..4 {
            for x in 0..2 {
                canvas.set_dot(x, y, Color::White);
            }
        }
        assert_eq!(canvas.cell(0, 0).map(|c| c.0), Some('\u{28FF}'));
    }

    #[test]
    fn test_last_color_wins() {
        let mut canvas = BrailleCanvas::new(Rect::new(0, 0, 2, 1));
        canvas.set_dot(0, 0, Color::Red);
        canvas.set_dot(1, 1, Color::Blue);

        let (ch, color) = canvas.cell(0, 0).expect("cell touched");
        assert_eq!(color, Color::Blue);
        assert_eq!(ch, glyph(0x01 | 0x10));
    }

    #[test]
    fn test_out_of_bounds_dropped() {
        let mut canvas = BrailleCanvas::new(Rect::new(0, 0, 2, 2));
        canvas.set_dot(-1, 0, Color::Red);
        canvas.set_dot(0, -1, Color::Red);
        canvas.set_dot(4, 0, Color::Red);
        canvas.set_dot(0, 8, Color::Red);
        assert_eq!(canvas.touched_cells(), 0);
        assert!(!canvas.is_set(4, 0));
    }

    #[test]
    fn test_copy_to_offsets_by_region() {
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);
        let mut canvas = BrailleCanvas::new(Rect::new(2, 1, 2, 2));
        canvas.set_dot(2, 4, Color::Green);
        canvas.copy_to(&mut buf);

        assert_eq!(symbol(&buf, 3, 2), "\u{2801}");
        assert_eq!(buf[(3, 2)].fg, Color::Green);
    }

    #[test]
    fn test_copy_to_leaves_untouched_cells() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 0, "abcd", ratatui::style::Style::default());

        let mut canvas = BrailleCanvas::new(area);
        canvas.set_dot(2, 0, Color::Red);
        canvas.copy_to(&mut buf);

        assert_eq!(symbol(&buf, 0, 0), "a");
        assert_eq!(symbol(&buf, 1, 0), "\u{2801}");
        assert_eq!(symbol(&buf, 2, 0), "c");
        assert_eq!(symbol(&buf, 3, 0), "d");
    }

    #[test]
    fn test_copy_to_clips_to_buffer() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 2, 2));
        let mut canvas = BrailleCanvas::new(Rect::new(1, 1, 4, 4));
        canvas.set_dot(7, 15, Color::Red);
        canvas.set_dot(0, 0, Color::Red);
        canvas.copy_to(&mut buf);

        assert_eq!(symbol(&buf, 1, 1), "\u{2801}");
    }

    #[test]
    fn test_zero_area_canvas() {
        let mut canvas = BrailleCanvas::new(Rect::new(0, 0, 0, 0));
        canvas.set_dot(0, 0, Color::Red);
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 1));
        canvas.copy_to(&mut buf);
        assert_eq!(canvas.touched_cells(), 0);
    }
}
