//! Geometric primitives rasterized onto a [`BrailleCanvas`].
//!
//! All coordinates are dot coordinates local to the canvas. Shapes may extend
//! past the canvas edge; the canvas clips them.

use std::f64::consts::FRAC_PI_2;

use ratatui::style::Color;

use crate::canvas::BrailleCanvas;
use crate::error::{Error, Result};

/// A dot position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dot {
    /// Horizontal dot coordinate.
    pub x: i32,
    /// Vertical dot coordinate (grows downwards).
    pub y: i32,
}

impl Dot {
    /// Creates a new dot position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point at `angle` radians on the ellipse with the given radii.
    ///
    /// Offsets are truncated towards zero.
    #[must_use]
    pub fn polar(self, radii: Radii, angle: f64) -> Self {
        Self {
            x: self.x + (f64::from(radii.x) * angle.cos()) as i32,
            y: self.y + (f64::from(radii.y) * angle.sin()) as i32,
        }
    }
}

/// Horizontal and vertical radii of an ellipse, in dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Radii {
    /// Horizontal radius.
    pub x: i32,
    /// Vertical radius.
    pub y: i32,
}

impl Radii {
    /// Creates radii.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Scales both radii by `factor`, truncating.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: (f64::from(self.x) * factor) as i32,
            y: (f64::from(self.y) * factor) as i32,
        }
    }
}

/// Returns the canvas center and the largest radii that fit with `margin` dots
/// of clearance. Each radius is clamped to at least 1.
#[must_use]
pub fn mid_and_radii(canvas: &BrailleCanvas, margin: i32) -> (Dot, Radii) {
    let width = canvas.dot_width();
    let height = canvas.dot_height();
    let radii = Radii::new((width / 2 - margin).max(1), (height / 2 - margin).max(1));
    (Dot::new(width / 2, height / 2), radii)
}

/// Draws a line using Bresenham's algorithm.
pub fn line(canvas: &mut BrailleCanvas, from: Dot, to: Dot, color: Color) {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = from.x;
    let mut y = from.y;

    loop {
        canvas.set_dot(x, y, color);

        if x == to.x && y == to.y {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draws a horizontal run of dots from `x0` to `x1` inclusive.
pub fn hline(canvas: &mut BrailleCanvas, x0: i32, x1: i32, y: i32, color: Color) {
    let (start, end) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    for x in start..=end {
        canvas.set_dot(x, y, color);
    }
}

/// Draws a closed polygon through `points`, joining the last point to the first.
pub fn polygon(canvas: &mut BrailleCanvas, points: &[Dot], color: Color) {
    for pair in points.windows(2) {
        line(canvas, pair[0], pair[1], color);
    }
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        line(canvas, last, first, color);
    }
}

/// Draws an elliptical ring with the midpoint algorithm.
///
/// Separate radii let a ring look round on cells that are taller than wide.
pub fn circle(canvas: &mut BrailleCanvas, center: Dot, radii: Radii, color: Color) {
    let rx = i64::from(radii.x.max(0));
    let ry = i64::from(radii.y.max(0));

    if rx == 0 || ry == 0 {
        line(
            canvas,
            Dot::new(center.x - rx as i32, center.y - ry as i32),
            Dot::new(center.x + rx as i32, center.y + ry as i32),
            color,
        );
        return;
    }

    let mut plot4 = |x: i64, y: i64| {
        let (x, y) = (x as i32, y as i32);
        canvas.set_dot(center.x + x, center.y + y, color);
        canvas.set_dot(center.x - x, center.y + y, color);
        canvas.set_dot(center.x + x, center.y - y, color);
        canvas.set_dot(center.x - x, center.y - y, color);
    };

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let mut x = 0_i64;
    let mut y = ry;
    let mut px = 0_i64;
    let mut py = 2 * rx2 * y;

    // Region 1: slope magnitude < 1
    let mut p = ry2 as f64 - (rx2 * ry) as f64 + 0.25 * rx2 as f64;
    while px < py {
        plot4(x, y);
        x += 1;
        px += 2 * ry2;
        if p < 0.0 {
            p += (ry2 + px) as f64;
        } else {
            y -= 1;
            py -= 2 * rx2;
            p += (ry2 + px - py) as f64;
        }
    }

    // Region 2: slope magnitude >= 1
    let half = x as f64 + 0.5;
    p = ry2 as f64 * half * half + (rx2 * (y - 1) * (y - 1)) as f64 - (rx2 * ry2) as f64;
    while y >= 0 {
        plot4(x, y);
        y -= 1;
        py -= 2 * rx2;
        if p > 0.0 {
            p += (rx2 - py) as f64;
        } else {
            x += 1;
            px += 2 * ry2;
            p += (rx2 - py + px) as f64;
        }
    }
}

/// Fills a horizontally centered trapezoid one scan line at a time.
///
/// The width of scan line `y` is interpolated linearly from `top_width` at the
/// first line towards `bottom_width` at the last.
pub fn trapezoid(
    canvas: &mut BrailleCanvas,
    center_x: i32,
    top_y: i32,
    height: i32,
    top_width: i32,
    bottom_width: i32,
    color: Color,
) {
    if height <= 0 {
        return;
    }
    for y in 0..height {
        let t = f64::from(y) / f64::from(height);
        let width = (f64::from(top_width) - f64::from(top_width - bottom_width) * t) as i32;
        hline(
            canvas,
            center_x - width / 2,
            center_x + width / 2,
            top_y + y,
            color,
        );
    }
}

/// Angular sampling increment for [`arc_sweep`], in radians.
///
/// Each sample draws one radial line, so the step trades time for coverage:
/// at outer radius `r` two consecutive samples land `r * step` dots apart.
/// Keeping that distance at or below one dot (`step <= 1 / r`) leaves no gaps
/// at the outer edge. A coarser step is allowed and only shows as visible
/// spokes in the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStep(f64);

impl ArcStep {
    /// Default increment; gap-free for outer radii up to 100 dots.
    pub const DEFAULT: Self = Self(0.01);

    /// Creates a step, rejecting non-finite values and values outside `(0, pi/2]`.
    pub fn new(radians: f64) -> Result<Self> {
        if radians.is_finite() && radians > 0.0 && radians <= FRAC_PI_2 {
            Ok(Self(radians))
        } else {
            Err(Error::InvalidArcStep(radians))
        }
    }

    /// The coarsest step that keeps outer-edge samples at most one dot apart.
    #[must_use]
    pub fn for_radius(radius: i32) -> Self {
        Self((1.0 / f64::from(radius.max(1))).min(FRAC_PI_2))
    }

    /// Returns the finer of this step and the gap-free step for `radius`.
    #[must_use]
    pub fn densest(self, radius: i32) -> Self {
        let needed = Self::for_radius(radius);
        if needed.0 < self.0 {
            needed
        } else {
            self
        }
    }

    /// The increment in radians.
    #[must_use]
    pub fn radians(self) -> f64 {
        self.0
    }
}

impl Default for ArcStep {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sweeps radial lines from `inner` to `outer` radii between two angles.
///
/// Angles are in radians, measured clockwise from the positive x axis
/// (screen y grows downwards). Samples are taken at `start + i * step` for
/// every `i` that stays below `end`.
#[allow(clippy::too_many_arguments)]
pub fn arc_sweep(
    canvas: &mut BrailleCanvas,
    center: Dot,
    inner: Radii,
    outer: Radii,
    start: f64,
    end: f64,
    step: ArcStep,
    color: Color,
) {
    let mut i = 0_u32;
    loop {
        let angle = start + f64::from(i) * step.radians();
        if angle >= end {
            break;
        }
        line(
            canvas,
            center.polar(inner, angle),
            center.polar(outer, angle),
            color,
        );
        i += 1;
    }
}
