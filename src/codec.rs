//! Conversion between native path representations and [`Outline`]s.
//!
//! Path data is normalized before it reaches the segment model: relative
//! commands become absolute, `H`/`V` become lines, smooth and arc
//! commands become cubics, and quadratic segments are raised to the
//! equivalent cubic. What comes out only ever contains `M`, `L`, `C`
//! and `Z`.

use std::fmt::Write;

use kurbo::{BezPath, PathEl, Point, QuadBez};

use crate::error::{RecenterError, Result};
use crate::segment::{Outline, Segment};

/// Read and write access to the path carried by an element.
///
/// Anything that owns path geometry implements this, so callers can
/// work with "an element that has a path" without knowing its type.
pub trait PathAccess {
    /// Normalized outline of this element's path.
    fn path_data(&self) -> Result<Outline>;

    /// Replace this element's path with `outline`.
    fn set_path_data(&mut self, outline: &Outline);
}

impl PathAccess for BezPath {
    fn path_data(&self) -> Result<Outline> {
        Ok(decode_bezpath(self))
    }

    fn set_path_data(&mut self, outline: &Outline) {
        *self = encode(outline);
    }
}

/// Parse SVG path data (`d` attribute) into a normalized outline.
pub fn decode(data: &str) -> Result<Outline> {
    let path =
        BezPath::from_svg(data).map_err(|e| RecenterError::InvalidPathData(e.to_string()))?;
    Ok(decode_bezpath(&path))
}

/// Map a kurbo path onto the segment model, preserving element order.
pub fn decode_bezpath(path: &BezPath) -> Outline {
    let mut start = Point::ZERO;
    let mut current = Point::ZERO;
    path.elements()
        .iter()
        .map(|el| match *el {
            PathEl::MoveTo(p) => {
                start = p;
                current = p;
                Segment::MoveTo(p)
            }
            PathEl::LineTo(p) => {
                current = p;
                Segment::LineTo(p)
            }
            PathEl::QuadTo(q, p) => {
                let cubic = QuadBez::new(current, q, p).raise();
                current = p;
                Segment::CubicCurveTo([cubic.p1, cubic.p2, cubic.p3])
            }
            PathEl::CurveTo(c1, c2, p) => {
                current = p;
                Segment::CubicCurveTo([c1, c2, p])
            }
            PathEl::ClosePath => {
                current = start;
                Segment::ClosePath
            }
        })
        .collect()
}

/// Inverse of [`decode_bezpath`].
pub fn encode(outline: &Outline) -> BezPath {
    let mut path = BezPath::new();
    for seg in outline.segments() {
        match *seg {
            Segment::MoveTo(p) => path.move_to(p),
            Segment::LineTo(p) => path.line_to(p),
            Segment::CubicCurveTo([c1, c2, p]) => path.curve_to(c1, c2, p),
            Segment::ClosePath => path.close_path(),
        }
    }
    path
}

/// Absolute SVG path data for `outline`.
///
/// Coordinates are written in the shortest form that parses back to the
/// same `f64`, so decoding the result yields identical operands.
pub fn to_path_data(outline: &Outline) -> String {
    let mut d = String::with_capacity(outline.len() * 24);
    for (i, seg) in outline.segments().iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        d.push(seg.kind().letter());
        for (j, p) in seg.operands().iter().enumerate() {
            if j > 0 {
                d.push(' ');
            }
            write_point(&mut d, *p);
        }
    }
    d
}

/// Write "x,y", normalizing negative zero.
fn write_point(d: &mut String, p: Point) {
    let x = if p.x == 0.0 { 0.0 } else { p.x };
    let y = if p.y == 0.0 { 0.0 } else { p.y };
    let _ = write!(d, "{x},{y}");
}
