//! Polygon centroid via the signed-area (shoelace) formula.

use kurbo::Point;

use crate::error::{RecenterError, Result};

/// Relative threshold below which the summed cross products count as zero.
///
/// The shoelace sum is compared against the sum of the magnitudes of its
/// terms, so collinear input far from the origin is still recognized
/// even though its individual cross products are large.
pub const DEGENERATE_AREA_TOLERANCE: f64 = 1e-12;

/// Area-weighted center of a polygon, or `Undefined` when the polygon
/// encloses no area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Centroid {
    Defined(Point),
    Undefined,
}

impl Centroid {
    pub fn point(self) -> Option<Point> {
        match self {
            Self::Defined(p) => Some(p),
            Self::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// Plain point form; the undefined centroid becomes `(NaN, NaN)`.
    pub fn to_point(self) -> Point {
        self.point().unwrap_or(Point::new(f64::NAN, f64::NAN))
    }
}

/// Append the first point so the sequence ends where it started.
pub fn close_polygon(mut points: Vec<Point>) -> Vec<Point> {
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// Signed area of an explicitly closed polygon.
///
/// Positive = counter-clockwise (y up), negative = clockwise.
pub fn signed_area(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| cross(w[0], w[1]))
        .sum::<f64>()
        * 0.5
}

/// Centroid of an explicitly closed polygon (last point repeats the first).
///
/// Winding only flips the sign of the area, so the centroid is the same
/// for either orientation. Fails with `EmptyGeometry` on fewer than
/// two points.
pub fn centroid(points: &[Point]) -> Result<Centroid> {
    if points.len() < 2 {
        return Err(RecenterError::EmptyGeometry);
    }

    let mut area = 0.0;
    let mut magnitude = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for w in points.windows(2) {
        let (p, q) = (w[0], w[1]);
        let c = cross(p, q);
        area += c;
        magnitude += c.abs();
        cx += (p.x + q.x) * c;
        cy += (p.y + q.y) * c;
    }

    if !area.is_finite() || area.abs() <= DEGENERATE_AREA_TOLERANCE * magnitude {
        return Ok(Centroid::Undefined);
    }

    let area = area * 0.5;
    Ok(Centroid::Defined(Point::new(
        cx / (6.0 * area),
        cy / (6.0 * area),
    )))
}

fn cross(p: Point, q: Point) -> f64 {
    p.x * q.y - q.x * p.y
}
