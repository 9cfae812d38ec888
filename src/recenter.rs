//! Translation of outlines so their centroid lands on a target point.

use kurbo::{Point, Vec2};

use crate::error::{RecenterError, Result};
use crate::geom::Centroid;
use crate::segment::Outline;

/// Offset that carries `centroid` onto `target`.
pub fn offset(centroid: Centroid, target: Point) -> Result<Vec2> {
    let origin = centroid.point().ok_or(RecenterError::UndefinedCentroid)?;
    Ok(target - origin)
}

/// Shift every outline by the same `target - centroid` offset.
///
/// One shared offset keeps the outlines' relative arrangement intact.
/// Returns new outlines; the inputs are not modified.
pub fn recenter(outlines: &[Outline], centroid: Centroid, target: Point) -> Result<Vec<Outline>> {
    let shift = offset(centroid, target)?;
    Ok(outlines.iter().map(|outline| outline.translate(shift)).collect())
}
