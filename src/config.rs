use kurbo::Point;

/// Width and height of the output canvas.
pub const CANVAS_SIZE: f64 = 120.0;

/// Radius of the reference circle drawn at the target.
pub const MARKER_RADIUS: f64 = 30.0;

/// Output parameters for recentering.
///
/// The defaults are the fixed 120×120 canvas with the artwork's
/// centroid moved to its center and a reference circle drawn there.
#[derive(Debug, Clone, PartialEq)]
pub struct RecenterConfig {
    /// Output canvas width (also the `viewBox` width).
    pub canvas_width: f64,
    /// Output canvas height.
    pub canvas_height: f64,
    /// Point the combined centroid is moved onto.
    pub target: Point,
    /// Whether to append the reference circle at `target`.
    pub marker: bool,
    pub marker_radius: f64,
}

impl RecenterConfig {
    /// Canvas of the given size, targeting its center.
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            target: Point::new(width / 2.0, height / 2.0),
            ..Self::default()
        }
    }
}

impl Default for RecenterConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_SIZE,
            canvas_height: CANVAS_SIZE,
            target: Point::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0),
            marker: true,
            marker_radius: MARKER_RADIUS,
        }
    }
}
