//! svg-recenter: move SVG path artwork so its centroid sits at a fixed point.
//!
//! Every `<path>` in a document is normalized to absolute `M`/`L`/`C`/`Z`
//! segments, the outlines' points are pooled into one polygon, and the
//! shoelace centroid of that polygon is translated onto the center of a
//! 120×120 canvas.
//!
//! # Example
//!
//! ```
//! use svg_recenter::{process_svg, RecenterConfig};
//!
//! let svg = r#"<svg><path d="M0 0 L1 0 L1 1 L0 1 Z"/></svg>"#;
//! let config = RecenterConfig::default();
//! let result = process_svg(svg, &config)?;
//! assert_eq!(result.centroid, svg_recenter::kurbo::Point::new(0.5, 0.5));
//! let output = result.to_svg(&config);
//! assert!(output.contains("M59.5,59.5"));
//! # Ok::<(), svg_recenter::RecenterError>(())
//! ```

#![forbid(unsafe_code)]

mod config;

pub mod codec;
pub mod document;
pub mod error;
pub mod geom;
pub mod recenter;
pub mod segment;
pub mod upload;

#[cfg(feature = "render")]
pub mod render;

pub use kurbo;

pub use codec::PathAccess;
pub use config::{RecenterConfig, CANVAS_SIZE, MARKER_RADIUS};
pub use document::{Document, Element, Node, PathElement};
pub use error::{RecenterError, Result};
pub use geom::Centroid;
pub use segment::{Outline, Segment, SegmentKind};

use kurbo::{Point, Vec2};
use tracing::{debug, info, warn};

/// Output of a successful run.
#[derive(Debug, Clone)]
pub struct Recentered {
    /// Output document: recentered paths, pass-through shapes, marker.
    pub document: Document,
    /// Recentered outlines, one per path node, in document order.
    pub outlines: Vec<Outline>,
    /// Centroid of the input artwork.
    pub centroid: Point,
    /// Translation applied to every outline.
    pub offset: Vec2,
}

impl Recentered {
    /// Serialized output SVG.
    pub fn to_svg(&self, config: &RecenterConfig) -> String {
        self.document.to_svg(config)
    }
}

/// Parse SVG text and recenter it. See [`process`].
pub fn process_svg(text: &str, config: &RecenterConfig) -> Result<Recentered> {
    let document = Document::parse(text)?;
    process(&document, config)
}

/// Full pipeline: document → combined centroid → recentered document.
///
/// Either every outline is recentered or an error is returned; no
/// partial output is produced.
pub fn process(document: &Document, config: &RecenterConfig) -> Result<Recentered> {
    // ── Extract ──────────────────────────────────────────
    let outlines = document
        .paths()
        .enumerate()
        .map(|(i, path)| {
            let outline = path.path_data()?;
            debug!(index = i, segments = outline.len(), "normalized path");
            Ok(outline)
        })
        .collect::<Result<Vec<_>>>()?;
    if outlines.is_empty() {
        return Err(RecenterError::NoOutlines);
    }
    info!(paths = outlines.len(), "found path elements");

    // ── Centroid of the union ────────────────────────────
    let points: Vec<Point> = outlines.iter().flat_map(|o| o.points()).collect();
    if points.is_empty() {
        return Err(RecenterError::EmptyGeometry);
    }
    let polygon = geom::close_polygon(points);
    let centroid = geom::centroid(&polygon)?;
    let Some(center) = centroid.point() else {
        warn!(points = polygon.len(), "combined outline encloses zero area");
        return Err(RecenterError::DegenerateGeometry);
    };
    info!(x = center.x, y = center.y, "calculated centroid");

    // ── Recenter & assemble ──────────────────────────────
    let offset = recenter::offset(centroid, config.target)?;
    let recentered = recenter::recenter(&outlines, centroid, config.target)?;

    let mut output = document.clone();
    let targets = output.nodes_mut().iter_mut().filter_map(Node::path_access_mut);
    for (path, outline) in targets.zip(&recentered) {
        path.set_path_data(outline);
    }
    if config.marker {
        output.push(Node::Element(Element::marker(config.target, config.marker_radius)));
    }

    Ok(Recentered {
        document: output,
        outlines: recentered,
        centroid: center,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <path d="M0 0 L1 0 L1 1 L0 1 Z" fill="black"/>
</svg>"#;

    #[test]
    fn unit_square_moves_to_canvas_center() {
        let config = RecenterConfig::default();
        let result = process_svg(SQUARE, &config).unwrap();

        assert_eq!(result.centroid, Point::new(0.5, 0.5));
        assert_eq!(result.offset, Vec2::new(59.5, 59.5));
        assert_eq!(result.outlines.len(), 1);
        assert_eq!(
            result.outlines[0].segments()[0],
            Segment::MoveTo(Point::new(59.5, 59.5))
        );

        let Node::Path(path) = &result.document.nodes()[0] else {
            panic!("first node should be the path");
        };
        assert_eq!(path.data, "M59.5,59.5 L60.5,59.5 L60.5,60.5 L59.5,60.5 Z");
        assert_eq!(path.attributes.get("fill").map(String::as_str), Some("black"));
    }

    #[test]
    fn marker_is_appended_at_target() {
        let result = process_svg(SQUARE, &RecenterConfig::default()).unwrap();
        let Some(Node::Element(marker)) = result.document.nodes().last() else {
            panic!("expected trailing marker");
        };
        assert_eq!(marker.name, "circle");
        assert_eq!(marker.attributes["cx"], "60");
        assert_eq!(marker.attributes["r"], "30");

        let config = RecenterConfig {
            marker: false,
            ..RecenterConfig::default()
        };
        let result = process_svg(SQUARE, &config).unwrap();
        assert_eq!(result.document.nodes().len(), 1);
    }

    #[test]
    fn outlines_share_one_offset() {
        let svg = r#"<svg>
  <path d="M0 0 L2 0 L2 2 L0 2 Z"/>
  <path d="M10 0 L12 0 L12 2 L10 2 Z"/>
</svg>"#;
        let result = process_svg(svg, &RecenterConfig::default()).unwrap();
        let firsts: Vec<Point> = result
            .outlines
            .iter()
            .map(|o| o.points().next().unwrap())
            .collect();
        assert_eq!(firsts[1] - firsts[0], Vec2::new(10.0, 0.0));
    }

    #[test]
    fn collinear_artwork_is_degenerate() {
        let svg = r#"<svg><path d="M0 0 L1 0 L2 0"/></svg>"#;
        let err = process_svg(svg, &RecenterConfig::default()).unwrap_err();
        assert!(matches!(err, RecenterError::DegenerateGeometry));
    }

    #[test]
    fn no_paths_is_reported() {
        let err = process_svg("<svg><rect width=\"1\"/></svg>", &RecenterConfig::default())
            .unwrap_err();
        assert!(matches!(err, RecenterError::NoOutlines));
    }

    #[test]
    fn paths_without_points_are_empty_geometry() {
        let err = process_svg(r#"<svg><path d=""/></svg>"#, &RecenterConfig::default())
            .unwrap_err();
        assert!(matches!(err, RecenterError::EmptyGeometry));
    }

    #[test]
    fn bad_path_data_fails_the_whole_run() {
        let svg = r#"<svg><path d="M0 0 L1 0 L1 1 Z"/><path d="M0 0 L"/></svg>"#;
        let err = process_svg(svg, &RecenterConfig::default()).unwrap_err();
        assert!(matches!(err, RecenterError::InvalidPathData(_)));
    }
}
