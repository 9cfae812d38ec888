//! Raster preview of a recentered document.
//!
//! Converts the output outlines to tiny-skia paths and draws them on the
//! output canvas, with the reference marker stroked on top, so the
//! result can be checked without an SVG viewer.

use std::path::Path;

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::config::RecenterConfig;
use crate::error::{RecenterError, Result};
use crate::segment::{Outline, Segment};
use crate::Recentered;

/// Convert an [`Outline`] to a `tiny_skia::Path`.
///
/// Returns `None` for outlines tiny-skia considers empty.
fn outline_to_tinyskia(outline: &Outline) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for seg in outline.segments() {
        match *seg {
            Segment::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            Segment::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            Segment::CubicCurveTo([c1, c2, p]) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            Segment::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Encode a pixmap to PNG bytes.
fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| RecenterError::Render(e.to_string()))?;
    writer
        .write_image_data(pixmap.data())
        .map_err(|e| RecenterError::Render(e.to_string()))?;
    drop(writer);
    Ok(buf)
}

/// Render the output canvas at `scale` pixels per unit as PNG bytes.
///
/// All outlines are combined into one path so even-odd filling cuts
/// holes the way nested contours expect.
pub fn render_preview(result: &Recentered, config: &RecenterConfig, scale: u32) -> Result<Vec<u8>> {
    let scale = scale.max(1);
    let w = (config.canvas_width.ceil().max(1.0) as u32) * scale;
    let h = (config.canvas_height.ceil().max(1.0) as u32) * scale;
    let mut pixmap = Pixmap::new(w, h)
        .ok_or_else(|| RecenterError::Render(format!("invalid canvas size {w}x{h}")))?;
    pixmap.fill(Color::WHITE);
    let transform = Transform::from_scale(scale as f32, scale as f32);

    let combined: Outline = result
        .outlines
        .iter()
        .flat_map(|o| o.segments().iter().copied())
        .collect();
    let mut paint = Paint::default();
    paint.set_color(Color::BLACK);
    paint.anti_alias = true;
    if let Some(path) = outline_to_tinyskia(&combined) {
        pixmap.fill_path(&path, &paint, FillRule::EvenOdd, transform, None);
    }

    if config.marker {
        let target = config.target;
        let circle = PathBuilder::from_circle(
            target.x as f32,
            target.y as f32,
            config.marker_radius as f32,
        );
        if let Some(circle) = circle {
            let mut red = Paint::default();
            red.set_color(Color::from_rgba8(255, 0, 0, 200));
            red.anti_alias = true;
            let stroke = Stroke {
                width: 1.0,
                ..Stroke::default()
            };
            pixmap.stroke_path(&circle, &red, &stroke, transform, None);
        }
    }

    encode_png(&pixmap)
}

/// Render the preview and write it to `output_path`.
pub fn write_preview(
    result: &Recentered,
    config: &RecenterConfig,
    scale: u32,
    output_path: &Path,
) -> Result<()> {
    let png_data = render_preview(result, config, scale)?;
    std::fs::write(output_path, png_data).map_err(|e| RecenterError::Render(e.to_string()))
}
