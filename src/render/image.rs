//! Image rendering for shapes using tiny-skia
//!
//! Draws a display list onto an RgbaImage for saving to disk.

use image::RgbaImage;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::shape;
use super::surface::{Shape, ShapeKind, Style};
use crate::config::ShapeColor;
use crate::domain::Point;

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

fn paint(color: ShapeColor, alpha: f32) -> Paint<'static> {
    let [r, g, b, _] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8);
    paint.anti_alias = true;
    paint
}

/// Build a circle path using cubic bezier curves
fn build_circle_path(center: Point, r: f32) -> Option<tiny_skia::Path> {
    let (cx, cy) = (center.x, center.y);
    let k = r * shape::BEZIER_K;

    let mut pb = PathBuilder::new();

    // Start at top
    pb.move_to(cx, cy - r);

    // Top to right
    pb.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);

    // Right to bottom
    pb.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);

    // Bottom to left
    pb.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);

    // Left to top
    pb.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);

    pb.close();
    pb.finish()
}

fn build_polyline(points: &[Point], close: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

fn build_path(kind: &ShapeKind) -> Option<tiny_skia::Path> {
    match kind {
        ShapeKind::Rect(rect) => {
            let rect = rect.normalized();
            tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.w, rect.h).map(PathBuilder::from_rect)
        }
        ShapeKind::Circle { center, r } if *r > 0.0 => build_circle_path(*center, *r),
        ShapeKind::Line { from, to } => build_polyline(&[*from, *to], false),
        ShapeKind::Polygon(points) => build_polyline(points, true),
        _ => None,
    }
}

fn draw_shape(pixmap: &mut Pixmap, shape: &Shape) {
    let Style {
        stroke,
        stroke_width,
        fill,
        fill_opacity,
        opacity,
    } = shape.style;

    match &shape.kind {
        ShapeKind::Text { content, .. } => {
            // tiny-skia has no text shaping; the label's background box is
            // still drawn as its own shape.
            log::trace!("Skipping text {:?} in raster output", content);
            return;
        }
        ShapeKind::Image { width, height } => {
            // The background image is already in the pixmap. Reduced image
            // opacity is shown as a white wash over it.
            if opacity < 1.0
                && let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, *width, *height)
            {
                let wash = paint(ShapeColor::WHITE, 1.0 - opacity);
                pixmap.fill_rect(rect, &wash, Transform::identity(), None);
            }
            return;
        }
        _ => {}
    }

    let Some(path) = build_path(&shape.kind) else {
        return;
    };

    if let Some(color) = fill {
        let alpha = opacity * fill_opacity;
        if alpha > 0.0 {
            pixmap.fill_path(
                &path,
                &paint(color, alpha),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    if let Some(color) = stroke
        && stroke_width > 0.0
        && opacity > 0.0
    {
        let stroke = Stroke {
            width: stroke_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint(color, opacity), &stroke, Transform::identity(), None);
    }
}

/// Draw shapes onto an image, back to front
pub fn draw_shapes_on_image(img: &mut RgbaImage, shapes: &[Shape]) {
    if shapes.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        for shape in shapes {
            draw_shape(pixmap, shape);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rect;

    fn white(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_filled_rect_paints_inside_only() {
        let mut img = white(20, 20);
        let shape = Shape::new(
            ShapeKind::Rect(Rect::new(5.0, 5.0, 10.0, 10.0)),
            Style::filled(ShapeColor::new(1.0, 0.0, 0.0), 1.0),
        );
        draw_shapes_on_image(&mut img, &[shape]);
        assert_eq!(img.get_pixel(10, 10).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_stroked_circle_leaves_center_untouched() {
        let mut img = white(40, 40);
        let shape = Shape::new(
            ShapeKind::Circle {
                center: Point::new(20.0, 20.0),
                r: 15.0,
            },
            Style::stroked(ShapeColor::BLACK, 2.0),
        );
        draw_shapes_on_image(&mut img, &[shape]);
        assert_eq!(img.get_pixel(20, 20).0, [255, 255, 255, 255]);
        assert_ne!(img.get_pixel(35, 20).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_text_is_skipped() {
        let mut img = white(10, 10);
        let before = img.clone();
        let shape = Shape::new(
            ShapeKind::Text {
                at: Point::new(5.0, 5.0),
                content: "label".into(),
                font_size: 16.0,
            },
            Style::filled(ShapeColor::BLACK, 1.0),
        );
        draw_shapes_on_image(&mut img, &[shape]);
        assert_eq!(img, before);
    }
}
