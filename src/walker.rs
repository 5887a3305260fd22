//! Scene traversal.
//!
//! Walks the element tree depth-first, maintaining the transform stack, and
//! turns each primitive into scan-converter calls in device space.

use std::f32::consts::TAU;

use crate::color::Color;
use crate::config::ImageFilter;
use crate::geometry::Point;
use crate::render::{blit_image, draw_line_aa, fill_triangle, plot_point};
use crate::sample_buffer::SampleBuffer;
use crate::scene::{
    EllipseShape, Element, ElementKind, ImageShape, LineShape, PointShape, PolygonShape,
    PolylineShape, RectShape, Scene,
};
use crate::transform::TransformStack;
use crate::triangulate::Triangulator;

const ELLIPSE_MIN_SEGMENTS: usize = 8;
const ELLIPSE_MAX_SEGMENTS: usize = 256;
const OUTLINE_WIDTH: f32 = 1.0;

/// Everything a drawer needs besides the transform.
pub(crate) struct Painter<'a> {
    pub(crate) buffer: &'a mut SampleBuffer,
    pub(crate) triangulator: &'a dyn Triangulator,
    pub(crate) image_filter: ImageFilter,
}

/// Draw every element of `scene` followed by the canvas outline.
///
/// `stack` is reset to the scene's canvas-to-screen transform first so its
/// storage can be reused across draws. The buffer is not cleared here.
pub(crate) fn draw_scene(painter: &mut Painter<'_>, stack: &mut TransformStack, scene: &Scene) {
    stack.reset(scene.canvas_to_screen);
    for element in &scene.elements {
        visit(stack, painter, element);
    }
    draw_canvas_outline(painter, stack, scene.width, scene.height);
}

fn visit(stack: &mut TransformStack, painter: &mut Painter<'_>, element: &Element) {
    stack.scoped(element.transform, |stack| match &element.kind {
        ElementKind::Point(shape) => draw_point(painter, stack, shape),
        ElementKind::Line(shape) => draw_line(painter, stack, shape),
        ElementKind::Polyline(shape) => draw_polyline(painter, stack, shape),
        ElementKind::Rect(shape) => draw_rect(painter, stack, shape),
        ElementKind::Polygon(shape) => draw_polygon(painter, stack, shape),
        ElementKind::Ellipse(shape) => draw_ellipse(painter, stack, shape),
        ElementKind::Image(shape) => draw_image(painter, stack, shape),
        ElementKind::Group(group) => {
            for child in &group.elements {
                visit(stack, painter, child);
            }
        }
    });
}

// ============================================================================
// Drawers
// ============================================================================

fn draw_point(painter: &mut Painter<'_>, stack: &TransformStack, shape: &PointShape) {
    let color = shape.style.fill_color;
    if color.is_transparent() {
        return;
    }
    let p = stack.apply(shape.position);
    plot_point(painter.buffer, p.x, p.y, color);
}

fn draw_line(painter: &mut Painter<'_>, stack: &TransformStack, shape: &LineShape) {
    let color = shape.style.stroke_color;
    if color.is_transparent() {
        return;
    }
    segment(
        painter.buffer,
        stack.apply(shape.from),
        stack.apply(shape.to),
        shape.style.stroke_width,
        color,
    );
}

fn draw_polyline(painter: &mut Painter<'_>, stack: &TransformStack, shape: &PolylineShape) {
    let color = shape.style.stroke_color;
    if color.is_transparent() {
        return;
    }
    let screen: Vec<Point> = shape.points.iter().map(|&p| stack.apply(p)).collect();
    for pair in screen.windows(2) {
        segment(painter.buffer, pair[0], pair[1], shape.style.stroke_width, color);
    }
}

fn draw_rect(painter: &mut Painter<'_>, stack: &TransformStack, shape: &RectShape) {
    let RectShape {
        position,
        dimension,
        style,
    } = shape;
    if !(dimension.x > 0.0 && dimension.y > 0.0) {
        return;
    }

    let p0 = stack.apply(*position);
    let p1 = stack.apply(Point::new(position.x + dimension.x, position.y));
    let p2 = stack.apply(Point::new(position.x, position.y + dimension.y));
    let p3 = stack.apply(*position + *dimension);

    if !style.fill_color.is_transparent() {
        fill_triangle(painter.buffer, p0, p1, p2, style.fill_color);
        fill_triangle(painter.buffer, p2, p1, p3, style.fill_color);
    }

    if !style.stroke_color.is_transparent() {
        stroke_loop(
            painter.buffer,
            &[p0, p1, p3, p2],
            style.stroke_width,
            style.stroke_color,
        );
    }
}

fn draw_polygon(painter: &mut Painter<'_>, stack: &TransformStack, shape: &PolygonShape) {
    let style = &shape.style;

    if !style.fill_color.is_transparent() {
        let triangles = painter.triangulator.triangulate(&shape.points);
        if triangles.len() % 3 != 0 {
            log::warn!(
                "triangulator returned {} vertices, dropping the trailing {}",
                triangles.len(),
                triangles.len() % 3
            );
        }
        for tri in triangles.chunks_exact(3) {
            fill_triangle(
                painter.buffer,
                stack.apply(tri[0]),
                stack.apply(tri[1]),
                stack.apply(tri[2]),
                style.fill_color,
            );
        }
    }

    if !style.stroke_color.is_transparent() {
        let screen: Vec<Point> = shape.points.iter().map(|&p| stack.apply(p)).collect();
        stroke_loop(painter.buffer, &screen, style.stroke_width, style.stroke_color);
    }
}

fn draw_ellipse(painter: &mut Painter<'_>, stack: &TransformStack, shape: &EllipseShape) {
    let EllipseShape {
        center,
        radius,
        style,
    } = shape;
    if !(radius.x > 0.0 && radius.y > 0.0) {
        return;
    }

    let c = stack.apply(*center);
    let screen_radius = stack
        .apply(Point::new(center.x + radius.x, center.y))
        .distance(c)
        .max(stack.apply(Point::new(center.x, center.y + radius.y)).distance(c));
    let segments = ellipse_segments(screen_radius);

    let outline: Vec<Point> = (0..segments)
        .map(|i| {
            let theta = TAU * i as f32 / segments as f32;
            stack.apply(Point::new(
                center.x + radius.x * theta.cos(),
                center.y + radius.y * theta.sin(),
            ))
        })
        .collect();

    if !style.fill_color.is_transparent() {
        for (&p, &q) in outline.iter().zip(outline.iter().cycle().skip(1)) {
            fill_triangle(painter.buffer, c, p, q, style.fill_color);
        }
    }

    if !style.stroke_color.is_transparent() {
        stroke_loop(painter.buffer, &outline, style.stroke_width, style.stroke_color);
    }
}

/// Segment count for an ellipse whose larger screen radius is `r`:
/// roughly one segment per two pixels of circumference.
fn ellipse_segments(r: f32) -> usize {
    if !r.is_finite() {
        return ELLIPSE_MIN_SEGMENTS;
    }
    ((TAU * r / 2.0).ceil() as usize).clamp(ELLIPSE_MIN_SEGMENTS, ELLIPSE_MAX_SEGMENTS)
}

fn draw_image(painter: &mut Painter<'_>, stack: &TransformStack, shape: &ImageShape) {
    if !(shape.dimension.x > 0.0 && shape.dimension.y > 0.0) {
        return;
    }
    let p0 = stack.apply(shape.position);
    let p1 = stack.apply(shape.position + shape.dimension);
    blit_image(painter.buffer, p0, p1, &shape.texture, painter.image_filter);
}

// ============================================================================
// Canvas Outline
// ============================================================================

/// Black border on the outermost device pixels of the canvas.
///
/// A segment at device coordinate `k` fills pixel row (or column) `k`, so
/// the near edges already land on the first pixel inside the canvas. Corners
/// on the far side of the screen-space center are pulled back one unit so
/// the far edges land on the last pixel inside instead of being clipped. All
/// four edges stay visible on a target the size of the canvas, flipped or not.
fn draw_canvas_outline(painter: &mut Painter<'_>, stack: &TransformStack, width: f32, height: f32) {
    let a = stack.apply(Point::new(0.0, 0.0));
    let b = stack.apply(Point::new(width, 0.0));
    let c = stack.apply(Point::new(0.0, height));
    let d = stack.apply(Point::new(width, height));
    let center = (a + d) * 0.5;

    let pull = |p: Point| Point::new(p.x - inset(p.x - center.x), p.y - inset(p.y - center.y));
    let (a, b, c, d) = (pull(a), pull(b), pull(c), pull(d));

    segment(painter.buffer, a, b, OUTLINE_WIDTH, Color::BLACK);
    segment(painter.buffer, a, c, OUTLINE_WIDTH, Color::BLACK);
    segment(painter.buffer, d, b, OUTLINE_WIDTH, Color::BLACK);
    segment(painter.buffer, d, c, OUTLINE_WIDTH, Color::BLACK);
}

/// One unit for the far side of the center, zero otherwise.
fn inset(delta: f32) -> f32 {
    if delta > 0.0 {
        1.0
    } else {
        0.0
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn segment(buf: &mut SampleBuffer, from: Point, to: Point, width: f32, color: Color) {
    draw_line_aa(buf, from.x, from.y, to.x, to.y, color, width);
}

/// Closed loop through `points`, joining the last back to the first.
fn stroke_loop(buf: &mut SampleBuffer, points: &[Point], width: f32, color: Color) {
    for (&from, &to) in points.iter().zip(points.iter().cycle().skip(1)) {
        segment(buf, from, to, width, color);
    }
}
