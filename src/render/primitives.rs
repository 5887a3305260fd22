//! Scan converters.
//!
//! Every function here takes screen-space (device pixel) coordinates and
//! writes into a [`SampleBuffer`]. None of them see the transform stack.
//! Out-of-range writes are dropped silently; non-finite input draws nothing.

use crate::color::Color;
use crate::config::ImageFilter;
use crate::geometry::{orient2d, Point};
use crate::sample_buffer::SampleBuffer;
use crate::texture::Texture;

// ============================================================================
// Point
// ============================================================================

/// Plot the device pixel containing `(x, y)`.
///
/// The pixel is `(floor(x), floor(y))`; all of its samples receive `color`.
pub fn plot_point(buf: &mut SampleBuffer, x: f32, y: f32, color: Color) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    plot(buf, x.floor() as i64, y.floor() as i64, color, 1.0);
}

/// Plot a pixel with partial coverage (for anti-aliased drawing).
///
/// Coverage scales the color's alpha. Zero coverage plots nothing so that
/// the neighbor pixel of an axis-aligned line stays untouched.
#[inline]
fn plot(buf: &mut SampleBuffer, x: i64, y: i64, color: Color, coverage: f32) {
    if coverage <= 0.0 {
        return;
    }
    let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
        return;
    };
    buf.write_pixel(x, y, color.with_coverage(coverage));
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Two pixels are plotted at each step along the major axis, weighted by the
/// fractional distance of the ideal line from each. A segment shorter than
/// one device unit along its major axis plots a single fully covered dot at
/// `(floor(x0), floor(y0))`.
///
/// `_width` is the stroke width from the element style. It is accepted but
/// lines are always one device pixel wide.
///
/// The interior walk is clipped to the buffer along the major axis, so
/// segments reaching far outside the canvas cost no more than ones inside.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(
    buf: &mut SampleBuffer,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    color: Color,
    _width: f32,
) {
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        return;
    }

    let (dot_x, dot_y) = (x0, y0);
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };

    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    if dx < 1.0 {
        // Both endpoint gaps would land on one or two pixels and the second
        // would overwrite the first with near-zero coverage.
        plot_point(buf, dot_x, dot_y, color);
        return;
    }

    let gradient = dy / dx;
    let major_extent = i64::from(if steep { buf.height() } else { buf.width() });

    // Swap back to screen axes only when plotting.
    let mut put = |major: i64, minor: i64, coverage: f32| {
        if steep {
            plot(buf, minor, major, color, coverage);
        } else {
            plot(buf, major, minor, color, coverage);
        }
    };

    // Handle first endpoint
    let xend = round_half_up(x0);
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i64;
    let ypxl1 = yend.floor() as i64;
    put(xpxl1, ypxl1, rfpart(yend) * xgap);
    put(xpxl1, ypxl1 + 1, fpart(yend) * xgap);

    let intery = yend + gradient;

    // Handle second endpoint
    let xend = round_half_up(x1);
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i64;
    let ypxl2 = yend.floor() as i64;
    put(xpxl2, ypxl2, rfpart(yend) * xgap);
    put(xpxl2, ypxl2 + 1, fpart(yend) * xgap);

    // Main loop, restricted to the buffer's extent along the major axis
    let start = (xpxl1 + 1).max(0);
    let end = xpxl2.min(major_extent);
    if start >= end {
        return;
    }

    let mut intery = intery + gradient * (start - (xpxl1 + 1)) as f32;
    for x in start..end {
        let ipart = intery.floor() as i64;
        put(x, ipart, rfpart(intery));
        put(x, ipart + 1, fpart(intery));
        intery += gradient;
    }
}

/// Round with ties toward positive infinity (`floor(x + 0.5)`).
#[inline]
fn round_half_up(x: f32) -> f32 {
    (x + 0.5).floor()
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

// ============================================================================
// Triangle Fill
// ============================================================================

/// Fill a triangle with a flat color.
///
/// Each sample whose center lies inside the triangle is written. Samples
/// exactly on an edge go to one side only, so triangles sharing an edge
/// (such as the two halves of a rectangle) never both claim a sample.
/// Degenerate triangles draw nothing.
pub fn fill_triangle(buf: &mut SampleBuffer, p0: Point, p1: Point, p2: Point, color: Color) {
    if ![p0.x, p0.y, p1.x, p1.y, p2.x, p2.y].iter().all(|v| v.is_finite()) {
        return;
    }

    let area = orient2d(p0, p1, p2);
    if area.abs() < f32::EPSILON {
        return;
    }
    // Normalize to positive orientation so "inside" means all weights >= 0.
    let (p1, p2) = if area < 0.0 { (p2, p1) } else { (p1, p2) };

    let rate = buf.sample_rate() as f32;
    let (sx0, sx1) = sample_span(
        p0.x.min(p1.x).min(p2.x),
        p0.x.max(p1.x).max(p2.x),
        rate,
        buf.sample_width(),
    );
    let (sy0, sy1) = sample_span(
        p0.y.min(p1.y).min(p2.y),
        p0.y.max(p1.y).max(p2.y),
        rate,
        buf.sample_height(),
    );

    let edges = [(p1, p2), (p2, p0), (p0, p1)];
    let owns_boundary = edges.map(|(a, b)| owns_edge(a, b));

    for sy in sy0..sy1 {
        let cy = (sy as f32 + 0.5) / rate;
        for sx in sx0..sx1 {
            let c = Point::new((sx as f32 + 0.5) / rate, cy);
            let inside = edges.iter().zip(owns_boundary).all(|(&(a, b), owns)| {
                let w = edge_weight(a, b, c);
                w > 0.0 || (w == 0.0 && owns)
            });
            if inside {
                buf.write_sample(sx, sy, color);
            }
        }
    }
}

/// Edge function of `c` against `a -> b`, evaluated from the
/// lexicographically smaller endpoint.
///
/// Both triangles sharing an edge then see the exact negation of the same
/// value, so rounding can never leave a sample on the edge unclaimed.
#[inline]
fn edge_weight(a: Point, b: Point, c: Point) -> f32 {
    if a.x < b.x || (a.x == b.x && a.y <= b.y) {
        orient2d(a, b, c)
    } else {
        -orient2d(b, a, c)
    }
}

/// Tie-break for samples lying exactly on edge `a -> b`.
///
/// The reversed edge `b -> a` always gets the opposite answer, so a sample
/// on a shared edge is filled by exactly one of the two triangles.
#[inline]
fn owns_edge(a: Point, b: Point) -> bool {
    let d = b - a;
    d.y > 0.0 || (d.y == 0.0 && d.x < 0.0)
}

/// Sample index range `[start, end)` whose centers may fall in `[lo, hi]`
/// device units, clamped to `[0, limit)`.
#[inline]
fn sample_span(lo: f32, hi: f32, rate: f32, limit: u32) -> (u32, u32) {
    let max = limit as f32;
    let start = (lo * rate - 0.5).floor().clamp(0.0, max) as u32;
    let end = ((hi * rate - 0.5).ceil() + 1.0).clamp(0.0, max) as u32;
    (start, end)
}

// ============================================================================
// Image Blit
// ============================================================================

/// Draw `texture` stretched over the axis-aligned rectangle spanned by the
/// screen-space corners `p0` (texture origin) and `p1`.
///
/// Each covered sample maps back to texture UV space and is resampled with
/// `filter`. The sampled color, including its alpha, goes through the
/// buffer's compositing mode. The rectangle is clipped to the buffer.
pub fn blit_image(
    buf: &mut SampleBuffer,
    p0: Point,
    p1: Point,
    texture: &Texture,
    filter: ImageFilter,
) {
    if ![p0.x, p0.y, p1.x, p1.y].iter().all(|v| v.is_finite()) {
        return;
    }
    let span_x = p1.x - p0.x;
    let span_y = p1.y - p0.y;
    if span_x.abs() < f32::EPSILON || span_y.abs() < f32::EPSILON {
        return;
    }

    let rate = buf.sample_rate() as f32;
    // Sample center (i + 0.5) / rate lies in [lo, hi) for i in [ceil(lo*rate - 0.5), ceil(hi*rate - 0.5)).
    let first = |lo: f32, limit: u32| (lo * rate - 0.5).ceil().clamp(0.0, limit as f32) as u32;
    let (sx0, sx1) = (
        first(p0.x.min(p1.x), buf.sample_width()),
        first(p0.x.max(p1.x), buf.sample_width()),
    );
    let (sy0, sy1) = (
        first(p0.y.min(p1.y), buf.sample_height()),
        first(p0.y.max(p1.y), buf.sample_height()),
    );

    for sy in sy0..sy1 {
        let v = ((sy as f32 + 0.5) / rate - p0.y) / span_y;
        for sx in sx0..sx1 {
            let u = ((sx as f32 + 0.5) / rate - p0.x) / span_x;
            buf.write_sample(sx, sy, texture.sample(u, v, filter));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
