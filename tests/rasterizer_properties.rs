//! End-to-end rasterizer properties.
//!
//! Run: cargo test --test rasterizer_properties

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use proptest::prelude::*;
use trueno_raster::prelude::*;
use trueno_raster::render::{draw_line_aa, fill_triangle, resolve};

const WHITE: [u8; 4] = [255, 255, 255, 255];

fn pixel(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}

/// Whether `(x, y)` is on the one-pixel outline ring of a `w × h` target.
fn on_ring(w: u32, h: u32, x: u32, y: u32) -> bool {
    x == 0 || y == 0 || x + 1 == w || y + 1 == h
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn renderer(width: u32, height: u32, rate: u32) -> SoftwareRenderer {
    init_logging();
    SoftwareRenderer::new(RendererConfig::new(width, height).with_sample_rate(rate)).unwrap()
}

// ============================================================================
// Bounds
// ============================================================================

#[test]
fn far_outside_geometry_is_dropped() {
    let mut r = renderer(16, 16, 2);
    let far = 1.0e7;
    let style = Style::fill(Color::RED).with_stroke(Color::BLACK);
    let scene = Scene::new(16.0, 16.0)
        .with_canvas_to_screen(AffineTransform::translate(100.0, 100.0))
        .with_element(Element::line(Point::new(-far, -far), Point::new(-far, far), style))
        .with_element(Element::rect(far, far, 50.0, 50.0, style))
        .with_element(Element::point(Point::new(-far, 3.0), style))
        .with_element(Element::polygon(
            vec![Point::new(-far, 0.0), Point::new(-far + 10.0, 0.0), Point::new(-far, 10.0)],
            style,
        ));

    let pixels = r.render(&scene).unwrap();
    assert!(pixels.chunks_exact(4).all(|px| px == WHITE));
}

#[test]
fn geometry_crossing_the_border_is_clipped() {
    let mut r = renderer(10, 10, 1);
    let scene = Scene::new(10.0, 10.0).with_element(Element::rect(
        -50.0,
        -50.0,
        55.0,
        55.0,
        Style::fill(Color::BLUE),
    ));
    let pixels = r.render(&scene).unwrap();
    assert_eq!(pixel(&pixels, 10, 1, 1), [0, 0, 255, 255]);
    assert_eq!(pixel(&pixels, 10, 4, 4), [0, 0, 255, 255]);
    assert_eq!(pixel(&pixels, 10, 5, 1), WHITE);
    assert_eq!(pixel(&pixels, 10, 5, 5), WHITE);
}

// ============================================================================
// Lines
// ============================================================================

#[test]
fn zero_length_line_plots_its_pixel() {
    let mut buf = SampleBuffer::new(10, 10, 1).unwrap();
    buf.clear(Color::WHITE);
    draw_line_aa(&mut buf, 3.7, 8.2, 3.7, 8.2, Color::BLACK, 1.0);
    let c = buf.get_sample(3, 8).unwrap();
    assert!(c.a > 0.0);
    assert_eq!(c.r, 0.0);
}

#[test]
fn horizontal_line_stays_in_its_row() {
    let mut buf = SampleBuffer::new(20, 20, 1).unwrap();
    buf.clear(Color::TRANSPARENT);
    draw_line_aa(&mut buf, 0.0, 5.0, 10.0, 5.0, Color::BLACK, 1.0);

    for y in 0..20 {
        for x in 0..20 {
            let a = buf.get_sample(x, y).unwrap().a;
            if y == 5 && x <= 10 {
                assert!(a > 0.0 && a <= 1.0, "({x}, {y}) coverage {a}");
            } else {
                assert_eq!(a, 0.0, "({x}, {y}) should be untouched");
            }
        }
    }
}

// ============================================================================
// Resolve
// ============================================================================

#[test]
fn resolve_rate_one_is_identity_within_one() {
    let mut buf = SampleBuffer::new(4, 1, 1).unwrap();
    let colors = [
        Color::new(0.1, 0.2, 0.3, 0.4),
        Color::new(0.9, 0.01, 0.0, 1.0),
        Color::new(0.333, 0.666, 0.999, 0.5),
        Color::new(1.0, 1.0, 1.0, 0.0),
    ];
    for (x, &c) in colors.iter().enumerate() {
        buf.write_sample(x as u32, 0, c);
    }

    let mut out = vec![0u8; 16];
    resolve(&buf, &mut out).unwrap();

    for (px, c) in out.chunks_exact(4).zip(colors) {
        for (&byte, channel) in px.iter().zip(c.to_array()) {
            let exact = channel * 255.0;
            assert!((f32::from(byte) - exact).abs() <= 1.0, "{byte} vs {exact}");
        }
    }
}

#[test]
fn resolve_rate_four_preserves_constant_color() {
    let c = Color::new(0.25, 0.6, 0.15, 0.85);
    let mut buf = SampleBuffer::new(7, 5, 4).unwrap();
    buf.clear(c);

    let mut out = vec![0u8; 7 * 5 * 4];
    resolve(&buf, &mut out).unwrap();

    let expected = c.to_rgba8().to_array();
    assert!(out.chunks_exact(4).all(|px| px == expected));
}

// ============================================================================
// Fills
// ============================================================================

#[test]
fn full_canvas_rect_leaves_no_background() {
    for rate in [1, 2, 3, 4] {
        let mut r = renderer(13, 9, rate);
        r.set_background(Color::BLUE);
        let scene = Scene::new(13.0, 9.0)
            .with_element(Element::rect(0.0, 0.0, 13.0, 9.0, Style::fill(Color::GREEN)));
        let pixels = r.render(&scene).unwrap();
        for y in 0..9 {
            for x in 0..13 {
                let px = pixel(&pixels, 13, x, y);
                assert_ne!(px, [0, 0, 255, 255], "background at ({x}, {y}), rate {rate}");
                if !on_ring(13, 9, x, y) {
                    assert_eq!(px, [0, 255, 0, 255], "({x}, {y}) at rate {rate}");
                }
            }
        }
    }
}

#[test]
fn degenerate_polygon_leaves_buffer_unchanged() {
    let mut r = renderer(12, 12, 2);
    let scene = Scene::new(12.0, 12.0);
    r.render(&scene).unwrap();
    let before = r.sample_buffer().samples().to_vec();

    let scene = Scene::new(12.0, 12.0)
        .with_element(Element::polygon(
            vec![Point::new(1.0, 1.0), Point::new(6.0, 6.0), Point::new(11.0, 11.0)],
            Style::fill(Color::RED),
        ))
        .with_element(Element::polygon(
            vec![Point::new(3.0, 3.0), Point::new(3.0, 3.0)],
            Style::fill(Color::RED),
        ));
    r.render(&scene).unwrap();
    assert_eq!(r.sample_buffer().samples(), &before[..]);
}

#[test]
fn image_is_resampled_into_destination() {
    let texture = Texture::from_rgba8(
        2,
        1,
        &[255, 0, 0, 255, 0, 0, 255, 255],
    )
    .unwrap();
    let mut r = SoftwareRenderer::new(
        RendererConfig::new(8, 4).with_image_filter(ImageFilter::Nearest),
    )
    .unwrap();
    let scene = Scene::new(8.0, 4.0).with_element(Element::image(
        Point::new(0.0, 0.0),
        Point::new(8.0, 4.0),
        texture,
    ));
    let pixels = r.render(&scene).unwrap();
    assert_eq!(pixel(&pixels, 8, 1, 2), [255, 0, 0, 255]);
    assert_eq!(pixel(&pixels, 8, 6, 2), [0, 0, 255, 255]);
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn end_to_end_line_on_canvas() {
    let mut r = renderer(20, 20, 1);
    let scene = Scene::new(20.0, 20.0).with_element(Element::line(
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Style::stroke(Color::BLACK),
    ));
    let pixels = r.render(&scene).unwrap();

    for x in 0..=10 {
        assert_ne!(pixel(&pixels, 20, x, 0), WHITE, "x = {x}");
    }
    // Border outline at all four edges
    assert_ne!(pixel(&pixels, 20, 15, 0), WHITE, "top");
    assert_ne!(pixel(&pixels, 20, 10, 19), WHITE, "bottom");
    assert_ne!(pixel(&pixels, 20, 0, 10), WHITE, "left");
    assert_ne!(pixel(&pixels, 20, 19, 10), WHITE, "right");
    for y in 1..19 {
        for x in 1..19 {
            assert_eq!(pixel(&pixels, 20, x, y), WHITE, "({x}, {y})");
        }
    }
}

#[test]
fn end_to_end_border_outline_follows_canvas() {
    // A 20x20 canvas inset by one pixel on a 23x23 target
    let mut r = renderer(23, 23, 1);
    let scene = Scene::new(20.0, 20.0)
        .with_canvas_to_screen(AffineTransform::translate(1.0, 1.0))
        .with_element(Element::line(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Style::stroke(Color::BLACK),
        ));
    let pixels = r.render(&scene).unwrap();

    for x in 1..=11 {
        assert_ne!(pixel(&pixels, 23, x, 1), WHITE, "line x = {x}");
    }
    for i in 2..20 {
        assert_ne!(pixel(&pixels, 23, i, 1), WHITE, "top {i}");
        assert_ne!(pixel(&pixels, 23, i, 20), WHITE, "bottom {i}");
        assert_ne!(pixel(&pixels, 23, 1, i), WHITE, "left {i}");
        assert_ne!(pixel(&pixels, 23, 20, i), WHITE, "right {i}");

        assert_eq!(pixel(&pixels, 23, i, 0), WHITE, "above {i}");
        assert_eq!(pixel(&pixels, 23, i, 21), WHITE, "below {i}");
        assert_eq!(pixel(&pixels, 23, 0, i), WHITE, "left of {i}");
        assert_eq!(pixel(&pixels, 23, 21, i), WHITE, "right of {i}");
    }
    assert_eq!(pixel(&pixels, 23, 10, 10), WHITE);
}

#[test]
fn end_to_end_flipped_canvas() {
    let mut r = renderer(20, 20, 1);
    let flip = AffineTransform::canvas_to_screen(20.0, 20.0, 20, 20, true);
    let scene = Scene::new(20.0, 20.0)
        .with_canvas_to_screen(flip)
        .with_element(Element::line(
            Point::new(0.0, 2.0),
            Point::new(10.0, 2.0),
            Style::stroke(Color::BLACK),
        ));
    let pixels = r.render(&scene).unwrap();
    // Canvas y = 2 lands on screen row 18
    assert_ne!(pixel(&pixels, 20, 5, 18), WHITE);
    assert_eq!(pixel(&pixels, 20, 5, 17), WHITE);
    assert_eq!(pixel(&pixels, 20, 5, 2), WHITE);
    // The outline still reaches both horizontal edges
    assert_ne!(pixel(&pixels, 20, 5, 0), WHITE);
    assert_ne!(pixel(&pixels, 20, 5, 19), WHITE);
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_lines_never_panic(
        x0 in -1.0e6f32..1.0e6,
        y0 in -1.0e6f32..1.0e6,
        x1 in -1.0e6f32..1.0e6,
        y1 in -1.0e6f32..1.0e6,
        rate in 1u32..4,
    ) {
        let mut buf = SampleBuffer::new(16, 16, rate).unwrap();
        buf.clear(Color::WHITE);
        draw_line_aa(&mut buf, x0, y0, x1, y1, Color::BLACK, 1.0);
        prop_assert_eq!(buf.sample_count(), (16 * rate * 16 * rate) as usize);
    }

    #[test]
    fn prop_triangle_stays_in_bounding_box(
        ax in -20.0f32..40.0, ay in -20.0f32..40.0,
        bx in -20.0f32..40.0, by in -20.0f32..40.0,
        cx in -20.0f32..40.0, cy in -20.0f32..40.0,
    ) {
        let mut buf = SampleBuffer::new(20, 20, 2).unwrap();
        buf.clear(Color::TRANSPARENT);
        fill_triangle(
            &mut buf,
            Point::new(ax, ay),
            Point::new(bx, by),
            Point::new(cx, cy),
            Color::RED,
        );

        let (min_x, max_x) = (ax.min(bx).min(cx), ax.max(bx).max(cx));
        let (min_y, max_y) = (ay.min(by).min(cy), ay.max(by).max(cy));
        for sy in 0..buf.sample_height() {
            for sx in 0..buf.sample_width() {
                if buf.get_sample(sx, sy).unwrap().a > 0.0 {
                    let (x, y) = ((sx as f32 + 0.5) / 2.0, (sy as f32 + 0.5) / 2.0);
                    prop_assert!(x >= min_x && x <= max_x && y >= min_y && y <= max_y);
                }
            }
        }
    }

    #[test]
    fn prop_resolve_constant_color(
        r in 0u8..=255, g in 0u8..=255, b in 0u8..=255, a in 0u8..=255,
        rate in 1u32..5,
    ) {
        let c = Color::from(Rgba::new(r, g, b, a));
        let mut buf = SampleBuffer::new(3, 2, rate).unwrap();
        buf.clear(c);
        let mut out = vec![0u8; 3 * 2 * 4];
        resolve(&buf, &mut out).unwrap();
        for px in out.chunks_exact(4) {
            for (&got, want) in px.iter().zip([r, g, b, a]) {
                prop_assert!((i16::from(got) - i16::from(want)).abs() <= 1);
            }
        }
    }

    #[test]
    fn prop_render_always_fills_target(
        w in 1u32..24, h in 1u32..24, rate in 1u32..4,
        x in -10.0f32..30.0, y in -10.0f32..30.0,
    ) {
        let mut renderer = SoftwareRenderer::new(
            RendererConfig::new(w, h).with_sample_rate(rate),
        ).unwrap();
        let scene = Scene::new(w as f32, h as f32)
            .with_element(Element::ellipse(Point::new(x, y), 5.0, 3.0, Style::fill(Color::BLUE)))
            .with_element(Element::line(Point::new(x, 0.0), Point::new(0.0, y), Style::stroke(Color::BLACK)));
        let pixels = renderer.render(&scene).unwrap();
        prop_assert_eq!(pixels.len(), (w * h * 4) as usize);
    }
}
