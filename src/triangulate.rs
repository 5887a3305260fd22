//! Polygon triangulation.
//!
//! The rasterizer fills polygons through the [`Triangulator`] trait. The
//! crate ships [`LyonTriangulator`] as the default; callers with their own
//! tessellator can plug it in via
//! [`SoftwareRenderer::with_triangulator`](crate::renderer::SoftwareRenderer::with_triangulator).

use lyon_tessellation::math::point;
use lyon_tessellation::path::Path;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};

use crate::geometry::{signed_area2, Point};

/// Turns a simple polygon into triangles.
pub trait Triangulator: Send + Sync {
    /// Triangulate `polygon` (object space, implicitly closed).
    ///
    /// The result is a flat list whose length is a multiple of 3; each
    /// consecutive triple is one triangle. Behavior for self-intersecting
    /// input is up to the implementation.
    fn triangulate(&self, polygon: &[Point]) -> Vec<Point>;
}

/// Polygon fill tessellation backed by lyon's sweep-line `FillTessellator`.
///
/// Either winding is accepted. Self-intersecting input is filled with the
/// non-zero rule, with intersection points inserted as new vertices.
/// Polygons with fewer than three distinct points, non-finite coordinates
/// or no area produce nothing.
#[derive(Debug, Clone, Copy)]
pub struct LyonTriangulator {
    options: FillOptions,
}

impl LyonTriangulator {
    /// Non-zero fill rule with lyon's default tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: FillOptions::default().with_fill_rule(FillRule::NonZero),
        }
    }
}

impl Default for LyonTriangulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Triangulator for LyonTriangulator {
    fn triangulate(&self, polygon: &[Point]) -> Vec<Point> {
        if polygon.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Vec::new();
        }

        let mut pts: Vec<Point> = Vec::with_capacity(polygon.len());
        for &p in polygon {
            if pts.last() != Some(&p) {
                pts.push(p);
            }
        }
        while pts.len() > 1 && pts.first() == pts.last() {
            pts.pop();
        }
        if pts.len() < 3 || signed_area2(&pts).abs() < f32::EPSILON {
            return Vec::new();
        }

        let mut builder = Path::builder();
        builder.begin(point(pts[0].x, pts[0].y));
        for p in &pts[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
        let path = builder.build();

        let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
        let result = FillTessellator::new().tessellate_path(
            &path,
            &self.options,
            &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
                let p = vertex.position();
                Point::new(p.x, p.y)
            }),
        );
        if let Err(err) = result {
            log::warn!(
                "polygon tessellation failed for {} vertices: {:?}",
                pts.len(),
                err
            );
            return Vec::new();
        }

        buffers
            .indices
            .iter()
            .map(|&i| buffers.vertices[i as usize])
            .collect()
    }
}
