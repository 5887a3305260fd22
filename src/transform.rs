//! Affine transforms and the traversal transform stack.
//!
//! Transforms are 3×3 matrices acting on column vectors `[x, y, 1]`. The
//! product `a * b` applies `b` first, so a stack push computes
//! `current * local` and object-space points land in screen space after
//! passing through every ancestor from the leaf up to the root.

use crate::geometry::Point;
use std::ops::Mul;

/// A 2D affine transform stored as a row-major 3×3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineTransform {
    m: [[f32; 3]; 3],
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// The identity transform.
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build a transform from explicit matrix rows.
    #[must_use]
    pub const fn from_rows(m: [[f32; 3]; 3]) -> Self {
        Self { m }
    }

    /// Translation by `(tx, ty)`.
    #[must_use]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self::from_rows([[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]])
    }

    /// Non-uniform scale about the origin.
    #[must_use]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::from_rows([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation about the origin. `angle` is in radians.
    #[must_use]
    pub fn rotate(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Compose so that `self` is applied first and `next` second.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        next * self
    }

    /// Map a point through this transform.
    ///
    /// The homogeneous divide is only performed when the bottom row is not
    /// the affine `[0, 0, 1]`; a zero `w` leaves the point undivided.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        let m = &self.m;
        let x = m[0][0] * p.x + m[0][1] * p.y + m[0][2];
        let y = m[1][0] * p.x + m[1][1] * p.y + m[1][2];
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        if w == 1.0 || w == 0.0 {
            Point::new(x, y)
        } else {
            Point::new(x / w, y / w)
        }
    }

    /// Determinant of the linear 2×2 part.
    #[must_use]
    pub fn determinant(&self) -> f32 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    /// Inverse of an affine transform, or `None` when it is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < f32::EPSILON {
            return None;
        }
        let [[a, b, tx], [c, d, ty], _] = self.m;
        let inv_det = 1.0 / det;
        let ia = d * inv_det;
        let ib = -b * inv_det;
        let ic = -c * inv_det;
        let id = a * inv_det;
        Some(Self::from_rows([
            [ia, ib, -(ia * tx + ib * ty)],
            [ic, id, -(ic * tx + id * ty)],
            [0.0, 0.0, 1.0],
        ]))
    }

    /// Fit a `canvas_width × canvas_height` canvas into a render target,
    /// preserving aspect ratio and centering the result.
    ///
    /// With `flip_y`, canvas y grows upwards (origin bottom-left on screen).
    /// Non-positive canvas dimensions yield the identity.
    #[must_use]
    pub fn canvas_to_screen(
        canvas_width: f32,
        canvas_height: f32,
        target_width: u32,
        target_height: u32,
        flip_y: bool,
    ) -> Self {
        if canvas_width <= 0.0 || canvas_height <= 0.0 {
            return Self::IDENTITY;
        }
        let tw = target_width as f32;
        let th = target_height as f32;
        let s = (tw / canvas_width).min(th / canvas_height);
        let ox = (tw - canvas_width * s) / 2.0;
        let oy = (th - canvas_height * s) / 2.0;

        if flip_y {
            Self::translate(ox, oy + canvas_height * s) * Self::scale(s, -s)
        } else {
            Self::translate(ox, oy) * Self::scale(s, s)
        }
    }
}

impl Mul for AffineTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0f32; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Self { m: out }
    }
}

impl Mul<Point> for AffineTransform {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        self.apply(rhs)
    }
}

/// Stack of object-to-screen transforms maintained during scene traversal.
///
/// The bottom entry is the root (canvas-to-screen) transform and can never be
/// popped.
#[derive(Debug, Clone)]
pub struct TransformStack {
    stack: Vec<AffineTransform>,
}

impl TransformStack {
    /// Create a stack whose root is `root`.
    #[must_use]
    pub fn new(root: AffineTransform) -> Self {
        Self { stack: vec![root] }
    }

    /// The transform currently in effect.
    #[must_use]
    pub fn current(&self) -> AffineTransform {
        // The root entry is never removed.
        self.stack.last().copied().unwrap_or_default()
    }

    /// Number of pushed scopes above the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Enter a scope: `current = current * delta`.
    pub fn push(&mut self, delta: AffineTransform) {
        let next = self.current() * delta;
        self.stack.push(next);
    }

    /// Leave the innermost scope, returning its transform.
    ///
    /// Returns `None` (and leaves the root in place) when no scope is open.
    pub fn pop(&mut self) -> Option<AffineTransform> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Run `f` with `delta` pushed, restoring the prior transform afterwards.
    pub fn scoped<R>(&mut self, delta: AffineTransform, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push(delta);
        let out = f(self);
        self.pop();
        out
    }

    /// Map an object-space point to screen space with the current transform.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        self.current().apply(p)
    }

    /// Reset to a single root transform.
    pub fn reset(&mut self, root: AffineTransform) {
        self.stack.clear();
        self.stack.push(root);
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new(AffineTransform::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_point(p: Point, x: f32, y: f32) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-4);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-4);
    }

    #[test]
    fn test_identity_default() {
        assert_eq!(AffineTransform::default(), AffineTransform::IDENTITY);
        assert_point(AffineTransform::identity().apply(Point::new(3.0, 4.0)), 3.0, 4.0);
    }

    #[test]
    fn test_translate_scale_order() {
        // translate * scale: scale applied first
        let t = AffineTransform::translate(10.0, 0.0) * AffineTransform::scale(2.0, 2.0);
        assert_point(t * Point::new(1.0, 1.0), 12.0, 2.0);

        let then = AffineTransform::scale(2.0, 2.0).then(AffineTransform::translate(10.0, 0.0));
        assert_eq!(then, t);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let r = AffineTransform::rotate(std::f32::consts::FRAC_PI_2);
        assert_point(r.apply(Point::new(1.0, 0.0)), 0.0, 1.0);
    }

    #[test]
    fn test_inverse() {
        let t = AffineTransform::translate(5.0, -3.0)
            * AffineTransform::rotate(0.7)
            * AffineTransform::scale(2.0, 0.5);
        let inv = t.inverse().unwrap();
        let p = Point::new(7.0, 11.0);
        let back = inv.apply(t.apply(p));
        assert_point(back, 7.0, 11.0);

        assert!(AffineTransform::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn test_canvas_to_screen_fit() {
        let t = AffineTransform::canvas_to_screen(10.0, 10.0, 100, 50, false);
        // scale 5, centered horizontally: offset 25
        assert_point(t.apply(Point::ORIGIN), 25.0, 0.0);
        assert_point(t.apply(Point::new(10.0, 10.0)), 75.0, 50.0);
    }

    #[test]
    fn test_canvas_to_screen_flip() {
        let t = AffineTransform::canvas_to_screen(20.0, 20.0, 20, 20, true);
        assert_point(t.apply(Point::ORIGIN), 0.0, 20.0);
        assert_point(t.apply(Point::new(0.0, 20.0)), 0.0, 0.0);
    }

    #[test]
    fn test_canvas_to_screen_degenerate() {
        let t = AffineTransform::canvas_to_screen(0.0, 10.0, 100, 100, false);
        assert_eq!(t, AffineTransform::IDENTITY);
    }

    #[test]
    fn test_stack_push_pop() {
        let mut stack = TransformStack::new(AffineTransform::scale(2.0, 2.0));
        stack.push(AffineTransform::translate(1.0, 0.0));
        assert_eq!(stack.depth(), 1);
        // root applied last: (0 + 1) * 2
        assert_point(stack.apply(Point::ORIGIN), 2.0, 0.0);

        stack.pop();
        assert_point(stack.apply(Point::new(1.0, 1.0)), 2.0, 2.0);

        // Root can never be popped
        assert!(stack.pop().is_none());
        assert_eq!(stack.current(), AffineTransform::scale(2.0, 2.0));
    }

    #[test]
    fn test_stack_scoped_restores() {
        let root = AffineTransform::translate(3.0, 3.0);
        let mut stack = TransformStack::new(root);

        let inner = stack.scoped(AffineTransform::scale(2.0, 2.0), |s| {
            s.scoped(AffineTransform::translate(1.0, 1.0), |s| s.apply(Point::ORIGIN))
        });
        assert_point(inner, 5.0, 5.0);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current(), root);
    }

    #[test]
    fn test_stack_reset() {
        let mut stack = TransformStack::new(AffineTransform::IDENTITY);
        stack.push(AffineTransform::scale(3.0, 3.0));
        stack.reset(AffineTransform::translate(1.0, 2.0));
        assert_eq!(stack.depth(), 0);
        assert_point(stack.apply(Point::ORIGIN), 1.0, 2.0);
    }
}
