//! Color types.
//!
//! [`Color`] is the normalized floating-point color the rasterizer works in.
//! [`Rgba`] is the packed 8-bit form used for texture texels and for the
//! bytes written to the render target.

/// RGBA color with normalized floating-point components in `[0, 1]`.
///
/// Alpha of zero means "do not draw": drawers skip fills and strokes whose
/// color is fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component (1.0 = fully opaque).
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a new color.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha = 1.0).
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Scale alpha by a coverage factor (used by anti-aliased plots).
    #[must_use]
    pub fn with_coverage(self, coverage: f32) -> Self {
        self.with_alpha(self.a * coverage.clamp(0.0, 1.0))
    }

    /// Whether this color would draw nothing.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [f32; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Source-over compositing of `self` on top of `dst`.
    ///
    /// Color channels use `src * a + dst * (1 - a)`; alpha accumulates as
    /// `a + dst_a * (1 - a)`.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let a = self.a.clamp(0.0, 1.0);
        let inv = 1.0 - a;
        Self::new(
            self.r * a + dst.r * inv,
            self.g * a + dst.g * inv,
            self.b * a + dst.b * inv,
            a + dst.a * inv,
        )
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);

        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Quantize to 8 bits per channel (round to nearest, saturating).
    #[must_use]
    pub fn to_rgba8(self) -> Rgba {
        Rgba::new(
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        )
    }
}

/// Convert a normalized channel to a byte with round-to-nearest and saturation.
#[inline]
pub(crate) fn quantize(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Self::new(
            f32::from(c.r) / 255.0,
            f32::from(c.g) / 255.0,
            f32::from(c.b) / 255.0,
            f32::from(c.a) / 255.0,
        )
    }
}

impl From<Color> for Rgba {
    fn from(c: Color) -> Self {
        c.to_rgba8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_color_constants() {
        assert_eq!(Color::BLACK, Color::rgb(0.0, 0.0, 0.0));
        assert_eq!(Color::WHITE.to_rgba8(), Rgba::WHITE);
        assert!(Color::TRANSPARENT.is_transparent());
        assert!(!Color::RED.is_transparent());
    }

    #[test]
    fn test_quantize_rounds_to_nearest() {
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(0.499), 127);
        assert_eq!(quantize(1.0 / 255.0), 1);
    }

    #[test]
    fn test_quantize_saturates() {
        assert_eq!(quantize(-0.3), 0);
        assert_eq!(quantize(1.7), 255);
        assert_eq!(quantize(f32::NAN), 0);
    }

    #[test]
    fn test_with_coverage() {
        let c = Color::new(1.0, 0.0, 0.0, 0.5).with_coverage(0.5);
        assert_relative_eq!(c.a, 0.25);
        assert_relative_eq!(c.r, 1.0);

        // Coverage outside [0, 1] is clamped
        assert_relative_eq!(Color::RED.with_coverage(2.0).a, 1.0);
    }

    #[test]
    fn test_over_opaque_replaces() {
        let out = Color::RED.over(Color::WHITE);
        assert_eq!(out, Color::RED);
    }

    #[test]
    fn test_over_half_alpha() {
        let out = Color::BLACK.with_alpha(0.5).over(Color::WHITE);
        assert_relative_eq!(out.r, 0.5);
        assert_relative_eq!(out.g, 0.5);
        assert_relative_eq!(out.a, 1.0);
    }

    #[test]
    fn test_over_transparent_keeps_dst() {
        let dst = Color::new(0.2, 0.4, 0.6, 1.0);
        assert_eq!(Color::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn test_lerp_boundaries() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_relative_eq!(mid.r, 0.5);

        assert_eq!(Color::BLACK.lerp(Color::WHITE, -1.0), Color::BLACK);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 2.0), Color::WHITE);
    }

    #[test]
    fn test_rgba_conversion_round_trip() {
        let packed = Rgba::new(10, 20, 30, 40);
        let back: Rgba = Color::from(packed).into();
        assert_eq!(back, packed);
        assert_eq!(Rgba::from_array(packed.to_array()), packed);
    }
}
