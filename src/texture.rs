//! In-memory textures for image elements.
//!
//! Decoding happens elsewhere; a texture arrives as raw 8-bit RGBA or ARGB
//! bytes plus its dimensions and is stored internally as RGBA.

use crate::color::{Color, Rgba};
use crate::config::ImageFilter;
use crate::error::{Error, Result};

/// A decoded image, row-major with a top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Rgba>,
}

impl Texture {
    /// Create a texture from tightly packed RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or `bytes` is not exactly
    /// `width * height * 4` long.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(width, height, bytes, |c| Rgba::new(c[0], c[1], c[2], c[3]))
    }

    /// Create a texture from tightly packed ARGB bytes.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Texture::from_rgba8`].
    pub fn from_argb8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(width, height, bytes, |c| Rgba::new(c[1], c[2], c[3], c[0]))
    }

    /// Create a texture by evaluating `f(x, y)` for every texel.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let texels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    fn from_bytes(
        width: u32,
        height: u32,
        bytes: &[u8],
        decode: impl Fn(&[u8]) -> Rgba,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(Error::TextureSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels: bytes.chunks_exact(4).map(decode).collect(),
        })
    }

    /// Width in texels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Texel at integer coordinates, clamped to the edge.
    #[must_use]
    pub fn texel(&self, x: i64, y: i64) -> Rgba {
        let x = x.clamp(0, i64::from(self.width) - 1) as usize;
        let y = y.clamp(0, i64::from(self.height) - 1) as usize;
        self.texels[y * self.width as usize + x]
    }

    /// Sample at normalized `(u, v)` with the given filter.
    #[must_use]
    pub fn sample(&self, u: f32, v: f32, filter: ImageFilter) -> Color {
        match filter {
            ImageFilter::Nearest => self.sample_nearest(u, v),
            ImageFilter::Bilinear => self.sample_bilinear(u, v),
        }
    }

    /// Nearest-texel lookup.
    #[must_use]
    pub fn sample_nearest(&self, u: f32, v: f32) -> Color {
        let x = (u * self.width as f32).floor() as i64;
        let y = (v * self.height as f32).floor() as i64;
        self.texel(x, y).into()
    }

    /// Bilinear interpolation between the four texels around `(u, v)`.
    ///
    /// Texel centers sit at `(i + 0.5) / width`.
    #[must_use]
    pub fn sample_bilinear(&self, u: f32, v: f32) -> Color {
        let tx = u * self.width as f32 - 0.5;
        let ty = v * self.height as f32 - 0.5;
        let x0 = tx.floor();
        let y0 = ty.floor();
        let fx = tx - x0;
        let fy = ty - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let c00: Color = self.texel(x0, y0).into();
        let c10: Color = self.texel(x0 + 1, y0).into();
        let c01: Color = self.texel(x0, y0 + 1).into();
        let c11: Color = self.texel(x0 + 1, y0 + 1).into();

        c00.lerp(c10, fx).lerp(c01.lerp(c11, fx), fy)
    }
}
