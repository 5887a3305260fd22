//! Renderer configuration.

use crate::color::Color;
use crate::error::{Error, Result};

/// How scan converters write into the sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compositing {
    /// Overwrite the destination sample with the source color, whose alpha
    /// carries the coverage. Overlapping translucent primitives do not mix.
    #[default]
    Replace,
    /// Source-over blending: `dst = src * a + dst * (1 - a)`.
    SourceOver,
}

/// Texture resampling filter used by image blits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageFilter {
    /// Nearest texel.
    Nearest,
    /// Bilinear interpolation of the four surrounding texels.
    #[default]
    Bilinear,
}

/// Configuration for a [`SoftwareRenderer`](crate::renderer::SoftwareRenderer).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RendererConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Samples per pixel along each axis.
    pub sample_rate: u32,
    /// Color the sample buffer is cleared to before each draw.
    pub background: Color,
    /// Sample write mode.
    pub compositing: Compositing,
    /// Image resampling filter.
    pub image_filter: ImageFilter,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            sample_rate: 1,
            background: Color::WHITE,
            compositing: Compositing::default(),
            image_filter: ImageFilter::default(),
        }
    }
}

impl RendererConfig {
    /// Configuration for a `width × height` target with default settings.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the supersampling rate.
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the compositing mode.
    #[must_use]
    pub fn with_compositing(mut self, compositing: Compositing) -> Self {
        self.compositing = compositing;
        self
    }

    /// Set the image filter.
    #[must_use]
    pub fn with_image_filter(mut self, image_filter: ImageFilter) -> Self {
        self.image_filter = image_filter;
        self
    }

    /// Check dimensions and sample rate.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.sample_rate == 0 {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        Ok(())
    }

    /// Number of bytes the render target must hold.
    #[must_use]
    pub fn target_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}
