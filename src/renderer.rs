//! Renderer context.
//!
//! [`SoftwareRenderer`] owns the sample buffer and configuration for one
//! render target. Instances are independent; nothing is shared globally.

use std::fmt;

use crate::color::Color;
use crate::config::{Compositing, ImageFilter, RendererConfig};
use crate::error::{Error, Result};
use crate::render::resolve;
use crate::sample_buffer::SampleBuffer;
use crate::scene::Scene;
use crate::transform::TransformStack;
use crate::triangulate::{LyonTriangulator, Triangulator};
use crate::walker::{draw_scene, Painter};

/// CPU rasterizer for [`Scene`]s.
///
/// # Example
///
/// ```
/// use trueno_raster::prelude::*;
///
/// let mut renderer = SoftwareRenderer::new(RendererConfig::new(32, 32).with_sample_rate(2)).unwrap();
/// let scene = Scene::new(32.0, 32.0)
///     .with_element(Element::rect(4.0, 4.0, 8.0, 8.0, Style::fill(Color::RED)));
///
/// let pixels = renderer.render(&scene).unwrap();
/// assert_eq!(pixels.len(), 32 * 32 * 4);
/// ```
pub struct SoftwareRenderer {
    config: RendererConfig,
    buffer: SampleBuffer,
    transforms: TransformStack,
    triangulator: Box<dyn Triangulator>,
}

impl fmt::Debug for SoftwareRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftwareRenderer")
            .field("config", &self.config)
            .field("sample_count", &self.buffer.sample_count())
            .finish_non_exhaustive()
    }
}

impl SoftwareRenderer {
    /// Create a renderer with the default [`LyonTriangulator`] triangulator.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the sample buffer
    /// cannot be allocated.
    pub fn new(config: RendererConfig) -> Result<Self> {
        Self::with_triangulator(config, Box::new(LyonTriangulator::new()))
    }

    /// Create a renderer that fills polygons with `triangulator`.
    ///
    /// # Errors
    ///
    /// Same as [`SoftwareRenderer::new`].
    pub fn with_triangulator(
        config: RendererConfig,
        triangulator: Box<dyn Triangulator>,
    ) -> Result<Self> {
        config.validate()?;
        let mut buffer = SampleBuffer::new(config.width, config.height, config.sample_rate)?;
        buffer.set_compositing(config.compositing);
        Ok(Self {
            config,
            buffer,
            transforms: TransformStack::default(),
            triangulator,
        })
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// The sample buffer as of the last draw.
    #[must_use]
    pub const fn sample_buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Change the supersampling rate and reallocate the sample buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if `sample_rate` is zero or the new buffer cannot be
    /// allocated. The renderer keeps its previous buffer and rate on error.
    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<()> {
        self.reallocate(self.config.width, self.config.height, sample_rate)
    }

    /// Change the output size and reallocate the sample buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or the new buffer cannot be
    /// allocated. The renderer keeps its previous buffer and size on error.
    pub fn set_target_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.reallocate(width, height, self.config.sample_rate)
    }

    /// Color the buffer is cleared to before each draw.
    pub fn set_background(&mut self, background: Color) {
        self.config.background = background;
    }

    /// Sample write mode for subsequent draws.
    pub fn set_compositing(&mut self, compositing: Compositing) {
        self.config.compositing = compositing;
        self.buffer.set_compositing(compositing);
    }

    /// Texture filter for subsequent image blits.
    pub fn set_image_filter(&mut self, image_filter: ImageFilter) {
        self.config.image_filter = image_filter;
    }

    fn reallocate(&mut self, width: u32, height: u32, sample_rate: u32) -> Result<()> {
        let mut buffer = SampleBuffer::new(width, height, sample_rate)?;
        buffer.set_compositing(self.config.compositing);

        log::debug!(
            "sample buffer reconfigured: {}x{} @ {}x -> {}x{} @ {}x",
            self.config.width,
            self.config.height,
            self.config.sample_rate,
            width,
            height,
            sample_rate
        );

        self.buffer = buffer;
        self.config.width = width;
        self.config.height = height;
        self.config.sample_rate = sample_rate;
        Ok(())
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Rasterize `scene` into `target`.
    ///
    /// `target` is row-major RGBA8 with a top-left origin and must hold
    /// exactly `width * height * 4` bytes. The sample buffer is cleared to the
    /// background, every element is drawn in order, the canvas outline is
    /// added, and the result is resolved into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TargetSizeMismatch`] before drawing anything if
    /// `target` has the wrong length.
    pub fn draw(&mut self, scene: &Scene, target: &mut [u8]) -> Result<()> {
        let expected = self.config.target_len();
        if target.len() != expected {
            return Err(Error::TargetSizeMismatch {
                expected,
                actual: target.len(),
            });
        }

        self.buffer.clear(self.config.background);
        self.buffer.set_compositing(self.config.compositing);

        let mut painter = Painter {
            buffer: &mut self.buffer,
            triangulator: self.triangulator.as_ref(),
            image_filter: self.config.image_filter,
        };
        draw_scene(&mut painter, &mut self.transforms, scene);

        log::trace!(
            "drew {} elements into {}x{} @ {}x",
            scene.element_count(),
            self.config.width,
            self.config.height,
            self.config.sample_rate
        );

        resolve(&self.buffer, target)
    }

    /// Rasterize `scene` into a freshly allocated RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`SoftwareRenderer::draw`].
    pub fn render(&mut self, scene: &Scene) -> Result<Vec<u8>> {
        let mut target = vec![0u8; self.config.target_len()];
        self.draw(scene, &mut target)?;
        Ok(target)
    }
}
