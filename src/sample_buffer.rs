//! Supersampled render surface.
//!
//! Every scan converter writes here. The buffer stores `sample_rate²`
//! normalized RGBA samples per output pixel in row-major order; the
//! [`resolve`](crate::render::resolve) pass box-filters it down to the
//! caller's byte buffer.

use crate::color::Color;
use crate::config::Compositing;
use crate::error::{Error, Result};
use trueno::Backend;

/// Number of pixels in the repeating pattern used by [`SampleBuffer::clear`].
const CLEAR_PATTERN_PIXELS: usize = 16;

/// Float RGBA sample grid at `sample_rate` times the output resolution.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    /// Output width in pixels.
    width: u32,
    /// Output height in pixels.
    height: u32,
    /// Samples per pixel along each axis.
    sample_rate: u32,
    /// RGBA samples, 4 floats each, row-major over the sample grid.
    samples: Vec<f32>,
    /// How writes combine with existing samples.
    compositing: Compositing,
}

impl SampleBuffer {
    /// Allocate a sample buffer for a `width × height` output at `sample_rate`.
    ///
    /// Samples start fully transparent; callers clear before drawing.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension or the sample rate is zero, or if the
    /// sample grid cannot be allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_raster::sample_buffer::SampleBuffer;
    ///
    /// let buf = SampleBuffer::new(80, 60, 2).unwrap();
    /// assert_eq!(buf.sample_width(), 160);
    /// assert_eq!(buf.sample_height(), 120);
    /// ```
    pub fn new(width: u32, height: u32, sample_rate: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if sample_rate == 0 {
            return Err(Error::InvalidSampleRate(sample_rate));
        }

        // Sample coordinates are u32, so each axis must fit on its own.
        let count = width
            .checked_mul(sample_rate)
            .zip(height.checked_mul(sample_rate))
            .and_then(|(sw, sh)| (sw as usize).checked_mul(sh as usize))
            .ok_or(Error::Allocation { samples: usize::MAX })?;
        let floats = count
            .checked_mul(4)
            .ok_or(Error::Allocation { samples: count })?;

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(floats)
            .map_err(|_| Error::Allocation { samples: count })?;
        samples.resize(floats, 0.0);

        log::debug!(
            "allocated sample buffer {}x{} @ {}x ({} samples, backend {:?})",
            width,
            height,
            sample_rate,
            count,
            Self::backend()
        );

        Ok(Self {
            width,
            height,
            sample_rate,
            samples,
            compositing: Compositing::default(),
        })
    }

    /// Output width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel along each axis.
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Width of the sample grid.
    #[must_use]
    pub const fn sample_width(&self) -> u32 {
        self.width * self.sample_rate
    }

    /// Height of the sample grid.
    #[must_use]
    pub const fn sample_height(&self) -> u32 {
        self.height * self.sample_rate
    }

    /// Total number of samples.
    #[must_use]
    pub const fn sample_count(&self) -> usize {
        (self.sample_width() as usize) * (self.sample_height() as usize)
    }

    /// Current compositing mode.
    #[must_use]
    pub const fn compositing(&self) -> Compositing {
        self.compositing
    }

    /// Change the compositing mode for subsequent writes.
    pub fn set_compositing(&mut self, compositing: Compositing) {
        self.compositing = compositing;
    }

    /// Raw sample data, 4 floats per sample.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// One row of the sample grid as a float slice.
    #[must_use]
    pub fn row(&self, sy: u32) -> Option<&[f32]> {
        if sy >= self.sample_height() {
            return None;
        }
        let stride = self.sample_width() as usize * 4;
        let start = sy as usize * stride;
        Some(&self.samples[start..start + stride])
    }

    /// Clear every sample to `color`.
    ///
    /// Fills through a 16-sample pattern so the copy loop stays
    /// auto-vectorizable.
    pub fn clear(&mut self, color: Color) {
        let px = color.to_array();
        let pattern: [f32; CLEAR_PATTERN_PIXELS * 4] = {
            let mut p = [0.0f32; CLEAR_PATTERN_PIXELS * 4];
            for chunk in p.chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
            p
        };

        let mut chunks = self.samples.chunks_exact_mut(pattern.len());
        for chunk in &mut chunks {
            chunk.copy_from_slice(&pattern);
        }
        for chunk in chunks.into_remainder().chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Read one sample.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_sample(&self, sx: u32, sy: u32) -> Option<Color> {
        if sx >= self.sample_width() || sy >= self.sample_height() {
            return None;
        }
        let idx = self.sample_index(sx, sy);
        Some(Color::new(
            self.samples[idx],
            self.samples[idx + 1],
            self.samples[idx + 2],
            self.samples[idx + 3],
        ))
    }

    /// Write one sample using the active compositing mode.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn write_sample(&mut self, sx: u32, sy: u32, color: Color) {
        if sx >= self.sample_width() || sy >= self.sample_height() {
            return;
        }
        let idx = self.sample_index(sx, sy);
        let out = match self.compositing {
            Compositing::Replace => color,
            Compositing::SourceOver => {
                let dst = Color::new(
                    self.samples[idx],
                    self.samples[idx + 1],
                    self.samples[idx + 2],
                    self.samples[idx + 3],
                );
                color.over(dst)
            }
        };
        self.samples[idx..idx + 4].copy_from_slice(&out.to_array());
    }

    /// Write every sample of output pixel `(x, y)`.
    ///
    /// Coordinates are in device pixels; negative or out-of-range pixels are
    /// dropped.
    pub fn write_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0
            || y < 0
            || i64::from(x) >= i64::from(self.width)
            || i64::from(y) >= i64::from(self.height)
        {
            return;
        }
        let rate = self.sample_rate;
        let (sx0, sy0) = (x as u32 * rate, y as u32 * rate);
        for sy in sy0..sy0 + rate {
            for sx in sx0..sx0 + rate {
                self.write_sample(sx, sy, color);
            }
        }
    }

    /// Average of the samples covering output pixel `(x, y)`.
    #[must_use]
    pub fn pixel_average(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let rate = self.sample_rate;
        let mut acc = [0.0f32; 4];
        for sy in y * rate..(y + 1) * rate {
            for sx in x * rate..(x + 1) * rate {
                let idx = self.sample_index(sx, sy);
                for (a, s) in acc.iter_mut().zip(&self.samples[idx..idx + 4]) {
                    *a += s;
                }
            }
        }
        let inv = 1.0 / (rate * rate) as f32;
        Some(Color::from_array(acc.map(|v| v * inv)))
    }

    /// Float index of a sample coordinate.
    #[inline]
    fn sample_index(&self, sx: u32, sy: u32) -> usize {
        ((sy as usize) * (self.sample_width() as usize) + sx as usize) * 4
    }

    /// Get the selected SIMD backend.
    #[must_use]
    pub fn backend() -> Backend {
        Backend::select_best()
    }
}
