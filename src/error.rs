//! Error types for trueno-raster operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the rasterizer.
///
/// Per-pixel work never fails: out-of-range writes are dropped and
/// degenerate geometry draws nothing. Only setup and allocation surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid dimensions for a render target or texture.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Supersampling rate must be at least 1.
    #[error("Invalid sample rate: {0} (must be >= 1)")]
    InvalidSampleRate(u32),

    /// The sample buffer could not be allocated.
    #[error("Failed to allocate sample buffer of {samples} samples")]
    Allocation {
        /// Number of samples requested.
        samples: usize,
    },

    /// The caller's output slice does not hold exactly width * height * 4 bytes.
    #[error("Render target size mismatch: expected {expected} bytes, got {actual}")]
    TargetSizeMismatch {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Texture byte buffer does not match its declared dimensions.
    #[error("Texture size mismatch: expected {expected} bytes, got {actual}")]
    TextureSizeMismatch {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },
}
