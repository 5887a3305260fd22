//! # Trueno-Raster
//!
//! Supersampling CPU rasterizer for SVG-style vector scenes.
//!
//! A [`Scene`](scene::Scene) of points, lines, polylines, rectangles,
//! polygons, ellipses, images and nested groups is walked under an affine
//! transform stack, scan-converted into a supersampled float buffer, and
//! box-filtered down to caller-provided RGBA8 bytes. Row accumulation in the
//! resolve pass runs on [trueno](https://crates.io/crates/trueno) vectors.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_raster::prelude::*;
//!
//! let config = RendererConfig::new(64, 64).with_sample_rate(4);
//! let mut renderer = SoftwareRenderer::new(config)?;
//!
//! let scene = Scene::new(64.0, 64.0)
//!     .with_element(Element::rect(8.0, 8.0, 48.0, 24.0, Style::fill(Color::BLUE)))
//!     .with_element(Element::line(
//!         Point::new(0.0, 63.0),
//!         Point::new(63.0, 40.0),
//!         Style::stroke(Color::BLACK),
//!     ));
//!
//! let mut pixels = vec![0u8; 64 * 64 * 4];
//! renderer.draw(&scene, &mut pixels)?;
//! # Ok::<(), trueno_raster::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable parallel processing in trueno
//! - `serde`: Serialize/deserialize configuration, colors and styles
//!
//! ## Academic References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Pineda, J. (1988). "A Parallel Algorithm for Polygon Rasterization." SIGGRAPH '88.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and quantization.
pub mod color;

/// Points and orientation predicates.
pub mod geometry;

/// Affine transforms and the transform stack.
pub mod transform;

/// Renderer configuration.
pub mod config;

// ============================================================================
// Scene Model
// ============================================================================

/// Scene tree: elements, styles and groups.
pub mod scene;

/// Decoded images for the image primitive.
pub mod texture;

/// Polygon triangulation.
pub mod triangulate;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Supersampled render surface.
pub mod sample_buffer;

/// Scan converters and the supersample resolve.
pub mod render;

/// Renderer context.
pub mod renderer;

mod walker;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Color, Rgba};
    pub use crate::config::{Compositing, ImageFilter, RendererConfig};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::Point;
    pub use crate::renderer::SoftwareRenderer;
    pub use crate::sample_buffer::SampleBuffer;
    pub use crate::scene::{Element, ElementKind, Scene, Style};
    pub use crate::texture::Texture;
    pub use crate::transform::{AffineTransform, TransformStack};
    pub use crate::triangulate::{LyonTriangulator, Triangulator};
}
