//! Rasterization algorithms and the supersample resolve.
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: Smooth line rendering with sub-pixel accuracy
//! - **Edge-function Triangle Fill**: Per-sample inside test over the bounding box
//! - **Image Blit**: Inverse-mapped texture resampling (nearest or bilinear)
//! - **Box-filter Resolve**: Supersample averaging into 8-bit RGBA
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Pineda, J. (1988). "A Parallel Algorithm for Polygon Rasterization." SIGGRAPH '88.

mod primitives;
mod resolve;

pub use primitives::{blit_image, draw_line_aa, fill_triangle, plot_point};
pub use resolve::resolve;
