//! Geometric transformation: canvas resize, projective warp and crop.
//!
//! # Transform Order
//!
//! A projection request runs these steps in order:
//! 1. Resize to the canvas size (aspect ratio is not preserved)
//! 2. Projective warp with a windowed-sinc resampler
//! 3. Crop to the canvas when the warp grew BOTH dimensions past it
//!
//! Steps 2 and 3 run fused: the crop region is known from the projected
//! bounds, so only the surviving pixels are rendered.
//!
//! # Coordinate System
//!
//! - Pixel (x, y) is addressed by its integer index, origin at top-left
//! - Matrices use the row-vector convention, see [`TransformMatrix`]

mod canvas;
mod crop;
mod matrix;
mod projection;
mod resize;

use thiserror::Error;

pub use canvas::{transform_to_canvas, CanvasSize};
pub use crop::{canvas_region, crop};
pub use matrix::{MatrixParseError, Projective, TransformMatrix, MATRIX_FIELDS};
pub use projection::{
    apply_projection, apply_projection_clipped, compute_projected_bounds, InterpolationFilter,
    MAX_CANVAS_DIMENSION,
};
pub use resize::resize;

/// Errors from geometric operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The projective part of the matrix cannot be inverted.
    #[error("Transform matrix is degenerate and cannot be inverted")]
    Degenerate,

    /// The warped canvas would exceed the supported size.
    #[error("Transformed canvas {width}x{height} exceeds the maximum of {max} per side")]
    CanvasTooLarge { width: i64, height: i64, max: u32 },

    /// Source or target dimensions are zero, or the buffer does not match them.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}
