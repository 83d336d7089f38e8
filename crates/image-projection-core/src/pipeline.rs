//! End-to-end request pipelines: base64 in, base64 PNG out.
//!
//! Both pipelines are synchronous and own every buffer they touch, so
//! callers can run them on any worker thread.

use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::adjustments::{apply_brightness, parse_brightness_factor, BrightnessParseError};
use crate::decode::{apply_orientation, decode_image, DecodeError};
use crate::encode::{encode_png_base64, EncodeError};
use crate::transform::{
    transform_to_canvas, CanvasSize, InterpolationFilter, MatrixParseError, TransformError,
    TransformMatrix,
};
use crate::transport::decode_base64;

/// Any failure of a single pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Matrix(#[from] MatrixParseError),

    #[error(transparent)]
    Brightness(#[from] BrightnessParseError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl PipelineError {
    /// Whether the failure was caused by the request payload.
    ///
    /// Encoding runs on pixels this crate produced, so its failures are
    /// internal; everything else traces back to client input.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PipelineError::Encode(_))
    }
}

/// Decode, orient, warp onto the default A4 canvas, and re-encode.
pub fn process_projection(
    image_data: &str,
    transform_matrix: &str,
) -> Result<String, PipelineError> {
    process_projection_with_canvas(image_data, transform_matrix, CanvasSize::default())
}

/// [`process_projection`] with an explicit canvas size.
pub fn process_projection_with_canvas(
    image_data: &str,
    transform_matrix: &str,
    canvas: CanvasSize,
) -> Result<String, PipelineError> {
    let started = Instant::now();

    // Cheap checks first: a bad matrix never pays for a decode.
    let matrix: TransformMatrix = transform_matrix.parse()?;
    let bytes = decode_base64(image_data)?;
    let decoded = decode_image(&bytes)?;
    let oriented = apply_orientation(decoded);
    let warped = transform_to_canvas(&oriented, &matrix, canvas, InterpolationFilter::Welch)?;
    let encoded = encode_png_base64(&warped)?;

    debug!(
        width = warped.width,
        height = warped.height,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "projection pipeline finished"
    );
    Ok(encoded)
}

/// Decode, scale color channels by the factor, and re-encode.
///
/// No orientation or geometry step runs on this path.
pub fn process_brightness(
    image_data: &str,
    brightness_factor: &str,
) -> Result<String, PipelineError> {
    let started = Instant::now();

    let factor = parse_brightness_factor(brightness_factor)?;
    let bytes = decode_base64(image_data)?;
    let mut image = decode_image(&bytes)?;
    apply_brightness(&mut image.pixels, factor);
    let encoded = encode_png_base64(&image)?;

    debug!(
        factor,
        width = image.width,
        height = image.height,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "brightness pipeline finished"
    );
    Ok(encoded)
}
