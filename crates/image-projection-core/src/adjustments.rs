//! Brightness adjustment.
//!
//! Brightness is a plain multiplier on the color channels:
//! `output = clamp(round(input * factor), 0, 255)`. Alpha is left alone.
//! Because of the clamp, two successive adjustments only compose into one
//! (`f1 * f2`) when no channel saturated or rounded in between.

use thiserror::Error;

/// Errors produced while parsing a brightness factor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BrightnessParseError {
    /// The text is not a decimal number.
    #[error("Brightness factor is not a number: {0:?}")]
    InvalidNumber(String),

    /// The number is NaN or infinite.
    #[error("Brightness factor must be finite, got {0}")]
    NonFinite(f32),
}

/// Parse a brightness factor.
///
/// Only `.` is accepted as the decimal separator. Surrounding whitespace is
/// ignored.
pub fn parse_brightness_factor(text: &str) -> Result<f32, BrightnessParseError> {
    let trimmed = text.trim();
    let factor: f32 = trimmed
        .parse()
        .map_err(|_| BrightnessParseError::InvalidNumber(trimmed.to_string()))?;
    if !factor.is_finite() {
        return Err(BrightnessParseError::NonFinite(factor));
    }
    Ok(factor)
}

/// Multiply the RGB channels of RGBA pixel data by `factor` in place.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `factor` - 1.0 leaves the image unchanged, <1.0 darkens, >1.0 brightens
///
/// # Example
/// ```
/// use image_projection_core::adjustments::apply_brightness;
///
/// let mut pixels = vec![128, 128, 128, 255]; // Single gray pixel
/// apply_brightness(&mut pixels, 0.5);
/// assert_eq!(pixels, vec![64, 64, 64, 255]);
/// ```
pub fn apply_brightness(pixels: &mut [u8], factor: f32) {
    // Early exit if no adjustment
    if factor == 1.0 {
        return;
    }

    for chunk in pixels.chunks_exact_mut(4) {
        chunk[0] = scale_channel(chunk[0], factor);
        chunk[1] = scale_channel(chunk[1], factor);
        chunk[2] = scale_channel(chunk[2], factor);
    }
}

#[inline]
fn scale_channel(value: u8, factor: f32) -> u8 {
    (value as f32 * factor).round().clamp(0.0, 255.0) as u8
}
