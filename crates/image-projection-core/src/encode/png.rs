//! PNG encoding for responses.
//!
//! PNG is lossless, so decoding the output reproduces the RGBA buffer
//! exactly. An orientation tag on the image is written to an `eXIf` chunk.

use std::io::Cursor;

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::DecodedImage;
use crate::transport::{encode_base64, strip_data_uri_prefix};

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGBA image to PNG bytes.
///
/// If `image.orientation` is set, the PNG carries an EXIF block with that
/// Orientation value so viewers display it the same way.
///
/// # Example
///
/// ```
/// use image_projection_core::decode::DecodedImage;
/// use image_projection_core::encode::encode_png;
///
/// let image = DecodedImage::new(10, 10, vec![128u8; 10 * 10 * 4]);
/// let png = encode_png(&image).unwrap();
///
/// // Verify PNG signature
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn encode_png(image: &DecodedImage) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = image.pixel_count() * DecodedImage::CHANNELS;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let mut encoder = PngEncoder::new(&mut buffer);
    if let Some(tag) = image.orientation {
        encoder
            .set_exif_metadata(orientation_exif(tag)?)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    }
    encoder
        .write_image(&image.pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// A big-endian TIFF block holding only the Orientation field.
fn orientation_exif(tag: u16) -> Result<Vec<u8>, EncodeError> {
    let field = Field {
        tag: Tag::Orientation,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![tag]),
    };
    let mut writer = Writer::new();
    writer.push_field(&field);

    let mut out = Cursor::new(Vec::new());
    writer
        .write(&mut out, false)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(out.into_inner())
}

/// Encode an RGBA image to PNG and return bare base64 text.
///
/// The result never carries a `data:image/png;base64,` prefix.
pub fn encode_png_base64(image: &DecodedImage) -> Result<String, EncodeError> {
    let png = encode_png(image)?;
    let text = encode_base64(&png);
    Ok(strip_data_uri_prefix(&text).to_string())
}
