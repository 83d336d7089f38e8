//! Container decoding with EXIF orientation extraction.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{ImageError, ImageReader};
use tracing::debug;

use super::{DecodeError, DecodedImage};

/// Decode an image from bytes into an RGBA buffer.
///
/// The container format is guessed from its magic bytes. Any EXIF orientation
/// tag is read and attached to the result, but NOT applied; use
/// [`apply_orientation`](super::apply_orientation) for that.
///
/// # Errors
///
/// Returns `DecodeError::Empty` for zero-length input,
/// `DecodeError::InvalidFormat` if the format is not recognized or not
/// compiled in, and `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let orientation = read_orientation_tag(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let Some(format) = reader.format() else {
        return Err(DecodeError::InvalidFormat);
    };

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    debug!(
        ?format,
        width = img.width(),
        height = img.height(),
        ?orientation,
        "decoded image"
    );

    Ok(DecodedImage::from_rgba_image(img.into_rgba8()).with_orientation(orientation))
}

/// Read the EXIF orientation tag from an encoded image.
///
/// Returns `None` if the container has no EXIF block, no orientation field,
/// or a value that does not fit in 16 bits.
pub fn read_orientation_tag(bytes: &[u8]) -> Option<u16> {
    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;
    let field = exif.get_field(Tag::Orientation, In::PRIMARY)?;
    field
        .value
        .get_uint(0)
        .and_then(|value| u16::try_from(value).ok())
}
