//! EXIF orientation correction.
//!
//! Rotations are clockwise. Each tag maps to exactly one rotate/flip
//! combination:
//!
//! | Tag | Operation                          |
//! |-----|------------------------------------|
//! | 1   | none                               |
//! | 2   | horizontal flip                    |
//! | 3   | rotate 180                         |
//! | 4   | vertical flip                      |
//! | 5   | rotate 270, then horizontal flip   |
//! | 6   | rotate 90                          |
//! | 7   | rotate 90, then horizontal flip    |
//! | 8   | rotate 270                         |

use image::imageops;
use tracing::{debug, warn};

use super::{DecodedImage, Orientation};

/// Rotate/flip the pixel data so it matches the EXIF orientation tag.
///
/// Absent tags are a no-op. Any present tag, including an unsupported one,
/// is reset to 1 afterwards so the corrected buffer is never rotated twice.
/// Tags outside 1-8 are logged and the pixels are left uncorrected.
pub fn apply_orientation(mut image: DecodedImage) -> DecodedImage {
    let Some(tag) = image.orientation else {
        return image;
    };

    match Orientation::try_from(tag) {
        Ok(Orientation::Normal) => {}
        Ok(orientation) => {
            debug!(
                tag,
                swaps_dimensions = orientation.swaps_dimensions(),
                "applying EXIF orientation"
            );
            image = rotate_flip(image, orientation);
        }
        Err(err) => warn!(%err, "leaving image uncorrected"),
    }

    image.orientation = Some(Orientation::Normal.tag());
    image
}

fn rotate_flip(image: DecodedImage, orientation: Orientation) -> DecodedImage {
    let Some(buffer) = image.to_rgba_image() else {
        return image;
    };

    let oriented = match orientation {
        Orientation::Normal => buffer,
        Orientation::FlipHorizontal => imageops::flip_horizontal(&buffer),
        Orientation::Rotate180 => imageops::rotate180(&buffer),
        Orientation::FlipVertical => imageops::flip_vertical(&buffer),
        Orientation::Transpose => imageops::flip_horizontal(&imageops::rotate270(&buffer)),
        Orientation::Rotate90CW => imageops::rotate90(&buffer),
        Orientation::Transverse => imageops::flip_horizontal(&imageops::rotate90(&buffer)),
        Orientation::Rotate270CW => imageops::rotate270(&buffer),
    };

    DecodedImage::from_rgba_image(oriented).with_orientation(image.orientation)
}
