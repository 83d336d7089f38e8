//! Pixel-rectangle cropping.
//!
//! Coordinates are whole pixels with the origin at the top-left corner.
//! Regions that extend past the image are clamped to it.

use super::CanvasSize;
use crate::decode::DecodedImage;

/// Crop a pixel rectangle out of an image.
///
/// The rectangle is clamped to the image bounds; the result is at least 1x1
/// for a non-empty source. The orientation tag is carried over.
pub fn crop(image: &DecodedImage, left: u32, top: u32, width: u32, height: u32) -> DecodedImage {
    // Fast path: full crop (or nothing to crop) returns a clone
    if image.is_empty() || (left == 0 && top == 0 && width >= image.width && height >= image.height)
    {
        return image.clone();
    }

    let channels = DecodedImage::CHANNELS;
    let left = left.min(image.width.saturating_sub(1));
    let top = top.min(image.height.saturating_sub(1));
    let right = left.saturating_add(width).min(image.width);
    let bottom = top.saturating_add(height).min(image.height);

    let out_width = right.saturating_sub(left).max(1);
    let out_height = bottom.saturating_sub(top).max(1);
    let row_bytes = out_width as usize * channels;

    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in top..top + out_height {
        let start = (y as usize * image.width as usize + left as usize) * channels;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
        orientation: image.orientation,
    }
}

/// Size of the top-left region kept from a `width` x `height` warp.
///
/// The canvas size is returned only when the warp overshot it in BOTH
/// dimensions. If only one dimension exceeds the canvas, or neither does,
/// the full size is kept.
pub fn canvas_region(width: u32, height: u32, canvas: CanvasSize) -> (u32, u32) {
    if width > canvas.width && height > canvas.height {
        (canvas.width, canvas.height)
    } else {
        (width, height)
    }
}
