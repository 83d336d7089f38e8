//! Exact-size resizing with the `image` crate's Catmull-Rom filter.

use image::imageops::FilterType;

use super::TransformError;
use crate::decode::DecodedImage;

/// Resize an image to exact dimensions with bicubic (Catmull-Rom)
/// interpolation.
///
/// Aspect ratio is NOT preserved. The orientation tag is carried over.
///
/// # Errors
///
/// Returns `TransformError::InvalidDimensions` if the target or source is
/// zero-sized, or the source buffer does not match its dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
) -> Result<DecodedImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .filter(|_| !image.is_empty())
        .ok_or(TransformError::InvalidDimensions {
            width: image.width,
            height: image.height,
        })?;

    let resized = image::imageops::resize(&rgba, width, height, FilterType::CatmullRom);

    Ok(DecodedImage::from_rgba_image(resized).with_orientation(image.orientation))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        // Simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
                pixels.push(255); // A
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_ignores_aspect_ratio() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 31, 77).unwrap();

        assert_eq!((resized.width, resized.height), (31, 77));
    }

    #[test]
    fn test_resize_same_dimensions_is_identical() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50).unwrap();

        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_keeps_orientation_tag() {
        let img = create_test_image(10, 10).with_orientation(Some(1));
        let resized = resize(&img, 20, 20).unwrap();
        assert_eq!(resized.orientation, Some(1));
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img, 0, 50).is_err());
        assert!(resize(&img, 50, 0).is_err());
    }

    #[test]
    fn test_resize_empty_source_error() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert_eq!(
            resize(&img, 10, 10),
            Err(TransformError::InvalidDimensions {
                width: 0,
                height: 0
            })
        );
    }
}
