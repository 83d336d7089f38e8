//! The resize → warp → crop sequence for a fixed output canvas.

use tracing::debug;

use super::{apply_projection_clipped, resize, InterpolationFilter, TransformError, TransformMatrix};
use crate::decode::DecodedImage;

/// Target canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// A4 portrait at roughly 150 dpi.
    pub const A4_150_DPI: CanvasSize = CanvasSize {
        width: 1240,
        height: 1754,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::A4_150_DPI
    }
}

/// Normalize an image onto `canvas` and warp it through `matrix`.
///
/// 1. Resize to exactly `canvas` with a Catmull-Rom filter
/// 2. Warp with `filter`
/// 3. Crop to `canvas` only if the warp overshot both width and height
///
/// The crop is applied to the projected bounds before rendering, so an
/// oversized warp never allocates more than the kept region.
pub fn transform_to_canvas(
    image: &DecodedImage,
    matrix: &TransformMatrix,
    canvas: CanvasSize,
    filter: InterpolationFilter,
) -> Result<DecodedImage, TransformError> {
    let resized = resize(image, canvas.width, canvas.height)?;
    let warped = apply_projection_clipped(&resized, matrix, filter, canvas)?;
    debug!(
        width = warped.width,
        height = warped.height,
        "projective transform applied"
    );
    Ok(warped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{apply_projection, crop};

    const CANVAS: CanvasSize = CanvasSize::new(12, 17);

    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 20) as u8, (y * 14) as u8, 90, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_default_canvas_is_a4() {
        assert_eq!(CanvasSize::default(), CanvasSize::new(1240, 1754));
    }

    #[test]
    fn test_identity_on_canvas_sized_input_is_unchanged() {
        let img = test_image(12, 17);
        let result = transform_to_canvas(
            &img,
            &TransformMatrix::IDENTITY,
            CANVAS,
            InterpolationFilter::Welch,
        )
        .unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_identity_resizes_to_canvas() {
        let img = test_image(5, 5);
        let result = transform_to_canvas(
            &img,
            &TransformMatrix::IDENTITY,
            CANVAS,
            InterpolationFilter::Welch,
        )
        .unwrap();
        assert_eq!((result.width, result.height), (12, 17));
    }

    #[test]
    fn test_identity_matches_plain_resize() {
        let img = test_image(8, 6);
        let resized = resize(&img, CANVAS.width, CANVAS.height).unwrap();
        let result = transform_to_canvas(
            &img,
            &TransformMatrix::IDENTITY,
            CANVAS,
            InterpolationFilter::Welch,
        )
        .unwrap();
        assert_eq!(result, resized);
    }

    #[test]
    fn test_oversized_in_both_dimensions_is_cropped() {
        let img = test_image(12, 17);
        let result = transform_to_canvas(
            &img,
            &TransformMatrix::scale(2.0, 2.0),
            CANVAS,
            InterpolationFilter::Welch,
        )
        .unwrap();
        assert_eq!((result.width, result.height), (12, 17));
        // Origin maps to itself under a pure scale, so the crop keeps it
        assert_eq!(result.pixel(0, 0), img.pixel(0, 0));
    }

    #[test]
    fn test_oversized_in_one_dimension_is_not_cropped() {
        let img = test_image(12, 17);
        let result = transform_to_canvas(
            &img,
            &TransformMatrix::translation(5.0, 0.0),
            CANVAS,
            InterpolationFilter::Welch,
        )
        .unwrap();
        assert_eq!((result.width, result.height), (17, 17));
    }

    #[test]
    fn test_degenerate_matrix_propagates() {
        let img = test_image(12, 17);
        let result = transform_to_canvas(
            &img,
            &TransformMatrix::scale(0.0, 1.0),
            CANVAS,
            InterpolationFilter::Welch,
        );
        assert_eq!(result, Err(TransformError::Degenerate));
    }

    #[test]
    fn test_huge_scale_renders_only_the_canvas() {
        // Projected bounds are 12000x15000; only the 40x50 canvas is rendered
        let canvas = CanvasSize::new(40, 50);
        let img = test_image(40, 50);
        let result = transform_to_canvas(
            &img,
            &TransformMatrix::scale(300.0, 300.0),
            canvas,
            InterpolationFilter::Welch,
        )
        .unwrap();
        assert_eq!((result.width, result.height), (40, 50));
        assert_eq!(result.pixels.len(), 40 * 50 * 4);
        assert_eq!(result.pixel(0, 0), img.pixel(0, 0));
    }

    #[test]
    fn test_clipped_warp_matches_full_warp_then_crop() {
        let img = test_image(12, 17);
        let matrix = TransformMatrix::scale(1.7, 2.3);
        let full = apply_projection(&img, &matrix, InterpolationFilter::Welch).unwrap();
        let expected = crop(&full, 0, 0, CANVAS.width, CANVAS.height);

        let result = transform_to_canvas(&img, &matrix, CANVAS, InterpolationFilter::Welch).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_far_negative_translation_is_transparent_canvas() {
        let img = test_image(12, 17);
        let result = transform_to_canvas(
            &img,
            &TransformMatrix::translation(-70_000.0, 0.0),
            CANVAS,
            InterpolationFilter::Welch,
        )
        .unwrap();
        assert_eq!((result.width, result.height), (12, 17));
        assert!(result.pixels.iter().all(|&b| b == 0));
    }
}
