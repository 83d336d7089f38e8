//! Projective warping with separable resampling kernels.
//!
//! Three kernels are available:
//! - **Bilinear**: triangle kernel, radius 1
//! - **Lanczos3**: `sinc(x)·sinc(x/3)`, radius 3
//! - **Welch**: `sinc(x)·(1 − (x/3)²)`, radius 3, the default
//!
//! # Algorithm
//!
//! The warp uses inverse mapping: for each pixel in the output canvas we map
//! its coordinate back through the inverted matrix and resample the source
//! around that fractional point. Channels are weighted in premultiplied
//! alpha so transparent neighbors do not bleed color. Points that land
//! outside the source produce transparent black.
//!
//! When the warp shrinks the image, the kernel is stretched by the
//! shrink factor on that axis so every source pixel still contributes.

use std::f64::consts::PI;

use super::crop::{canvas_region, crop};
use super::{CanvasSize, Projective, TransformError, TransformMatrix};
use crate::decode::DecodedImage;

/// Largest canvas side a warp may produce.
pub const MAX_CANVAS_DIMENSION: u32 = 16_384;

/// Interpolation filter for projective warps.
///
/// The service pipeline always warps with `Welch`; the other kernels are
/// kept for library callers of [`apply_projection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation.
    Bilinear,
    /// Lanczos windowed sinc, three lobes.
    Lanczos3,
    /// Welch windowed sinc, three lobes.
    #[default]
    Welch,
}

impl InterpolationFilter {
    /// Half-width of the kernel's support in pixels.
    #[inline]
    pub fn radius(self) -> f64 {
        match self {
            InterpolationFilter::Bilinear => 1.0,
            InterpolationFilter::Lanczos3 | InterpolationFilter::Welch => 3.0,
        }
    }

    /// Kernel weight at distance `x` from the sample point.
    #[inline]
    pub fn weight(self, x: f64) -> f64 {
        let x = x.abs();
        let radius = self.radius();
        if x >= radius {
            return 0.0;
        }
        match self {
            InterpolationFilter::Bilinear => 1.0 - x,
            InterpolationFilter::Lanczos3 => sinc(x) * sinc(x / radius),
            InterpolationFilter::Welch => {
                let t = x / radius;
                sinc(x) * (1.0 - t * t)
            }
        }
    }
}

/// Normalized sinc: `sin(πx) / (πx)`.
#[inline]
fn sinc(x: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    let pi_x = PI * x;
    pi_x.sin() / pi_x
}

/// Bounding box of the forward-mapped source corners, in output pixels.
#[derive(Debug, Clone, Copy)]
struct CornerBounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl CornerBounds {
    fn of(width: u32, height: u32, projective: &Projective) -> Result<Self, TransformError> {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            projective.forward(0.0, 0.0),
            projective.forward(w, 0.0),
            projective.forward(0.0, h),
            projective.forward(w, h),
        ];

        let bounds = Self {
            left: corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min),
            right: corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max),
            top: corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min),
            bottom: corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max),
        };

        let finite = [bounds.left, bounds.right, bounds.top, bounds.bottom]
            .into_iter()
            .all(f64::is_finite);
        if !finite {
            return Err(TransformError::CanvasTooLarge {
                width: i64::MAX,
                height: i64::MAX,
                max: MAX_CANVAS_DIMENSION,
            });
        }
        Ok(bounds)
    }

    /// How many source pixels one output pixel covers along each axis,
    /// never below 1.
    fn minification(&self, width: u32, height: u32) -> (f64, f64) {
        let ratio = |src: u32, extent: f64| (src as f64 / extent).clamp(1.0, src.max(1) as f64);
        (
            ratio(width, self.right - self.left),
            ratio(height, self.bottom - self.top),
        )
    }
}

/// Compute the canvas size a projective warp produces for a source size.
///
/// The four source corners are mapped forward and their bounding rectangle
/// is rounded to whole pixels. The canvas is anchored at the origin: a
/// rectangle that starts at a negative offset is cut at its far edge,
/// otherwise the canvas grows to reach the far edge. A rectangle lying
/// entirely at negative coordinates keeps its own extent.
///
/// # Errors
///
/// `TransformError::CanvasTooLarge` if either side of the resulting canvas
/// would exceed [`MAX_CANVAS_DIMENSION`] (or a corner is not finite), and
/// `TransformError::InvalidDimensions` if the canvas collapses to zero.
pub fn compute_projected_bounds(
    width: u32,
    height: u32,
    projective: &Projective,
) -> Result<(u32, u32), TransformError> {
    canvas_bounds(&CornerBounds::of(width, height, projective)?)
}

fn canvas_bounds(bounds: &CornerBounds) -> Result<(u32, u32), TransformError> {
    // Round the rectangle the way its origin and size are stored.
    let rect_x = bounds.left.round() as i64;
    let rect_y = bounds.top.round() as i64;
    let rect_w = (bounds.right - bounds.left).round() as i64;
    let rect_h = (bounds.bottom - bounds.top).round() as i64;

    let constrain = |origin: i64, extent: i64| {
        let far = origin.saturating_add(extent);
        let size = if origin < 0 { far } else { extent.max(far) };
        if size <= 0 {
            extent
        } else {
            size
        }
    };
    let out_w = constrain(rect_x, rect_w);
    let out_h = constrain(rect_y, rect_h);

    if out_w > MAX_CANVAS_DIMENSION as i64 || out_h > MAX_CANVAS_DIMENSION as i64 {
        return Err(TransformError::CanvasTooLarge {
            width: out_w,
            height: out_h,
            max: MAX_CANVAS_DIMENSION,
        });
    }
    if out_w <= 0 || out_h <= 0 {
        return Err(TransformError::InvalidDimensions {
            width: out_w.max(0) as u32,
            height: out_h.max(0) as u32,
        });
    }

    Ok((out_w as u32, out_h as u32))
}

/// Warp an image through a projective transform.
///
/// The output canvas is sized by [`compute_projected_bounds`]. The identity
/// matrix returns a copy of the input.
///
/// # Errors
///
/// `TransformError::Degenerate` if the matrix cannot be inverted, plus the
/// errors of [`compute_projected_bounds`].
pub fn apply_projection(
    image: &DecodedImage,
    matrix: &TransformMatrix,
    filter: InterpolationFilter,
) -> Result<DecodedImage, TransformError> {
    warp(image, matrix, filter, |size| size)
}

/// Warp like [`apply_projection`], but render only the part of the output
/// that survives [`canvas_region`] for `canvas`.
///
/// The result equals `apply_projection` followed by a top-left crop to that
/// region; pixels outside it are never allocated or sampled.
pub fn apply_projection_clipped(
    image: &DecodedImage,
    matrix: &TransformMatrix,
    filter: InterpolationFilter,
    canvas: CanvasSize,
) -> Result<DecodedImage, TransformError> {
    warp(image, matrix, filter, |(width, height)| {
        canvas_region(width, height, canvas)
    })
}

fn warp(
    image: &DecodedImage,
    matrix: &TransformMatrix,
    filter: InterpolationFilter,
    region: impl FnOnce((u32, u32)) -> (u32, u32),
) -> Result<DecodedImage, TransformError> {
    if image.is_empty() || image.pixels.len() != image.pixel_count() * DecodedImage::CHANNELS {
        return Err(TransformError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    // Fast path: no transform needed
    if matrix.is_identity() {
        let (width, height) = region((image.width, image.height));
        return Ok(crop(image, 0, 0, width, height));
    }

    let projective = matrix.projective();
    let inverse = projective.inverse().ok_or(TransformError::Degenerate)?;
    let bounds = CornerBounds::of(image.width, image.height, &projective)?;
    let (dst_w, dst_h) = region(canvas_bounds(&bounds)?);

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * DecodedImage::CHANNELS];
    let scale = bounds.minification(image.width, image.height);
    let mut sampler = Sampler::new(image, filter, scale);

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let Some((src_x, src_y)) = inverse.map(dst_x as f64, dst_y as f64) else {
                continue;
            };
            let Some(pixel) = sampler.sample(src_x, src_y) else {
                continue;
            };

            let dst_idx =
                (dst_y as usize * dst_w as usize + dst_x as usize) * DecodedImage::CHANNELS;
            output[dst_idx..dst_idx + DecodedImage::CHANNELS].copy_from_slice(&pixel);
        }
    }

    Ok(DecodedImage {
        width: dst_w,
        height: dst_h,
        pixels: output,
        orientation: image.orientation,
    })
}

/// Separable kernel sampler with reusable tap buffers.
struct Sampler<'a> {
    image: &'a DecodedImage,
    filter: InterpolationFilter,
    /// Kernel stretch per axis, at least 1.
    scale: (f64, f64),
    x_taps: Vec<(usize, f64)>,
    y_taps: Vec<(usize, f64)>,
}

impl<'a> Sampler<'a> {
    fn new(image: &'a DecodedImage, filter: InterpolationFilter, scale: (f64, f64)) -> Self {
        let taps = (filter.radius() * 2.0 * scale.0.max(scale.1)).ceil() as usize + 1;
        Self {
            image,
            filter,
            scale,
            x_taps: Vec::with_capacity(taps),
            y_taps: Vec::with_capacity(taps),
        }
    }

    /// Collect in-bounds taps and weights around `center` along one axis.
    ///
    /// `scale` stretches the kernel; 1.0 is the kernel's native support.
    fn fill_taps(
        taps: &mut Vec<(usize, f64)>,
        filter: InterpolationFilter,
        center: f64,
        scale: f64,
        len: u32,
    ) {
        taps.clear();
        let radius = filter.radius() * scale;
        let first = (center - radius).ceil().max(0.0) as i64;
        let last = ((center + radius).floor() as i64).min(len as i64 - 1);
        for p in first..=last {
            let weight = filter.weight((center - p as f64) / scale);
            if weight != 0.0 {
                taps.push((p as usize, weight));
            }
        }
    }

    /// Resample at a fractional source coordinate.
    ///
    /// Returns `None` outside the source's pixel coverage.
    fn sample(&mut self, x: f64, y: f64) -> Option<[u8; 4]> {
        let (w, h) = (self.image.width as f64, self.image.height as f64);
        if x < -0.5 || y < -0.5 || x > w - 0.5 || y > h - 0.5 {
            return None;
        }

        let (scale_x, scale_y) = self.scale;
        Self::fill_taps(&mut self.x_taps, self.filter, x, scale_x, self.image.width);
        Self::fill_taps(&mut self.y_taps, self.filter, y, scale_y, self.image.height);

        let stride = self.image.width as usize * DecodedImage::CHANNELS;
        let mut sum = [0.0f64; 4];
        let mut weight_sum = 0.0;

        for &(py, wy) in &self.y_taps {
            let row = py * stride;
            for &(px, wx) in &self.x_taps {
                let weight = wx * wy;
                let idx = row + px * DecodedImage::CHANNELS;
                let p = &self.image.pixels[idx..idx + DecodedImage::CHANNELS];
                let alpha = p[3] as f64;
                sum[0] += p[0] as f64 * alpha * weight;
                sum[1] += p[1] as f64 * alpha * weight;
                sum[2] += p[2] as f64 * alpha * weight;
                sum[3] += alpha * weight;
                weight_sum += weight;
            }
        }

        if weight_sum.abs() < f64::EPSILON {
            return Some(self.nearest(x, y));
        }

        let alpha = sum[3] / weight_sum;
        if alpha <= 0.0 {
            return Some([0, 0, 0, 0]);
        }

        let unpremultiply = |c: f64| (c / weight_sum / alpha).clamp(0.0, 255.0).round() as u8;
        Some([
            unpremultiply(sum[0]),
            unpremultiply(sum[1]),
            unpremultiply(sum[2]),
            alpha.clamp(0.0, 255.0).round() as u8,
        ])
    }

    fn nearest(&self, x: f64, y: f64) -> [u8; 4] {
        let px = (x.round().max(0.0) as u32).min(self.image.width - 1);
        let py = (y.round().max(0.0) as u32).min(self.image.height - 1);
        self.image.pixel(px, py)
    }
}
