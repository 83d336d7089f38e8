//! Image Projection Core - Image processing library
//!
//! This crate provides the pixel pipeline behind the projection service:
//! decoding with EXIF orientation correction, projective warping onto a
//! fixed canvas, brightness scaling, and PNG/base64 encoding.

pub mod adjustments;
pub mod decode;
pub mod encode;
pub mod pipeline;
pub mod transform;
pub mod transport;

pub use adjustments::{apply_brightness, parse_brightness_factor, BrightnessParseError};
pub use decode::{apply_orientation, decode_image, DecodeError, DecodedImage, Orientation};
pub use encode::{encode_png, encode_png_base64, EncodeError};
pub use pipeline::{process_brightness, process_projection, PipelineError};
pub use transform::{
    apply_projection, transform_to_canvas, CanvasSize, InterpolationFilter, TransformError,
    TransformMatrix,
};

/// Output canvas width in pixels.
pub const CANVAS_WIDTH: u32 = CanvasSize::A4_150_DPI.width;

/// Output canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = CanvasSize::A4_150_DPI.height;
