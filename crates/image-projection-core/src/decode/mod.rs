//! Image decoding and orientation correction.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG, GIF, BMP, TIFF and WebP containers to RGBA
//! - Reading the EXIF orientation tag
//! - Rotating/flipping pixel data to match that tag
//!
//! Decoding never rotates on its own: callers that want upright pixels run
//! [`apply_orientation`] on the result.
//!
//! # Examples
//!
//! ```ignore
//! use image_projection_core::decode::{apply_orientation, decode_image};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = apply_orientation(decode_image(&bytes).unwrap());
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod container;
mod orientation;
mod types;

#[cfg(test)]
pub(crate) use container::fixtures;
pub use container::{decode_image, read_orientation_tag};
pub use orientation::apply_orientation;
pub use types::{DecodeError, DecodedImage, Orientation, OrientationError};
