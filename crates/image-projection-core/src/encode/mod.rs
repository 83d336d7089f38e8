//! Image encoding pipeline.
//!
//! This module provides functionality for:
//! - Encoding RGBA buffers to PNG
//! - Wrapping the PNG bytes as bare base64 text for transport
//!
//! # Examples
//!
//! ```ignore
//! use image_projection_core::decode::DecodedImage;
//! use image_projection_core::encode::encode_png_base64;
//!
//! let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 4]);
//! let text = encode_png_base64(&image).unwrap();
//! println!("Encoded {} base64 characters", text.len());
//! ```

mod png;

pub use png::{encode_png, encode_png_base64, EncodeError};
