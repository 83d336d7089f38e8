//! Core types for image decoding.

use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The transport text is not valid base64.
    #[error("Invalid base64 image data: {0}")]
    InvalidBase64(String),

    /// No bytes were supplied.
    #[error("Image data is empty")]
    Empty,

    /// The container format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Error returned when an EXIF orientation tag is outside 1-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrientationError {
    #[error("Unsupported EXIF orientation tag: {0}")]
    Unsupported(u16),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u16)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Rotate 270 CW, then flip horizontal.
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Rotate 90 CW, then flip horizontal.
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    ///
    /// Rotations of 90° and 270° (and their flip variants Transpose/Transverse)
    /// swap the image dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// The raw EXIF tag value.
    #[inline]
    pub fn tag(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for Orientation {
    type Error = OrientationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Orientation::Normal),
            2 => Ok(Orientation::FlipHorizontal),
            3 => Ok(Orientation::Rotate180),
            4 => Ok(Orientation::FlipVertical),
            5 => Ok(Orientation::Transpose),
            6 => Ok(Orientation::Rotate90CW),
            7 => Ok(Orientation::Transverse),
            8 => Ok(Orientation::Rotate270CW),
            other => Err(OrientationError::Unsupported(other)),
        }
    }
}

/// A decoded image with RGBA pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
    /// Raw EXIF orientation tag, if the container carried one.
    pub orientation: Option<u16>,
}

impl DecodedImage {
    /// Bytes per RGBA pixel.
    pub const CHANNELS: usize = 4;

    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * Self::CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
            orientation: None,
        }
    }

    /// Attach an orientation tag.
    pub fn with_orientation(mut self, orientation: Option<u16>) -> Self {
        self.orientation = orientation;
        self
    }

    /// Create a DecodedImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
            orientation: None,
        }
    }

    /// Convert to an image::RgbaImage for further processing (clones the pixels).
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// RGBA value at (x, y). Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}
