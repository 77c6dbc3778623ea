//! In-memory RGBA raster shared by every pipeline stage.
//!
//! A [`Raster`] is created by the decoder, moved through each stage and
//! dropped after encoding. Stages take ownership, so a raster is never
//! aliased between two stages.

use thiserror::Error;

/// Number of channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Errors raised when a raster (or a canvas a stage wants to allocate)
/// does not have a usable shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDimensionError {
    /// Width or height is zero or negative.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be positive")]
    NonPositive { width: i64, height: i64 },

    /// Pixel buffer length doesn't match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    BufferMismatch { expected: usize, actual: usize },

    /// Canvas would exceed the configured pixel budget.
    #[error("Canvas {width}x{height} exceeds the limit of {limit} pixels")]
    TooLarge { width: u64, height: u64, limit: u64 },
}

/// A decoded image with straight (non-premultiplied) RGBA pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length must be width * height * 4.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a raster from existing pixel data, validating its shape.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, InvalidDimensionError> {
        let raster = Self {
            width,
            height,
            pixels,
        };
        raster.validate()?;
        Ok(raster)
    }

    /// Create a raster where every pixel is transparent black.
    pub fn blank(width: u32, height: u32) -> Result<Self, InvalidDimensionError> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Create a raster where every pixel has the given RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, InvalidDimensionError> {
        check_positive(width as i64, height as i64)?;
        let pixels = rgba.repeat(width as usize * height as usize);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap an `image::RgbaImage` without copying its buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert into an `image::RgbaImage`.
    ///
    /// Returns `None` if the buffer doesn't match the dimensions.
    pub fn into_rgba_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels)
    }

    /// Check that both dimensions are positive and the buffer holds
    /// exactly `width * height * 4` bytes.
    pub fn validate(&self) -> Result<(), InvalidDimensionError> {
        check_positive(self.width as i64, self.height as i64)?;
        let expected = self.width as usize * self.height as usize * CHANNELS;
        if self.pixels.len() != expected {
            return Err(InvalidDimensionError::BufferMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Read the pixel at (x, y), or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        self.pixels
            .get(idx..idx + CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Byte offset of pixel (x, y). Caller guarantees bounds.
    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Bytes in one row.
    #[inline]
    pub(crate) fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

pub(crate) fn check_positive(width: i64, height: i64) -> Result<(), InvalidDimensionError> {
    if width <= 0 || height <= 0 {
        return Err(InvalidDimensionError::NonPositive { width, height });
    }
    Ok(())
}
