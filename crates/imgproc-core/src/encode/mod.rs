//! Image encoding.
//!
//! This module provides functionality for:
//! - Encoding to JPEG with configurable quality (alpha flattened onto black)
//! - Encoding to PNG, lossless with alpha
//!
//! The target format is always one of [`ImageFormat`]; unknown format names
//! have already been normalized to JPEG by the time they reach here.
//!
//! # Examples
//!
//! ```ignore
//! use imgproc_core::encode::encode;
//! use imgproc_core::{ImageFormat, Raster};
//!
//! let raster = Raster::filled(100, 100, [128, 128, 128, 255]).unwrap();
//! let jpeg_bytes = encode(&raster, ImageFormat::Jpeg, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;
mod png;

use thiserror::Error;

use crate::format::ImageFormat;
use crate::raster::{Raster, CHANNELS};

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a raster in the given format.
///
/// `quality` only affects JPEG and is clamped to 1-100; PNG ignores it.
pub fn encode(image: &Raster, format: ImageFormat, quality: u8) -> Result<Vec<u8>, EncodeError> {
    match format {
        ImageFormat::Jpeg => encode_jpeg(image, quality),
        ImageFormat::Png => encode_png(image),
    }
}

/// Validate dimensions and buffer length before handing pixels to a codec.
fn check_raster(image: &Raster) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected_len = image.width as usize * image.height as usize * CHANNELS;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_dispatches_on_format() {
        let img = Raster::filled(4, 4, [10, 20, 30, 255]).unwrap();

        let jpeg = encode(&img, ImageFormat::Jpeg, 85).unwrap();
        assert_eq!(ImageFormat::detect(&jpeg), Some(ImageFormat::Jpeg));

        let png = encode(&img, ImageFormat::Png, 85).unwrap();
        assert_eq!(ImageFormat::detect(&png), Some(ImageFormat::Png));
    }

    #[test]
    fn test_png_ignores_quality() {
        let img = Raster::filled(8, 8, [200, 10, 10, 255]).unwrap();
        let low = encode(&img, ImageFormat::Png, 1).unwrap();
        let high = encode(&img, ImageFormat::Png, 100).unwrap();
        assert_eq!(low, high);
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidDimensions {
            width: 0,
            height: 5,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (5) must be non-zero"
        );
    }
}
