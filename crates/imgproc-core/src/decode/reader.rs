//! JPEG/PNG decoding into straight RGBA rasters.

use std::io::Cursor;

use image::ImageReader;
use log::trace;

use super::{DecodeError, ImageInfo};
use crate::format::ImageFormat;
use crate::raster::Raster;

/// Identify the container, rejecting empty or foreign input.
fn detect(bytes: &[u8]) -> Result<ImageFormat, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    ImageFormat::detect(bytes).ok_or(DecodeError::UnrecognizedFormat)
}

fn reader(bytes: &[u8], format: ImageFormat) -> ImageReader<Cursor<&[u8]>> {
    ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
}

/// Read the container header: format and dimensions, no pixel decoding.
///
/// # Errors
///
/// Returns `DecodeError::Empty` / `DecodeError::UnrecognizedFormat` if the
/// bytes are not JPEG or PNG, and `DecodeError::Corrupted` if the header is
/// truncated or malformed.
pub fn probe(bytes: &[u8]) -> Result<ImageInfo, DecodeError> {
    let format = detect(bytes)?;
    let (width, height) = reader(bytes, format)
        .into_dimensions()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    Ok(ImageInfo {
        format,
        width,
        height,
    })
}

/// Decode a JPEG or PNG image from bytes.
///
/// The container is detected from its magic bytes; the file extension or
/// requested output format plays no part.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes
///
/// # Returns
///
/// A `Raster` with straight (non-premultiplied) RGBA pixel data.
///
/// # Errors
///
/// Returns `DecodeError::UnrecognizedFormat` if the bytes are neither JPEG nor PNG.
/// Returns `DecodeError::Corrupted` if the image data is damaged or truncated.
pub fn decode(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let format = detect(bytes)?;
    decode_as(bytes, format)
}

/// Decode, refusing images whose canvas exceeds `max_pixels`.
///
/// The header is probed first so an oversized image is rejected before any
/// pixel buffer is allocated.
///
/// # Errors
///
/// Everything [`decode`] returns, plus `DecodeError::ImageTooLarge`.
pub fn decode_limited(bytes: &[u8], max_pixels: u64) -> Result<Raster, DecodeError> {
    let info = probe(bytes)?;
    if info.pixel_count() > max_pixels {
        return Err(DecodeError::ImageTooLarge {
            width: info.width,
            height: info.height,
            limit: max_pixels,
        });
    }
    decode_as(bytes, info.format)
}

fn decode_as(bytes: &[u8], format: ImageFormat) -> Result<Raster, DecodeError> {
    let img = reader(bytes, format)
        .decode()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    trace!(
        "Decoded {} {}x{} ({:?})",
        format.as_str(),
        img.width(),
        img.height(),
        img.color()
    );

    let raster = Raster::from_rgba_image(img.into_rgba8());
    if raster.is_empty() {
        return Err(DecodeError::Corrupted("image has no pixels".to_string()));
    }
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;

    /// Gradient test image with a translucent column.
    fn test_raster(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let a = if x == 0 { 128 } else { 255 };
                pixels.extend_from_slice(&[(x * 20) as u8, (y * 20) as u8, 90, a]);
            }
        }
        Raster::new(width, height, pixels).unwrap()
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        encode(&test_raster(width, height), ImageFormat::Png, 85).unwrap()
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        encode(&test_raster(width, height), ImageFormat::Jpeg, 90).unwrap()
    }

    #[test]
    fn test_decode_png_is_lossless() {
        let raster = decode(&png_bytes(6, 4)).unwrap();
        assert_eq!(raster, test_raster(6, 4));
    }

    #[test]
    fn test_decode_jpeg_dimensions_and_opaque() {
        let raster = decode(&jpeg_bytes(16, 8)).unwrap();
        assert_eq!(raster.dimensions(), (16, 8));
        assert!(raster.pixels.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(&[]), Err(DecodeError::Empty));
    }

    #[test]
    fn test_decode_unrecognized() {
        assert_eq!(
            decode(b"definitely not an image"),
            Err(DecodeError::UnrecognizedFormat)
        );
    }

    #[test]
    fn test_decode_truncated_jpeg_header() {
        let result = decode(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]);
        assert!(matches!(result, Err(DecodeError::Corrupted(_))));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(8, 8);
        let result = decode(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::Corrupted(_))));
    }

    #[test]
    fn test_probe_reads_header() {
        let info = probe(&png_bytes(7, 3)).unwrap();
        assert_eq!(
            info,
            ImageInfo {
                format: ImageFormat::Png,
                width: 7,
                height: 3
            }
        );

        let info = probe(&jpeg_bytes(9, 5)).unwrap();
        assert_eq!(info.format, ImageFormat::Jpeg);
        assert_eq!((info.width, info.height), (9, 5));
    }

    #[test]
    fn test_decode_limited_rejects_large_canvas() {
        let bytes = png_bytes(10, 10);
        assert!(matches!(
            decode_limited(&bytes, 99),
            Err(DecodeError::ImageTooLarge {
                width: 10,
                height: 10,
                limit: 99
            })
        ));
        assert!(decode_limited(&bytes, 100).is_ok());
    }
}
