//! PNG encoding. Lossless, keeps the alpha channel.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{check_raster, EncodeError};
use crate::raster::Raster;

/// Encode a raster to PNG bytes (RGBA, 8 bits per channel).
pub fn encode_png(image: &Raster) -> Result<Vec<u8>, EncodeError> {
    check_raster(image)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
