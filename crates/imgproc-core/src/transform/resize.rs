//! Resizing to a target canvas.
//!
//! The baseline is nearest-neighbour sampling, matching the sampling used by
//! rotation. Bilinear resampling through the `image` crate is available as an
//! opt-in via [`ResampleFilter::Bilinear`].

use serde::{Deserialize, Serialize};

use crate::raster::{check_positive, InvalidDimensionError, Raster, CHANNELS};

/// Sampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    /// Nearest neighbour (fastest, blocky when upscaling).
    #[default]
    Nearest,
    /// Bilinear interpolation (smoother, slightly slower).
    Bilinear,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Nearest => image::imageops::FilterType::Nearest,
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
        }
    }
}

/// Work out the output size for a resize request.
///
/// Targets of zero or less mean "unspecified". When only one side is given,
/// the other follows the source aspect ratio:
/// `missing = round(source_other * target / source_side)`.
///
/// Returns `Ok(None)` when neither side is specified (nothing to do).
///
/// # Errors
///
/// Returns [`InvalidDimensionError`] if the source has a zero side, a target
/// doesn't fit in `u32`, or the derived side rounds down to zero.
pub fn resolve_resize_dimensions(
    src_width: u32,
    src_height: u32,
    target_width: i64,
    target_height: i64,
) -> Result<Option<(u32, u32)>, InvalidDimensionError> {
    if target_width <= 0 && target_height <= 0 {
        return Ok(None);
    }
    check_positive(src_width as i64, src_height as i64)?;

    let (src_w, src_h) = (src_width as f64, src_height as f64);
    let (width, height) = match (target_width > 0, target_height > 0) {
        (true, true) => (target_width, target_height),
        (true, false) => {
            let derived = (src_h * target_width as f64 / src_w).round();
            (target_width, derived as i64)
        }
        _ => {
            let derived = (src_w * target_height as f64 / src_h).round();
            (derived as i64, target_height)
        }
    };

    check_positive(width, height)?;
    if width > u32::MAX as i64 || height > u32::MAX as i64 {
        return Err(InvalidDimensionError::TooLarge {
            width: width as u64,
            height: height as u64,
            limit: u32::MAX as u64,
        });
    }

    Ok(Some((width as u32, height as u32)))
}

/// Resize an image to exact dimensions with nearest-neighbour sampling.
///
/// Destination pixel (x, y) copies source pixel
/// `(floor(x * src_w / dst_w), floor(y * src_h / dst_h))`, clamped to the
/// source bounds.
///
/// # Errors
///
/// Returns [`InvalidDimensionError`] if the raster is malformed or either
/// target dimension is zero.
pub fn apply_resize(image: Raster, width: u32, height: u32) -> Result<Raster, InvalidDimensionError> {
    apply_resize_with(image, width, height, ResampleFilter::Nearest)
}

/// Resize an image to exact dimensions with the given filter.
///
/// # Errors
///
/// Same as [`apply_resize`].
pub fn apply_resize_with(
    image: Raster,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<Raster, InvalidDimensionError> {
    image.validate()?;
    check_positive(width as i64, height as i64)?;

    // Fast path: if dimensions match, nothing to sample
    if image.width == width && image.height == height {
        return Ok(image);
    }

    match filter {
        ResampleFilter::Nearest => Ok(resize_nearest(&image, width, height)),
        ResampleFilter::Bilinear => {
            let (src_w, src_h) = image.dimensions();
            let rgba = image.into_rgba_image().ok_or(InvalidDimensionError::NonPositive {
                width: src_w as i64,
                height: src_h as i64,
            })?;
            let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());
            Ok(Raster::from_rgba_image(resized))
        }
    }
}

fn resize_nearest(image: &Raster, width: u32, height: u32) -> Raster {
    let (src_w, src_h) = (image.width as u64, image.height as u64);
    let (dst_w, dst_h) = (width as u64, height as u64);

    // Column lookup is the same for every row
    let src_cols: Vec<usize> = (0..dst_w)
        .map(|x| ((x * src_w / dst_w).min(src_w - 1) as usize) * CHANNELS)
        .collect();

    let src_stride = image.stride();
    let mut pixels = Vec::with_capacity(width as usize * height as usize * CHANNELS);

    for y in 0..dst_h {
        let src_y = (y * src_h / dst_h).min(src_h - 1) as usize;
        let src_row = &image.pixels[src_y * src_stride..(src_y + 1) * src_stride];
        for &col in &src_cols {
            pixels.extend_from_slice(&src_row[col..col + CHANNELS]);
        }
    }

    Raster {
        width,
        height,
        pixels,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
