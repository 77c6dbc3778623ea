//! Arbitrary-angle rotation with nearest-neighbour sampling.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output canvas we
//! compute which source pixel lands there. Both canvases rotate about their
//! own centre and pixels are addressed by their centres (`x + 0.5`).
//!
//! For rotation by angle θ (clockwise on screen, y axis pointing down):
//! ```text
//! src_x =  (dst_x - dst_cx) * cos(θ) + (dst_y - dst_cy) * sin(θ) + src_cx
//! src_y = -(dst_x - dst_cx) * sin(θ) + (dst_y - dst_cy) * cos(θ) + src_cy
//! ```
//!
//! Sampling at pixel centres keeps quarter turns exact permutations. Compared
//! with mapping from the corner (`dst_x - dst_cx` with no half-pixel offset),
//! arbitrary angles can pick a neighbouring source pixel, so such outputs may
//! differ byte-for-byte from a corner-mapped rotation.
//!
//! The mapped coordinate is truncated to pick the source pixel. There is no
//! interpolation, so edges of non-axis-aligned rotations are aliased.
//! Destination pixels whose source falls outside the image stay transparent
//! black.

use crate::raster::{check_positive, InvalidDimensionError, Raster, CHANNELS};

/// Slack when rounding the bounding box up, absorbs float noise such as
/// `100.00000000000001`.
const BOUNDS_EPSILON: f64 = 1e-9;

/// Sine and cosine of an angle in degrees, exact for multiples of 90°.
fn sin_cos_degrees(angle_degrees: f64) -> (f64, f64) {
    let turn = angle_degrees.rem_euclid(360.0);
    if turn == 0.0 {
        (0.0, 1.0)
    } else if turn == 90.0 {
        (1.0, 0.0)
    } else if turn == 180.0 {
        (0.0, -1.0)
    } else if turn == 270.0 {
        (-1.0, 0.0)
    } else {
        angle_degrees.to_radians().sin_cos()
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// ```text
/// new_w = ceil(|w * cos θ| + |h * sin θ|)
/// new_h = ceil(|w * sin θ| + |h * cos θ|)
/// ```
///
/// Quarter turns swap (or keep) the dimensions exactly.
///
/// # Errors
///
/// Returns [`InvalidDimensionError::NonPositive`] if the angle is not finite
/// or the source has a zero dimension.
pub fn compute_rotated_bounds(
    width: u32,
    height: u32,
    angle_degrees: f64,
) -> Result<(u32, u32), InvalidDimensionError> {
    check_positive(width as i64, height as i64)?;
    if !angle_degrees.is_finite() {
        return Err(InvalidDimensionError::NonPositive { width: 0, height: 0 });
    }

    let (sin, cos) = sin_cos_degrees(angle_degrees);
    let (w, h) = (width as f64, height as f64);

    let new_w = ((w * cos).abs() + (h * sin).abs() - BOUNDS_EPSILON).ceil();
    let new_h = ((w * sin).abs() + (h * cos).abs() - BOUNDS_EPSILON).ceil();

    if new_w > u32::MAX as f64 || new_h > u32::MAX as f64 {
        return Err(InvalidDimensionError::TooLarge {
            width: new_w as u64,
            height: new_h as u64,
            limit: u32::MAX as u64,
        });
    }

    let (new_w, new_h) = (new_w as u32, new_h as u32);
    check_positive(new_w as i64, new_h as i64)?;
    Ok((new_w, new_h))
}

/// Rotate an image about its centre by `angle_degrees` (clockwise).
///
/// The canvas grows to hold the whole rotated image, nothing is clipped.
/// An angle of exactly `0.0` returns the input as-is.
///
/// # Errors
///
/// Returns [`InvalidDimensionError`] if the raster is malformed or the angle
/// is not finite.
pub fn apply_rotation(image: Raster, angle_degrees: f64) -> Result<Raster, InvalidDimensionError> {
    if angle_degrees == 0.0 {
        return Ok(image);
    }
    image.validate()?;

    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees)?;
    let (sin, cos) = sin_cos_degrees(angle_degrees);

    let (src_w, src_h) = (image.width as f64, image.height as f64);
    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = Raster::blank(dst_w, dst_h)?;
    let dst_stride = output.stride();

    for (dst_y, row) in output.pixels.chunks_exact_mut(dst_stride).enumerate() {
        let dy = dst_y as f64 + 0.5 - dst_cy;

        for (dst_x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let dx = dst_x as f64 + 0.5 - dst_cx;

            let src_x = dx * cos + dy * sin + src_cx;
            let src_y = -dx * sin + dy * cos + src_cy;

            // Out of bounds: leave transparent black
            if !(0.0..src_w).contains(&src_x) || !(0.0..src_h).contains(&src_y) {
                continue;
            }

            let src_idx = image.index(src_x as u32, src_y as u32);
            px.copy_from_slice(&image.pixels[src_idx..src_idx + CHANNELS]);
        }
    }

    Ok(output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn raster_strategy() -> impl Strategy<Value = Raster> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            let len = (w * h) as usize * CHANNELS;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |pixels| Raster::new(w, h, pixels).unwrap())
        })
    }

    /// Opaque image whose red and green channels hold each pixel's (x, y).
    fn coordinate_raster(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height) as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        Raster::new(width, height, pixels).unwrap()
    }

    proptest! {
        /// Property: Rotating by θ and back by −θ returns every interior
        /// pixel to within one pixel of where it started.
        #[test]
        fn prop_rotate_back_restores_layout(
            (w, h) in (6u32..=40, 6u32..=40),
            angle in -180.0f64..180.0,
        ) {
            let there = apply_rotation(coordinate_raster(w, h), angle).unwrap();
            let back = apply_rotation(there, -angle).unwrap();

            let (bw, bh) = back.dimensions();
            let (ox, oy) = ((bw - w) / 2, (bh - h) / 2);
            for y in 2..h - 2 {
                for x in 2..w - 2 {
                    let px = back.pixel(x + ox, y + oy).unwrap();
                    prop_assert_eq!(px[3], 255);
                    prop_assert!((px[0] as i32 - x as i32).abs() <= 1, "x {} came back as {}", x, px[0]);
                    prop_assert!((px[1] as i32 - y as i32).abs() <= 1, "y {} came back as {}", y, px[1]);
                }
            }
        }

        /// Property: Output buffer always matches the bounding box.
        #[test]
        fn prop_output_matches_bounds(
            img in raster_strategy(),
            angle in -720.0f64..720.0,
        ) {
            let expected = if angle == 0.0 {
                img.dimensions()
            } else {
                compute_rotated_bounds(img.width, img.height, angle).unwrap()
            };
            let result = apply_rotation(img, angle).unwrap();
            prop_assert_eq!(result.dimensions(), expected);
            prop_assert!(result.validate().is_ok());
        }

        /// Property: The bounding box never clips the source.
        #[test]
        fn prop_bounds_contain_source_area(
            (w, h) in (1u32..=200, 1u32..=200),
            angle in -360.0f64..360.0,
        ) {
            let (nw, nh) = compute_rotated_bounds(w, h, angle).unwrap();
            prop_assert!(nw as u64 * nh as u64 >= w as u64 * h as u64);
        }

        /// Property: Rotating by a quarter turn and back is lossless.
        #[test]
        fn prop_quarter_turn_roundtrip(
            img in raster_strategy(),
            quarter in prop::sample::select(vec![90.0f64, 180.0, 270.0, -90.0]),
        ) {
            let there = apply_rotation(img.clone(), quarter).unwrap();
            let back = apply_rotation(there, -quarter).unwrap();
            prop_assert_eq!(back, img);
        }
    }
}
