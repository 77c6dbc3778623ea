//! Per-pixel color filters.
//!
//! Every filter except [`Filter::None`] is an affine color matrix applied to
//! the R, G, B channels of each pixel:
//!
//! ```text
//! red   = m[0][0]*r + m[0][1]*g + m[0][2]*b + m[0][3]
//! green = m[1][0]*r + m[1][1]*g + m[1][2]*b + m[1][3]
//! blue  = m[2][0]*r + m[2][1]*g + m[2][2]*b + m[2][3]
//! ```
//!
//! Channels are in the 0..=255 range. Results are clamped to that range and
//! truncated to `u8`. Alpha is passed through untouched and there is no
//! spatial dependency, so pixels can be processed in any order.
//!
//! # Translucent pixels
//!
//! The matrix reads alpha-premultiplied channels, `((c * 0x101) * (a * 0x101)
//! / 0xffff) >> 8`, the high byte of a 16-bit premultiplied sample. The result
//! is treated as premultiplied too and divided back by alpha (rounded,
//! saturating at 255) to stay in the straight [`Raster`] layout. Flattening an
//! output pixel onto black therefore gives `min(filtered, alpha)`. Opaque
//! pixels are unaffected. Fully transparent pixels keep the filtered value
//! as their (invisible) color.

use serde::{Deserialize, Serialize};

use crate::raster::{InvalidDimensionError, Raster, CHANNELS};

/// Color filter selector.
///
/// Parsing from a string never fails: unknown names select [`Filter::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Filter {
    /// Identity.
    #[default]
    None,
    /// BT.601 luma replicated to all three channels.
    Grayscale,
    /// Classic brown-tone matrix.
    Sepia,
    /// 255 minus each channel.
    Invert,
    /// Damp red and green, boost blue.
    Cool,
    /// Boost red, damp blue.
    Warm,
}

impl Filter {
    /// Every selectable filter, in display order.
    pub const ALL: [Filter; 6] = [
        Filter::None,
        Filter::Grayscale,
        Filter::Sepia,
        Filter::Invert,
        Filter::Cool,
        Filter::Warm,
    ];

    /// Stable identifier used on the wire.
    pub fn id(self) -> &'static str {
        match self {
            Filter::None => "none",
            Filter::Grayscale => "grayscale",
            Filter::Sepia => "sepia",
            Filter::Invert => "invert",
            Filter::Cool => "cool",
            Filter::Warm => "warm",
        }
    }

    /// Human readable name for filter pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            Filter::None => "No filter",
            Filter::Grayscale => "Black & white",
            Filter::Sepia => "Sepia",
            Filter::Invert => "Invert",
            Filter::Cool => "Cool",
            Filter::Warm => "Warm",
        }
    }

    pub fn is_identity(self) -> bool {
        self == Filter::None
    }

    /// The color matrix implementing this filter, `None` for the identity.
    pub fn matrix(self) -> Option<ColorMatrix> {
        match self {
            Filter::None => None,
            Filter::Grayscale => Some(ColorMatrix::GRAYSCALE),
            Filter::Sepia => Some(ColorMatrix::SEPIA),
            Filter::Invert => Some(ColorMatrix::INVERT),
            Filter::Cool => Some(ColorMatrix::COOL),
            Filter::Warm => Some(ColorMatrix::WARM),
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        let value = value.trim().to_ascii_lowercase();
        Filter::ALL
            .into_iter()
            .find(|f| f.id() == value)
            .unwrap_or_default()
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        Filter::from(value.as_str())
    }
}

impl From<Filter> for &'static str {
    fn from(value: Filter) -> Self {
        value.id()
    }
}

/// A 3x4 affine color matrix: three coefficients and one offset per output
/// channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f64; 4]; 3]);

impl ColorMatrix {
    pub const GRAYSCALE: ColorMatrix = ColorMatrix([
        [0.299, 0.587, 0.114, 0.0],
        [0.299, 0.587, 0.114, 0.0],
        [0.299, 0.587, 0.114, 0.0],
    ]);

    pub const SEPIA: ColorMatrix = ColorMatrix([
        [0.393, 0.769, 0.189, 0.0],
        [0.349, 0.686, 0.168, 0.0],
        [0.272, 0.534, 0.131, 0.0],
    ]);

    pub const INVERT: ColorMatrix = ColorMatrix([
        [-1.0, 0.0, 0.0, 255.0],
        [0.0, -1.0, 0.0, 255.0],
        [0.0, 0.0, -1.0, 255.0],
    ]);

    pub const COOL: ColorMatrix = ColorMatrix([
        [0.9, 0.0, 0.0, 0.0],
        [0.0, 0.9, 0.0, 0.0],
        [0.0, 0.0, 1.1, 0.0],
    ]);

    pub const WARM: ColorMatrix = ColorMatrix([
        [1.1, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.9, 0.0],
    ]);

    /// Map one RGB triple through the matrix.
    #[inline]
    pub fn transform(&self, rgb: [u8; 3]) -> [u8; 3] {
        let [r, g, b] = rgb.map(f64::from);
        self.0
            .map(|row| to_channel(row[0] * r + row[1] * g + row[2] * b + row[3]))
    }
}

/// Clamp to 0..=255, then truncate.
#[inline]
fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// High byte of the 16-bit premultiplied sample of channel `c` at alpha `a`.
#[inline]
fn premultiply(c: u8, a: u8) -> u8 {
    let c16 = c as u32 * 0x101;
    let a16 = a as u32 * 0x101;
    ((c16 * a16 / 0xffff) >> 8) as u8
}

/// Straight channel for a premultiplied `value`, rounded and saturating when
/// `value > a`.
#[inline]
fn unpremultiply(value: u8, a: u8) -> u8 {
    if a == 0 {
        return value;
    }
    let a = a as u32;
    ((value as u32 * 255 + a / 2) / a).min(255) as u8
}

/// Apply a color filter to every pixel of the raster.
///
/// The raster's buffer is rewritten in place; alpha is never touched. See the
/// module docs for how translucent pixels are sampled.
/// [`Filter::None`] returns the input unchanged.
///
/// # Errors
///
/// Returns [`InvalidDimensionError`] if the raster's buffer doesn't match its
/// dimensions. The filter selector itself can never cause a failure.
pub fn apply_filter(mut image: Raster, filter: Filter) -> Result<Raster, InvalidDimensionError> {
    image.validate()?;

    let Some(matrix) = filter.matrix() else {
        return Ok(image);
    };

    for px in image.pixels.chunks_exact_mut(CHANNELS) {
        let a = px[3];
        let rgb = [premultiply(px[0], a), premultiply(px[1], a), premultiply(px[2], a)];
        let [r, g, b] = matrix.transform(rgb);
        px[0] = unpremultiply(r, a);
        px[1] = unpremultiply(g, a);
        px[2] = unpremultiply(b, a);
    }

    Ok(image)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn raster_strategy() -> impl Strategy<Value = Raster> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            let len = (w * h) as usize * CHANNELS;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |pixels| Raster::new(w, h, pixels).unwrap())
        })
    }

    fn opaque_raster_strategy() -> impl Strategy<Value = Raster> {
        raster_strategy().prop_map(|mut img| {
            for px in img.pixels.chunks_exact_mut(CHANNELS) {
                px[3] = 255;
            }
            img
        })
    }

    fn filter_strategy() -> impl Strategy<Value = Filter> {
        prop::sample::select(Filter::ALL.to_vec())
    }

    proptest! {
        /// Property: The identity filter returns every pixel unchanged.
        #[test]
        fn prop_none_is_identity(img in raster_strategy()) {
            let out = apply_filter(img.clone(), Filter::None).unwrap();
            prop_assert_eq!(out, img);
        }

        /// Property: Grayscale output has R == G == B everywhere.
        #[test]
        fn prop_grayscale_is_neutral(img in raster_strategy()) {
            let out = apply_filter(img, Filter::Grayscale).unwrap();
            for px in out.pixels.chunks_exact(CHANNELS) {
                prop_assert_eq!(px[0], px[1]);
                prop_assert_eq!(px[1], px[2]);
            }
        }

        /// Property: Inverting an opaque image twice restores it.
        #[test]
        fn prop_invert_is_involution(img in opaque_raster_strategy()) {
            let once = apply_filter(img.clone(), Filter::Invert).unwrap();
            let twice = apply_filter(once, Filter::Invert).unwrap();
            prop_assert_eq!(twice, img);
        }

        /// Property: Alpha and dimensions survive every filter.
        #[test]
        fn prop_alpha_and_shape_preserved(img in raster_strategy(), filter in filter_strategy()) {
            let out = apply_filter(img.clone(), filter).unwrap();
            prop_assert_eq!(out.dimensions(), img.dimensions());
            for (a, b) in out.pixels.chunks_exact(CHANNELS).zip(img.pixels.chunks_exact(CHANNELS)) {
                prop_assert_eq!(a[3], b[3]);
            }
        }

        /// Property: Flattening the output onto black gives the filtered
        /// premultiplied color, capped at alpha.
        #[test]
        fn prop_flattened_output_is_premultiplied_filter(
            rgba in any::<[u8; 4]>(),
            filter in filter_strategy(),
        ) {
            let Some(matrix) = filter.matrix() else {
                return Ok(());
            };
            let a = rgba[3];
            let expected = matrix.transform([
                premultiply(rgba[0], a),
                premultiply(rgba[1], a),
                premultiply(rgba[2], a),
            ]);

            let out = apply_filter(Raster::filled(1, 1, rgba).unwrap(), filter)
                .unwrap()
                .pixel(0, 0)
                .unwrap();
            for i in 0..3 {
                let flattened = ((out[i] as u32 * a as u32 + 127) / 255) as u8;
                prop_assert_eq!(flattened, expected[i].min(a));
            }
        }

        /// Property: Pixels are independent, filtering a single pixel in
        /// isolation gives the same result as filtering it inside the image.
        #[test]
        fn prop_filter_is_per_pixel(img in raster_strategy(), filter in filter_strategy()) {
            let out = apply_filter(img.clone(), filter).unwrap();
            let (x, y) = (img.width - 1, img.height - 1);
            let alone = Raster::filled(1, 1, img.pixel(x, y).unwrap()).unwrap();
            let alone = apply_filter(alone, filter).unwrap();
            prop_assert_eq!(alone.pixel(0, 0), out.pixel(x, y));
        }
    }
}
