//! Mirror an image horizontally, vertically, or both.
//!
//! ```text
//! source        horizontal    vertical      both
//! ┌───────┐     ┌───────┐     ┌───────┐     ┌───────┐
//! │a b c d│     │d c b a│     │e f g h│     │h g f e│
//! │e f g h│     │h g f e│     │a b c d│     │d c b a│
//! └───────┘     └───────┘     └───────┘     └───────┘
//! ```
//!
//! Every output pixel has an exact source pixel, so flipping never samples
//! or clips. The pixels are swapped inside the owned buffer.

use serde::{Deserialize, Serialize};

use crate::raster::{InvalidDimensionError, Raster, CHANNELS};

/// Which axes to mirror.
///
/// Parsing from a string never fails: unknown names select [`FlipMode::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum FlipMode {
    #[default]
    None,
    /// Pixel (x, y) comes from (W - 1 - x, y).
    Horizontal,
    /// Pixel (x, y) comes from (x, H - 1 - y).
    Vertical,
    /// Pixel (x, y) comes from (W - 1 - x, H - 1 - y).
    Both,
}

impl FlipMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FlipMode::None => "none",
            FlipMode::Horizontal => "horizontal",
            FlipMode::Vertical => "vertical",
            FlipMode::Both => "both",
        }
    }

    fn mirrors_x(self) -> bool {
        matches!(self, FlipMode::Horizontal | FlipMode::Both)
    }

    fn mirrors_y(self) -> bool {
        matches!(self, FlipMode::Vertical | FlipMode::Both)
    }
}

impl From<&str> for FlipMode {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "horizontal" => FlipMode::Horizontal,
            "vertical" => FlipMode::Vertical,
            "both" => FlipMode::Both,
            _ => FlipMode::None,
        }
    }
}

impl From<String> for FlipMode {
    fn from(value: String) -> Self {
        FlipMode::from(value.as_str())
    }
}

impl From<FlipMode> for &'static str {
    fn from(value: FlipMode) -> Self {
        value.as_str()
    }
}

/// Flip an image according to `mode`.
///
/// The output always has the same dimensions as the input.
/// [`FlipMode::None`] returns the input unchanged.
///
/// # Errors
///
/// Returns [`InvalidDimensionError`] if the raster is malformed.
pub fn apply_flip(mut image: Raster, mode: FlipMode) -> Result<Raster, InvalidDimensionError> {
    image.validate()?;

    let stride = image.stride();

    if mode.mirrors_x() {
        for row in image.pixels.chunks_exact_mut(stride) {
            mirror_row(row);
        }
    }

    if mode.mirrors_y() {
        let height = image.height as usize;
        for top in 0..height / 2 {
            let bottom = height - 1 - top;
            let (upper, lower) = image.pixels.split_at_mut(bottom * stride);
            upper[top * stride..(top + 1) * stride].swap_with_slice(&mut lower[..stride]);
        }
    }

    Ok(image)
}

/// Reverse the pixel order of one row, keeping each pixel's channel order.
#[inline]
fn mirror_row(row: &mut [u8]) {
    let width = row.len() / CHANNELS;
    for left in 0..width / 2 {
        let right = width - 1 - left;
        let (head, tail) = row.split_at_mut(right * CHANNELS);
        head[left * CHANNELS..(left + 1) * CHANNELS].swap_with_slice(&mut tail[..CHANNELS]);
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
