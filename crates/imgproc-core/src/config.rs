//! Resource limits for a pipeline instance.

use serde::{Deserialize, Serialize};

use crate::decode::DecodeError;
use crate::raster::InvalidDimensionError;

/// Largest accepted upload: 20 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 20 << 20;

/// Largest canvas any stage may allocate: 100 megapixels (400 MB of RGBA).
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

/// Limits applied by [`Pipeline`](crate::Pipeline) to every request.
///
/// Deserializes with per-field defaults, so a config file only needs the
/// values it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Maximum size of the encoded input in bytes.
    pub max_input_bytes: usize,
    /// Maximum pixel count of the decoded image and of any intermediate
    /// canvas (rotation bounding box, resize target).
    pub max_pixels: u64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl ProcessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    /// Reject an upload larger than `max_input_bytes`.
    pub fn check_input(&self, size: usize) -> Result<(), DecodeError> {
        if size > self.max_input_bytes {
            return Err(DecodeError::InputTooLarge {
                size,
                limit: self.max_input_bytes,
            });
        }
        Ok(())
    }

    /// Reject a canvas with more than `max_pixels` pixels.
    pub fn check_canvas(&self, width: u32, height: u32) -> Result<(), InvalidDimensionError> {
        if width as u64 * height as u64 > self.max_pixels {
            return Err(InvalidDimensionError::TooLarge {
                width: width as u64,
                height: height as u64,
                limit: self.max_pixels,
            });
        }
        Ok(())
    }
}
