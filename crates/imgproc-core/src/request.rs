//! Per-request transform parameters.

use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::format::ImageFormat;
use crate::transform::{FlipMode, ResampleFilter};

/// JPEG quality used when none (or an out-of-range value) is requested.
pub const DEFAULT_QUALITY: u8 = 85;

/// The edits requested for one image.
///
/// Every field is optional when deserializing; missing fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformRequest {
    /// Target width in pixels (<= 0 means unspecified)
    pub width: i64,
    /// Target height in pixels (<= 0 means unspecified)
    pub height: i64,
    /// JPEG quality (1 to 100; anything else means the default, 85)
    pub quality: i64,
    /// Output container (unknown names fall back to JPEG)
    pub format: ImageFormat,
    /// Color filter (unknown names mean no filter)
    pub filter: Filter,
    /// Rotation in degrees, clockwise (0 means no rotation)
    pub rotate: f64,
    /// Mirror mode (unknown names mean no flip)
    pub flip: FlipMode,
    /// Sampling used by the resize stage
    pub resample: ResampleFilter,
}

impl Default for TransformRequest {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            quality: DEFAULT_QUALITY as i64,
            format: ImageFormat::Jpeg,
            filter: Filter::None,
            rotate: 0.0,
            flip: FlipMode::None,
            resample: ResampleFilter::Nearest,
        }
    }
}

impl TransformRequest {
    /// Create a request that re-encodes the image as JPEG without edits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Quality handed to the encoder: the requested value if it is within
    /// 1..=100, otherwise [`DEFAULT_QUALITY`].
    pub fn resolved_quality(&self) -> u8 {
        match u8::try_from(self.quality) {
            Ok(q @ 1..=100) => q,
            _ => DEFAULT_QUALITY,
        }
    }

    /// Check if the request asks for no edits at all (a plain re-encode).
    pub fn is_passthrough(&self) -> bool {
        self.rotate == 0.0
            && self.flip == FlipMode::None
            && self.filter == Filter::None
            && self.width <= 0
            && self.height <= 0
    }

    /// Build a request from string key/value pairs as an HTML form sends
    /// them.
    ///
    /// Parsing is lenient: unknown keys are ignored, numbers that don't parse
    /// count as unspecified (0), and unknown enum names take their fallback.
    /// A missing or unparsable quality resolves to the default.
    pub fn from_form_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = Self::default();
        for (key, value) in fields {
            let value = value.trim();
            match key {
                "width" => request.width = value.parse().unwrap_or(0),
                "height" => request.height = value.parse().unwrap_or(0),
                "quality" => request.quality = value.parse().unwrap_or(DEFAULT_QUALITY as i64),
                "format" => request.format = ImageFormat::from(value),
                "filter" => request.filter = Filter::from(value),
                "rotate" => {
                    request.rotate = value.parse().ok().filter(|r: &f64| r.is_finite()).unwrap_or(0.0)
                }
                "flip" => request.flip = FlipMode::from(value),
                "resample" => {
                    request.resample = match value.to_ascii_lowercase().as_str() {
                        "bilinear" => ResampleFilter::Bilinear,
                        _ => ResampleFilter::Nearest,
                    }
                }
                _ => {}
            }
        }
        request
    }
}
