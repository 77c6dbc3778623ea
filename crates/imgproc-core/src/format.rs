//! Container formats the pipeline reads and writes.

use serde::{Deserialize, Serialize};

/// Output (and input) container format.
///
/// Names are parsed leniently: `jpg`/`jpeg`/`png` in any case, and anything
/// else falls back to JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ImageFormat {
    /// Lossy JPEG, honours the quality setting.
    #[default]
    Jpeg,
    /// Lossless PNG, quality is ignored.
    Png,
}

impl ImageFormat {
    /// MIME type sent alongside the encoded bytes.
    pub fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// Conventional file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        }
    }

    /// Whether the encoder uses the quality setting.
    pub fn is_lossy(self) -> bool {
        matches!(self, ImageFormat::Jpeg)
    }

    /// Detect the container from its magic bytes.
    ///
    /// Returns `None` for anything that is not JPEG or PNG.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes).ok()? {
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::Png => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// The matching `image` crate format.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

impl From<&str> for ImageFormat {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "png" => ImageFormat::Png,
            _ => ImageFormat::Jpeg,
        }
    }
}

impl From<String> for ImageFormat {
    fn from(value: String) -> Self {
        ImageFormat::from(value.as_str())
    }
}

impl From<ImageFormat> for &'static str {
    fn from(value: ImageFormat) -> Self {
        value.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(ImageFormat::from("jpg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from("JPEG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from("png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from(" PNG "), ImageFormat::Png);
    }

    #[test]
    fn test_unknown_falls_back_to_jpeg() {
        assert_eq!(ImageFormat::from("webp"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from(""), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from("gif"), ImageFormat::Jpeg);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(ImageFormat::Jpeg.content_type(), "image/jpeg");
        assert_eq!(ImageFormat::Png.content_type(), "image/png");
        assert_eq!(ImageFormat::default().content_type(), "image/jpeg");
    }

    #[test]
    fn test_detect_magic_bytes() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(ImageFormat::detect(&png), Some(ImageFormat::Png));

        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];
        assert_eq!(ImageFormat::detect(&jpeg), Some(ImageFormat::Jpeg));

        assert_eq!(ImageFormat::detect(b"GIF89a......"), None);
        assert_eq!(ImageFormat::detect(&[]), None);
    }

    #[test]
    fn test_lossy() {
        assert!(ImageFormat::Jpeg.is_lossy());
        assert!(!ImageFormat::Png.is_lossy());
    }
}
