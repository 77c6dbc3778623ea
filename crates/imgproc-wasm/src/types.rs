//! WASM-compatible wrapper types for pipeline results.
//!
//! These wrap the core result types and expose them to JavaScript through
//! getters, copying bytes out of WASM memory only on request.

use imgproc_core::{ImageInfo, ProcessedImage};
use wasm_bindgen::prelude::*;

/// An encoded image produced by [`process_image`](crate::process_image).
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. `bytes()` copies them into a
/// `Uint8Array`; call it once and keep the result.
#[wasm_bindgen]
pub struct JsProcessedImage {
    inner: ProcessedImage,
}

#[wasm_bindgen]
impl JsProcessedImage {
    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// MIME type of the encoded bytes (`image/jpeg` or `image/png`)
    #[wasm_bindgen(getter)]
    pub fn content_type(&self) -> String {
        self.inner.content_type().to_string()
    }

    /// File extension matching the content type, without the dot
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.inner.format.extension().to_string()
    }

    /// Size of the encoded output in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes.len()
    }

    /// Returns the encoded image as a Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }
}

impl From<ProcessedImage> for JsProcessedImage {
    fn from(inner: ProcessedImage) -> Self {
        Self { inner }
    }
}

/// Header information read by [`probe_image`](crate::probe_image).
#[wasm_bindgen]
pub struct JsImageInfo {
    inner: ImageInfo,
}

#[wasm_bindgen]
impl JsImageInfo {
    /// Detected container name (`jpeg` or `png`)
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format.as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }
}

impl From<ImageInfo> for JsImageInfo {
    fn from(inner: ImageInfo) -> Self {
        Self { inner }
    }
}
