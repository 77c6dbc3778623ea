//! Pipeline WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { process_image } from '@imgproc/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = process_image(bytes, { rotate: 90, filter: 'sepia', format: 'png' });
//! const blob = new Blob([out.bytes()], { type: out.content_type });
//! ```

use imgproc_core::{probe, PipelineError, ProcessorConfig, TransformRequest};
use wasm_bindgen::prelude::*;

use crate::types::{JsImageInfo, JsProcessedImage};

/// Decode an image, apply the requested edits and re-encode it.
///
/// # Arguments
///
/// * `bytes` - Encoded JPEG or PNG file contents
/// * `options` - Plain object with any of `width`, `height`, `quality`,
///   `format`, `filter`, `rotate`, `flip`, `resample`. Missing fields use
///   their defaults; `undefined` or `null` re-encodes as JPEG with no edits.
///
/// # Errors
///
/// Returns a string describing the failure if the options object has the
/// wrong shape, the input cannot be decoded, a stage would need an invalid
/// canvas, or encoding fails.
#[wasm_bindgen]
pub fn process_image(bytes: &[u8], options: JsValue) -> Result<JsProcessedImage, JsValue> {
    let request = if options.is_undefined() || options.is_null() {
        TransformRequest::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    run(bytes, &request).map_err(to_js_error)
}

/// Process with string key/value pairs as an HTML form submits them.
///
/// `fields` is an array of `[key, value]` pairs (e.g. `[...formData]`
/// without the file entry). Unparsable values fall back to defaults.
#[wasm_bindgen]
pub fn process_image_form(bytes: &[u8], fields: JsValue) -> Result<JsProcessedImage, JsValue> {
    let pairs: Vec<(String, String)> =
        serde_wasm_bindgen::from_value(fields).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let request =
        TransformRequest::from_form_fields(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    run(bytes, &request).map_err(to_js_error)
}

/// Read the container and dimensions of an image without decoding pixels.
#[wasm_bindgen]
pub fn probe_image(bytes: &[u8]) -> Result<JsImageInfo, JsValue> {
    probe(bytes)
        .map(JsImageInfo::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn run(bytes: &[u8], request: &TransformRequest) -> Result<JsProcessedImage, PipelineError> {
    imgproc_core::Pipeline::new(ProcessorConfig::default())
        .process(bytes, request)
        .map(JsProcessedImage::from)
}

fn to_js_error(err: PipelineError) -> JsValue {
    log::warn!("process_image failed: {err}");
    JsValue::from_str(&err.to_string())
}
