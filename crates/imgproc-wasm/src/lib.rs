//! imgproc WASM - WebAssembly bindings for the imgproc pipeline
//!
//! This crate exposes the imgproc-core transform pipeline to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `process` - Run the pipeline on encoded bytes, probe image headers
//! - `filters` - Filter catalog for building pickers
//! - `types` - WASM-compatible wrapper types for results
//!
//! # Usage
//!
//! ```typescript
//! import init, { process_image, list_filters } from '@imgproc/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = process_image(bytes, { width: 800, filter: 'warm' });
//! console.log(`${out.width}x${out.height} ${out.content_type}`);
//! ```

use wasm_bindgen::prelude::*;

mod filters;
mod process;
mod types;
mod utils;

pub use filters::list_filters;
pub use process::{probe_image, process_image, process_image_form};
pub use types::{JsImageInfo, JsProcessedImage};

/// Initialize the WASM module (called automatically on load)
///
/// Installs the console logger and panic hook. Pipeline summaries are logged
/// at debug level, so they only show in debug builds.
#[wasm_bindgen(start)]
pub fn init() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    utils::set_panic_hook();
    log::info!("imgproc-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
