//! Filter catalog bindings.

use imgproc_core::Filter;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// One entry of the filter catalog as seen from JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FilterEntry {
    id: &'static str,
    name: &'static str,
}

pub(crate) fn filter_entries() -> Vec<FilterEntry> {
    Filter::ALL
        .iter()
        .map(|f| FilterEntry {
            id: f.id(),
            name: f.display_name(),
        })
        .collect()
}

/// List the available color filters as `{ id, name }` objects.
///
/// `id` is the value to pass as `filter` to `process_image`; `name` is a
/// label suitable for a picker.
#[wasm_bindgen]
pub fn list_filters() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&filter_entries()).map_err(|e| JsValue::from_str(&e.to_string()))
}
