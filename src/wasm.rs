//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::config::ValidationOptions;
use crate::validate;

/// Validate worldbook JSON with default options.
/// Returns the full validation result as a JS object.
#[wasm_bindgen]
pub fn validate_worldbook(json: &str) -> JsValue {
    let result = validate::validate_json(json, &ValidationOptions::default());
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Validate worldbook JSON with options given as JSON. Options that fail to
/// parse fall back to the defaults.
#[wasm_bindgen]
pub fn validate_worldbook_with_options(json: &str, options_json: &str) -> JsValue {
    let options = serde_json::from_str::<ValidationOptions>(options_json).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid validation options; using defaults");
        ValidationOptions::default()
    });
    let result = validate::validate_json(json, &options);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Whether the worldbook passes (no critical findings).
#[wasm_bindgen]
pub fn worldbook_passes(json: &str) -> bool {
    validate::validate_json(json, &ValidationOptions::default()).passed()
}
