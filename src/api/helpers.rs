//! Shared helpers for WASM API operations
//!
//! Common patterns for moving values across the JS boundary with errors
//! logged and turned into `JsValue` strings.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::errors::GridError;

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let err = GridError::Serialization(format!("{}: {}", error_context, e));
        log::error!("{}", err);
        JsValue::from(err)
    })
}

/// Deserialize an optional options object; `undefined`/`null` give the default
pub fn deserialize_or_default<T: DeserializeOwned + Default>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    deserialize(value, error_context)
}

/// Serialize a value to JavaScript with automatic error handling.
///
/// Maps come out as plain objects so the host can read fields directly.
pub fn serialize<T: Serialize + ?Sized>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(|e| {
        let err = GridError::Serialization(format!("{}: {}", error_context, e));
        log::error!("{}", err);
        JsValue::from(err)
    })
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Log a boundary error and convert it to a JsValue
pub fn boundary_error(err: GridError) -> JsValue {
    log::error!("{}", err);
    JsValue::from(err)
}
