//! Error types for grid operations
//!
//! Inside the engine none of these are fatal: precondition failures
//! (nothing selected, nothing copied, nothing to undo) turn into no-ops.
//! Only the boundary variants (config, event decoding, serialization)
//! are surfaced to JavaScript.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::models::Coordinate;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Host reports no cell at the coordinate (e.g. not rendered)
    #[error("No cell at row {}, column {}", .0.row, .0.col)]
    MissingCell(Coordinate),

    /// Copy requested without a selection area
    #[error("Nothing is selected")]
    NoSelection,

    /// Paste requested before any copy
    #[error("Clipboard is empty")]
    EmptyClipboard,

    /// Undo requested with nothing recorded
    #[error("No undo history available")]
    EmptyHistory,

    /// Fill rectangle contains a cell without lookup metadata
    #[error("Bulk edit blocked: cell at row {}, column {} has no lookup object", .0.row, .0.col)]
    IneligibleBulkEdit(Coordinate),

    /// Fill requested with no active cell or no drag in progress
    #[error("No fill drag in progress")]
    NoFillDrag,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_wasm_bindgen::Error> for GridError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        GridError::Serialization(err.to_string())
    }
}

impl From<GridError> for JsValue {
    fn from(err: GridError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
