//! Per-cell metadata reported by the grid host

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use super::coords::Coordinate;

/// Named boolean marker carried by a cell for styling
#[wasm_bindgen]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum Marker {
    /// The single focused/editable cell
    ActiveCell = 0,

    /// Part of the current selection area
    SelectedArea = 1,

    /// Part of the last copied block
    Copied = 2,
}

impl Marker {
    pub const ALL: [Marker; 3] = [Marker::ActiveCell, Marker::SelectedArea, Marker::Copied];

    /// Default CSS class toggled on the cell element
    pub fn css_class(&self) -> &'static str {
        match self {
            Marker::ActiveCell => "selected-cell-border",
            Marker::SelectedArea => "selected-cell",
            Marker::Copied => "selected-copied-cell",
        }
    }

    /// Dataset property mirrored on the cell element (`data-<key>="true"`)
    pub fn dataset_key(&self) -> &'static str {
        match self {
            Marker::ActiveCell => "selectedcell",
            Marker::SelectedArea => "selected",
            Marker::Copied => "copied",
        }
    }
}

/// Record/field binding of a cell, used for value-changed notifications and
/// the bulk-edit eligibility check
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CellBinding {
    /// Id of the record that owns the row
    pub record_id: String,

    /// Field (column) API name
    pub field_name: String,

    /// Relationship field a bulk edit would target
    #[serde(default)]
    pub lookup_field: Option<String>,

    /// Related object type of the lookup; absent for plain (non-lookup) columns
    #[serde(default)]
    pub lookup_object: Option<String>,
}

impl CellBinding {
    pub fn new(record_id: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            field_name: field_name.into(),
            lookup_field: None,
            lookup_object: None,
        }
    }

    /// Attach lookup metadata
    pub fn with_lookup(mut self, field: impl Into<String>, object: impl Into<String>) -> Self {
        self.lookup_field = Some(field.into());
        self.lookup_object = Some(object.into());
        self
    }
}

/// A value written into a cell by one of the editing operations
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CellWrite {
    pub coordinate: Coordinate,
    pub value: String,
}

/// Rendered position and size of a cell, in CSS pixels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CellGeometry {
    pub offset_top: f64,
    pub offset_left: f64,
    pub width: f64,
    pub height: f64,
}

impl CellGeometry {
    pub fn new(offset_top: f64, offset_left: f64, width: f64, height: f64) -> Self {
        Self { offset_top, offset_left, width, height }
    }
}
