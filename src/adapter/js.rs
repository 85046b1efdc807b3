//! JavaScript-hosted grid
//!
//! The host passes any object exposing the methods below (duck typed). Cell
//! identity on the JS side is usually a `[data-row][data-column]` element
//! lookup; markers are a CSS class plus a `data-*` flag so the host can
//! find every marked cell again when clearing.

use wasm_bindgen::prelude::*;

use crate::config::MarkerClasses;
use crate::errors::GridError;
use crate::models::{CellBinding, CellGeometry, Coordinate, Marker};

use super::GridAdapter;

#[wasm_bindgen]
extern "C" {
    /// Host object implementing the grid capabilities
    pub type JsGridHost;

    #[wasm_bindgen(method, js_name = rowCount)]
    fn row_count(this: &JsGridHost) -> usize;

    #[wasm_bindgen(method, js_name = colCount)]
    fn col_count(this: &JsGridHost) -> usize;

    #[wasm_bindgen(method, js_name = hasCell)]
    fn has_cell(this: &JsGridHost, row: usize, col: usize) -> bool;

    /// `null` or `undefined` when no cell resolves; `""` for an empty cell
    #[wasm_bindgen(method, js_name = getValue)]
    fn get_value(this: &JsGridHost, row: usize, col: usize) -> Option<String>;

    /// Returns false when no cell resolves
    #[wasm_bindgen(method, js_name = setValue)]
    fn set_value(this: &JsGridHost, row: usize, col: usize, value: &str) -> bool;

    /// Returns false when no cell resolves
    #[wasm_bindgen(method, js_name = setMarker)]
    fn set_marker(this: &JsGridHost, row: usize, col: usize, class_name: &str, dataset_key: &str) -> bool;

    #[wasm_bindgen(method, js_name = clearMarker)]
    fn clear_marker(this: &JsGridHost, class_name: &str, dataset_key: &str);

    /// `{ offsetTop, offsetLeft, width, height }` or null
    #[wasm_bindgen(method, js_name = getGeometry)]
    fn get_geometry(this: &JsGridHost, row: usize, col: usize) -> JsValue;

    /// `{ recordId, fieldName, lookupField?, lookupObject? }` or null
    #[wasm_bindgen(method, js_name = getBinding)]
    fn get_binding(this: &JsGridHost, row: usize, col: usize) -> JsValue;

    #[wasm_bindgen(method, js_name = setEditable)]
    fn set_editable(this: &JsGridHost, row: usize, col: usize, editable: bool);

    #[wasm_bindgen(method, js_name = focusCell)]
    fn focus_cell(this: &JsGridHost, row: usize, col: usize);
}

/// [`GridAdapter`] backed by a JavaScript host object
pub struct JsGridAdapter {
    host: JsGridHost,
    classes: MarkerClasses,
}

impl JsGridAdapter {
    pub fn new(host: JsGridHost, classes: MarkerClasses) -> Self {
        Self { host, classes }
    }

    fn decode<T: serde::de::DeserializeOwned>(value: JsValue, at: Coordinate, what: &str) -> Option<T> {
        if value.is_null() || value.is_undefined() {
            return None;
        }
        match serde_wasm_bindgen::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log::warn!("Ignoring malformed {} for ({}, {}): {}", what, at.row, at.col, e);
                None
            }
        }
    }
}

impl GridAdapter for JsGridAdapter {
    fn row_count(&self) -> usize {
        self.host.row_count()
    }

    fn col_count(&self) -> usize {
        self.host.col_count()
    }

    fn has_cell(&self, at: Coordinate) -> bool {
        self.host.has_cell(at.row, at.col)
    }

    fn read_value(&self, at: Coordinate) -> Option<String> {
        self.host.get_value(at.row, at.col)
    }

    fn write_value(&mut self, at: Coordinate, value: &str) -> Result<(), GridError> {
        if self.host.set_value(at.row, at.col, value) {
            Ok(())
        } else {
            Err(GridError::MissingCell(at))
        }
    }

    fn set_marker(&mut self, at: Coordinate, marker: Marker) -> Result<(), GridError> {
        if self.host.set_marker(at.row, at.col, self.classes.class_for(marker), marker.dataset_key()) {
            Ok(())
        } else {
            Err(GridError::MissingCell(at))
        }
    }

    fn clear_marker(&mut self, marker: Marker) {
        self.host.clear_marker(self.classes.class_for(marker), marker.dataset_key());
    }

    fn geometry(&self, at: Coordinate) -> Option<CellGeometry> {
        Self::decode(self.host.get_geometry(at.row, at.col), at, "geometry")
    }

    fn binding(&self, at: Coordinate) -> Option<CellBinding> {
        Self::decode(self.host.get_binding(at.row, at.col), at, "binding")
    }

    fn set_editable(&mut self, at: Coordinate, editable: bool) {
        self.host.set_editable(at.row, at.col, editable);
    }

    fn focus(&mut self, at: Coordinate) {
        self.host.focus_cell(at.row, at.col);
    }
}
