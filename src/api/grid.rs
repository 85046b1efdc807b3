//! `ExcelGrid` WASM class
//!
//! Thin event-translation layer: decodes DOM-level inputs (`which`,
//! `keyCode`, menu item names), forwards them to the [`GridEngine`] and
//! returns the signals raised by that event as a JS array of
//! `{ type, ...fields }` objects.

use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::adapter::{JsGridAdapter, JsGridHost};
use crate::config::GridConfig;
use crate::engine::GridEngine;
use crate::models::{ArrowKey, ContextMenuAction, Coordinate, PointerButton};

use super::helpers::{boundary_error, deserialize, deserialize_or_default, serialize};

#[wasm_bindgen]
pub struct ExcelGrid {
    engine: GridEngine<JsGridAdapter>,
}

#[wasm_bindgen]
impl ExcelGrid {
    /// Create a grid engine bound to a host object.
    ///
    /// `options` is an optional `GridConfig`-shaped object.
    #[wasm_bindgen(constructor)]
    pub fn new(host: JsGridHost, options: JsValue) -> Result<ExcelGrid, JsValue> {
        let config: GridConfig = deserialize_or_default(options, "Invalid grid options")?;
        config.validate().map_err(boundary_error)?;
        if let Ok(level) = config.level() {
            log::set_max_level(level.to_level_filter());
        }

        let adapter = JsGridAdapter::new(host, config.marker_classes.clone());
        log::info!("ExcelGrid created");
        Ok(ExcelGrid { engine: GridEngine::new(adapter, config) })
    }

    // ------------------------------------------------------------------
    // Pointer / keyboard
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = handlePointerDown)]
    pub fn handle_pointer_down(&mut self, row: usize, col: usize, which: u32) -> Result<JsValue, JsValue> {
        self.engine.pointer_down(Coordinate::new(row, col), PointerButton::from_which(which));
        self.signals()
    }

    #[wasm_bindgen(js_name = handlePointerMove)]
    pub fn handle_pointer_move(&mut self, row: usize, col: usize) -> Result<JsValue, JsValue> {
        self.engine.pointer_move(Coordinate::new(row, col));
        self.signals()
    }

    #[wasm_bindgen(js_name = handlePointerUp)]
    pub fn handle_pointer_up(&mut self, row: usize, col: usize, which: u32) -> Result<JsValue, JsValue> {
        self.engine.pointer_up(Coordinate::new(row, col), PointerButton::from_which(which));
        self.signals()
    }

    #[wasm_bindgen(js_name = handleFillHandleDown)]
    pub fn handle_fill_handle_down(&mut self, row: usize, col: usize) -> Result<JsValue, JsValue> {
        self.engine.pointer_down_fill_handle(Coordinate::new(row, col));
        self.signals()
    }

    #[wasm_bindgen(js_name = handleContextMenu)]
    pub fn handle_context_menu(&mut self, row: usize, col: usize) -> Result<JsValue, JsValue> {
        self.engine.context_menu(Coordinate::new(row, col));
        self.signals()
    }

    /// Arrow keys move the active cell; other key codes are ignored
    #[wasm_bindgen(js_name = handleKeyDown)]
    pub fn handle_key_down(&mut self, key_code: u32) -> Result<JsValue, JsValue> {
        if let Some(key) = ArrowKey::from_key_code(key_code) {
            self.engine.arrow(key);
        }
        self.signals()
    }

    /// Pointer released outside the grid
    #[wasm_bindgen(js_name = cancelDrag)]
    pub fn cancel_drag(&mut self) {
        self.engine.cancel_drag();
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = handleDoubleClick)]
    pub fn handle_double_click(&mut self, row: usize, col: usize) -> Result<JsValue, JsValue> {
        self.engine.begin_edit(Coordinate::new(row, col));
        self.signals()
    }

    #[wasm_bindgen(js_name = handleFocusIn)]
    pub fn handle_focus_in(&mut self, row: usize, col: usize) -> Result<JsValue, JsValue> {
        self.engine.focus_in(Coordinate::new(row, col));
        self.signals()
    }

    #[wasm_bindgen(js_name = handleFocusOut)]
    pub fn handle_focus_out(&mut self, row: usize, col: usize, value: &str) -> Result<JsValue, JsValue> {
        self.engine.focus_out(Coordinate::new(row, col), value);
        self.signals()
    }

    #[wasm_bindgen(js_name = handleContextMenuAction)]
    pub fn handle_context_menu_action(&mut self, name: &str) -> Result<JsValue, JsValue> {
        let action: ContextMenuAction = name.parse().map_err(boundary_error)?;
        self.engine.handle_context_menu_action(action);
        self.signals()
    }

    pub fn copy(&mut self) -> Result<JsValue, JsValue> {
        self.engine.copy();
        self.signals()
    }

    pub fn paste(&mut self) -> Result<JsValue, JsValue> {
        self.engine.paste();
        self.signals()
    }

    pub fn undo(&mut self) -> Result<JsValue, JsValue> {
        self.engine.undo();
        self.signals()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.engine.can_undo()
    }

    #[wasm_bindgen(js_name = hasUnsavedChanges)]
    pub fn has_unsaved_changes(&self) -> bool {
        self.engine.has_unsaved_changes()
    }

    /// `{ active, anchor, area, phase }`
    #[wasm_bindgen(js_name = getSelection)]
    pub fn get_selection(&self) -> Result<JsValue, JsValue> {
        serialize(self.engine.selection(), "Selection serialization error")
    }

    /// Records edited since the last save, shaped `{ Id, Field: value, ... }`
    #[wasm_bindgen(js_name = getEditedRecords)]
    pub fn get_edited_records(&self) -> Result<JsValue, JsValue> {
        serialize(self.engine.edited_records(), "Edited records serialization error")
    }

    #[wasm_bindgen(js_name = markSaved)]
    pub fn mark_saved(&mut self) {
        self.engine.mark_saved();
    }

    // ------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------

    /// Header click on `field`; returns the header icon name for the new direction
    #[wasm_bindgen(js_name = sortBy)]
    pub fn sort_by(&mut self, field: &str) -> String {
        self.engine.sort_by(field).icon_name().to_string()
    }

    /// Sorted copy of `records` by the current sort field
    #[wasm_bindgen(js_name = sortRecords)]
    pub fn sort_records(&self, records: JsValue) -> Result<JsValue, JsValue> {
        let records: Vec<Value> = deserialize(records, "Invalid records")?;
        serialize(&self.engine.sort_records(&records), "Records serialization error")
    }

    #[wasm_bindgen(js_name = getSortState)]
    pub fn get_sort_state(&self) -> Result<JsValue, JsValue> {
        serialize(self.engine.sort_state(), "Sort state serialization error")
    }
}

impl ExcelGrid {
    fn signals(&mut self) -> Result<JsValue, JsValue> {
        let signals = self.engine.drain_signals();
        serialize(&signals, "Signal serialization error")
    }
}
