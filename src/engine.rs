//! Grid engine
//!
//! One `GridEngine` per grid instance. It owns every piece of mutable state
//! (selection, clipboard, history, edit ledger, sort) and routes host events
//! to the controllers. Nothing here is shared between instances.
//!
//! Events are processed synchronously, one at a time. Signals raised while
//! handling an event are queued and handed to the host by
//! [`GridEngine::drain_signals`].

use serde_json::Value;

use crate::adapter::GridAdapter;
use crate::bulk_edit::BulkEditController;
use crate::clipboard::ClipboardController;
use crate::config::GridConfig;
use crate::editing::{DirectEditController, EditLedger, EditedRecord};
use crate::errors::GridError;
use crate::models::{ArrowKey, CellWrite, ContextMenuAction, Coordinate, GridSignal, PointerButton, Rectangle};
use crate::selection::{DragKind, SelectionController, SelectionState};
use crate::sort::{SortDirection, SortState};
use crate::undo::HistoryController;

pub struct GridEngine<A: GridAdapter> {
    adapter: A,
    config: GridConfig,
    selection: SelectionController,
    clipboard: ClipboardController,
    bulk_edit: BulkEditController,
    editing: DirectEditController,
    history: HistoryController,
    ledger: EditLedger,
    sort: SortState,
    signals: Vec<GridSignal>,
}

impl<A: GridAdapter> GridEngine<A> {
    pub fn new(adapter: A, config: GridConfig) -> Self {
        let bulk_edit = BulkEditController::new(config.dedupe_record_ids);
        Self {
            adapter,
            config,
            selection: SelectionController::new(),
            clipboard: ClipboardController::new(),
            bulk_edit,
            editing: DirectEditController::new(),
            history: HistoryController::new(),
            ledger: EditLedger::new(),
            sort: SortState::new(),
            signals: Vec::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn active_cell(&self) -> Option<Coordinate> {
        self.selection.active()
    }

    pub fn selection_area(&self) -> Option<Rectangle> {
        self.selection.area()
    }

    pub fn clipboard_source(&self) -> Option<Rectangle> {
        self.clipboard.source()
    }

    pub fn history(&self) -> &HistoryController {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Every record edited since the last save, for the save collaborator
    pub fn edited_records(&self) -> &[EditedRecord] {
        self.ledger.records()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.ledger.is_dirty()
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Hand over the signals raised since the last drain
    pub fn drain_signals(&mut self) -> Vec<GridSignal> {
        std::mem::take(&mut self.signals)
    }

    // ========================================================================
    // Pointer and keyboard
    // ========================================================================

    pub fn pointer_down(&mut self, at: Coordinate, button: PointerButton) {
        self.selection.pointer_down(&mut self.adapter, at, button);
    }

    /// Context-menu trigger on a cell (same as a secondary-button press)
    pub fn context_menu(&mut self, at: Coordinate) {
        self.selection.pointer_down(&mut self.adapter, at, PointerButton::Secondary);
    }

    pub fn pointer_down_fill_handle(&mut self, at: Coordinate) {
        if let Err(e) = self.selection.pointer_down_fill_handle(&mut self.adapter, at) {
            log::debug!("fill handle ignored: {}", e);
        }
    }

    pub fn pointer_move(&mut self, at: Coordinate) {
        self.selection.pointer_move(&mut self.adapter, at);
    }

    /// Finish a drag; a fill-handle drag runs the bulk edit over the released area
    pub fn pointer_up(&mut self, at: Coordinate, button: PointerButton) {
        let Some(done) = self.selection.pointer_up(&mut self.adapter, at, button) else {
            return;
        };
        if done.kind == DragKind::Fill {
            self.fill(done.area);
        }
    }

    /// Window-level pointer-up fallback for drags that left the grid
    pub fn cancel_drag(&mut self) {
        self.selection.cancel_drag();
    }

    pub fn arrow(&mut self, key: ArrowKey) {
        self.selection.arrow(&mut self.adapter, key);
    }

    // ========================================================================
    // Clipboard
    // ========================================================================

    pub fn copy(&mut self) {
        match self.clipboard.copy(&mut self.adapter, self.selection.area()) {
            Ok(Some(highlight)) => self.emit(GridSignal::ShowCopyHighlight { highlight }),
            Ok(None) => {}
            Err(e) => log::debug!("copy ignored: {}", e),
        }
    }

    pub fn paste(&mut self) {
        let recorded_before = self.history.undo_count();
        let report = match self.clipboard.paste(&mut self.adapter, self.selection.active(), &mut self.history) {
            Ok(report) => report,
            Err(e) => {
                log::debug!("paste ignored: {}", e);
                return;
            }
        };

        self.selection.select_area(&mut self.adapter, report.destination);
        self.notify_written(&report.written);
        self.emit(GridSignal::HideCopyHighlight);
        if self.history.undo_count() > recorded_before {
            self.emit(GridSignal::HistoryAvailable);
        }
    }

    pub fn handle_context_menu_action(&mut self, action: ContextMenuAction) {
        match action {
            ContextMenuAction::Copy => self.copy(),
            ContextMenuAction::Paste => self.paste(),
        }
    }

    // ========================================================================
    // Fill / bulk edit
    // ========================================================================

    /// Fill `area` with the active cell's value, gated by the lookup check
    pub fn fill(&mut self, area: Rectangle) {
        let recorded_before = self.history.undo_count();
        let result = self.bulk_edit.fill(&mut self.adapter, self.selection.active(), area, &mut self.history);

        match result {
            Ok(report) => {
                let request = report.request;
                self.emit(GridSignal::BulkEditAllowed {
                    record_ids: request.record_ids,
                    lookup_field: request.lookup_field,
                    lookup_object: request.lookup_object,
                });
                self.notify_written(&report.written);
                if self.history.undo_count() > recorded_before {
                    self.emit(GridSignal::HistoryAvailable);
                }
            }
            Err(GridError::IneligibleBulkEdit(at)) => {
                log::debug!("bulk edit blocked at ({}, {})", at.row, at.col);
                self.emit(GridSignal::BulkEditBlocked);
            }
            Err(e) => log::debug!("fill ignored: {}", e),
        }
    }

    // ========================================================================
    // Direct edit
    // ========================================================================

    /// Double-click on a cell
    pub fn begin_edit(&mut self, at: Coordinate) {
        self.editing.begin_edit(&mut self.adapter, at);
    }

    pub fn focus_in(&mut self, at: Coordinate) {
        self.editing.focus_in(&self.adapter, at);
    }

    pub fn focus_out(&mut self, at: Coordinate, value: &str) {
        match self.editing.focus_out(&mut self.adapter, at, value, &mut self.history) {
            Ok(Some(write)) => {
                self.notify_written(std::slice::from_ref(&write));
                self.emit(GridSignal::HistoryAvailable);
            }
            Ok(None) => {}
            Err(e) => log::warn!("edit dropped: {}", e),
        }
    }

    // ========================================================================
    // Undo
    // ========================================================================

    /// Revert the most recent action; a no-op on an empty stack
    pub fn undo(&mut self) {
        match self.history.undo(&mut self.adapter) {
            Ok(report) => {
                log::debug!("undo {:?}: {} cell(s) restored", report.action, report.restored.len());
                let writes: Vec<CellWrite> = report
                    .restored
                    .into_iter()
                    .map(|s| CellWrite { coordinate: s.coordinate, value: s.prior_value })
                    .collect();
                self.notify_written(&writes);
                if report.exhausted {
                    self.emit(GridSignal::HistoryExhausted);
                }
            }
            Err(_) => self.emit(GridSignal::HistoryExhausted),
        }
    }

    // ========================================================================
    // Sort and save
    // ========================================================================

    pub fn sort_by(&mut self, field: &str) -> SortDirection {
        self.sort.sort_by(field)
    }

    pub fn sort_records(&self, records: &[Value]) -> Vec<Value> {
        self.sort.sort_records(records)
    }

    /// The save collaborator persisted `edited_records()`
    pub fn mark_saved(&mut self) {
        self.ledger.clear();
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn emit(&mut self, signal: GridSignal) {
        self.signals.push(signal);
    }

    /// Raise value-changed for every bound cell and fold it into the ledger
    fn notify_written(&mut self, writes: &[CellWrite]) {
        let mut became_dirty = false;
        for write in writes {
            let Some(binding) = self.adapter.binding(write.coordinate) else {
                continue;
            };
            became_dirty |= self.ledger.apply(&binding, &write.value);
            self.signals.push(GridSignal::ValueChanged {
                record_id: binding.record_id,
                field_name: binding.field_name,
                value: write.value.clone(),
            });
        }
        if became_dirty {
            self.emit(GridSignal::UnsavedChanges);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MemoryGrid;

    fn at(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn engine() -> GridEngine<MemoryGrid> {
        let grid = MemoryGrid::from_rows(&[vec!["a", "b"], vec!["c", "d"]]).with_records(&["r0", "r1"], &["Name", "Phone"]);
        GridEngine::new(grid, GridConfig::default())
    }

    #[test]
    fn test_paste_without_copy_is_silent() {
        let mut engine = engine();
        engine.pointer_down(at(0, 0), PointerButton::Primary);
        engine.pointer_up(at(0, 0), PointerButton::Primary);
        engine.paste();
        assert!(engine.drain_signals().is_empty());
        assert!(!engine.can_undo());
    }

    #[test]
    fn test_undo_on_empty_stack_reaffirms_exhausted() {
        let mut engine = engine();
        engine.undo();
        assert_eq!(engine.drain_signals(), vec![GridSignal::HistoryExhausted]);
    }

    #[test]
    fn test_edit_signals_value_and_unsaved_changes() {
        let mut engine = engine();
        engine.begin_edit(at(1, 1));
        engine.focus_out(at(1, 1), "555");

        assert_eq!(
            engine.drain_signals(),
            vec![
                GridSignal::ValueChanged {
                    record_id: "r1".to_string(),
                    field_name: "Phone".to_string(),
                    value: "555".to_string(),
                },
                GridSignal::UnsavedChanges,
                GridSignal::HistoryAvailable,
            ]
        );
        assert_eq!(engine.edited_records().len(), 1);

        engine.mark_saved();
        assert!(!engine.has_unsaved_changes());
    }
}
