//! Direct cell editing and the edited-record ledger
//!
//! - `DirectEditController`: focus-in/focus-out cycle of a typed edit
//! - `EditLedger`: accumulated record changes waiting for the save collaborator

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::adapter::GridAdapter;
use crate::errors::GridError;
use crate::models::{CellBinding, CellWrite, Coordinate};
use crate::undo::{EditAction, HistoryController, HistoryEntry};

/// Value captured when a cell gained focus
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingEdit {
    coordinate: Coordinate,
    initial_value: String,
}

#[derive(Debug, Clone, Default)]
pub struct DirectEditController {
    pending: Option<PendingEdit>,
}

impl DirectEditController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Double-click: unlock the cell for typing and capture its value
    pub fn begin_edit<A: GridAdapter + ?Sized>(&mut self, adapter: &mut A, at: Coordinate) {
        adapter.set_editable(at, true);
        self.focus_in(&*adapter, at);
    }

    /// Capture the value a cell holds when it gains focus
    pub fn focus_in<A: GridAdapter + ?Sized>(&mut self, adapter: &A, at: Coordinate) {
        self.pending = adapter
            .read_value(at)
            .map(|initial_value| PendingEdit { coordinate: at, initial_value });
    }

    /// Lock the cell again and commit the typed value if it changed.
    ///
    /// A changed value is recorded as a one-cell history entry once the write
    /// has landed. Returns `None` when nothing changed or no focus-in was seen
    /// for this cell.
    pub fn focus_out<A: GridAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        at: Coordinate,
        new_value: &str,
        history: &mut HistoryController,
    ) -> Result<Option<CellWrite>, GridError> {
        adapter.set_editable(at, false);

        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        if pending.coordinate != at || pending.initial_value == new_value {
            return Ok(None);
        }

        adapter.write_value(at, new_value)?;

        let mut entry = HistoryEntry::new(EditAction::Edit);
        entry.push(at, pending.initial_value);
        history.record(entry);
        Ok(Some(CellWrite { coordinate: at, value: new_value.to_string() }))
    }
}

/// One record with every field edited since the last save
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EditedRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

/// Edited records in first-edit order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditLedger {
    records: Vec<EditedRecord>,
}

impl EditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a value change into the ledger. Returns true when this is the
    /// first change since the ledger was last clean.
    pub fn apply(&mut self, binding: &CellBinding, value: &str) -> bool {
        let was_clean = self.records.is_empty();

        match self.records.iter_mut().find(|r| r.id == binding.record_id) {
            Some(record) => {
                record.fields.insert(binding.field_name.clone(), value.to_string());
            }
            None => {
                let mut fields = BTreeMap::new();
                fields.insert(binding.field_name.clone(), value.to_string());
                self.records.push(EditedRecord { id: binding.record_id.clone(), fields });
            }
        }

        was_clean
    }

    pub fn records(&self) -> &[EditedRecord] {
        &self.records
    }

    pub fn is_dirty(&self) -> bool {
        !self.records.is_empty()
    }

    /// Forget everything (after the save collaborator has persisted it)
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
