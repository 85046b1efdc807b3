use serde::{Deserialize, Serialize};

use crate::adapter::GridAdapter;
use crate::errors::GridError;
use crate::models::Coordinate;

/// The user action an entry reverts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditAction {
    Paste,
    Fill,
    /// Typing into one cell
    Edit,
}

/// Value a cell held before an action touched it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub coordinate: Coordinate,
    pub prior_value: String,
}

/// Every cell mutation caused by one user action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: EditAction,
    pub snapshots: Vec<CellSnapshot>,
}

impl HistoryEntry {
    pub fn new(action: EditAction) -> Self {
        Self { action, snapshots: Vec::new() }
    }

    /// Snapshot the current value of each cell that resolves; the rest are left out
    pub fn capture<A, I>(adapter: &A, action: EditAction, cells: I) -> Self
    where
        A: GridAdapter + ?Sized,
        I: IntoIterator<Item = Coordinate>,
    {
        let snapshots = cells
            .into_iter()
            .filter_map(|coordinate| {
                adapter
                    .read_value(coordinate)
                    .map(|prior_value| CellSnapshot { coordinate, prior_value })
            })
            .collect();
        Self { action, snapshots }
    }

    pub fn push(&mut self, coordinate: Coordinate, prior_value: impl Into<String>) {
        self.snapshots.push(CellSnapshot { coordinate, prior_value: prior_value.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}

/// Outcome of one undo
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndoReport {
    pub action: EditAction,
    /// Cells written back, in restore order
    pub restored: Vec<CellSnapshot>,
    /// Stack became empty with this undo
    pub exhausted: bool,
}

/// LIFO stack of history entries for one grid instance.
///
/// Unbounded and never cleared implicitly; there is no redo.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryController {
    entries: Vec<HistoryEntry>,
}

impl HistoryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one action's snapshots. Empty entries are dropped; returns whether
    /// anything was recorded.
    pub fn record(&mut self, entry: HistoryEntry) -> bool {
        if entry.is_empty() {
            return false;
        }
        log::debug!("history: recorded {:?} touching {} cell(s)", entry.action, entry.len());
        self.entries.push(entry);
        true
    }

    /// Pop the most recent entry and write its prior values back.
    ///
    /// Coordinates that no longer resolve are skipped.
    pub fn undo<A: GridAdapter + ?Sized>(&mut self, adapter: &mut A) -> Result<UndoReport, GridError> {
        let entry = self.entries.pop().ok_or(GridError::EmptyHistory)?;

        let mut restored = Vec::with_capacity(entry.len());
        for snapshot in entry.snapshots.into_iter().rev() {
            match adapter.write_value(snapshot.coordinate, &snapshot.prior_value) {
                Ok(()) => restored.push(snapshot),
                Err(e) => log::debug!("undo skipped: {}", e),
            }
        }

        Ok(UndoReport {
            action: entry.action,
            restored,
            exhausted: self.entries.is_empty(),
        })
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Number of available undo steps
    pub fn undo_count(&self) -> usize {
        self.entries.len()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}
