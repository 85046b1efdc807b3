//! Copy and paste of rectangular blocks
//!
//! Copy only remembers *where* the block is; paste reads the values at that
//! moment. Paste tiles exactly 1:1: the destination always has the source's
//! extent and starts at the active cell, whatever area is selected.

use serde::{Deserialize, Serialize};

use crate::adapter::{mark_range, GridAdapter};
use crate::errors::GridError;
use crate::grid::{for_each_cell_in_range, normalize};
use crate::models::{CellWrite, Coordinate, HighlightBox, Marker, Rectangle};
use crate::undo::{EditAction, HistoryController, HistoryEntry};

/// Clipboard state for one grid instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardState {
    /// Block captured by the last copy; survives pastes
    pub source: Option<Rectangle>,
}

/// Outcome of one paste
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteReport {
    pub destination: Rectangle,
    pub written: Vec<CellWrite>,
    /// Source or target cells that did not resolve
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ClipboardController {
    state: ClipboardState,
}

impl ClipboardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ClipboardState {
        &self.state
    }

    pub fn source(&self) -> Option<Rectangle> {
        self.state.source
    }

    /// Remember `area` as the clipboard source and mark it as copied.
    ///
    /// Returns the dashed-border box around the block when the host reports
    /// geometry for its top-left cell.
    pub fn copy<A: GridAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        area: Option<Rectangle>,
    ) -> Result<Option<HighlightBox>, GridError> {
        let area = area.ok_or(GridError::NoSelection)?;
        let source = normalize(area.from_row, area.to_row, area.from_col, area.to_col);

        adapter.clear_marker(Marker::Copied);
        self.state.source = Some(source);
        mark_range(adapter, &source, Marker::Copied);
        log::debug!("copied {:?}", source);

        Ok(highlight_box(&*adapter, &source))
    }

    /// Paste the clipboard block with its top-left corner on `active`.
    ///
    /// The pre-paste values of every target cell are recorded as one history
    /// entry before anything is written. Cells that do not resolve on either
    /// side are skipped individually.
    pub fn paste<A: GridAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        active: Option<Coordinate>,
        history: &mut HistoryController,
    ) -> Result<PasteReport, GridError> {
        let source = self.state.source.ok_or(GridError::EmptyClipboard)?;
        let active = active.ok_or(GridError::NoSelection)?;
        let destination = source.translated_to(active);

        // Read the whole block first so an overlapping destination cannot
        // overwrite source cells before they are read.
        let mut pending = Vec::with_capacity(source.cell_count());
        let mut skipped = 0usize;
        for_each_cell_in_range(&source, |from, i, j| {
            let target = Coordinate::new(destination.from_row + i, destination.from_col + j);
            match adapter.read_value(from) {
                Some(value) if adapter.has_cell(target) => pending.push(CellWrite { coordinate: target, value }),
                _ => skipped += 1,
            }
        });

        history.record(HistoryEntry::capture(
            &*adapter,
            EditAction::Paste,
            pending.iter().map(|cell| cell.coordinate),
        ));

        let mut written = Vec::with_capacity(pending.len());
        for cell in pending {
            match adapter.write_value(cell.coordinate, &cell.value) {
                Ok(()) => written.push(cell),
                Err(e) => {
                    log::warn!("paste skipped: {}", e);
                    skipped += 1;
                }
            }
        }

        adapter.clear_marker(Marker::Copied);
        log::debug!(
            "pasted {:?} into {:?}: {} written, {} skipped",
            source,
            destination,
            written.len(),
            skipped
        );

        Ok(PasteReport { destination, written, skipped })
    }
}

/// Box spanning the block: origin of the top-left cell, width of the first
/// row, height of the first column. Cells without geometry add nothing.
pub fn highlight_box<A: GridAdapter + ?Sized>(adapter: &A, rect: &Rectangle) -> Option<HighlightBox> {
    let origin = adapter.geometry(rect.origin())?;

    let width = (rect.from_col..=rect.to_col)
        .filter_map(|col| adapter.geometry(Coordinate::new(rect.from_row, col)))
        .map(|g| g.width)
        .sum();
    let height = (rect.from_row..=rect.to_row)
        .filter_map(|row| adapter.geometry(Coordinate::new(row, rect.from_col)))
        .map(|g| g.height)
        .sum();

    Some(HighlightBox {
        top: origin.offset_top,
        left: origin.offset_left,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MemoryGrid;

    fn at(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn abcd_grid() -> MemoryGrid {
        let mut grid = MemoryGrid::new(6, 6);
        grid.write_value(at(0, 0), "A").unwrap();
        grid.write_value(at(0, 1), "B").unwrap();
        grid.write_value(at(1, 0), "C").unwrap();
        grid.write_value(at(1, 1), "D").unwrap();
        grid
    }

    #[test]
    fn test_copy_without_selection() {
        let mut grid = MemoryGrid::new(2, 2);
        let mut clipboard = ClipboardController::new();
        assert_eq!(clipboard.copy(&mut grid, None), Err(GridError::NoSelection));
        assert_eq!(clipboard.source(), None);
    }

    #[test]
    fn test_copy_marks_block_and_reports_box() {
        let mut grid = abcd_grid();
        let mut clipboard = ClipboardController::new();

        let area = Rectangle::normalized(at(0, 0), at(1, 1));
        let highlight = clipboard.copy(&mut grid, Some(area)).unwrap().unwrap();

        assert_eq!(grid.marked(Marker::Copied).len(), 4);
        assert_eq!(highlight, HighlightBox { top: 0.0, left: 0.0, width: 240.0, height: 64.0 });
    }

    #[test]
    fn test_recopy_replaces_copied_markers() {
        let mut grid = abcd_grid();
        let mut clipboard = ClipboardController::new();

        clipboard.copy(&mut grid, Some(Rectangle::normalized(at(0, 0), at(1, 1)))).unwrap();
        clipboard.copy(&mut grid, Some(Rectangle::single(at(5, 5)))).unwrap();

        assert_eq!(grid.marked(Marker::Copied), vec![at(5, 5)]);
    }

    #[test]
    fn test_paste_empty_clipboard() {
        let mut grid = MemoryGrid::new(2, 2);
        let mut clipboard = ClipboardController::new();
        let mut history = HistoryController::new();
        assert_eq!(
            clipboard.paste(&mut grid, Some(at(0, 0)), &mut history),
            Err(GridError::EmptyClipboard)
        );
        assert!(!history.can_undo());
    }

    #[test]
    fn test_paste_tiles_block_at_active_cell() {
        let mut grid = abcd_grid();
        let mut clipboard = ClipboardController::new();
        let mut history = HistoryController::new();

        clipboard.copy(&mut grid, Some(Rectangle::normalized(at(1, 1), at(0, 0)))).unwrap();
        let report = clipboard.paste(&mut grid, Some(at(3, 3)), &mut history).unwrap();

        assert_eq!(report.destination, Rectangle { from_row: 3, to_row: 4, from_col: 3, to_col: 4 });
        assert_eq!(grid.value(at(3, 3)), Some("A"));
        assert_eq!(grid.value(at(3, 4)), Some("B"));
        assert_eq!(grid.value(at(4, 3)), Some("C"));
        assert_eq!(grid.value(at(4, 4)), Some("D"));
        assert!(grid.marked(Marker::Copied).is_empty());
        assert_eq!(history.last().unwrap().len(), 4);
        assert!(clipboard.source().is_some());
    }

    #[test]
    fn test_paste_overlapping_destination_reads_source_first() {
        let mut grid = abcd_grid();
        let mut clipboard = ClipboardController::new();
        let mut history = HistoryController::new();

        clipboard.copy(&mut grid, Some(Rectangle::normalized(at(0, 0), at(1, 1)))).unwrap();
        clipboard.paste(&mut grid, Some(at(1, 1)), &mut history).unwrap();

        assert_eq!(grid.value(at(1, 1)), Some("A"));
        assert_eq!(grid.value(at(1, 2)), Some("B"));
        assert_eq!(grid.value(at(2, 1)), Some("C"));
        assert_eq!(grid.value(at(2, 2)), Some("D"));
    }

    #[test]
    fn test_paste_past_grid_edge_writes_in_bounds_cells() {
        let mut grid = abcd_grid();
        let mut clipboard = ClipboardController::new();
        let mut history = HistoryController::new();

        clipboard.copy(&mut grid, Some(Rectangle::normalized(at(0, 0), at(1, 1)))).unwrap();
        let report = clipboard.paste(&mut grid, Some(at(5, 5)), &mut history).unwrap();

        assert_eq!(report.written.len(), 1);
        assert_eq!(report.skipped, 3);
        assert_eq!(grid.value(at(5, 5)), Some("A"));
        assert_eq!(history.last().unwrap().len(), 1);
    }
}
