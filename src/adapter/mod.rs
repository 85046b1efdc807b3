//! Grid host abstraction
//!
//! The engine never touches rendering directly. Everything it needs from the
//! host (cell lookup, values, styling markers, geometry, record binding) goes
//! through [`GridAdapter`].
//!
//! - `memory`: in-process grid used when no browser host is present (and by tests)
//! - `js`: forwards to a JavaScript host object

pub mod memory;
pub mod js;

pub use js::{JsGridAdapter, JsGridHost};
pub use memory::MemoryGrid;

use crate::errors::GridError;
use crate::models::{CellBinding, CellGeometry, Coordinate, Marker, Rectangle};

/// Capabilities the engine requires from whatever renders the grid
pub trait GridAdapter {
    /// Number of rows in the grid extent (used for clamping)
    fn row_count(&self) -> usize;

    /// Number of columns in the grid extent (used for clamping)
    fn col_count(&self) -> usize;

    /// Whether a cell currently resolves at `at`
    fn has_cell(&self, at: Coordinate) -> bool;

    /// Displayed value, `None` when no cell resolves
    fn read_value(&self, at: Coordinate) -> Option<String>;

    /// Replace the displayed value
    fn write_value(&mut self, at: Coordinate, value: &str) -> Result<(), GridError>;

    /// Turn `marker` on for one cell
    fn set_marker(&mut self, at: Coordinate, marker: Marker) -> Result<(), GridError>;

    /// Turn `marker` off on every cell carrying it
    fn clear_marker(&mut self, marker: Marker);

    /// Rendered offset/size of a cell
    fn geometry(&self, at: Coordinate) -> Option<CellGeometry>;

    /// Owning record, field and lookup metadata
    fn binding(&self, at: Coordinate) -> Option<CellBinding>;

    /// Toggle whether the cell accepts typing
    fn set_editable(&mut self, _at: Coordinate, _editable: bool) {}

    /// Move input focus to the cell
    fn focus(&mut self, _at: Coordinate) {}
}

/// Clear `marker` everywhere, then set it on every resolvable cell of `rect`.
///
/// Cells that do not resolve are skipped; the rest of the range is still marked.
pub fn remark_range<A: GridAdapter + ?Sized>(adapter: &mut A, rect: &Rectangle, marker: Marker) {
    adapter.clear_marker(marker);
    mark_range(adapter, rect, marker);
}

/// Set `marker` on every resolvable cell of `rect` without clearing first
pub fn mark_range<A: GridAdapter + ?Sized>(adapter: &mut A, rect: &Rectangle, marker: Marker) {
    let mut skipped = 0usize;
    for at in rect.cells() {
        if adapter.set_marker(at, marker).is_err() {
            skipped += 1;
        }
    }
    if skipped > 0 {
        log::debug!("{:?} marker skipped {} unresolved cell(s)", marker, skipped);
    }
}
