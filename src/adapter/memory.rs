//! In-memory grid
//!
//! A rectangular table of optional cells. A `None` slot models a cell the
//! host has not rendered, which the engine must tolerate.

use crate::errors::GridError;
use crate::models::{CellBinding, CellGeometry, Coordinate, Marker};

use super::GridAdapter;

const DEFAULT_COL_WIDTH: f64 = 120.0;
const DEFAULT_ROW_HEIGHT: f64 = 32.0;

#[derive(Clone, Debug, Default, PartialEq)]
struct MemoryCell {
    value: String,
    binding: Option<CellBinding>,
    /// One bit per [`Marker`]
    flags: u8,
    editable: bool,
}

impl MemoryCell {
    fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), ..Self::default() }
    }
}

fn marker_bit(marker: Marker) -> u8 {
    1 << (marker as u8)
}

/// Grid held entirely in memory
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<MemoryCell>>,
    col_width: f64,
    row_height: f64,
    focused: Option<Coordinate>,
}

impl MemoryGrid {
    /// Create a grid of empty cells
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`; use [`MemoryGrid::try_new`]
    /// for sizes that come from outside.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::try_new(rows, cols).expect("grid dimensions overflow usize")
    }

    /// Create a grid of empty cells, rejecting a cell count that overflows
    pub fn try_new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let count = rows
            .checked_mul(cols)
            .ok_or_else(|| GridError::InvalidConfig(format!("{}x{} grid is too large", rows, cols)))?;
        Ok(Self {
            rows,
            cols,
            cells: (0..count).map(|_| Some(MemoryCell::default())).collect(),
            col_width: DEFAULT_COL_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            focused: None,
        })
    }

    /// Create a grid from row-major values; short rows are padded with empty cells
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Self {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut grid = Self::new(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if let Some(cell) = grid.cell_mut(Coordinate::new(r, c)) {
                    cell.value = value.as_ref().to_string();
                }
            }
        }
        grid
    }

    /// Bind every cell to `record_ids[row]` / `fields[col]`
    pub fn with_records(mut self, record_ids: &[&str], fields: &[&str]) -> Self {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (Some(id), Some(field)) = (record_ids.get(row), fields.get(col)) else {
                    continue;
                };
                if let Some(cell) = self.cell_mut(Coordinate::new(row, col)) {
                    cell.binding = Some(CellBinding::new(*id, *field));
                }
            }
        }
        self
    }

    /// Attach lookup metadata to every bound cell of a column
    pub fn with_lookup_column(mut self, col: usize, lookup_field: &str, lookup_object: &str) -> Self {
        for row in 0..self.rows {
            if let Some(binding) = self.cell_mut(Coordinate::new(row, col)).and_then(|c| c.binding.as_mut()) {
                binding.lookup_field = Some(lookup_field.to_string());
                binding.lookup_object = Some(lookup_object.to_string());
            }
        }
        self
    }

    /// Drop the lookup object of one cell
    pub fn clear_lookup(&mut self, at: Coordinate) {
        if let Some(binding) = self.cell_mut(at).and_then(|c| c.binding.as_mut()) {
            binding.lookup_object = None;
        }
    }

    /// Remove a cell, as if the host stopped rendering it
    pub fn remove_cell(&mut self, at: Coordinate) {
        if let Some(idx) = self.index(at) {
            self.cells[idx] = None;
        }
    }

    /// Put back a removed cell with the given value
    pub fn restore_cell(&mut self, at: Coordinate, value: &str) {
        if let Some(idx) = self.index(at) {
            self.cells[idx] = Some(MemoryCell::new(value));
        }
    }

    /// Current value, `None` for missing cells
    pub fn value(&self, at: Coordinate) -> Option<&str> {
        self.cell(at).map(|c| c.value.as_str())
    }

    /// Whether `marker` is set on the cell
    pub fn has_marker(&self, at: Coordinate, marker: Marker) -> bool {
        self.cell(at).map(|c| c.flags & marker_bit(marker) != 0).unwrap_or(false)
    }

    /// All cells carrying `marker`, row-major
    pub fn marked(&self, marker: Marker) -> Vec<Coordinate> {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| Coordinate::new(row, col)))
            .filter(|&at| self.has_marker(at, marker))
            .collect()
    }

    pub fn is_editable(&self, at: Coordinate) -> bool {
        self.cell(at).map(|c| c.editable).unwrap_or(false)
    }

    pub fn focused(&self) -> Option<Coordinate> {
        self.focused
    }

    fn index(&self, at: Coordinate) -> Option<usize> {
        if at.row < self.rows && at.col < self.cols {
            Some(at.row * self.cols + at.col)
        } else {
            None
        }
    }

    fn cell(&self, at: Coordinate) -> Option<&MemoryCell> {
        let idx = self.index(at)?;
        self.cells[idx].as_ref()
    }

    fn cell_mut(&mut self, at: Coordinate) -> Option<&mut MemoryCell> {
        let idx = self.index(at)?;
        self.cells[idx].as_mut()
    }
}

impl GridAdapter for MemoryGrid {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn col_count(&self) -> usize {
        self.cols
    }

    fn has_cell(&self, at: Coordinate) -> bool {
        self.cell(at).is_some()
    }

    fn read_value(&self, at: Coordinate) -> Option<String> {
        self.cell(at).map(|c| c.value.clone())
    }

    fn write_value(&mut self, at: Coordinate, value: &str) -> Result<(), GridError> {
        let cell = self.cell_mut(at).ok_or(GridError::MissingCell(at))?;
        cell.value = value.to_string();
        Ok(())
    }

    fn set_marker(&mut self, at: Coordinate, marker: Marker) -> Result<(), GridError> {
        let cell = self.cell_mut(at).ok_or(GridError::MissingCell(at))?;
        cell.flags |= marker_bit(marker);
        Ok(())
    }

    fn clear_marker(&mut self, marker: Marker) {
        for cell in self.cells.iter_mut().flatten() {
            cell.flags &= !marker_bit(marker);
        }
    }

    fn geometry(&self, at: Coordinate) -> Option<CellGeometry> {
        self.cell(at)?;
        Some(CellGeometry::new(
            at.row as f64 * self.row_height,
            at.col as f64 * self.col_width,
            self.col_width,
            self.row_height,
        ))
    }

    fn binding(&self, at: Coordinate) -> Option<CellBinding> {
        self.cell(at).and_then(|c| c.binding.clone())
    }

    fn set_editable(&mut self, at: Coordinate, editable: bool) {
        if let Some(cell) = self.cell_mut(at) {
            cell.editable = editable;
        }
    }

    fn focus(&mut self, at: Coordinate) {
        if self.has_cell(at) {
            self.focused = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_pads_short_rows() {
        let grid = MemoryGrid::from_rows(&[vec!["a", "b"], vec!["c"]]);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 2);
        assert_eq!(grid.value(Coordinate::new(1, 1)), Some(""));
    }

    #[test]
    fn test_try_new_rejects_overflowing_size() {
        assert!(matches!(MemoryGrid::try_new(usize::MAX, 2), Err(GridError::InvalidConfig(_))));
        assert_eq!(MemoryGrid::try_new(3, 4).unwrap().col_count(), 4);
    }

    #[test]
    fn test_missing_cell_write_fails() {
        let mut grid = MemoryGrid::new(2, 2);
        grid.remove_cell(Coordinate::new(1, 1));
        assert_eq!(
            grid.write_value(Coordinate::new(1, 1), "x"),
            Err(GridError::MissingCell(Coordinate::new(1, 1)))
        );
        assert!(grid.write_value(Coordinate::new(5, 0), "x").is_err());
    }

    #[test]
    fn test_markers_are_independent() {
        let mut grid = MemoryGrid::new(2, 2);
        let at = Coordinate::new(0, 1);
        grid.set_marker(at, Marker::Copied).unwrap();
        grid.set_marker(at, Marker::SelectedArea).unwrap();
        grid.clear_marker(Marker::Copied);
        assert!(!grid.has_marker(at, Marker::Copied));
        assert!(grid.has_marker(at, Marker::SelectedArea));
    }

    #[test]
    fn test_lookup_column() {
        let grid = MemoryGrid::new(2, 2)
            .with_records(&["r0", "r1"], &["Name", "OwnerId"])
            .with_lookup_column(1, "OwnerId", "User");
        let binding = grid.binding(Coordinate::new(1, 1)).unwrap();
        assert_eq!(binding.record_id, "r1");
        assert_eq!(binding.lookup_object.as_deref(), Some("User"));
        assert_eq!(grid.binding(Coordinate::new(1, 0)).unwrap().lookup_object, None);
    }
}
