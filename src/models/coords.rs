//! Grid coordinates and normalized rectangles

use serde::{Deserialize, Serialize};

/// A cell position in the grid (0-based row and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Create the top-left coordinate (0, 0)
    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Shift by a signed delta, clamping each axis independently to `[0, rows)` / `[0, cols)`.
    ///
    /// Returns `None` only when the grid has no rows or no columns.
    pub fn offset_clamped(&self, d_row: isize, d_col: isize, rows: usize, cols: usize) -> Option<Self> {
        if rows == 0 || cols == 0 {
            return None;
        }
        Some(Self {
            row: clamp_axis(self.row, d_row, rows),
            col: clamp_axis(self.col, d_col, cols),
        })
    }
}

fn clamp_axis(value: usize, delta: isize, len: usize) -> usize {
    let moved = if delta.is_negative() {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta as usize)
    };
    moved.min(len - 1)
}

/// An inclusive, normalized block of cells.
///
/// Invariant: `from_row <= to_row` and `from_col <= to_col`. Build one with
/// [`Rectangle::normalized`] (or [`crate::grid::normalize`]) rather than by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub from_row: usize,
    pub to_row: usize,
    pub from_col: usize,
    pub to_col: usize,
}

impl Rectangle {
    /// Build a rectangle from two corners, normalizing each axis on its own
    pub fn normalized(a: Coordinate, b: Coordinate) -> Self {
        crate::grid::normalize(a.row, b.row, a.col, b.col)
    }

    /// Rectangle covering exactly one cell
    pub fn single(at: Coordinate) -> Self {
        Self::normalized(at, at)
    }

    /// Top-left corner
    pub fn origin(&self) -> Coordinate {
        Coordinate::new(self.from_row, self.from_col)
    }

    /// Row delta between the first and last row (0 for a single row)
    pub fn row_span(&self) -> usize {
        self.to_row - self.from_row
    }

    /// Column delta between the first and last column (0 for a single column)
    pub fn col_span(&self) -> usize {
        self.to_col - self.from_col
    }

    /// Number of cells covered
    pub fn cell_count(&self) -> usize {
        (self.row_span() + 1) * (self.col_span() + 1)
    }

    /// Check if a coordinate lies inside this rectangle (bounds inclusive)
    pub fn contains(&self, at: Coordinate) -> bool {
        (self.from_row..=self.to_row).contains(&at.row)
            && (self.from_col..=self.to_col).contains(&at.col)
    }

    /// Rectangle of the same size anchored at `at`
    pub fn translated_to(&self, at: Coordinate) -> Self {
        Self {
            from_row: at.row,
            to_row: at.row + self.row_span(),
            from_col: at.col,
            to_col: at.col + self.col_span(),
        }
    }

    /// Iterate the covered coordinates in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let (from_col, to_col) = (self.from_col, self.to_col);
        (self.from_row..=self.to_row)
            .flat_map(move |row| (from_col..=to_col).map(move |col| Coordinate::new(row, col)))
    }
}
