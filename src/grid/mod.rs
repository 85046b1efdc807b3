//! Coordinate math for rectangular cell ranges
//!
//! Pure functions, no grid access. Every rectangle the engine stores goes
//! through [`normalize`], which orders each axis on its own so drags whose
//! row and column deltas have opposite signs still produce a valid block.

use crate::models::{Coordinate, Rectangle};

/// Normalize two row indices and two column indices into a rectangle
pub fn normalize(row_a: usize, row_b: usize, col_a: usize, col_b: usize) -> Rectangle {
    Rectangle {
        from_row: row_a.min(row_b),
        to_row: row_a.max(row_b),
        from_col: col_a.min(col_b),
        to_col: col_a.max(col_b),
    }
}

/// Inclusive ascending range `a..=b`.
///
/// Empty when either bound is missing or when `a > b`, so the length is
/// always `max(0, b - a + 1)`.
pub fn enumerate_range(a: Option<usize>, b: Option<usize>) -> Vec<usize> {
    match (a, b) {
        (Some(a), Some(b)) => (a..=b).collect(),
        _ => Vec::new(),
    }
}

/// Check if `at` lies inside `rect` (bounds inclusive)
pub fn contains(rect: &Rectangle, at: Coordinate) -> bool {
    rect.contains(at)
}

/// Visit every cell of `rect` row-major, passing the absolute coordinate and
/// the (row, col) offset from the rectangle's top-left corner
pub fn for_each_cell_in_range<F>(rect: &Rectangle, mut apply: F)
where
    F: FnMut(Coordinate, usize, usize),
{
    let rows = enumerate_range(Some(rect.from_row), Some(rect.to_row));
    let cols = enumerate_range(Some(rect.from_col), Some(rect.to_col));

    for (i, &row) in rows.iter().enumerate() {
        for (j, &col) in cols.iter().enumerate() {
            apply(Coordinate::new(row, col), i, j);
        }
    }
}
