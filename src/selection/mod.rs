//! Selection state machine
//!
//! Owns the active cell, the drag anchor and the selection area. The only
//! side effects are marker writes through the [`GridAdapter`]; cell values
//! are never touched here.
//!
//! A drag that never receives its pointer-up stays in `Dragging` until the
//! next primary press or an explicit [`SelectionController::cancel_drag`].

use serde::{Deserialize, Serialize};

use crate::adapter::{remark_range, GridAdapter};
use crate::errors::GridError;
use crate::models::{ArrowKey, Coordinate, Marker, PointerButton, Rectangle};

/// What a drag is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragKind {
    /// Plain range selection
    Select,
    /// Started from the active cell's fill handle
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionPhase {
    #[default]
    Idle,
    Dragging(DragKind),
}

/// Selection state for one grid instance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    /// Focused cell; paste destination and keyboard anchor
    pub active: Option<Coordinate>,

    /// Where the current drag/selection began
    pub anchor: Option<Coordinate>,

    /// Normalized selection area
    pub area: Option<Rectangle>,

    pub phase: SelectionPhase,
}

/// Result of a finished drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedDrag {
    pub kind: DragKind,
    pub area: Rectangle,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn active(&self) -> Option<Coordinate> {
        self.state.active
    }

    pub fn area(&self) -> Option<Rectangle> {
        self.state.area
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state.phase, SelectionPhase::Dragging(_))
    }

    /// Pointer pressed on a cell
    pub fn pointer_down<A: GridAdapter + ?Sized>(&mut self, adapter: &mut A, at: Coordinate, button: PointerButton) {
        if !in_extent(&*adapter, at) {
            log::debug!("press at ({}, {}) is outside the grid", at.row, at.col);
            return;
        }
        match button {
            PointerButton::Primary => {
                self.collapse_to(adapter, at);
                self.state.phase = SelectionPhase::Dragging(DragKind::Select);
                log::debug!("selection drag started at ({}, {})", at.row, at.col);
            }
            PointerButton::Secondary => self.context_press(adapter, at),
            PointerButton::Other => {}
        }
    }

    /// Pointer pressed on the active cell's fill handle
    pub fn pointer_down_fill_handle<A: GridAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        at: Coordinate,
    ) -> Result<(), GridError> {
        if self.state.active != Some(at) {
            return Err(GridError::NoFillDrag);
        }
        self.state.anchor = Some(at);
        self.state.area = Some(Rectangle::single(at));
        self.state.phase = SelectionPhase::Dragging(DragKind::Fill);
        remark_range(adapter, &Rectangle::single(at), Marker::SelectedArea);
        log::debug!("fill drag started at ({}, {})", at.row, at.col);
        Ok(())
    }

    /// Pointer moved over a cell; only meaningful while dragging
    pub fn pointer_move<A: GridAdapter + ?Sized>(&mut self, adapter: &mut A, at: Coordinate) {
        if !self.is_dragging() {
            return;
        }
        let (Some(anchor), Some(at)) = (self.state.anchor, clamp_to_extent(&*adapter, at)) else {
            return;
        };
        let area = Rectangle::normalized(anchor, at);
        self.state.area = Some(area);
        remark_range(adapter, &area, Marker::SelectedArea);
    }

    /// Pointer released over a cell; finishes a drag started with the primary button
    pub fn pointer_up<A: GridAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        at: Coordinate,
        button: PointerButton,
    ) -> Option<CompletedDrag> {
        if button != PointerButton::Primary {
            return None;
        }
        let SelectionPhase::Dragging(kind) = self.state.phase else {
            return None;
        };
        let anchor = self.state.anchor?;
        let at = clamp_to_extent(&*adapter, at)?;

        let area = Rectangle::normalized(anchor, at);
        self.state.area = Some(area);
        self.state.phase = SelectionPhase::Idle;
        remark_range(adapter, &area, Marker::SelectedArea);
        log::debug!("{:?} drag finished: {:?}", kind, area);

        Some(CompletedDrag { kind, area })
    }

    /// Secondary-button press: keep a selection the click falls inside,
    /// otherwise start over from the clicked cell
    pub fn context_press<A: GridAdapter + ?Sized>(&mut self, adapter: &mut A, at: Coordinate) {
        if !in_extent(&*adapter, at) {
            return;
        }
        if self.state.area.map(|area| area.contains(at)).unwrap_or(false) {
            return;
        }
        self.collapse_to(adapter, at);
    }

    /// Move the active cell one step, clamped to the grid extent
    pub fn arrow<A: GridAdapter + ?Sized>(&mut self, adapter: &mut A, key: ArrowKey) {
        let (rows, cols) = (adapter.row_count(), adapter.col_count());
        let (d_row, d_col) = key.delta();

        let candidate = match self.state.active {
            Some(active) => active.offset_clamped(d_row, d_col, rows, cols),
            None if rows > 0 && cols > 0 => Some(Coordinate::origin()),
            None => None,
        };
        let Some(candidate) = candidate else {
            return;
        };

        self.collapse_to(adapter, candidate);
        adapter.focus(candidate);
    }

    /// Replace the selection area (used after paste); active cell and anchor stay
    pub fn select_area<A: GridAdapter + ?Sized>(&mut self, adapter: &mut A, area: Rectangle) {
        self.state.area = Some(area);
        remark_range(adapter, &area, Marker::SelectedArea);
    }

    /// Leave a drag without a pointer-up; markers stay as they are
    pub fn cancel_drag(&mut self) {
        if self.is_dragging() {
            log::debug!("drag cancelled");
        }
        self.state.phase = SelectionPhase::Idle;
    }

    fn collapse_to<A: GridAdapter + ?Sized>(&mut self, adapter: &mut A, at: Coordinate) {
        adapter.clear_marker(Marker::SelectedArea);
        adapter.clear_marker(Marker::ActiveCell);

        self.state.active = Some(at);
        self.state.anchor = Some(at);
        self.state.area = Some(Rectangle::single(at));

        if adapter.set_marker(at, Marker::ActiveCell).is_err() {
            log::debug!("active cell ({}, {}) did not resolve", at.row, at.col);
        }
    }
}

fn in_extent<A: GridAdapter + ?Sized>(adapter: &A, at: Coordinate) -> bool {
    at.row < adapter.row_count() && at.col < adapter.col_count()
}

/// Pull a coordinate back inside the grid; `None` for an empty grid
fn clamp_to_extent<A: GridAdapter + ?Sized>(adapter: &A, at: Coordinate) -> Option<Coordinate> {
    let (rows, cols) = (adapter.row_count(), adapter.col_count());
    if rows == 0 || cols == 0 {
        return None;
    }
    Some(Coordinate::new(at.row.min(rows - 1), at.col.min(cols - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MemoryGrid;

    fn at(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn test_primary_press_starts_drag() {
        let mut grid = MemoryGrid::new(5, 5);
        let mut selection = SelectionController::new();

        selection.pointer_down(&mut grid, at(2, 2), PointerButton::Primary);

        assert_eq!(selection.state().phase, SelectionPhase::Dragging(DragKind::Select));
        assert_eq!(selection.active(), Some(at(2, 2)));
        assert_eq!(selection.area(), Some(Rectangle::single(at(2, 2))));
        assert_eq!(grid.marked(Marker::ActiveCell), vec![at(2, 2)]);
    }

    #[test]
    fn test_press_outside_grid_is_ignored() {
        let mut grid = MemoryGrid::new(3, 3);
        let mut selection = SelectionController::new();
        selection.pointer_down(&mut grid, at(1, 1), PointerButton::Primary);
        selection.pointer_up(&mut grid, at(1, 1), PointerButton::Primary);

        selection.pointer_down(&mut grid, at(3, 0), PointerButton::Primary);
        selection.pointer_down(&mut grid, at(0, 7), PointerButton::Secondary);

        assert_eq!(selection.active(), Some(at(1, 1)));
        assert!(!selection.is_dragging());
        assert_eq!(grid.marked(Marker::ActiveCell), vec![at(1, 1)]);
    }

    #[test]
    fn test_drag_past_edge_is_clamped() {
        let mut grid = MemoryGrid::new(3, 3);
        let mut selection = SelectionController::new();

        selection.pointer_down(&mut grid, at(1, 1), PointerButton::Primary);
        selection.pointer_move(&mut grid, at(9, 9));
        let done = selection.pointer_up(&mut grid, at(5, 0), PointerButton::Primary).unwrap();

        assert_eq!(done.area, Rectangle { from_row: 1, to_row: 2, from_col: 0, to_col: 1 });
        assert_eq!(selection.state().anchor, Some(at(1, 1)));
    }

    #[test]
    fn test_drag_up_left_normalizes() {
        let mut grid = MemoryGrid::new(5, 5);
        let mut selection = SelectionController::new();

        selection.pointer_down(&mut grid, at(3, 3), PointerButton::Primary);
        selection.pointer_move(&mut grid, at(2, 4));
        selection.pointer_move(&mut grid, at(1, 2));

        let area = selection.area().unwrap();
        assert_eq!(area, Rectangle { from_row: 1, to_row: 3, from_col: 2, to_col: 3 });
        // clear-then-apply: the (2, 4) cell from the previous move is gone
        assert!(!grid.has_marker(at(2, 4), Marker::SelectedArea));
        assert_eq!(grid.marked(Marker::SelectedArea).len(), 6);

        let done = selection.pointer_up(&mut grid, at(1, 2), PointerButton::Primary).unwrap();
        assert_eq!(done.kind, DragKind::Select);
        assert_eq!(done.area, area);
        assert_eq!(selection.state().phase, SelectionPhase::Idle);
        assert_eq!(selection.active(), Some(at(3, 3)));
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut grid = MemoryGrid::new(3, 3);
        let mut selection = SelectionController::new();
        selection.pointer_move(&mut grid, at(1, 1));
        assert_eq!(selection.area(), None);
        assert!(grid.marked(Marker::SelectedArea).is_empty());
    }

    #[test]
    fn test_new_press_clears_old_markers() {
        let mut grid = MemoryGrid::new(4, 4);
        let mut selection = SelectionController::new();

        selection.pointer_down(&mut grid, at(0, 0), PointerButton::Primary);
        selection.pointer_move(&mut grid, at(1, 1));
        selection.pointer_up(&mut grid, at(1, 1), PointerButton::Primary);

        selection.pointer_down(&mut grid, at(3, 3), PointerButton::Primary);
        assert!(grid.marked(Marker::SelectedArea).is_empty());
        assert_eq!(grid.marked(Marker::ActiveCell), vec![at(3, 3)]);
    }

    #[test]
    fn test_context_press_inside_keeps_selection() {
        let mut grid = MemoryGrid::new(5, 5);
        let mut selection = SelectionController::new();

        selection.pointer_down(&mut grid, at(1, 1), PointerButton::Primary);
        selection.pointer_move(&mut grid, at(2, 3));
        selection.pointer_up(&mut grid, at(2, 3), PointerButton::Primary);
        let before = selection.state().clone();

        selection.pointer_down(&mut grid, at(2, 2), PointerButton::Secondary);
        assert_eq!(selection.state(), &before);

        selection.pointer_down(&mut grid, at(4, 4), PointerButton::Secondary);
        assert_eq!(selection.active(), Some(at(4, 4)));
        assert_eq!(selection.area(), Some(Rectangle::single(at(4, 4))));
        assert!(!selection.is_dragging());
    }

    #[test]
    fn test_arrow_moves_and_clamps() {
        let mut grid = MemoryGrid::new(3, 3);
        let mut selection = SelectionController::new();
        selection.pointer_down(&mut grid, at(0, 0), PointerButton::Primary);
        selection.pointer_up(&mut grid, at(0, 0), PointerButton::Primary);

        selection.arrow(&mut grid, ArrowKey::Up);
        assert_eq!(selection.active(), Some(at(0, 0)));

        selection.arrow(&mut grid, ArrowKey::Down);
        selection.arrow(&mut grid, ArrowKey::Down);
        selection.arrow(&mut grid, ArrowKey::Down);
        selection.arrow(&mut grid, ArrowKey::Right);
        assert_eq!(selection.active(), Some(at(2, 1)));
        assert_eq!(selection.state().anchor, Some(at(2, 1)));
        assert_eq!(grid.focused(), Some(at(2, 1)));
        assert_eq!(grid.marked(Marker::ActiveCell), vec![at(2, 1)]);
    }

    #[test]
    fn test_fill_handle_requires_active_cell() {
        let mut grid = MemoryGrid::new(3, 3);
        let mut selection = SelectionController::new();
        assert_eq!(selection.pointer_down_fill_handle(&mut grid, at(0, 0)), Err(GridError::NoFillDrag));

        selection.pointer_down(&mut grid, at(1, 1), PointerButton::Primary);
        selection.pointer_up(&mut grid, at(1, 1), PointerButton::Primary);
        assert!(selection.pointer_down_fill_handle(&mut grid, at(1, 1)).is_ok());
        selection.pointer_move(&mut grid, at(2, 1));

        let done = selection.pointer_up(&mut grid, at(2, 1), PointerButton::Primary).unwrap();
        assert_eq!(done.kind, DragKind::Fill);
        assert_eq!(done.area, Rectangle { from_row: 1, to_row: 2, from_col: 1, to_col: 1 });
    }

    #[test]
    fn test_cancel_drag() {
        let mut grid = MemoryGrid::new(3, 3);
        let mut selection = SelectionController::new();
        selection.pointer_down(&mut grid, at(0, 0), PointerButton::Primary);
        selection.cancel_drag();
        assert!(!selection.is_dragging());
        assert!(selection.pointer_up(&mut grid, at(1, 1), PointerButton::Primary).is_none());
    }
}
