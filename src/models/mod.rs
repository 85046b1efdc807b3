//! Models module for the grid engine
//!
//! Plain data shared by every controller: coordinates and rectangles,
//! per-cell metadata reported by the host, input events and the signals
//! raised back to the host.

pub mod coords;
pub mod cell;
pub mod input;
pub mod signals;

// Re-export commonly used types
pub use coords::{Coordinate, Rectangle};
pub use cell::{CellBinding, CellGeometry, CellWrite, Marker};
pub use input::{ArrowKey, ContextMenuAction, PointerButton};
pub use signals::{GridSignal, HighlightBox};
