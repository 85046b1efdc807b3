//! JavaScript-facing API
//!
//! # Module Structure
//!
//! - `helpers`: serialization and error conversion shared by the bindings
//! - `grid`: the `ExcelGrid` class, one per rendered grid

pub mod helpers;
pub mod grid;

pub use grid::ExcelGrid;
