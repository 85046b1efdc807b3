//! Spreadsheet Grid WASM Module
//!
//! Editing engine for an in-browser spreadsheet-like grid: drag selection,
//! keyboard navigation, copy/paste with block tiling, lookup-gated fill and
//! single-level undo. Rendering stays in the host; the engine talks to it
//! only through the [`adapter::GridAdapter`] capabilities.

pub mod models;
pub mod errors;
pub mod config;
pub mod grid;
pub mod adapter;
pub mod selection;
pub mod clipboard;
pub mod bulk_edit;
pub mod editing;
pub mod undo;
pub mod sort;
pub mod engine;
pub mod api;

// Re-export commonly used types
pub use models::*;
pub use adapter::{GridAdapter, MemoryGrid};
pub use api::ExcelGrid;
pub use config::GridConfig;
pub use engine::GridEngine;
pub use errors::GridError;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (module re-instantiated on the same page) keeps the first logger
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Spreadsheet grid WASM module initialized");
}
