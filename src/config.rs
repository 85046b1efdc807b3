//! Per-grid configuration
//!
//! Deserialized from the options object passed to the `ExcelGrid`
//! constructor. Every field has a default, so `{}` (or `undefined`) is a
//! valid configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::GridError;
use crate::models::Marker;

/// CSS classes toggled on cell elements for each marker
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerClasses {
    pub active_cell: String,
    pub selected_area: String,
    pub copied: String,
}

impl Default for MarkerClasses {
    fn default() -> Self {
        Self {
            active_cell: Marker::ActiveCell.css_class().to_string(),
            selected_area: Marker::SelectedArea.css_class().to_string(),
            copied: Marker::Copied.css_class().to_string(),
        }
    }
}

impl MarkerClasses {
    pub fn class_for(&self, marker: Marker) -> &str {
        match marker {
            Marker::ActiveCell => &self.active_cell,
            Marker::SelectedArea => &self.selected_area,
            Marker::Copied => &self.copied,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Marker class names
    pub marker_classes: MarkerClasses,

    /// Console log level: error, warn, info, debug or trace
    pub log_level: String,

    /// Report each record id once in the bulk-edit signal even when several
    /// of its cells are in the fill rectangle
    pub dedupe_record_ids: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            marker_classes: MarkerClasses::default(),
            log_level: "debug".to_string(),
            dedupe_record_ids: true,
        }
    }
}

impl GridConfig {
    /// Parsed log level
    pub fn level(&self) -> Result<log::Level, GridError> {
        log::Level::from_str(&self.log_level)
            .map_err(|_| GridError::InvalidConfig(format!("unknown log level '{}'", self.log_level)))
    }

    /// Check every field that can be malformed
    pub fn validate(&self) -> Result<(), GridError> {
        self.level()?;
        for marker in Marker::ALL {
            if self.marker_classes.class_for(marker).trim().is_empty() {
                return Err(GridError::InvalidConfig(format!("empty class name for {:?}", marker)));
            }
        }
        Ok(())
    }
}
