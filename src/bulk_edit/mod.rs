//! Fill / bulk edit
//!
//! A drag from the active cell's fill handle copies that cell's value into
//! every cell of the released rectangle, but only when every cell in it is a
//! lookup cell. The check is all-or-nothing: one cell without a lookup
//! object blocks the whole operation and nothing is written or recorded.

use serde::{Deserialize, Serialize};

use crate::adapter::GridAdapter;
use crate::errors::GridError;
use crate::grid::normalize;
use crate::models::{CellWrite, Coordinate, Rectangle};
use crate::undo::{EditAction, HistoryController, HistoryEntry};

/// Payload handed to the batch-update collaborator when a fill is allowed
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BulkEditRequest {
    pub record_ids: Vec<String>,
    pub lookup_field: String,
    pub lookup_object: String,
}

/// Outcome of an allowed fill
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillReport {
    pub area: Rectangle,
    pub fill_value: String,
    pub request: BulkEditRequest,
    pub written: Vec<CellWrite>,
}

#[derive(Debug, Clone)]
pub struct BulkEditController {
    dedupe_record_ids: bool,
}

impl Default for BulkEditController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl BulkEditController {
    pub fn new(dedupe_record_ids: bool) -> Self {
        Self { dedupe_record_ids }
    }

    /// Walk `area` and collect record ids plus lookup metadata.
    ///
    /// Unresolved cells are skipped. A resolved cell with no binding or no
    /// lookup object makes the area ineligible, as does an area with no
    /// resolvable cell at all.
    pub fn check_eligibility<A: GridAdapter + ?Sized>(
        &self,
        adapter: &A,
        area: &Rectangle,
    ) -> Result<BulkEditRequest, GridError> {
        let mut record_ids: Vec<String> = Vec::new();
        let mut lookup: Option<(String, String)> = None;

        for at in area.cells() {
            if !adapter.has_cell(at) {
                continue;
            }
            let binding = adapter.binding(at).ok_or(GridError::IneligibleBulkEdit(at))?;
            let object = binding.lookup_object.clone().ok_or(GridError::IneligibleBulkEdit(at))?;

            if lookup.is_none() {
                let field = binding.lookup_field.clone().unwrap_or_else(|| binding.field_name.clone());
                lookup = Some((field, object));
            }
            if !(self.dedupe_record_ids && record_ids.contains(&binding.record_id)) {
                record_ids.push(binding.record_id);
            }
        }

        let (lookup_field, lookup_object) = lookup.ok_or(GridError::IneligibleBulkEdit(area.origin()))?;
        Ok(BulkEditRequest { record_ids, lookup_field, lookup_object })
    }

    /// Fill `area` with the value of `active`.
    ///
    /// On an ineligible area this returns `IneligibleBulkEdit` without
    /// touching any cell or the history.
    pub fn fill<A: GridAdapter + ?Sized>(
        &self,
        adapter: &mut A,
        active: Option<Coordinate>,
        area: Rectangle,
        history: &mut HistoryController,
    ) -> Result<FillReport, GridError> {
        let active = active.ok_or(GridError::NoFillDrag)?;
        let fill_value = adapter.read_value(active).ok_or(GridError::MissingCell(active))?;
        let area = normalize(area.from_row, area.to_row, area.from_col, area.to_col);

        let request = self.check_eligibility(&*adapter, &area)?;

        history.record(HistoryEntry::capture(&*adapter, EditAction::Fill, area.cells()));

        let mut written = Vec::with_capacity(area.cell_count());
        for at in area.cells() {
            match adapter.write_value(at, &fill_value) {
                Ok(()) => written.push(CellWrite { coordinate: at, value: fill_value.clone() }),
                Err(e) => log::debug!("fill skipped: {}", e),
            }
        }
        log::debug!(
            "filled {:?} with '{}' ({} cell(s), {} record(s))",
            area,
            fill_value,
            written.len(),
            request.record_ids.len()
        );

        Ok(FillReport { area, fill_value, request, written })
    }
}
