//! Signals raised from the engine to the host and its collaborators

use serde::{Deserialize, Serialize};

/// Dashed-border box drawn around the copied block
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HighlightBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// One notification for the host; serialized as `{ "type": "...", ...fields }`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GridSignal {
    /// A cell value was mutated by paste, fill, direct edit or undo
    ValueChanged {
        record_id: String,
        field_name: String,
        value: String,
    },

    /// Fill rectangle passed the lookup eligibility check
    BulkEditAllowed {
        record_ids: Vec<String>,
        lookup_field: String,
        lookup_object: String,
    },

    /// Fill rectangle contained a cell without lookup metadata; nothing was changed
    BulkEditBlocked,

    /// Undo control may be enabled
    HistoryAvailable,

    /// Undo stack is empty; undo control should be disabled
    HistoryExhausted,

    /// The edited-record ledger went from clean to dirty
    UnsavedChanges,

    ShowCopyHighlight {
        #[serde(rename = "box")]
        highlight: HighlightBox,
    },

    HideCopyHighlight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_json_shape() {
        let signal = GridSignal::ValueChanged {
            record_id: "001".to_string(),
            field_name: "Name".to_string(),
            value: "Acme".to_string(),
        };
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["type"], "valueChanged");
        assert_eq!(json["recordId"], "001");
        assert_eq!(json["fieldName"], "Name");

        let blocked = serde_json::to_value(&GridSignal::BulkEditBlocked).unwrap();
        assert_eq!(blocked["type"], "bulkEditBlocked");
    }
}
