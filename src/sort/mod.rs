//! Column sort state and record sorting
//!
//! State lives on the grid instance; two grids on one page sort independently.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Icon shown in the sorted column header
    pub fn icon_name(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "utility:arrowdown",
            SortDirection::Descending => "utility:arrowup",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub sorted_by: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header click: same field flips the direction, a new field starts ascending
    pub fn sort_by(&mut self, field: &str) -> SortDirection {
        self.direction = match self.sorted_by.as_deref() {
            Some(current) if current == field => self.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        self.sorted_by = Some(field.to_string());
        self.direction
    }

    /// Stable sort of `records` by the current field; unsorted copy when no field is set
    pub fn sort_records(&self, records: &[Value]) -> Vec<Value> {
        let mut sorted = records.to_vec();
        let Some(field) = self.sorted_by.as_deref() else {
            return sorted;
        };
        sorted.sort_by(|a, b| {
            let ord = compare_values(field_value(a, field), field_value(b, field));
            match self.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        sorted
    }
}

static EMPTY: Value = Value::Null;

/// Resolve a dotted path (`Account.Owner.Name`); missing segments give `Null`
pub fn field_value<'a>(record: &'a Value, path: &str) -> &'a Value {
    path.split('.').try_fold(record, |value, segment| value.get(segment)).unwrap_or(&EMPTY)
}

/// Null sorts first, then numbers (numerically), then everything else by its text
fn compare_values(a: &Value, b: &Value) -> Ordering {
    type_rank(a).cmp(&type_rank(b)).then_with(|| match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => sort_key(a).cmp(&sort_key(b)),
    })
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Number(_) => 1,
        _ => 2,
    }
}

fn sort_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_by_toggles_on_same_field() {
        let mut state = SortState::new();
        assert_eq!(state.sort_by("Name"), SortDirection::Ascending);
        assert_eq!(state.sort_by("Name"), SortDirection::Descending);
        assert_eq!(state.sort_by("Name"), SortDirection::Ascending);
        assert_eq!(state.sort_by("Phone"), SortDirection::Ascending);
        assert_eq!(state.direction.icon_name(), "utility:arrowdown");
    }

    #[test]
    fn test_dotted_path() {
        let record = json!({"Account": {"Name": "Acme"}});
        assert_eq!(field_value(&record, "Account.Name"), &json!("Acme"));
        assert_eq!(field_value(&record, "Account.Owner.Name"), &Value::Null);
    }

    #[test]
    fn test_sort_records_strings_and_missing() {
        let records = vec![
            json!({"Id": "1", "Name": "beta"}),
            json!({"Id": "2"}),
            json!({"Id": "3", "Name": "alpha"}),
        ];
        let mut state = SortState::new();
        state.sort_by("Name");
        let ids: Vec<_> = state.sort_records(&records).iter().map(|r| r["Id"].clone()).collect();
        assert_eq!(ids, vec![json!("2"), json!("3"), json!("1")]);

        state.sort_by("Name");
        let ids: Vec<_> = state.sort_records(&records).iter().map(|r| r["Id"].clone()).collect();
        assert_eq!(ids, vec![json!("1"), json!("3"), json!("2")]);
    }

    #[test]
    fn test_sort_records_numeric() {
        let records = vec![json!({"Amount": 100}), json!({"Amount": 9}), json!({"Amount": 25.5})];
        let mut state = SortState::new();
        state.sort_by("Amount");
        let amounts: Vec<_> = state.sort_records(&records).iter().map(|r| r["Amount"].clone()).collect();
        assert_eq!(amounts, vec![json!(9), json!(25.5), json!(100)]);
    }

    #[test]
    fn test_mixed_types_sort_independent_of_input_order() {
        let mut state = SortState::new();
        state.sort_by("Amount");
        let orders = [
            vec![json!(2), json!(10), json!("15"), Value::Null],
            vec![json!("15"), json!(2), Value::Null, json!(10)],
            vec![Value::Null, json!(10), json!("15"), json!(2)],
        ];
        for values in orders {
            let records: Vec<_> = values.into_iter().map(|v| json!({ "Amount": v })).collect();
            let amounts: Vec<_> =
                state.sort_records(&records).iter().map(|r| r["Amount"].clone()).collect();
            assert_eq!(amounts, vec![Value::Null, json!(2), json!(10), json!("15")]);
        }
    }
}
