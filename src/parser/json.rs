//! JSON document parser

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexSet;
use serde_json::Value;

use crate::error::LoadError;
use crate::model::{CellValue, Dataset, Record, Table};

use super::Parser;

/// Parser for JSON files.
///
/// A top-level object becomes a [`Dataset::Record`]; an array of objects
/// becomes a [`Dataset::Table`] whose columns are the union of keys.
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path) -> Result<Dataset, LoadError> {
        let file = File::open(path)?;
        let value: Value = serde_json::from_reader(BufReader::new(file))?;
        dataset_from_value(value)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "json"
    }
}

fn dataset_from_value(value: Value) -> Result<Dataset, LoadError> {
    match value {
        Value::Object(obj) => Ok(Dataset::Record(obj.into_iter().collect::<Record>())),
        Value::Array(items) => table_from_array(&items).map(Dataset::Table),
        other => Err(LoadError::malformed(format!(
            "expected a JSON object or array, found {}",
            json_kind(&other)
        ))),
    }
}

fn table_from_array(items: &[Value]) -> Result<Table, LoadError> {
    // Collect all unique keys across all objects to build column list
    let mut column_names: IndexSet<&str> = IndexSet::new();
    for item in items {
        match item {
            Value::Object(obj) => column_names.extend(obj.keys().map(String::as_str)),
            other => {
                return Err(LoadError::malformed(format!(
                    "array items must be objects, found {}",
                    json_kind(other)
                )))
            }
        }
    }

    let mut table = Table::from_header(column_names.iter().copied());
    for (idx, item) in items.iter().enumerate() {
        let cells = column_names
            .iter()
            .map(|key| json_value_to_cell(item.get(*key)))
            .collect();
        table.push_row(cells, idx + 1)?;
    }

    table.infer_types();
    Ok(table)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn json_value_to_cell(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Null,
        Some(Value::Bool(b)) => CellValue::Bool(*b),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(Cow::Owned(n.to_string()))
            }
        }
        Some(Value::String(s)) => CellValue::String(Cow::Owned(s.clone())),
        // Nested values are shown as compact JSON
        Some(nested) => CellValue::String(Cow::Owned(nested.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_keeps_document_order() {
        let value: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": "x", "mid": [1, 2]}"#).unwrap();
        let Dataset::Record(record) = dataset_from_value(value).unwrap() else {
            panic!("expected a record");
        };

        let keys: Vec<_> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(record["mid"], json!([1, 2]));
    }

    #[test]
    fn test_array_of_objects_becomes_table() {
        let value = json!([{"id": 1, "name": "Al"}, {"id": 2, "extra": true}]);
        let Dataset::Table(table) = dataset_from_value(value).unwrap() else {
            panic!("expected a table");
        };

        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "name", "extra"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1].cells[1], CellValue::Null);
        assert_eq!(table.rows[1].cells[2], CellValue::Bool(true));
    }

    #[test]
    fn test_scalar_is_malformed() {
        let err = dataset_from_value(json!(42)).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));

        let err = dataset_from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }
}
