//! The value produced by loading one file

use indexmap::IndexMap;
use serde_json::Value;

use super::table::Table;

/// Sheets of a workbook, keyed by sheet name in workbook order
pub type Workbook = IndexMap<String, Table>;

/// Top-level entries of a structured record, in document order
pub type Record = IndexMap<String, Value>;

/// Everything a loader can hand to the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// A single table with a header row
    Table(Table),
    /// One table per sheet of a multi-sheet source
    Workbook(Workbook),
    /// Key/value pairs of a structured document
    Record(Record),
    /// Raw text lines
    Lines(Vec<String>),
}

impl Dataset {
    /// Short name of the shape, used in log lines
    pub fn shape(&self) -> &'static str {
        match self {
            Dataset::Table(_) => "table",
            Dataset::Workbook(_) => "workbook",
            Dataset::Record(_) => "record",
            Dataset::Lines(_) => "lines",
        }
    }

    /// Number of rows, sheets, entries or lines, depending on the shape
    pub fn entry_count(&self) -> usize {
        match self {
            Dataset::Table(table) => table.row_count(),
            Dataset::Workbook(sheets) => sheets.len(),
            Dataset::Record(record) => record.len(),
            Dataset::Lines(lines) => lines.len(),
        }
    }
}

impl From<Table> for Dataset {
    fn from(table: Table) -> Self {
        Dataset::Table(table)
    }
}
