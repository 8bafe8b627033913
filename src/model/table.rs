//! Table, Row, and Cell data structures

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use super::schema::{CellType, Column};

/// A cell value with type information
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl CellValue {
    /// Text shown for this cell in rendered output
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            // Whole floats keep a trailing `.0`
            CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                Cow::Owned(format!("{f:.1}"))
            }
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
            CellValue::Date(d) => Cow::Owned(d.to_string()),
            CellValue::DateTime(dt) => Cow::Owned(dt.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

/// A row carried more fields than the table has columns
#[derive(Debug, Error)]
#[error("row at line {line} has {found} fields, expected {expected}")]
pub struct RowWidthError {
    pub line: usize,
    pub found: usize,
    pub expected: usize,
}

/// A row in the table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Line/row number in the source file (1-indexed)
    pub source_line: usize,
}

impl Row {
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// A table of named columns; every row holds exactly one cell per column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create an empty table from header names
    pub fn from_header<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Column::new(name, i))
            .collect();
        Self::new(columns)
    }

    /// Append a row. Short rows are padded with nulls; rows wider than the
    /// header are rejected so the equal-length invariant holds.
    pub fn push_row(
        &mut self,
        mut cells: Vec<CellValue>,
        source_line: usize,
    ) -> Result<(), RowWidthError> {
        let expected = self.column_count();
        if cells.len() > expected {
            return Err(RowWidthError {
                line: source_line,
                found: cells.len(),
                expected,
            });
        }
        cells.resize(expected, CellValue::Null);
        self.rows.push(Row { cells, source_line });
        Ok(())
    }

    /// Widen each column's type over all of its cells
    pub fn infer_types(&mut self) {
        for (col_idx, column) in self.columns.iter_mut().enumerate() {
            column.inferred_type = self
                .rows
                .iter()
                .filter_map(|row| row.get(col_idx))
                .fold(CellType::Null, |acc, cell| acc.widen(CellType::of(cell)));
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
