//! Column metadata and inferred types

use super::table::CellValue;

/// Type of a column, inferred from the cells it holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellType {
    #[default]
    Null,
    Bool,
    Int,
    Float,
    String,
    Date,
    DateTime,
    Mixed,
}

impl CellType {
    /// Type of a single cell
    pub fn of(cell: &CellValue) -> CellType {
        match cell {
            CellValue::Null => CellType::Null,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::String(_) => CellType::String,
            CellValue::Date(_) => CellType::Date,
            CellValue::DateTime(_) => CellType::DateTime,
        }
    }

    /// Widen the type so it also covers `other`
    pub fn widen(self, other: CellType) -> CellType {
        if self == other {
            return self;
        }

        match (self, other) {
            (CellType::Null, t) | (t, CellType::Null) => t,
            (CellType::Int, CellType::Float) | (CellType::Float, CellType::Int) => CellType::Float,
            (CellType::Date, CellType::DateTime) | (CellType::DateTime, CellType::Date) => {
                CellType::DateTime
            }
            _ => CellType::Mixed,
        }
    }

    /// Numeric columns are right-aligned when rendered
    pub fn is_numeric(self) -> bool {
        matches!(self, CellType::Int | CellType::Float)
    }
}

/// Column metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// 0-based position
    pub index: usize,
    /// Type inferred from data, or declared by the source schema
    pub inferred_type: CellType,
}

impl Column {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            inferred_type: CellType::Null,
        }
    }

    /// Column with a type declared up front (e.g. from a Parquet schema)
    pub fn with_type(name: impl Into<String>, index: usize, cell_type: CellType) -> Self {
        Self {
            name: name.into(),
            index,
            inferred_type: cell_type,
        }
    }
}
