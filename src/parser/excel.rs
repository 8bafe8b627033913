//! Spreadsheet parser (xlsx, xlsm, xls, ods)

use std::borrow::Cow;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::error::LoadError;
use crate::model::{CellValue, Dataset, Table, Workbook};

use super::Parser;

/// Parser for spreadsheet workbooks; every sheet is read
pub struct ExcelParser;

impl Parser for ExcelParser {
    fn parse(&self, path: &Path) -> Result<Dataset, LoadError> {
        let mut workbook = open_workbook_auto(path)?;

        let mut sheets = Workbook::new();
        for sheet_name in workbook.sheet_names() {
            let range: Range<Data> = workbook.worksheet_range(&sheet_name)?;
            let table = table_from_range(&range)?;
            debug!(
                "Sheet {} has {} rows and {} columns",
                sheet_name,
                table.row_count(),
                table.column_count()
            );
            sheets.insert(sheet_name, table);
        }

        Ok(Dataset::Workbook(sheets))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "xlsx" | "xlsm" | "xls" | "ods")
    }
}

/// First row is the header; an empty sheet yields a table with no columns
fn table_from_range(range: &Range<Data>) -> Result<Table, LoadError> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Table::default());
    };

    let mut table = Table::from_header(header_row.iter().enumerate().map(|(i, cell)| {
        let name = cell_to_string(cell);
        if name.is_empty() {
            format!("Column{}", i + 1)
        } else {
            name
        }
    }));

    for (line_num, row) in rows.enumerate() {
        let cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
        // +2 for 1-indexing and header
        table.push_row(cells, line_num + 2)?;
    }

    table.infer_types();
    Ok(table)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::Error(e) => format!("#{:?}", e),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::String(Cow::Owned(s.clone())),
        Data::Float(f) => {
            // Whole numbers are stored as floats
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                CellValue::Int(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if datetime.time() == chrono::NaiveTime::MIN => {
                CellValue::Date(datetime.date())
            }
            Some(datetime) => CellValue::DateTime(datetime),
            None => CellValue::String(Cow::Owned(dt.to_string())),
        },
        Data::DateTimeIso(s) => {
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                CellValue::DateTime(dt)
            } else if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                CellValue::Date(d)
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        Data::DurationIso(s) => CellValue::String(Cow::Owned(s.clone())),
        Data::Error(e) => CellValue::String(Cow::Owned(format!("#{:?}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell() {
        assert_eq!(convert_cell(&Data::Float(3.0)), CellValue::Int(3));
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Float(2.5));
        assert_eq!(convert_cell(&Data::String("  ".into())), CellValue::Null);
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_range_header_and_rows() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("id".into()));
        range.set_value((1, 0), Data::Float(1.0));
        range.set_value((1, 1), Data::String("Al".into()));
        range.set_value((2, 0), Data::Float(2.0));

        let table = table_from_range(&range).unwrap();
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "Column2"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1].cells[1], CellValue::Null);
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(table_from_range(&range).unwrap().is_empty());
    }
}
