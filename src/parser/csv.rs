//! Delimited text parser (csv, tsv)

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::LoadError;
use crate::model::{CellValue, Dataset, Table};

use super::Parser;

/// Parser for comma- and tab-separated files
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path) -> Result<Dataset, LoadError> {
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };
        let file = File::open(path)?;
        let table = read_delimited(BufReader::new(file), delimiter)?;
        Ok(Dataset::Table(table))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "csv" | "tsv")
    }
}

/// Read delimited text with a header row into a table.
///
/// Rows shorter than the header are padded with nulls, wider rows fail.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Table, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::malformed("no header row"));
    }
    let mut table = Table::from_header(headers.iter());

    for (line_num, result) in csv_reader.records().enumerate() {
        let record = result?;
        // +2 for 1-indexing and header
        let source_line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(line_num + 2);
        let cells: Vec<CellValue> = record.iter().map(parse_cell_value).collect();
        table.push_row(cells, source_line)?;
    }

    table.infer_types();
    Ok(table)
}

/// Parse a string value into a CellValue with type inference.
///
/// Surrounding whitespace is ignored for detection; text cells keep it.
pub(crate) fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" {
        return CellValue::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(date);
    }

    // ISO 8601, with either separator
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return CellValue::DateTime(dt);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return CellValue::DateTime(dt);
    }

    CellValue::String(Cow::Owned(s.to_string()))
}
