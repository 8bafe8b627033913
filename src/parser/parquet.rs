//! Parquet file parser

use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType as ArrowType, Date32Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, TimeUnit, TimestampMicrosecondType, TimestampMillisecondType,
    TimestampNanosecondType, TimestampSecondType, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::LoadError;
use crate::model::{CellType, CellValue, Column, Dataset, Table};

use super::Parser;

/// Parser for Parquet files
pub struct ParquetParser;

impl Parser for ParquetParser {
    fn parse(&self, path: &Path) -> Result<Dataset, LoadError> {
        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

        let columns: Vec<Column> = builder
            .schema()
            .fields()
            .iter()
            .enumerate()
            .map(|(i, field)| {
                Column::with_type(field.name().clone(), i, arrow_type_to_cell_type(field.data_type()))
            })
            .collect();
        let mut table = Table::new(columns);

        let mut line_num = 0usize;
        for batch in builder.build()? {
            let batch = batch?;
            for row_idx in 0..batch.num_rows() {
                line_num += 1;
                let cells = batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell_value(col, row_idx))
                    .collect();
                table.push_row(cells, line_num)?;
            }
        }

        Ok(Dataset::Table(table))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "parquet" | "pq")
    }
}

fn arrow_type_to_cell_type(arrow_type: &ArrowType) -> CellType {
    match arrow_type {
        ArrowType::Null => CellType::Null,
        ArrowType::Boolean => CellType::Bool,
        ArrowType::Int8
        | ArrowType::Int16
        | ArrowType::Int32
        | ArrowType::Int64
        | ArrowType::UInt8
        | ArrowType::UInt16
        | ArrowType::UInt32
        | ArrowType::UInt64 => CellType::Int,
        ArrowType::Float16 | ArrowType::Float32 | ArrowType::Float64 => CellType::Float,
        ArrowType::Date32 | ArrowType::Date64 => CellType::Date,
        ArrowType::Timestamp(_, _) => CellType::DateTime,
        _ => CellType::String,
    }
}

fn extract_cell_value(array: &ArrayRef, row_idx: usize) -> CellValue {
    if array.is_null(row_idx) {
        return CellValue::Null;
    }

    match array.data_type() {
        ArrowType::Boolean => CellValue::Bool(array.as_boolean().value(row_idx)),
        ArrowType::Int8 => CellValue::Int(array.as_primitive::<Int8Type>().value(row_idx).into()),
        ArrowType::Int16 => CellValue::Int(array.as_primitive::<Int16Type>().value(row_idx).into()),
        ArrowType::Int32 => CellValue::Int(array.as_primitive::<Int32Type>().value(row_idx).into()),
        ArrowType::Int64 => CellValue::Int(array.as_primitive::<Int64Type>().value(row_idx)),
        ArrowType::UInt8 => CellValue::Int(array.as_primitive::<UInt8Type>().value(row_idx).into()),
        ArrowType::UInt16 => {
            CellValue::Int(array.as_primitive::<UInt16Type>().value(row_idx).into())
        }
        ArrowType::UInt32 => {
            CellValue::Int(array.as_primitive::<UInt32Type>().value(row_idx).into())
        }
        ArrowType::UInt64 => {
            let value = array.as_primitive::<UInt64Type>().value(row_idx);
            i64::try_from(value)
                .map(CellValue::Int)
                .unwrap_or_else(|_| CellValue::String(Cow::Owned(value.to_string())))
        }
        ArrowType::Float32 => {
            CellValue::Float(array.as_primitive::<Float32Type>().value(row_idx).into())
        }
        ArrowType::Float64 => CellValue::Float(array.as_primitive::<Float64Type>().value(row_idx)),
        ArrowType::Utf8 => {
            CellValue::String(Cow::Owned(array.as_string::<i32>().value(row_idx).to_string()))
        }
        ArrowType::LargeUtf8 => {
            CellValue::String(Cow::Owned(array.as_string::<i64>().value(row_idx).to_string()))
        }
        ArrowType::Date32 => {
            let days = array.as_primitive::<Date32Type>().value(row_idx);
            // Days since the Unix epoch
            days.checked_add(719_163)
                .and_then(chrono::NaiveDate::from_num_days_from_ce_opt)
                .map(CellValue::Date)
                .unwrap_or(CellValue::Int(days.into()))
        }
        ArrowType::Timestamp(unit, _) => {
            let nanos = match unit {
                TimeUnit::Second => array
                    .as_primitive::<TimestampSecondType>()
                    .value(row_idx)
                    .saturating_mul(1_000_000_000),
                TimeUnit::Millisecond => array
                    .as_primitive::<TimestampMillisecondType>()
                    .value(row_idx)
                    .saturating_mul(1_000_000),
                TimeUnit::Microsecond => array
                    .as_primitive::<TimestampMicrosecondType>()
                    .value(row_idx)
                    .saturating_mul(1_000),
                TimeUnit::Nanosecond => array
                    .as_primitive::<TimestampNanosecondType>()
                    .value(row_idx),
            };
            CellValue::DateTime(chrono::DateTime::from_timestamp_nanos(nanos).naive_utc())
        }
        _ => ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())
            .map(|fmt| CellValue::String(Cow::Owned(fmt.value(row_idx).to_string())))
            .unwrap_or(CellValue::Null),
    }
}
