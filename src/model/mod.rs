//! In-memory representation of loaded files

mod dataset;
mod schema;
mod table;

pub use dataset::{Dataset, Record, Workbook};
pub use schema::{CellType, Column};
pub use table::{CellValue, Row, RowWidthError, Table};
