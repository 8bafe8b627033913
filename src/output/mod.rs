//! Plain-text rendering of loaded datasets

mod table;

use std::io::Write;

use anyhow::Result;
use serde_json::Value;

use crate::model::Dataset;

pub use table::format_table;

/// Line printed under every `Data from ...` header
pub const SEPARATOR: &str = "---------------------";

/// Body printed when there is nothing to show
pub const NO_DATA: &str = "No data to display.";

/// Writes one block per file: header, separator, body, blank line
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Render `data` under a `Data from <label>:` header
    pub fn render(
        &self,
        data: Option<&Dataset>,
        label: &str,
        writer: &mut dyn Write,
    ) -> Result<()> {
        writeln!(writer, "Data from {}:", label)?;
        writeln!(writer, "{}", SEPARATOR)?;

        match data {
            Some(Dataset::Workbook(sheets)) => {
                for (name, table) in sheets {
                    writeln!(writer, "Sheet: {}", name)?;
                    write!(writer, "{}", format_table(table))?;
                }
            }
            Some(Dataset::Table(table)) => write!(writer, "{}", format_table(table))?,
            Some(Dataset::Record(record)) => {
                for (key, value) in record {
                    writeln!(writer, "{}: {}", key, record_value(value))?;
                }
            }
            Some(Dataset::Lines(lines)) => {
                for line in lines {
                    writeln!(writer, "- {}", line.trim_end())?;
                }
            }
            None => writeln!(writer, "{}", NO_DATA)?,
        }

        writeln!(writer)?;
        Ok(())
    }
}

/// Strings print bare, everything else as compact JSON
fn record_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
