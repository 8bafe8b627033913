//! Column-aligned table layout

use crate::model::Table;

/// Gap between adjacent columns
const COLUMN_GAP: &str = "  ";

/// Lay out a table as aligned text: header first, no row index.
///
/// Numeric columns are right-aligned, everything else left-aligned. Each line
/// ends with a newline and carries no trailing whitespace.
pub fn format_table(table: &Table) -> String {
    if table.is_empty() {
        return "Empty table\n".to_string();
    }

    let headers: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();
    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|c| c.display().into_owned()).collect())
        .collect();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = col_widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let right_aligned: Vec<bool> = table
        .columns
        .iter()
        .map(|c| c.inferred_type.is_numeric())
        .collect();

    let mut output = String::new();
    for row in std::iter::once(&headers).chain(body.iter()) {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = col_widths[i];
                if right_aligned[i] {
                    format!("{:>width$}", cell, width = width)
                } else {
                    format!("{:<width$}", cell, width = width)
                }
            })
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_alignment() {
        let mut table = Table::from_header(["name", "qty"]);
        table
            .push_row(vec![CellValue::from("apple"), CellValue::Int(3)], 2)
            .unwrap();
        table
            .push_row(vec![CellValue::from("fig"), CellValue::Int(120)], 3)
            .unwrap();
        table.infer_types();

        assert_eq!(
            format_table(&table),
            "name   qty\napple    3\nfig    120\n"
        );
    }

    #[test]
    fn test_header_only() {
        let table = Table::from_header(["a", "b"]);
        assert_eq!(format_table(&table), "a  b\n");
    }

    #[test]
    fn test_no_columns() {
        assert_eq!(format_table(&Table::default()), "Empty table\n");
    }
}
