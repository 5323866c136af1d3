//! Spreadsheet and CSV extraction.
//!
//! Tables are rendered as aligned text: a header row, then each data row
//! prefixed with its zero-based index. This is a loose rendering of the
//! content, good enough for keyword and label matching.

use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::path::Path;

use super::extractor::{ExtractionMethod, ExtractionResult};
use super::ExtractionError;

/// Extractor for tabular formats.
pub struct TabularExtractor;

impl TabularExtractor {
    /// Decode every sheet of an .xlsx/.xls workbook.
    pub fn extract_spreadsheet(path: &Path) -> Result<ExtractionResult, ExtractionError> {
        let mut workbook = open_workbook_auto(path)?;
        let mut blocks = Vec::new();

        for name in workbook.sheet_names().to_owned() {
            let range = match workbook.worksheet_range(&name) {
                Ok(range) => range,
                Err(e) => {
                    tracing::warn!("Skipping sheet '{}' in {}: {}", name, path.display(), e);
                    continue;
                }
            };

            let mut rows = range
                .rows()
                .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>());
            let headers = rows.next().unwrap_or_default();
            let body: Vec<Vec<String>> = rows.collect();
            if headers.is_empty() && body.is_empty() {
                continue;
            }
            blocks.push(render_table(&headers, &body));
        }

        Ok(ExtractionResult {
            text: blocks.join("\n\n"),
            method: ExtractionMethod::Tabular,
            page_count: None,
        })
    }

    /// Parse a CSV file with a header row.
    pub fn extract_csv(path: &Path) -> Result<ExtractionResult, ExtractionError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut body = Vec::new();
        for record in reader.records() {
            let record = record?;
            body.push(record.iter().map(str::to_string).collect());
        }

        Ok(ExtractionResult {
            text: render_table(&headers, &body),
            method: ExtractionMethod::Tabular,
            page_count: None,
        })
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.to_string(),
        _ => cell.to_string(),
    }
}

/// Render a header row and data rows as a right-aligned text table with an
/// index column.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    let index_width = rows.len().saturating_sub(1).to_string().len();
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    fn cell(row: &[String], i: usize) -> &str {
        row.get(i).map(String::as_str).unwrap_or("")
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);

    let mut line = " ".repeat(index_width);
    for (i, width) in widths.iter().enumerate() {
        line.push_str(&format!("  {:>width$}", cell(headers, i), width = width));
    }
    lines.push(line.trim_end().to_string());

    for (index, row) in rows.iter().enumerate() {
        let mut line = format!("{:<width$}", index, width = index_width);
        for (i, width) in widths.iter().enumerate() {
            line.push_str(&format!("  {:>width$}", cell(row, i), width = width));
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_table_layout() {
        let headers = strings(&["Item", "Qty"]);
        let rows = vec![strings(&["Bolts", "12"]), strings(&["Nut", "3"])];
        let table = render_table(&headers, &rows);
        assert_eq!(table, "    Item  Qty\n0  Bolts   12\n1    Nut    3");
    }

    #[test]
    fn test_render_table_ragged_rows() {
        let headers = strings(&["A"]);
        let rows = vec![strings(&["1", "extra"])];
        let table = render_table(&headers, &rows);
        assert_eq!(table, "   A\n0  1  extra");
    }

    #[test]
    fn test_render_table_empty() {
        assert_eq!(render_table(&[], &[]), "");
    }

    #[test]
    fn test_extract_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.csv");
        fs::write(&path, "RFQ Number,Line Items\nQ-88,4\n").unwrap();

        let result = TabularExtractor::extract_csv(&path).unwrap();
        assert_eq!(result.method, ExtractionMethod::Tabular);
        assert!(result.text.contains("RFQ Number"));
        assert!(result.text.contains("Q-88"));
    }

    #[test]
    fn test_extract_csv_missing_file() {
        let err = TabularExtractor::extract_csv(Path::new("/nonexistent/x.csv")).unwrap_err();
        assert!(matches!(err, ExtractionError::Csv(_)));
    }

    #[test]
    fn test_extract_spreadsheet_all_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let items = workbook.add_worksheet();
        items.set_name("Items").unwrap();
        items.write_string(0, 0, "Item").unwrap();
        items.write_string(0, 1, "Qty").unwrap();
        items.write_string(1, 0, "Bolts").unwrap();
        items.write_number(1, 1, 12).unwrap();
        items.write_string(2, 0, "Nut").unwrap();
        items.write_number(2, 1, 3).unwrap();
        workbook.add_worksheet().set_name("Blank").unwrap();
        let notes = workbook.add_worksheet();
        notes.set_name("Notes").unwrap();
        notes.write_string(0, 0, "Agency").unwrap();
        notes.write_string(1, 0, "GSA").unwrap();
        workbook.save(&path).unwrap();

        let result = TabularExtractor::extract_spreadsheet(&path).unwrap();
        assert_eq!(result.method, ExtractionMethod::Tabular);
        assert_eq!(
            result.text,
            "    Item  Qty\n0  Bolts   12\n1    Nut    3\n\n   Agency\n0     GSA"
        );
    }

    #[test]
    fn test_extract_spreadsheet_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        fs::write(&path, b"not a workbook").unwrap();

        let err = TabularExtractor::extract_spreadsheet(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::Spreadsheet(_)));
    }
}
