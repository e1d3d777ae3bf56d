//! Spreadsheet and CSV extraction
//!
//! Both strategies treat the first row as data. Promoting it to column names
//! would silently drop a row from files that have no header, so the choice
//! is left to whoever consumes the table.

use calamine::Reader;

use crate::error::{Error, Result};
use crate::types::{FileItem, PageText, Table};

use super::registry::{Extraction, Strategy};

/// Render one row of cells as a text line
fn row_line(cells: &[String]) -> String {
    cells.join(" | ")
}

/// Excel strategy: every sheet becomes one page and one table
pub struct SpreadsheetStrategy;

impl SpreadsheetStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpreadsheetStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for SpreadsheetStrategy {
    fn extract(&self, item: &FileItem) -> Result<Extraction> {
        let cursor = std::io::Cursor::new(item.bytes.as_slice());
        let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
            .map_err(|e| Error::corrupt(&item.name, e.to_string()))?;

        let mut pages = Vec::new();
        let mut tables = Vec::new();
        let mut page_number = 0u32;

        for sheet_name in workbook.sheet_names().to_vec() {
            page_number += 1;

            let mut rows: Vec<Vec<String>> = Vec::new();
            let mut text = format!("Sheet: {}\n", sheet_name);

            if let Ok(range) = workbook.worksheet_range(&sheet_name) {
                for row in range.rows() {
                    let cells: Vec<String> = row
                        .iter()
                        .map(|cell| match cell {
                            calamine::Data::Empty => String::new(),
                            calamine::Data::String(s) => s.clone(),
                            calamine::Data::Float(f) => f.to_string(),
                            calamine::Data::Int(i) => i.to_string(),
                            calamine::Data::Bool(b) => b.to_string(),
                            calamine::Data::DateTime(dt) => dt.to_string(),
                            _ => String::new(),
                        })
                        .collect();

                    if cells.iter().all(|s| s.is_empty()) {
                        continue;
                    }
                    text.push_str(&row_line(&cells));
                    text.push('\n');
                    rows.push(cells);
                }
            }

            pages.push(PageText {
                page_number,
                text: text.trim_end().to_string(),
            });
            if !rows.is_empty() {
                tables.push(Table { page_number, rows });
            }
        }

        if pages.is_empty() {
            return Err(Error::corrupt(&item.name, "workbook contains no sheets"));
        }

        Ok(Extraction {
            pages,
            tables,
            images: Vec::new(),
        })
    }
}

/// CSV strategy: one page, one table, first row is data
pub struct CsvStrategy;

impl CsvStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for CsvStrategy {
    fn extract(&self, item: &FileItem) -> Result<Extraction> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(item.bytes.as_slice());

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut text = String::new();

        for record in reader.records() {
            let record = record.map_err(|e| Error::corrupt(&item.name, e.to_string()))?;
            let cells: Vec<String> = record.iter().map(|c| c.to_string()).collect();
            text.push_str(&row_line(&cells));
            text.push('\n');
            rows.push(cells);
        }

        let tables = if rows.is_empty() {
            Vec::new()
        } else {
            vec![Table {
                page_number: 1,
                rows,
            }]
        };

        Ok(Extraction {
            pages: vec![PageText {
                page_number: 1,
                text: text.trim_end().to_string(),
            }],
            tables,
            images: Vec::new(),
        })
    }
}
