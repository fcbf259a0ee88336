//! Row reader over a single worksheet.
//!
//! Wraps a calamine range loaded once at open time. Row and column
//! indices here are zero-based and relative to the sheet's used range;
//! row 0 is the header row.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use tracing::debug;

use crate::classify::{classify, is_blank, CellValue};
use crate::error::{ImportError, ImportResult};
use crate::label::to_label;

#[derive(Debug)]
pub struct SheetReader {
    sheet_name: String,
    range: Range<Data>,
}

impl SheetReader {
    /// Open a workbook by path and load the worksheet at `sheet_index`
    /// (zero-based). Fails if the file cannot be opened or the index is
    /// out of range.
    pub fn open(path: &Path, sheet_index: usize) -> ImportResult<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path)?;

        let sheet_names = workbook.sheet_names().to_vec();
        let sheet_name =
            sheet_names
                .get(sheet_index)
                .cloned()
                .ok_or(ImportError::SheetIndex {
                    index: sheet_index,
                    count: sheet_names.len(),
                })?;

        let range = workbook.worksheet_range(&sheet_name)?;
        Ok(Self { sheet_name, range })
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Number of rows in the used range.
    pub fn height(&self) -> usize {
        self.range.get_size().0
    }

    /// True if the first cell of `row` is blank. Used by the import
    /// driver's consecutive-blank-row tracking.
    pub fn first_cell_blank(&self, row: usize) -> bool {
        self.range.get((row, 0)).map_or(true, is_blank)
    }

    /// Extract the normalized column headers from the header row.
    ///
    /// Scans the full column range of row 0, skipping blank cells and
    /// giving up once more than `threshold` consecutive blanks have been
    /// seen. Non-blank values are normalized with [`to_label`] and
    /// appended in column order.
    pub fn extract_headers(&self, threshold: usize) -> Vec<String> {
        let (_, width) = self.range.get_size();
        let mut headers = Vec::new();
        let mut blank_run = 0usize;

        for column in 0..width {
            if blank_run > threshold {
                break;
            }

            let cell = self.range.get((0, column));
            match cell {
                Some(value) if !is_blank(value) => {
                    blank_run = 0;
                    let header = to_label(&cell_text(value));
                    debug!(column, %header, "extracted header");
                    headers.push(header);
                }
                _ => blank_run += 1,
            }
        }

        headers
    }

    /// Read one data row into a header-keyed mapping.
    ///
    /// Columns are aligned 1:1 to the header sequence. Blank cells are
    /// omitted (never stored as nulls) and the scan aborts once more than
    /// `threshold` consecutive blanks have been seen. A row where every
    /// cell is blank yields an empty map.
    pub fn read_row(
        &self,
        row: usize,
        headers: &[String],
        threshold: usize,
    ) -> HashMap<String, CellValue> {
        let mut record = HashMap::new();
        let mut blank_run = 0usize;

        for (column, header) in headers.iter().enumerate() {
            if blank_run > threshold {
                break;
            }

            match self.range.get((row, column)).and_then(classify) {
                Some(value) => {
                    blank_run = 0;
                    record.insert(header.clone(), value);
                }
                None => blank_run += 1,
            }
        }

        record
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}
