//! Import driver.
//!
//! Owns the top-level row loop: extract headers once, then walk data rows
//! tracking consecutive blank rows, partition each row into its
//! categorical and numeric halves, and dispatch it to the graph writer.
//! Row records are built fresh per row and dropped as soon as the row is
//! written; nothing is ever read back from the graph.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::{CellValue, TIMESTAMP_FORMAT};
use crate::config::{ImportConfig, WriteErrorPolicy};
use crate::error::ImportResult;
use crate::graph::GraphWriter;
use crate::label::to_property_name;
use crate::sheet::SheetReader;

/// One row split into its graph-bound halves: categorical `(label, value)`
/// pairs in header order, and the numeric properties attached to every
/// relationship generated from the row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowPartition {
    pub categorical: Vec<(String, String)>,
    pub numeric_props: Vec<(String, f64)>,
}

impl RowPartition {
    pub fn is_empty(&self) -> bool {
        self.categorical.is_empty() && self.numeric_props.is_empty()
    }
}

/// Split a row record for writing.
///
/// Numeric cells leave the mapping and become relationship properties,
/// keyed by the camel-cased form of their header. Timestamp cells are
/// serialized to ISO-8601 text and join the categorical set. Everything
/// else is categorical as-is. Iteration follows the header sequence, so
/// the output order (and therefore the write order) is deterministic.
pub fn partition_row(mut record: HashMap<String, CellValue>, headers: &[String]) -> RowPartition {
    let mut partition = RowPartition::default();

    for header in headers {
        match record.remove(header) {
            None => {}
            Some(CellValue::Number(value)) => partition
                .numeric_props
                .push((to_property_name(header), value)),
            Some(CellValue::Timestamp(dt)) => partition
                .categorical
                .push((header.clone(), dt.format(TIMESTAMP_FORMAT).to_string())),
            Some(CellValue::Text(text)) => partition.categorical.push((header.clone(), text)),
        }
    }

    partition
}

/// Summary of a completed (or skip-tolerant) import run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub sheet: String,
    pub headers: Vec<String>,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub rows_failed: usize,
    pub nodes_merged: usize,
    pub relationships_created: usize,
}

/// What `preview` would write for one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowPreview {
    /// 1-based row number within the sheet's used range.
    pub row: usize,
    pub nodes: Vec<(String, String)>,
    pub properties: Vec<(String, f64)>,
}

/// Dry-run view of an import: headers plus the per-row classification,
/// produced without touching any database.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Preview {
    pub sheet: String,
    pub headers: Vec<String>,
    pub rows: Vec<RowPreview>,
}

pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Run the import: open the workbook, extract headers, walk the data
    /// rows and write each one to the graph.
    pub async fn run(&self) -> ImportResult<ImportReport> {
        let reader = SheetReader::open(&self.config.source_path, self.config.sheet_index)?;
        let headers = reader.extract_headers(self.config.blank_run_threshold);
        info!(
            sheet = reader.sheet_name(),
            headers = headers.len(),
            "starting import"
        );

        let writer = GraphWriter::connect(&self.config).await?;

        let mut report = ImportReport {
            sheet: reader.sheet_name().to_string(),
            headers: headers.clone(),
            ..ImportReport::default()
        };

        let threshold = self.config.blank_run_threshold;
        let mut blank_rows = 0usize;

        for row in self.first_data_row()..reader.height() {
            if reader.first_cell_blank(row) {
                blank_rows += 1;
                if blank_rows > threshold {
                    debug!(row, "blank-row threshold exceeded, stopping scan");
                    break;
                }
            } else {
                blank_rows = 0;
            }

            let record = reader.read_row(row, &headers, threshold);
            if record.is_empty() {
                report.rows_skipped += 1;
                continue;
            }

            report.rows_read += 1;
            let partition = partition_row(record, &headers);

            match writer.write_row(row, &partition).await {
                Ok(stats) => {
                    report.nodes_merged += stats.nodes_merged;
                    report.relationships_created += stats.relationships_created;
                }
                Err(err) => match self.config.on_write_error {
                    WriteErrorPolicy::Abort => {
                        warn!(row, error = %err, "write failed, aborting run");
                        return Err(err);
                    }
                    WriteErrorPolicy::Skip => {
                        warn!(row, error = %err, "write failed, skipping row");
                        report.rows_failed += 1;
                    }
                },
            }
        }

        info!(
            rows = report.rows_read,
            nodes = report.nodes_merged,
            relationships = report.relationships_created,
            "import finished"
        );
        Ok(report)
    }

    /// Classify the sheet without writing anything: same header
    /// extraction and row scan as `run`, no database involved.
    pub fn preview(&self) -> ImportResult<Preview> {
        let reader = SheetReader::open(&self.config.source_path, self.config.sheet_index)?;
        let headers = reader.extract_headers(self.config.blank_run_threshold);

        let mut preview = Preview {
            sheet: reader.sheet_name().to_string(),
            headers: headers.clone(),
            rows: Vec::new(),
        };

        let threshold = self.config.blank_run_threshold;
        let mut blank_rows = 0usize;

        for row in self.first_data_row()..reader.height() {
            if reader.first_cell_blank(row) {
                blank_rows += 1;
                if blank_rows > threshold {
                    break;
                }
            } else {
                blank_rows = 0;
            }

            let record = reader.read_row(row, &headers, threshold);
            if record.is_empty() {
                continue;
            }

            let partition = partition_row(record, &headers);
            preview.rows.push(RowPreview {
                row: row + 1,
                nodes: partition.categorical,
                properties: partition.numeric_props,
            });
        }

        Ok(preview)
    }

    fn first_data_row(&self) -> usize {
        self.config.data_start_row.saturating_sub(1)
    }
}
