//! CSV column extraction
//!
//! Reads one named column from a headered CSV file and coerces every cell to
//! `f64`. Rows whose cell is absent or not a number are collected as
//! [`RejectedRow`]s instead of failing the read.

use crate::error::ComputeError;
use std::path::Path;

/// A row that did not yield a numeric value
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based index among data rows (the header is not counted)
    pub row: usize,
    /// Raw cell text, `None` when the row has no such column or was malformed
    pub value: Option<String>,
    /// All fields of the row as read, empty if the row itself was malformed
    pub fields: Vec<String>,
    /// Parse error for a malformed row
    pub error: Option<String>,
}

/// Values parsed from an existing file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnValues {
    /// Parsed values in file order
    pub values: Vec<f64>,
    /// Rows skipped during coercion, in file order
    pub rejected: Vec<RejectedRow>,
}

impl ColumnValues {
    /// Number of data rows seen
    pub fn rows(&self) -> usize {
        self.values.len() + self.rejected.len()
    }
}

/// Outcome of reading a column from a path
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRead {
    /// No file at the path
    Missing,
    /// File was read; it may still contain zero valid values
    Values(ColumnValues),
}

/// Reader for a single numeric column
pub struct ColumnReader;

impl ColumnReader {
    /// Read `column` from the CSV at `path`.
    ///
    /// A missing file is [`ColumnRead::Missing`], not an error. Errors are
    /// returned only when an existing file cannot be opened or its header
    /// cannot be read.
    pub fn read(path: &Path, column: &str) -> Result<ColumnRead, ComputeError> {
        if !path.exists() {
            return Ok(ColumnRead::Missing);
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| ComputeError::UnreadableFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        // Duplicate headers resolve to the last occurrence.
        let index = reader
            .headers()
            .map_err(|e| ComputeError::UnreadableFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .iter()
            .enumerate()
            .filter(|(_, header)| *header == column)
            .map(|(idx, _)| idx)
            .last();

        let mut out = ColumnValues::default();

        for (i, result) in reader.records().enumerate() {
            let row = i + 1;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    out.rejected.push(RejectedRow {
                        row,
                        value: None,
                        fields: Vec::new(),
                        error: Some(e.to_string()),
                    });
                    continue;
                }
            };

            let cell = index.and_then(|idx| record.get(idx));
            match cell.and_then(parse_value) {
                Some(value) => out.values.push(value),
                None => out.rejected.push(RejectedRow {
                    row,
                    value: cell.map(str::to_string),
                    fields: record.iter().map(str::to_string).collect(),
                    error: None,
                }),
            }
        }

        Ok(ColumnRead::Values(out))
    }
}

/// Parse a cell as `f64`, ignoring surrounding whitespace
pub fn parse_value(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}
