//! Flat tabular records behind the csv codec.
//!
//! Spreadsheet-style inputs are treated as black-box codecs producing an
//! ordered sequence of flat records; [`Table`] is that sequence. The csv
//! crate is the one codec shipped here.

use std::path::Path;

use anyhow::{Context, Result};

/// An ordered sequence of flat string records with named columns.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of a column by exact header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Trimmed, non-empty cell value at `column` of `row`.
    pub fn cell<'a>(row: &'a [String], column: usize) -> Option<&'a str> {
        let value = row.get(column)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// Read a tabular file into a [`Table`].
///
/// Rows are allowed to be ragged; short rows simply have missing cells.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open tabular file: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header row: {}", path.display()))?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("failed to read record: {}", path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}

/// Write a [`Table`] out through the csv codec.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = ::csv::Writer::from_path(path)
        .with_context(|| format!("failed to create tabular file: {}", path.display()))?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush tabular file: {}", path.display()))?;
    Ok(())
}
