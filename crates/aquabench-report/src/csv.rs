//! CSV report export.
//!
//! One flat row per score plus trailing summary rows.

use std::path::Path;

use anyhow::{Context, Result};

use aquabench_core::report::Report;

use crate::{detail_rows, percent, DETAIL_HEADERS};

/// Render the report as CSV text.
pub fn generate_csv(report: &Report) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    writer.write_record(DETAIL_HEADERS)?;
    for row in detail_rows(report) {
        writer.write_record(&row)?;
    }

    writer.write_record(summary_row("Summary", ""))?;
    writer.write_record(summary_row(
        "Total Questions",
        &report.max_score().to_string(),
    ))?;
    writer.write_record(summary_row("Correct", &report.total_score().to_string()))?;
    writer.write_record(summary_row("Accuracy", &percent(report.accuracy())))?;

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush csv output: {err}"))?;
    String::from_utf8(bytes).context("csv output was not valid utf-8")
}

/// Write the CSV report to a file.
pub fn write_csv(report: &Report, path: &Path) -> Result<()> {
    let content = generate_csv(report)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write csv report to {}", path.display()))?;
    Ok(())
}

fn summary_row(label: &str, value: &str) -> Vec<String> {
    let mut row = vec![label.to_string(), value.to_string()];
    row.resize(DETAIL_HEADERS.len(), String::new());
    row
}
