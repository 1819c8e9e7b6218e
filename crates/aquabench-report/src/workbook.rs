//! Spreadsheet-equivalent report export.
//!
//! A [`Workbook`] is a set of named sheets of flat records: `detail` plus
//! one statistics sheet per grouping axis. The shipped sink writes one CSV
//! file per sheet into a directory; a real spreadsheet codec would plug in
//! at the same seam.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use aquabench_core::report::Report;
use aquabench_core::statistics::GroupStats;

use crate::{detail_rows, percent, DETAIL_HEADERS};

/// One named sheet of flat records.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// An ordered collection of sheets.
#[derive(Debug, Clone)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// Build the workbook for a report: detail, by-category, by-level, by-type.
pub fn build_workbook(report: &Report) -> Workbook {
    let statistics = report.statistics();
    Workbook {
        sheets: vec![
            Sheet {
                name: "detail".to_string(),
                headers: DETAIL_HEADERS.iter().map(|h| h.to_string()).collect(),
                rows: detail_rows(report),
            },
            stats_sheet("by-category", "Category", &statistics.by_category),
            stats_sheet("by-level", "Level", &statistics.by_level),
            stats_sheet("by-type", "Type", &statistics.by_type),
        ],
    }
}

/// Write one CSV file per sheet into `dir`.
pub fn write_workbook(report: &Report, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create report directory: {}", dir.display()))?;

    for sheet in build_workbook(report).sheets {
        let path = dir.join(format!("{}.csv", sheet.name));
        let mut writer = ::csv::Writer::from_path(&path)
            .with_context(|| format!("failed to create sheet file: {}", path.display()))?;
        writer.write_record(&sheet.headers)?;
        for row in &sheet.rows {
            writer.write_record(row)?;
        }
        writer
            .flush()
            .with_context(|| format!("failed to flush sheet file: {}", path.display()))?;
    }
    Ok(())
}

fn stats_sheet(name: &str, axis: &str, groups: &BTreeMap<String, GroupStats>) -> Sheet {
    Sheet {
        name: name.to_string(),
        headers: [axis, "Total", "Correct", "Incorrect", "Accuracy"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
        rows: groups
            .iter()
            .map(|(key, stats)| {
                vec![
                    key.clone(),
                    stats.count.to_string(),
                    stats.correct_count.to_string(),
                    (stats.count - stats.correct_count).to_string(),
                    percent(stats.accuracy),
                ]
            })
            .collect(),
    }
}
