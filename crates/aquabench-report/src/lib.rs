//! aquabench-report — Report serialization.
//!
//! Each module is an independent serializer over one immutable
//! [`Report`](aquabench_core::report::Report): the serializers read report
//! fields, the report knows nothing about formats.

pub mod csv;
pub mod markdown;
pub mod workbook;

use std::path::Path;
use std::str::FromStr;

use aquabench_core::answer::join_letters;
use aquabench_core::report::{Report, Score};

/// Report sink formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
    Markdown,
    /// Spreadsheet-equivalent: a directory with one CSV file per sheet.
    Workbook,
}

impl ReportFormat {
    /// Infer a format from the destination path extension. Destinations
    /// without an extension become workbook directories; unknown
    /// extensions fall back to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("csv") => ReportFormat::Csv,
            Some("md") | Some("markdown") => ReportFormat::Markdown,
            Some("xlsx") | Some("xls") => ReportFormat::Workbook,
            Some(_) => ReportFormat::Json,
            None => ReportFormat::Workbook,
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "md" | "markdown" => Ok(ReportFormat::Markdown),
            "sheets" | "workbook" => Ok(ReportFormat::Workbook),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// Column set shared by the detail exports.
pub(crate) const DETAIL_HEADERS: [&str; 8] = [
    "ID",
    "Question",
    "Category",
    "Level",
    "Type",
    "Expected",
    "Predicted",
    "Correct",
];

/// One flat detail row per score, in report order.
pub(crate) fn detail_rows(report: &Report) -> Vec<Vec<String>> {
    report
        .scores()
        .iter()
        .map(|score| detail_row(report, score))
        .collect()
}

fn detail_row(report: &Report, score: &Score) -> Vec<String> {
    let (text, category, level, question_type) = match report.benchmark().get(&score.example_id) {
        Ok(question) => (
            question.text.clone(),
            question.category.clone(),
            question.level.clone(),
            question.question_type.to_string(),
        ),
        Err(_) => Default::default(),
    };
    vec![
        score.example_id.clone(),
        text,
        category,
        level,
        question_type,
        join_letters(&score.expected),
        join_letters(&score.predicted),
        score.is_correct.to_string(),
    ]
}

pub(crate) fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}
