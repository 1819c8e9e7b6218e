//! aquabench-batch — Multi-model batch evaluation.
//!
//! Runs the scorer once per model, fully independently, and builds a
//! cross-model comparison table. One model's malformed prediction column
//! degrades that model's report only; the rest of the batch is unaffected.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::{json, Value};

use aquabench_core::model::Benchmark;
use aquabench_core::report::Report;
use aquabench_core::scoring::{score, score_value, Predictions};
use aquabench_core::statistics::GroupStats;

use aquabench_sources::table::Table;

/// One model's scored report.
#[derive(Debug)]
pub struct ModelResult {
    pub model_name: String,
    pub report: Report,
}

/// A model whose prediction column could not be used as supplied.
#[derive(Debug, Clone)]
pub struct ModelError {
    pub model_name: String,
    pub error: String,
}

/// Output of a batch run.
#[derive(Debug)]
pub struct BatchSummary {
    pub benchmark: String,
    pub total_questions: usize,
    /// Per-model results, descending by overall accuracy; ties keep the
    /// original column order.
    pub results: Vec<ModelResult>,
    pub errors: Vec<ModelError>,
}

/// Score every model column against the benchmark.
///
/// Each pass is independent: the benchmark is shared read-only, every
/// model gets its own report. A column whose top-level shape is rejected
/// is scored as all-unanswered instead of aborting the batch.
pub fn evaluate_all(benchmark: &Arc<Benchmark>, columns: &[(String, Value)]) -> BatchSummary {
    let mut results = Vec::with_capacity(columns.len());
    let mut errors = Vec::new();

    for (model_name, payload) in columns {
        let report = match score_value(benchmark, payload) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(
                    model = %model_name,
                    %err,
                    "prediction column rejected, scoring as unanswered"
                );
                errors.push(ModelError {
                    model_name: model_name.clone(),
                    error: err.to_string(),
                });
                score(benchmark, &Predictions::empty())
            }
        };
        results.push(ModelResult {
            model_name: model_name.clone(),
            report,
        });
    }

    // Stable sort keeps original column order for equal accuracies.
    results.sort_by(|a, b| {
        b.report
            .accuracy()
            .partial_cmp(&a.report.accuracy())
            .unwrap_or(Ordering::Equal)
    });

    BatchSummary {
        benchmark: benchmark.name().to_string(),
        total_questions: benchmark.len(),
        results,
        errors,
    }
}

impl BatchSummary {
    /// Serializable summary document (`summary.json`).
    pub fn to_document(&self) -> Value {
        json!({
            "benchmark": self.benchmark,
            "total_questions": self.total_questions,
            "models_count": self.results.len(),
            "results": self.results.iter().map(|result| {
                json!({
                    "model_name": result.model_name,
                    "total_score": result.report.total_score(),
                    "max_score": result.report.max_score(),
                    "accuracy": result.report.accuracy(),
                    "statistics": result.report.statistics(),
                })
            }).collect::<Vec<_>>(),
            "errors": self.errors.iter().map(|error| {
                json!({"model_name": error.model_name, "error": error.error})
            }).collect::<Vec<_>>(),
        })
    }
}

/// Cross-model comparison: one row per model, overall accuracy plus
/// accuracy broken down by category, level, and type.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub categories: Vec<String>,
    pub levels: Vec<String>,
    pub types: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub model_name: String,
    pub correct_count: usize,
    pub count: usize,
    pub accuracy: f64,
    pub by_category: Vec<Option<f64>>,
    pub by_level: Vec<Option<f64>>,
    pub by_type: Vec<Option<f64>>,
}

/// Build the comparison table from a batch summary.
pub fn build_comparison(summary: &BatchSummary) -> Comparison {
    let mut categories = BTreeSet::new();
    let mut levels = BTreeSet::new();
    let mut types = BTreeSet::new();
    for result in &summary.results {
        let statistics = result.report.statistics();
        categories.extend(statistics.by_category.keys().cloned());
        levels.extend(statistics.by_level.keys().cloned());
        types.extend(statistics.by_type.keys().cloned());
    }
    let categories: Vec<String> = categories.into_iter().collect();
    let levels: Vec<String> = levels.into_iter().collect();
    let types: Vec<String> = types.into_iter().collect();

    let accuracy_of =
        |groups: &std::collections::BTreeMap<String, GroupStats>, key: &str| -> Option<f64> {
            groups.get(key).map(|stats| stats.accuracy)
        };

    let rows = summary
        .results
        .iter()
        .map(|result| {
            let statistics = result.report.statistics();
            ComparisonRow {
                model_name: result.model_name.clone(),
                correct_count: result.report.total_score(),
                count: result.report.max_score(),
                accuracy: result.report.accuracy(),
                by_category: categories
                    .iter()
                    .map(|key| accuracy_of(&statistics.by_category, key))
                    .collect(),
                by_level: levels
                    .iter()
                    .map(|key| accuracy_of(&statistics.by_level, key))
                    .collect(),
                by_type: types
                    .iter()
                    .map(|key| accuracy_of(&statistics.by_type, key))
                    .collect(),
            }
        })
        .collect();

    Comparison {
        categories,
        levels,
        types,
        rows,
    }
}

impl Comparison {
    /// Display headers: model, score, overall, then one column per group.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            "Model".to_string(),
            "Score".to_string(),
            "Accuracy".to_string(),
        ];
        headers.extend(self.categories.iter().map(|c| format!("Cat {c}")));
        headers.extend(self.levels.iter().map(|l| format!("Level {l}")));
        headers.extend(self.types.iter().map(|t| format!("Type {t}")));
        headers
    }

    /// Rows as display strings, aligned with [`Comparison::headers`].
    /// Groups a model never saw render as "-".
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    row.model_name.clone(),
                    format!("{}/{}", row.correct_count, row.count),
                    format_accuracy(Some(row.accuracy)),
                ];
                cells.extend(row.by_category.iter().map(|a| format_accuracy(*a)));
                cells.extend(row.by_level.iter().map(|a| format_accuracy(*a)));
                cells.extend(row.by_type.iter().map(|a| format_accuracy(*a)));
                cells
            })
            .collect()
    }

    /// Render the comparison as a Markdown table.
    pub fn to_markdown(&self) -> String {
        let headers = self.headers();
        let mut md = String::new();
        md.push_str("| ");
        md.push_str(&headers.join(" | "));
        md.push_str(" |\n| ");
        md.push_str(&vec!["---"; headers.len()].join(" | "));
        md.push_str(" |\n");
        for row in self.display_rows() {
            md.push_str("| ");
            md.push_str(&row.join(" | "));
            md.push_str(" |\n");
        }
        md
    }
}

fn format_accuracy(value: Option<f64>) -> String {
    match value {
        Some(accuracy) => format!("{:.2}%", accuracy * 100.0),
        None => "-".to_string(),
    }
}

/// Columns recognized as benchmark metadata rather than model output.
const STANDARD_COLUMNS: [&str; 6] = ["ID", "Question", "Answer", "Category", "Level", "Type"];

pub fn is_standard_column(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    STANDARD_COLUMNS
        .iter()
        .any(|standard| standard.to_lowercase() == lower)
        || lower.contains("token")
}

/// Every non-standard column with at least one letter-bearing cell is one
/// model's prediction column.
pub fn identify_model_columns(table: &Table) -> Vec<String> {
    table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty() && !is_standard_column(name))
        .filter(|(column, _)| {
            table.rows.iter().any(|row| {
                Table::cell(row, *column)
                    .is_some_and(|cell| cell.chars().any(|ch| ch.is_ascii_alphabetic()))
            })
        })
        .map(|(_, name)| name.clone())
        .collect()
}
