//! Benchmark construction from tabular sources.
//!
//! Recognized columns are `ID, Question, Answer, Category, Level, Type`;
//! `Question` and `Answer` are required, the rest default. Rows without a
//! usable answer are skipped with a warning rather than failing the load.

use std::path::Path;

use anyhow::{anyhow, bail, Result};

use aquabench_core::answer::normalize_text;
use aquabench_core::model::{Benchmark, Question, QuestionType, UNSPECIFIED};

use crate::table::{read_table, Table};
use crate::{auto_id, category_from_id, map_level};

/// Column names for tabular benchmark sources.
#[derive(Debug, Clone)]
pub struct BenchmarkColumns {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub level: String,
    pub question_type: String,
}

impl Default for BenchmarkColumns {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            question: "Question".to_string(),
            answer: "Answer".to_string(),
            category: "Category".to_string(),
            level: "Level".to_string(),
            question_type: "Type".to_string(),
        }
    }
}

/// Load a benchmark from a tabular file.
pub fn load_benchmark_table(path: &Path, columns: &BenchmarkColumns) -> Result<Benchmark> {
    let table = read_table(path)?;
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("benchmark")
        .to_string();
    let description = path
        .file_name()
        .and_then(|file| file.to_str())
        .map(|file| format!("Loaded from {file}"));

    let benchmark = benchmark_from_table(&table, columns, &name, description)?;
    if benchmark.is_empty() {
        bail!("no valid questions found in {}", path.display());
    }
    Ok(benchmark)
}

/// Construct a benchmark from already-read records.
pub fn benchmark_from_table(
    table: &Table,
    columns: &BenchmarkColumns,
    name: &str,
    description: Option<String>,
) -> Result<Benchmark> {
    let require = |column: &str| {
        table.column(column).ok_or_else(|| {
            anyhow!(
                "column '{}' not found; available columns: {:?}",
                column,
                table.headers
            )
        })
    };
    let answer_col = require(&columns.answer)?;
    let question_col = require(&columns.question)?;
    let id_col = table.column(&columns.id);
    let category_col = table.column(&columns.category);
    let level_col = table.column(&columns.level);
    let type_col = table.column(&columns.question_type);

    let mut questions = Vec::new();
    for (position, row) in table.rows.iter().enumerate() {
        let Some(answer) = Table::cell(row, answer_col) else {
            tracing::warn!(row = position + 2, "skipping row without an answer");
            continue;
        };
        let expected = normalize_text(answer);
        if expected.is_empty() {
            tracing::warn!(row = position + 2, answer, "skipping row with no option letters");
            continue;
        }

        let text = Table::cell(row, question_col).unwrap_or_default().to_string();

        let explicit_id = id_col
            .and_then(|col| Table::cell(row, col))
            .map(str::to_string);

        let category = category_col
            .and_then(|col| Table::cell(row, col))
            .map(str::to_string)
            .or_else(|| explicit_id.as_deref().and_then(category_from_id))
            .unwrap_or_else(|| UNSPECIFIED.to_string());

        let id = explicit_id.unwrap_or_else(|| auto_id(&category, position));

        let level = level_col
            .and_then(|col| Table::cell(row, col))
            .map(map_level)
            .unwrap_or_else(|| UNSPECIFIED.to_string());

        let question_type = type_col
            .and_then(|col| Table::cell(row, col))
            .and_then(|label| label.parse::<QuestionType>().ok())
            .unwrap_or_else(|| QuestionType::for_expected(&expected));

        questions.push(Question {
            id,
            text,
            expected,
            category,
            level,
            question_type,
        });
    }

    if questions.is_empty() {
        bail!("no valid questions in tabular source");
    }
    Ok(Benchmark::new(name, description, questions)?)
}
