//! The `aquabench batch-evaluate` command.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use comfy_table::{Cell, Table as ConsoleTable};

use aquabench_batch::{build_comparison, evaluate_all, identify_model_columns, BatchSummary};
use aquabench_report::csv::write_csv;
use aquabench_sources::predictions::predictions_from_table;
use aquabench_sources::table::{read_table, write_table, Table};

pub fn execute(
    predictions: PathBuf,
    benchmark: String,
    benchmark_path: Option<PathBuf>,
    id_col: Option<String>,
    output_dir: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let benchmark = super::resolve_benchmark(Some(&benchmark), benchmark_path.as_deref())?;

    let table = read_table(&predictions)?;
    let model_columns = identify_model_columns(&table);
    if model_columns.is_empty() {
        bail!(
            "no model columns identified in {}; model columns should contain \
             answer letters (e.g. A, B or A,B)",
            predictions.display()
        );
    }

    // Explicit id column, or the first conventional spelling present.
    let id_idx = match &id_col {
        Some(name) => {
            let Some(idx) = table.column(name) else {
                bail!("column '{name}' not found; available columns: {:?}", table.headers);
            };
            Some(idx)
        }
        None => ["ID", "id", "Id"].iter().find_map(|name| table.column(name)),
    };
    if id_idx.is_none() {
        tracing::warn!("no id column found, matching predictions by row order");
    }

    let columns: Vec<(String, serde_json::Value)> = model_columns
        .iter()
        .map(|name| {
            let answer_idx = table.column(name).expect("identified column exists");
            (
                name.clone(),
                predictions_from_table(&table, id_idx, answer_idx),
            )
        })
        .collect();

    let summary = evaluate_all(&benchmark, &columns);
    let comparison = build_comparison(&summary);

    let output_dir = output_dir.unwrap_or_else(|| {
        predictions
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });
    write_outputs(&summary, &comparison, &output_dir)?;

    if !quiet {
        print_comparison(&comparison);
        for error in &summary.errors {
            eprintln!("{}: column rejected ({})", error.model_name, error.error);
        }
    }
    println!(
        "Evaluated {} models on {} questions; reports in {}",
        summary.results.len(),
        summary.total_questions,
        output_dir.display()
    );

    Ok(())
}

fn write_outputs(
    summary: &BatchSummary,
    comparison: &aquabench_batch::Comparison,
    output_dir: &Path,
) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;

    for result in &summary.results {
        let model_dir = output_dir.join(sanitize(&result.model_name));
        result.report.save_json(&model_dir.join("score_report.json"))?;
        write_csv(&result.report, &model_dir.join("score_report.csv"))?;
    }

    let summary_path = output_dir.join("summary.json");
    std::fs::write(
        &summary_path,
        serde_json::to_string_pretty(&summary.to_document())?,
    )?;

    write_table(
        &output_dir.join("comparison.csv"),
        &Table {
            headers: comparison.headers(),
            rows: comparison.display_rows(),
        },
    )?;
    std::fs::write(output_dir.join("comparison.md"), comparison.to_markdown())?;

    Ok(())
}

fn print_comparison(comparison: &aquabench_batch::Comparison) {
    let mut table = ConsoleTable::new();
    table.set_header(comparison.headers());
    for row in comparison.display_rows() {
        table.add_row(row.into_iter().map(Cell::new));
    }
    eprintln!("\n{table}");
}

/// Model names become directory names; strip path and shell metacharacters.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}
