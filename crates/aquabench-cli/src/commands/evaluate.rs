//! The `aquabench evaluate` command.

use std::path::PathBuf;

use anyhow::Result;

use aquabench_core::answer::join_letters;
use aquabench_core::scoring::score_value;
use aquabench_report::csv::write_csv;
use aquabench_report::markdown::write_markdown;
use aquabench_report::workbook::write_workbook;
use aquabench_report::ReportFormat;
use aquabench_sources::predictions::{load_predictions_json, load_predictions_table};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    benchmark: Option<String>,
    benchmark_path: Option<PathBuf>,
    predictions: PathBuf,
    predictions_id_col: String,
    predictions_answer_col: String,
    output: Option<PathBuf>,
    output_format: String,
    show_details: bool,
) -> Result<()> {
    let benchmark = super::resolve_benchmark(benchmark.as_deref(), benchmark_path.as_deref())?;

    let is_tabular = predictions
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let payload = if is_tabular {
        let id_col = match predictions_id_col.trim() {
            "" => None,
            name => Some(name),
        };
        load_predictions_table(&predictions, id_col, &predictions_answer_col)?
    } else {
        load_predictions_json(&predictions)?
    };

    let report = score_value(&benchmark, &payload)?;
    println!("{}", report.summary());

    if show_details {
        for score in report.scores() {
            let status = if score.is_correct { "+" } else { "x" };
            println!(
                "{status} {}: expected {}, predicted {}",
                score.example_id,
                join_letters(&score.expected),
                join_letters(&score.predicted),
            );
        }
    }

    if let Some(output) = output {
        let format = if output_format == "auto" {
            ReportFormat::from_path(&output)
        } else {
            output_format
                .parse::<ReportFormat>()
                .map_err(|e| anyhow::anyhow!("{e}"))?
        };
        match format {
            ReportFormat::Json => {
                report.save_json(&output)?;
                println!("JSON report saved to: {}", output.display());
            }
            ReportFormat::Csv => {
                write_csv(&report, &output)?;
                println!("CSV report saved to: {}", output.display());
            }
            ReportFormat::Markdown => {
                write_markdown(&report, &output)?;
                println!("Markdown report saved to: {}", output.display());
            }
            ReportFormat::Workbook => {
                write_workbook(&report, &output)?;
                println!("Workbook report saved to: {}", output.display());
            }
        }
    }

    Ok(())
}
