//! Markdown report export.
//!
//! A single table mirroring the CSV column set, plus a trailing accuracy
//! line.

use std::path::Path;

use anyhow::{Context, Result};

use aquabench_core::report::Report;

use crate::{detail_rows, percent, DETAIL_HEADERS};

/// Render the report as a Markdown document.
pub fn generate_markdown(report: &Report) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.benchmark().name()));
    md.push_str(&format!(
        "**Total Score**: {}/{} ({})\n\n",
        report.total_score(),
        report.max_score(),
        percent(report.accuracy())
    ));

    md.push_str("| ");
    md.push_str(&DETAIL_HEADERS.join(" | "));
    md.push_str(" |\n");
    md.push_str("| ");
    md.push_str(&vec!["---"; DETAIL_HEADERS.len()].join(" | "));
    md.push_str(" |\n");

    for row in detail_rows(report) {
        let cells: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
        md.push_str("| ");
        md.push_str(&cells.join(" | "));
        md.push_str(" |\n");
    }

    md.push_str(&format!(
        "\n**Accuracy**: {} ({}/{})\n",
        percent(report.accuracy()),
        report.total_score(),
        report.max_score()
    ));

    md
}

/// Write the Markdown report to a file.
pub fn write_markdown(report: &Report, path: &Path) -> Result<()> {
    let content = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write markdown report to {}", path.display()))?;
    Ok(())
}

/// Pipes and newlines would break the table layout.
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquabench_core::model::{Benchmark, Question, QuestionType};
    use aquabench_core::scoring::score_value;
    use serde_json::json;
    use std::sync::Arc;

    fn report() -> Report {
        let bench = Arc::new(
            Benchmark::new(
                "aqua",
                None,
                vec![Question {
                    id: "Q1".into(),
                    text: "Laminar | turbulent?".into(),
                    expected: vec!['B'],
                    category: "HYD".into(),
                    level: "engineering applications".into(),
                    question_type: QuestionType::Single,
                }],
            )
            .unwrap(),
        );
        score_value(&bench, &json!({"Q1": "B"})).unwrap()
    }

    #[test]
    fn table_shape_and_trailer() {
        let md = generate_markdown(&report());
        assert!(md.starts_with("# aqua\n"));
        assert!(md.contains(
            "| ID | Question | Category | Level | Type | Expected | Predicted | Correct |"
        ));
        assert!(md.contains("| Q1 | Laminar \\| turbulent? | HYD |"));
        assert!(md.ends_with("**Accuracy**: 100.00% (1/1)\n"));
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        write_markdown(&report(), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("# aqua"));
    }
}
