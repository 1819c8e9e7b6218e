//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn aquabench() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("aquabench").unwrap()
}

#[test]
fn evaluate_builtin_benchmark_with_json_predictions() {
    let dir = TempDir::new().unwrap();
    let predictions = dir.path().join("preds.json");
    std::fs::write(&predictions, r#"{"BK-0001": "B", "HYD-0001": "B"}"#).unwrap();

    aquabench()
        .arg("evaluate")
        .arg("--benchmark")
        .arg("aquabench")
        .arg("--predictions")
        .arg(&predictions)
        .assert()
        .success()
        .stdout(predicate::str::contains("aquabench: 2/12"));
}

#[test]
fn evaluate_show_details_lists_questions() {
    let dir = TempDir::new().unwrap();
    let predictions = dir.path().join("preds.json");
    std::fs::write(&predictions, r#"{"BK-0001": "B"}"#).unwrap();

    aquabench()
        .arg("evaluate")
        .arg("--benchmark")
        .arg("aquabench")
        .arg("--predictions")
        .arg(&predictions)
        .arg("--show-details")
        .assert()
        .success()
        .stdout(predicate::str::contains("+ BK-0001: expected B, predicted B"))
        .stdout(predicate::str::contains("x HYD-0001"));
}

#[test]
fn evaluate_writes_json_report() {
    let dir = TempDir::new().unwrap();
    let predictions = dir.path().join("preds.json");
    std::fs::write(&predictions, r#"{"BK-0001": "B"}"#).unwrap();
    let output = dir.path().join("report.json");

    aquabench()
        .arg("evaluate")
        .arg("--benchmark")
        .arg("aquabench")
        .arg("--predictions")
        .arg(&predictions)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON report saved to"));

    let content = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["total_score"], 1);
    assert_eq!(value["max_score"], 12);
    assert_eq!(value["scores"][0]["example_id"], "BK-0001");
}

#[test]
fn evaluate_rejects_bad_prediction_shape() {
    let dir = TempDir::new().unwrap();
    let predictions = dir.path().join("preds.json");
    std::fs::write(&predictions, r#""just a string""#).unwrap();

    aquabench()
        .arg("evaluate")
        .arg("--benchmark")
        .arg("aquabench")
        .arg("--predictions")
        .arg(&predictions)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn evaluate_requires_a_benchmark_source() {
    let dir = TempDir::new().unwrap();
    let predictions = dir.path().join("preds.json");
    std::fs::write(&predictions, "{}").unwrap();

    aquabench()
        .arg("evaluate")
        .arg("--predictions")
        .arg(&predictions)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--benchmark"));
}

#[test]
fn evaluate_unknown_builtin_fails() {
    let dir = TempDir::new().unwrap();
    let predictions = dir.path().join("preds.json");
    std::fs::write(&predictions, "{}").unwrap();

    aquabench()
        .arg("evaluate")
        .arg("--benchmark")
        .arg("oceanbench")
        .arg("--predictions")
        .arg(&predictions)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown benchmark"));
}

#[test]
fn evaluate_nonexistent_predictions_file_fails() {
    aquabench()
        .arg("evaluate")
        .arg("--benchmark")
        .arg("aquabench")
        .arg("--predictions")
        .arg("no_such_file.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn batch_evaluate_writes_per_model_reports() {
    let dir = TempDir::new().unwrap();
    let predictions = dir.path().join("models.csv");
    std::fs::write(
        &predictions,
        "ID,Question,Answer,model-a,model-b\n\
         BK-0001,q,B,B,A\n\
         HYD-0001,q,B,B,B\n",
    )
    .unwrap();
    let out = dir.path().join("results");

    aquabench()
        .arg("batch-evaluate")
        .arg("--predictions")
        .arg(&predictions)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Evaluated 2 models on 12 questions"));

    assert!(out.join("summary.json").exists());
    assert!(out.join("comparison.csv").exists());
    assert!(out.join("comparison.md").exists());
    assert!(out.join("model-a/score_report.json").exists());
    assert!(out.join("model-b/score_report.csv").exists());

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    // model-a answered both supplied questions correctly, model-b one.
    assert_eq!(summary["results"][0]["model_name"], "model-a");
    assert_eq!(summary["results"][0]["total_score"], 2);
    assert_eq!(summary["results"][1]["model_name"], "model-b");
    assert_eq!(summary["results"][1]["total_score"], 1);
}

#[test]
fn batch_evaluate_without_model_columns_fails() {
    let dir = TempDir::new().unwrap();
    let predictions = dir.path().join("models.csv");
    std::fs::write(&predictions, "ID,Question,Answer\nBK-0001,q,B\n").unwrap();

    aquabench()
        .arg("batch-evaluate")
        .arg("--predictions")
        .arg(&predictions)
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no model columns"));
}

#[test]
fn sample_is_deterministic_for_a_seed() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    for output in [&first, &second] {
        aquabench()
            .arg("sample")
            .arg("--benchmark")
            .arg("aquabench")
            .arg("--per-category")
            .arg("2")
            .arg("--seed")
            .arg("7")
            .arg("--output")
            .arg(output)
            .assert()
            .success()
            .stdout(predicate::str::contains("Sampled benchmark saved to"));
    }

    let a = std::fs::read_to_string(&first).unwrap();
    let b = std::fs::read_to_string(&second).unwrap();
    assert_eq!(a, b);

    // 4 categories x 2 questions each.
    let value: serde_json::Value = serde_json::from_str(&a).unwrap();
    assert_eq!(value["examples"].as_array().unwrap().len(), 8);
}

#[test]
fn sample_rejects_zero_per_category() {
    let dir = TempDir::new().unwrap();
    aquabench()
        .arg("sample")
        .arg("--benchmark")
        .arg("aquabench")
        .arg("--per-category")
        .arg("0")
        .arg("--output")
        .arg(dir.path().join("out.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("per_category"));
}

#[test]
fn help_output() {
    aquabench()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("MCQ benchmark scoring and reporting"));
}

#[test]
fn version_output() {
    aquabench()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("aquabench"));
}
