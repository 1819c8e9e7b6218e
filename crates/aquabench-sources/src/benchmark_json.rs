//! Benchmark construction from JSON sources.
//!
//! Three top-level shapes are accepted: an object with an `examples`
//! array (the distribution format), a bare array of question objects, and
//! an object keyed by question id.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use aquabench_core::answer::normalize_answer;
use aquabench_core::model::{Benchmark, Question, QuestionType, UNSPECIFIED};

use crate::{auto_id, category_from_id, map_level};

/// Load a benchmark from a JSON file.
pub fn load_benchmark_json(path: &Path) -> Result<Benchmark> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read benchmark file: {}", path.display()))?;
    let default_name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("benchmark");
    benchmark_from_str(&content, default_name)
        .with_context(|| format!("failed to parse benchmark: {}", path.display()))
}

/// Parse a benchmark from a JSON string (useful for testing and for the
/// embedded built-in dataset).
pub fn benchmark_from_str(content: &str, default_name: &str) -> Result<Benchmark> {
    let value: Value = serde_json::from_str(content).context("invalid JSON")?;
    benchmark_from_value(&value, default_name)
}

/// Construct a benchmark from already-parsed JSON.
pub fn benchmark_from_value(value: &Value, default_name: &str) -> Result<Benchmark> {
    match value {
        Value::Object(map) if map.contains_key("examples") => {
            let name = map
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(default_name);
            let description = map
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string);
            let Some(Value::Array(items)) = map.get("examples") else {
                bail!("'examples' must be an array");
            };
            let questions = parse_questions(items.iter().map(|item| (None, item)))?;
            Ok(Benchmark::new(name, description, questions)?)
        }
        Value::Array(items) => {
            let questions = parse_questions(items.iter().map(|item| (None, item)))?;
            Ok(Benchmark::new(default_name, None, questions)?)
        }
        Value::Object(map) => {
            let questions =
                parse_questions(map.iter().map(|(id, item)| (Some(id.as_str()), item)))?;
            Ok(Benchmark::new(default_name, None, questions)?)
        }
        _ => bail!("benchmark JSON must be an object or an array of questions"),
    }
}

fn parse_questions<'a>(
    items: impl Iterator<Item = (Option<&'a str>, &'a Value)>,
) -> Result<Vec<Question>> {
    items
        .enumerate()
        .map(|(position, (key_id, item))| parse_question(item, key_id, position))
        .collect()
}

fn parse_question(item: &Value, key_id: Option<&str>, position: usize) -> Result<Question> {
    let Value::Object(fields) = item else {
        bail!("each example must be an object");
    };

    let text = fields
        .get("input")
        .or_else(|| fields.get("question"))
        .or_else(|| fields.get("text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let expected = if let Some(Value::Object(target_scores)) = fields.get("target_scores") {
        // Letters with a target score of 1 are the correct options.
        let mut letters: Vec<char> = target_scores
            .iter()
            .filter(|(_, score)| score.as_i64() == Some(1) || score.as_f64() == Some(1.0))
            .filter_map(|(key, _)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if ch.is_ascii_alphabetic() => {
                        Some(ch.to_ascii_uppercase())
                    }
                    _ => None,
                }
            })
            .collect();
        letters.sort_unstable();
        letters.dedup();
        letters
    } else if let Some(raw) = fields.get("answer").or_else(|| fields.get("expected")) {
        normalize_answer(raw)?
    } else {
        bail!("example {} missing 'target_scores' or 'answer'", position + 1);
    };

    let explicit_id = key_id
        .map(str::to_string)
        .or_else(|| {
            fields
                .get("id")
                .or_else(|| fields.get("ID"))
                .map(field_as_string)
        })
        .filter(|id| !id.is_empty());

    let category = fields
        .get("category")
        .and_then(Value::as_str)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .or_else(|| explicit_id.as_deref().and_then(category_from_id))
        .unwrap_or_else(|| UNSPECIFIED.to_string());

    let id = explicit_id.unwrap_or_else(|| auto_id(&category, position));

    let level = fields
        .get("level")
        .and_then(Value::as_str)
        .map(map_level)
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| UNSPECIFIED.to_string());

    let question_type = fields
        .get("type")
        .and_then(Value::as_str)
        .and_then(|t| t.parse::<QuestionType>().ok())
        .unwrap_or_else(|| QuestionType::for_expected(&expected));

    Ok(Question {
        id,
        text,
        expected,
        category,
        level,
        question_type,
    })
}

fn field_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISTRIBUTION_JSON: &str = r#"{
        "name": "aqua-mini",
        "description": "Tiny fixture",
        "examples": [
            {
                "input": "Which valve? A. gate B. butterfly",
                "target_scores": {"A": 1, "B": 0},
                "ID": "BK-0001",
                "level": "A",
                "type": "single choice"
            },
            {
                "input": "Pick two. A. x B. y C. z",
                "answer": "B,C",
                "category": "HYD"
            }
        ]
    }"#;

    #[test]
    fn distribution_shape_parses() {
        let bench = benchmark_from_str(DISTRIBUTION_JSON, "fallback").unwrap();
        assert_eq!(bench.name(), "aqua-mini");
        assert_eq!(bench.len(), 2);

        let first = bench.get("BK-0001").unwrap();
        assert_eq!(first.expected, vec!['A']);
        assert_eq!(first.category, "BK");
        assert_eq!(first.level, "basic conceptual knowledge");
        assert_eq!(first.question_type, QuestionType::Single);

        // Second example has no id: auto-generated from category + position.
        let second = bench.get("HYD-0002").unwrap();
        assert_eq!(second.expected, vec!['B', 'C']);
        assert_eq!(second.question_type, QuestionType::Multiple);
    }

    #[test]
    fn bare_array_shape_parses() {
        let bench = benchmark_from_str(
            r#"[{"question": "Q?", "answer": "D", "id": "X-1"}]"#,
            "arrayed",
        )
        .unwrap();
        assert_eq!(bench.name(), "arrayed");
        assert_eq!(bench.get("X-1").unwrap().expected, vec!['D']);
    }

    #[test]
    fn object_keyed_by_id_parses() {
        let bench = benchmark_from_str(
            r#"{
                "Q1": {"text": "First?", "answer": "A"},
                "Q2": {"text": "Second?", "answer": "AB"}
            }"#,
            "keyed",
        )
        .unwrap();
        assert_eq!(bench.len(), 2);
        assert_eq!(bench.get("Q2").unwrap().expected, vec!['A', 'B']);
    }

    #[test]
    fn missing_answer_is_an_error() {
        let result = benchmark_from_str(r#"[{"question": "No key"}]"#, "bad");
        assert!(result.is_err());
    }

    #[test]
    fn empty_answer_is_an_error() {
        let result = benchmark_from_str(r#"[{"question": "Q", "answer": ""}]"#, "bad");
        assert!(result.is_err());
    }

    #[test]
    fn non_object_top_level_is_an_error() {
        assert!(benchmark_from_str("42", "bad").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        std::fs::write(&path, DISTRIBUTION_JSON).unwrap();
        let bench = load_benchmark_json(&path).unwrap();
        assert_eq!(bench.len(), 2);
    }
}
