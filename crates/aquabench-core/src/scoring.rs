//! Exact-match scoring of predictions against a benchmark.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::answer::normalize_answer;
use crate::error::EvalError;
use crate::model::Benchmark;
use crate::report::{Report, Score};
use crate::statistics::compute_statistics;

/// The accepted top-level prediction shapes, tagged at the boundary so the
/// scoring loop never type-checks raw values.
#[derive(Debug, Clone)]
pub enum Predictions {
    /// Mapping from question id to raw answer value.
    ById(BTreeMap<String, Value>),
    /// Positional sequence aligned with benchmark order.
    ByOrder(Vec<Value>),
}

impl Predictions {
    /// No answers at all; every question scores as unanswered.
    pub fn empty() -> Self {
        Predictions::ByOrder(Vec::new())
    }

    /// Classify a raw prediction payload.
    ///
    /// Accepts an object keyed by id, an array in benchmark order, an array
    /// of `{id, answer}` objects (folded into an id-keyed map), or `null`.
    /// Anything else is a structural [`EvalError::Validation`].
    pub fn from_value(value: &Value) -> Result<Self, EvalError> {
        match value {
            Value::Null => Ok(Predictions::empty()),
            Value::Object(map) => Ok(Predictions::ById(
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            )),
            Value::Array(items) => {
                if items.first().is_some_and(Value::is_object) {
                    Self::from_entry_list(items)
                } else {
                    Ok(Predictions::ByOrder(items.clone()))
                }
            }
            other => Err(EvalError::validation(format!(
                "predictions must be a mapping of question id to answer or \
                 a sequence following the benchmark order, got {}",
                json_type(other)
            ))),
        }
    }

    fn from_entry_list(items: &[Value]) -> Result<Self, EvalError> {
        let mut by_id = BTreeMap::new();
        for item in items {
            let Value::Object(entry) = item else {
                return Err(EvalError::validation("prediction list must be uniform"));
            };
            let id = entry
                .get("id")
                .or_else(|| entry.get("ID"))
                .map(entry_id)
                .ok_or_else(|| EvalError::validation("prediction entry missing 'id'"))?;
            let answer = entry
                .get("answer")
                .or_else(|| entry.get("choices"))
                .or_else(|| entry.get("prediction"))
                .cloned()
                .unwrap_or(Value::Null);
            by_id.insert(id, answer);
        }
        Ok(Predictions::ById(by_id))
    }

    fn resolve(&self, id: &str, position: usize) -> Option<&Value> {
        match self {
            Predictions::ById(map) => map.get(id),
            Predictions::ByOrder(items) => items.get(position),
        }
    }
}

fn entry_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Score predictions against a benchmark.
///
/// Pure function of its inputs: scores come out in benchmark order, and a
/// malformed single answer degrades to unanswered instead of failing the
/// whole run.
pub fn score(benchmark: &Arc<Benchmark>, predictions: &Predictions) -> Report {
    let mut scores = Vec::with_capacity(benchmark.len());

    for (position, question) in benchmark.questions().iter().enumerate() {
        let raw = predictions
            .resolve(&question.id, position)
            .unwrap_or(&Value::Null);
        let predicted = match normalize_answer(raw) {
            Ok(letters) => letters,
            Err(err) => {
                tracing::debug!(id = %question.id, %err, "unparseable prediction");
                Vec::new()
            }
        };
        let is_correct = sets_equal(&predicted, &question.expected);
        scores.push(Score {
            example_id: question.id.clone(),
            expected: question.expected.clone(),
            predicted,
            is_correct,
        });
    }

    let statistics = compute_statistics(benchmark, &scores);
    Report::new(Arc::clone(benchmark), scores, statistics)
}

/// Boundary wrapper: classify the raw payload, then score.
pub fn score_value(benchmark: &Arc<Benchmark>, predictions: &Value) -> Result<Report, EvalError> {
    let predictions = Predictions::from_value(predictions)?;
    Ok(score(benchmark, &predictions))
}

/// Order-independent equality of two deduplicated letter sets.
fn sets_equal(a: &[char], b: &[char]) -> bool {
    a.len() == b.len() && a.iter().all(|letter| b.contains(letter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionType, UNSPECIFIED};
    use serde_json::json;

    fn question(id: &str, expected: &[char]) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {id}"),
            expected: expected.to_vec(),
            category: UNSPECIFIED.to_string(),
            level: UNSPECIFIED.to_string(),
            question_type: QuestionType::for_expected(expected),
        }
    }

    fn benchmark() -> Arc<Benchmark> {
        Arc::new(
            Benchmark::new(
                "test",
                None,
                vec![question("Q1", &['C']), question("Q2", &['A', 'B'])],
            )
            .unwrap(),
        )
    }

    #[test]
    fn all_correct_by_id() {
        let bench = benchmark();
        let report = score_value(&bench, &json!({"Q1": "C", "Q2": "A,B"})).unwrap();
        assert_eq!(report.statistics().overall.count, 2);
        assert_eq!(report.statistics().overall.correct_count, 2);
        assert!((report.accuracy() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_match_does_not_count() {
        let bench = benchmark();
        let report = score_value(&bench, &json!({"Q1": "A", "Q2": ["B"]})).unwrap();
        assert!(!report.scores()[0].is_correct);
        assert!(!report.scores()[1].is_correct);
        assert_eq!(report.accuracy(), 0.0);
    }

    #[test]
    fn order_of_predicted_letters_is_ignored() {
        let bench = benchmark();
        let report = score_value(&bench, &json!({"Q2": ["B", "A"]})).unwrap();
        assert!(report.scores()[1].is_correct);
    }

    #[test]
    fn positional_predictions_align_with_benchmark_order() {
        let bench = benchmark();
        let report = score_value(&bench, &json!(["C", "AB"])).unwrap();
        assert!(report.scores().iter().all(|s| s.is_correct));
    }

    #[test]
    fn short_positional_sequence_leaves_tail_unanswered() {
        let bench = benchmark();
        let report = score_value(&bench, &json!(["C"])).unwrap();
        assert!(report.scores()[0].is_correct);
        assert!(report.scores()[1].predicted.is_empty());
        assert!(!report.scores()[1].is_correct);
    }

    #[test]
    fn entry_list_folds_to_id_map() {
        let bench = benchmark();
        let report = score_value(
            &bench,
            &json!([
                {"id": "Q2", "answer": "B,A"},
                {"id": "Q1", "answer": "C"}
            ]),
        )
        .unwrap();
        assert!(report.scores().iter().all(|s| s.is_correct));
    }

    #[test]
    fn entry_without_id_is_structural_error() {
        let result = Predictions::from_value(&json!([{"answer": "A"}]));
        assert!(matches!(result, Err(EvalError::Validation(_))));
    }

    #[test]
    fn unrecognized_top_level_shape_fails_fast() {
        for bad in [json!(42), json!("A"), json!(true)] {
            assert!(matches!(
                Predictions::from_value(&bad),
                Err(EvalError::Validation(_))
            ));
        }
    }

    #[test]
    fn null_payload_scores_everything_unanswered() {
        let bench = benchmark();
        let report = score_value(&bench, &Value::Null).unwrap();
        assert_eq!(report.total_score(), 0);
        assert!(report.scores().iter().all(|s| s.predicted.is_empty()));
    }

    #[test]
    fn malformed_cell_degrades_without_aborting() {
        let bench = benchmark();
        // Q1's value is a mapping (invalid for a single answer); Q2 is fine.
        let report = score_value(&bench, &json!({"Q1": {"answer": "C"}, "Q2": "A,B"})).unwrap();
        assert!(!report.scores()[0].is_correct);
        assert!(report.scores()[0].predicted.is_empty());
        assert!(report.scores()[1].is_correct);
    }

    #[test]
    fn scorer_is_deterministic() {
        let bench = benchmark();
        let payload = json!({"Q1": "C", "Q2": "B"});
        let first = score_value(&bench, &payload).unwrap();
        let second = score_value(&bench, &payload).unwrap();
        let verdicts = |r: &Report| r.scores().iter().map(|s| s.is_correct).collect::<Vec<_>>();
        assert_eq!(verdicts(&first), verdicts(&second));
    }
}
