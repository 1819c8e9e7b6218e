//! Core data model types for aquabench.
//!
//! These are the fundamental types the entire system uses to represent
//! benchmark questions and the benchmark itself.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Sentinel used for category and level when the source omits them.
pub const UNSPECIFIED: &str = "UNSPECIFIED";

/// Whether a question has exactly one correct option or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Single,
    Multiple,
}

impl QuestionType {
    /// Derive the type from the expected option set.
    pub fn for_expected(expected: &[char]) -> Self {
        if expected.len() == 1 {
            QuestionType::Single
        } else {
            QuestionType::Multiple
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Single => write!(f, "single"),
            QuestionType::Multiple => write!(f, "multiple"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" | "single choice" | "single-choice" => Ok(QuestionType::Single),
            "multiple" | "multiple choice" | "multiple-choice" => Ok(QuestionType::Multiple),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A single benchmark question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within a benchmark (e.g. "BK-0001").
    pub id: String,
    /// Question content; may embed the answer options inline.
    pub text: String,
    /// Correct option letters: uppercase, deduplicated, ordered by first
    /// appearance in the source. Never empty.
    pub expected: Vec<char>,
    /// Category code (e.g. "BK"), `UNSPECIFIED` when absent.
    pub category: String,
    /// Difficulty label, `UNSPECIFIED` when absent.
    pub level: String,
    /// Single or multiple choice.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

impl Question {
    /// Returns `true` if the question expects more than one option.
    pub fn is_multiple_choice(&self) -> bool {
        self.expected.len() > 1
    }
}

/// An immutable, ordered collection of questions keyed by id.
#[derive(Debug, Clone)]
pub struct Benchmark {
    name: String,
    description: Option<String>,
    questions: Vec<Question>,
    index: HashMap<String, usize>,
}

impl Benchmark {
    /// Build a benchmark, validating that it is non-empty, that every
    /// question has a non-empty expected answer, and that ids are unique.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        questions: Vec<Question>,
    ) -> Result<Self, EvalError> {
        let name = name.into();
        if questions.is_empty() {
            return Err(EvalError::validation(
                "benchmark must contain at least one question",
            ));
        }

        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if question.expected.is_empty() {
                return Err(EvalError::validation(format!(
                    "question '{}' has an empty expected answer",
                    question.id
                )));
            }
            if index.insert(question.id.clone(), position).is_some() {
                return Err(EvalError::validation(format!(
                    "duplicate question id: {}",
                    question.id
                )));
            }
        }

        Ok(Self {
            name,
            description,
            questions,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Questions in source order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id.
    pub fn get(&self, id: &str) -> Result<&Question, EvalError> {
        self.index
            .get(id)
            .map(|&position| &self.questions[position])
            .ok_or_else(|| EvalError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }
}
