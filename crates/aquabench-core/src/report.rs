//! Score report types with JSON persistence.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Benchmark;
use crate::statistics::Statistics;

/// The correctness verdict for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    /// Question id this score belongs to.
    pub example_id: String,
    /// Expected option letters, copied from the question.
    pub expected: Vec<char>,
    /// Normalized predicted letters; empty means unanswered.
    pub predicted: Vec<char>,
    /// Exact set equality of predicted vs expected. No partial credit.
    pub is_correct: bool,
}

/// The full output of scoring one prediction set against one benchmark.
///
/// Immutable once produced by the scorer. Serializers in the report crate
/// read its fields; nothing mutates it.
#[derive(Debug, Clone)]
pub struct Report {
    id: Uuid,
    created_at: DateTime<Utc>,
    benchmark: Arc<Benchmark>,
    scores: Vec<Score>,
    statistics: Statistics,
}

impl Report {
    pub(crate) fn new(benchmark: Arc<Benchmark>, scores: Vec<Score>, statistics: Statistics) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            benchmark,
            scores,
            statistics,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The benchmark this report was scored against.
    pub fn benchmark(&self) -> &Arc<Benchmark> {
        &self.benchmark
    }

    /// Scores in benchmark order.
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn max_score(&self) -> usize {
        self.scores.len()
    }

    pub fn total_score(&self) -> usize {
        self.scores.iter().filter(|s| s.is_correct).count()
    }

    pub fn accuracy(&self) -> f64 {
        self.statistics.overall.accuracy
    }

    /// One-line console summary, e.g. `aquabench: 7/10 (70.00% accuracy)`.
    pub fn summary(&self) -> String {
        format!(
            "{}: {}/{} ({:.2}% accuracy)",
            self.benchmark.name(),
            self.total_score(),
            self.max_score(),
            self.accuracy() * 100.0
        )
    }

    /// The flat, serializable form of this report.
    pub fn to_document(&self) -> ReportDocument {
        ReportDocument {
            id: self.id(),
            created_at: self.created_at(),
            benchmark: self.benchmark.name().to_string(),
            total_score: self.total_score(),
            max_score: self.max_score(),
            accuracy: self.accuracy(),
            scores: self.scores.clone(),
            statistics: self.statistics.clone(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_document()).context("failed to serialize report")
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

/// Serialized report shape: `scores` plus nested `statistics` per axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub benchmark: String,
    pub total_score: usize,
    pub max_score: usize,
    pub accuracy: f64,
    pub scores: Vec<Score>,
    pub statistics: Statistics,
}
