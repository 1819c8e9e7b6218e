//! Aggregate accuracy statistics.
//!
//! One pass over the scores produces counts and accuracy overall and
//! grouped by category, level, and question type. BTreeMap keeps group
//! order stable for serialization and the tabular exports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Benchmark;
use crate::report::Score;

/// Counts and accuracy for one group of scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupStats {
    pub count: usize,
    pub correct_count: usize,
    pub accuracy: f64,
}

impl GroupStats {
    fn record(&mut self, is_correct: bool) {
        self.count += 1;
        if is_correct {
            self.correct_count += 1;
        }
    }

    fn finalize(&mut self) {
        self.accuracy = if self.count == 0 {
            0.0
        } else {
            self.correct_count as f64 / self.count as f64
        };
    }
}

/// Accuracy statistics along the four grouping axes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub overall: GroupStats,
    pub by_category: BTreeMap<String, GroupStats>,
    pub by_level: BTreeMap<String, GroupStats>,
    pub by_type: BTreeMap<String, GroupStats>,
}

/// Compute statistics for a set of scores produced from `benchmark`.
pub fn compute_statistics(benchmark: &Benchmark, scores: &[Score]) -> Statistics {
    let mut stats = Statistics::default();

    for score in scores {
        stats.overall.record(score.is_correct);

        let Ok(question) = benchmark.get(&score.example_id) else {
            continue;
        };
        stats
            .by_category
            .entry(question.category.clone())
            .or_default()
            .record(score.is_correct);
        stats
            .by_level
            .entry(question.level.clone())
            .or_default()
            .record(score.is_correct);
        stats
            .by_type
            .entry(question.question_type.to_string())
            .or_default()
            .record(score.is_correct);
    }

    stats.overall.finalize();
    for group in stats
        .by_category
        .values_mut()
        .chain(stats.by_level.values_mut())
        .chain(stats.by_type.values_mut())
    {
        group.finalize();
    }

    stats
}
