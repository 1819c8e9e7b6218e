//! Deterministic category-stratified sampling.
//!
//! Draws the same number of questions from each category without
//! replacement, driven by a fixed seed. The source benchmark is never
//! mutated; the sample is a fresh, independent benchmark.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::EvalError;
use crate::model::Benchmark;

/// Sample up to `per_category` questions from every category.
///
/// A category with fewer questions than `per_category` contributes
/// everything it has. Selection is randomized by `seed`; emission order is
/// stable: selected questions keep their relative source order.
pub fn sample_by_category(
    benchmark: &Benchmark,
    per_category: usize,
    seed: u64,
) -> Result<Benchmark, EvalError> {
    if per_category == 0 {
        return Err(EvalError::validation(
            "per_category must be a positive integer",
        ));
    }

    let mut grouped: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (position, question) in benchmark.questions().iter().enumerate() {
        grouped
            .entry(question.category.as_str())
            .or_default()
            .push(position);
    }

    // Categories are visited in sorted order so the rng stream, and with
    // it the selection, is reproducible for a given seed.
    let mut rng = StdRng::seed_from_u64(seed);
    let mut selected = Vec::new();
    for pool in grouped.values() {
        let take = per_category.min(pool.len());
        selected.extend(pool.choose_multiple(&mut rng, take).copied());
    }
    selected.sort_unstable();

    let questions = selected
        .into_iter()
        .map(|position| benchmark.questions()[position].clone())
        .collect();

    Benchmark::new(
        format!("{}_sampled", benchmark.name()),
        Some(format!(
            "{} (sampled {per_category} per category)",
            benchmark
                .description()
                .unwrap_or_else(|| benchmark.name())
        )),
        questions,
    )
}
