//! Writing benchmarks back out.
//!
//! Sampled or filtered benchmarks can be saved as JSON (the distribution
//! shape with `target_scores`) or as a flat table.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};

use aquabench_core::answer::join_letters;
use aquabench_core::model::Benchmark;

use crate::table::{write_table, Table};

/// On-disk benchmark formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkFormat {
    Json,
    Csv,
}

impl BenchmarkFormat {
    /// Infer the format from a destination extension; JSON when unknown.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("csv") => BenchmarkFormat::Csv,
            _ => BenchmarkFormat::Json,
        }
    }
}

/// Save a benchmark to `path` in the given (or inferred) format.
pub fn save_benchmark(
    benchmark: &Benchmark,
    path: &Path,
    format: Option<BenchmarkFormat>,
) -> Result<()> {
    let format = format.unwrap_or_else(|| BenchmarkFormat::from_path(path));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    match format {
        BenchmarkFormat::Json => save_json(benchmark, path),
        BenchmarkFormat::Csv => save_csv(benchmark, path),
    }
}

fn save_json(benchmark: &Benchmark, path: &Path) -> Result<()> {
    let examples: Vec<Value> = benchmark
        .questions()
        .iter()
        .map(|question| {
            // All option letters present in the question text, so wrong
            // options keep their zero score in target_scores.
            let mut options = extract_option_letters(&question.text);
            for letter in &question.expected {
                if !options.contains(letter) {
                    options.push(*letter);
                }
            }
            options.sort_unstable();

            let mut target_scores = Map::new();
            for option in options {
                let score = i32::from(question.expected.contains(&option));
                target_scores.insert(option.to_string(), json!(score));
            }

            json!({
                "input": question.text,
                "target_scores": target_scores,
                "ID": question.id,
                "category": question.category,
                "level": question.level,
                "type": question.question_type.to_string(),
            })
        })
        .collect();

    let document = json!({
        "name": benchmark.name(),
        "description": benchmark.description(),
        "examples": examples,
    });

    let content =
        serde_json::to_string_pretty(&document).context("failed to serialize benchmark")?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write benchmark to {}", path.display()))?;
    Ok(())
}

fn save_csv(benchmark: &Benchmark, path: &Path) -> Result<()> {
    let table = Table {
        headers: ["ID", "Question", "Answer", "Category", "Level", "Type"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
        rows: benchmark
            .questions()
            .iter()
            .map(|question| {
                vec![
                    question.id.clone(),
                    question.text.clone(),
                    join_letters(&question.expected),
                    question.category.clone(),
                    question.level.clone(),
                    question.question_type.to_string(),
                ]
            })
            .collect(),
    };
    write_table(path, &table)
}

/// Option letters marked up inline in question text, e.g. "A. gate valve
/// B) globe valve". A letter counts when it is followed by a marker
/// character, optionally after whitespace.
fn extract_option_letters(text: &str) -> Vec<char> {
    const MARKERS: [char; 7] = ['.', ')', ':', '、', '．', '：', '）'];

    let mut letters = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    for (position, &ch) in chars.iter().enumerate() {
        if !ch.is_ascii_uppercase() {
            continue;
        }
        let next = chars[position + 1..].iter().find(|c| !c.is_whitespace());
        if let Some(&marker) = next {
            if MARKERS.contains(&marker) && !letters.contains(&ch) {
                letters.push(ch);
            }
        }
    }
    letters
}
