//! The `aquabench sample` command.

use std::path::PathBuf;

use anyhow::Result;

use aquabench_core::sampling::sample_by_category;
use aquabench_sources::save::save_benchmark;

pub fn execute(
    benchmark: Option<String>,
    benchmark_path: Option<PathBuf>,
    per_category: usize,
    seed: u64,
    output: PathBuf,
) -> Result<()> {
    let benchmark = super::resolve_benchmark(benchmark.as_deref(), benchmark_path.as_deref())?;

    let sampled = sample_by_category(&benchmark, per_category, seed)?;
    save_benchmark(&sampled, &output, None)?;

    println!(
        "Sampled benchmark saved to: {} ({} of {} questions)",
        output.display(),
        sampled.len(),
        benchmark.len()
    );

    Ok(())
}
