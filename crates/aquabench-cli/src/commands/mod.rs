pub mod batch;
pub mod evaluate;
pub mod sample;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};

use aquabench_core::model::Benchmark;
use aquabench_sources::benchmark_json::load_benchmark_json;
use aquabench_sources::benchmark_table::{load_benchmark_table, BenchmarkColumns};
use aquabench_sources::datasets::load_builtin;

/// Resolve a benchmark from either a bundled name or a file path.
pub(crate) fn resolve_benchmark(
    builtin: Option<&str>,
    path: Option<&Path>,
) -> Result<Arc<Benchmark>> {
    if let Some(path) = path {
        let benchmark = match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("json") => load_benchmark_json(path)?,
            Some("csv") => load_benchmark_table(path, &BenchmarkColumns::default())?,
            other => bail!(
                "unsupported benchmark file format: {:?} (expected .json or .csv)",
                other.unwrap_or("none")
            ),
        };
        return Ok(Arc::new(benchmark));
    }
    if let Some(name) = builtin {
        return load_builtin(name);
    }
    bail!("provide --benchmark or --benchmark-path")
}
