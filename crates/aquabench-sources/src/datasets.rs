//! Built-in benchmark datasets.
//!
//! The bundled sample ships inside the binary and is parsed once per
//! process into an immutable, shared benchmark. Nothing ever mutates a
//! loaded benchmark, so a process-wide cache is safe.

use std::sync::{Arc, OnceLock};

use anyhow::{bail, Result};

use aquabench_core::model::Benchmark;

use crate::benchmark_json::benchmark_from_str;

const AQUABENCH_JSON: &str = include_str!("data/aquabench.json");

/// Names accepted by [`load_builtin`].
pub const BUILTIN_BENCHMARKS: &[&str] = &["aquabench"];

/// Load a built-in benchmark by name.
pub fn load_builtin(name: &str) -> Result<Arc<Benchmark>> {
    match name {
        "aquabench" => {
            static AQUABENCH: OnceLock<Arc<Benchmark>> = OnceLock::new();
            Ok(Arc::clone(AQUABENCH.get_or_init(|| {
                Arc::new(
                    benchmark_from_str(AQUABENCH_JSON, "aquabench")
                        .expect("bundled benchmark data is valid"),
                )
            })))
        }
        other => bail!(
            "unknown benchmark '{other}'; valid options: {:?}",
            BUILTIN_BENCHMARKS
        ),
    }
}
