//! aquabench-sources — Benchmark and prediction source loaders.
//!
//! Everything that crosses the file boundary lives here: the flat-record
//! tabular codec, the JSON and tabular benchmark loaders, prediction
//! payload loaders, benchmark writers, and the built-in dataset.

pub mod benchmark_json;
pub mod benchmark_table;
pub mod datasets;
pub mod predictions;
pub mod save;
pub mod table;

/// Positional fallback id: `{category}-{index:04}`, 1-based input order.
pub(crate) fn auto_id(category: &str, position: usize) -> String {
    format!("{category}-{:04}", position + 1)
}

/// Map single-letter difficulty codes to their descriptive labels; other
/// labels pass through unchanged (the level set is open).
pub(crate) fn map_level(raw: &str) -> String {
    match raw.trim().to_uppercase().as_str() {
        "A" => "basic conceptual knowledge".to_string(),
        "B" => "engineering applications".to_string(),
        "C" => "reasoning and calculation".to_string(),
        _ => raw.trim().to_string(),
    }
}

/// Leading alphabetic run of an id ("BK-0012" -> "BK"), used as the
/// category fallback when no category field is present.
pub(crate) fn category_from_id(id: &str) -> Option<String> {
    let prefix: String = id.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    if prefix.is_empty() {
        None
    } else {
        Some(prefix)
    }
}
