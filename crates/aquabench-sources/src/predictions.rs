//! Prediction payload loading.
//!
//! JSON payloads are returned raw; the scorer's boundary check classifies
//! their shape. Tabular payloads are turned into the equivalent JSON shape
//! here: an id-keyed object when an id column is available, a positional
//! array otherwise.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};

use crate::table::{read_table, Table};

/// Default id column for tabular predictions.
pub const DEFAULT_ID_COLUMN: &str = "ID";
/// Default answer column for tabular predictions.
pub const DEFAULT_ANSWER_COLUMN: &str = "Answer";

/// Load a raw prediction payload from a JSON file.
pub fn load_predictions_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read predictions file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("cannot parse prediction file {}", path.display()))
}

/// Load a prediction payload from a tabular file.
///
/// With an id column the payload is keyed by question id; without one it
/// is a positional sequence in row order. An id column that is simply
/// absent from the file downgrades to positional matching with a warning.
pub fn load_predictions_table(
    path: &Path,
    id_col: Option<&str>,
    answer_col: &str,
) -> Result<Value> {
    let table = read_table(path)?;
    let answer = table.column(answer_col).ok_or_else(|| {
        anyhow!(
            "column '{}' not found; available columns: {:?}",
            answer_col,
            table.headers
        )
    })?;

    let id = match id_col {
        Some(name) => {
            let found = table.column(name);
            if found.is_none() {
                tracing::warn!(
                    column = name,
                    "id column not found, matching predictions by row order"
                );
            }
            found
        }
        None => None,
    };

    Ok(predictions_from_table(&table, id, answer))
}

/// Build a prediction payload from already-read records.
pub fn predictions_from_table(table: &Table, id_col: Option<usize>, answer_col: usize) -> Value {
    match id_col {
        Some(id_col) => {
            let mut map = Map::new();
            for row in &table.rows {
                let Some(id) = Table::cell(row, id_col) else {
                    continue;
                };
                let Some(answer) = Table::cell(row, answer_col) else {
                    continue;
                };
                map.insert(id.to_string(), Value::String(answer.to_string()));
            }
            Value::Object(map)
        }
        None => Value::Array(
            table
                .rows
                .iter()
                .map(|row| match Table::cell(row, answer_col) {
                    Some(answer) => Value::String(answer.to_string()),
                    None => Value::Null,
                })
                .collect(),
        ),
    }
}
