//! Loading persisted portions into feature/label pairs.
//!
//! Every load applies the same transform: `target` and `user_id` are
//! dropped from the feature matrix, non-finite feature values are replaced
//! with zero and the label column is coerced to integers. Visible, hold-out
//! and full loads never diverge. Nothing is cached; each call re-reads from
//! disk.

use std::path::Path;

use ndarray::{Array1, Array2};
use tracing::info;

use super::error::{DataError, DataResult};
use super::table::{column_index, read_table};
use super::types::Dataset;
use super::{ID_COLUMN, TARGET_COLUMN};
use crate::config::SplitConfig;

/// Load the persisted visible and hold-out portions.
///
/// Returns `(visible, hidden)`. Both artifacts must already exist; run
/// [`ensure_split`](super::splitter::ensure_split) first. A missing
/// artifact is a fatal error.
pub fn load_split(config: &SplitConfig) -> DataResult<(Dataset, Dataset)> {
    let visible = load_table(&config.visible_path())?;
    let hidden = load_table(&config.hidden_path())?;

    if config.verbose {
        let (v0, v1) = visible.label_counts();
        let (h0, h1) = hidden.label_counts();
        info!("visible portion, class 0: {} and 1: {}", v0, v1);
        info!("hold-out portion, class 0: {} and 1: {}", h0, h1);
    }

    Ok((visible, hidden))
}

/// Load the unsplit source table.
///
/// Does not require the split artifacts to exist.
pub fn load_full(config: &SplitConfig) -> DataResult<Dataset> {
    let dataset = load_table(&config.source_path())?;

    if config.verbose {
        let (n0, n1) = dataset.label_counts();
        info!("full table, class 0: {} and 1: {}", n0, n1);
    }

    Ok(dataset)
}

/// Read one table into a [`Dataset`]
fn load_table(path: &Path) -> DataResult<Dataset> {
    let (header, rows) = read_table(path)?;
    let target_idx = column_index(&header, TARGET_COLUMN)?;
    let id_idx = column_index(&header, ID_COLUMN)?;

    let feature_names: Vec<String> = header
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != target_idx && i != id_idx)
        .map(|(_, name)| name.to_string())
        .collect();

    let n_features = feature_names.len();
    let mut features = Vec::with_capacity(rows.len() * n_features);
    let mut labels = Vec::with_capacity(rows.len());

    for (row_no, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if col == id_idx {
                continue;
            }

            let parsed: f64 = value.trim().parse().map_err(|_| DataError::ParseValue {
                column: header.get(col).unwrap_or("").to_string(),
                row: row_no + 2,
                value: value.to_string(),
            })?;

            if col == target_idx {
                labels.push(parsed as i64);
            } else {
                features.push(if parsed.is_finite() { parsed } else { 0.0 });
            }
        }
    }

    let x = Array2::from_shape_vec((rows.len(), n_features), features)
        .expect("uniform row width is enforced by the reader");
    let y = Array1::from_vec(labels);

    Ok(Dataset::new(x, y, feature_names))
}
