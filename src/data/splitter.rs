//! One-time stratified split of a source table into visible and hold-out
//! portions.
//!
//! The split runs at most once per dataset: once both artifact files exist
//! they are reused as-is, so the hold-out rows stay unseen across repeated
//! experiment runs and every model variant is scored against the same test
//! set. There is no cross-process locking on the artifacts; two processes
//! calling [`ensure_split`] against a fresh directory at the same time can
//! both perform the split. Run it once before spawning experiment workers.

use std::collections::BTreeMap;

use csv::StringRecord;
use rand::seq::SliceRandom;
use rand::thread_rng;
use tracing::{debug, info};

use super::error::{DataError, DataResult};
use super::table::{column_index, read_table, write_table};
use super::TARGET_COLUMN;
use crate::config::SplitConfig;

/// Result of an [`ensure_split`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutcome {
    /// Both artifacts already existed; nothing was written
    Reused,
    /// The source table was read, split and persisted
    Created,
}

/// Ensure the visible and hold-out artifacts exist.
///
/// If either artifact is missing, the source table is read, stratified-split
/// on the `target` column and both portions are written tab-delimited with
/// the source schema. If both artifacts exist this is a no-op.
pub fn ensure_split(config: &SplitConfig) -> DataResult<SplitOutcome> {
    let visible_path = config.visible_path();
    let hidden_path = config.hidden_path();

    if visible_path.is_file() && hidden_path.is_file() {
        debug!("split artifacts already present, reusing");
        return Ok(SplitOutcome::Reused);
    }

    if !(config.test_size > 0.0 && config.test_size < 1.0) {
        return Err(DataError::InvalidTestSize(config.test_size));
    }

    let source_path = config.source_path();
    let (header, rows) = read_table(&source_path)?;
    if rows.is_empty() {
        return Err(DataError::EmptyTable(source_path));
    }

    let target_idx = column_index(&header, TARGET_COLUMN)?;
    let (visible, hidden) =
        stratified_indices(&rows, target_idx, config.test_size, config.shuffle)?;

    if config.verbose {
        info!(
            "split {:?}: {} rows visible, {} rows hold-out",
            source_path,
            visible.len(),
            hidden.len()
        );
    }

    write_table(&visible_path, &header, &rows, &visible)?;
    write_table(&hidden_path, &header, &rows, &hidden)?;

    Ok(SplitOutcome::Created)
}

/// Partition row indices into (visible, hidden) preserving class balance.
///
/// Rows are grouped by the integer value of the `target` column. Each class
/// of size `n` contributes `round(n * test_size)` rows to the hidden
/// portion, clamped to `1..=n-1` so both portions keep at least one row of
/// every class. With `shuffle` the per-class membership is randomized;
/// without it the last rows of each class in table order go hidden.
fn stratified_indices(
    rows: &[StringRecord],
    target_idx: usize,
    test_size: f64,
    shuffle: bool,
) -> DataResult<(Vec<usize>, Vec<usize>)> {
    let mut classes: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, row) in rows.iter().enumerate() {
        let class = parse_target(row, target_idx, i)?;
        classes.entry(class).or_default().push(i);
    }

    let mut visible = Vec::new();
    let mut hidden = Vec::new();
    let mut rng = thread_rng();

    for (class, mut indices) in classes {
        let n = indices.len();
        if n < 2 {
            return Err(DataError::ClassTooSmall { class, count: n });
        }

        if shuffle {
            indices.shuffle(&mut rng);
        }

        let n_hidden = ((n as f64 * test_size).round() as usize).clamp(1, n - 1);
        let split_at = n - n_hidden;
        visible.extend_from_slice(&indices[..split_at]);
        hidden.extend_from_slice(&indices[split_at..]);
    }

    // Artifacts keep the source table's row order.
    visible.sort_unstable();
    hidden.sort_unstable();

    Ok((visible, hidden))
}

/// Integer class value of a row's `target` field
fn parse_target(row: &StringRecord, target_idx: usize, row_no: usize) -> DataResult<i64> {
    let value = row.get(target_idx).unwrap_or("");
    let parsed: f64 = value.trim().parse().map_err(|_| DataError::ParseValue {
        column: TARGET_COLUMN.to_string(),
        row: row_no + 2,
        value: value.to_string(),
    })?;
    Ok(parsed as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SplitConfig;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    /// Write a source table with `n_zero` rows of class 0 and `n_one` of
    /// class 1.
    fn write_source(path: &Path, n_zero: usize, n_one: usize) {
        let mut lines = vec!["user_id\ttarget\tf1\tf2".to_string()];
        for i in 0..n_zero {
            lines.push(format!("u{}\t0\t{}.5\t-1.0", i, i));
        }
        for i in 0..n_one {
            lines.push(format!("v{}\t1\t{}.25\t2.0", i, i));
        }
        fs::write(path, lines.join("\n") + "\n").unwrap();
    }

    fn config_for(dir: &Path) -> SplitConfig {
        SplitConfig::new(dir)
    }

    fn target_counts(path: &Path) -> (usize, usize) {
        let (header, rows) = read_table(path).unwrap();
        let target_idx = column_index(&header, TARGET_COLUMN).unwrap();
        let ones = rows.iter().filter(|r| &r[target_idx] == "1").count();
        (rows.len() - ones, ones)
    }

    fn user_ids(path: &Path) -> Vec<String> {
        let (_, rows) = read_table(path).unwrap();
        rows.iter().map(|r| r[0].to_string()).collect()
    }

    #[test]
    fn test_split_counts_are_stratified() {
        let dir = tempdir().unwrap();
        write_source(&dir.path().join("dataset.csv"), 70, 30);
        let config = config_for(dir.path());

        assert_eq!(ensure_split(&config).unwrap(), SplitOutcome::Created);

        // 100 rows at test_size 0.2: 20 hidden (14 class 0, 6 class 1).
        assert_eq!(target_counts(&config.hidden_path()), (14, 6));
        assert_eq!(target_counts(&config.visible_path()), (56, 24));
    }

    #[test]
    fn test_partition_is_complete() {
        let dir = tempdir().unwrap();
        write_source(&dir.path().join("dataset.csv"), 30, 20);
        let config = config_for(dir.path());
        ensure_split(&config).unwrap();

        let mut combined = user_ids(&config.visible_path());
        let hidden = user_ids(&config.hidden_path());
        assert_eq!(combined.len(), 40);
        assert_eq!(hidden.len(), 10);

        // Every source row lands in exactly one portion.
        combined.extend(hidden);
        combined.sort();
        let mut expected = user_ids(&config.source_path());
        expected.sort();
        assert_eq!(combined, expected);
    }

    #[test]
    fn test_second_call_reuses_artifacts() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("dataset.csv");
        write_source(&source, 20, 10);
        let config = config_for(dir.path());

        assert_eq!(ensure_split(&config).unwrap(), SplitOutcome::Created);
        let visible_before = fs::read(config.visible_path()).unwrap();
        let hidden_before = fs::read(config.hidden_path()).unwrap();

        // Even after the source changes, existing artifacts are untouched.
        write_source(&source, 5, 5);
        assert_eq!(ensure_split(&config).unwrap(), SplitOutcome::Reused);

        assert_eq!(fs::read(config.visible_path()).unwrap(), visible_before);
        assert_eq!(fs::read(config.hidden_path()).unwrap(), hidden_before);
    }

    #[test]
    fn test_missing_artifact_triggers_resplit() {
        let dir = tempdir().unwrap();
        write_source(&dir.path().join("dataset.csv"), 20, 10);
        let config = config_for(dir.path());

        ensure_split(&config).unwrap();
        fs::remove_file(config.hidden_path()).unwrap();

        assert_eq!(ensure_split(&config).unwrap(), SplitOutcome::Created);
        assert!(config.hidden_path().is_file());
    }

    #[test]
    fn test_unshuffled_split_is_deterministic() {
        let dir = tempdir().unwrap();
        write_source(&dir.path().join("dataset.csv"), 10, 10);
        let mut config = config_for(dir.path());
        config.shuffle = false;

        ensure_split(&config).unwrap();

        // Without shuffling the last 20% of each class goes hidden.
        assert_eq!(
            user_ids(&config.hidden_path()),
            vec!["u8", "u9", "v8", "v9"]
        );
    }

    #[test]
    fn test_singleton_class_is_rejected() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("dataset.csv");
        let mut lines = vec!["user_id\ttarget\tf1\tf2".to_string()];
        for i in 0..10 {
            lines.push(format!("u{}\t0\t{}.0\t1.0", i, i));
        }
        lines.push("w0\t1\t0.0\t1.0".to_string());
        fs::write(&source, lines.join("\n") + "\n").unwrap();

        let config = config_for(dir.path());
        let err = ensure_split(&config).unwrap_err();
        assert!(matches!(
            err,
            DataError::ClassTooSmall { class: 1, count: 1 }
        ));
        assert!(!config.visible_path().exists());
    }

    #[test]
    fn test_invalid_test_size_is_rejected() {
        let dir = tempdir().unwrap();
        write_source(&dir.path().join("dataset.csv"), 10, 10);
        let mut config = config_for(dir.path());
        config.test_size = 0.0;

        assert!(matches!(
            ensure_split(&config),
            Err(DataError::InvalidTestSize(_))
        ));
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path());

        assert!(matches!(ensure_split(&config), Err(DataError::Io(_))));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("dataset.csv"), "user_id\ttarget\tf1\tf2\n").unwrap();
        let config = config_for(dir.path());

        assert!(matches!(
            ensure_split(&config),
            Err(DataError::EmptyTable(_))
        ));
    }

    #[test]
    fn test_tiny_class_keeps_rows_on_both_sides() {
        let dir = tempdir().unwrap();
        write_source(&dir.path().join("dataset.csv"), 40, 2);
        let config = config_for(dir.path());

        ensure_split(&config).unwrap();

        // round(2 * 0.2) = 0, clamped to 1: the minority class still shows
        // up in the hold-out portion.
        let (_, hidden_ones) = target_counts(&config.hidden_path());
        let (_, visible_ones) = target_counts(&config.visible_path());
        assert_eq!(hidden_ones, 1);
        assert_eq!(visible_ones, 1);
    }
}
