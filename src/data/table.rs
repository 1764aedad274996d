//! Tab-separated table primitives shared by the splitter and loader

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use super::error::{DataError, DataResult};

/// Read a tab-separated table with a header row.
///
/// Returns the header and all data rows. Rows with a field count different
/// from the header are rejected by the reader.
pub(crate) fn read_table(path: &Path) -> DataResult<(StringRecord, Vec<StringRecord>)> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().delimiter(b'\t').from_reader(file);

    let header = reader.headers()?.clone();
    let mut rows = Vec::new();
    for result in reader.records() {
        rows.push(result?);
    }

    Ok((header, rows))
}

/// Write the header and the selected rows, tab-delimited, in index order.
pub(crate) fn write_table(
    path: &Path,
    header: &StringRecord,
    rows: &[StringRecord],
    indices: &[usize],
) -> DataResult<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(file);

    writer.write_record(header)?;
    for &i in indices {
        writer.write_record(&rows[i])?;
    }
    writer.flush()?;

    Ok(())
}

/// Index of a named column in the header
pub(crate) fn column_index(header: &StringRecord, name: &str) -> DataResult<usize> {
    header
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))
}
