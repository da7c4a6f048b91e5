//! CSV-backed record store.
//!
//! The first row of a dataset file names the fields, every following row is
//! one record. Rows may be ragged: a short row lacks its trailing keys and
//! extra cells beyond the header are ignored.
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::RecordSource;
use crate::types::Record;

const BOM: char = '\u{feff}';

/// Reads every record of the CSV file at `path`.
///
/// Fails with `SourceUnavailable` when the file cannot be opened or read, and
/// with `SourceMalformed` when it is not valid CSV or holds fewer than a
/// header plus one data row.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|source| Error::SourceUnavailable { path: path.to_path_buf(), source })?;
    let mut reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(file);

    let mut rows = Vec::new();
    for row in reader.records() {
        rows.push(row.map_err(|e| read_error(path, e))?);
    }

    let (header, data) = match rows.split_first() {
        Some((header, data)) if !data.is_empty() => (header, data),
        _ => {
            return Err(Error::SourceMalformed {
                path: path.to_path_buf(),
                reason: format!("expected a header and at least one data row, found {} row(s)", rows.len()),
            })
        }
    };

    let fields: Vec<&str> = header.iter().map(|h| h.trim_start_matches(BOM)).collect();
    let records: Vec<Record> = data
        .iter()
        .map(|row| fields.iter().zip(row.iter()).map(|(k, v)| (*k, v)).collect())
        .collect();

    debug!(path = %path.display(), fields = fields.len(), records = records.len(), "loaded dataset");
    Ok(records)
}

fn read_error(path: &Path, err: csv::Error) -> Error {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => Error::SourceUnavailable { path: path.to_path_buf(), source },
        _ => Error::SourceMalformed { path: path.to_path_buf(), reason },
    }
}

/// Resolves dataset identifiers as file names inside one data directory.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    data_dir: PathBuf,
}

impl CsvRecordStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self { Self { data_dir: data_dir.into() } }

    pub fn data_dir(&self) -> &Path { &self.data_dir }

    pub fn dataset_path(&self, dataset: &str) -> PathBuf { self.data_dir.join(dataset) }
}

impl RecordSource for CsvRecordStore {
    fn load(&self, dataset: &str) -> Result<Vec<Record>> { load_records(&self.dataset_path(dataset)) }
}
