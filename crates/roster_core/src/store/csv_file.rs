//! Delimited-text codec for the record file.
//!
//! # Responsibility
//! - Read and write the fixed seven-column layout with standard quoting.
//! - Emit `store_load` / `store_save` events with duration and status.
//!
//! # Invariants
//! - The header row is written even when the list is empty.
//! - Reads tolerate legacy files without manager columns; the five base
//!   columns are mandatory.

use super::{StoreError, StoreResult};
use crate::model::record::Record;
use crate::model::row::{RecordRow, COLUMNS, REQUIRED_COLUMNS};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use log::{error, info};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Persistence contract consumed by the collection owner.
pub trait RecordStore {
    /// Reads every record from backing storage.
    fn load(&self) -> StoreResult<Vec<Record>>;
    /// Replaces backing storage with exactly `records`.
    fn save(&self, records: &[Record]) -> StoreResult<()>;
    /// Where records live, for messages.
    fn location(&self) -> &Path;
}

/// Record store bound to one delimited-text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecordStore {
    path: PathBuf,
}

impl CsvRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordStore for CsvRecordStore {
    fn load(&self) -> StoreResult<Vec<Record>> {
        load(&self.path)
    }

    fn save(&self, records: &[Record]) -> StoreResult<()> {
        save(&self.path, records)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Loads all records from `path`.
///
/// # Errors
/// - `NotFound` when the file does not exist.
/// - `MissingColumn`, `MalformedRow` or `InvalidRecord` for bad content.
/// - `Io` for any other read failure.
pub fn load(path: impl AsRef<Path>) -> StoreResult<Vec<Record>> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=store_load module=store status=start path={}",
        path.display()
    );

    match read_records(path) {
        Ok(records) => {
            info!(
                "event=store_load module=store status=ok path={} rows={} duration_ms={}",
                path.display(),
                records.len(),
                started_at.elapsed().as_millis()
            );
            Ok(records)
        }
        Err(err) => {
            error!(
                "event=store_load module=store status=error path={} duration_ms={} error_code={} error={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err.code(),
                err
            );
            Err(err)
        }
    }
}

/// Overwrites `path` with a header row and one row per record.
///
/// # Errors
/// - `Io` when the file cannot be created or written.
pub fn save(path: impl AsRef<Path>, records: &[Record]) -> StoreResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=store_save module=store status=start path={} rows={}",
        path.display(),
        records.len()
    );

    match write_records(path, records) {
        Ok(()) => {
            info!(
                "event=store_save module=store status=ok path={} rows={} duration_ms={}",
                path.display(),
                records.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=store_save module=store status=error path={} duration_ms={} error_code={} error={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err.code(),
                err
            );
            Err(err)
        }
    }
}

fn read_records(path: &Path) -> StoreResult<Vec<Record>> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound {
            path: path.to_path_buf(),
        },
        _ => StoreError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|err| read_error(path, err))?
        .clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|header| header == *column))
    {
        return Err(StoreError::MissingColumn {
            path: path.to_path_buf(),
            column,
        });
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let raw = result.map_err(|err| read_error(path, err))?;
        records.push(decode_row(path, &headers, &raw)?);
    }
    Ok(records)
}

fn decode_row(path: &Path, headers: &StringRecord, raw: &StringRecord) -> StoreResult<Record> {
    let line = raw.position().map_or(0, |position| position.line());
    let row: RecordRow =
        raw.deserialize(Some(headers))
            .map_err(|err| StoreError::MalformedRow {
                path: path.to_path_buf(),
                line,
                message: err.to_string(),
            })?;

    Record::try_from(row).map_err(|source| StoreError::InvalidRecord {
        path: path.to_path_buf(),
        line,
        row: raw.iter().collect::<Vec<_>>().join(","),
        source,
    })
}

fn read_error(path: &Path, err: csv::Error) -> StoreError {
    if err.is_io_error() {
        return StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::from(err),
        };
    }
    StoreError::MalformedRow {
        path: path.to_path_buf(),
        line: err.position().map_or(0, |position| position.line()),
        message: err.to_string(),
    }
}

fn write_records(path: &Path, records: &[Record]) -> StoreResult<()> {
    let io_error = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);

    writer
        .write_record(COLUMNS)
        .map_err(|err| io_error(io::Error::from(err)))?;
    for record in records {
        writer
            .serialize(RecordRow::from(record))
            .map_err(|err| io_error(io::Error::from(err)))?;
    }
    writer.flush().map_err(io_error)?;
    Ok(())
}
