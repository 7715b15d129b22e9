//! Flat-file persistence for personnel records.
//!
//! # Responsibility
//! - Serialize the full record list to a delimited text file and parse it
//!   back, reconstructing each record's kind from its row shape.
//! - Report failures with the offending file, line, column or row content.
//!
//! # Invariants
//! - `save` rewrites the whole file; it never appends.
//! - A missing file is `NotFound`; an empty file loads as an empty list.
//! - The store does not enforce ID uniqueness; the collection owner does.

use crate::error::ErrorCategory;
use crate::model::validate::RecordError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

mod csv_file;
mod read_only;

pub use csv_file::{load, save, CsvRecordStore, RecordStore};
pub use read_only::ReadOnlyStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// The record file does not exist.
    NotFound { path: PathBuf },
    /// The header lacks a required column.
    MissingColumn { path: PathBuf, column: &'static str },
    /// A row could not be parsed as delimited text of the header's width.
    MalformedRow {
        path: PathBuf,
        line: u64,
        message: String,
    },
    /// A row parsed but its values break a record rule.
    InvalidRecord {
        path: PathBuf,
        line: u64,
        row: String,
        source: RecordError,
    },
    /// The file could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// The session was opened without write access to the file.
    ReadOnly { path: PathBuf },
}

impl StoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::MissingColumn { .. } | Self::MalformedRow { .. } | Self::InvalidRecord { .. } => {
                ErrorCategory::MalformedData
            }
            Self::Io { .. } | Self::ReadOnly { .. } => ErrorCategory::Io,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// File the failure refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::MissingColumn { path, .. }
            | Self::MalformedRow { path, .. }
            | Self::InvalidRecord { path, .. }
            | Self::Io { path, .. }
            | Self::ReadOnly { path } => path,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "file_not_found",
            Self::MissingColumn { .. } => "missing_column",
            Self::MalformedRow { .. } => "malformed_row",
            Self::InvalidRecord { .. } => "invalid_record",
            Self::Io { .. } => "io_failed",
            Self::ReadOnly { .. } => "read_only",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "record file `{}` not found", path.display()),
            Self::MissingColumn { path, column } => write!(
                f,
                "malformed record file `{}`: missing required column `{column}`",
                path.display()
            ),
            Self::MalformedRow {
                path,
                line,
                message,
            } => write!(
                f,
                "malformed record file `{}` at line {line}: {message}",
                path.display()
            ),
            Self::InvalidRecord {
                path,
                line,
                row,
                source,
            } => write!(
                f,
                "invalid record in `{}` at line {line}, column `{}` (`{row}`): {source}",
                path.display(),
                source.field()
            ),
            Self::Io { path, source } => {
                write!(f, "cannot access record file `{}`: {source}", path.display())
            }
            Self::ReadOnly { path } => write!(
                f,
                "record file `{}` is open read-only; changes were not saved",
                path.display()
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRecord { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. }
            | Self::MissingColumn { .. }
            | Self::MalformedRow { .. }
            | Self::ReadOnly { .. } => None,
        }
    }
}
