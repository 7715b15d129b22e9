//! Store wrapper for sessions that must not write back.

use super::{RecordStore, StoreError, StoreResult};
use crate::model::record::Record;
use log::warn;
use std::path::Path;

/// Loads through `inner` but refuses every save, leaving the file as found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyStore<S> {
    inner: S,
}

impl<S: RecordStore> ReadOnlyStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: RecordStore> RecordStore for ReadOnlyStore<S> {
    fn load(&self) -> StoreResult<Vec<Record>> {
        self.inner.load()
    }

    fn save(&self, records: &[Record]) -> StoreResult<()> {
        warn!(
            "event=store_save module=store status=refused path={} rows={}",
            self.location().display(),
            records.len()
        );
        Err(StoreError::ReadOnly {
            path: self.location().to_path_buf(),
        })
    }

    fn location(&self) -> &Path {
        self.inner.location()
    }
}
