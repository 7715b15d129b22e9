//! Roster use-case service.
//!
//! # Responsibility
//! - Own the in-memory record list and the injected store.
//! - Provide create/edit/delete/list entry points for front ends.
//!
//! # Invariants
//! - Employee IDs are unique within the list; checked on insertion.
//! - Every successful mutation is persisted before returning.
//! - A mutation whose save fails is rolled back in memory.
//! - Edits apply all-or-nothing.

use crate::error::ErrorCategory;
use crate::model::field::RecordField;
use crate::model::record::Record;
use crate::model::validate::RecordError;
use crate::store::{RecordStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RosterResult<T> = Result<T, RosterError>;

/// Service error for roster use-cases.
#[derive(Debug)]
pub enum RosterError {
    /// A field value or identity rule was violated.
    Record(RecordError),
    /// Another record already uses this ID.
    DuplicateId(String),
    /// Selection outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },
    /// Persistence-layer failure.
    Store(StoreError),
}

impl RosterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Record(err) if err.is_identity() => ErrorCategory::Identity,
            Self::Record(_) => ErrorCategory::Validation,
            Self::DuplicateId(_) => ErrorCategory::Identity,
            Self::IndexOutOfRange { .. } => ErrorCategory::NotFound,
            Self::Store(err) => err.category(),
        }
    }
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Record(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "employee with ID `{id}` already exists"),
            Self::IndexOutOfRange { index, len } if *len == 0 => {
                write!(f, "invalid employee index {index}: the roster is empty")
            }
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "invalid employee index {index}: must be between 0 and {}",
                len - 1
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Record(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::DuplicateId(_) | Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<RecordError> for RosterError {
    fn from(value: RecordError) -> Self {
        Self::Record(value)
    }
}

impl From<StoreError> for RosterError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// What `RosterService::open` found in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    /// Records were loaded.
    Loaded(usize),
    /// The file exists but holds no records.
    Empty,
    /// No file yet; starting fresh.
    Missing,
}

/// Collection owner over an injected record store.
pub struct RosterService<S: RecordStore> {
    store: S,
    records: Vec<Record>,
}

impl<S: RecordStore> RosterService<S> {
    /// Wraps an already-loaded list. Does not touch the store.
    pub fn new(store: S, records: Vec<Record>) -> Self {
        Self { store, records }
    }

    /// Loads the store into memory.
    ///
    /// A missing file starts an empty roster; any other store failure is
    /// returned unchanged.
    pub fn open(store: S) -> RosterResult<(Self, OpenStatus)> {
        let (records, status) = match store.load() {
            Ok(records) if records.is_empty() => (records, OpenStatus::Empty),
            Ok(records) => {
                let count = records.len();
                (records, OpenStatus::Loaded(count))
            }
            Err(err) if err.is_not_found() => {
                info!(
                    "event=roster_open module=service status=fresh path={}",
                    store.location().display()
                );
                (Vec::new(), OpenStatus::Missing)
            }
            Err(err) => return Err(err.into()),
        };
        Ok((Self::new(store, records), status))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> RosterResult<&Record> {
        self.records.get(index).ok_or(RosterError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Appends a new record and saves.
    ///
    /// # Errors
    /// - `DuplicateId` when the ID is already used.
    /// - `Store` when saving fails; the record is not kept.
    pub fn create(&mut self, record: Record) -> RosterResult<&Record> {
        if self.find_by_id(record.id()).is_some() {
            warn!(
                "event=record_create module=service status=rejected reason=duplicate_id id={}",
                record.id()
            );
            return Err(RosterError::DuplicateId(record.id().to_string()));
        }

        self.records.push(record);
        if let Err(err) = self.persist() {
            self.records.pop();
            return Err(err);
        }

        let index = self.records.len() - 1;
        let created = &self.records[index];
        info!(
            "event=record_create module=service status=ok id={} kind={} index={}",
            created.id(),
            created.kind(),
            index
        );
        Ok(created)
    }

    /// Applies field edits to the record at `index` and saves.
    ///
    /// Edits run in order on a copy; the stored record changes only if all
    /// succeed and the save succeeds.
    pub fn edit(&mut self, index: usize, edits: &[(RecordField, String)]) -> RosterResult<&Record> {
        let mut updated = self.get(index)?.clone();
        for (field, value) in edits {
            updated.set_field(*field, value)?;
        }

        let previous = std::mem::replace(&mut self.records[index], updated);
        if let Err(err) = self.persist() {
            self.records[index] = previous;
            return Err(err);
        }

        let edited = &self.records[index];
        info!(
            "event=record_edit module=service status=ok id={} fields={}",
            edited.id(),
            edits.len()
        );
        Ok(edited)
    }

    /// Removes the record at `index`, saves, and returns it.
    pub fn delete(&mut self, index: usize) -> RosterResult<Record> {
        self.get(index)?;
        let removed = self.records.remove(index);
        if let Err(err) = self.persist() {
            self.records.insert(index, removed);
            return Err(err);
        }

        info!(
            "event=record_delete module=service status=ok id={} index={}",
            removed.id(),
            index
        );
        Ok(removed)
    }

    /// Writes the current list to the store.
    pub fn save(&self) -> RosterResult<()> {
        self.persist()
    }

    fn persist(&self) -> RosterResult<()> {
        self.store.save(&self.records)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{OpenStatus, RosterError, RosterService};
    use crate::error::ErrorCategory;
    use crate::model::field::RecordField;
    use crate::model::record::Record;
    use crate::store::{RecordStore, StoreError, StoreResult};
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::path::{Path, PathBuf};

    struct MemoryStore {
        path: PathBuf,
        saved: RefCell<Option<Vec<Record>>>,
        fail_saves: Cell<bool>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                path: PathBuf::from("memory.csv"),
                saved: RefCell::new(None),
                fail_saves: Cell::new(false),
            }
        }

        fn saved_ids(&self) -> Vec<String> {
            self.saved
                .borrow()
                .as_ref()
                .map(|records| records.iter().map(|r| r.id().to_string()).collect())
                .unwrap_or_default()
        }
    }

    impl RecordStore for MemoryStore {
        fn load(&self) -> StoreResult<Vec<Record>> {
            self.saved
                .borrow()
                .clone()
                .ok_or_else(|| StoreError::NotFound {
                    path: self.path.clone(),
                })
        }

        fn save(&self, records: &[Record]) -> StoreResult<()> {
            if self.fail_saves.get() {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            *self.saved.borrow_mut() = Some(records.to_vec());
            Ok(())
        }

        fn location(&self) -> &Path {
            &self.path
        }
    }

    fn employee(id: &str) -> Record {
        Record::new_employee(id, "Test", "User", "TST", "5551234567").unwrap()
    }

    #[test]
    fn open_reports_missing_store_as_fresh_start() {
        let (service, status) = RosterService::open(MemoryStore::new()).unwrap();
        assert_eq!(status, OpenStatus::Missing);
        assert!(service.is_empty());
    }

    #[test]
    fn create_saves_and_rejects_duplicates() {
        let mut service = RosterService::new(MemoryStore::new(), Vec::new());
        service.create(employee("E001")).unwrap();
        assert_eq!(service.store().saved_ids(), vec!["E001"]);

        let err = service.create(employee("E001")).unwrap_err();
        assert!(matches!(err, RosterError::DuplicateId(ref id) if id == "E001"));
        assert_eq!(err.category(), ErrorCategory::Identity);
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn failed_save_rolls_back_every_mutation() {
        let mut service = RosterService::new(MemoryStore::new(), vec![employee("E001")]);
        service.store().fail_saves.set(true);

        let err = service.create(employee("E002")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(service.len(), 1);

        service
            .edit(0, &[(RecordField::FirstName, "Changed".to_string())])
            .unwrap_err();
        assert_eq!(service.get(0).unwrap().employee().first_name(), "Test");

        service.delete(0).unwrap_err();
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn edit_is_all_or_nothing() {
        let mut service = RosterService::new(MemoryStore::new(), vec![employee("E001")]);
        let err = service
            .edit(
                0,
                &[
                    (RecordField::FirstName, "Valid".to_string()),
                    (RecordField::Department, "bad".to_string()),
                ],
            )
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(service.get(0).unwrap().employee().first_name(), "Test");
        assert!(service.store().saved_ids().is_empty());
    }

    #[test]
    fn edit_rejects_id_changes_as_identity_error() {
        let mut service = RosterService::new(MemoryStore::new(), vec![employee("E001")]);
        let err = service
            .edit(0, &[(RecordField::Id, "E999".to_string())])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Identity);
        assert_eq!(service.get(0).unwrap().id(), "E001");
    }

    #[test]
    fn out_of_range_index_is_not_found() {
        let mut service = RosterService::new(MemoryStore::new(), vec![employee("E001")]);
        let err = service.delete(3).unwrap_err();
        assert!(matches!(
            err,
            RosterError::IndexOutOfRange { index: 3, len: 1 }
        ));
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(
            err.to_string(),
            "invalid employee index 3: must be between 0 and 0"
        );
    }
}
