//! Core domain logic for the roster record keeper.
//! This crate is the single source of truth for record invariants.

pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use error::ErrorCategory;
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::field::{RecordField, UnknownFieldError};
pub use model::record::{Employee, ManagerDetails, Record, RecordKind};
pub use model::row::{RecordRow, COLUMNS};
pub use model::validate::{sanitize_phone, PhoneNumber, RecordError};
pub use service::roster_service::{OpenStatus, RosterError, RosterResult, RosterService};
pub use store::{load, save, CsvRecordStore, ReadOnlyStore, RecordStore, StoreError, StoreResult};

/// Default record file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "employee_data.csv";

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
