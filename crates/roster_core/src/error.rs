//! Failure taxonomy shared by store and service errors.

use std::fmt::{Display, Formatter};

/// Coarse classification callers use to pick a recovery path.
///
/// `NotFound` on load allows a fresh start; `Io` points at the environment
/// rather than the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A field value broke a record rule.
    Validation,
    /// Duplicate ID, or an attempt to change an ID.
    Identity,
    /// Missing record file or out-of-range selection.
    NotFound,
    /// Record file content cannot be decoded.
    MalformedData,
    /// The file system refused a read or write.
    Io,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Identity => "identity",
            Self::NotFound => "not_found",
            Self::MalformedData => "malformed_data",
            Self::Io => "io",
        }
    }
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
