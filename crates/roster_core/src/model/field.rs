//! Column-level naming shared by the model, the flat-file row shape and the
//! CLI edit flow.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One addressable field of a record.
///
/// Declaration order matches the persisted column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Id,
    FirstName,
    LastName,
    Department,
    Phone,
    TeamSize,
    OfficeNumber,
}

impl RecordField {
    /// All fields in persisted column order.
    pub const ALL: [RecordField; 7] = [
        Self::Id,
        Self::FirstName,
        Self::LastName,
        Self::Department,
        Self::Phone,
        Self::TeamSize,
        Self::OfficeNumber,
    ];

    /// Column name used in the flat-file header.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Department => "department",
            Self::Phone => "phone",
            Self::TeamSize => "team_size",
            Self::OfficeNumber => "office_number",
        }
    }

    /// Human-readable label used in error messages and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "employee ID",
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Department => "department",
            Self::Phone => "phone number",
            Self::TeamSize => "team size",
            Self::OfficeNumber => "office number",
        }
    }

    /// Title-case label for form prompts.
    pub fn title(self) -> &'static str {
        match self {
            Self::Id => "Employee ID",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Department => "Department",
            Self::Phone => "Phone Number",
            Self::TeamSize => "Team Size",
            Self::OfficeNumber => "Office Number",
        }
    }

    /// Whether the field only exists on manager records.
    pub fn is_manager_only(self) -> bool {
        matches!(self, Self::TeamSize | Self::OfficeNumber)
    }
}

impl Display for RecordField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Error returned when parsing an unknown column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(pub String);

impl Display for UnknownFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown record field `{}`", self.0)
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for RecordField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.column() == normalized)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}
