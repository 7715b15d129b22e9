//! Field rules shared by employee and manager records.
//!
//! # Responsibility
//! - Hold every field constraint in one place so both record kinds apply
//!   identical rules to shared fields.
//! - Normalize inputs (phone digits, trimmed office number) before storage.
//!
//! # Invariants
//! - Rules are pure: they never observe or mutate a record.
//! - A rule either returns the value to store or a `RecordError` naming the
//!   violated constraint.

use crate::model::field::RecordField;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of digits in a stored phone number.
pub const PHONE_DIGITS: usize = 10;
/// Exact length of a department code.
pub const DEPARTMENT_LEN: usize = 3;

static NON_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]+").expect("valid non-digit regex"));
static DECIMAL_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Nd}").expect("valid decimal digit regex"));

/// Model-level failure: a field constraint or an identity rule was violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Employee ID is blank.
    EmptyId,
    /// First or last name is blank.
    EmptyName(RecordField),
    /// First or last name contains a decimal digit.
    NameContainsDigit(RecordField),
    /// Department code is not exactly three characters long.
    DepartmentLength { actual: usize },
    /// Department code has lowercase letters or no letters at all.
    DepartmentNotUppercase,
    /// Department code has a non-letter character.
    DepartmentNotAlphabetic,
    /// Phone input is blank.
    EmptyPhone,
    /// Phone input does not hold exactly ten digits.
    PhoneDigitCount { actual: usize },
    /// Team size text is not an integer.
    InvalidTeamSize(String),
    /// Team size is below zero.
    NegativeTeamSize(i64),
    /// Team size does not fit the stored integer width.
    TeamSizeOutOfRange(i64),
    /// Office number is blank after trimming.
    EmptyOfficeNumber,
    /// Attempt to change an employee ID after construction.
    ImmutableId(String),
    /// Manager-only field addressed on a base employee record.
    NotAManager { id: String, field: RecordField },
}

impl RecordError {
    /// Field the failure applies to.
    pub fn field(&self) -> RecordField {
        match self {
            Self::EmptyId | Self::ImmutableId(_) => RecordField::Id,
            Self::EmptyName(field) | Self::NameContainsDigit(field) => *field,
            Self::DepartmentLength { .. }
            | Self::DepartmentNotUppercase
            | Self::DepartmentNotAlphabetic => RecordField::Department,
            Self::EmptyPhone | Self::PhoneDigitCount { .. } => RecordField::Phone,
            Self::InvalidTeamSize(_) | Self::NegativeTeamSize(_) | Self::TeamSizeOutOfRange(_) => {
                RecordField::TeamSize
            }
            Self::EmptyOfficeNumber => RecordField::OfficeNumber,
            Self::NotAManager { field, .. } => *field,
        }
    }

    /// Identity failures reject an operation on the record's identity rather
    /// than on a field value.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::ImmutableId(_))
    }
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "employee ID cannot be empty"),
            Self::EmptyName(field) => write!(f, "{} cannot be empty", field.label()),
            Self::NameContainsDigit(field) => {
                write!(f, "{} cannot contain digits", field.label())
            }
            Self::DepartmentLength { actual } => write!(
                f,
                "department must be exactly {DEPARTMENT_LEN} characters, got {actual}"
            ),
            Self::DepartmentNotUppercase => write!(f, "department must be uppercase letters"),
            Self::DepartmentNotAlphabetic => write!(f, "department must contain only letters"),
            Self::EmptyPhone => write!(f, "phone number cannot be empty"),
            Self::PhoneDigitCount { actual } => write!(
                f,
                "phone number must contain exactly {PHONE_DIGITS} digits, got {actual}"
            ),
            Self::InvalidTeamSize(value) => {
                write!(f, "team size must be a whole number, got `{value}`")
            }
            Self::NegativeTeamSize(value) => {
                write!(f, "team size must be a non-negative integer, got {value}")
            }
            Self::TeamSizeOutOfRange(value) => write!(f, "team size {value} is too large"),
            Self::EmptyOfficeNumber => write!(f, "office number cannot be empty"),
            Self::ImmutableId(id) => {
                write!(f, "employee ID `{id}` is read-only and cannot be modified")
            }
            Self::NotAManager { id, field } => write!(
                f,
                "record `{id}` is not a manager; {} does not apply",
                field.label()
            ),
        }
    }
}

impl Error for RecordError {}

/// Sanitized ten-digit phone number.
///
/// Stored as raw digits; `Display` renders `(AAA)BBB-CCCC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Raw ten-digit form, as persisted.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.as_str();
        write!(f, "({}){}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
    }
}

pub fn validate_id(value: &str) -> Result<String, RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::EmptyId);
    }
    Ok(value.to_string())
}

/// Checks a first or last name. The value is stored verbatim.
pub fn validate_name(field: RecordField, value: &str) -> Result<String, RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::EmptyName(field));
    }
    if DECIMAL_DIGIT_RE.is_match(value) {
        return Err(RecordError::NameContainsDigit(field));
    }
    Ok(value.to_string())
}

/// Checks a department code: length first, then case, then letters only.
pub fn validate_department(value: &str) -> Result<String, RecordError> {
    let actual = value.chars().count();
    if actual != DEPARTMENT_LEN {
        return Err(RecordError::DepartmentLength { actual });
    }
    let has_upper = value.chars().any(char::is_uppercase);
    if !has_upper || value.chars().any(char::is_lowercase) {
        return Err(RecordError::DepartmentNotUppercase);
    }
    if !value.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(RecordError::DepartmentNotAlphabetic);
    }
    Ok(value.to_string())
}

/// Strips every non-digit character and requires exactly ten digits remain.
///
/// Idempotent on the canonical ten-digit form.
pub fn sanitize_phone(value: &str) -> Result<PhoneNumber, RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::EmptyPhone);
    }
    let digits = NON_DIGIT_RE.replace_all(value, "");
    if digits.len() != PHONE_DIGITS {
        return Err(RecordError::PhoneDigitCount {
            actual: digits.len(),
        });
    }
    Ok(PhoneNumber(digits.into_owned()))
}

pub fn validate_team_size(value: i64) -> Result<u32, RecordError> {
    if value < 0 {
        return Err(RecordError::NegativeTeamSize(value));
    }
    u32::try_from(value).map_err(|_| RecordError::TeamSizeOutOfRange(value))
}

/// Parses team size text (surrounding whitespace ignored). Range checks are
/// left to `validate_team_size`.
pub fn parse_team_size(value: &str) -> Result<i64, RecordError> {
    let trimmed = value.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| RecordError::InvalidTeamSize(trimmed.to_string()))
}

pub fn normalize_office_number(value: &str) -> Result<String, RecordError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordError::EmptyOfficeNumber);
    }
    Ok(trimmed.to_string())
}
