//! Employee and manager record model.
//!
//! # Responsibility
//! - Define the two record kinds as one tagged enum over a shared payload.
//! - Expose try-set mutators that keep the previous value on failure.
//!
//! # Invariants
//! - `id` is assigned at construction only; no mutator touches it.
//! - Every constructed or mutated record satisfies all field rules in
//!   `model::validate`; invalid intermediate states are never observable.
//! - Shared fields follow identical rules regardless of record kind.

use crate::model::field::RecordField;
use crate::model::row::RecordRow;
use crate::model::validate::{
    normalize_office_number, parse_team_size, sanitize_phone, validate_department, validate_id,
    validate_name, validate_team_size, PhoneNumber, RecordError,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Which shape a record has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Employee,
    Manager,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Manager => "Manager",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fields shared by every record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: String,
    first_name: String,
    last_name: String,
    department: String,
    phone: PhoneNumber,
}

impl Employee {
    /// Builds a validated payload. The phone accepts any formatting.
    pub fn new(
        id: &str,
        first_name: &str,
        last_name: &str,
        department: &str,
        phone: &str,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            id: validate_id(id)?,
            first_name: validate_name(RecordField::FirstName, first_name)?,
            last_name: validate_name(RecordField::LastName, last_name)?,
            department: validate_department(department)?,
            phone: sanitize_phone(phone)?,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// `first last`, as shown in listings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Raw ten-digit phone, the persisted form.
    pub fn phone_digits(&self) -> &str {
        self.phone.digits()
    }

    /// Canonical `(AAA)BBB-CCCC` phone.
    pub fn display_phone(&self) -> String {
        self.phone.to_string()
    }

    pub fn set_first_name(&mut self, value: &str) -> Result<(), RecordError> {
        self.first_name = validate_name(RecordField::FirstName, value)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, value: &str) -> Result<(), RecordError> {
        self.last_name = validate_name(RecordField::LastName, value)?;
        Ok(())
    }

    pub fn set_department(&mut self, value: &str) -> Result<(), RecordError> {
        self.department = validate_department(value)?;
        Ok(())
    }

    pub fn set_phone(&mut self, value: &str) -> Result<(), RecordError> {
        self.phone = sanitize_phone(value)?;
        Ok(())
    }
}

/// Manager-only extension payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerDetails {
    team_size: u32,
    office_number: String,
}

impl ManagerDetails {
    pub fn new(team_size: i64, office_number: &str) -> Result<Self, RecordError> {
        Ok(Self {
            team_size: validate_team_size(team_size)?,
            office_number: normalize_office_number(office_number)?,
        })
    }

    pub fn team_size(&self) -> u32 {
        self.team_size
    }

    /// Trimmed office number.
    pub fn office_number(&self) -> &str {
        &self.office_number
    }

    pub fn set_team_size(&mut self, value: i64) -> Result<(), RecordError> {
        self.team_size = validate_team_size(value)?;
        Ok(())
    }

    pub fn set_office_number(&mut self, value: &str) -> Result<(), RecordError> {
        self.office_number = normalize_office_number(value)?;
        Ok(())
    }
}

/// A personnel record: a base employee or a manager.
///
/// Serializes through the flat [`RecordRow`] shape; deserializing re-runs
/// every field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordRow", into = "RecordRow")]
pub enum Record {
    Employee(Employee),
    Manager {
        employee: Employee,
        details: ManagerDetails,
    },
}

impl Record {
    /// Creates a validated base employee record.
    pub fn new_employee(
        id: &str,
        first_name: &str,
        last_name: &str,
        department: &str,
        phone: &str,
    ) -> Result<Self, RecordError> {
        Ok(Self::Employee(Employee::new(
            id, first_name, last_name, department, phone,
        )?))
    }

    /// Creates a validated manager record.
    pub fn new_manager(
        id: &str,
        first_name: &str,
        last_name: &str,
        department: &str,
        phone: &str,
        team_size: i64,
        office_number: &str,
    ) -> Result<Self, RecordError> {
        let employee = Employee::new(id, first_name, last_name, department, phone)?;
        let details = ManagerDetails::new(team_size, office_number)?;
        Ok(Self::Manager { employee, details })
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Employee(_) => RecordKind::Employee,
            Self::Manager { .. } => RecordKind::Manager,
        }
    }

    pub fn is_manager(&self) -> bool {
        self.kind() == RecordKind::Manager
    }

    pub fn id(&self) -> &str {
        self.employee().id()
    }

    /// Shared payload, whatever the kind.
    pub fn employee(&self) -> &Employee {
        match self {
            Self::Employee(employee) | Self::Manager { employee, .. } => employee,
        }
    }

    pub fn employee_mut(&mut self) -> &mut Employee {
        match self {
            Self::Employee(employee) | Self::Manager { employee, .. } => employee,
        }
    }

    pub fn manager_details(&self) -> Option<&ManagerDetails> {
        match self {
            Self::Employee(_) => None,
            Self::Manager { details, .. } => Some(details),
        }
    }

    pub fn manager_details_mut(&mut self) -> Option<&mut ManagerDetails> {
        match self {
            Self::Employee(_) => None,
            Self::Manager { details, .. } => Some(details),
        }
    }

    /// Current value of `field` as shown in edit prompts; `None` for
    /// manager-only fields on a base employee.
    pub fn field_text(&self, field: RecordField) -> Option<String> {
        let employee = self.employee();
        match field {
            RecordField::Id => Some(employee.id().to_string()),
            RecordField::FirstName => Some(employee.first_name().to_string()),
            RecordField::LastName => Some(employee.last_name().to_string()),
            RecordField::Department => Some(employee.department().to_string()),
            RecordField::Phone => Some(employee.display_phone()),
            RecordField::TeamSize => self
                .manager_details()
                .map(|details| details.team_size().to_string()),
            RecordField::OfficeNumber => self
                .manager_details()
                .map(|details| details.office_number().to_string()),
        }
    }

    /// Applies a textual update to one field through its validated setter.
    ///
    /// # Errors
    /// - `ImmutableId` for any attempt on `RecordField::Id`.
    /// - `NotAManager` for manager-only fields on a base employee, before the
    ///   value is looked at.
    /// - The field's validation error otherwise; the record is unchanged.
    pub fn set_field(&mut self, field: RecordField, raw: &str) -> Result<(), RecordError> {
        match field {
            RecordField::Id => Err(RecordError::ImmutableId(self.id().to_string())),
            RecordField::FirstName => self.employee_mut().set_first_name(raw),
            RecordField::LastName => self.employee_mut().set_last_name(raw),
            RecordField::Department => self.employee_mut().set_department(raw),
            RecordField::Phone => self.employee_mut().set_phone(raw),
            RecordField::TeamSize | RecordField::OfficeNumber => self.set_manager_field(field, raw),
        }
    }

    fn set_manager_field(&mut self, field: RecordField, raw: &str) -> Result<(), RecordError> {
        let id = self.id().to_string();
        let details = self
            .manager_details_mut()
            .ok_or(RecordError::NotAManager { id, field })?;
        if field == RecordField::TeamSize {
            details.set_team_size(parse_team_size(raw)?)
        } else {
            details.set_office_number(raw)
        }
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let employee = self.employee();
        write!(
            f,
            "{}(ID: {}, Name: {}, Dept: {}, Phone: {}",
            self.kind(),
            employee.id(),
            employee.full_name(),
            employee.department(),
            employee.phone()
        )?;
        if let Some(details) = self.manager_details() {
            write!(
                f,
                ", Team Size: {}, Office: {}",
                details.team_size(),
                details.office_number()
            )?;
        }
        write!(f, ")")
    }
}
