//! Flat row shape for persisted records.
//!
//! # Responsibility
//! - Map the tagged `Record` enum onto the fixed seven-column layout.
//! - Infer the record kind of a row from which optional columns are filled.
//!
//! # Invariants
//! - Column order is fixed: `COLUMNS`.
//! - `phone` holds the raw ten digits, never the display form.
//! - A manager always writes a non-empty `team_size` (zero is `"0"`), so a
//!   row is a manager iff both `team_size` and `office_number` are non-empty.

use crate::model::field::RecordField;
use crate::model::record::{Employee, ManagerDetails, Record};
use crate::model::validate::{parse_team_size, RecordError};
use log::warn;
use serde::{Deserialize, Serialize};

/// Persisted header, in order.
pub const COLUMNS: [&str; 7] = [
    "id",
    "first_name",
    "last_name",
    "department",
    "phone",
    "team_size",
    "office_number",
];

/// Columns every row must carry. Manager columns may be absent on read.
pub const REQUIRED_COLUMNS: [&str; 5] = ["id", "first_name", "last_name", "department", "phone"];

/// One persisted row. Optional columns are `None` when the cell is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub phone: String,
    #[serde(default)]
    pub team_size: Option<String>,
    #[serde(default)]
    pub office_number: Option<String>,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        let employee = record.employee();
        let details = record.manager_details();
        Self {
            id: employee.id().to_string(),
            first_name: employee.first_name().to_string(),
            last_name: employee.last_name().to_string(),
            department: employee.department().to_string(),
            phone: employee.phone_digits().to_string(),
            team_size: details.map(|details| details.team_size().to_string()),
            office_number: details.map(|details| details.office_number().to_string()),
        }
    }
}

impl From<Record> for RecordRow {
    fn from(record: Record) -> Self {
        Self::from(&record)
    }
}

impl TryFrom<RecordRow> for Record {
    type Error = RecordError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let employee = Employee::new(
            &row.id,
            &row.first_name,
            &row.last_name,
            &row.department,
            &row.phone,
        )?;

        let team_size = non_empty(row.team_size.as_deref());
        let office_number = non_empty(row.office_number.as_deref());
        match (team_size, office_number) {
            (Some(team_size), Some(office_number)) => {
                let details = ManagerDetails::new(parse_team_size(team_size)?, office_number)?;
                Ok(Record::Manager { employee, details })
            }
            (None, None) => Ok(Record::Employee(employee)),
            (team_size, _) => {
                let filled = if team_size.is_some() {
                    RecordField::TeamSize
                } else {
                    RecordField::OfficeNumber
                };
                warn!(
                    "event=row_decode module=model status=partial id={} filled_column={} decoded_as=employee",
                    row.id, filled
                );
                Ok(Record::Employee(employee))
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{RecordRow, COLUMNS};
    use crate::model::field::RecordField;
    use crate::model::record::{Record, RecordKind};

    #[test]
    fn columns_follow_field_order() {
        let names: Vec<&str> = RecordField::ALL.iter().map(|field| field.column()).collect();
        assert_eq!(names, COLUMNS);
    }

    #[test]
    fn zero_team_size_is_written_as_text_zero() {
        let manager =
            Record::new_manager("M009", "Zed", "Zero", "OPS", "5550000000", 0, "Z-0").unwrap();
        let row = RecordRow::from(&manager);
        assert_eq!(row.team_size.as_deref(), Some("0"));

        let decoded = Record::try_from(row).unwrap();
        assert_eq!(decoded.kind(), RecordKind::Manager);
        assert_eq!(decoded, manager);
    }

    #[test]
    fn partially_filled_manager_columns_decode_as_employee() {
        let row = RecordRow {
            id: "E010".into(),
            first_name: "Half".into(),
            last_name: "Filled".into(),
            department: "OPS".into(),
            phone: "5551112222".into(),
            team_size: Some("3".into()),
            office_number: Some(String::new()),
        };
        let record = Record::try_from(row).unwrap();
        assert_eq!(record.kind(), RecordKind::Employee);
    }

    #[test]
    fn employee_row_leaves_manager_cells_blank() {
        let record = Record::new_employee("E001", "John", "Doe", "ENG", "(555) 123-4567").unwrap();
        let row = RecordRow::from(&record);
        assert_eq!(row.phone, "5551234567");
        assert_eq!(row.team_size, None);
        assert_eq!(row.office_number, None);
    }
}
