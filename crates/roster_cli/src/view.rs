//! Text rendering of records for the terminal.

use roster_core::Record;
use std::fmt::Write;

const TABLE_WIDTH: usize = 100;

/// Numbered table, one row per record; numbering starts at 1.
pub fn render_table(records: &[Record], title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{title}");
    let _ = writeln!(out, "{}", "=".repeat(TABLE_WIDTH));
    push_row(
        &mut out,
        ["#", "ID", "Name", "Dept", "Phone", "Type", "Details"],
    );
    let _ = writeln!(out, "{}", "-".repeat(TABLE_WIDTH));

    for (position, record) in records.iter().enumerate() {
        let employee = record.employee();
        let number = (position + 1).to_string();
        let name = employee.full_name();
        let phone = employee.display_phone();
        let details = record
            .manager_details()
            .map(|details| {
                format!(
                    "Team:{}, Office:{}",
                    details.team_size(),
                    details.office_number()
                )
            })
            .unwrap_or_default();
        push_row(
            &mut out,
            [
                number.as_str(),
                employee.id(),
                name.as_str(),
                employee.department(),
                phone.as_str(),
                record.kind().label(),
                details.as_str(),
            ],
        );
    }

    let _ = writeln!(out, "{}", "-".repeat(TABLE_WIDTH));
    let _ = writeln!(out, "Total: {} employees", records.len());
    out
}

fn push_row(out: &mut String, cells: [&str; 7]) {
    let line = format!(
        "{:<3} {:<8} {:<25} {:<6} {:<15} {:<10} {}",
        cells[0], cells[1], cells[2], cells[3], cells[4], cells[5], cells[6]
    );
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Full field listing for one record; `index` is the 0-based position.
pub fn render_details(record: &Record, index: Option<usize>) -> String {
    let employee = record.employee();
    let mut out = String::new();
    let heading = match index {
        Some(index) => format!("{} Details (Index: {index})", record.kind()),
        None => format!("{} Details", record.kind()),
    };
    let _ = writeln!(out, "\n{heading}");
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "ID: {}", employee.id());
    let _ = writeln!(out, "Name: {}", employee.full_name());
    let _ = writeln!(out, "Department: {}", employee.department());
    let _ = writeln!(out, "Phone (Formatted): {}", employee.display_phone());
    let _ = writeln!(out, "Phone (Unformatted): {}", employee.phone_digits());
    if let Some(details) = record.manager_details() {
        let _ = writeln!(out, "Team Size: {}", details.team_size());
        let _ = writeln!(out, "Office: {}", details.office_number());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{render_details, render_table};
    use roster_core::Record;

    #[test]
    fn table_shows_kind_and_manager_details() {
        let records = vec![
            Record::new_employee("E001", "John", "Doe", "ENG", "5551234567").unwrap(),
            Record::new_manager("M001", "Jane", "Smith", "ITM", "5559876543", 8, "A-205").unwrap(),
        ];
        let table = render_table(&records, "All Employees (2 total)");

        assert!(table.contains("All Employees (2 total)"));
        assert!(table.contains("1   E001     John Doe"));
        assert!(table.contains("(555)123-4567   Employee"));
        assert!(table.contains("Manager    Team:8, Office:A-205"));
        assert!(table.contains("Total: 2 employees"));
    }

    #[test]
    fn details_include_raw_phone_and_manager_fields() {
        let manager =
            Record::new_manager("M001", "Jane", "Smith", "ITM", "555.987.6543", 0, "A-205")
                .unwrap();
        let details = render_details(&manager, Some(1));

        assert!(details.contains("Manager Details (Index: 1)"));
        assert!(details.contains("Phone (Formatted): (555)987-6543"));
        assert!(details.contains("Phone (Unformatted): 5559876543"));
        assert!(details.contains("Team Size: 0"));
    }
}
