//! Interactive menu loop.
//!
//! # Responsibility
//! - Map menu choices to roster service calls.
//! - Report every service error and keep the loop running.
//!
//! # Invariants
//! - Selections shown to the user are 1-based; the service is 0-based.
//! - Only input/output failures end the loop early.

use crate::console::{Console, MessageKind};
use crate::view::{render_details, render_table};
use log::{info, warn};
use roster_core::{
    OpenStatus, Record, RecordError, RecordField, RecordStore, RosterError, RosterService,
    StoreError,
};
use std::io::{self, BufRead, Write};

const MENU: &str = "\nEmployee Management System
1. Create New Employee
2. Edit Existing Employee
3. Delete Existing Employee
4. Display Employees
5. Quit
";

const KIND_PROMPT: &str = "\nCreate (E)mployee or (M)anager? (E/M): ";

/// Values collected by the create flow.
struct NewRecordInput {
    id: String,
    first_name: String,
    last_name: String,
    department: String,
    phone: String,
    manager: Option<(i64, String)>,
}

impl NewRecordInput {
    fn build(&self) -> Result<Record, RecordError> {
        match &self.manager {
            Some((team_size, office_number)) => Record::new_manager(
                &self.id,
                &self.first_name,
                &self.last_name,
                &self.department,
                &self.phone,
                *team_size,
                office_number,
            ),
            None => Record::new_employee(
                &self.id,
                &self.first_name,
                &self.last_name,
                &self.department,
                &self.phone,
            ),
        }
    }
}

pub struct App<S: RecordStore, R, W> {
    service: RosterService<S>,
    console: Console<R, W>,
}

impl<S: RecordStore, R: BufRead, W: Write> App<S, R, W> {
    pub fn new(service: RosterService<S>, console: Console<R, W>) -> Self {
        Self { service, console }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (RosterService<S>, Console<R, W>) {
        (self.service, self.console)
    }

    /// Tells the user what the store held at startup.
    pub fn announce(&mut self, status: OpenStatus) -> io::Result<()> {
        let location = self.service.store().location().display().to_string();
        match status {
            OpenStatus::Loaded(count) => self.console.message(
                MessageKind::Success,
                &format!("Loaded {count} employees from '{location}'"),
            ),
            OpenStatus::Empty => self.console.message(
                MessageKind::Info,
                &format!("No existing data found in '{location}'. Starting fresh."),
            ),
            OpenStatus::Missing => self.console.message(
                MessageKind::Info,
                &format!("No existing file '{location}' found. Starting with empty database."),
            ),
        }
    }

    /// Tells the user the record file could not be read and nothing will be
    /// written back to it.
    pub fn announce_unreadable(&mut self, err: &StoreError) -> io::Result<()> {
        warn!(
            "event=session_start module=cli status=read_only category={} error={}",
            err.category(),
            err
        );
        self.console.message(
            MessageKind::Error,
            &format!("Error loading employees: {err}"),
        )?;
        self.console.message(
            MessageKind::Warning,
            &format!(
                "'{}' is left untouched; changes in this session will not be saved.",
                err.path().display()
            ),
        )
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        self.console.message(
            MessageKind::Info,
            "Welcome to the Employee Management System!",
        )?;
        loop {
            self.console.write(MENU)?;
            let Some(choice) = self.console.prompt_int("\nSelect an option (1-5): ")? else {
                info!("event=menu_exit module=cli reason=end_of_input");
                return Ok(());
            };
            match choice {
                1 => self.create_record()?,
                2 => self.edit_record()?,
                3 => self.delete_record()?,
                4 => self.display_records()?,
                5 => {
                    if self.quit()? {
                        return Ok(());
                    }
                }
                _ => self.console.line("Invalid input. Please try again.")?,
            }
        }
    }

    fn create_record(&mut self) -> io::Result<()> {
        let Some(is_manager) = self.prompt_kind()? else {
            return self.cancelled("Employee creation cancelled.");
        };
        let Some(input) = self.prompt_new_record(is_manager)? else {
            return self.cancelled("Employee creation cancelled.");
        };

        if self.service.find_by_id(&input.id).is_some() {
            self.report(&RosterError::DuplicateId(input.id.clone()), "creating employee")?;
            return self.console.pause();
        }

        let created = input
            .build()
            .map_err(RosterError::from)
            .and_then(|record| self.service.create(record).map(Record::clone));
        match created {
            Ok(record) => {
                self.console.message(
                    MessageKind::Success,
                    &format!(
                        "{} '{}' created successfully!",
                        record.kind(),
                        record.employee().full_name()
                    ),
                )?;
                self.console.write(&render_details(&record, None))?;
            }
            Err(err) => self.report(&err, "creating employee")?,
        }
        self.console.pause()
    }

    fn prompt_kind(&mut self) -> io::Result<Option<bool>> {
        loop {
            let Some(answer) = self.console.prompt(KIND_PROMPT)? else {
                return Ok(None);
            };
            match answer.to_ascii_uppercase().as_str() {
                "E" => return Ok(Some(false)),
                "M" => return Ok(Some(true)),
                _ => self.console.line("Please enter 'E' for Employee or 'M' for Manager.")?,
            }
        }
    }

    fn prompt_new_record(&mut self, is_manager: bool) -> io::Result<Option<NewRecordInput>> {
        let kind = if is_manager { "Manager" } else { "Employee" };
        self.console.line(&format!("\nEnter {kind} Information:"))?;
        self.console.line(&"-".repeat(40))?;

        let labels = [
            "Employee ID: ",
            "First Name: ",
            "Last Name: ",
            "Department (3 uppercase letters): ",
            "Phone Number (any format): ",
        ];
        let mut answers = Vec::with_capacity(labels.len());
        for label in labels {
            let Some(answer) = self.console.prompt(label)? else {
                return Ok(None);
            };
            answers.push(answer);
        }

        let manager = if is_manager {
            let Some(team_size) = self.console.prompt_int("Team Size: ")? else {
                return Ok(None);
            };
            let Some(office_number) = self.console.prompt("Office Number: ")? else {
                return Ok(None);
            };
            Some((team_size, office_number))
        } else {
            None
        };

        let mut answers = answers.into_iter();
        let mut next = || answers.next().unwrap_or_default();
        Ok(Some(NewRecordInput {
            id: next(),
            first_name: next(),
            last_name: next(),
            department: next(),
            phone: next(),
            manager,
        }))
    }

    fn edit_record(&mut self) -> io::Result<()> {
        if self.service.is_empty() {
            self.console.message(
                MessageKind::Info,
                "No employees found. Please create an employee first.",
            )?;
            return self.console.pause();
        }

        let table = render_table(self.service.records(), "Select Employee to Edit");
        self.console.write(&table)?;
        let Some(index) = self.select_index()? else {
            return self.cancelled("Edit cancelled.");
        };

        let current = match self.service.get(index) {
            Ok(record) => record.clone(),
            Err(err) => {
                self.report(&err, "updating employee")?;
                return self.console.pause();
            }
        };
        self.console.message(
            MessageKind::Info,
            &format!(
                "Editing {}: {}",
                current.kind(),
                current.employee().full_name()
            ),
        )?;
        self.console.write(&render_details(&current, Some(index)))?;
        self.console.line("\nEnter new values (press Enter to keep current value):")?;

        let editable = RecordField::ALL.into_iter().filter(|field| {
            *field != RecordField::Id && (current.is_manager() || !field.is_manager_only())
        });
        let mut edits = Vec::new();
        for field in editable {
            let shown = current.field_text(field).unwrap_or_default();
            let label = format!("{} ({shown}): ", field.title());
            let Some(answer) = self.console.prompt(&label)? else {
                return self.cancelled("Edit cancelled.");
            };
            if !answer.is_empty() {
                edits.push((field, answer));
            }
        }

        if edits.is_empty() {
            self.console.message(MessageKind::Warning, "No changes made.")?;
            return self.console.pause();
        }

        match self.service.edit(index, &edits).map(Record::clone) {
            Ok(record) => {
                self.console.message(MessageKind::Success, "Employee updated successfully!")?;
                self.console.write(&render_details(&record, None))?;
            }
            Err(err) => self.report(&err, "updating employee")?,
        }
        self.console.pause()
    }

    fn delete_record(&mut self) -> io::Result<()> {
        if self.service.is_empty() {
            self.console.message(MessageKind::Info, "No employees found.")?;
            return self.console.pause();
        }

        let table = render_table(self.service.records(), "Select Employee to Delete");
        self.console.write(&table)?;
        let Some(index) = self.select_index()? else {
            return self.cancelled("Delete cancelled.");
        };

        let action = match self.service.get(index) {
            Ok(record) => format!(
                "delete {} (ID: {})",
                record.employee().full_name(),
                record.id()
            ),
            Err(err) => {
                self.report(&err, "deleting employee")?;
                return self.console.pause();
            }
        };
        if !self.console.confirm(&action)? {
            return self.cancelled("Delete cancelled.");
        }

        match self.service.delete(index) {
            Ok(removed) => self.console.message(
                MessageKind::Success,
                &format!(
                    "Employee '{}' deleted successfully!",
                    removed.employee().full_name()
                ),
            )?,
            Err(err) => self.report(&err, "deleting employee")?,
        }
        self.console.pause()
    }

    fn display_records(&mut self) -> io::Result<()> {
        if self.service.is_empty() {
            self.console.message(MessageKind::Info, "No employees found.")?;
            return self.console.pause();
        }

        let title = format!("All Employees ({} total)", self.service.len());
        let table = render_table(self.service.records(), &title);
        self.console.write(&table)?;

        let answer = self
            .console
            .prompt("\nShow details for specific employee? (y/n): ")?
            .unwrap_or_default()
            .to_ascii_lowercase();
        if matches!(answer.as_str(), "y" | "yes") {
            if let Some(index) = self.select_index()? {
                if let Ok(record) = self.service.get(index) {
                    let details = render_details(record, Some(index));
                    self.console.write(&details)?;
                }
            }
        }
        self.console.pause()
    }

    /// Returns `true` when the loop should end.
    fn quit(&mut self) -> io::Result<bool> {
        if !self.console.confirm("quit the application")? {
            self.console.message(MessageKind::Info, "Returning to main menu.")?;
            return Ok(false);
        }
        if let Err(err) = self.service.save() {
            self.report(&err, "saving employees")?;
        }
        self.console.message(
            MessageKind::Info,
            "Thank you for using the Employee Management System!",
        )?;
        Ok(true)
    }

    /// Reads a 1-based employee number and converts it to a 0-based index.
    fn select_index(&mut self) -> io::Result<Option<usize>> {
        let len = self.service.len();
        let Some(choice) = self
            .console
            .prompt_int(&format!("Enter employee number (1-{len}): "))?
        else {
            return Ok(None);
        };
        match usize::try_from(choice) {
            Ok(number) if (1..=len).contains(&number) => Ok(Some(number - 1)),
            _ => {
                self.console.message(
                    MessageKind::Error,
                    &format!("Invalid employee number. Must be between 1 and {len}."),
                )?;
                Ok(None)
            }
        }
    }

    fn cancelled(&mut self, text: &str) -> io::Result<()> {
        self.console.message(MessageKind::Info, text)?;
        self.console.pause()
    }

    fn report(&mut self, err: &RosterError, action: &str) -> io::Result<()> {
        warn!(
            "event=cli_action module=cli status=error action={} category={} error={}",
            action.replace(' ', "_"),
            err.category(),
            err
        );
        self.console.message(MessageKind::Error, &format!("Error {action}: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::App;
    use crate::console::Console;
    use roster_core::{
        load, CsvRecordStore, ReadOnlyStore, Record, RecordKind, RosterError, RosterService,
    };
    use std::fs;
    use std::path::PathBuf;

    fn run_session(path: &PathBuf, script: &str) -> String {
        let (service, status) = RosterService::open(CsvRecordStore::new(path)).unwrap();
        let console = Console::new(script.as_bytes(), Vec::new());
        let mut app = App::new(service, console);
        app.announce(status).unwrap();
        app.run().unwrap();
        let (_, console) = app.into_parts();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn create_employee_and_manager_then_quit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employee_data.csv");
        let script = "1\nE\nE001\nJohn\nDoe\nENG\n(555) 123-4567\n\n\
                      1\nM\nM001\nJane\nSmith\nITM\n555.987.6543\n0\nA-205\n\n\
                      5\ny\n";

        let output = run_session(&path, script);

        assert!(output.contains("Starting with empty database"));
        assert!(output.contains("Employee 'John Doe' created successfully!"));
        assert!(output.contains("Manager 'Jane Smith' created successfully!"));
        let records = load(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].kind(), RecordKind::Manager);
        assert_eq!(records[1].manager_details().unwrap().team_size(), 0);
    }

    #[test]
    fn invalid_input_is_reported_and_loop_continues() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employee_data.csv");
        let script = "1\nE\nE002\nBob123\nJohnson\nENG\n5551234567\n\n9\n5\ny\n";

        let output = run_session(&path, script);

        assert!(output.contains("✗ Error creating employee: first name cannot contain digits"));
        assert!(output.contains("Invalid input. Please try again."));
        assert!(output.contains("Thank you for using"));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employee_data.csv");
        roster_core::save(
            &path,
            &[Record::new_employee("E001", "John", "Doe", "ENG", "5551234567").unwrap()],
        )
        .unwrap();
        let script = "1\nE\nE001\nJane\nDoe\nENG\n5550000000\n\n";

        let output = run_session(&path, script);

        assert!(output.contains("Loaded 1 employees"));
        assert!(output.contains("employee with ID `E001` already exists"));
        assert_eq!(load(&path).unwrap().len(), 1);
    }

    #[test]
    fn edit_keeps_blank_answers_and_applies_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employee_data.csv");
        roster_core::save(
            &path,
            &[
                Record::new_manager("M001", "Jane", "Smith", "ITM", "5559876543", 8, "A-205")
                    .unwrap(),
            ],
        )
        .unwrap();
        let script = "2\n1\nJanet\n\n\n\n12\n\n\n";

        let output = run_session(&path, script);

        assert!(output.contains("Employee updated successfully!"));
        let records = load(&path).unwrap();
        assert_eq!(records[0].employee().first_name(), "Janet");
        assert_eq!(records[0].employee().last_name(), "Smith");
        assert_eq!(records[0].manager_details().unwrap().team_size(), 12);
        assert_eq!(records[0].manager_details().unwrap().office_number(), "A-205");
    }

    #[test]
    fn delete_requires_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employee_data.csv");
        roster_core::save(
            &path,
            &[
                Record::new_employee("E001", "John", "Doe", "ENG", "5551234567").unwrap(),
                Record::new_employee("E002", "Ann", "Lee", "OPS", "5550001111").unwrap(),
            ],
        )
        .unwrap();
        let script = "3\n1\nn\n\n3\n7\n\n3\n2\ny\n\n";

        let output = run_session(&path, script);

        assert!(output.contains("Delete cancelled."));
        assert!(output.contains("Invalid employee number. Must be between 1 and 2."));
        assert!(output.contains("Employee 'Ann Lee' deleted successfully!"));
        let records = load(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "E001");
    }

    #[test]
    fn unreadable_file_opens_a_session_that_never_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employee_data.csv");
        let contents = "id,first_name\nE001,John\n";
        fs::write(&path, contents).unwrap();
        let err = match RosterService::open(CsvRecordStore::new(&path)) {
            Err(RosterError::Store(err)) => err,
            _ => panic!("malformed file should fail to open"),
        };

        let store = ReadOnlyStore::new(CsvRecordStore::new(&path));
        let service = RosterService::new(store, Vec::new());
        let script = "1\nE\nE002\nAnn\nLee\nOPS\n5550001111\n\n4\n\n5\ny\n";
        let mut app = App::new(service, Console::new(script.as_bytes(), Vec::new()));
        app.announce_unreadable(&err).unwrap();
        app.run().unwrap();
        let (service, console) = app.into_parts();
        let output = String::from_utf8(console.into_output()).unwrap();

        assert!(output.contains("✗ Error loading employees: malformed record file"));
        assert!(output.contains("changes in this session will not be saved"));
        assert!(output.contains("Error creating employee: record file"));
        assert!(output.contains("No employees found."));
        assert!(output.contains("Error saving employees"));
        assert!(service.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn display_lists_records_and_details() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employee_data.csv");
        roster_core::save(
            &path,
            &[Record::new_employee("E001", "John", "Doe", "ENG", "5551234567").unwrap()],
        )
        .unwrap();
        let script = "4\ny\n1\n\n";

        let output = run_session(&path, script);

        assert!(output.contains("All Employees (1 total)"));
        assert!(output.contains("Employee Details (Index: 0)"));
        assert!(output.contains("Phone (Unformatted): 5551234567"));
    }
}
