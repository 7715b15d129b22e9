use roster_core::{Record, RecordError, RecordField, RecordKind};

#[test]
fn employee_fields_read_back_after_normalization() {
    let record = Record::new_employee("E001", "John", "Doe", "ENG", "(555) 123-4567").unwrap();
    let employee = record.employee();

    assert_eq!(record.kind(), RecordKind::Employee);
    assert_eq!(employee.id(), "E001");
    assert_eq!(employee.first_name(), "John");
    assert_eq!(employee.last_name(), "Doe");
    assert_eq!(employee.department(), "ENG");
    assert_eq!(employee.phone_digits(), "5551234567");
    assert_eq!(employee.display_phone(), "(555)123-4567");
    assert!(record.manager_details().is_none());
}

#[test]
fn manager_fields_read_back_after_normalization() {
    let record =
        Record::new_manager("M001", "Jane", "Smith", "ITM", "555.987.6543", 8, "  A-205 ").unwrap();

    assert!(record.is_manager());
    assert_eq!(record.employee().phone_digits(), "5559876543");
    let details = record.manager_details().unwrap();
    assert_eq!(details.team_size(), 8);
    assert_eq!(details.office_number(), "A-205");
}

#[test]
fn construction_rejects_each_invalid_field() {
    let cases = [
        (("", "Ann", "Lee", "ENG", "5551234567"), RecordError::EmptyId),
        (
            ("E002", "", "Smith", "ENG", "1234567890"),
            RecordError::EmptyName(RecordField::FirstName),
        ),
        (
            ("E003", "Bob123", "Johnson", "ENG", "1234567890"),
            RecordError::NameContainsDigit(RecordField::FirstName),
        ),
        (
            ("E004", "Alice", "Brown456", "ENG", "1234567890"),
            RecordError::NameContainsDigit(RecordField::LastName),
        ),
        (
            ("E005", "Charlie", "Wilson", "ENGR", "1234567890"),
            RecordError::DepartmentLength { actual: 4 },
        ),
        (
            ("E006", "David", "Garcia", "eng", "1234567890"),
            RecordError::DepartmentNotUppercase,
        ),
        (
            ("E007", "Eva", "Martinez", "E1G", "1234567890"),
            RecordError::DepartmentNotAlphabetic,
        ),
        (
            ("E008", "Frank", "Lopez", "ENG", "12345"),
            RecordError::PhoneDigitCount { actual: 5 },
        ),
        (
            ("E011", "Iris", "Moore", "ENG", ""),
            RecordError::EmptyPhone,
        ),
    ];

    for ((id, first, last, dept, phone), expected) in cases {
        let err = Record::new_employee(id, first, last, dept, phone).unwrap_err();
        assert_eq!(err, expected, "case id={id:?}");
    }
}

#[test]
fn manager_construction_rejects_bad_extension_fields() {
    let negative =
        Record::new_manager("M002", "John", "Manager", "ITM", "5551234567", -1, "B-101")
            .unwrap_err();
    assert_eq!(negative, RecordError::NegativeTeamSize(-1));

    let blank_office =
        Record::new_manager("M004", "Mike", "Lead", "ITM", "5551234567", 5, "   ").unwrap_err();
    assert_eq!(blank_office, RecordError::EmptyOfficeNumber);
}

#[test]
fn setters_keep_previous_value_on_failure() {
    let mut record = Record::new_employee("E001", "John", "Doe", "ENG", "5551234567").unwrap();
    let employee = record.employee_mut();

    assert!(employee.set_first_name("J0hn").is_err());
    assert!(employee.set_last_name("   ").is_err());
    assert!(employee.set_department("EN").is_err());
    assert!(employee.set_phone("555-1234").is_err());

    assert_eq!(employee.first_name(), "John");
    assert_eq!(employee.last_name(), "Doe");
    assert_eq!(employee.department(), "ENG");
    assert_eq!(employee.phone_digits(), "5551234567");

    employee.set_phone("(212) 555-0100").unwrap();
    assert_eq!(employee.display_phone(), "(212)555-0100");
}

#[test]
fn id_assignment_always_fails() {
    let mut record = Record::new_employee("R001", "Read", "Only", "TST", "5551234567").unwrap();
    for candidate in ["MODIFIED", "R001", ""] {
        let err = record.set_field(RecordField::Id, candidate).unwrap_err();
        assert_eq!(err, RecordError::ImmutableId("R001".to_string()));
        assert!(err.is_identity());
    }
    assert_eq!(record.id(), "R001");
}

#[test]
fn shared_fields_follow_the_same_rules_for_both_kinds() {
    let mut employee = Record::new_employee("E1", "Poly", "Employee", "ENG", "5551111111").unwrap();
    let mut manager =
        Record::new_manager("M1", "Poly", "Manager", "ITM", "5552222222", 3, "C-301").unwrap();

    for record in [&mut employee, &mut manager] {
        let err = record.set_field(RecordField::Department, "it").unwrap_err();
        assert_eq!(err, RecordError::DepartmentLength { actual: 2 });
        record.set_field(RecordField::Phone, "555 333 4444").unwrap();
        assert_eq!(record.employee().phone_digits(), "5553334444");
    }
}

#[test]
fn record_serializes_as_flat_row() {
    let record =
        Record::new_manager("M001", "Jane", "Smith", "ITM", "555.987.6543", 0, "A-205").unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["id"], "M001");
    assert_eq!(json["phone"], "5559876543");
    assert_eq!(json["team_size"], "0");
    assert_eq!(json["office_number"], "A-205");

    let decoded: Record = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn deserialize_rejects_invalid_department() {
    let value = serde_json::json!({
        "id": "E001",
        "first_name": "John",
        "last_name": "Doe",
        "department": "eng",
        "phone": "5551234567",
        "team_size": null,
        "office_number": null
    });

    let err = serde_json::from_value::<Record>(value).unwrap_err();
    assert!(
        err.to_string().contains("department must be uppercase letters"),
        "unexpected error: {err}"
    );
}
