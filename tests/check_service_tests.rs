use std::io::Write;

use school_forms::services::{check_file, CheckSummary, FieldKind, FieldState, InputField};
use tempfile::NamedTempFile;

fn write_input(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_check_rut_file() {
    let file = write_input(&["12.345.678-5", "", "12345678-0", "7775735k"]);

    let outcomes = check_file(FieldKind::Rut, file.path()).unwrap();
    let summary = CheckSummary::from_outcomes(&outcomes);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.invalid, 1);
    assert_eq!(outcomes[2].normalized, "7.775.735-K");
}

#[test]
fn test_check_grade_file() {
    let file = write_input(&["4,5", "-", "7.5", "abc"]);

    let outcomes = check_file(FieldKind::Grade, file.path()).unwrap();
    let valid: Vec<bool> = outcomes.iter().map(|o| o.valid).collect();

    assert_eq!(valid, vec![true, true, false, false]);
}

#[test]
fn test_check_missing_file_fails() {
    let result = check_file(FieldKind::Rut, std::path::Path::new("/nonexistent/ruts.txt"));
    assert!(result.is_err());
}

#[test]
fn test_outcomes_serialize_to_json() {
    let file = write_input(&["123456785"]);
    let outcomes = check_file(FieldKind::Rut, file.path()).unwrap();

    let json = serde_json::to_value(&outcomes).unwrap();
    assert_eq!(json[0]["normalized"], "12.345.678-5");
    assert_eq!(json[0]["valid"], true);
}

#[test]
fn test_field_round_trip_through_events() {
    let mut rut = InputField::new(FieldKind::Rut);
    rut.type_str("11111111-1");
    assert_eq!(rut.value(), "11.111.111-1");
    assert_eq!(rut.on_blur(), FieldState::Valid);

    let mut grade = InputField::new(FieldKind::Grade);
    grade.type_str("0");
    assert_eq!(grade.value(), "");
    grade.type_str("6,25");
    assert_eq!(grade.on_blur(), FieldState::Valid);
    assert_eq!(grade.value(), "6.3");
}
