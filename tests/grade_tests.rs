use school_forms::models::grade::{average, GRADE_MAX, GRADE_MIN};
use school_forms::{format_grade, is_valid_grade, Grade};

#[test]
fn test_spec_examples() {
    assert_eq!(format_grade(""), "");
    assert_eq!(format_grade("abc"), "");
    assert_eq!(format_grade("8"), "7.0");
    assert_eq!(format_grade("0.5"), "1.0");
    assert_eq!(format_grade("4,5"), "4.5");
    assert!(is_valid_grade("-"));
    assert!(is_valid_grade(""));
    assert!(!is_valid_grade("7.1"));
}

#[test]
fn test_formatted_grades_are_always_valid() {
    let mut tenths = 0;
    while tenths <= 80 {
        let value = tenths as f64 / 10.0;
        let formatted = format_grade(&value.to_string());
        assert!(
            is_valid_grade(&formatted),
            "format_grade({}) gave rejected '{}'",
            value,
            formatted
        );
        tenths += 1;
    }

    for raw in ["1", "1.04", "3.33333", "6.95", "6,99", "7", "1e1", "-0.2"] {
        assert!(is_valid_grade(&format_grade(raw)), "Rejected output for '{}'", raw);
    }
}

#[test]
fn test_formatted_grades_have_one_decimal() {
    for raw in ["1", "2.25", "4,5", "6.96", "100"] {
        let formatted = format_grade(raw);
        let (_, decimals) = formatted.split_once('.').unwrap();
        assert_eq!(decimals.len(), 1, "'{}' formatted as '{}'", raw, formatted);
    }
}

#[test]
fn test_grade_bounds_are_inclusive() {
    assert!(is_valid_grade(&GRADE_MIN.to_string()));
    assert!(is_valid_grade(&GRADE_MAX.to_string()));
    assert!(Grade::new(GRADE_MIN).is_ok());
    assert!(Grade::new(GRADE_MAX).is_ok());
}

#[test]
fn test_average_of_parsed_grades() {
    let grades: Vec<Grade> = ["5,0", "-", "6.0", ""]
        .iter()
        .filter_map(|raw| Grade::parse(raw).unwrap())
        .collect();

    assert_eq!(grades.len(), 2);
    assert_eq!(average(&grades).unwrap().to_string(), "5.5");
}
