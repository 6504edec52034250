use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

pub const GRADE_MIN: f64 = 1.0;
pub const GRADE_MAX: f64 = 7.0;
pub const PASSING_GRADE: f64 = 4.0;

/// Placeholder shown in grade cells with no grade entered.
pub const NO_GRADE: &str = "-";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradeError {
    #[error("Grade is not a number: '{0}'")]
    Unparsable(String),

    #[error("Grade {0} is out of range [1.0, 7.0]")]
    OutOfRange(f64),
}

lazy_static::lazy_static! {
    static ref DECIMAL_PREFIX_REGEX: Regex =
        Regex::new(r"^[+-]?(Infinity|([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?)").unwrap();
}

/// Parses the leading decimal literal of the input.
///
/// Surrounding whitespace is ignored and trailing garbage after the number
/// is dropped, so `"4.5 pts"` gives `4.5`. Only `.` is a decimal separator.
/// A signed `Infinity` literal is accepted too.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let literal = DECIMAL_PREFIX_REGEX.find(input.trim())?;
    literal.as_str().parse::<f64>().ok()
}

/// Swaps the first comma for a dot before parsing.
fn parse_grade_input(input: &str) -> Option<f64> {
    parse_decimal(&input.replacen(',', ".", 1))
}

fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// Rounds half up on the tenths, ties toward positive infinity.
fn round_tenths(value: f64) -> f64 {
    let scaled = value * 10.0;
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / 10.0
}

fn in_range(value: f64) -> bool {
    (GRADE_MIN..=GRADE_MAX).contains(&value)
}

/// Returns `true` for a grade in `[1.0, 7.0]` or for "no grade".
///
/// Empty, whitespace-only and `"-"` inputs count as "no grade". A comma is
/// accepted as decimal separator.
pub fn is_valid_grade(input: &str) -> bool {
    if is_blank(input) || input == NO_GRADE {
        return true;
    }

    match parse_grade_input(input) {
        Some(value) => in_range(value),
        None => false,
    }
}

/// Normalizes a grade entry to one decimal within `[1.0, 7.0]`.
///
/// Out of range values are clamped. Blank or unparsable input gives an
/// empty string.
pub fn format_grade(input: &str) -> String {
    if is_blank(input) {
        return String::new();
    }

    match parse_grade_input(input) {
        Some(value) if !value.is_nan() => Grade::clamped(value).to_string(),
        _ => String::new(),
    }
}

/// A grade on the 1.0 to 7.0 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Grade(f64);

impl Grade {
    pub fn new(value: f64) -> Result<Self, GradeError> {
        if !value.is_finite() || !in_range(value) {
            return Err(GradeError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Rounds to one decimal and clamps into range.
    pub fn clamped(value: f64) -> Self {
        Self(round_tenths(value).clamp(GRADE_MIN, GRADE_MAX))
    }

    /// Parses a typed grade. Returns `Ok(None)` when no grade was entered.
    pub fn parse(input: &str) -> Result<Option<Self>, GradeError> {
        if is_blank(input) || input.trim() == NO_GRADE {
            return Ok(None);
        }

        let value =
            parse_grade_input(input).ok_or_else(|| GradeError::Unparsable(input.to_string()))?;
        Self::new(value).map(Some)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_passing(&self) -> bool {
        self.0 >= PASSING_GRADE
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Grade::new(value).map_err(serde::de::Error::custom)
    }
}

/// Mean of the grades, rounded to one decimal. `None` when empty.
pub fn average(grades: &[Grade]) -> Option<Grade> {
    if grades.is_empty() {
        return None;
    }

    let sum: f64 = grades.iter().map(Grade::value).sum();
    Some(Grade::clamped(sum / grades.len() as f64))
}
