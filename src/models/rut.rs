use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RutError {
    #[error("RUT is empty")]
    Empty,

    #[error("RUT is too short: '{0}'")]
    TooShort(String),

    #[error("RUT body must contain only digits: '{0}'")]
    InvalidBody(String),

    #[error("Check digit mismatch: expected {expected}, found {found}")]
    CheckDigitMismatch { expected: String, found: String },
}

/// Keeps ASCII digits and `K`, uppercasing the letter.
fn strip_rut(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'k' || *c == 'K')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Splits a stripped RUT into `(body, check)`. The input must be non-empty.
fn split_check(stripped: &str) -> (&str, char) {
    let mut chars = stripped.chars();
    let check = chars.next_back().unwrap_or('0');
    (chars.as_str(), check)
}

/// Inserts `.` thousands separators into a RUT body.
///
/// A separator goes before every position whose following run of digits
/// has a length that is a positive multiple of three. Letters in the body
/// break the run, so they are never grouped.
fn group_thousands(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();

    // runs[i]: length of the digit run starting at i
    let mut runs = vec![0usize; chars.len() + 1];
    for i in (0..chars.len()).rev() {
        if chars[i].is_ascii_digit() {
            runs[i] = runs[i + 1] + 1;
        }
    }

    let mut grouped = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && runs[i] > 0 && runs[i] % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    grouped
}

/// Formats a RUT as the user types it, e.g. `123456785` -> `12.345.678-5`.
///
/// Every character other than digits and `K` is dropped first, so feeding
/// an already formatted value back in yields the same string.
pub fn format_rut(input: &str) -> String {
    let rut = strip_rut(input);
    if rut.is_empty() {
        return String::new();
    }

    let (body, check) = split_check(&rut);
    if body.is_empty() {
        return check.to_string();
    }

    format!("{}-{}", group_thousands(body), check)
}

/// Computes the modulo 11 check character for a RUT body.
///
/// The body must contain only decimal digits; callers validate that first.
pub fn compute_check_digit(body: &str) -> String {
    let sum: u64 = body
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .zip((2..=7).cycle())
        .map(|(digit, weight)| u64::from(digit * weight))
        .sum();

    match 11 - sum % 11 {
        11 => "0".to_string(),
        10 => "K".to_string(),
        n => n.to_string(),
    }
}

/// Returns `true` when the input is a RUT with a matching check character.
///
/// Separators and stray characters are ignored. Never panics.
pub fn validate_rut(input: &str) -> bool {
    if input.chars().count() < 3 {
        return false;
    }

    let rut = strip_rut(input);
    if rut.chars().count() < 2 {
        return false;
    }

    let (body, check) = split_check(&rut);
    if !body.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    compute_check_digit(body) == check.to_string()
}

/// Trims the input, removes dots and dashes and uppercases it.
///
/// Unlike [`format_rut`] any other character is kept as is.
pub fn clean_rut(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '.' && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

/// Renders a RUT in its storage form `XXXXXXXX-X`.
pub fn compact_rut(input: &str) -> String {
    let cleaned = clean_rut(input);
    if cleaned.chars().count() < 2 {
        return cleaned;
    }

    let (body, check) = split_check(&cleaned);
    format!("{}-{}", body, check)
}

/// A RUT whose check character has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rut {
    body: String,
    check: char,
}

impl Rut {
    pub fn parse(input: &str) -> Result<Self, RutError> {
        if input.trim().is_empty() {
            return Err(RutError::Empty);
        }

        let rut = strip_rut(input);
        if rut.chars().count() < 2 {
            return Err(RutError::TooShort(input.to_string()));
        }

        let (body, check) = split_check(&rut);
        if !body.chars().all(|c| c.is_ascii_digit()) {
            return Err(RutError::InvalidBody(body.to_string()));
        }

        let expected = compute_check_digit(body);
        if expected != check.to_string() {
            return Err(RutError::CheckDigitMismatch {
                expected,
                found: check.to_string(),
            });
        }

        Ok(Self {
            body: body.to_string(),
            check,
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn check_char(&self) -> char {
        self.check
    }

    pub fn compact(&self) -> String {
        format!("{}-{}", self.body, self.check)
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", group_thousands(&self.body), self.check)
    }
}

impl FromStr for Rut {
    type Err = RutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rut::parse(s)
    }
}

impl Serialize for Rut {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rut {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rut::parse(&raw).map_err(serde::de::Error::custom)
    }
}
