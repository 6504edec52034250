use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::grade::{format_grade, is_valid_grade, parse_decimal, GRADE_MAX, NO_GRADE};
use crate::models::rut::{format_rut, validate_rut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Rut,
    Grade,
}

/// Visual state a UI renders for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Rut => write!(f, "rut"),
            FieldKind::Grade => write!(f, "grade"),
        }
    }
}

impl std::fmt::Display for FieldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldState::Neutral => write!(f, "neutral"),
            FieldState::Valid => write!(f, "valid"),
            FieldState::Invalid => write!(f, "invalid"),
        }
    }
}

/// A form input bound to one of the validators.
///
/// The UI forwards its key, input and blur events here and renders
/// `value` and `state` back. Nothing in here touches a real widget.
#[derive(Debug, Clone)]
pub struct InputField {
    kind: FieldKind,
    value: String,
    state: FieldState,
}

impl InputField {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            value: String::new(),
            state: FieldState::Neutral,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Whether a typed character should reach the field at all.
    pub fn accepts_key(&self, ch: char) -> bool {
        match self.kind {
            FieldKind::Rut => matches!(ch.to_ascii_uppercase(), '0'..='9' | 'K' | '.' | '-'),
            FieldKind::Grade => {
                if !matches!(ch, '0'..='9' | '.' | ',') {
                    return false;
                }

                let is_separator = ch == '.' || ch == ',';
                if is_separator && self.value.contains(['.', ',']) {
                    return false;
                }

                if self.value.is_empty() && !matches!(ch, '1'..='7') {
                    return false;
                }

                true
            }
        }
    }

    /// Applies an input change and returns how far the cursor should move.
    ///
    /// RUT fields are reformatted on every change. Grade fields keep the
    /// typed text but flag obviously impossible entries right away.
    pub fn on_input(&mut self, new_value: &str) -> isize {
        let old_len = new_value.chars().count() as isize;
        self.state = FieldState::Neutral;

        match self.kind {
            FieldKind::Rut => {
                self.value = format_rut(new_value);
                self.value.chars().count() as isize - old_len
            }
            FieldKind::Grade => {
                self.value = new_value.to_string();
                let trimmed = new_value.trim();

                if matches!(trimmed, "0" | "8" | "9") {
                    self.value.clear();
                    self.state = FieldState::Invalid;
                }

                if let Some(value) = parse_decimal(&trimmed.replacen(',', ".", 1)) {
                    if value > GRADE_MAX {
                        self.state = FieldState::Invalid;
                    }
                }

                0
            }
        }
    }

    /// Validates the field when it loses focus.
    pub fn on_blur(&mut self) -> FieldState {
        let trimmed = self.value.trim().to_string();

        self.state = match self.kind {
            FieldKind::Rut if trimmed.is_empty() => FieldState::Neutral,
            FieldKind::Rut if validate_rut(&trimmed) => FieldState::Valid,
            FieldKind::Rut => FieldState::Invalid,
            FieldKind::Grade if trimmed.is_empty() || trimmed == NO_GRADE => FieldState::Neutral,
            FieldKind::Grade => {
                self.value = format_grade(&trimmed);
                if is_valid_grade(&self.value) {
                    FieldState::Valid
                } else {
                    FieldState::Invalid
                }
            }
        };

        debug!("{} field blurred with '{}': {}", self.kind, self.value, self.state);
        self.state
    }

    /// Types text one key at a time. Returns how many keys were rejected.
    pub fn type_str(&mut self, text: &str) -> usize {
        let mut rejected = 0;
        for ch in text.chars() {
            if !self.accepts_key(ch) {
                rejected += 1;
                continue;
            }
            let mut next = self.value.clone();
            next.push(ch);
            self.on_input(&next);
        }
        rejected
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.state = FieldState::Neutral;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rut_keys() {
        let field = InputField::new(FieldKind::Rut);
        assert!(field.accepts_key('7'));
        assert!(field.accepts_key('k'));
        assert!(field.accepts_key('-'));
        assert!(!field.accepts_key('a'));
        assert!(!field.accepts_key(' '));
    }

    #[test]
    fn test_rut_input_formats_and_shifts_cursor() {
        let mut field = InputField::new(FieldKind::Rut);
        let shift = field.on_input("123456785");
        assert_eq!(field.value(), "12.345.678-5");
        assert_eq!(shift, 3);
        assert_eq!(field.state(), FieldState::Neutral);
    }

    #[test]
    fn test_rut_typing_and_blur() {
        let mut field = InputField::new(FieldKind::Rut);
        assert_eq!(field.type_str("7775735k"), 0);
        assert_eq!(field.value(), "7.775.735-K");
        assert_eq!(field.on_blur(), FieldState::Valid);

        field.clear();
        field.type_str("12345678-0");
        assert_eq!(field.on_blur(), FieldState::Invalid);

        field.clear();
        assert_eq!(field.on_blur(), FieldState::Neutral);
    }

    #[test]
    fn test_grade_keys() {
        let mut field = InputField::new(FieldKind::Grade);
        assert!(!field.accepts_key('0'));
        assert!(!field.accepts_key('8'));
        assert!(field.accepts_key('5'));
        assert!(!field.accepts_key('x'));

        field.on_input("5,");
        assert!(!field.accepts_key('.'));
        assert!(!field.accepts_key(','));
        assert!(field.accepts_key('0'));
    }

    #[test]
    fn test_grade_input_flags_impossible_values() {
        let mut field = InputField::new(FieldKind::Grade);
        field.on_input("9");
        assert_eq!(field.value(), "");
        assert_eq!(field.state(), FieldState::Invalid);

        field.on_input("7.5");
        assert_eq!(field.state(), FieldState::Invalid);

        field.on_input("6.5");
        assert_eq!(field.state(), FieldState::Neutral);
    }

    #[test]
    fn test_grade_blur_formats() {
        let mut field = InputField::new(FieldKind::Grade);
        assert_eq!(field.type_str("x5,5.5"), 2);
        assert_eq!(field.value(), "5,55");
        assert_eq!(field.on_blur(), FieldState::Valid);
        assert_eq!(field.value(), "5.6");
    }

    #[test]
    fn test_grade_blur_placeholder_is_neutral() {
        let mut field = InputField::new(FieldKind::Grade);
        field.on_input("-");
        assert_eq!(field.on_blur(), FieldState::Neutral);
        assert_eq!(field.value(), "-");
    }

    #[test]
    fn test_grade_blur_clamps_pasted_value() {
        let mut field = InputField::new(FieldKind::Grade);
        field.on_input("75");
        assert_eq!(field.state(), FieldState::Invalid);
        assert_eq!(field.on_blur(), FieldState::Valid);
        assert_eq!(field.value(), "7.0");
    }
}
