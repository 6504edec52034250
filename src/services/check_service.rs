use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

use crate::models::grade::{format_grade, is_valid_grade};
use crate::models::rut::{format_rut, validate_rut};
use crate::services::field_service::FieldKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub input: String,
    pub normalized: String,
    pub valid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl CheckSummary {
    pub fn from_outcomes(outcomes: &[CheckOutcome]) -> Self {
        let valid = outcomes.iter().filter(|o| o.valid).count();
        Self {
            total: outcomes.len(),
            valid,
            invalid: outcomes.len() - valid,
        }
    }

    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}

pub fn check_value(kind: FieldKind, input: &str) -> CheckOutcome {
    let input = input.trim();
    let (normalized, valid) = match kind {
        FieldKind::Rut => (format_rut(input), validate_rut(input)),
        FieldKind::Grade => (format_grade(input), is_valid_grade(input)),
    };

    if !valid {
        warn!("Rejected {} value '{}'", kind, input);
    }

    CheckOutcome {
        input: input.to_string(),
        normalized,
        valid,
    }
}

/// Checks every non-blank line.
pub fn check_values<I, S>(kind: FieldKind, lines: I) -> Vec<CheckOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|line| !line.as_ref().trim().is_empty())
        .map(|line| check_value(kind, line.as_ref()))
        .collect()
}

pub fn check_reader<R: Read>(kind: FieldKind, reader: R) -> Result<Vec<CheckOutcome>> {
    let lines = BufReader::new(reader)
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .context("Failed to read input lines")?;

    let outcomes = check_values(kind, &lines);
    info!("Checked {} {} values", outcomes.len(), kind);
    Ok(outcomes)
}

pub fn check_file(kind: FieldKind, path: &Path) -> Result<Vec<CheckOutcome>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    check_reader(kind, file)
}
