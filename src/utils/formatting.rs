use console::style;
use tabled::{settings::{Alignment, Style}, Table, Tabled};

use crate::services::check_service::{CheckOutcome, CheckSummary};
use crate::services::field_service::FieldState;

#[derive(Tabled)]
struct CheckTableRow {
    #[tabled(rename = "#")]
    line: usize,
    #[tabled(rename = "Input")]
    input: String,
    #[tabled(rename = "Normalized")]
    normalized: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn format_check_table(outcomes: &[CheckOutcome]) -> String {
    if outcomes.is_empty() {
        return String::new();
    }

    let rows: Vec<CheckTableRow> = outcomes
        .iter()
        .enumerate()
        .map(|(i, outcome)| CheckTableRow {
            line: i + 1,
            input: truncate(&outcome.input, 30),
            normalized: if outcome.normalized.is_empty() {
                "-".to_string()
            } else {
                outcome.normalized.clone()
            },
            status: format_validity(outcome.valid),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_summary(summary: &CheckSummary) -> String {
    format!(
        "{}: {}  {}: {}  {}: {}",
        style("Total").bold(),
        summary.total,
        style("Valid").bold(),
        style(summary.valid).green(),
        style("Invalid").bold(),
        style(summary.invalid).red(),
    )
}

pub fn format_validity(valid: bool) -> String {
    if valid {
        style("Valid").green().to_string()
    } else {
        style("Invalid").red().to_string()
    }
}

pub fn format_field_state(state: FieldState) -> String {
    match state {
        FieldState::Neutral => style("Neutral").dim().to_string(),
        FieldState::Valid => style("Valid").green().to_string(),
        FieldState::Invalid => style("Invalid").red().to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        assert_eq!(format_check_table(&[]), "");
    }

    #[test]
    fn test_table_contains_values() {
        let outcomes = vec![CheckOutcome {
            input: "123456785".to_string(),
            normalized: "12.345.678-5".to_string(),
            valid: true,
        }];
        let table = format_check_table(&outcomes);
        assert!(table.contains("Normalized"));
        assert!(table.contains("12.345.678-5"));
        assert!(table.contains("Valid"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate(&"9".repeat(40), 10), "9999999...");
    }
}
