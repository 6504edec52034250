use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Input};
use tracing::{debug, error, info, warn};

use crate::{
    cli::args::*,
    models::{
        entry::{EntryError, GradeEntryRequest},
        grade::{average, format_grade, is_valid_grade, Grade},
        rut::{compact_rut, compute_check_digit, format_rut, validate_rut},
    },
    services::{check_file, check_reader, CheckSummary, FieldKind as ModelFieldKind, InputField},
    utils::{
        config::{Config, OutputFormat as ConfigOutputFormat},
        formatting::{format_check_table, format_field_state, format_summary, format_validity},
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");

impl From<FieldKind> for ModelFieldKind {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Rut => ModelFieldKind::Rut,
            FieldKind::Grade => ModelFieldKind::Grade,
        }
    }
}

impl From<OutputFormat> for ConfigOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => ConfigOutputFormat::Table,
            OutputFormat::Json => ConfigOutputFormat::Json,
        }
    }
}

pub struct CliApp {
    config: Config,
}

impl CliApp {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs a command. Returns `false` when the checked input was invalid.
    pub fn run(&self, command: Commands) -> Result<bool> {
        match command {
            Commands::Rut { command } => self.handle_rut_command(command),
            Commands::Grade { command } => self.handle_grade_command(command),
            Commands::Check { kind, file, format } => self.handle_check(kind, file, format),
            Commands::Entry { rut, grade, evaluation, description } => {
                self.handle_entry(&rut, &grade, evaluation, description.as_deref().unwrap_or(""))
            }
            Commands::Interactive { kind } => self.handle_interactive(kind),
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    // RUT Commands
    fn handle_rut_command(&self, command: RutCommands) -> Result<bool> {
        match command {
            RutCommands::Format { value } => {
                println!("{}", format_rut(&value));
                Ok(true)
            }
            RutCommands::Validate { value } => {
                let valid = validate_rut(&value);
                debug!("RUT '{}' valid: {}", value, valid);
                if valid {
                    println!("{} {} {}", CHECKMARK, style(format_rut(&value)).green(), format_validity(true));
                } else {
                    println!("{} {} {}", CROSS, style(&value).red(), format_validity(false));
                }
                Ok(valid)
            }
            RutCommands::CheckDigit { body } => {
                let body = body.trim();
                if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit()) {
                    bail!("RUT body must contain only digits, got '{}'", body);
                }
                println!("{}", compute_check_digit(body));
                Ok(true)
            }
            RutCommands::Compact { value } => {
                println!("{}", compact_rut(&value));
                Ok(true)
            }
        }
    }

    // Grade Commands
    fn handle_grade_command(&self, command: GradeCommands) -> Result<bool> {
        match command {
            GradeCommands::Format { value } => {
                let formatted = format_grade(&value);
                if formatted.is_empty() {
                    println!("{} No grade in '{}'", WARNING, value);
                } else {
                    println!("{}", formatted);
                }
                Ok(true)
            }
            GradeCommands::Validate { value } => {
                let valid = is_valid_grade(&value);
                debug!("Grade '{}' valid: {}", value, valid);
                let symbol = if valid { &CHECKMARK } else { &CROSS };
                println!("{} {} {}", symbol, value, format_validity(valid));
                Ok(valid)
            }
            GradeCommands::Average { values } => self.handle_average(&values),
        }
    }

    fn handle_average(&self, values: &[String]) -> Result<bool> {
        let mut grades = Vec::with_capacity(values.len());
        for value in values {
            match Grade::parse(value).with_context(|| format!("Invalid grade '{}'", value))? {
                Some(grade) => grades.push(grade),
                None => debug!("Skipping empty grade '{}'", value),
            }
        }

        match average(&grades) {
            Some(mean) => {
                let styled = if mean.is_passing() {
                    style(mean.to_string()).green()
                } else {
                    style(mean.to_string()).red()
                };
                println!("{} Average of {} grades: {}", INFO, grades.len(), styled);
            }
            None => println!("{} No grades to average", WARNING),
        }

        Ok(true)
    }

    // Batch check
    fn handle_check(&self, kind: FieldKind, file: Option<String>, format: Option<OutputFormat>) -> Result<bool> {
        let kind = ModelFieldKind::from(kind);
        let format = format.map(ConfigOutputFormat::from).unwrap_or(self.config.output_format);

        let outcomes = match file {
            Some(path) => check_file(kind, Path::new(&path))?,
            None => check_reader(kind, io::stdin().lock())?,
        };
        let summary = CheckSummary::from_outcomes(&outcomes);
        info!("Check finished: {} valid, {} invalid", summary.valid, summary.invalid);

        match format {
            ConfigOutputFormat::Json => {
                let report = serde_json::json!({
                    "kind": kind,
                    "summary": summary,
                    "results": outcomes,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            ConfigOutputFormat::Table => {
                if outcomes.is_empty() {
                    println!("{} No values found", INFO);
                } else {
                    println!("{}", format_check_table(&outcomes));
                    println!("{}", format_summary(&summary));
                }
            }
        }

        Ok(summary.all_valid())
    }

    fn handle_entry(&self, rut: &str, grade: &str, evaluation: u32, description: &str) -> Result<bool> {
        match GradeEntryRequest::new(rut, grade, evaluation, description) {
            Ok(entry) => {
                println!("{} Grade entry is valid", CHECKMARK);
                println!("RUT: {}", style(&entry.rut).green());
                println!("Grade: {}", style(&entry.grade).green());
                println!("Evaluation: {}", entry.evaluation_number);
                if !entry.description.is_empty() {
                    println!("Description: {}", style(&entry.description).dim());
                }
                info!("Grade entry accepted for {}", entry.rut);
                Ok(true)
            }
            Err(EntryError::ValidationError(errors)) => {
                println!("{} Grade entry is invalid", CROSS);
                for (field, field_errors) in errors.field_errors() {
                    for field_error in field_errors {
                        let reason = field_error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| field_error.code.to_string());
                        println!("  {}: {}", style(field).bold(), style(reason).red());
                    }
                }
                warn!("Grade entry rejected: {}", errors);
                Ok(false)
            }
        }
    }

    fn handle_interactive(&self, kind: FieldKind) -> Result<bool> {
        let kind = ModelFieldKind::from(kind);
        let theme = ColorfulTheme::default();
        let mut field = InputField::new(kind);

        println!("{} Type a {} value, empty line to quit", INFO, style(kind).cyan());

        loop {
            let line: String = Input::with_theme(&theme)
                .with_prompt(kind.to_string())
                .allow_empty(true)
                .interact_text()
                .map_err(|e| {
                    error!("Prompt failed: {}", e);
                    e
                })?;

            if line.trim().is_empty() {
                break;
            }

            field.clear();
            let dropped = field.type_str(&line);
            let state = field.on_blur();

            println!("  {} {}", style(field.value()).bold(), format_field_state(state));
            if dropped > 0 {
                println!("  {} {} keys were rejected", WARNING, dropped);
            }
        }

        Ok(true)
    }

    fn handle_config_command(&self, command: ConfigCommands) -> Result<bool> {
        match command {
            ConfigCommands::Show => {
                println!("{} {}", INFO, style("Configuration").bold().cyan());
                println!("Log level: {}", style(&self.config.log_level).green());
                println!("Environment: {}", style(&self.config.environment).green());
                println!("Output format: {}", style(self.config.output_format).green());
            }
        }
        Ok(true)
    }
}
