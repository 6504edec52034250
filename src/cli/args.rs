use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;

#[derive(Parser)]
#[command(name = "school-forms")]
#[command(about = "Validate and format RUT numbers and school grades")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable debug logging (ignored when APP_ENV=production)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// RUT formatting and validation
    Rut {
        #[command(subcommand)]
        command: RutCommands,
    },
    /// Grade formatting and validation
    Grade {
        #[command(subcommand)]
        command: GradeCommands,
    },
    /// Check one value per line from a file or stdin
    Check {
        /// Kind of values to check
        #[arg(short, long)]
        kind: FieldKind,
        /// Input file path (defaults to stdin)
        #[arg(short, long)]
        file: Option<String>,
        /// Output format (defaults to OUTPUT_FORMAT)
        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Validate a complete grade entry
    Entry {
        /// Student RUT
        #[arg(long)]
        rut: String,
        /// Grade between 1.0 and 7.0
        #[arg(long, allow_hyphen_values = true)]
        grade: String,
        /// Evaluation number
        #[arg(short, long, default_value_t = 1)]
        evaluation: u32,
        /// Evaluation description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Type values into a simulated form field
    Interactive {
        /// Kind of field
        #[arg(short, long)]
        kind: FieldKind,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum RutCommands {
    /// Format a RUT as 12.345.678-9
    Format {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Check a RUT against its check digit
    Validate {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Compute the check digit of a RUT body
    CheckDigit {
        /// Digits without the check character
        body: String,
    },
    /// Render a RUT as 12345678-9
    Compact {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Subcommand)]
pub enum GradeCommands {
    /// Round and clamp a grade to the 1.0 - 7.0 scale
    Format {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Check that a grade is within the scale
    Validate {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Average several grades
    Average {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FieldKind {
    Rut,
    Grade,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Rut => write!(f, "rut"),
            FieldKind::Grade => write!(f, "grade"),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
