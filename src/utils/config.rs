use std::env;
use thiserror::Error;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OUTPUT_FORMAT must be 'table' or 'json', got '{0}'")]
    InvalidOutputFormat(String),

    #[error("LOG_LEVEL must be one of trace, debug, info, warn, error, got '{0}'")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub environment: String,
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            environment: "development".to_string(),
            output_format: OutputFormat::Table,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Self::from_vars(
            env::var("LOG_LEVEL").ok(),
            env::var("APP_ENV").ok(),
            env::var("OUTPUT_FORMAT").ok(),
        )?;

        tracing::debug!("Config: loaded for {} environment", config.environment);
        Ok(config)
    }

    /// Builds a config from raw variable values, falling back to defaults.
    pub fn from_vars(
        log_level: Option<String>,
        environment: Option<String>,
        output_format: Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Config::default();
        let config = Config {
            log_level: log_level
                .map(|level| level.trim().to_lowercase())
                .unwrap_or(defaults.log_level),
            environment: environment.unwrap_or(defaults.environment),
            output_format: match output_format {
                Some(format) => format.parse()?,
                None => defaults.output_format,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Log level to run with. `--verbose` raises it to debug outside production.
    pub fn effective_log_level(&self, verbose: bool) -> &str {
        if verbose && !self.is_production() {
            "debug"
        } else {
            &self.log_level
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(None, None, None).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.environment, "development");
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(
            Some("DEBUG".to_string()),
            Some("production".to_string()),
            Some("json".to_string()),
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(config.is_production());
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert_eq!(
            Config::from_vars(None, None, Some("xml".to_string())).unwrap_err(),
            ConfigError::InvalidOutputFormat("xml".to_string())
        );
        assert_eq!(
            Config::from_vars(Some("loud".to_string()), None, None).unwrap_err(),
            ConfigError::InvalidLogLevel("loud".to_string())
        );
    }

    #[test]
    fn test_verbose_is_ignored_in_production() {
        let development = Config::default();
        assert_eq!(development.effective_log_level(false), "info");
        assert_eq!(development.effective_log_level(true), "debug");

        let production = Config::from_vars(
            Some("warn".to_string()),
            Some("production".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(production.effective_log_level(true), "warn");
        assert_eq!(production.effective_log_level(false), "warn");
    }

    #[test]
    fn test_error_messages_name_the_variable() {
        let err = Config::from_vars(None, None, Some("xml".to_string())).unwrap_err();
        assert!(err.to_string().contains("OUTPUT_FORMAT"));
        assert!(err.to_string().contains("xml"));

        let err = Config::from_vars(Some("loud".to_string()), None, None).unwrap_err();
        assert!(err.to_string().contains("LOG_LEVEL"));
    }
}
