//! Configuration management for the evaluator tooling.
//!
//! Settings are layered, later sources overriding earlier ones:
//! 1. Built-in defaults
//! 2. `circuit-fingerprint.toml` in the working directory (or the file named by `CFC_CONFIG`)
//! 3. Environment variables prefixed with `CFC_` (e.g. `CFC_SCORING__TOP_K=5`)
//!
//! Command-line flags are applied on top by the CLI.
//!
//! ## Example Configuration
//!
//! ```toml
//! [scoring]
//! top_k = 10
//!
//! [validation]
//! fail_fast = false
//!
//! [telemetry]
//! log_level = "warn"
//! json_logging = false
//!
//! [output]
//! colored = true
//! format = "table"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file stem, resolved relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "circuit-fingerprint";

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "CFC_CONFIG";

/// Environment variable prefix for individual settings
pub const ENV_PREFIX: &str = "CFC";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_OUTPUT_FORMATS: [&str; 3] = ["table", "json", "plain"];

/// Main evaluator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Scoring settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    /// Number of worst and best tasks to print
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

/// Submission validation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Stop at the first violation instead of collecting all of them
    #[serde(default)]
    pub fail_fast: bool,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging format
    #[serde(default)]
    pub json_logging: bool,
}

/// Terminal output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Enable colored output
    #[serde(default = "default_colored")]
    pub colored: bool,

    /// Default output format (table, json, plain)
    #[serde(default = "default_format")]
    pub format: String,
}

// Default value functions
fn default_top_k() -> usize {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_colored() -> bool {
    true
}

fn default_format() -> String {
    "table".to_string()
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            colored: default_colored(),
            format: default_format(),
        }
    }
}

impl EvaluatorConfig {
    /// Load configuration from the default file (if present) and the environment.
    ///
    /// `CFC_CONFIG` names an explicit file, which must then exist.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from(Some(Path::new(&path))),
            Err(_) => Self::load_from(None),
        }
    }

    /// Load configuration from an explicit file (required) or the default file
    /// (optional), followed by environment variables.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file_source = match path {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = ::config::Config::builder()
            .add_source(file_source)
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: EvaluatorConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.scoring.top_k == 0 {
            anyhow::bail!("scoring.top_k must be greater than 0");
        }

        if !VALID_LOG_LEVELS.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                VALID_LOG_LEVELS.join(", ")
            );
        }

        if !VALID_OUTPUT_FORMATS.contains(&self.output.format.as_str()) {
            anyhow::bail!(
                "Invalid output format '{}'. Must be one of: {}",
                self.output.format,
                VALID_OUTPUT_FORMATS.join(", ")
            );
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration")
    }
}
