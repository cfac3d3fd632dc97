//! Circuit Fingerprint Challenge CLI
//!
//! Organizer tooling for validating and scoring holdout submissions.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use circuit_fingerprint_cli::commands::score::ScoreArgs;
use circuit_fingerprint_cli::commands::validate::ValidateArgs;
use circuit_fingerprint_cli::commands::{self, score, validate, CommandContext};
use circuit_fingerprint_cli::output::OutputFormat;
use circuit_fingerprint_common::{init_tracing, EvaluatorConfig};
use circuit_fingerprint_domain::{ChallengeError, ConfigurationError};

/// Output format for CLI commands
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CliOutputFormat {
    /// JSON output
    Json,
    /// Table output
    Table,
    /// Plain text output
    Plain,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "circuit-fingerprint")]
#[command(author, version, about = "Circuit Fingerprint Challenge evaluator")]
#[command(long_about = "Validate and score holdout submissions for the Circuit Fingerprint Challenge.\n\n\
    `validate` checks a raw submission against the public task manifest and can write its normalized form.\n\
    `score` scores a normalized submission against the private ground truth and writes a report.")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format (overrides config)
    #[arg(short = 'o', long, global = true, value_enum)]
    format: Option<CliOutputFormat>,

    /// Configuration file (defaults to ./circuit-fingerprint.toml or $CFC_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a raw submission against the public task manifest
    #[command(alias = "v")]
    Validate {
        /// Public task manifest
        #[arg(long, value_name = "FILE")]
        public: PathBuf,

        /// Raw submission
        #[arg(long, value_name = "FILE")]
        submission: PathBuf,

        /// Write the normalized submission here on success
        #[arg(long, value_name = "FILE")]
        write_normalized: Option<PathBuf>,

        /// Report only the first violation
        #[arg(long)]
        fail_fast: bool,
    },

    /// Score a normalized submission against the private ground truth
    #[command(alias = "s")]
    Score {
        /// Private ground truth
        #[arg(long, value_name = "FILE")]
        truth: PathBuf,

        /// Public task manifest
        #[arg(long, value_name = "FILE")]
        public: PathBuf,

        /// Normalized submission
        #[arg(long, value_name = "FILE")]
        submission: PathBuf,

        /// Score report output
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Number of worst and best tasks to print
        #[arg(long = "topk", value_name = "K")]
        top_k: Option<usize>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "circuit-fingerprint", &mut std::io::stdout());
}

fn load_config(cli: &Cli) -> Result<EvaluatorConfig> {
    let loaded = match &cli.config {
        Some(path) => EvaluatorConfig::load_from(Some(path.as_path())),
        None => EvaluatorConfig::load(),
    };

    let mut config = loaded.map_err(|e| {
        ChallengeError::from(ConfigurationError::InvalidSetting(format!("{:#}", e)))
    })?;

    // Override config with CLI arguments
    if cli.verbose {
        config.telemetry.log_level = "debug".to_string();
    }
    if cli.log_json {
        config.telemetry.json_logging = true;
    }
    if cli.no_color {
        config.output.colored = false;
    }
    if let Some(format) = cli.format {
        config.output.format = OutputFormat::from(format).to_string();
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    if !config.output.colored {
        colored::control::set_override(false);
    }

    init_tracing(&config.telemetry.log_level, config.telemetry.json_logging)?;
    tracing::debug!(?config, "Loaded configuration");

    let format: OutputFormat = config.output.format.parse()?;
    let ctx = CommandContext::new(config, format);

    match cli.command {
        Commands::Validate {
            public,
            submission,
            write_normalized,
            fail_fast,
        } => {
            validate::run(
                &ctx,
                ValidateArgs {
                    public,
                    submission,
                    write_normalized,
                    fail_fast,
                },
            )
            .await?;
        }

        Commands::Score {
            truth,
            public,
            submission,
            out,
            top_k,
        } => {
            score::run(
                &ctx,
                ScoreArgs {
                    truth,
                    public,
                    submission,
                    out,
                    top_k,
                },
            )
            .await?;
        }

        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) | None => commands::config::show(&ctx)?,
        },

        Commands::Completions { .. } => {
            // Already handled in main
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle completions early (doesn't need config)
    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return;
    }

    let verbose = cli.verbose;
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if verbose {
            eprintln!("\n{}", "Details:".dimmed());
            eprintln!("{:?}", e);
        }
        std::process::exit(commands::exit_code(&e));
    }
}
