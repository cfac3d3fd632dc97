//! `config` commands

use anyhow::Result;

use crate::commands::CommandContext;
use crate::output::{JsonFormatter, OutputFormat, TableFormatter};

/// Print the effective configuration
pub fn show(ctx: &CommandContext) -> Result<()> {
    let config = &ctx.config;

    match ctx.format {
        OutputFormat::Json => println!("{}", JsonFormatter::format(config)?),
        OutputFormat::Plain => print!("{}", config.to_toml()?),
        OutputFormat::Table => {
            println!(
                "{}",
                TableFormatter::key_value(vec![
                    ("scoring.top_k", config.scoring.top_k.to_string()),
                    ("validation.fail_fast", config.validation.fail_fast.to_string()),
                    ("telemetry.log_level", config.telemetry.log_level.clone()),
                    ("telemetry.json_logging", config.telemetry.json_logging.to_string()),
                    ("output.colored", config.output.colored.to_string()),
                    ("output.format", config.output.format.clone()),
                ])?
            );
        }
    }
    Ok(())
}
