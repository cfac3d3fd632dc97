//! Telemetry and structured logging setup.
//!
//! Logs go to stderr so stdout stays reserved for command output and reports.

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Initialize tracing.
///
/// # Arguments
///
/// * `log_level` - Default filter directive (e.g., "warn", "debug"); `RUST_LOG` overrides it
/// * `json_format` - Whether to emit JSON log lines
///
/// # Examples
///
/// ```no_run
/// use circuit_fingerprint_common::telemetry::init_tracing;
///
/// init_tracing("info", false).expect("Failed to initialize tracing");
/// ```
pub fn init_tracing(log_level: &str, json_format: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = Registry::default().with(env_filter);

    if json_format {
        registry
            .with(json_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    } else {
        registry
            .with(compact_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    }

    Ok(())
}

/// Create a JSON logging layer
fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_current_span(true)
        .with_span_list(true)
        .with_target(true)
        .with_level(true)
}

/// Create a compact human-readable logging layer
fn compact_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_reports_error() {
        // The global subscriber can only be installed once per process.
        let _ = init_tracing("info", false);
        assert!(init_tracing("info", true).is_err());
    }
}
