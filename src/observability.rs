use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging for the command line binary
///
/// This sets up:
/// - Structured JSON logging (for production)
/// - Console logging (for development)
/// - Environment-based log level filtering
///
/// Log output goes to stderr so stdout stays reserved for plan and
/// shopping list output.
pub fn init_logging(log_level: &str) -> Result<()> {
    // Create environment filter for log levels
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // Determine if we should use JSON logging (production) or pretty console (development)
    let is_production = std::env::var("ENVIRONMENT")
        .map(|env| env == "production")
        .unwrap_or(false);

    if is_production {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_filter(env_filter),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .with_filter(env_filter),
            )
            .try_init()?;
    }

    Ok(())
}
