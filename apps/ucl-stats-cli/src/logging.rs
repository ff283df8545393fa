use crate::error::{CliError, CliResult};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber; `RUST_LOG` wins over `default_level`.
///
/// Logs go to stderr so stdout carries only command output.
pub fn init(default_level: &str) -> CliResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level).map_err(|e| {
            CliError::InvalidConfig(format!("Invalid log level '{}': {}", default_level, e))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
