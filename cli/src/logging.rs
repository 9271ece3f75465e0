use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::CliError;

/// Initialize structured logging on stderr. stdout is reserved for results.
///
/// Precedence: `HOPCOST_LOG`, then `RUST_LOG`, then `--log-level`, then
/// `--verbose`, then warnings only.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), CliError> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => level.to_string(),
        (true, None) => "hopcost_cli=debug,hopcost_core=debug".to_string(),
        (false, None) => "warn".to_string(),
    };

    let filter = EnvFilter::try_from_env("HOPCOST_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    };

    result.map_err(|e| CliError::Logging(e.to_string()))
}
