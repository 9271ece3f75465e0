//! hopcost-cli: batch driver for hopcost-core.
//!
//! Reads a batch of test cases, builds one graph per case, and reports the
//! traversal cost from each case's source to every other node. A failing
//! case is reported on its own and does not stop the batch.

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod run;

pub use config::{OutputFormat, SearchMode, Settings};
pub use error::{CliError, ExitCode};
pub use run::{CaseReport, CostEntry};

/// Parse `text` and run every case in order.
pub fn run_batch(text: &str, settings: &Settings) -> Result<Vec<CaseReport>, CliError> {
    settings.validate()?;
    let cases = input::parse_batch(text, settings)?;
    tracing::debug!(cases = cases.len(), "batch parsed");
    Ok(cases.iter().map(|case| run::run_case(case, settings)).collect())
}
