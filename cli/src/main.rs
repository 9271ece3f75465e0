use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use hopcost_cli::{logging, output, run_batch, CliError, Settings};

fn main() -> ExitCode {
    let start = Instant::now();
    let settings = Settings::parse();

    if let Err(e) = logging::init_tracing(
        settings.verbose,
        settings.log_level.as_deref(),
        settings.log_json,
    ) {
        eprintln!("Warning: {}", e);
    }

    match run(&settings) {
        Ok(()) => {
            tracing::debug!(elapsed = ?start.elapsed(), "batch complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(settings: &Settings) -> Result<(), CliError> {
    let text = match &settings.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let reports = run_batch(&text, settings)?;
    let rendered = output::render(&reports, settings.format)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
