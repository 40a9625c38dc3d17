//! repomine binary
//!
//! Runs one query and prints its JSON result on stdout. Logs go to stderr,
//! filtered by RUST_LOG (default `warn`, which shows cache misses).

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use repomine::cli::Cli;

fn run(cli: &Cli) -> repomine::Result<String> {
    let value = cli.run()?;
    Ok(serde_json::to_string_pretty(&value)?)
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
