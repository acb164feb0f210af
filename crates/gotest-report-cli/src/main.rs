//! gotest-report: structured JSON reports from `go test -v` output
//!
//! Reads the captured output of one package from a file or stdin and writes
//! the parsed report as JSON.

use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use gotest_report_cli::config::Config;
use gotest_report_cli::{run, should_fail};

fn main() -> anyhow::Result<ExitCode> {
    let config = Config::parse();

    // Logs go to stderr so they never mix with the report on stdout
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate()?;
    debug!(?config, "Starting gotest-report");

    let report = match (&config.input, &config.output) {
        (Some(input), Some(output)) => {
            let input = File::open(input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            let output = File::create(output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            run(&config, input, BufWriter::new(output))?
        }
        (Some(input), None) => {
            let input = File::open(input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            run(&config, input, io::stdout().lock())?
        }
        (None, Some(output)) => {
            let output = File::create(output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            run(&config, io::stdin().lock(), BufWriter::new(output))?
        }
        (None, None) => run(&config, io::stdin().lock(), io::stdout().lock())?,
    };

    if should_fail(&config, &report) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
