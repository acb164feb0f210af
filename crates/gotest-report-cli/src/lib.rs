//! gotest-report-cli library
//!
//! This module exports the command line tool's building blocks for use in
//! integration tests and as a library.

use std::io::{Read, Write};

use anyhow::Context;
use chrono::Utc;
use gotest_report::{PackageParser, PackageReport, read_output};
use tracing::{debug, info, warn};

pub mod config;
pub mod output;

use config::Config;
use output::{RenderOptions, render};

/// Read captured output, parse it and write the JSON report
///
/// Returns the parsed report so the caller can decide on an exit status.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the report cannot be
/// written.
pub fn run(config: &Config, input: impl Read, mut output: impl Write) -> anyhow::Result<PackageReport> {
    let raw = read_output(input).context("Failed to read test output")?;
    debug!(bytes = raw.len(), "Read test output");

    let report = PackageParser::new(config.parse_options()).parse(&raw);
    match report.outcome {
        Some(outcome) => info!(
            package = %report.package_name,
            %outcome,
            tests = report.test_results.len(),
            failed = report.failed_count(),
            "Parsed package"
        ),
        None => warn!("No package outcome found in test output"),
    }

    let options = RenderOptions {
        pretty: config.pretty,
        envelope: config.envelope,
    };
    let json = render(report.clone(), options, Utc::now()).context("Failed to render report")?;
    writeln!(output, "{json}").context("Failed to write report")?;
    output.flush().context("Failed to write report")?;

    Ok(report)
}

/// Whether the process should exit with a failure status
#[must_use]
pub fn should_fail(config: &Config, report: &PackageReport) -> bool {
    config.fail_on_failure && report.outcome.is_some_and(|outcome| outcome.is_failure())
}
