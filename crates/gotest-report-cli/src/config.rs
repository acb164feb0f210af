//! Configuration for the gotest-report command line tool
//!
//! This module provides the command line and environment options: where the
//! captured `go test` output comes from, where the report goes, duration
//! precision and logging verbosity.

use std::path::PathBuf;

use clap::Parser;
use gotest_report::ParseOptions;
use gotest_report::duration::{PACKAGE_PRECISION, TEST_PRECISION};

/// Largest accepted number of decimal places for durations
pub const MAX_PRECISION: u32 = 9;

/// gotest-report - structured JSON reports from `go test -v` output
#[derive(Parser, Debug, Clone)]
#[command(name = "gotest-report")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File holding the captured output of one package
    ///
    /// Reads stdin when omitted.
    #[arg(short, long, env = "GOTEST_REPORT_INPUT")]
    pub input: Option<PathBuf>,

    /// File to write the JSON report to
    ///
    /// Writes to stdout when omitted.
    #[arg(short, long, env = "GOTEST_REPORT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long, default_value = "false")]
    pub pretty: bool,

    /// Wrap the report with a generation timestamp
    #[arg(long, default_value = "false")]
    pub envelope: bool,

    /// Exit with status 1 when the package failed, panicked or did not build
    #[arg(long, default_value = "false")]
    pub fail_on_failure: bool,

    /// Decimal places kept for test durations
    #[arg(long, default_value_t = TEST_PRECISION)]
    pub test_precision: u32,

    /// Decimal places kept for the package duration
    #[arg(long, default_value_t = PACKAGE_PRECISION)]
    pub package_precision: u32,

    /// Keep `=== CONT`/`=== NAME` lines as output instead of switching tests
    #[arg(long, default_value = "false")]
    pub no_parallel_markers: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with the report.
    #[arg(short, long, default_value = "false", conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode - only errors and warnings are logged
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            pretty: false,
            envelope: false,
            fail_on_failure: false,
            test_precision: TEST_PRECISION,
            package_precision: PACKAGE_PRECISION,
            no_parallel_markers: false,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input path is specified but doesn't exist or isn't a file
    /// - A precision exceeds [`MAX_PRECISION`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.clone()));
            }
            if !input.is_file() {
                return Err(ConfigError::InputNotAFile(input.clone()));
            }
        }

        for (name, value) in [
            ("test-precision", self.test_precision),
            ("package-precision", self.package_precision),
        ] {
            if value > MAX_PRECISION {
                return Err(ConfigError::InvalidPrecision { name, value });
            }
        }

        Ok(())
    }

    /// Parser options derived from the precision flags
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_test_precision(self.test_precision)
            .with_package_precision(self.package_precision)
            .with_parallel_markers(!self.no_parallel_markers)
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input path not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is not a regular file
    #[error("Input path is not a file: {0}")]
    InputNotAFile(PathBuf),

    /// Precision out of range
    #[error("--{name} must be at most {max}, got {value}", max = MAX_PRECISION)]
    InvalidPrecision {
        /// Flag name
        name: &'static str,
        /// Rejected value
        value: u32,
    },
}
