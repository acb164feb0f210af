// Copyright (c) 2026 - present gotest-report contributors
// SPDX-License-Identifier: MIT

//! Package output parsing
//!
//! Parsing runs in two passes over the output of `go test -v` for a single
//! package:
//!
//! 1. Every line is classified. Test start lines register a record, result
//!    lines annotate it, package report lines fill in package metadata and
//!    everything else is buffered under the test that is currently running
//!    (or under the package when none is). A line showing that no test could
//!    run (build failure, no test files, ...) ends this pass immediately.
//! 2. Each test's buffer goes through a [`TestDetailParser`]; a test that
//!    reports an error marks the package as panicked.
//!
//! When no test was ever started, the package buffer is finally scanned for
//! a runtime panic, which covers panics in `init()` and `TestMain`.
//!
//! # Example
//!
//! ```
//! use gotest_report::{PackageOutcome, parse_package_output};
//!
//! let report = parse_package_output("=== RUN TestA\n--- PASS: TestA (0.01s)\nok  \tpkg/foo\t0.012s");
//! assert_eq!(report.outcome, Some(PackageOutcome::Passed));
//! assert_eq!(report.package_name, "pkg/foo");
//! assert_eq!(report.test_results.len(), 1);
//! ```

use std::io::Read;

use tracing::{debug, warn};

use crate::detail::{GoTestDetailParser, TestDetailParser};
use crate::duration::{PACKAGE_PRECISION, TEST_PRECISION, parse_seconds};
use crate::error::ReportError;
use crate::registry::TestRegistry;
use crate::report::{COVERAGE_UNPARSABLE, PackageOutcome, PackageReport};
use crate::rules::{self, Marker, ResultStatus, TestResultLine};

/// Options controlling how durations are read and output is attributed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Decimal places kept for test durations
    pub test_precision: u32,
    /// Decimal places kept for the package duration
    pub package_precision: u32,
    /// Let `=== CONT` and `=== NAME` lines move output to the named test
    ///
    /// When off, only `=== RUN` changes the running test and the other
    /// markers are kept as plain output of the running test.
    pub follow_parallel_markers: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            test_precision: TEST_PRECISION,
            package_precision: PACKAGE_PRECISION,
            follow_parallel_markers: true,
        }
    }
}

impl ParseOptions {
    /// Set the decimal places kept for test durations
    #[must_use]
    pub fn with_test_precision(mut self, precision: u32) -> Self {
        self.test_precision = precision;
        self
    }

    /// Set the decimal places kept for the package duration
    #[must_use]
    pub fn with_package_precision(mut self, precision: u32) -> Self {
        self.package_precision = precision;
        self
    }

    /// Choose whether `=== CONT` and `=== NAME` lines switch the running test
    #[must_use]
    pub fn with_parallel_markers(mut self, follow: bool) -> Self {
        self.follow_parallel_markers = follow;
        self
    }
}

/// Output collected during the classification pass
#[derive(Debug, Default)]
struct Segments {
    registry: TestRegistry,
    /// Lines printed while no test was running (`init()`, `TestMain`, ...)
    package_lines: Vec<String>,
}

/// Parser for the output of one `go test -v` package run
///
/// The parser holds no per-run state, so one instance can parse any number
/// of packages, from several threads if the detail parser allows it.
#[derive(Debug, Clone)]
pub struct PackageParser<D = GoTestDetailParser> {
    options: ParseOptions,
    detail: D,
}

impl PackageParser<GoTestDetailParser> {
    /// Create a parser using the Go detail parser
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            detail: GoTestDetailParser,
        }
    }
}

impl Default for PackageParser<GoTestDetailParser> {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

impl<D: TestDetailParser> PackageParser<D> {
    /// Replace the per-test detail parser
    #[must_use]
    pub fn with_detail_parser<P: TestDetailParser>(self, detail: P) -> PackageParser<P> {
        PackageParser {
            options: self.options,
            detail,
        }
    }

    /// Get the parse options
    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse captured output into a package report
    ///
    /// Never fails: malformed input yields whatever could be recovered.
    #[must_use]
    pub fn parse(&self, raw_output: &str) -> PackageReport {
        let raw = raw_output.trim();
        let mut report = PackageReport::new();

        let segments = self.separate_tests_and_metadata(raw, &mut report);
        let no_tests = segments.registry.is_empty();
        self.finalize_tests(segments.registry, &mut report);
        if no_tests && !segments.package_lines.is_empty() {
            recover_from_init_panic(&segments.package_lines, &mut report);
        }

        debug!(
            outcome = ?report.outcome,
            package = %report.package_name,
            tests = report.test_results.len(),
            "Parsed package output"
        );
        report
    }

    fn separate_tests_and_metadata(&self, raw: &str, report: &mut PackageReport) -> Segments {
        let mut segments = Segments::default();
        let mut active = None;

        for line in raw.lines() {
            if let Some(outcome) = rules::terminal_outcome(line) {
                debug!(%outcome, line, "Package did not run tests");
                report.outcome = Some(outcome);
                report.build_output = raw.to_string();
                return segments;
            }
            active = self.process_test_output(line, active, &mut segments, report);
        }

        segments
    }

    /// Route one non-terminal line and return the test now receiving output
    fn process_test_output(
        &self,
        line: &str,
        active: Option<usize>,
        segments: &mut Segments,
        report: &mut PackageReport,
    ) -> Option<usize> {
        match rules::marker(line) {
            Some((Marker::Run, name)) => {
                return Some(register_test(&mut segments.registry, name));
            }
            Some((Marker::Cont | Marker::Name, name)) if self.options.follow_parallel_markers => {
                let resumed = segments.registry.index_of(name);
                if resumed.is_none() {
                    warn!(test = name, "Output attributed to a test that never started");
                }
                return resumed.or(active);
            }
            Some((Marker::Pause, _)) if self.options.follow_parallel_markers => return active,
            _ => {}
        }

        if let Some(result) = rules::test_result(line) {
            self.record_test_metadata(&mut segments.registry, &result);
        } else if rules::is_package_report(line) {
            self.record_package_metadata(line, report);
        } else {
            save_line_for_parsing_later(line, active, segments);
        }
        active
    }

    fn record_test_metadata(&self, registry: &mut TestRegistry, result: &TestResultLine<'_>) {
        let Some(test) = registry.by_name_mut(result.name) else {
            warn!(test = result.name, "Result for a test that never started");
            return;
        };

        test.passed = result.status != ResultStatus::Fail;
        test.skipped = result.status == ResultStatus::Skip;
        test.elapsed_seconds = result
            .duration
            .map_or(0.0, |raw| parse_seconds(raw, self.options.test_precision));
    }

    fn record_package_metadata(&self, line: &str, report: &mut PackageReport) {
        if rules::package_failed(line) {
            self.record_testing_outcome(line, PackageOutcome::Failed, report);
        } else if rules::package_passed(line) {
            self.record_testing_outcome(line, PackageOutcome::Passed, report);
        } else if rules::is_coverage_summary(line) {
            record_coverage(rules::coverage_text(line), report);
        }
    }

    fn record_testing_outcome(
        &self,
        line: &str,
        outcome: PackageOutcome,
        report: &mut PackageReport,
    ) {
        let fields = rules::package_fields(line);
        report.outcome = Some(outcome);
        report.package_name = fields.name.to_string();
        report.elapsed_seconds = parse_seconds(fields.duration, self.options.package_precision);
        if fields.coverage.is_some() {
            record_coverage(fields.coverage, report);
        }
    }

    fn finalize_tests(&self, registry: TestRegistry, report: &mut PackageReport) {
        for record in registry.into_records() {
            let mut test = self.detail.parse(record);
            if !test.error.is_empty() {
                debug!(test = %test.name, "Test panicked");
                report.outcome = Some(PackageOutcome::Panicked);
            }
            test.raw_lines.clear();
            report.test_results.push(test);
        }
    }
}

fn register_test(registry: &mut TestRegistry, name: &str) -> usize {
    match registry.register(name) {
        Ok(index) => index,
        Err(duplicate) => {
            warn!(test = name, "Test started twice; reusing the first record");
            duplicate.index
        }
    }
}

fn record_coverage(text: Option<&str>, report: &mut PackageReport) {
    let parsed = text
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite());

    report.coverage_percent = match parsed {
        Some(value) => value,
        None => {
            debug!(coverage = ?text, "Unreadable coverage value");
            COVERAGE_UNPARSABLE
        }
    };
}

fn save_line_for_parsing_later(line: &str, active: Option<usize>, segments: &mut Segments) {
    let line = rules::strip_indent(line).to_string();
    match active.and_then(|index| segments.registry.get_mut(index)) {
        Some(test) => test.raw_lines.push(line),
        None => segments.package_lines.push(line),
    }
}

fn recover_from_init_panic(package_lines: &[String], report: &mut PackageReport) {
    if package_lines.iter().any(|line| rules::is_panic(line)) {
        debug!("Package panicked before any test started");
        report.outcome = Some(PackageOutcome::Panicked);
        report.error = package_lines.join("\n");
    }
}

/// Parse output with the default options and the Go detail parser
#[must_use]
pub fn parse_package_output(raw_output: &str) -> PackageReport {
    PackageParser::new(ParseOptions::default()).parse(raw_output)
}

/// Read captured test output into a string
///
/// # Errors
///
/// Returns `ReportError::Io` if reading fails and
/// `ReportError::InvalidFormat` if the output is not valid UTF-8.
pub fn read_output(mut reader: impl Read) -> Result<String, ReportError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| ReportError::InvalidFormat {
        message: format!("output is not UTF-8: {e}"),
    })
}
