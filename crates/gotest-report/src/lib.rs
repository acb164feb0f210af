// Copyright (c) 2026 - present gotest-report contributors
// SPDX-License-Identifier: MIT

//! gotest-report: structured reports from `go test` output
//!
//! This library crate turns the console output of `go test -v` for a single
//! package into a [`PackageReport`]: the package outcome, timing, coverage
//! and one [`TestRecord`] per test function, ready to serialize for
//! dashboards and CI integrations.
//!
//! # Example
//!
//! ```
//! use gotest_report::{PackageOutcome, PackageParser, ParseOptions};
//!
//! let output = "=== RUN   TestAdd\n--- PASS: TestAdd (0.01s)\nPASS\nok  \tgithub.com/acme/calc\t0.012s";
//!
//! let report = PackageParser::new(ParseOptions::default()).parse(output);
//! assert_eq!(report.outcome, Some(PackageOutcome::Passed));
//! assert_eq!(report.test_results[0].name, "TestAdd");
//! ```

#![warn(missing_docs)]

pub mod detail;
pub mod duration;
pub mod error;
pub mod package;
pub mod registry;
pub mod report;
pub mod rules;

pub use detail::{GoTestDetailParser, NoopDetailParser, TestDetailParser};
pub use error::ReportError;
pub use package::{PackageParser, ParseOptions, parse_package_output, read_output};
pub use registry::{DuplicateTest, TestRegistry};
pub use report::{COVERAGE_UNPARSABLE, PackageOutcome, PackageReport, TestRecord};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::detail::TestDetailParser;
    pub use crate::error::ReportError;
    pub use crate::package::{PackageParser, ParseOptions, parse_package_output};
    pub use crate::report::{PackageOutcome, PackageReport, TestRecord};
}
