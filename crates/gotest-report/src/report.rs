//! Package and test report types

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Coverage value recorded when a coverage line was present but unreadable
pub const COVERAGE_UNPARSABLE: f64 = -1.0;

/// Final state of a tested package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageOutcome {
    /// The package directory holds no buildable Go source files
    NoGoFiles,
    /// The package or its tests failed to compile
    BuildFailure,
    /// The package has no `_test.go` files
    NoTestFiles,
    /// Test files exist but declare no test functions
    NoTestFunctions,
    /// The package report line said `ok`
    Passed,
    /// The package report line said `FAIL`
    Failed,
    /// A test or package initializer panicked
    Panicked,
}

impl PackageOutcome {
    /// Outcomes under which no test could have run
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::NoGoFiles | Self::BuildFailure | Self::NoTestFiles | Self::NoTestFunctions
        )
    }

    /// Outcomes that should fail a CI job
    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(self, Self::BuildFailure | Self::Failed | Self::Panicked)
    }

    /// Stable lowercase name, identical to the serialized form
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoGoFiles => "no_go_files",
            Self::BuildFailure => "build_failure",
            Self::NoTestFiles => "no_test_files",
            Self::NoTestFunctions => "no_test_functions",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Panicked => "panicked",
        }
    }
}

impl std::fmt::Display for PackageOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single test function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Test name as printed by `=== RUN`
    pub name: String,
    /// False only when the result line said `FAIL`
    pub passed: bool,
    /// True when the result line said `SKIP`
    pub skipped: bool,
    /// Elapsed time from the result line, in seconds
    pub elapsed_seconds: f64,
    /// Panic text; non-empty marks the whole package as panicked
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    /// Output around the first `file_test.go:N:` line (`t.Log`, `t.Error`, `t.Fatal`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Test file of the first failure or panic location
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file: String,
    /// Line number matching `file`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Goroutine trace following a panic
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stack_trace: String,
    /// Other lines the test printed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output: String,
    /// Lines captured while this test was active; emptied once finalized
    #[serde(skip)]
    pub raw_lines: Vec<String>,
}

impl TestRecord {
    /// Create a record for a test that has just started
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            skipped: false,
            elapsed_seconds: 0.0,
            error: String::new(),
            message: String::new(),
            file: String::new(),
            line: None,
            stack_trace: String::new(),
            output: String::new(),
            raw_lines: Vec::new(),
        }
    }

    /// Check if the test failed (skipped tests never count as failed)
    #[must_use]
    pub fn failed(&self) -> bool {
        !self.passed && !self.skipped
    }

    /// Check if the test panicked
    #[must_use]
    pub fn panicked(&self) -> bool {
        !self.error.is_empty()
    }

    /// Short status label: "panicked", "failed", "skipped" or "passed"
    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.panicked() {
            "panicked"
        } else if self.skipped {
            "skipped"
        } else if self.passed {
            "passed"
        } else {
            "failed"
        }
    }
}

/// Structured result of parsing one package's test output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageReport {
    /// Package outcome; `None` when no line determined one
    pub outcome: Option<PackageOutcome>,
    /// Import path from the package report line
    pub package_name: String,
    /// Elapsed time from the package report line, in seconds
    pub elapsed_seconds: f64,
    /// Statement coverage percent, or [`COVERAGE_UNPARSABLE`]
    pub coverage_percent: f64,
    /// Full raw output, kept when the package never ran tests
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_output: String,
    /// Package-scope output, kept when an initializer panicked
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    /// Test records in the order they first appeared
    pub test_results: Vec<TestRecord>,
}

impl Default for PackageReport {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self {
            outcome: None,
            package_name: String::new(),
            elapsed_seconds: 0.0,
            coverage_percent: 0.0,
            build_output: String::new(),
            error: String::new(),
            test_results: Vec::new(),
        }
    }

    /// Number of passing tests (skips excluded)
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.test_results
            .iter()
            .filter(|t| t.passed && !t.skipped)
            .count()
    }

    /// Number of failing tests
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.test_results.iter().filter(|t| t.failed()).count()
    }

    /// Number of skipped tests
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.test_results.iter().filter(|t| t.skipped).count()
    }

    /// Get failing tests
    #[must_use]
    pub fn failing_tests(&self) -> Vec<&TestRecord> {
        self.test_results.iter().filter(|t| t.failed()).collect()
    }

    /// Get tests that panicked
    #[must_use]
    pub fn panicked_tests(&self) -> Vec<&TestRecord> {
        self.test_results.iter().filter(|t| t.panicked()).collect()
    }

    /// Look up a test by name
    #[must_use]
    pub fn test(&self, name: &str) -> Option<&TestRecord> {
        self.test_results.iter().find(|t| t.name == name)
    }

    /// Serialize to compact JSON
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string(self).map_err(ReportError::from)
    }

    /// Serialize to indented JSON
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Json` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self).map_err(ReportError::from)
    }
}
