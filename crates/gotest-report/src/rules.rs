// Copyright (c) 2026 - present gotest-report contributors
// SPDX-License-Identifier: MIT

//! Line rules for `go test -v` output
//!
//! Every function here looks at a single line. The predicates decide which
//! category a line belongs to; the extractors pull out names, durations and
//! coverage text. None of them carry state between lines.

use crate::duration::{parse_go_duration, parse_seconds};
use crate::report::PackageOutcome;

/// Prefix the Go runtime prints when an uncaught panic unwinds
pub const PANIC_MARKER: &str = "panic: ";

/// Prefix of the coverage summary
pub const COVERAGE_PREFIX: &str = "coverage: ";

const CANT_LOAD_PACKAGE: &str = "can't load package: ";
const NO_TESTS_TO_RUN: &str = "testing: warning: no tests to run";

// ============================================================================
// Terminal conditions
// ============================================================================

/// The package has no buildable Go sources
#[must_use]
pub fn no_go_files(line: &str) -> bool {
    (line.starts_with(CANT_LOAD_PACKAGE)
        && (line.contains(": no buildable Go source files in ")
            || line.contains(": no Go ")
            || line.contains("cannot find module providing package")))
        || (is_go_command_message(line) && line.contains("no Go files in "))
}

/// Unindented diagnostic from the go command (`go: ...`, `package x: ...`)
fn is_go_command_message(line: &str) -> bool {
    line.starts_with("go: ")
        || line
            .strip_prefix("package ")
            .is_some_and(|rest| rest.split_whitespace().next().is_some_and(|path| path.ends_with(':')))
}

/// The package or its tests did not compile
#[must_use]
pub fn build_failed(line: &str) -> bool {
    line.starts_with("# ")
        || line.contains("cannot find package")
        || (line.starts_with(CANT_LOAD_PACKAGE) && !line.contains(": no Go "))
        || (line.contains(": found packages ")
            && line.contains(".go) and ")
            && line.contains(".go) in "))
        || (line.starts_with("FAIL\t")
            && (line.ends_with("[build failed]") || line.ends_with("[setup failed]")))
}

/// The package has no `_test.go` files
#[must_use]
pub fn no_test_files(line: &str) -> bool {
    line.starts_with('?') && line.contains("[no test files]")
}

/// Test files exist but no test function matched
#[must_use]
pub fn no_test_functions(line: &str) -> bool {
    line == NO_TESTS_TO_RUN
}

/// Classify a line as one of the four conditions that stop a package from
/// running any test. Checked in a fixed order; the first match wins.
#[must_use]
pub fn terminal_outcome(line: &str) -> Option<PackageOutcome> {
    if no_go_files(line) {
        Some(PackageOutcome::NoGoFiles)
    } else if build_failed(line) {
        Some(PackageOutcome::BuildFailure)
    } else if no_test_files(line) {
        Some(PackageOutcome::NoTestFiles)
    } else if no_test_functions(line) {
        Some(PackageOutcome::NoTestFunctions)
    } else {
        None
    }
}

// ============================================================================
// Test lines
// ============================================================================

/// Marker lines that move output attribution between running tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `=== RUN`: a test starts
    Run,
    /// `=== PAUSE`: a parallel test yields
    Pause,
    /// `=== CONT`: a paused test resumes
    Cont,
    /// `=== NAME`: following output belongs to the named test
    Name,
}

/// Split a `=== KEYWORD name` line into its marker and test name
#[must_use]
pub fn marker(line: &str) -> Option<(Marker, &str)> {
    let rest = line.strip_prefix("=== ")?;
    let keyword_len = rest.find(' ')?;
    let marker = match rest[..keyword_len].trim_end_matches(':') {
        "RUN" => Marker::Run,
        "PAUSE" => Marker::Pause,
        "CONT" => Marker::Cont,
        "NAME" => Marker::Name,
        _ => return None,
    };
    let name = rest[keyword_len..].trim();
    (!name.is_empty()).then_some((marker, name))
}

/// `=== RUN TestName`
#[must_use]
pub fn is_test_start(line: &str) -> bool {
    test_start_name(line).is_some()
}

/// Name from a `=== RUN` line
#[must_use]
pub fn test_start_name(line: &str) -> Option<&str> {
    match marker(line) {
        Some((Marker::Run, name)) => Some(name),
        _ => None,
    }
}

/// Status keyword of a test result line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    /// `--- PASS:`
    Pass,
    /// `--- FAIL:`
    Fail,
    /// `--- SKIP:`
    Skip,
}

/// A parsed `--- PASS: TestName (0.01s)` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestResultLine<'a> {
    /// Result keyword
    pub status: ResultStatus,
    /// Test name
    pub name: &'a str,
    /// Duration text without parentheses, if present
    pub duration: Option<&'a str>,
}

/// Parse a test result line
///
/// Subtest results are indented under their parent; the indentation is
/// ignored so that they reach the subtest's own record.
#[must_use]
pub fn test_result(line: &str) -> Option<TestResultLine<'_>> {
    let rest = line.trim_start().strip_prefix("--- ")?;
    let mut fields = rest.split(' ');
    let status = match fields.next()? {
        "PASS:" => ResultStatus::Pass,
        "FAIL:" => ResultStatus::Fail,
        "SKIP:" => ResultStatus::Skip,
        _ => return None,
    };
    let name = fields.next().filter(|name| !name.is_empty())?;
    let duration = fields
        .next()
        .map(|field| field.trim_start_matches('(').trim_end_matches(')'))
        .filter(|field| !field.is_empty());

    Some(TestResultLine {
        status,
        name,
        duration,
    })
}

/// `--- PASS:`, `--- FAIL:` or `--- SKIP:` at the start of the line
#[must_use]
pub fn is_test_result(line: &str) -> bool {
    test_result(line).is_some()
}

/// Duration of a test result line in seconds, `0.0` if absent
#[must_use]
pub fn test_result_duration(line: &str, precision: u32) -> f64 {
    test_result(line)
        .and_then(|result| result.duration)
        .map_or(0.0, |raw| parse_seconds(raw, precision))
}

// ============================================================================
// Package lines
// ============================================================================

/// Any line carrying package-level metadata
#[must_use]
pub fn is_package_report(line: &str) -> bool {
    line.starts_with("FAIL")
        || line.starts_with("exit status")
        || line.starts_with("PASS")
        || is_coverage_summary(line)
        || package_passed(line)
}

/// `FAIL\tpkg/path\t0.015s`
#[must_use]
pub fn package_failed(line: &str) -> bool {
    line.starts_with("FAIL\t")
}

/// `ok  \tpkg/path\t0.012s`
///
/// The separator after `ok` must be a tab or at least two spaces and the
/// third field must read as a duration.
#[must_use]
pub fn package_passed(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("ok") else {
        return false;
    };
    if !(rest.starts_with('\t') || rest.starts_with("  ")) {
        return false;
    }
    let fields = package_fields(line);
    !fields.name.is_empty() && is_duration_field(fields.duration)
}

/// `0.012s`, `(cached)` or `0.002s [no tests to run]`
fn is_duration_field(field: &str) -> bool {
    field
        .split_whitespace()
        .next()
        .is_some_and(|token| token == "(cached)" || parse_go_duration(token).is_some())
}

/// `coverage: 81.2% of statements`
#[must_use]
pub fn is_coverage_summary(line: &str) -> bool {
    line.starts_with(COVERAGE_PREFIX) && line.contains("% of statements")
}

/// Text between the coverage prefix and the percent sign
///
/// The line must start with [`COVERAGE_PREFIX`].
#[must_use]
pub fn coverage_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(COVERAGE_PREFIX)?;
    rest.find('%').map(|end| &rest[..end])
}

/// Fields of an `ok` or `FAIL` package line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackageFields<'a> {
    /// Package import path
    pub name: &'a str,
    /// Duration text, e.g. `0.012s` or `(cached)`
    pub duration: &'a str,
    /// Coverage text when the line ends with a coverage summary
    pub coverage: Option<&'a str>,
}

/// Split a package report line into its name, duration and coverage
///
/// Fields are tab separated. Lines whose tabs were lost (copied from a
/// terminal, say) fall back to whitespace splitting.
#[must_use]
pub fn package_fields(line: &str) -> PackageFields<'_> {
    let (head, coverage) = match line.find(COVERAGE_PREFIX) {
        Some(idx) => (&line[..idx], coverage_text(&line[idx..])),
        None => (line, None),
    };

    let tabbed: Vec<&str> = head.split('\t').map(str::trim).collect();
    let fields = if tabbed.len() >= 3 {
        tabbed
    } else {
        head.split_whitespace().collect()
    };

    PackageFields {
        name: fields.get(1).copied().unwrap_or_default(),
        duration: fields.get(2).copied().unwrap_or_default(),
        coverage,
    }
}

// ============================================================================
// Plain lines
// ============================================================================

/// The line begins with the panic marker
#[must_use]
pub fn is_panic(line: &str) -> bool {
    line.starts_with(PANIC_MARKER)
}

/// Remove one level of indentation (a tab or four spaces)
#[must_use]
pub fn strip_indent(line: &str) -> &str {
    line.strip_prefix('\t')
        .or_else(|| line.strip_prefix("    "))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_terminal_conditions() {
        assert_eq!(
            terminal_outcome("can't load package: package foo: no buildable Go source files in /x"),
            Some(PackageOutcome::NoGoFiles)
        );
        assert_eq!(
            terminal_outcome("package foo: no Go files in /src/foo"),
            Some(PackageOutcome::NoGoFiles)
        );
        assert_eq!(
            terminal_outcome("# github.com/x/foo"),
            Some(PackageOutcome::BuildFailure)
        );
        assert_eq!(
            terminal_outcome("can't load package: import cycle not allowed"),
            Some(PackageOutcome::BuildFailure)
        );
        assert_eq!(
            terminal_outcome("FAIL\tgithub.com/x/foo [build failed]"),
            Some(PackageOutcome::BuildFailure)
        );
        assert_eq!(
            terminal_outcome("can't load package: found packages a (a.go) and b (b.go) in /x"),
            Some(PackageOutcome::BuildFailure)
        );
        assert_eq!(
            terminal_outcome("?   \tgithub.com/x/foo\t[no test files]"),
            Some(PackageOutcome::NoTestFiles)
        );
        assert_eq!(
            terminal_outcome("testing: warning: no tests to run"),
            Some(PackageOutcome::NoTestFunctions)
        );
        assert_eq!(
            terminal_outcome("go: no Go files in /src/foo"),
            Some(PackageOutcome::NoGoFiles)
        );
        assert_eq!(terminal_outcome("    a_test.go:5: no Go files in /tmp/empty"), None);
        assert_eq!(terminal_outcome("fixture says no Go files in /tmp/empty"), None);
        assert_eq!(terminal_outcome("=== RUN TestA"), None);
        assert_eq!(terminal_outcome("FAIL\tgithub.com/x/foo\t0.1s"), None);
    }

    #[test]
    fn test_markers() {
        assert_eq!(test_start_name("=== RUN TestA"), Some("TestA"));
        assert_eq!(test_start_name("=== RUN: TestA"), Some("TestA"));
        assert_eq!(test_start_name("=== RUN   TestA/sub_case"), Some("TestA/sub_case"));
        assert_eq!(test_start_name("=== RUN "), None);
        assert_eq!(test_start_name("=== CONT  TestA"), None);
        assert_eq!(marker("=== CONT  TestA"), Some((Marker::Cont, "TestA")));
        assert_eq!(marker("=== PAUSE TestA"), Some((Marker::Pause, "TestA")));
        assert_eq!(marker("=== NAME  TestA"), Some((Marker::Name, "TestA")));
        assert_eq!(marker("=== BOGUS TestA"), None);
        assert!(!is_test_start("RUN TestA"));
    }

    #[test]
    fn test_result_lines() {
        let pass = test_result("--- PASS: TestA (0.01s)").expect("pass line");
        assert_eq!(pass.status, ResultStatus::Pass);
        assert_eq!(pass.name, "TestA");
        assert_eq!(pass.duration, Some("0.01s"));

        let fail = test_result("--- FAIL: TestB (1.50s)").expect("fail line");
        assert_eq!(fail.status, ResultStatus::Fail);

        let skip = test_result("--- SKIP: TestC (0.00 seconds)").expect("skip line");
        assert_eq!(skip.status, ResultStatus::Skip);
        assert_eq!(skip.duration, Some("0.00"));

        let sub = test_result("    --- PASS: TestA/sub (0.00s)").expect("subtest line");
        assert_eq!(sub.name, "TestA/sub");
        assert!(test_result("--- BENCH: BenchmarkA").is_none());
        assert!(!is_test_result("--- "));
        assert_eq!(test_result_duration("--- PASS: TestA (0.016s)", 2), 0.02);
        assert_eq!(test_result_duration("--- PASS: TestA", 2), 0.0);
    }

    #[test]
    fn test_package_lines() {
        assert!(is_package_report("PASS"));
        assert!(is_package_report("FAIL"));
        assert!(is_package_report("exit status 1"));
        assert!(is_package_report("ok  \tgithub.com/x/foo\t0.012s"));
        assert!(is_package_report("coverage: 50.0% of statements"));
        assert!(!is_package_report("okay then"));
        assert!(!is_package_report("\tfoo_test.go:12: nope"));

        assert!(package_failed("FAIL\tgithub.com/x/foo\t0.012s"));
        assert!(!package_failed("FAIL"));
        assert!(package_passed("ok  pkg/foo  0.012s"));
        assert!(package_passed("ok  \tpkg/foo\t(cached)"));
        assert!(!package_passed("ok"));
        assert!(!package_passed("ok then"));
        assert!(!package_passed("ok  \tall good here"));
        assert!(!is_package_report("ok then"));
    }

    #[test]
    fn test_package_fields() {
        let fields = package_fields("ok  \tgithub.com/x/foo\t0.012s");
        assert_eq!(fields.name, "github.com/x/foo");
        assert_eq!(fields.duration, "0.012s");
        assert_eq!(fields.coverage, None);

        let fields = package_fields("ok  pkg/foo  0.012s");
        assert_eq!(fields.name, "pkg/foo");
        assert_eq!(fields.duration, "0.012s");

        let fields = package_fields("ok  \tpkg/foo\t0.300s\tcoverage: 87.5% of statements");
        assert_eq!(fields.name, "pkg/foo");
        assert_eq!(fields.duration, "0.300s");
        assert_eq!(fields.coverage, Some("87.5"));

        assert_eq!(package_fields("FAIL\t"), PackageFields::default());
    }

    #[test]
    fn test_coverage_text() {
        assert_eq!(coverage_text("coverage: 81.2% of statements"), Some("81.2"));
        assert_eq!(coverage_text("coverage: abc% of statements"), Some("abc"));
        assert_eq!(coverage_text("coverage: [no statements]"), None);
        assert_eq!(coverage_text("81.2% of statements"), None);
    }

    #[test]
    fn test_strip_indent() {
        assert_eq!(strip_indent("\t\tfoo"), "\tfoo");
        assert_eq!(strip_indent("        foo"), "    foo");
        assert_eq!(strip_indent("  foo"), "  foo");
        assert!(is_panic("panic: runtime error"));
        assert!(!is_panic("\tpanic: nested"));
    }
}
