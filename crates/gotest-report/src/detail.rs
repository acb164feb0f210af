// Copyright (c) 2026 - present gotest-report contributors
// SPDX-License-Identifier: MIT

//! Per-test output parsing
//!
//! Once the package output has been split into per-test buffers, each test's
//! captured lines are handed to a [`TestDetailParser`]. The default
//! [`GoTestDetailParser`] recognises `t.Error`/`t.Fatal` failure lines and
//! runtime panics.

use crate::report::TestRecord;
use crate::rules;

/// Turns a test's captured lines into a finished record
pub trait TestDetailParser {
    /// Fill in the record's details from its `raw_lines`
    ///
    /// A non-empty `error` on the returned record marks the package as
    /// panicked.
    fn parse(&self, record: TestRecord) -> TestRecord;
}

impl<F> TestDetailParser for F
where
    F: Fn(TestRecord) -> TestRecord,
{
    fn parse(&self, record: TestRecord) -> TestRecord {
        self(record)
    }
}

/// Leaves records exactly as the line classifier built them
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDetailParser;

impl TestDetailParser for NoopDetailParser {
    fn parse(&self, record: TestRecord) -> TestRecord {
        record
    }
}

/// Detail parser for plain `go test -v` output
#[derive(Debug, Clone, Copy, Default)]
pub struct GoTestDetailParser;

impl TestDetailParser for GoTestDetailParser {
    fn parse(&self, mut record: TestRecord) -> TestRecord {
        let lines = std::mem::take(&mut record.raw_lines);
        let mut output = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if rules::is_panic(line) {
                record.error = lines.join("\n");
                record.stack_trace = lines[i..].join("\n");
                if let Some((file, line_no)) = lines[i..].iter().find_map(|l| source_location(l)) {
                    record.file = file.to_string();
                    record.line = Some(line_no);
                }
                break;
            }

            if let Some((file, line_no)) = failure_location(line) {
                if record.message.is_empty() {
                    record.message = lines.join("\n");
                    record.file = file.to_string();
                    record.line = Some(line_no);
                }
                continue;
            }

            output.push(line.as_str());
        }

        record.output = output.join("\n");
        record.raw_lines = lines;
        record
    }
}

/// `foo_test.go:12: message`, possibly indented for subtests
fn failure_location(line: &str) -> Option<(&str, u32)> {
    let (file, line_no, rest) = test_file_reference(line)?;
    rest.starts_with(':').then_some((file, line_no))
}

/// `/src/pkg/foo_test.go:12 +0x1d` frame within a goroutine trace
fn source_location(line: &str) -> Option<(&str, u32)> {
    test_file_reference(line).map(|(file, line_no, _)| (file, line_no))
}

fn test_file_reference(line: &str) -> Option<(&str, u32, &str)> {
    const SUFFIX: &str = "_test.go:";

    let trimmed = line.trim_start();
    let idx = trimmed.find(SUFFIX)?;
    let file = &trimmed[..idx + SUFFIX.len() - 1];
    let rest = &trimmed[idx + SUFFIX.len()..];
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let line_no = rest[..digits].parse().ok()?;
    Some((file, line_no, &rest[digits..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn record_with(lines: &[&str]) -> TestRecord {
        let mut record = TestRecord::new("TestExample");
        record.raw_lines = lines.iter().map(|l| (*l).to_string()).collect();
        record
    }

    #[test]
    fn test_plain_output_is_collected() {
        let parsed = GoTestDetailParser.parse(record_with(&["hello", "world"]));
        assert_eq!(parsed.output, "hello\nworld");
        assert!(parsed.error.is_empty());
        assert!(parsed.message.is_empty());
        assert_eq!(parsed.line, None);
    }

    #[test]
    fn test_failure_line() {
        let parsed = GoTestDetailParser.parse(record_with(&[
            "setup done",
            "math_test.go:14: expected 4, got 5",
            "math_test.go:15: expected 6, got 7",
        ]));
        assert_eq!(parsed.file, "math_test.go");
        assert_eq!(parsed.line, Some(14));
        assert_eq!(
            parsed.message,
            "setup done\nmath_test.go:14: expected 4, got 5\nmath_test.go:15: expected 6, got 7"
        );
        assert_eq!(parsed.output, "setup done");
        assert!(parsed.error.is_empty());
    }

    #[test]
    fn test_subtest_failure_is_indented() {
        let parsed = GoTestDetailParser.parse(record_with(&[
            "=== RUN   TestExample/case_1",
            "    table_test.go:30: bad value",
        ]));
        assert_eq!(parsed.file, "table_test.go");
        assert_eq!(parsed.line, Some(30));
    }

    #[test]
    fn test_panic_sets_error_and_location() {
        let parsed = GoTestDetailParser.parse(record_with(&[
            "before",
            "panic: runtime error: index out of range [recovered]",
            "\tpanic: runtime error: index out of range",
            "",
            "goroutine 7 [running]:",
            "github.com/x/foo.TestExample(0xc0000a2000)",
            "\t/home/dev/foo/foo_test.go:42 +0x1d",
        ]));
        assert!(parsed.panicked());
        assert!(parsed.error.starts_with("before\npanic: runtime error"));
        assert!(parsed.stack_trace.starts_with("panic: runtime error"));
        assert_eq!(parsed.file, "/home/dev/foo/foo_test.go");
        assert_eq!(parsed.line, Some(42));
        assert_eq!(parsed.output, "before");
    }

    #[test]
    fn test_panic_after_failure_wins_location() {
        let parsed = GoTestDetailParser.parse(record_with(&[
            "a_test.go:3: first",
            "panic: boom",
            "\t/src/a_test.go:9 +0x20",
        ]));
        assert_eq!(parsed.message, "a_test.go:3: first\npanic: boom\n\t/src/a_test.go:9 +0x20");
        assert_eq!(parsed.file, "/src/a_test.go");
        assert_eq!(parsed.line, Some(9));
    }

    #[test]
    fn test_raw_lines_are_preserved_for_caller() {
        let parsed = GoTestDetailParser.parse(record_with(&["x"]));
        assert_eq!(parsed.raw_lines, vec!["x".to_string()]);
    }

    #[test]
    fn test_closure_and_noop_parsers() {
        let parser = |mut record: TestRecord| {
            record.error = "forced".to_string();
            record
        };
        assert!(parser.parse(record_with(&[])).panicked());
        assert_eq!(NoopDetailParser.parse(record_with(&["x"])).output, "");
    }
}
