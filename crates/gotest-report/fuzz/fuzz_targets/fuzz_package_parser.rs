// Copyright (c) 2026 - present gotest-report contributors
// SPDX-License-Identifier: MIT

//! Fuzz target for the package parser
//!
//! Any text, however malformed, must produce a report without panicking,
//! and the report must serialize.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gotest_report::parse_package_output;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let report = parse_package_output(input);
        let _ = report.to_json();
        assert!(report.test_results.iter().all(|t| t.raw_lines.is_empty()));
    }
});
