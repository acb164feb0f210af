// Copyright (c) 2026 - present gotest-report contributors
// SPDX-License-Identifier: MIT

//! Error types for gotest-report
//!
//! Parsing itself never fails. These errors only arise at the edges: reading
//! captured output and serializing the finished report.

use thiserror::Error;

/// Errors that can occur while reading test output or writing reports
#[derive(Debug, Error)]
pub enum ReportError {
    /// Error serializing a report to JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading captured test output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Captured output could not be interpreted as text
    #[error("Invalid test output: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },
}
