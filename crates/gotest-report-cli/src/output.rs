//! JSON rendering of package reports

use chrono::{DateTime, Utc};
use gotest_report::{PackageReport, ReportError};
use serde::{Deserialize, Serialize};

/// A report stamped with the time it was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// The parsed package report
    pub report: PackageReport,
}

/// How a report is written out
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Indent the JSON
    pub pretty: bool,
    /// Wrap the report in a [`ReportEnvelope`]
    pub envelope: bool,
}

/// Render a report as JSON
///
/// `generated_at` is only used when the envelope is requested.
///
/// # Errors
///
/// Returns `ReportError::Json` if serialization fails.
pub fn render(
    report: PackageReport,
    options: RenderOptions,
    generated_at: DateTime<Utc>,
) -> Result<String, ReportError> {
    let json = if options.envelope {
        let envelope = ReportEnvelope {
            generated_at,
            report,
        };
        if options.pretty {
            serde_json::to_string_pretty(&envelope)?
        } else {
            serde_json::to_string(&envelope)?
        }
    } else if options.pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    Ok(json)
}
