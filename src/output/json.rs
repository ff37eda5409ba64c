//! JSON output formatter for machine processing
//!
//! The full report serializes as:
//! `{ left, right, counts, result: { matched, mismatched, left_only, right_only }, metadata? }`
//! with every group keyed or ordered by component id.

use crate::domain::ComparisonReport;
use crate::output::{OutputFormatter, Verbosity};
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Quiet mode emits only the counts
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ComparisonReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(report, writer);
        }

        serde_json::to_writer_pretty(&mut *writer, report)?;
        writeln!(writer)
    }

    fn format_summary(
        &self,
        report: &ComparisonReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        serde_json::to_writer(&mut *writer, &report.counts)?;
        writeln!(writer)
    }
}
