//! Error log written when a run fails
//!
//! The log holds a timestamp, the error message, its cause chain, some
//! run context and the full debug rendering of the error (which includes a
//! backtrace when `RUST_BACKTRACE` is set).

use crate::config::Settings;
use crate::domain::Side;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as _;
use std::path::Path;

/// Diagnostic record for one failed run
#[derive(Debug, Clone)]
pub struct ErrorReport {
    /// When the failure was recorded
    pub timestamp: DateTime<Utc>,
    /// Top-level message
    pub message: String,
    /// Messages of the underlying causes, outermost first
    pub causes: Vec<String>,
    /// Key/value context about the run
    pub context: Vec<(String, String)>,
    /// Debug rendering of the error
    pub detail: String,
}

impl ErrorReport {
    /// Capture an error now
    pub fn capture(error: &anyhow::Error) -> Self {
        Self::capture_at(error, Utc::now())
    }

    /// Capture an error with an explicit timestamp
    pub fn capture_at(error: &anyhow::Error, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            message: error.to_string(),
            causes: error.chain().skip(1).map(|cause| cause.to_string()).collect(),
            context: vec![("version".to_string(), env!("CARGO_PKG_VERSION").to_string())],
            detail: format!("{:?}", error),
        }
    }

    /// Add a context entry
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Add the resolved manifest paths and labels
    pub fn with_settings(self, settings: &Settings) -> Self {
        [Side::Left, Side::Right]
            .into_iter()
            .fold(self, |report, side| {
                report.with_context(
                    side.to_string(),
                    format!(
                        "{} ({})",
                        settings.path(side).display(),
                        settings.label(side)
                    ),
                )
            })
    }

    /// Render the log file content
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "time: {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        );
        let _ = writeln!(out, "error: {}", self.message);

        if !self.causes.is_empty() {
            let _ = writeln!(out, "\ncaused by:");
            for (i, cause) in self.causes.iter().enumerate() {
                let _ = writeln!(out, "  {}: {}", i, cause);
            }
        }

        if !self.context.is_empty() {
            let _ = writeln!(out, "\ncontext:");
            for (key, value) in &self.context {
                let _ = writeln!(out, "  {}: {}", key, value);
            }
        }

        let _ = writeln!(out, "\ndetail:\n{}", self.detail);
        out
    }

    /// Write the log to `path`, replacing any earlier log
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.render())
    }
}
