//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One section per reconciliation group with colors
//! - Catalog display names next to ids when enrichment ran
//! - Load warnings and component descriptions in verbose mode
//! - A one-line summary

use crate::domain::{ComparisonReport, ManifestSummary, Side};
use crate::output::{OutputFormatter, Verbosity};
use colored::{ColoredString, Colorize};
use std::io::Write;

const RULE: &str = "==================================================";

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Id with its catalog name, e.g. `jei (Just Enough Items)`
    fn component_name(&self, report: &ComparisonReport, id: &str) -> String {
        match report.metadata_for(id) {
            Some(entry) => format!("{} ({})", id, entry.display_name()),
            None => id.to_string(),
        }
    }

    fn write_description(
        &self,
        report: &ComparisonReport,
        id: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Verbose {
            return Ok(());
        }
        let Some(meta) = report.metadata_for(id).and_then(|entry| entry.known()) else {
            return Ok(());
        };
        if meta.description.is_empty() {
            return Ok(());
        }
        let line = format!("{} [{}]", meta.description, meta.source_platform);
        writeln!(writer, "      {}", self.paint(&line, |s| s.dimmed()))
    }

    fn write_header(&self, report: &ComparisonReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let title = format!(
            "Component comparison: {} vs {}",
            report.label(Side::Left),
            report.label(Side::Right)
        );
        writeln!(writer, "{}", RULE)?;
        writeln!(writer, "{}", self.paint(&title, |s| s.bold()))?;
        writeln!(writer, "{}", RULE)?;
        self.write_manifest_line(&report.left, writer)?;
        self.write_manifest_line(&report.right, writer)?;
        writeln!(writer)
    }

    fn write_manifest_line(
        &self,
        manifest: &ManifestSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let path = manifest.path.display().to_string();
        writeln!(
            writer,
            "  {}: {} ({} {})",
            manifest.label,
            self.paint(&path, |s| s.dimmed()),
            manifest.components,
            if manifest.components == 1 {
                "component"
            } else {
                "components"
            }
        )?;

        if self.verbosity != Verbosity::Verbose {
            return Ok(());
        }
        if !manifest.skipped_records.is_empty() {
            let indices: Vec<String> = manifest
                .skipped_records
                .iter()
                .map(usize::to_string)
                .collect();
            let line = format!("skipped records at indices: {}", indices.join(", "));
            writeln!(writer, "    {}", self.paint(&line, |s| s.yellow()))?;
        }
        if !manifest.overwritten_ids.is_empty() {
            let line = format!(
                "duplicate ids (last entry kept): {}",
                manifest.overwritten_ids.join(", ")
            );
            writeln!(writer, "    {}", self.paint(&line, |s| s.yellow()))?;
        }
        Ok(())
    }

    fn write_section_title(
        &self,
        title: &str,
        count: usize,
        style: fn(&str) -> ColoredString,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let line = format!("{}: {}", title, count);
        writeln!(writer, "{}", self.paint(&line, style))
    }

    fn write_matched(&self, report: &ComparisonReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let matched = report.result.matched();
        self.write_section_title("Matched (same version)", matched.len(), |s| s.green(), writer)?;
        for (id, version) in matched {
            writeln!(writer, "  - {}: {}", self.component_name(report, id), version)?;
            self.write_description(report, id, writer)?;
        }
        writeln!(writer)
    }

    fn write_mismatched(
        &self,
        report: &ComparisonReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let mismatched = report.result.mismatched();
        self.write_section_title(
            "Mismatched (different version)",
            mismatched.len(),
            |s| s.red().bold(),
            writer,
        )?;
        for (id, pair) in mismatched {
            let arrow = if self.color {
                "vs".dimmed().to_string()
            } else {
                "vs".to_string()
            };
            writeln!(
                writer,
                "  - {}: {} {} {} {} {}",
                self.component_name(report, id),
                report.label(Side::Left),
                pair.left,
                arrow,
                report.label(Side::Right),
                pair.right
            )?;
            self.write_description(report, id, writer)?;
        }
        writeln!(writer)
    }

    fn write_one_sided(
        &self,
        report: &ComparisonReport,
        side: Side,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let ids = match side {
            Side::Left => report.result.left_only(),
            Side::Right => report.result.right_only(),
        };
        let title = format!("Only in {}", report.label(side));
        self.write_section_title(&title, ids.len(), |s| s.yellow(), writer)?;
        for id in ids {
            writeln!(writer, "  - {}", self.component_name(report, id))?;
            self.write_description(report, id, writer)?;
        }
        writeln!(writer)
    }

    fn summary_line(&self, report: &ComparisonReport) -> String {
        let counts = &report.counts;
        format!(
            "Summary: {} matched, {} mismatched, {} only in {}, {} only in {}",
            counts.matched,
            counts.mismatched,
            counts.left_only,
            report.label(Side::Left),
            counts.right_only,
            report.label(Side::Right)
        )
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &ComparisonReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(report, writer);
        }

        self.write_header(report, writer)?;
        self.write_matched(report, writer)?;
        self.write_mismatched(report, writer)?;
        self.write_one_sided(report, Side::Left, writer)?;
        self.write_one_sided(report, Side::Right, writer)?;

        writeln!(writer, "{}", RULE)?;
        self.format_summary(report, writer)
    }

    fn format_summary(
        &self,
        report: &ComparisonReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let line = self.summary_line(report);
        if report.result.is_in_sync() {
            writeln!(writer, "{}", self.paint(&line, |s| s.green()))
        } else {
            writeln!(writer, "{}", self.paint(&line, |s| s.bold()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::{sample_report, sample_report_with_metadata};

    fn render(formatter: &TextFormatter, report: &ComparisonReport) -> String {
        let mut output = Vec::new();
        formatter.format(report, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_text_output_groups() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let text = render(&formatter, &sample_report());

        assert!(text.contains("Component comparison: client vs server"));
        assert!(text.contains("client: client/mods_client.json (3 components)"));
        assert!(text.contains("Matched (same version): 1"));
        assert!(text.contains("  - alpha: 1.0"));
        assert!(text.contains("Mismatched (different version): 1"));
        assert!(text.contains("  - beta: client 2.0 vs server 2.1"));
        assert!(text.contains("Only in client: 1"));
        assert!(text.contains("  - delta"));
        assert!(text.contains("Only in server: 1"));
        assert!(text.contains("  - gamma"));
        assert!(text.contains("Summary: 1 matched, 1 mismatched, 1 only in client, 1 only in server"));
    }

    #[test]
    fn test_text_sections_in_order() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let text = render(&formatter, &sample_report());

        let matched = text.find("Matched").unwrap();
        let mismatched = text.find("Mismatched").unwrap();
        let left_only = text.find("Only in client").unwrap();
        let right_only = text.find("Only in server").unwrap();
        assert!(matched < mismatched);
        assert!(mismatched < left_only);
        assert!(left_only < right_only);
    }

    #[test]
    fn test_text_normal_hides_warnings() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let text = render(&formatter, &sample_report());
        assert!(!text.contains("duplicate ids"));
    }

    #[test]
    fn test_text_verbose_shows_warnings() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let text = render(&formatter, &sample_report());
        assert!(text.contains("duplicate ids (last entry kept): beta"));
    }

    #[test]
    fn test_text_quiet_prints_summary_only() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false);
        let text = render(&formatter, &sample_report());
        assert_eq!(
            text,
            "Summary: 1 matched, 1 mismatched, 1 only in client, 1 only in server\n"
        );
    }

    #[test]
    fn test_text_with_metadata() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let text = render(&formatter, &sample_report_with_metadata());

        assert!(text.contains("  - alpha (Alpha Mod): 1.0"));
        assert!(text.contains("  - beta (unknown): client 2.0 vs server 2.1"));
        assert!(!text.contains("Adds the first letter"));
    }

    #[test]
    fn test_text_verbose_metadata_description() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let text = render(&formatter, &sample_report_with_metadata());
        assert!(text.contains("Adds the first letter [Modrinth]"));
    }

    #[test]
    fn test_text_singular_component() {
        use crate::domain::{ComponentMap, LoadedManifest};

        let components: ComponentMap = [("solo", "1")].into_iter().collect();
        let loaded = LoadedManifest::new("one.json", components);
        let summary = ManifestSummary::from_loaded(Side::Left, "client", &loaded);

        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let mut output = Vec::new();
        formatter.write_manifest_line(&summary, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("(1 component)"));
    }

    #[test]
    fn test_text_new_uses_color() {
        let formatter = TextFormatter::new(Verbosity::Normal);
        assert!(formatter.color);
    }
}
