//! Output formatters for audit reports.

pub mod csv;
pub mod json;
pub mod table;

use crate::analyzer::audit::types::Record;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One row per attribute.
    #[default]
    Csv,
    /// Records with reasons and a summary.
    Json,
    /// Human-readable table for terminals.
    Table,
}

impl ReportFormat {
    /// Parse from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "table" | "plain" | "text" => Some(Self::Table),
            _ => None,
        }
    }

    /// File extension for written reports.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Table => "txt",
        }
    }
}

/// Format records to a string for the terminal.
///
/// Table output is colored unless `colored` disables it for the stream.
pub fn format_report_to_string(records: &[Record], format: ReportFormat) -> String {
    render(records, format, true)
}

fn render(records: &[Record], format: ReportFormat, color: bool) -> String {
    match format {
        ReportFormat::Csv => csv::format(records),
        ReportFormat::Json => json::format(records),
        ReportFormat::Table => table::format(records, color),
    }
}

/// Path a report named `name` is written to.
pub fn report_path(dir: &Path, name: &str, format: ReportFormat) -> PathBuf {
    dir.join(format!("{}.{}", name, format.extension()))
}

/// Write records to `<dir>/<name>.<ext>` and return the path.
///
/// Files never contain terminal escape codes.
pub fn write_report(
    records: &[Record],
    format: ReportFormat,
    dir: &Path,
    name: &str,
) -> std::io::Result<PathBuf> {
    let path = report_path(dir, name, format);
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, render(records, format, false))?;
    log::info!("Report written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(ReportFormat::parse("CSV"), Some(ReportFormat::Csv));
        assert_eq!(ReportFormat::parse("json"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::parse("plain"), Some(ReportFormat::Table));
        assert_eq!(ReportFormat::parse("sarif"), None);
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(&[], ReportFormat::Csv, dir.path(), "report").unwrap();
        assert_eq!(path, dir.path().join("report.csv"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("Cluster Name,"));
    }

    #[test]
    fn test_table_file_is_plain_text() {
        use crate::analyzer::audit::context::{PodSpec, Workload};
        use crate::analyzer::audit::evaluate::evaluate_workload;
        use crate::analyzer::audit::types::WorkloadKind;

        colored::control::set_override(true);
        let workload = Workload::new("c", "ops", WorkloadKind::Job, "migrate", PodSpec::default());
        let records = [evaluate_workload(&workload)];

        let dir = tempfile::tempdir().unwrap();
        let path = write_report(&records, ReportFormat::Table, dir.path(), "audit").unwrap();
        colored::control::unset_override();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("Job migrate (ops)\n"));
        assert!(!content.contains('\u{1b}'));
    }
}
