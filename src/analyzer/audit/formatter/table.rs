//! Table formatter for terminal output.

use crate::analyzer::audit::evaluate::AuditSummary;
use crate::analyzer::audit::types::Record;
use colored::{ColoredString, Colorize};

/// Format records as a human-readable table.
///
/// Each workload gets a heading; each attribute a line with its value,
/// provenance and, when flagged, the reason. Escape codes are only emitted
/// when `color` is true.
pub fn format(records: &[Record], color: bool) -> String {
    let paint = |text: &str, style: fn(&str) -> ColoredString| {
        if color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    };

    let mut output = String::new();

    for r in records {
        let heading = format!("{} {} ({})", r.kind, r.kind_name, r.namespace);
        if r.is_flagged() {
            output.push_str(&format!("{}\n", paint(&heading, |t| t.bold().yellow())));
        } else {
            output.push_str(&format!("{}\n", paint(&heading, |t| t.bold().green())));
        }

        let width = r
            .attributes
            .iter()
            .map(|a| a.name.len())
            .max()
            .unwrap_or(0);

        let mut container = None;
        for a in &r.attributes {
            if container != Some(a.container.as_str()) {
                container = Some(a.container.as_str());
                output.push_str(&format!("  {}\n", paint(&a.container, |t| t.dimmed())));
            }

            let provenance = if a.is_set() { "set" } else { "default" };
            let line = format!(
                "    {:width$}  {:<16}  {:<7}",
                a.name,
                a.value.to_string(),
                provenance,
                width = width
            );
            match &a.reason {
                Some(reason) if a.is_flagged() => {
                    output.push_str(&format!("{} {}\n", paint(&line, |t| t.red()), reason));
                }
                _ => output.push_str(&format!("{}\n", line)),
            }
        }
        output.push('\n');
    }

    let summary = AuditSummary::from_records(records);
    if records.is_empty() {
        output.push_str("No workloads found.\n");
    } else {
        output.push_str(&format!(
            "Audited {} workload(s): {} flagged, {} of {} attribute(s) flagged.\n",
            summary.workloads,
            summary.flagged_workloads,
            summary.flagged_attributes,
            summary.attributes
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::audit::context::{PodSpec, Workload};
    use crate::analyzer::audit::evaluate::evaluate_workload;
    use crate::analyzer::audit::types::WorkloadKind;

    #[test]
    fn test_table_output() {
        let workload = Workload::new("c", "ops", WorkloadKind::Job, "migrate", PodSpec::default());
        let output = format(&[evaluate_workload(&workload)], false);

        assert!(output.starts_with("Job migrate (ops)\n"));
        assert!(output.contains("[Global Attribute - ALL]"));
        assert!(output.contains("Run as user is not set"));
        assert!(output.contains("Audited 1 workload(s): 1 flagged, 5 of 6 attribute(s) flagged."));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        colored::control::set_override(true);
        let workload = Workload::new("c", "ops", WorkloadKind::Job, "migrate", PodSpec::default());
        let records = [evaluate_workload(&workload)];

        assert!(format(&records, true).contains('\u{1b}'));
        assert!(!format(&records, false).contains('\u{1b}'));
        colored::control::unset_override();
    }

    #[test]
    fn test_empty() {
        assert_eq!(format(&[], false), "No workloads found.\n");
    }
}
