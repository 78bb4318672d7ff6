//! CSV formatter.
//!
//! One row per attribute, preceded by a header row. Fields containing a
//! comma, quote or line break are quoted and inner quotes doubled.

use crate::analyzer::audit::types::Record;

/// Report columns, in order.
pub const HEADER: [&str; 10] = [
    "Cluster Name",
    "Namespace Name",
    "Workload Kind",
    "Workload Name",
    "Container Name",
    "Attribute Name",
    "Attribute Value",
    "Attribute Defaulted",
    "Attribute Set",
    "Attribute Flagged",
];

/// Format records as CSV.
pub fn format(records: &[Record]) -> String {
    let mut output = String::new();
    push_row(&mut output, HEADER.iter().map(|h| h.to_string()));

    for r in records {
        for a in &r.attributes {
            push_row(
                &mut output,
                [
                    r.cluster.clone(),
                    r.namespace.clone(),
                    r.kind.to_string(),
                    r.kind_name.clone(),
                    a.container.clone(),
                    a.name.clone(),
                    a.value.to_string(),
                    a.is_default().to_string(),
                    a.is_set().to_string(),
                    a.is_flagged().to_string(),
                ],
            );
        }
    }

    output
}

fn push_row(output: &mut String, fields: impl IntoIterator<Item = String>) {
    let row: Vec<String> = fields.into_iter().map(|f| escape(&f)).collect();
    output.push_str(&row.join(","));
    output.push('\n');
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
