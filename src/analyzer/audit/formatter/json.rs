//! JSON formatter.

use crate::analyzer::audit::evaluate::AuditSummary;
use crate::analyzer::audit::types::{AttributeValue, Record};
use serde::Serialize;

/// Format records as JSON.
pub fn format(records: &[Record]) -> String {
    let output = JsonOutput {
        records: records.iter().map(JsonRecord::from).collect(),
        summary: AuditSummary::from_records(records),
    };
    serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
        log::error!("Failed to serialize JSON report: {}", e);
        "{}".to_string()
    })
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    records: Vec<JsonRecord<'a>>,
    summary: AuditSummary,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    cluster: &'a str,
    namespace: &'a str,
    kind: &'static str,
    name: &'a str,
    flagged: bool,
    attributes: Vec<JsonAttribute<'a>>,
}

#[derive(Serialize)]
struct JsonAttribute<'a> {
    container: &'a str,
    name: &'a str,
    value: &'a AttributeValue,
    default: bool,
    set: bool,
    flagged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl<'a> From<&'a Record> for JsonRecord<'a> {
    fn from(r: &'a Record) -> Self {
        Self {
            cluster: &r.cluster,
            namespace: &r.namespace,
            kind: r.kind.as_str(),
            name: &r.kind_name,
            flagged: r.is_flagged(),
            attributes: r
                .attributes
                .iter()
                .map(|a| JsonAttribute {
                    container: &a.container,
                    name: &a.name,
                    value: &a.value,
                    default: a.is_default(),
                    set: a.is_set(),
                    flagged: a.is_flagged(),
                    reason: a.reason.as_deref(),
                })
                .collect(),
        }
    }
}
