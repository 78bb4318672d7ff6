//! Evaluation driver.
//!
//! Runs the pod-level rules once per workload and the container-level rules
//! once per container. Each record is owned by the call that builds it, so
//! workloads can be evaluated in parallel and collected in input order.

use crate::analyzer::audit::context::Workload;
use crate::analyzer::audit::rules::{evaluate_container, evaluate_pod_spec};
use crate::analyzer::audit::types::{Record, RecordBuilder};
use rayon::prelude::*;
use serde::Serialize;

/// Evaluate a single workload.
pub fn evaluate_workload(workload: &Workload) -> Record {
    log::debug!(
        "Analyzing {} [{}/{}]",
        workload.kind,
        workload.namespace,
        workload.name
    );

    let mut builder = RecordBuilder::new(
        workload.cluster.as_str(),
        workload.namespace.as_str(),
        workload.kind,
        workload.name.as_str(),
    );

    evaluate_pod_spec(&workload.pod_spec, &mut builder);

    if workload.pod_spec.containers.is_empty() {
        log::warn!(
            "{} [{}/{}] has no containers",
            workload.kind,
            workload.namespace,
            workload.name
        );
    }
    for container in &workload.pod_spec.containers {
        evaluate_container(container, &mut builder);
    }

    builder.finish()
}

/// Evaluate many workloads, preserving input order.
pub fn evaluate_workloads(workloads: &[Workload], parallel: bool) -> Vec<Record> {
    if parallel {
        workloads.par_iter().map(evaluate_workload).collect()
    } else {
        workloads.iter().map(evaluate_workload).collect()
    }
}

/// Totals over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    /// Number of workloads evaluated.
    pub workloads: usize,
    /// Workloads with at least one flagged attribute.
    pub flagged_workloads: usize,
    pub attributes: usize,
    pub flagged_attributes: usize,
}

impl AuditSummary {
    pub fn from_records(records: &[Record]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.workloads += 1;
            acc.attributes += r.attributes.len();
            acc.flagged_attributes += r.flagged_count();
            if r.is_flagged() {
                acc.flagged_workloads += 1;
            }
            acc
        })
    }
}
