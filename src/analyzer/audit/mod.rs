//! Workload security audit.
//!
//! Classifies every inspected pod template field as a tri-state value
//! (default, explicitly set, flagged) and attaches a reason to each flagged
//! value.
//!
//! # Example
//!
//! ```rust
//! use workload_audit::analyzer::audit::{
//!     ContainerSpec, PodSpec, Workload, WorkloadKind, evaluate_workload,
//! };
//!
//! let workload = Workload::new(
//!     "prod",
//!     "web",
//!     WorkloadKind::Deployment,
//!     "nginx",
//!     PodSpec {
//!         containers: vec![ContainerSpec::new("nginx", "nginx:latest")],
//!         ..Default::default()
//!     },
//! );
//!
//! let record = evaluate_workload(&workload);
//! for attr in record.attributes.iter().filter(|a| a.is_flagged()) {
//!     println!("{} [{}]: {}", attr.name, attr.container, attr.reason.as_deref().unwrap_or(""));
//! }
//! ```
//!
//! # Attributes
//!
//! ## Pod level
//! - Host network access
//! - Run as user / run as group / run as non root
//! - Service account
//! - DNS policy (informational)
//!
//! ## Container level
//! - Image pull policy and image tag
//! - Privileged mode and privilege escalation
//! - Read-only root filesystem
//! - Run as user / run as group
//!
//! Pod-level run-as values are recorded for inheritance, but container rules
//! do not read them yet: a container without its own security context is
//! reported as not defined even when the pod sets the value.

pub mod attribute;
pub mod cluster_client;
pub mod context;
pub mod evaluate;
pub mod formatter;
pub mod parser;
pub mod rules;
pub mod types;

// Re-export main types and functions
pub use attribute::new_attribute;
pub use context::{ContainerSpec, PodSecurityContext, PodSpec, SecurityContext, Workload};
pub use evaluate::{AuditSummary, evaluate_workload, evaluate_workloads};
pub use formatter::{ReportFormat, format_report_to_string, write_report};
pub use types::{
    Attribute, AttributeValue, GLOBAL_CONTAINER, Provenance, Record, RecordBuilder, Verdict,
    WorkloadKind,
};
