//! Input context for the auditor.
//!
//! Workloads are produced by a collector (live cluster or manifest files)
//! and consumed read-only by the rule sets.

pub mod object;

pub use object::{ContainerSpec, PodSecurityContext, PodSpec, SecurityContext, Workload};
