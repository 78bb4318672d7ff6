//! Analyzers.

pub mod audit;

pub use audit::{Record, Workload, evaluate_workload, evaluate_workloads};
