// Handler modules
pub mod audit;

// Re-export all handler functions
pub use audit::{
    ClusterOptions, ReportSettings, emit_report, handle_cluster, handle_manifests, handle_rules,
};
