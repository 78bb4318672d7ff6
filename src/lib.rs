//! # Workload Audit
//!
//! Audits Kubernetes workloads (Deployments, DaemonSets, StatefulSets and
//! Jobs) for security misconfigurations in their pod templates.
//!
//! ## Features
//!
//! - **Tri-state attributes**: every inspected field is reported as defaulted, explicitly set, or flagged
//! - **Reasons**: each flagged attribute carries a human-readable explanation
//! - **Live clusters and manifests**: workloads come from the Kubernetes API or from YAML files
//! - **Reports**: CSV, JSON and terminal table output
//!
//! ## Example
//!
//! ```rust,no_run
//! use workload_audit::analyzer::audit::{parser, evaluate_workloads, format_report_to_string, ReportFormat};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let workloads = parser::parse_path(Path::new("./k8s"), "local")?;
//! let records = evaluate_workloads(&workloads, true);
//! println!("{}", format_report_to_string(&records, ReportFormat::Csv));
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::{Record, Workload, evaluate_workload, evaluate_workloads};
pub use error::{AuditError, Result};
pub use handlers::*;
use cli::Commands;
use config::types::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Cluster {
            context,
            cluster_name,
            namespace,
            exclude_namespace,
            include_system,
            kind,
            report,
        } => {
            let options = ClusterOptions {
                context,
                cluster_name,
                namespaces: namespace,
                exclude_namespaces: exclude_namespace,
                include_system,
                kinds: kind,
                report,
            };
            handlers::handle_cluster(options, config).await
        }
        Commands::Manifests {
            path,
            cluster_name,
            kind,
            report,
        } => handlers::handle_manifests(&path, &cluster_name, &kind, &report, config),
        Commands::Rules => handlers::handle_rules(),
    }
}
