use crate::analyzer::audit::formatter::ReportFormat;
use crate::analyzer::audit::types::WorkloadKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cluster: ClusterConfig,
    pub audit: AuditConfig,
    pub report: ReportConfig,
}

/// Cluster connection and namespace selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Kubeconfig context (None = current context)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Label for the report's cluster column (defaults to the context name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only audit these namespaces
    pub namespaces: Vec<String>,
    /// Glob patterns of namespaces to skip
    pub exclude_namespaces: Vec<String>,
    /// Audit kube-* system namespaces
    pub include_system: bool,
}

/// Evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Workload kinds to audit
    pub kinds: Vec<WorkloadKind>,
    /// Evaluate workloads on the rayon thread pool
    pub parallel: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            kinds: WorkloadKind::ALL.to_vec(),
            parallel: true,
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Report file name without extension
    pub name: String,
    pub format: ReportFormat,
    /// Directory reports are written to (None = stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            name: "report".to_string(),
            format: ReportFormat::Csv,
            output_dir: None,
        }
    }
}
