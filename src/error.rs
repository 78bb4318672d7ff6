//! Error types for the workload auditor.

use crate::analyzer::audit::cluster_client::ClusterError;
use crate::analyzer::audit::parser::YamlParseError;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Talking to the cluster failed
    #[error("Kubernetes error: {0}")]
    Cluster(#[from] ClusterError),

    /// Manifests could not be read or parsed
    #[error("Manifest error: {0}")]
    Manifest(#[from] YamlParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParsingFailed(String),
}

/// Result type alias for auditor operations
pub type Result<T> = std::result::Result<T, AuditError>;
