//! YAML parsing for Kubernetes workload manifests.

use crate::analyzer::audit::context::{PodSpec, Workload};
use crate::analyzer::audit::types::WorkloadKind;
use k8s_openapi::api::core::v1 as core;
use serde::Deserialize;
use std::path::Path;

/// Namespace assumed for manifests that do not declare one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Parse a YAML string containing one or more Kubernetes objects.
///
/// Objects that are not auditable workloads, or that have no usable pod
/// template, are skipped.
pub fn parse_yaml(content: &str, cluster: &str) -> Result<Vec<Workload>, YamlParseError> {
    let mut workloads = Vec::new();

    for document in serde_yaml::Deserializer::from_str(content) {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|e| YamlParseError::SyntaxError(e.to_string()))?;

        if value.is_null() {
            continue;
        }
        if let Some(workload) = parse_workload(&value, cluster) {
            workloads.push(workload);
        }
    }

    Ok(workloads)
}

/// Parse a YAML file.
pub fn parse_yaml_file(path: &Path, cluster: &str) -> Result<Vec<Workload>, YamlParseError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| YamlParseError::IoError(format!("{}: {}", path.display(), e)))?;

    parse_yaml(&content, cluster).map_err(|e| match e {
        YamlParseError::SyntaxError(msg) => {
            YamlParseError::SyntaxError(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parse all YAML files in a directory (recursively), in path order.
pub fn parse_yaml_dir(path: &Path, cluster: &str) -> Result<Vec<Workload>, YamlParseError> {
    let mut workloads = Vec::new();

    for entry in walkdir::WalkDir::new(path)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let entry_path = entry.path();
        if !entry_path.is_file() {
            continue;
        }
        let ext = entry_path.extension().and_then(|e| e.to_str());
        if matches!(ext, Some("yaml") | Some("yml")) {
            match parse_yaml_file(entry_path, cluster) {
                Ok(mut found) => workloads.append(&mut found),
                Err(e) => log::warn!("Skipping {}: {}", entry_path.display(), e),
            }
        }
    }

    Ok(workloads)
}

/// Parse a file or a directory of manifests.
pub fn parse_path(path: &Path, cluster: &str) -> Result<Vec<Workload>, YamlParseError> {
    if path.is_dir() {
        parse_yaml_dir(path, cluster)
    } else {
        parse_yaml_file(path, cluster)
    }
}

// ============================================================================
// Parse helper functions
// ============================================================================

fn get_string(value: &serde_yaml::Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(|s| s.to_string())
}

fn parse_workload(value: &serde_yaml::Value, cluster: &str) -> Option<Workload> {
    let kind_str = value.get("kind")?.as_str()?;
    let Some(kind) = WorkloadKind::from_kind(kind_str) else {
        log::debug!("Ignoring object of kind {}", kind_str);
        return None;
    };

    let metadata = value.get("metadata");
    let name = metadata
        .and_then(|m| get_string(m, "name"))
        .unwrap_or_default();
    let namespace = metadata
        .and_then(|m| get_string(m, "namespace"))
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

    let Some(spec) = value
        .get("spec")
        .and_then(|s| s.get("template"))
        .and_then(|t| t.get("spec"))
    else {
        log::warn!("{} [{}/{}] has no pod template; skipping", kind, namespace, name);
        return None;
    };

    match serde_yaml::from_value::<core::PodSpec>(spec.clone()) {
        Ok(pod_spec) => Some(Workload::new(
            cluster,
            namespace,
            kind,
            name,
            PodSpec::from(&pod_spec),
        )),
        Err(e) => {
            log::warn!("{} [{}/{}] has an invalid pod template; skipping: {}", kind, namespace, name, e);
            None
        }
    }
}

/// YAML parsing errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum YamlParseError {
    /// I/O error reading file.
    #[error("I/O error: {0}")]
    IoError(String),
    /// YAML syntax error.
    #[error("YAML syntax error: {0}")]
    SyntaxError(String),
}
