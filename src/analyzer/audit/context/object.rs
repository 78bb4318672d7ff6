//! Workload input model.
//!
//! Simplified representations of the pod template fields the auditor
//! inspects. Both collectors go through the `k8s_openapi` pod spec and the
//! `From` conversions below, so a manifest and the live object it created
//! are classified identically.

use crate::analyzer::audit::types::WorkloadKind;
use k8s_openapi::api::core::v1 as core;
use serde::{Deserialize, Serialize};

/// Pod-level security context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodSecurityContext {
    pub run_as_user: Option<i64>,
    pub run_as_group: Option<i64>,
    pub run_as_non_root: Option<bool>,
}

/// Container-level security context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityContext {
    pub privileged: Option<bool>,
    pub allow_privilege_escalation: Option<bool>,
    pub read_only_root_filesystem: Option<bool>,
    pub run_as_user: Option<i64>,
    pub run_as_group: Option<i64>,
}

/// Simplified container spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub name: String,
    pub image: Option<String>,
    pub image_pull_policy: Option<String>,
    pub security_context: Option<SecurityContext>,
}

impl ContainerSpec {
    /// Create a container with just a name and image.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: Some(image.into()),
            ..Default::default()
        }
    }

    /// Set the image pull policy.
    pub fn with_pull_policy(mut self, policy: impl Into<String>) -> Self {
        self.image_pull_policy = Some(policy.into());
        self
    }

    /// Set the security context.
    pub fn with_security_context(mut self, sc: SecurityContext) -> Self {
        self.security_context = Some(sc);
        self
    }
}

/// Pod spec (simplified).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodSpec {
    pub host_network: Option<bool>,
    pub security_context: Option<PodSecurityContext>,
    pub service_account_name: Option<String>,
    pub dns_policy: Option<String>,
    pub containers: Vec<ContainerSpec>,
}

impl From<&core::PodSpec> for PodSpec {
    fn from(spec: &core::PodSpec) -> Self {
        Self {
            host_network: spec.host_network,
            security_context: spec.security_context.as_ref().map(|psc| PodSecurityContext {
                run_as_user: psc.run_as_user,
                run_as_group: psc.run_as_group,
                run_as_non_root: psc.run_as_non_root,
            }),
            service_account_name: spec.service_account_name.clone(),
            dns_policy: spec.dns_policy.clone(),
            containers: spec.containers.iter().map(ContainerSpec::from).collect(),
        }
    }
}

impl From<&core::Container> for ContainerSpec {
    fn from(container: &core::Container) -> Self {
        Self {
            name: container.name.clone(),
            image: container.image.clone(),
            image_pull_policy: container.image_pull_policy.clone(),
            security_context: container
                .security_context
                .as_ref()
                .map(|sc| SecurityContext {
                    privileged: sc.privileged,
                    allow_privilege_escalation: sc.allow_privilege_escalation,
                    read_only_root_filesystem: sc.read_only_root_filesystem,
                    run_as_user: sc.run_as_user,
                    run_as_group: sc.run_as_group,
                }),
        }
    }
}

/// A workload object ready for evaluation.
///
/// The pod spec is mandatory; collectors skip objects without a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    /// Cluster label written to the report.
    pub cluster: String,
    pub namespace: String,
    pub kind: WorkloadKind,
    pub name: String,
    pub pod_spec: PodSpec,
}

impl Workload {
    pub fn new(
        cluster: impl Into<String>,
        namespace: impl Into<String>,
        kind: WorkloadKind,
        name: impl Into<String>,
        pod_spec: PodSpec,
    ) -> Self {
        Self {
            cluster: cluster.into(),
            namespace: namespace.into(),
            kind,
            name: name.into(),
            pod_spec,
        }
    }
}
