//! Kubernetes client for live cluster audits.
//!
//! Connects to a cluster, lists namespaces and the auditable workload kinds
//! in each, and converts their pod templates into [`Workload`]s.
//!
//! # Prerequisites
//!
//! - Valid kubeconfig (uses default context or specified context)
//! - RBAC permissions to list namespaces and workloads
//!
//! # Example
//!
//! ```rust,ignore
//! use workload_audit::analyzer::audit::cluster_client::{ClusterClient, NamespaceFilter};
//! use workload_audit::analyzer::audit::WorkloadKind;
//!
//! let client = ClusterClient::new(None, None).await?;
//! let workloads = client
//!     .collect(&NamespaceFilter::default(), &WorkloadKind::ALL)
//!     .await?;
//! ```

use crate::analyzer::audit::context::{PodSpec, Workload};
use crate::analyzer::audit::types::WorkloadKind;
use k8s_openapi::NamespaceResourceScope;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1 as core;
use kube::{
    Client, Config, Resource, ResourceExt,
    api::{Api, ListParams},
};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Error type for cluster client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("Failed to create Kubernetes client: {0}")]
    ClientCreation(#[from] kube::Error),

    #[error("Failed to infer Kubernetes config: {0}")]
    ConfigError(#[from] kube::config::InferConfigError),

    #[error("Failed to read kubeconfig: {0}")]
    KubeconfigError(#[from] kube::config::KubeconfigError),

    #[error("API request failed: {0}")]
    ApiError(String),
}

/// Decides which namespaces are audited.
#[derive(Debug, Clone, Default)]
pub struct NamespaceFilter {
    /// Only these namespaces, when non-empty.
    pub include: Vec<String>,
    /// Glob patterns of namespaces to skip.
    pub exclude: Vec<String>,
    /// Audit `kube-*` system namespaces too.
    pub include_system: bool,
}

impl NamespaceFilter {
    /// Check if a namespace should be audited.
    pub fn allows(&self, namespace: &str) -> bool {
        if !self.include.is_empty() {
            return self.include.iter().any(|n| n == namespace);
        }
        if !self.include_system && namespace.starts_with("kube-") {
            return false;
        }
        !self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(namespace))
                .unwrap_or(false)
                || pattern == namespace
        })
    }
}

/// Workload objects that carry a pod template.
trait PodTemplated {
    const KIND: WorkloadKind;

    fn pod_template(&self) -> Option<&core::PodTemplateSpec>;
}

impl PodTemplated for Deployment {
    const KIND: WorkloadKind = WorkloadKind::Deployment;

    fn pod_template(&self) -> Option<&core::PodTemplateSpec> {
        self.spec.as_ref().map(|s| &s.template)
    }
}

impl PodTemplated for DaemonSet {
    const KIND: WorkloadKind = WorkloadKind::DaemonSet;

    fn pod_template(&self) -> Option<&core::PodTemplateSpec> {
        self.spec.as_ref().map(|s| &s.template)
    }
}

impl PodTemplated for StatefulSet {
    const KIND: WorkloadKind = WorkloadKind::StatefulSet;

    fn pod_template(&self) -> Option<&core::PodTemplateSpec> {
        self.spec.as_ref().map(|s| &s.template)
    }
}

impl PodTemplated for Job {
    const KIND: WorkloadKind = WorkloadKind::Job;

    fn pod_template(&self) -> Option<&core::PodTemplateSpec> {
        self.spec.as_ref().map(|s| &s.template)
    }
}

/// Kubernetes cluster client.
pub struct ClusterClient {
    client: Client,
    cluster_name: String,
}

impl ClusterClient {
    /// Connect using the given kubeconfig context, or the inferred config.
    ///
    /// `cluster_name` labels the report; it defaults to the context name.
    pub async fn new(
        context: Option<&str>,
        cluster_name: Option<&str>,
    ) -> Result<Self, ClusterError> {
        let config = match context {
            Some(ctx) => {
                let kubeconfig = kube::config::Kubeconfig::read()?;
                Config::from_custom_kubeconfig(
                    kubeconfig,
                    &kube::config::KubeConfigOptions {
                        context: Some(ctx.to_string()),
                        ..Default::default()
                    },
                )
                .await?
            }
            None => Config::infer().await?,
        };
        let client = Client::try_from(config)?;

        let cluster_name = match (cluster_name, context) {
            (Some(name), _) => name.to_string(),
            (None, Some(ctx)) => ctx.to_string(),
            (None, None) => Self::current_context().unwrap_or_else(|_| "default".to_string()),
        };
        log::info!("Connected to cluster [{}]", cluster_name);

        Ok(Self {
            client,
            cluster_name,
        })
    }

    /// Get the current context name.
    pub fn current_context() -> Result<String, ClusterError> {
        let kubeconfig = kube::config::Kubeconfig::read()?;
        Ok(kubeconfig
            .current_context
            .unwrap_or_else(|| "default".to_string()))
    }

    /// The label written to the report's cluster column.
    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    /// List all namespace names.
    pub async fn list_namespaces(&self) -> Result<Vec<String>, ClusterError> {
        let namespaces: Api<core::Namespace> = Api::all(self.client.clone());
        let list = namespaces
            .list(&ListParams::default())
            .await
            .map_err(|e| ClusterError::ApiError(format!("failed to get namespaces: {}", e)))?;

        Ok(list.items.iter().map(|ns| ns.name_any()).collect())
    }

    /// List the workloads of the given kinds in one namespace.
    pub async fn list_workloads(
        &self,
        namespace: &str,
        kinds: &[WorkloadKind],
    ) -> Result<Vec<Workload>, ClusterError> {
        let mut workloads = Vec::new();
        for kind in kinds {
            let mut found = match kind {
                WorkloadKind::Deployment => self.list_kind::<Deployment>(namespace).await?,
                WorkloadKind::DaemonSet => self.list_kind::<DaemonSet>(namespace).await?,
                WorkloadKind::StatefulSet => self.list_kind::<StatefulSet>(namespace).await?,
                WorkloadKind::Job => self.list_kind::<Job>(namespace).await?,
            };
            workloads.append(&mut found);
        }
        Ok(workloads)
    }

    /// Collect workloads from every namespace the filter allows.
    pub async fn collect(
        &self,
        filter: &NamespaceFilter,
        kinds: &[WorkloadKind],
    ) -> Result<Vec<Workload>, ClusterError> {
        log::info!("Getting namespaces");
        let namespaces = self.list_namespaces().await?;

        let mut workloads = Vec::new();
        for (i, ns) in namespaces.iter().enumerate() {
            if !filter.allows(ns) {
                log::debug!("Skipping namespace [{}]", ns);
                continue;
            }
            log::info!("Working on namespace [{}] - [{}]", i, ns);
            let mut found = self.list_workloads(ns, kinds).await?;
            workloads.append(&mut found);
        }
        Ok(workloads)
    }

    async fn list_kind<K>(&self, namespace: &str) -> Result<Vec<Workload>, ClusterError>
    where
        K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
            + PodTemplated
            + Clone
            + DeserializeOwned
            + Debug,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await.map_err(|e| {
            ClusterError::ApiError(format!("failed to get {}s: {}", <K as PodTemplated>::KIND, e))
        })?;

        Ok(list
            .items
            .iter()
            .filter_map(|obj| to_workload(obj, &self.cluster_name, namespace))
            .collect())
    }
}

fn to_workload<K>(obj: &K, cluster: &str, namespace: &str) -> Option<Workload>
where
    K: Resource + PodTemplated,
{
    let name = obj.meta().name.clone().unwrap_or_default();
    let Some(spec) = obj.pod_template().and_then(|t| t.spec.as_ref()) else {
        log::warn!("{} [{}/{}] has no pod template; skipping", <K as PodTemplated>::KIND, namespace, name);
        return None;
    };

    let namespace = obj
        .meta()
        .namespace
        .clone()
        .unwrap_or_else(|| namespace.to_string());
    Some(Workload::new(cluster, namespace, <K as PodTemplated>::KIND, name, PodSpec::from(spec)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::DeploymentSpec;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn k8s_pod_spec() -> core::PodSpec {
        core::PodSpec {
            host_network: Some(true),
            service_account_name: Some("default".to_string()),
            security_context: Some(core::PodSecurityContext {
                run_as_user: Some(0),
                run_as_non_root: Some(false),
                ..Default::default()
            }),
            containers: vec![core::Container {
                name: "app".to_string(),
                image: Some("app:latest".to_string()),
                image_pull_policy: Some("IfNotPresent".to_string()),
                security_context: Some(core::SecurityContext {
                    privileged: Some(true),
                    read_only_root_filesystem: Some(false),
                    run_as_group: Some(0),
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_pod_spec() {
        let spec = PodSpec::from(&k8s_pod_spec());
        assert_eq!(spec.host_network, Some(true));
        assert_eq!(spec.service_account_name.as_deref(), Some("default"));

        let psc = spec.security_context.unwrap();
        assert_eq!(psc.run_as_user, Some(0));
        assert_eq!(psc.run_as_group, None);
        assert_eq!(psc.run_as_non_root, Some(false));

        let c = &spec.containers[0];
        assert_eq!(c.name, "app");
        assert_eq!(c.image_pull_policy.as_deref(), Some("IfNotPresent"));
        let sc = c.security_context.as_ref().unwrap();
        assert_eq!(sc.privileged, Some(true));
        assert_eq!(sc.allow_privilege_escalation, None);
        assert_eq!(sc.run_as_group, Some(0));
    }

    #[test]
    fn test_to_workload() {
        let deployment = Deployment {
            metadata: ObjectMeta {
                name: Some("api".to_string()),
                namespace: Some("web".to_string()),
                ..Default::default()
            },
            spec: Some(DeploymentSpec {
                template: core::PodTemplateSpec {
                    metadata: None,
                    spec: Some(k8s_pod_spec()),
                },
                ..Default::default()
            }),
            ..Default::default()
        };

        let workload = to_workload(&deployment, "prod", "fallback").unwrap();
        assert_eq!(workload.cluster, "prod");
        assert_eq!(workload.namespace, "web");
        assert_eq!(workload.kind, WorkloadKind::Deployment);
        assert_eq!(workload.name, "api");
        assert_eq!(workload.pod_spec.containers.len(), 1);
    }

    #[test]
    fn test_to_workload_without_template() {
        let job = Job {
            metadata: ObjectMeta {
                name: Some("orphan".to_string()),
                ..Default::default()
            },
            spec: None,
            ..Default::default()
        };
        assert!(to_workload(&job, "prod", "ops").is_none());
    }

    #[test]
    fn test_namespace_filter() {
        let filter = NamespaceFilter::default();
        assert!(filter.allows("default"));
        assert!(!filter.allows("kube-system"));

        let filter = NamespaceFilter {
            include_system: true,
            exclude: vec!["team-*".to_string(), "scratch".to_string()],
            ..Default::default()
        };
        assert!(filter.allows("kube-system"));
        assert!(!filter.allows("team-a"));
        assert!(!filter.allows("scratch"));
        assert!(filter.allows("payments"));

        let filter = NamespaceFilter {
            include: vec!["payments".to_string()],
            ..Default::default()
        };
        assert!(filter.allows("payments"));
        assert!(!filter.allows("default"));
    }
}
