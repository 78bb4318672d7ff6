//! Policy rule sets.
//!
//! The pod-level rules run once per workload, the container-level rules
//! once per container. Both append finished attributes to a
//! [`RecordBuilder`](crate::analyzer::audit::types::RecordBuilder).

pub mod container;
pub mod pod;

pub use container::evaluate_container;
pub use pod::evaluate_pod_spec;

/// Attribute names as written to the report.
pub mod names {
    pub const HOST_NETWORK: &str = "Host Network";
    pub const DNS_POLICY: &str = "DNS Policy";
    pub const RUN_AS_USER: &str = "Run As User";
    pub const RUN_AS_NON_ROOT: &str = "Run As Non Root";
    pub const RUN_AS_GROUP: &str = "Run As Group";
    pub const SERVICE_ACCOUNT: &str = "POD ServiceAccount";

    pub const IMAGE_PULL_POLICY: &str = "Image Pull Policy";
    pub const IMAGE_NAME: &str = "Image Name";
    pub const PRIVILEGED: &str = "Privileged";
    pub const ALLOW_PRIVILEGE_ESCALATION: &str = "Allow Privilege Escalation";
    pub const READ_ONLY_ROOT_FILESYSTEM: &str = "Read Only Root Filesystem";
    pub const CONTAINER_RUN_AS_USER: &str = "Run As User [CONTAINER]";
    pub const CONTAINER_RUN_AS_GROUP: &str = "Run As Group [CONTAINER]";
}

/// Scope an attribute is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    Pod,
    Container,
}

impl RuleScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pod => "pod",
            Self::Container => "container",
        }
    }
}

/// Human-readable description of one evaluated attribute.
#[derive(Debug, Clone, Copy)]
pub struct RuleDesc {
    pub attribute: &'static str,
    pub scope: RuleScope,
    /// Conditions that flag the attribute.
    pub flagged_when: &'static str,
}

/// Every attribute the rule sets evaluate, in evaluation order.
pub fn rule_descriptions() -> Vec<RuleDesc> {
    use names::*;

    let pod = |attribute, flagged_when| RuleDesc {
        attribute,
        scope: RuleScope::Pod,
        flagged_when,
    };
    let container = |attribute, flagged_when| RuleDesc {
        attribute,
        scope: RuleScope::Container,
        flagged_when,
    };

    vec![
        pod(HOST_NETWORK, "not set, or set to true"),
        pod(DNS_POLICY, "never (informational)"),
        pod(RUN_AS_USER, "not set, or set to 0 (root)"),
        pod(RUN_AS_NON_ROOT, "not set, or set to false"),
        pod(RUN_AS_GROUP, "not set, or set to 0 (root group)"),
        pod(SERVICE_ACCOUNT, "not set, empty, or \"default\""),
        container(IMAGE_PULL_POLICY, "not set, \"Never\" or \"IfNotPresent\""),
        container(IMAGE_NAME, "not set, or tagged :latest"),
        container(PRIVILEGED, "not defined, or set to true"),
        container(ALLOW_PRIVILEGE_ESCALATION, "not defined, or set to true"),
        container(READ_ONLY_ROOT_FILESYSTEM, "not defined, or set to false"),
        container(CONTAINER_RUN_AS_USER, "not defined, or set to 0 (root)"),
        container(CONTAINER_RUN_AS_GROUP, "not defined, or set to 0 (root group)"),
    ]
}
