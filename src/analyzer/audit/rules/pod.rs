//! Pod-level rule set.
//!
//! Evaluates host network access, the pod security context and the service
//! account. Explicit run-as values are remembered on the builder so that
//! container rules could inherit them.

use crate::analyzer::audit::attribute::new_attribute;
use crate::analyzer::audit::context::{PodSecurityContext, PodSpec};
use crate::analyzer::audit::rules::names;
use crate::analyzer::audit::types::{AttributeValue, RecordBuilder};

/// Evaluate the pod-scoped fields of a workload.
pub fn evaluate_pod_spec(pod_spec: &PodSpec, record: &mut RecordBuilder) {
    log::debug!("Analyzing the pod spec");

    let empty = PodSecurityContext::default();
    let psc = pod_spec.security_context.as_ref().unwrap_or(&empty);

    // Host network access
    let mut host_network = new_attribute(names::HOST_NETWORK, pod_spec.host_network, "");
    match host_network.value {
        AttributeValue::Absent => {
            host_network.flag_absent("Host (node) network access is not set")
        }
        AttributeValue::Bool(true) => {
            host_network.flag_value("Host (node) network access is set to [TRUE]")
        }
        _ => host_network.clear(),
    }
    record.push(host_network);

    // DNS policy is reported but never judged
    let mut dns = new_attribute(names::DNS_POLICY, pod_spec.dns_policy.as_deref(), "");
    dns.clear();
    record.push(dns);

    // Run as user
    let mut run_as_user = new_attribute(names::RUN_AS_USER, psc.run_as_user, "");
    match run_as_user.value {
        AttributeValue::Absent => run_as_user.flag_absent("Run as user is not set"),
        AttributeValue::Int(0) => run_as_user.flag_value("Run as user is set to ROOT"),
        _ => run_as_user.clear(),
    }

    // Run as non root
    let mut non_root = new_attribute(names::RUN_AS_NON_ROOT, psc.run_as_non_root, "");
    match non_root.value {
        AttributeValue::Absent => non_root.flag_absent("Run as non root is not set"),
        AttributeValue::Bool(false) => non_root.flag_value("Run as non root is set to FALSE"),
        _ => non_root.clear(),
    }

    // Run as group
    let mut run_as_group = new_attribute(names::RUN_AS_GROUP, psc.run_as_group, "");
    match run_as_group.value {
        AttributeValue::Absent => run_as_group.flag_absent("Run as group is not set"),
        AttributeValue::Int(0) => run_as_group.flag_value("Run as group is set to ROOT group"),
        _ => run_as_group.clear(),
    }

    for attr in [&run_as_user, &run_as_group, &non_root] {
        if attr.is_set() {
            record.set_global(attr.name.clone(), attr.value.clone());
        }
    }

    record.push(run_as_user);
    record.push(non_root);
    record.push(run_as_group);

    // Service account
    let mut service_account = new_attribute(
        names::SERVICE_ACCOUNT,
        pod_spec.service_account_name.as_deref(),
        "",
    );
    let uses_default = service_account.value.as_str() == Some("default");
    if service_account.is_default() {
        service_account.flag_absent("POD service account is not set");
    } else if uses_default {
        service_account.flag_value("POD default service account is set to [default]");
    } else {
        service_account.clear();
    }
    record.push(service_account);

    log::debug!("Done analyzing the pod spec");
}
