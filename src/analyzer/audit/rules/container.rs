//! Container-level rule set.

use crate::analyzer::audit::attribute::new_attribute;
use crate::analyzer::audit::context::{ContainerSpec, SecurityContext};
use crate::analyzer::audit::rules::names;
use crate::analyzer::audit::types::{Attribute, AttributeValue, RecordBuilder};

/// Evaluate one container of a workload.
///
/// Containers without a security context are evaluated as if every field
/// were unset. Pod-level values on the builder are not consulted.
pub fn evaluate_container(container: &ContainerSpec, record: &mut RecordBuilder) {
    log::debug!("Working on container [{}]", container.name);
    let name = container.name.as_str();

    // Image pull policy
    let mut pull_policy = new_attribute(
        names::IMAGE_PULL_POLICY,
        container.image_pull_policy.as_deref(),
        name,
    );
    let policy = pull_policy.value.as_str().unwrap_or_default().to_owned();
    if pull_policy.is_default() {
        pull_policy.flag_absent("ImagePullPolicy is not set");
    } else {
        match policy.as_str() {
            "Never" => pull_policy.flag_value("ImagePullPolicy is set to [Never]"),
            "IfNotPresent" => pull_policy.flag_value("ImagePullPolicy is set to [IfNotPresent]"),
            _ => pull_policy.clear(),
        }
    }
    record.push(pull_policy);

    // Image name
    let mut image = new_attribute(names::IMAGE_NAME, container.image.as_deref(), name);
    let latest = image
        .value
        .as_str()
        .is_some_and(|i| i.to_lowercase().ends_with(":latest"));
    if image.is_default() {
        image.flag_absent("Image is not set [?!]");
    } else if latest {
        image.flag_value("Image with [LATEST] tag is not recommended");
    } else {
        image.clear();
    }
    record.push(image);

    let undefined = SecurityContext::default();
    let sc = container.security_context.as_ref().unwrap_or_else(|| {
        log::warn!(
            "No security context for container [{}]; evaluating every field as not defined",
            container.name
        );
        &undefined
    });

    record.push(bool_rule(
        names::PRIVILEGED,
        sc.privileged,
        name,
        true,
        "Container privileged is not defined & is not limited",
        "Container set to allow [PRIVILEGED]",
    ));
    record.push(bool_rule(
        names::ALLOW_PRIVILEGE_ESCALATION,
        sc.allow_privilege_escalation,
        name,
        true,
        "Container privileged escalation is not defined & is not limited",
        "Container set to allow [PRIVILEGED ESCALATION]",
    ));
    record.push(bool_rule(
        names::READ_ONLY_ROOT_FILESYSTEM,
        sc.read_only_root_filesystem,
        name,
        false,
        "Container access to root file system is not defined & is not limited",
        "Container access to root file system is [NOT READ ONLY]",
    ));
    record.push(root_id_rule(
        names::CONTAINER_RUN_AS_USER,
        sc.run_as_user,
        name,
        "Container Run As User is not defined & is not limited",
        "Container Run As User is set to [ROOT]",
    ));
    record.push(root_id_rule(
        names::CONTAINER_RUN_AS_GROUP,
        sc.run_as_group,
        name,
        "Container Run As Group is not defined & is not limited",
        "Container Run As Group is set to [ROOT] group",
    ));

    log::debug!("Done analyzing container [{}]", container.name);
}

/// A boolean field that is unsafe when it equals `unsafe_value`.
fn bool_rule(
    attribute: &str,
    value: Option<bool>,
    container: &str,
    unsafe_value: bool,
    not_defined: &str,
    violation: &str,
) -> Attribute {
    let mut attr = new_attribute(attribute, value, container);
    match value {
        None => attr.flag_absent(not_defined),
        Some(v) if v == unsafe_value => attr.flag_value(violation),
        Some(_) => attr.clear(),
    }
    attr
}

/// A user or group id that is unsafe when it is root (0).
fn root_id_rule(
    attribute: &str,
    value: Option<i64>,
    container: &str,
    not_defined: &str,
    violation: &str,
) -> Attribute {
    let mut attr = new_attribute(attribute, value, container);
    match attr.value {
        AttributeValue::Int(0) => attr.flag_value(violation),
        AttributeValue::Int(_) => attr.clear(),
        _ => attr.flag_absent(not_defined),
    }
    attr
}
