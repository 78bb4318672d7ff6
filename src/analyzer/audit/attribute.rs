//! Attribute factory.
//!
//! Classifies a raw, possibly absent configuration value. A present value
//! (including `false` and `0`) is explicit; an absent value or an empty
//! string falls back to the platform default and is provisionally flagged.
//! The rule sets decide the final verdict and reason.

use crate::analyzer::audit::types::{
    Attribute, AttributeValue, GLOBAL_CONTAINER, Provenance, Verdict,
};

/// Build an attribute from a raw value.
///
/// An empty `container` marks a pod-level attribute.
pub fn new_attribute(
    name: impl Into<String>,
    value: impl Into<AttributeValue>,
    container: &str,
) -> Attribute {
    let value = value.into();
    let container = if container.is_empty() {
        GLOBAL_CONTAINER.to_string()
    } else {
        container.to_string()
    };

    let (provenance, verdict) = match &value {
        AttributeValue::Absent => (Provenance::Default, Verdict::Flagged),
        AttributeValue::Bool(_) | AttributeValue::Int(_) => (Provenance::Explicit, Verdict::Clear),
        AttributeValue::Str(s) if s.is_empty() => (Provenance::Default, Verdict::Flagged),
        AttributeValue::Str(_) => (Provenance::Explicit, Verdict::Clear),
    };

    Attribute {
        name: name.into(),
        value,
        provenance,
        verdict,
        reason: None,
        container,
    }
}
