//! Core types for the workload auditor.
//!
//! - `AttributeValue` - A resolved configuration value (or its absence)
//! - `Provenance` - Whether a value came from the platform default or the author
//! - `Verdict` - Whether policy evaluation flagged the value
//! - `Attribute` - One classified configuration field
//! - `Record` - All classified attributes of one workload object

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Container label used for attributes that apply to the whole pod.
pub const GLOBAL_CONTAINER: &str = "[Global Attribute - ALL]";

/// A resolved configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// No value was supplied.
    #[default]
    Absent,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl AttributeValue {
    /// Check if no value was supplied.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "<nil>"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Absent)
    }
}

/// Where a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Nothing was configured; the platform default applies.
    Default,
    /// The workload author supplied the value.
    Explicit,
}

/// The policy judgment on a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Flagged,
    Clear,
}

/// A single classified configuration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Field identifier (e.g. "Run As User").
    pub name: String,
    /// The resolved value.
    pub value: AttributeValue,
    pub provenance: Provenance,
    pub verdict: Verdict,
    /// Why the attribute was flagged. Only set by the rule sets.
    pub reason: Option<String>,
    /// Owning container, or [`GLOBAL_CONTAINER`] for pod-level attributes.
    pub container: String,
}

impl Attribute {
    /// True iff no explicit configuration was supplied.
    pub fn is_default(&self) -> bool {
        self.provenance == Provenance::Default
    }

    /// True iff the workload author supplied a value.
    pub fn is_set(&self) -> bool {
        self.provenance == Provenance::Explicit
    }

    pub fn is_flagged(&self) -> bool {
        self.verdict == Verdict::Flagged
    }

    /// Check if this attribute applies to the whole pod.
    pub fn is_global(&self) -> bool {
        self.container == GLOBAL_CONTAINER
    }

    /// Flag a value the author explicitly configured.
    ///
    /// A judgment on a concrete value always classifies it as explicit.
    pub(crate) fn flag_value(&mut self, reason: impl Into<String>) {
        self.provenance = Provenance::Explicit;
        self.verdict = Verdict::Flagged;
        self.reason = Some(reason.into());
    }

    /// Flag a missing value. Provenance stays as the factory resolved it.
    pub(crate) fn flag_absent(&mut self, reason: impl Into<String>) {
        self.verdict = Verdict::Flagged;
        self.reason = Some(reason.into());
    }

    /// Accept the value as-is.
    pub(crate) fn clear(&mut self) {
        self.verdict = Verdict::Clear;
        self.reason = None;
    }
}

/// Workload kinds the auditor knows how to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorkloadKind {
    Deployment,
    DaemonSet,
    StatefulSet,
    Job,
}

impl WorkloadKind {
    /// All supported kinds in audit order.
    pub const ALL: [WorkloadKind; 4] = [
        Self::Deployment,
        Self::DaemonSet,
        Self::StatefulSet,
        Self::Job,
    ];

    /// Get the string representation matching Kubernetes kind names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::DaemonSet => "DaemonSet",
            Self::StatefulSet => "StatefulSet",
            Self::Job => "Job",
        }
    }

    /// Parse from a Kubernetes kind string (case-insensitive).
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind.to_lowercase().as_str() {
            "deployment" | "deployments" | "deploy" => Some(Self::Deployment),
            "daemonset" | "daemonsets" | "ds" => Some(Self::DaemonSet),
            "statefulset" | "statefulsets" | "sts" => Some(Self::StatefulSet),
            "job" | "jobs" => Some(Self::Job),
            _ => None,
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The classified attributes of one workload object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub cluster: String,
    pub namespace: String,
    pub kind: WorkloadKind,
    /// Workload name.
    pub kind_name: String,
    /// Attributes in evaluation order.
    pub attributes: Vec<Attribute>,
}

impl Record {
    /// True if any attribute of the workload is flagged.
    pub fn is_flagged(&self) -> bool {
        self.attributes.iter().any(Attribute::is_flagged)
    }

    /// True if any pod-level attribute is flagged.
    pub fn pod_flagged(&self) -> bool {
        self.attributes
            .iter()
            .filter(|a| a.is_global())
            .any(Attribute::is_flagged)
    }

    /// Number of flagged attributes.
    pub fn flagged_count(&self) -> usize {
        self.attributes.iter().filter(|a| a.is_flagged()).count()
    }

    /// Find the first attribute with the given name and container.
    pub fn attribute(&self, name: &str, container: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name == name && a.container == container)
    }

    /// Get a full identifier for the workload (namespace/kind/name).
    pub fn identifier(&self) -> String {
        format!("{}/{}/{}", self.namespace, self.kind, self.kind_name)
    }
}

/// A record under evaluation.
///
/// Holds the pod-level values that containers could inherit. The map is
/// dropped by [`RecordBuilder::finish`].
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
    global: BTreeMap<String, AttributeValue>,
}

impl RecordBuilder {
    pub fn new(
        cluster: impl Into<String>,
        namespace: impl Into<String>,
        kind: WorkloadKind,
        kind_name: impl Into<String>,
    ) -> Self {
        Self {
            record: Record {
                cluster: cluster.into(),
                namespace: namespace.into(),
                kind,
                kind_name: kind_name.into(),
                attributes: Vec::new(),
            },
            global: BTreeMap::new(),
        }
    }

    /// Append a finished attribute.
    pub fn push(&mut self, attribute: Attribute) {
        self.record.attributes.push(attribute);
    }

    /// Remember a pod-level value for inheritance lookups.
    pub fn set_global(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.global.insert(name.into(), value);
    }

    /// Pod-level values recorded so far.
    pub fn global(&self) -> &BTreeMap<String, AttributeValue> {
        &self.global
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.record.attributes
    }

    /// Finalize the record.
    pub fn finish(self) -> Record {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from_optional() {
        assert_eq!(AttributeValue::from(None::<bool>), AttributeValue::Absent);
        assert_eq!(AttributeValue::from(Some(false)), AttributeValue::Bool(false));
        assert_eq!(AttributeValue::from(Some(0i64)), AttributeValue::Int(0));
        assert_eq!(
            AttributeValue::from(Some(String::new())),
            AttributeValue::Str(String::new())
        );
        assert_eq!(AttributeValue::from(""), AttributeValue::Str(String::new()));
        assert_eq!(
            AttributeValue::from("Always"),
            AttributeValue::Str("Always".to_string())
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(AttributeValue::Absent.to_string(), "<nil>");
        assert_eq!(AttributeValue::from("").to_string(), "");
        assert_eq!(AttributeValue::Bool(true).to_string(), "true");
        assert_eq!(AttributeValue::Int(1000).to_string(), "1000");
        assert_eq!(AttributeValue::from("nginx:1.25").to_string(), "nginx:1.25");
    }

    #[test]
    fn test_workload_kind_parse() {
        assert_eq!(WorkloadKind::from_kind("Deployment"), Some(WorkloadKind::Deployment));
        assert_eq!(WorkloadKind::from_kind("sts"), Some(WorkloadKind::StatefulSet));
        assert_eq!(WorkloadKind::from_kind("daemonsets"), Some(WorkloadKind::DaemonSet));
        assert_eq!(WorkloadKind::from_kind("JOB"), Some(WorkloadKind::Job));
        assert_eq!(WorkloadKind::from_kind("CronJob"), None);
    }

    #[test]
    fn test_builder_drops_global_map() {
        let mut builder = RecordBuilder::new("prod", "web", WorkloadKind::Deployment, "api");
        builder.set_global("Run As User", AttributeValue::Int(1000));
        assert_eq!(
            builder.global().get("Run As User"),
            Some(&AttributeValue::Int(1000))
        );

        let record = builder.finish();
        assert_eq!(record.identifier(), "web/Deployment/api");
        assert!(record.attributes.is_empty());
        assert!(!record.is_flagged());
    }

    #[test]
    fn test_flag_value_forces_explicit() {
        let mut attr = Attribute {
            name: "Privileged".to_string(),
            value: AttributeValue::Bool(true),
            provenance: Provenance::Default,
            verdict: Verdict::Clear,
            reason: None,
            container: "app".to_string(),
        };
        attr.flag_value("Container set to allow [PRIVILEGED]");
        assert!(attr.is_set());
        assert!(!attr.is_default());
        assert!(attr.is_flagged());

        attr.clear();
        assert!(!attr.is_flagged());
        assert!(attr.reason.is_none());
    }
}
