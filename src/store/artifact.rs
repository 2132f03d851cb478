//! Artifact pair types: the generated component source and its runtime-ops log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Kind of instrumented runtime operation recorded during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    /// An element or object was created.
    Create,
    /// An existing element's properties were updated.
    Update,
    /// An element was removed.
    Remove,
    /// An element was attached to the live tree.
    Mount,
    /// A user or system event was observed.
    Event,
}

/// One structured runtime operation record.
///
/// The ops log feeds the Generator's next LLM call, so each record is a
/// concrete typed shape rather than an open JSON blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeOp {
    /// What happened.
    pub op: OpKind,
    /// The element or object the operation applied to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Operation-specific arguments (props, event payload, ...).
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub args: Value,
}

impl RuntimeOp {
    /// Create a bare operation record with no target or arguments.
    pub fn new(op: OpKind) -> Self {
        Self {
            op,
            target: None,
            args: Value::Null,
        }
    }

    /// Set the operation target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the operation arguments.
    pub fn with_args(mut self, args: Value) -> Self {
        self.args = args;
        self
    }
}

/// The unit of cached state: component source plus the ops that produced it.
///
/// Both halves are always written and cleared together; a reader never
/// observes one without the other.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPair {
    /// Generated UI component source text.
    pub component_source: String,
    /// Ordered runtime operations that informed the generation.
    pub runtime_ops: Vec<RuntimeOp>,
    /// When the pair was written.
    pub generated_at: DateTime<Utc>,
}

/// On-disk format of the runtime-ops artifact.
///
/// Carries the SHA-256 digest of the component source so a reader can verify
/// the two slot files originate from the same write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OpsLog {
    pub generated_at: DateTime<Utc>,
    pub component_digest: String,
    pub ops: Vec<RuntimeOp>,
}

/// SHA-256 digest of a component source text, hex-encoded.
pub(crate) fn component_digest(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// The two fixed artifacts making up the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The component source file.
    ComponentSource,
    /// The runtime-ops log file.
    RuntimeOps,
}

impl ArtifactKind {
    /// Fixed file name of this artifact inside the scratch directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::ComponentSource => "generated-component.tsx",
            Self::RuntimeOps => "runtime-ops.json",
        }
    }

    /// Human-readable label used in CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ComponentSource => "component source",
            Self::RuntimeOps => "runtime-ops log",
        }
    }
}

/// Result of a [`clear`](crate::store::ArtifactStore::clear) call: which of
/// the two artifacts actually existed and were deleted.
#[derive(Debug, Clone, Default)]
pub struct ClearOutcome {
    /// Artifacts that were present and removed, in deletion order.
    pub removed: Vec<ArtifactKind>,
}

impl ClearOutcome {
    /// Number of artifacts removed (0, 1, or 2).
    pub fn count(&self) -> usize {
        self.removed.len()
    }

    /// `true` when the slot was already empty.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_op_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OpKind::Create).unwrap(),
            r#""create""#
        );
        assert_eq!(serde_json::to_string(&OpKind::Event).unwrap(), r#""event""#);
    }

    #[test]
    fn test_runtime_op_minimal_shape() {
        let op = RuntimeOp::new(OpKind::Create);
        let json = serde_json::to_value(&op).unwrap();
        // Bare ops serialize as {"op": "create"} with no null padding.
        assert_eq!(json, json!({"op": "create"}));
    }

    #[test]
    fn test_runtime_op_full_shape() {
        let op = RuntimeOp::new(OpKind::Update)
            .with_target("scene.camera")
            .with_args(json!({"fov": 60}));
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "update");
        assert_eq!(json["target"], "scene.camera");
        assert_eq!(json["args"]["fov"], 60);
    }

    #[test]
    fn test_runtime_op_deserialize_bare() {
        let op: RuntimeOp = serde_json::from_str(r#"{"op": "create"}"#).unwrap();
        assert_eq!(op.op, OpKind::Create);
        assert!(op.target.is_none());
        assert!(op.args.is_null());
    }

    #[test]
    fn test_component_digest_stable_and_source_aware() {
        let a = component_digest("<Scene/>");
        let b = component_digest("<Scene/>");
        let c = component_digest("<Other/>");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_artifact_kind_file_names_fixed() {
        assert_eq!(
            ArtifactKind::ComponentSource.file_name(),
            "generated-component.tsx"
        );
        assert_eq!(ArtifactKind::RuntimeOps.file_name(), "runtime-ops.json");
    }

    #[test]
    fn test_clear_outcome_counts() {
        let empty = ClearOutcome::default();
        assert!(empty.is_empty());
        assert_eq!(empty.count(), 0);

        let full = ClearOutcome {
            removed: vec![ArtifactKind::ComponentSource, ArtifactKind::RuntimeOps],
        };
        assert!(!full.is_empty());
        assert_eq!(full.count(), 2);
    }

    #[test]
    fn test_ops_log_roundtrip() {
        let log = OpsLog {
            generated_at: Utc::now(),
            component_digest: component_digest("<Scene/>"),
            ops: vec![RuntimeOp::new(OpKind::Create).with_target("scene")],
        };
        let json = serde_json::to_string(&log).unwrap();
        let back: OpsLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.component_digest, log.component_digest);
        assert_eq!(back.ops, log.ops);
    }
}
