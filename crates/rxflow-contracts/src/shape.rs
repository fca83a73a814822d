//! Output shape specifications and guard report types.
//!
//! Before a completion payload is deserialized or delivered, the response
//! guard runs it against a `ShapeSpec`. Only an accepting `GuardReport`
//! allows the typed path to proceed; anything else routes to the fallback.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The shallow shape contract a completion payload must satisfy.
///
/// Shapes are defined per flow at startup and passed to the harness. The
/// contract is deliberately shallow: top-level required keys only. Nested
/// objects, enum membership, and array element shapes are left to the typed
/// deserialization layer — a present-but-empty `"riskAssessment": {}` passes
/// the guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeSpec {
    /// Unique identifier for this shape (e.g. "allergy-assessment-v1").
    pub shape_id: String,
    /// Top-level keys that must be present on the payload object.
    pub required_keys: Vec<String>,
}

impl ShapeSpec {
    /// Build a shape spec from a shape ID and required key names.
    pub fn new(shape_id: impl Into<String>, required_keys: &[&str]) -> Self {
        Self {
            shape_id: shape_id.into(),
            required_keys: required_keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Render this spec as a minimal JSON Schema document.
    ///
    /// `minProperties: 1` encodes the "zero own keys" rejection — an empty
    /// object is never an acceptable completion, even for shapes with no
    /// required keys.
    pub fn to_json_schema(&self) -> Value {
        json!({
            "type": "object",
            "minProperties": 1,
            "required": self.required_keys,
        })
    }
}

/// The result of running the response guard against a completion payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardReport {
    /// True only if every check passed.
    pub accepted: bool,
    /// All failures collected during this inspection. Empty on accept.
    pub failures: Vec<GuardFailure>,
}

impl GuardReport {
    /// A report with no failures.
    pub fn accepting() -> Self {
        Self {
            accepted: true,
            failures: vec![],
        }
    }

    /// One-line summary of every failure, for log lines.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("[{}] {}", f.check_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A single failed check within a `GuardReport`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardFailure {
    /// Which check failed (e.g. "not-an-object", "missing-key").
    pub check_id: String,
    /// Human-readable explanation of the rejection.
    pub message: String,
}
