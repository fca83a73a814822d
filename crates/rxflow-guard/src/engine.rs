//! Shallow shape inspection for completion payloads.
//!
//! `ResponseGuard` runs in two phases:
//!
//! 1. **Plausibility** — the payload must be a JSON object with at least one
//!    key. Null, non-objects, and `{}` are rejected before any schema work.
//! 2. **Structural** — the payload is validated against the minimal JSON
//!    Schema rendered from the `ShapeSpec` using the `jsonschema` crate, which
//!    enforces the required top-level keys.
//!
//! All failures are collected before returning so log lines show the full
//! rejection picture in one pass.

use tracing::{debug, warn};

use rxflow_contracts::shape::{GuardFailure, GuardReport, ShapeSpec};

/// The RXFLOW response guard.
///
/// Stateless; one instance can inspect payloads for any number of concurrent
/// invocations.
#[derive(Debug, Default)]
pub struct ResponseGuard;

impl ResponseGuard {
    /// Create a guard.
    pub fn new() -> Self {
        Self
    }

    /// Inspect `payload` against `shape` and report accept-or-reject.
    pub fn inspect(&self, payload: &serde_json::Value, shape: &ShapeSpec) -> GuardReport {
        let mut failures: Vec<GuardFailure> = Vec::new();

        // ── Phase 1: Plausibility ────────────────────────────────────────────
        match payload {
            serde_json::Value::Null => {
                failures.push(GuardFailure {
                    check_id: "null-payload".to_string(),
                    message: "completion resolved to JSON null".to_string(),
                });
            }
            serde_json::Value::Object(map) if map.is_empty() => {
                failures.push(GuardFailure {
                    check_id: "empty-object".to_string(),
                    message: "completion resolved to an object with zero keys".to_string(),
                });
            }
            serde_json::Value::Object(_) => {}
            other => {
                failures.push(GuardFailure {
                    check_id: "not-an-object".to_string(),
                    message: format!(
                        "completion resolved to a JSON {} instead of an object",
                        json_type_name(other)
                    ),
                });
            }
        }

        // ── Phase 2: Structural (required keys) ──────────────────────────────
        //
        // Only meaningful for non-empty objects; phase 1 failures already
        // describe everything else.
        if failures.is_empty() {
            match jsonschema::validator_for(&shape.to_json_schema()) {
                Ok(validator) => {
                    for error in validator.iter_errors(payload) {
                        let message = format!(
                            "shape violation at {}: {}",
                            error.instance_path, error
                        );
                        failures.push(GuardFailure {
                            check_id: "missing-key".to_string(),
                            message,
                        });
                    }
                }
                Err(e) => {
                    // A shape spec that renders an uncompilable schema is a
                    // configuration bug; surface it as a rejection so the flow
                    // still resolves via fallback instead of panicking.
                    failures.push(GuardFailure {
                        check_id: "bad-shape-spec".to_string(),
                        message: format!("invalid shape schema document: {e}"),
                    });
                }
            }
        }

        let accepted = failures.is_empty();
        if accepted {
            debug!(shape_id = %shape.shape_id, "guard accepted completion payload");
        } else {
            let report = GuardReport { accepted, failures };
            warn!(
                shape_id = %shape.shape_id,
                failures = %report.summary(),
                "guard rejected completion payload"
            );
            return report;
        }

        GuardReport::accepting()
    }
}

/// Convenience predicate matching the flow-level contract:
/// true iff `payload` is a non-empty object carrying every key in
/// `required_keys` at the top level.
pub fn is_valid(payload: &serde_json::Value, required_keys: &[&str]) -> bool {
    let guard = ResponseGuard::new();
    let shape = ShapeSpec::new("inline", required_keys);
    guard.inspect(payload, &shape).accepted
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use rxflow_contracts::shape::ShapeSpec;

    use super::{is_valid, ResponseGuard};

    fn allergy_shape() -> ShapeSpec {
        ShapeSpec::new("allergy-assessment-v1", &["riskAssessment", "actionPlan"])
    }

    /// Null payloads are rejected with the null-payload check.
    #[test]
    fn rejects_null() {
        let guard = ResponseGuard::new();
        let report = guard.inspect(&json!(null), &allergy_shape());

        assert!(!report.accepted);
        assert_eq!(report.failures[0].check_id, "null-payload");
    }

    /// An object with zero keys is never acceptable, even for an empty
    /// required-key set.
    #[test]
    fn rejects_empty_object() {
        let guard = ResponseGuard::new();
        let report = guard.inspect(&json!({}), &ShapeSpec::new("anything-v1", &[]));

        assert!(!report.accepted);
        assert_eq!(report.failures[0].check_id, "empty-object");
    }

    #[test]
    fn rejects_non_object_payloads() {
        let guard = ResponseGuard::new();
        for payload in [json!("a string"), json!(42), json!([1, 2, 3]), json!(true)] {
            let report = guard.inspect(&payload, &allergy_shape());
            assert!(!report.accepted, "payload {payload} should be rejected");
            assert_eq!(report.failures[0].check_id, "not-an-object");
        }
    }

    /// Every required key must be present; each absence produces a failure.
    #[test]
    fn rejects_missing_required_keys() {
        let guard = ResponseGuard::new();
        let report = guard.inspect(&json!({ "riskAssessment": {} }), &allergy_shape());

        assert!(!report.accepted);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].check_id, "missing-key");
        assert!(
            report.failures[0].message.contains("actionPlan"),
            "failure should name the missing key: {}",
            report.failures[0].message
        );
    }

    /// The guard is shallow: nested emptiness passes.
    #[test]
    fn accepts_present_but_empty_nested_objects() {
        let guard = ResponseGuard::new();
        let report = guard.inspect(
            &json!({ "riskAssessment": {}, "actionPlan": {} }),
            &allergy_shape(),
        );

        assert!(report.accepted, "failures: {}", report.summary());
        assert!(report.failures.is_empty());
    }

    /// Extra keys beyond the required set do not cause rejection.
    #[test]
    fn accepts_payload_with_extra_keys() {
        let guard = ResponseGuard::new();
        let payload = json!({
            "riskAssessment": { "overallRisk": "low" },
            "actionPlan": { "immediateSteps": [] },
            "disclaimer": "not medical advice"
        });

        assert!(guard.inspect(&payload, &allergy_shape()).accepted);
    }

    // ── is_valid convenience predicate ───────────────────────────────────────

    #[test]
    fn is_valid_matches_flow_contract() {
        assert!(!is_valid(&json!(null), &["riskAssessment"]));
        assert!(!is_valid(&json!({}), &["riskAssessment"]));
        assert!(!is_valid(&json!({}), &[]));
        assert!(is_valid(
            &json!({ "riskAssessment": { "overallRisk": "high" }, "actionPlan": {} }),
            &["riskAssessment", "actionPlan"]
        ));
    }
}
