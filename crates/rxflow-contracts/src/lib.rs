//! # rxflow-contracts
//!
//! Shared types, shapes, and contracts for the RXFLOW generation runtime.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod error;
pub mod generated;
pub mod request;
pub mod shape;

#[cfg(test)]
mod tests {
    use super::*;
    use error::FlowError;
    use generated::{Generated, Source};
    use request::{GenerationOptions, RequestId};
    use shape::ShapeSpec;

    // ── RequestId ────────────────────────────────────────────────────────────

    #[test]
    fn request_id_new_produces_unique_values() {
        let ids: Vec<RequestId> = (0..100).map(|_| RequestId::new()).collect();

        // All 100 IDs should be distinct.
        let unique: std::collections::HashSet<String> =
            ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(unique.len(), 100);
    }

    // ── Generated wrapper ────────────────────────────────────────────────────

    #[test]
    fn completed_carries_completion_source() {
        let g = Generated::completed(RequestId::new(), 42u32);
        assert_eq!(g.source, Source::Completion);
        assert!(!g.is_fallback());
        assert_eq!(g.value, 42);
    }

    #[test]
    fn fallback_carries_fallback_source() {
        let g = Generated::fallback(RequestId::new(), "canned".to_string());
        assert_eq!(g.source, Source::Fallback);
        assert!(g.is_fallback());
    }

    #[test]
    fn map_preserves_metadata() {
        let g = Generated::fallback(RequestId::new(), 10u32);
        let id = g.request_id.clone();
        let mapped = g.map(|v| v * 2);
        assert_eq!(mapped.value, 20);
        assert_eq!(mapped.request_id, id);
        assert_eq!(mapped.source, Source::Fallback);
    }

    #[test]
    fn generated_round_trips_through_serde() {
        let original = Generated::completed(RequestId::new(), serde_json::json!({ "ok": true }));
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Generated<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.source, Source::Completion);
        assert_eq!(decoded.request_id, original.request_id);
        assert_eq!(decoded.value["ok"], true);
    }

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Source::Fallback).unwrap(), "\"fallback\"");
        assert_eq!(serde_json::to_string(&Source::Completion).unwrap(), "\"completion\"");
    }

    // ── GenerationOptions ────────────────────────────────────────────────────

    #[test]
    fn options_default_to_all_unset() {
        let opts = GenerationOptions::default();
        assert!(opts.language.is_none());
        assert!(opts.count.is_none());
        assert!(opts.emergency_mode.is_none());
    }

    #[test]
    fn options_deserialize_from_partial_camel_case() {
        let opts: GenerationOptions =
            serde_json::from_str(r#"{ "emergencyMode": true, "count": 8 }"#).unwrap();
        assert_eq!(opts.emergency_mode, Some(true));
        assert_eq!(opts.count, Some(8));
        assert!(opts.language.is_none());
    }

    // ── ShapeSpec ────────────────────────────────────────────────────────────

    #[test]
    fn shape_spec_renders_minimal_json_schema() {
        let shape = ShapeSpec::new("test-v1", &["riskAssessment", "actionPlan"]);
        let schema = shape.to_json_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["minProperties"], 1);
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["riskAssessment", "actionPlan"]);
    }

    // ── FlowError display messages ───────────────────────────────────────────

    #[test]
    fn error_completion_failed_display() {
        let err = FlowError::CompletionFailed {
            reason: "connection refused".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("completion request failed"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn error_malformed_completion_display() {
        let err = FlowError::MalformedCompletion {
            reason: "missing field `questions`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("malformed completion payload"));
        assert!(msg.contains("questions"));
    }

    #[test]
    fn error_config_display() {
        let err = FlowError::ConfigError {
            reason: "missing defaults table".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
    }
}
