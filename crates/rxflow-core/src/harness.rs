//! The RXFLOW generation harness: the always-resolving attempt runner.
//!
//! The harness enforces the generation model:
//!
//!   Prompt → Completion attempt → Guard → (accept | fallback)
//!
//! The totality invariant is absolute: `run()` resolves with a `Generated<T>`
//! for every possible client behavior — rejection, null, wrong type, missing
//! keys, or a payload that passes the guard but fails typed deserialization
//! all route to the caller-supplied fallback. There are no retries, no
//! intermediate states, and no cancellation; the single awaited completion
//! call is the only suspension point.

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use rxflow_contracts::{
    generated::Generated,
    request::RequestId,
    shape::ShapeSpec,
};
use rxflow_guard::ResponseGuard;

use crate::client::CompletionClient;

/// Drives one structured-generation attempt per call.
///
/// Stateless apart from the guard it owns; a single harness can serve any
/// number of concurrent invocations.
#[derive(Debug, Default)]
pub struct GenerationHarness {
    guard: ResponseGuard,
}

impl GenerationHarness {
    /// Create a harness with the standard response guard.
    pub fn new() -> Self {
        Self {
            guard: ResponseGuard::new(),
        }
    }

    /// Make a single completion attempt and resolve with an accepted payload
    /// or the fallback.
    ///
    /// # Pipeline
    ///
    /// 1. Await `client.generate_structured(prompt)` — exactly one attempt
    /// 2. On transport/provider error → fallback
    /// 3. On a resolved payload, run the response guard; rejection → fallback
    /// 4. Deserialize the guarded payload into `T`; failure → fallback
    ///    (the guard is shallow by contract, so this is where
    ///    present-but-hollow nested objects are caught)
    /// 5. Otherwise → accepted completion
    ///
    /// `fallback` must be total; it is only invoked on the failure paths and
    /// its output is delivered with `Source::Fallback` provenance.
    pub async fn run<T, F>(
        &self,
        request_id: RequestId,
        client: &dyn CompletionClient,
        prompt: &str,
        shape: &ShapeSpec,
        fallback: F,
    ) -> Generated<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        debug!(
            request_id = %request_id,
            shape_id = %shape.shape_id,
            prompt_len = prompt.len(),
            "generation attempt starting"
        );

        // ── Step 1: Single completion attempt ────────────────────────────────
        let payload = match client.generate_structured(prompt).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    request_id = %request_id,
                    shape_id = %shape.shape_id,
                    error = %e,
                    "completion attempt failed, substituting fallback"
                );
                return Generated::fallback(request_id, fallback());
            }
        };

        // ── Step 2: Guard inspection ─────────────────────────────────────────
        let report = self.guard.inspect(&payload, shape);
        if !report.accepted {
            info!(
                request_id = %request_id,
                shape_id = %shape.shape_id,
                failures = %report.summary(),
                "completion payload rejected, substituting fallback"
            );
            return Generated::fallback(request_id, fallback());
        }

        // ── Step 3: Typed deserialization ────────────────────────────────────
        //
        // The guard only checked top-level keys. A payload can still be
        // hollow below that horizon; serde is the final arbiter.
        match serde_json::from_value::<T>(payload) {
            Ok(value) => {
                debug!(
                    request_id = %request_id,
                    shape_id = %shape.shape_id,
                    "completion accepted"
                );
                Generated::completed(request_id, value)
            }
            Err(e) => {
                info!(
                    request_id = %request_id,
                    shape_id = %shape.shape_id,
                    error = %e,
                    "guarded payload failed typed deserialization, substituting fallback"
                );
                Generated::fallback(request_id, fallback())
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use rxflow_contracts::{generated::Source, request::RequestId, shape::ShapeSpec};

    use crate::doubles::{CannedClient, FailingClient, NullClient};

    use super::GenerationHarness;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Advice {
        headline: String,
        #[serde(default)]
        steps: Vec<String>,
    }

    fn advice_shape() -> ShapeSpec {
        ShapeSpec::new("advice-v1", &["headline"])
    }

    fn canned_advice() -> Advice {
        Advice {
            headline: "canned headline".to_string(),
            steps: vec!["canned step".to_string()],
        }
    }

    /// A valid payload is delivered with Completion provenance and the
    /// provider's values, not the fallback's.
    #[tokio::test]
    async fn accepts_valid_completion() {
        let harness = GenerationHarness::new();
        let client = CannedClient::new(json!({
            "headline": "from the provider",
            "steps": ["a", "b"]
        }));

        let result: rxflow_contracts::generated::Generated<Advice> = harness
            .run(RequestId::new(), &client, "prompt", &advice_shape(), canned_advice)
            .await;

        assert_eq!(result.source, Source::Completion);
        assert_eq!(result.value.headline, "from the provider");
        assert_eq!(result.value.steps.len(), 2);
    }

    /// A client error resolves (never rejects) with the fallback.
    #[tokio::test]
    async fn transport_failure_yields_fallback() {
        let harness = GenerationHarness::new();
        let client = FailingClient::default();

        let result = harness
            .run::<Advice, _>(RequestId::new(), &client, "prompt", &advice_shape(), canned_advice)
            .await;

        assert_eq!(result.source, Source::Fallback);
        assert_eq!(result.value.headline, "canned headline");
    }

    #[tokio::test]
    async fn null_payload_yields_fallback() {
        let harness = GenerationHarness::new();
        let client = NullClient;

        let result = harness
            .run::<Advice, _>(RequestId::new(), &client, "prompt", &advice_shape(), canned_advice)
            .await;

        assert!(result.is_fallback());
    }

    #[tokio::test]
    async fn empty_object_yields_fallback() {
        let harness = GenerationHarness::new();
        let client = CannedClient::new(json!({}));

        let result = harness
            .run::<Advice, _>(RequestId::new(), &client, "prompt", &advice_shape(), canned_advice)
            .await;

        assert!(result.is_fallback());
    }

    #[tokio::test]
    async fn missing_required_key_yields_fallback() {
        let harness = GenerationHarness::new();
        let client = CannedClient::new(json!({ "steps": ["only steps, no headline"] }));

        let result = harness
            .run::<Advice, _>(RequestId::new(), &client, "prompt", &advice_shape(), canned_advice)
            .await;

        assert!(result.is_fallback());
    }

    /// The guard passes shallow shapes, so a wrong-typed nested value is only
    /// caught at deserialization — and still resolves via fallback.
    #[tokio::test]
    async fn guard_passing_but_undeserializable_yields_fallback() {
        let harness = GenerationHarness::new();
        let client = CannedClient::new(json!({ "headline": { "not": "a string" } }));

        let result = harness
            .run::<Advice, _>(RequestId::new(), &client, "prompt", &advice_shape(), canned_advice)
            .await;

        assert!(result.is_fallback());
    }
}
