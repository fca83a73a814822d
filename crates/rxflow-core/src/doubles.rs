//! Scripted completion clients (testing and demos only)
//!
//! Provides `CannedClient`, `FailingClient`, `NullClient`, and
//! `SequenceClient` that satisfy the `CompletionClient` contract without any
//! external service. The demo binary and downstream flow tests use these to
//! exercise both the accepted-completion path and the fallback path.

use std::sync::Mutex;

use async_trait::async_trait;

use rxflow_contracts::error::{FlowError, FlowResult};

use crate::client::CompletionClient;

// ── CannedClient ──────────────────────────────────────────────────────────────

/// Always resolves with the same fixed payload.
#[derive(Debug)]
pub struct CannedClient {
    payload: serde_json::Value,
}

impl CannedClient {
    pub fn new(payload: serde_json::Value) -> Self {
        Self { payload }
    }
}

#[async_trait]
impl CompletionClient for CannedClient {
    async fn generate_structured(&self, _prompt: &str) -> FlowResult<serde_json::Value> {
        Ok(self.payload.clone())
    }
}

// ── FailingClient ─────────────────────────────────────────────────────────────

/// Always rejects, simulating a transport/provider failure.
#[derive(Debug)]
pub struct FailingClient {
    reason: String,
}

impl FailingClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for FailingClient {
    fn default() -> Self {
        Self::new("simulated provider outage")
    }
}

#[async_trait]
impl CompletionClient for FailingClient {
    async fn generate_structured(&self, _prompt: &str) -> FlowResult<serde_json::Value> {
        Err(FlowError::CompletionFailed {
            reason: self.reason.clone(),
        })
    }
}

// ── NullClient ────────────────────────────────────────────────────────────────

/// Resolves successfully with JSON null — the "provider returned nothing
/// usable without erroring" failure mode.
#[derive(Debug, Default)]
pub struct NullClient;

#[async_trait]
impl CompletionClient for NullClient {
    async fn generate_structured(&self, _prompt: &str) -> FlowResult<serde_json::Value> {
        Ok(serde_json::Value::Null)
    }
}

// ── SequenceClient ────────────────────────────────────────────────────────────

/// Resolves with scripted payloads in order, then repeats the last one.
///
/// Also records every prompt it receives, so tests can assert on prompt
/// construction without parsing log output.
#[derive(Debug)]
pub struct SequenceClient {
    payloads: Vec<serde_json::Value>,
    cursor: Mutex<usize>,
    prompts: Mutex<Vec<String>>,
}

impl SequenceClient {
    pub fn new(payloads: Vec<serde_json::Value>) -> Self {
        Self {
            payloads,
            cursor: Mutex::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt submitted so far, in call order.
    pub fn seen_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for SequenceClient {
    async fn generate_structured(&self, prompt: &str) -> FlowResult<serde_json::Value> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let mut cursor = self.cursor.lock().unwrap();
        let index = (*cursor).min(self.payloads.len().saturating_sub(1));
        *cursor += 1;

        match self.payloads.get(index) {
            Some(payload) => Ok(payload.clone()),
            None => Err(FlowError::EmptyCompletion),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn canned_client_always_returns_payload() {
        let client = CannedClient::new(json!({ "ok": true }));
        let first = client.generate_structured("p1").await.unwrap();
        let second = client.generate_structured("p2").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first["ok"], true);
    }

    #[tokio::test]
    async fn failing_client_always_errors() {
        let client = FailingClient::new("offline");
        let err = client.generate_structured("p").await.unwrap_err();
        assert!(err.to_string().contains("offline"));
    }

    #[tokio::test]
    async fn sequence_client_scripts_and_records() {
        let client = SequenceClient::new(vec![json!({ "n": 1 }), json!({ "n": 2 })]);

        assert_eq!(client.generate_structured("first").await.unwrap()["n"], 1);
        assert_eq!(client.generate_structured("second").await.unwrap()["n"], 2);
        // Past the script, the last payload repeats.
        assert_eq!(client.generate_structured("third").await.unwrap()["n"], 2);

        assert_eq!(client.seen_prompts(), vec!["first", "second", "third"]);
    }
}
