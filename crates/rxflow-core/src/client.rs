//! The completion-client boundary.
//!
//! Everything behind this trait is outside the runtime's trust and
//! reliability envelope: the backing provider may reject, resolve null,
//! resolve an object missing required keys, or resolve a fully valid payload.
//! The runtime makes exactly one attempt per invocation — no retry, timeout,
//! or backoff is imposed here. Any timeout behavior belongs to the
//! implementation, not to callers of this trait.

use async_trait::async_trait;

use rxflow_contracts::error::FlowResult;

/// An opaque structured-completion backend.
///
/// Implementations are considered **unreliable** — the harness treats every
/// outcome short of a guard-passing payload as a routine event that routes to
/// the fallback generator, never as an error surfaced to callers.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submit `prompt` and resolve with whatever JSON the provider produced.
    ///
    /// A resolved value is NOT a validity promise; the response guard rules
    /// on it afterwards. Errors mean the attempt itself failed (network,
    /// provider, serialization of the provider's response).
    async fn generate_structured(&self, prompt: &str) -> FlowResult<serde_json::Value>;
}
