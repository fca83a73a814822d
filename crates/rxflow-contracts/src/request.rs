//! Request identity and caller-supplied option types.
//!
//! These types define the data arriving at a flow entry point. Domain inputs
//! (symptoms, topics, case parameters) live in the flow crates — this module
//! only covers what every flow shares.

use serde::{Deserialize, Serialize};

/// Unique identifier for a single flow invocation.
///
/// Every flow entry point mints one of these at the boundary; it appears in
/// every log line for the invocation and on the returned `Generated<T>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub uuid::Uuid);

impl RequestId {
    /// Create a new, unique request ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The option bag callers may attach to any generation request.
///
/// Every field is optional on the wire. Flows resolve the bag against their
/// configured defaults exactly once at the boundary — flow logic downstream
/// never sees an unset option.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    /// BCP-47-ish language tag for generated text (e.g. "en", "es").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// How many entries to generate, for list-producing flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Caller-asserted emergency context; flows may escalate wording.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_mode: Option<bool>,
}
