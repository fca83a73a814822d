//! The provenance-carrying result wrapper every flow returns.
//!
//! A flow invocation always resolves — either with an accepted completion or
//! with the deterministic fallback. `Generated<T>` makes that total-function
//! guarantee visible in the type: there is no error variant to inspect, only
//! a `Source` telling the caller which path produced the value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::RequestId;

/// Which path produced a generation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The completion backend responded and the response passed the guard.
    Completion,
    /// The completion attempt failed or was rejected; canned data was used.
    Fallback,
}

/// A generation result together with invocation metadata.
///
/// Ownership transfers to the caller on return; the runtime keeps no copy and
/// no shared state between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generated<T> {
    /// The invocation this value belongs to.
    pub request_id: RequestId,
    /// When the value was produced (accept or fallback, both stamped here).
    pub generated_at: DateTime<Utc>,
    /// Which path produced `value`.
    pub source: Source,
    /// The schema-shaped payload. Satisfies the flow's required-key set
    /// regardless of `source`.
    pub value: T,
}

impl<T> Generated<T> {
    /// Wrap an accepted completion payload.
    pub fn completed(request_id: RequestId, value: T) -> Self {
        Self {
            request_id,
            generated_at: Utc::now(),
            source: Source::Completion,
            value,
        }
    }

    /// Wrap a fallback-produced payload.
    pub fn fallback(request_id: RequestId, value: T) -> Self {
        Self {
            request_id,
            generated_at: Utc::now(),
            source: Source::Fallback,
            value,
        }
    }

    /// True when the value came from the offline fallback generator.
    pub fn is_fallback(&self) -> bool {
        self.source == Source::Fallback
    }

    /// Map the payload while preserving invocation metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generated<U> {
        Generated {
            request_id: self.request_id,
            generated_at: self.generated_at,
            source: self.source,
            value: f(self.value),
        }
    }
}
