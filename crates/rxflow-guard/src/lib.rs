//! # rxflow-guard
//!
//! The response guard: the accept-or-fallback gate between the completion
//! backend and the typed flow layer.
//!
//! The guard answers one question — is this payload shaped plausibly enough
//! to attempt typed deserialization? — and answers it shallowly on purpose.
//! It rejects null, non-objects, empty objects, and objects missing a
//! required top-level key. It does NOT validate nested shapes, enum
//! membership, or array element types: a completion that sets
//! `"riskAssessment": {}` passes the guard and is left for the typed layer
//! to rule on. Rejecting valid-but-slightly-off completions outright would
//! push every borderline response onto the canned fallback path.

pub mod engine;

pub use engine::{is_valid, ResponseGuard};
