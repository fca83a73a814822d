//! Internal error types for the RXFLOW generation pipeline.
//!
//! These errors never escape a flow entry point — the public contract of every
//! flow is "always succeeds". They exist so the harness and configuration
//! loaders can propagate failures with `?` before the fallback folds them away.

use thiserror::Error;

/// The unified internal error type for the RXFLOW runtime.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The completion client rejected the request (network/provider failure).
    #[error("completion request failed: {reason}")]
    CompletionFailed { reason: String },

    /// The completion client resolved with nothing usable (null or empty body).
    #[error("completion resolved empty")]
    EmptyCompletion,

    /// The completion payload could not be interpreted as the target shape.
    #[error("malformed completion payload: {reason}")]
    MalformedCompletion { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the RXFLOW crates.
pub type FlowResult<T> = Result<T, FlowError>;
