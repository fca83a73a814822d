//! # rxflow-core
//!
//! The completion-client boundary and the generation harness for RXFLOW.
//!
//! - `client`  — the opaque, unreliable structured-completion trait
//! - `doubles` — scripted clients for tests and demos
//! - `harness` — the always-resolving prompt → attempt → guard → accept-or-fallback runner
//!
//! The harness never calls a client more than once per invocation and never
//! surfaces an error to a flow caller; every failure mode folds into the
//! flow's deterministic fallback.

pub mod client;
pub mod doubles;
pub mod harness;

pub use client::CompletionClient;
pub use harness::GenerationHarness;
