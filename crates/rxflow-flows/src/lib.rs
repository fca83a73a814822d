//! RXFLOW pharmacy flows: allergy checker, anagram generator, and clinical
//! case simulator.
//!
//! Each flow owns its request/response types, prompt builder, shape, and
//! deterministic fallback generator, and runs its single completion attempt
//! through the shared [`rxflow_core::GenerationHarness`]. Every flow entry
//! point returns a [`rxflow_contracts::generated::Generated`] — callers never
//! see an error from a flow, only provenance.

pub mod catalogs;
pub mod config;
pub mod flows;

pub use config::FlowDefaults;
pub use flows::{AllergyFlow, AnagramFlow, CaseSimFlow};
