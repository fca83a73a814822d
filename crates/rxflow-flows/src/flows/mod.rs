//! The three pharmacy generation flows.

pub mod allergy;
pub mod anagram;
pub mod case_sim;

pub use allergy::AllergyFlow;
pub use anagram::AnagramFlow;
pub use case_sim::CaseSimFlow;
