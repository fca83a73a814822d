//! TOML-driven boundary defaults.
//!
//! `FlowDefaults` holds the values used to resolve every optional request
//! field before flow logic runs. Defaulting happens exactly once per
//! invocation, at the flow boundary — downstream code never sees an unset
//! option.

use std::path::Path;

use serde::Deserialize;

use rxflow_contracts::error::{FlowError, FlowResult};

/// Compile-time copy of the stock defaults document.
const EMBEDDED_DEFAULTS: &str = include_str!("../defaults.toml");

/// The resolved default values applied at each flow boundary.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FlowDefaults {
    /// Language tag for generated text.
    pub language: String,
    /// Entry count for anagram requests that do not specify one.
    pub anagram_count: usize,
    /// Case topic for simulation requests with no (or an unrecognized) topic.
    pub case_topic: String,
}

/// Wrapper matching the `[defaults]` table in the TOML document.
#[derive(Debug, Deserialize)]
struct DefaultsDocument {
    defaults: FlowDefaults,
}

impl FlowDefaults {
    /// Parse `s` as a TOML defaults document.
    ///
    /// Returns `FlowError::ConfigError` if the TOML is malformed or does not
    /// match the expected `[defaults]` schema.
    pub fn from_toml_str(s: &str) -> FlowResult<Self> {
        let doc: DefaultsDocument = toml::from_str(s).map_err(|e| FlowError::ConfigError {
            reason: format!("failed to parse defaults TOML: {}", e),
        })?;
        Ok(doc.defaults)
    }

    /// Read the file at `path` and parse it as a TOML defaults document.
    pub fn from_file(path: &Path) -> FlowResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FlowError::ConfigError {
            reason: format!("failed to read defaults file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The stock defaults shipped with the crate.
    pub fn embedded() -> FlowResult<Self> {
        Self::from_toml_str(EMBEDDED_DEFAULTS)
    }
}

impl Default for FlowDefaults {
    /// Falls back to hardcoded values identical to the embedded document, so
    /// `Default` never fails even if the embedded TOML is edited incorrectly.
    fn default() -> Self {
        Self::embedded().unwrap_or(Self {
            language: "en".to_string(),
            anagram_count: 5,
            case_topic: "hypertension".to_string(),
        })
    }
}
