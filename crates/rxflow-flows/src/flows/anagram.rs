//! Flow 2: Pharmacy Anagram Generator
//!
//! Produces a set of drug-name anagram puzzles for a free-text topic. The
//! completion path asks the backend to invent puzzles; the fallback resolves
//! the topic onto a canned category by keyword scoring, shuffles that
//! category's entries, and returns the first N.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use rxflow_contracts::{
    generated::Generated,
    request::{GenerationOptions, RequestId},
    shape::ShapeSpec,
};
use rxflow_core::{CompletionClient, GenerationHarness};

use crate::catalogs::{AnagramCategory, ANAGRAM_CATEGORIES, DEFAULT_ANAGRAM_CATEGORY};
use crate::config::FlowDefaults;

// ── Input / output types ─────────────────────────────────────────────────────

/// An anagram-set request. `topic` is free text from the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnagramRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub options: GenerationOptions,
}

/// One puzzle in a delivered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnagramEntry {
    pub word: String,
    pub scrambled: String,
    #[serde(default)]
    pub clue: String,
}

/// The delivered anagram set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnagramSet {
    pub anagrams: Vec<AnagramEntry>,
    #[serde(default)]
    pub topic: String,
}

/// The shallow shape an anagram completion must satisfy.
pub fn shape() -> ShapeSpec {
    ShapeSpec::new("anagram-set-v1", &["anagrams"])
}

// ── Topic matcher ────────────────────────────────────────────────────────────

/// Resolve a free-text topic onto a catalog category.
///
/// An exact case-insensitive match of a category name wins outright.
/// Otherwise each category is scored by summing the lengths of its keywords
/// that appear as substrings of the lowercased topic; the highest score wins,
/// earlier categories winning ties. An all-zero score resolves to the
/// default category.
pub fn match_category(topic: &str) -> &'static AnagramCategory {
    let needle = topic.trim().to_lowercase();

    if let Some(exact) = ANAGRAM_CATEGORIES.iter().find(|c| c.name == needle) {
        return exact;
    }

    let mut best: Option<(&'static AnagramCategory, usize)> = None;
    for category in ANAGRAM_CATEGORIES {
        let score: usize = category
            .keywords
            .iter()
            .filter(|kw| needle.contains(*kw))
            .map(|kw| kw.len())
            .sum();
        if score > 0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((category, score));
        }
    }

    match best {
        Some((category, _)) => category,
        None => ANAGRAM_CATEGORIES
            .iter()
            .find(|c| c.name == DEFAULT_ANAGRAM_CATEGORY)
            .unwrap_or(&ANAGRAM_CATEGORIES[0]),
    }
}

// ── Prompt builder ───────────────────────────────────────────────────────────

/// Build the anagram-generation prompt.
pub fn build_prompt(topic: &str, count: usize, language: &str) -> String {
    format!(
        "You are a pharmacy educator creating a word game for students.\n\
         Respond in language: {language}.\n\
         \n\
         Create exactly {count} anagram puzzles about: {topic}.\n\
         \n\
         For each puzzle:\n\
         1. Pick a real drug name relevant to the topic.\n\
         2. Scramble its letters so every letter is used exactly once and the \
            scramble differs from the answer.\n\
         3. Write a one-line clinical clue that hints at the drug without naming it.\n\
         \n\
         Respond with a single JSON object containing the keys: anagrams, topic. \
         Each anagram entry carries word, scrambled, and clue."
    )
}

// ── Fallback generator ───────────────────────────────────────────────────────

/// Build a fallback set with an explicit RNG. The shuffle gives each request
/// a different subset and ordering; `count` beyond the catalog size is capped.
pub fn build_fallback_with_rng<R: Rng + ?Sized>(
    topic: &str,
    count: usize,
    rng: &mut R,
) -> AnagramSet {
    let category = match_category(topic);

    let mut pool: Vec<&'static crate::catalogs::CannedAnagram> = category.entries.iter().collect();
    pool.shuffle(rng);
    pool.truncate(count.min(pool.len()));

    AnagramSet {
        anagrams: pool
            .into_iter()
            .map(|entry| AnagramEntry {
                word: entry.word.to_string(),
                scrambled: entry.scrambled.to_string(),
                clue: entry.clue.to_string(),
            })
            .collect(),
        topic: category.name.to_string(),
    }
}

/// Fallback with the thread-local RNG.
pub fn build_fallback(topic: &str, count: usize) -> AnagramSet {
    build_fallback_with_rng(topic, count, &mut rand::thread_rng())
}

// ── Flow entry point ─────────────────────────────────────────────────────────

/// The anagram generator flow.
#[derive(Debug, Default)]
pub struct AnagramFlow {
    harness: GenerationHarness,
    defaults: FlowDefaults,
}

impl AnagramFlow {
    /// Create the flow with the given boundary defaults.
    pub fn new(defaults: FlowDefaults) -> Self {
        Self {
            harness: GenerationHarness::new(),
            defaults,
        }
    }

    /// Generate one anagram set. Always resolves.
    pub async fn run(
        &self,
        client: &dyn CompletionClient,
        request: AnagramRequest,
    ) -> Generated<AnagramSet> {
        let request_id = RequestId::new();
        let topic = request
            .topic
            .unwrap_or_else(|| DEFAULT_ANAGRAM_CATEGORY.to_string());
        let count = request.options.count.unwrap_or(self.defaults.anagram_count);
        let language = request
            .options
            .language
            .unwrap_or_else(|| self.defaults.language.clone());
        debug!(
            request_id = %request_id,
            flow = "anagram-set",
            topic = %topic,
            count,
            "anagram generation starting"
        );

        let prompt = build_prompt(&topic, count, &language);
        self.harness
            .run(request_id, client, &prompt, &shape(), || {
                build_fallback(&topic, count)
            })
            .await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
