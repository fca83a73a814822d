//! Flow 3: Clinical Case Simulator
//!
//! Two modes behind one request type: generate a practice case for a topic,
//! or grade a student's submitted answers. The presence of `studentAnswers`
//! selects the mode. Fallbacks draw from a hand-authored case library and a
//! static feedback block.

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

use crate::catalogs::{
    CaseTopic, CaseVariant, CANNED_FEEDBACK, CANNED_FEEDBACK_POINTS, CASE_LIBRARY, GENERIC_CASE,
};
use crate::config::FlowDefaults;

// ── Input / output types ─────────────────────────────────────────────────────

/// A case-simulator request. `student_answers` present → grading mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_answers: Option<Vec<String>>,
    #[serde(default)]
    pub options: GenerationOptions,
}

/// A generated practice case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalCase {
    pub case_title: String,
    pub presentation: String,
    #[serde(default)]
    pub history: String,
    pub questions: Vec<String>,
}

/// Feedback on a student's submitted answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFeedback {
    pub feedback: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// What a case-simulator run delivers, depending on mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaseSimResponse {
    Case(ClinicalCase),
    Feedback(CaseFeedback),
}

/// Shape for the case-generation mode.
pub fn case_shape() -> ShapeSpec {
    ShapeSpec::new(
        "clinical-case-v1",
        &["caseTitle", "presentation", "questions"],
    )
}

/// Shape for the grading mode.
pub fn feedback_shape() -> ShapeSpec {
    ShapeSpec::new("case-feedback-v1", &["feedback"])
}

// ── Prompt builders ──────────────────────────────────────────────────────────

/// Build the case-generation prompt.
pub fn build_case_prompt(topic: &str, language: &str) -> String {
    format!(
        "You are a clinical pharmacy instructor writing a practice case.\n\
         Respond in language: {language}.\n\
         \n\
         Write one realistic patient case about: {topic}.\n\
         \n\
         The case must:\n\
         1. Present a fictional patient with age, chief complaint, and vitals where relevant.\n\
         2. Include a short relevant history.\n\
         3. Pose three open questions that test therapeutic reasoning, not recall.\n\
         4. Contain no real patient identifiers.\n\
         \n\
         Respond with a single JSON object containing the keys: \
         caseTitle, presentation, history, questions."
    )
}

/// Build the answer-grading prompt.
pub fn build_feedback_prompt(topic: &str, answers: &[String], language: &str) -> String {
    let answers_json =
        serde_json::to_string(answers).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You are a clinical pharmacy instructor grading a student's case answers.\n\
         Respond in language: {language}.\n\
         \n\
         Case topic: {topic}.\n\
         Student answers:\n{answers_json}\n\
         \n\
         Write constructive feedback that:\n\
         1. Names what the student got right before what they missed.\n\
         2. Corrects errors with the underlying mechanism, not just the right answer.\n\
         3. Ends with two or three key points to review.\n\
         \n\
         Respond with a single JSON object containing the keys: feedback, keyPoints."
    )
}

// ── Fallback generators ──────────────────────────────────────────────────────

/// Look up a library topic case-insensitively; unknown topics fall through to
/// the configured default, and a misconfigured default to the first entry.
fn resolve_topic(topic: &str, defaults: &FlowDefaults) -> &'static CaseTopic {
    let needle = topic.trim().to_lowercase();
    CASE_LIBRARY
        .iter()
        .find(|t| t.name == needle)
        .or_else(|| CASE_LIBRARY.iter().find(|t| t.name == defaults.case_topic))
        .unwrap_or(&CASE_LIBRARY[0])
}

/// Pick one of a topic's variants uniformly at random. A topic with no
/// variants yields the generic review case.
fn pick_variant<'a, R: Rng + ?Sized>(topic: &'a CaseTopic, rng: &mut R) -> &'a CaseVariant {
    topic.variants.choose(rng).unwrap_or(&GENERIC_CASE)
}

/// Pick one library variant for the topic, uniformly at random.
pub fn build_case_fallback_with_rng<R: Rng + ?Sized>(
    topic: &str,
    defaults: &FlowDefaults,
    rng: &mut R,
) -> ClinicalCase {
    let library_topic = resolve_topic(topic, defaults);
    let variant = pick_variant(library_topic, rng);

    ClinicalCase {
        case_title: variant.title.to_string(),
        presentation: variant.presentation.to_string(),
        history: variant.history.to_string(),
        questions: variant.questions.iter().map(|q| q.to_string()).collect(),
    }
}

/// Case fallback with the thread-local RNG.
pub fn build_case_fallback(topic: &str, defaults: &FlowDefaults) -> ClinicalCase {
    build_case_fallback_with_rng(topic, defaults, &mut rand::thread_rng())
}

/// The grading-mode fallback: fixed encouragement, independent of answers.
pub fn build_feedback_fallback() -> CaseFeedback {
    CaseFeedback {
        feedback: CANNED_FEEDBACK.to_string(),
        key_points: CANNED_FEEDBACK_POINTS.iter().map(|p| p.to_string()).collect(),
    }
}

// ── Flow entry point ─────────────────────────────────────────────────────────

/// The clinical case simulator flow.
#[derive(Debug, Default)]
pub struct CaseSimFlow {
    harness: GenerationHarness,
    defaults: FlowDefaults,
}

impl CaseSimFlow {
    /// Create the flow with the given boundary defaults.
    pub fn new(defaults: FlowDefaults) -> Self {
        Self {
            harness: GenerationHarness::new(),
            defaults,
        }
    }

    /// Generate a practice case for `topic`.
    pub async fn simulate(
        &self,
        client: &dyn CompletionClient,
        topic: &str,
        options: &GenerationOptions,
    ) -> Generated<ClinicalCase> {
        let request_id = RequestId::new();
        let language = options
            .language
            .clone()
            .unwrap_or_else(|| self.defaults.language.clone());
        debug!(
            request_id = %request_id,
            flow = "case-sim",
            mode = "generate",
            topic,
            "case generation starting"
        );

        let prompt = build_case_prompt(topic, &language);
        self.harness
            .run(request_id, client, &prompt, &case_shape(), || {
                build_case_fallback(topic, &self.defaults)
            })
            .await
    }

    /// Grade a student's submitted answers for `topic`.
    pub async fn feedback(
        &self,
        client: &dyn CompletionClient,
        topic: &str,
        answers: &[String],
        options: &GenerationOptions,
    ) -> Generated<CaseFeedback> {
        let request_id = RequestId::new();
        let language = options
            .language
            .clone()
            .unwrap_or_else(|| self.defaults.language.clone());
        debug!(
            request_id = %request_id,
            flow = "case-sim",
            mode = "feedback",
            topic,
            answer_count = answers.len(),
            "answer grading starting"
        );

        let prompt = build_feedback_prompt(topic, answers, &language);
        self.harness
            .run(request_id, client, &prompt, &feedback_shape(), || {
                build_feedback_fallback()
            })
            .await
    }

    /// Dispatch on request mode: answers present → grading, otherwise a new
    /// case. Always resolves.
    pub async fn run(
        &self,
        client: &dyn CompletionClient,
        request: CaseRequest,
    ) -> Generated<CaseSimResponse> {
        let topic = request
            .topic
            .unwrap_or_else(|| self.defaults.case_topic.clone());

        match request.student_answers {
            Some(answers) => self
                .feedback(client, &topic, &answers, &request.options)
                .await
                .map(CaseSimResponse::Feedback),
            None => self
                .simulate(client, &topic, &request.options)
                .await
                .map(CaseSimResponse::Case),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use std::collections::HashSet;

    use rxflow_contracts::generated::Source;
    use rxflow_core::doubles::{CannedClient, FailingClient};

    use super::*;

    // ── Fallbacks ────────────────────────────────────────────────────────────

    #[test]
    fn topic_lookup_is_case_insensitive() {
        let defaults = FlowDefaults::default();
        let mut rng = StdRng::seed_from_u64(3);
        let case = build_case_fallback_with_rng("  DiAbEtEs ", &defaults, &mut rng);
        assert!(CASE_LIBRARY
            .iter()
            .find(|t| t.name == "diabetes")
            .unwrap()
            .variants
            .iter()
            .any(|v| v.title == case.case_title));
    }

    /// Unknown topics resolve to the configured default topic's variants.
    #[test]
    fn unknown_topic_uses_default_topic() {
        let defaults = FlowDefaults::default();
        let mut rng = StdRng::seed_from_u64(3);
        let case = build_case_fallback_with_rng("astrophysics", &defaults, &mut rng);
        assert!(CASE_LIBRARY
            .iter()
            .find(|t| t.name == defaults.case_topic)
            .unwrap()
            .variants
            .iter()
            .any(|v| v.title == case.case_title));
    }

    /// A topic entry with no variants yields the generic review case instead
    /// of panicking.
    #[test]
    fn empty_variant_list_yields_generic_case() {
        let empty_topic = CaseTopic {
            name: "placeholder",
            variants: &[],
        };
        let mut rng = StdRng::seed_from_u64(3);
        let variant = pick_variant(&empty_topic, &mut rng);
        assert_eq!(variant.title, GENERIC_CASE.title);
        assert!(!variant.questions.is_empty());
    }

    /// A misconfigured default topic still yields a case from the library.
    #[test]
    fn bad_default_topic_still_resolves() {
        let defaults = FlowDefaults {
            case_topic: "no such topic".to_string(),
            ..FlowDefaults::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let case = build_case_fallback_with_rng("also unknown", &defaults, &mut rng);
        assert!(!case.case_title.is_empty());
        assert!(!case.questions.is_empty());
    }

    /// With enough draws, every variant of a multi-variant topic appears.
    #[test]
    fn variant_choice_covers_the_topic() {
        let defaults = FlowDefaults::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = HashSet::new();
        for _ in 0..64 {
            let case = build_case_fallback_with_rng("diabetes", &defaults, &mut rng);
            seen.insert(case.case_title);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn case_fallback_satisfies_shape() {
        let case = build_case_fallback("asthma", &FlowDefaults::default());
        let value = serde_json::to_value(&case).unwrap();
        assert!(rxflow_guard::is_valid(
            &value,
            &["caseTitle", "presentation", "questions"]
        ));
    }

    #[test]
    fn feedback_fallback_satisfies_shape() {
        let feedback = build_feedback_fallback();
        let value = serde_json::to_value(&feedback).unwrap();
        assert!(rxflow_guard::is_valid(&value, &["feedback"]));
        assert!(!feedback.key_points.is_empty());
    }

    // ── Prompt builders ──────────────────────────────────────────────────────

    #[test]
    fn case_prompt_names_topic_and_keys() {
        let prompt = build_case_prompt("heart failure", "en");
        assert!(prompt.contains("heart failure"));
        assert!(prompt.contains("caseTitle"));
        assert!(prompt.contains("questions"));
    }

    #[test]
    fn feedback_prompt_embeds_answers() {
        let answers = vec!["ACE inhibitor cough is bradykinin mediated".to_string()];
        let prompt = build_feedback_prompt("hypertension", &answers, "en");
        assert!(prompt.contains("bradykinin"));
        assert!(prompt.contains("keyPoints"));
    }

    // ── End-to-end ───────────────────────────────────────────────────────────

    /// No answers → generation mode; a failing client yields a library case.
    #[tokio::test]
    async fn generation_mode_falls_back_to_library() {
        let flow = CaseSimFlow::default();
        let client = FailingClient::default();

        let request = CaseRequest {
            topic: Some("asthma".to_string()),
            ..Default::default()
        };
        let result = flow.run(&client, request).await;

        assert_eq!(result.source, Source::Fallback);
        match result.value {
            CaseSimResponse::Case(case) => {
                assert!(!case.presentation.is_empty());
                assert_eq!(case.questions.len(), 3);
            }
            CaseSimResponse::Feedback(_) => panic!("expected a case, got feedback"),
        }
    }

    /// Answers present → grading mode; a failing client yields canned feedback.
    #[tokio::test]
    async fn grading_mode_falls_back_to_canned_feedback() {
        let flow = CaseSimFlow::default();
        let client = FailingClient::default();

        let request = CaseRequest {
            topic: Some("diabetes".to_string()),
            student_answers: Some(vec!["hold metformin 48 hours".to_string()]),
            ..Default::default()
        };
        let result = flow.run(&client, request).await;

        assert!(result.is_fallback());
        match result.value {
            CaseSimResponse::Feedback(feedback) => {
                assert_eq!(feedback.feedback, CANNED_FEEDBACK);
            }
            CaseSimResponse::Case(_) => panic!("expected feedback, got a case"),
        }
    }

    /// A valid case completion is accepted with the provider's content.
    #[tokio::test]
    async fn valid_case_completion_is_accepted() {
        let flow = CaseSimFlow::default();
        let client = CannedClient::new(json!({
            "caseTitle": "Warfarin and a New Antibiotic",
            "presentation": "A 70-year-old on warfarin starts trimethoprim-sulfamethoxazole.",
            "history": "Atrial fibrillation, INR stable at 2.5 for a year.",
            "questions": ["What interaction is expected?", "What monitoring change is needed?"]
        }));

        let result = flow.run(&client, CaseRequest::default()).await;

        assert_eq!(result.source, Source::Completion);
        match result.value {
            CaseSimResponse::Case(case) => {
                assert_eq!(case.case_title, "Warfarin and a New Antibiotic");
            }
            CaseSimResponse::Feedback(_) => panic!("expected a case"),
        }
    }

    /// A hollow-but-keyed completion in grading mode fails typed
    /// deserialization and resolves via fallback.
    #[tokio::test]
    async fn hollow_feedback_completion_yields_fallback() {
        let flow = CaseSimFlow::default();
        let client = CannedClient::new(json!({ "feedback": { "not": "a string" } }));

        let request = CaseRequest {
            student_answers: Some(vec![]),
            ..Default::default()
        };
        let result = flow.run(&client, request).await;

        assert!(result.is_fallback());
    }
}
