//! Flow 1: Allergy Risk Checker
//!
//! Takes a symptom report and an optional ingredient scan, asks the
//! completion backend for a structured risk assessment, and falls back to a
//! deterministic decision ladder when the attempt fails:
//!
//!   severity emergency → emergency; severe → high; moderate → medium;
//!   otherwise low; then an "avoid" ingredient safety level escalates the
//!   result to at least high. The ladder only ever escalates — an emergency
//!   tier is never lowered by the ingredient check.

use serde::{Deserialize, Serialize};
use tracing::debug;

use rxflow_contracts::{
    generated::Generated,
    request::{GenerationOptions, RequestId},
    shape::ShapeSpec,
};
use rxflow_core::{CompletionClient, GenerationHarness};

use crate::catalogs::{
    AllergyBoilerplate, ALLERGY_DISCLAIMER, ALLERGY_EMERGENCY, ALLERGY_HIGH, ALLERGY_LOW,
    ALLERGY_MEDIUM, COMMON_ALLERGENS,
};
use crate::config::FlowDefaults;

// ── Input types ──────────────────────────────────────────────────────────────

/// How severe the caller reports the symptoms to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymptomSeverity {
    Mild,
    Moderate,
    Severe,
    Emergency,
}

/// The verdict of an upstream ingredient scan, if one was run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientSafety {
    Safe,
    Caution,
    Avoid,
}

/// Caller-reported symptoms. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<SymptomSeverity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset: Option<String>,
}

/// Result of scanning a product's ingredient list against the patient record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientScan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_level: Option<IngredientSafety>,
    #[serde(default)]
    pub flagged_ingredients: Vec<String>,
}

/// The full allergy-check request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<SymptomReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_scan: Option<IngredientScan>,
    #[serde(default)]
    pub options: GenerationOptions,
}

/// The request after one-time boundary defaulting. Flow logic only ever sees
/// this form — no optional chaining downstream.
#[derive(Debug, Clone)]
pub struct ResolvedAllergyInput {
    pub severity: SymptomSeverity,
    pub description: String,
    pub onset: String,
    pub safety_level: Option<IngredientSafety>,
    pub flagged_ingredients: Vec<String>,
    pub language: String,
    pub emergency_mode: bool,
}

impl ResolvedAllergyInput {
    /// Resolve every optional field once, against `defaults`.
    pub fn resolve(request: AllergyRequest, defaults: &FlowDefaults) -> Self {
        let symptoms = request.symptoms.unwrap_or_default();
        let scan = request.ingredient_scan.unwrap_or_default();
        Self {
            severity: symptoms.severity.unwrap_or(SymptomSeverity::Mild),
            description: symptoms.description.unwrap_or_default(),
            onset: symptoms.onset.unwrap_or_default(),
            safety_level: scan.safety_level,
            flagged_ingredients: scan.flagged_ingredients,
            language: request
                .options
                .language
                .unwrap_or_else(|| defaults.language.clone()),
            emergency_mode: request.options.emergency_mode.unwrap_or(false),
        }
    }
}

// ── Output types (camelCase wire shape) ──────────────────────────────────────

/// Overall risk tier. Ordered: low < medium < high < emergency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Emergency,
}

/// The risk portion of an assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub overall_risk: RiskLevel,
    #[serde(default)]
    pub likely_allergens: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

/// What the patient should do next.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    #[serde(default)]
    pub immediate_steps: Vec<String>,
    #[serde(default)]
    pub when_to_seek_help: String,
}

/// The complete allergy assessment delivered to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergyAssessment {
    #[serde(default)]
    pub allergy_risk_detected: bool,
    pub risk_assessment: RiskAssessment,
    pub action_plan: ActionPlan,
    #[serde(default)]
    pub disclaimer: String,
}

// ── Shape ────────────────────────────────────────────────────────────────────

/// The shallow shape an allergy completion must satisfy.
pub fn shape() -> ShapeSpec {
    ShapeSpec::new("allergy-assessment-v1", &["riskAssessment", "actionPlan"])
}

// ── Prompt builder ───────────────────────────────────────────────────────────

/// Build the allergy-check prompt. Pure string construction; any input,
/// including a fully-defaulted one, yields a well-formed prompt.
pub fn build_prompt(input: &ResolvedAllergyInput) -> String {
    let symptoms_json = serde_json::to_string(&serde_json::json!({
        "severity": input.severity,
        "description": input.description,
        "onset": input.onset,
    }))
    .unwrap_or_else(|_| "{}".to_string());

    let scan_json = serde_json::to_string(&serde_json::json!({
        "safetyLevel": input.safety_level,
        "flaggedIngredients": input.flagged_ingredients,
    }))
    .unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are a clinical pharmacist assessing a possible allergic reaction.\n\
         Respond in language: {language}.{emergency_note}\n\
         \n\
         Reported symptoms:\n{symptoms}\n\
         \n\
         Ingredient scan result:\n{scan}\n\
         \n\
         Produce a structured assessment that:\n\
         1. Assigns an overallRisk of exactly one of: low, medium, high, emergency.\n\
         2. Lists the likely allergens, using the flagged ingredients when given.\n\
         3. Explains the reasoning in two or three sentences a patient can follow.\n\
         4. Gives an actionPlan with concrete immediateSteps and a clear whenToSeekHelp line.\n\
         5. Sets allergyRiskDetected to true whenever overallRisk is above low.\n\
         \n\
         Respond with a single JSON object containing the keys: \
         allergyRiskDetected, riskAssessment, actionPlan, disclaimer.",
        language = input.language,
        emergency_note = if input.emergency_mode {
            " The caller flagged this as an emergency context; bias wording toward urgency."
        } else {
            ""
        },
        symptoms = symptoms_json,
        scan = scan_json,
    )
}

// ── Fallback generator ───────────────────────────────────────────────────────

/// The fixed fallback decision ladder. Total over its inputs.
pub fn fallback_risk(
    severity: SymptomSeverity,
    safety_level: Option<IngredientSafety>,
) -> RiskLevel {
    let base = match severity {
        SymptomSeverity::Emergency => RiskLevel::Emergency,
        SymptomSeverity::Severe => RiskLevel::High,
        SymptomSeverity::Moderate => RiskLevel::Medium,
        SymptomSeverity::Mild => RiskLevel::Low,
    };

    // The ingredient check runs after the ladder and can only escalate.
    if safety_level == Some(IngredientSafety::Avoid) && base < RiskLevel::High {
        RiskLevel::High
    } else {
        base
    }
}

/// Synthesize a schema-conforming assessment offline. Never fails, never
/// calls any external service.
pub fn build_fallback(input: &ResolvedAllergyInput) -> AllergyAssessment {
    let risk = fallback_risk(input.severity, input.safety_level);

    let boilerplate: &AllergyBoilerplate = match risk {
        RiskLevel::Low => &ALLERGY_LOW,
        RiskLevel::Medium => &ALLERGY_MEDIUM,
        RiskLevel::High => &ALLERGY_HIGH,
        RiskLevel::Emergency => &ALLERGY_EMERGENCY,
    };

    let likely_allergens = if input.flagged_ingredients.is_empty() {
        COMMON_ALLERGENS.iter().map(|a| a.to_string()).collect()
    } else {
        input.flagged_ingredients.clone()
    };

    AllergyAssessment {
        allergy_risk_detected: risk > RiskLevel::Low,
        risk_assessment: RiskAssessment {
            overall_risk: risk,
            likely_allergens,
            reasoning: boilerplate.reasoning.to_string(),
        },
        action_plan: ActionPlan {
            immediate_steps: boilerplate
                .immediate_steps
                .iter()
                .map(|s| s.to_string())
                .collect(),
            when_to_seek_help: boilerplate.when_to_seek_help.to_string(),
        },
        disclaimer: ALLERGY_DISCLAIMER.to_string(),
    }
}

// ── Flow entry point ─────────────────────────────────────────────────────────

/// The allergy checker flow.
#[derive(Debug, Default)]
pub struct AllergyFlow {
    harness: GenerationHarness,
    defaults: FlowDefaults,
}

impl AllergyFlow {
    /// Create the flow with the given boundary defaults.
    pub fn new(defaults: FlowDefaults) -> Self {
        Self {
            harness: GenerationHarness::new(),
            defaults,
        }
    }

    /// Run one allergy check. Always resolves; the result satisfies the
    /// assessment shape whether it came from the completion or the fallback.
    pub async fn run(
        &self,
        client: &dyn CompletionClient,
        request: AllergyRequest,
    ) -> Generated<AllergyAssessment> {
        let request_id = RequestId::new();
        let input = ResolvedAllergyInput::resolve(request, &self.defaults);
        debug!(
            request_id = %request_id,
            flow = "allergy-check",
            severity = ?input.severity,
            safety_level = ?input.safety_level,
            "allergy check starting"
        );

        let prompt = build_prompt(&input);
        self.harness
            .run(request_id, client, &prompt, &shape(), || {
                build_fallback(&input)
            })
            .await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
