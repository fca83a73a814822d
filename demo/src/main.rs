//! RXFLOW Pharmacy Flows — Demo CLI
//!
//! Runs one or all of the three pharmacy generation flows against scripted
//! completion clients. Each flow is exercised twice: once against a client
//! that returns a healthy structured payload (the completion path) and once
//! against a client that fails outright (the fallback path), so both halves
//! of the accept-or-fallback contract are visible in one run.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- allergy-check
//!   cargo run -p demo -- anagram-set
//!   cargo run -p demo -- case-sim

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rxflow_contracts::generated::{Generated, Source};
use rxflow_core::doubles::{CannedClient, FailingClient};
use rxflow_flows::flows::allergy::{AllergyRequest, SymptomReport, SymptomSeverity};
use rxflow_flows::flows::anagram::AnagramRequest;
use rxflow_flows::flows::case_sim::CaseRequest;
use rxflow_flows::{AllergyFlow, AnagramFlow, CaseSimFlow, FlowDefaults};

// ── CLI definition ────────────────────────────────────────────────────────────

/// RXFLOW — pharmacy structured-generation flows demo.
///
/// Each subcommand runs one or all of the three flows, showing a completion
/// being accepted and a failure resolving through the deterministic fallback.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "RXFLOW pharmacy flows demo",
    long_about = "Runs the RXFLOW pharmacy flows against scripted completion clients,\n\
                  showing guard acceptance, fallback substitution, and provenance."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three flows in sequence.
    RunAll,
    /// Flow 1: Allergy Risk Checker (severity ladder fallback).
    AllergyCheck,
    /// Flow 2: Pharmacy Anagram Generator (canned catalog fallback).
    AnagramSet,
    /// Flow 3: Clinical Case Simulator (case library fallback).
    CaseSim,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let defaults = FlowDefaults::default();
    match cli.command {
        Command::RunAll => {
            run_allergy_check(&defaults).await;
            run_anagram_set(&defaults).await;
            run_case_sim(&defaults).await;
        }
        Command::AllergyCheck => run_allergy_check(&defaults).await,
        Command::AnagramSet => run_anagram_set(&defaults).await,
        Command::CaseSim => run_case_sim(&defaults).await,
    }

    println!("All selected flows resolved.");
}

// ── Flow runners ──────────────────────────────────────────────────────────────

async fn run_allergy_check(defaults: &FlowDefaults) {
    println!("── Flow 1: Allergy Risk Checker ──");
    info!(flow = "allergy-check", "running completion and fallback paths");
    let flow = AllergyFlow::new(defaults.clone());

    let request = AllergyRequest {
        symptoms: Some(SymptomReport {
            severity: Some(SymptomSeverity::Severe),
            description: Some("hives spreading up both arms".to_string()),
            onset: Some("two hours after the first dose".to_string()),
        }),
        ..Default::default()
    };

    let healthy = CannedClient::new(json!({
        "allergyRiskDetected": true,
        "riskAssessment": {
            "overallRisk": "high",
            "likelyAllergens": ["amoxicillin"],
            "reasoning": "Hives within hours of a first penicillin dose fit a type I reaction."
        },
        "actionPlan": {
            "immediateSteps": ["Stop the antibiotic.", "Take an oral antihistamine."],
            "whenToSeekHelp": "Go to urgent care now; call emergency services if breathing changes."
        },
        "disclaimer": "Informational only."
    }));
    let result = flow.run(&healthy, request.clone()).await;
    print_outcome(&result, |a| {
        format!(
            "overall risk {:?}, allergens: {}",
            a.risk_assessment.overall_risk,
            a.risk_assessment.likely_allergens.join(", ")
        )
    });

    let result = flow.run(&FailingClient::default(), request).await;
    print_outcome(&result, |a| {
        format!(
            "overall risk {:?}, first step: {}",
            a.risk_assessment.overall_risk,
            a.action_plan
                .immediate_steps
                .first()
                .map(String::as_str)
                .unwrap_or("-")
        )
    });
    println!();
}

async fn run_anagram_set(defaults: &FlowDefaults) {
    println!("── Flow 2: Pharmacy Anagram Generator ──");
    info!(flow = "anagram-set", "running completion and fallback paths");
    let flow = AnagramFlow::new(defaults.clone());

    let request = AnagramRequest {
        topic: Some("cardiovascular drugs".to_string()),
        ..Default::default()
    };

    let healthy = CannedClient::new(json!({
        "anagrams": [
            { "word": "heparin", "scrambled": "inpareh", "clue": "Parenteral anticoagulant" },
            { "word": "clopidogrel", "scrambled": "gridcollope", "clue": "P2Y12 inhibitor prodrug" }
        ],
        "topic": "anticoagulants and antiplatelets"
    }));
    let result = flow.run(&healthy, request.clone()).await;
    print_outcome(&result, |set| {
        format!("{} puzzles on '{}'", set.anagrams.len(), set.topic)
    });

    let result = flow.run(&FailingClient::default(), request).await;
    print_outcome(&result, |set| {
        let scrambles: Vec<&str> = set.anagrams.iter().map(|a| a.scrambled.as_str()).collect();
        format!(
            "{} puzzles on '{}': {}",
            set.anagrams.len(),
            set.topic,
            scrambles.join(", ")
        )
    });
    println!();
}

async fn run_case_sim(defaults: &FlowDefaults) {
    println!("── Flow 3: Clinical Case Simulator ──");
    info!(flow = "case-sim", "running generate and grading modes");
    let flow = CaseSimFlow::new(defaults.clone());

    let healthy = CannedClient::new(json!({
        "caseTitle": "Warfarin and a New Antibiotic",
        "presentation": "A 70-year-old on warfarin starts trimethoprim-sulfamethoxazole for a UTI.",
        "history": "Atrial fibrillation, INR stable at 2.5 for a year.",
        "questions": [
            "What interaction is expected and through what mechanism?",
            "How should INR monitoring change this week?",
            "What alternative antibiotic avoids the interaction?"
        ]
    }));
    let request = CaseRequest {
        topic: Some("anticoagulation".to_string()),
        ..Default::default()
    };
    let result = flow.run(&healthy, request).await;
    print_outcome(&result, |r| describe_case_response(r));

    // Grading mode against a failing client: canned feedback.
    let request = CaseRequest {
        topic: Some("diabetes".to_string()),
        student_answers: Some(vec![
            "Hold metformin for 48 hours around the contrast study.".to_string(),
        ]),
        ..Default::default()
    };
    let result = flow.run(&FailingClient::default(), request).await;
    print_outcome(&result, |r| describe_case_response(r));
    println!();
}

fn describe_case_response(response: &rxflow_flows::flows::case_sim::CaseSimResponse) -> String {
    use rxflow_flows::flows::case_sim::CaseSimResponse;
    match response {
        CaseSimResponse::Case(case) => {
            format!("case '{}' with {} questions", case.case_title, case.questions.len())
        }
        CaseSimResponse::Feedback(feedback) => {
            format!("feedback with {} key points", feedback.key_points.len())
        }
    }
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn print_outcome<T>(result: &Generated<T>, describe: impl Fn(&T) -> String) {
    let provenance = match result.source {
        Source::Completion => "completion",
        Source::Fallback => "fallback  ",
    };
    println!(
        "  [{}] request {} → {}",
        provenance,
        result.request_id,
        describe(&result.value)
    );
}

fn print_banner() {
    println!();
    println!("RXFLOW — Pharmacy Structured-Generation Flows");
    println!("=============================================");
    println!();
    println!("Per flow invocation:");
    println!("  [1] Optional request fields resolved against TOML defaults");
    println!("  [2] Prompt built and ONE completion attempt made");
    println!("  [3] Shallow guard checks the payload against the flow's shape");
    println!("  [4] Accepted payloads deserialize into typed output");
    println!("  [5] Any failure substitutes the deterministic fallback — flows never error");
    println!();
}
