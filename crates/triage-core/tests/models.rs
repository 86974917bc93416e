use triage_core::models::answer::AnswerSet;
use triage_core::models::diagnosis::{CandidateDiagnosis, DiagnosisOutcome};
use triage_core::models::mode::Mode;
use triage_core::models::session::{SessionState, Tier};

#[test]
fn mode_parses_case_insensitively() {
    assert_eq!("normal".parse::<Mode>().unwrap(), Mode::Normal);
    assert_eq!(" DCG ".parse::<Mode>().unwrap(), Mode::Dcg);
    assert!("guided".parse::<Mode>().is_err());
}

#[test]
fn mode_serializes_as_path_segment() {
    assert_eq!(serde_json::to_string(&Mode::Dcg).unwrap(), "\"dcg\"");
    assert_eq!(Mode::Normal.to_string(), "normal");
}

#[test]
fn session_states_are_ordered_by_progression() {
    assert!(SessionState::AwaitingTier1 < SessionState::AwaitingTier2);
    assert!(SessionState::AwaitingTier2 < SessionState::AwaitingTier3);
    assert!(SessionState::AwaitingTier3 < SessionState::Done);
    assert_eq!(Tier::Trigger.accepted_in(), SessionState::AwaitingTier3);
    assert_eq!(Tier::Detail.to_string(), "tier 2");
}

#[test]
fn blank_answers_are_absent() {
    let answers: AnswerSet = [("fever", "   "), ("cough", "dry")].into_iter().collect();
    assert!(!answers.contains("fever"));
    assert_eq!(answers.get("cough"), Some("dry"));
    assert_eq!(answers.len(), 1);
}

#[test]
fn repeated_subjects_are_joined() {
    let mut answers = AnswerSet::new();
    answers.push("fever", "high");
    answers.push("fever", " for three days ");
    assert_eq!(answers.get("fever"), Some("high; for three days"));
}

#[test]
fn answer_parts_keep_their_question_position() {
    let mut answers = AnswerSet::new();
    answers.push_parts("rash", &["", " yes ", "no"]);
    answers.push_parts("fever", &["", "  "]);
    assert_eq!(answers.get("rash"), Some("; yes; no"));
    assert_eq!(answers.get("rash").unwrap().split("; ").nth(1), Some("yes"));
    assert!(!answers.contains("fever"));
}

#[test]
fn ranked_outcome_has_no_message_field() {
    let outcome = DiagnosisOutcome::Ranked {
        diagnoses: vec![CandidateDiagnosis {
            disease: "Flu".to_string(),
            probability: 55.6,
            department: "General Pediatrics".to_string(),
        }],
        department: "General Pediatrics".to_string(),
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert!(json.get("diagnoses").is_some());
    assert!(json.get("message").is_none());
    assert_eq!(json["diagnoses"][0]["disease"], "Flu");
}

#[test]
fn no_match_outcome_has_only_message() {
    let json = serde_json::to_value(DiagnosisOutcome::no_match()).unwrap();
    assert!(json.get("diagnoses").is_none());
    assert!(json["message"].as_str().unwrap().contains("consult a doctor"));
    assert!(DiagnosisOutcome::no_match().department().is_none());
}
