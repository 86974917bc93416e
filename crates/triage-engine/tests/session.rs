use std::collections::BTreeSet;

use triage_core::models::answer::AnswerSet;
use triage_core::models::diagnosis::{DiagnosisOutcome, NO_MATCH_MESSAGE};
use triage_core::models::mode::Mode;
use triage_core::models::session::{SessionState, Tier};
use triage_engine::error::EngineError;
use triage_engine::inference::{diagnose, InferenceSettings};
use triage_engine::Engine;
use triage_knowledge::{get_protocol, Knowledge};

fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
    pairs.iter().copied().collect()
}

fn ranking(outcome: &DiagnosisOutcome) -> Vec<(&str, f64)> {
    outcome
        .diagnoses()
        .iter()
        .map(|d| (d.disease.as_str(), d.probability))
        .collect()
}

#[test]
fn mild_fever_and_dry_cough_skip_tier3() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);

    let tier2 = session.submit_tier1(&engine, "fever, cough").unwrap();
    assert_eq!(tier2.keys().collect::<Vec<_>>(), vec!["cough", "fever"]);
    assert_eq!(session.state(), SessionState::AwaitingTier2);

    let tier3 = session
        .submit_tier2(&engine, answers(&[("fever", "mild"), ("cough", "dry")]))
        .unwrap();
    assert!(tier3.is_empty());
    assert_eq!(session.state(), SessionState::Done);

    let outcome = session.diagnosis().unwrap();
    assert_eq!(
        ranking(outcome),
        vec![("Flu", 44.4), ("Bronchitis", 42.9), ("Whooping Cough", 33.3)]
    );
    assert_eq!(outcome.department(), Some("General Pediatrics"));
    assert_eq!(
        session.history(),
        &[SessionState::AwaitingTier1, SessionState::AwaitingTier2, SessionState::Done]
    );
}

#[test]
fn unrecognized_report_leaves_session_waiting() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);

    assert_eq!(session.submit_tier1(&engine, "xyzzy"), Err(EngineError::EmptyInput));
    assert_eq!(session.state(), SessionState::AwaitingTier1);

    // The caller may retry.
    assert!(session.submit_tier1(&engine, "rash").is_ok());
    assert_eq!(session.state(), SessionState::AwaitingTier2);
}

#[test]
fn wheezing_leads_to_pulmonology() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);
    session.submit_tier1(&engine, "fever, cough").unwrap();

    let tier3 = session
        .submit_tier2(
            &engine,
            answers(&[("fever", "high-grade since yesterday"), ("cough", "wheezing")]),
        )
        .unwrap();
    assert_eq!(tier3.keys().collect::<Vec<_>>(), vec!["labored_breathing"]);
    assert_eq!(session.state(), SessionState::AwaitingTier3);

    let outcome = session
        .submit_tier3(&engine, answers(&[("labored_breathing", "yes")]))
        .unwrap()
        .clone();
    assert_eq!(
        ranking(&outcome),
        vec![
            ("Bronchiolitis", 87.5),
            ("RSV", 85.7),
            ("Roseola", 75.0),
            ("Flu", 55.6),
            ("Measles", 33.3),
            ("Whooping Cough", 33.3),
        ]
    );
    assert_eq!(outcome.department(), Some("Pulmonology"));
    assert_eq!(session.diagnosis().unwrap(), &outcome);
}

#[test]
fn negative_trigger_answer_adds_no_evidence() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);
    session.submit_tier1(&engine, "cough").unwrap();
    session
        .submit_tier2(&engine, answers(&[("cough", "wheezing")]))
        .unwrap();

    let outcome = session
        .submit_tier3(&engine, answers(&[("labored_breathing", "no")]))
        .unwrap();
    // wheezing 3 + cough 1 of 8
    assert_eq!(ranking(outcome)[0], ("Bronchiolitis", 50.0));
}

#[test]
fn weak_evidence_is_a_no_match() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);
    session.submit_tier1(&engine, "rash").unwrap();
    session.submit_tier2(&engine, answers(&[("rash", "")])).unwrap();

    let outcome = session.diagnosis().unwrap();
    assert_eq!(
        outcome,
        &DiagnosisOutcome::NoMatch {
            message: NO_MATCH_MESSAGE.to_string()
        }
    );
    assert!(outcome.diagnoses().is_empty());
}

#[test]
fn symptom_without_questions_still_reaches_a_diagnosis() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);

    let tier2 = session.submit_tier1(&engine, "swollen glands").unwrap();
    assert!(tier2.is_empty());
    assert_eq!(session.state(), SessionState::AwaitingTier2);

    let tier3 = session.submit_tier2(&engine, AnswerSet::new()).unwrap();
    assert!(tier3.is_empty());

    let outcome = session.diagnosis().unwrap();
    assert_eq!(ranking(outcome), vec![("Mumps", 60.0), ("Rubella", 40.0)]);
    assert_eq!(outcome.department(), Some("Infectious Disease"));
}

#[test]
fn directed_mumps_interview() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Dcg);

    let tier2 = session.submit_tier1(&engine, "swollen cheeks and fever").unwrap();
    assert_eq!(tier2.keys().collect::<Vec<_>>(), vec!["fever", "swollen_glands"]);

    let tier3 = session
        .submit_tier2(
            &engine,
            answers(&[("swollen_glands", "yes, below the ears; painful to chew"), ("fever", "no")]),
        )
        .unwrap();
    assert_eq!(tier3.keys().collect::<Vec<_>>(), vec!["mumps_exposure"]);

    let outcome = session
        .submit_tier3(&engine, answers(&[("mumps_exposure", "yes")]))
        .unwrap();
    assert_eq!(ranking(outcome), vec![("Mumps", 90.0), ("Rubella", 40.0)]);
    assert_eq!(outcome.department(), Some("Infectious Disease"));
}

#[test]
fn directed_yes_no_answers_reach_tier3() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Dcg);
    let tier2 = session.submit_tier1(&engine, "fever and a rash").unwrap();
    assert_eq!(tier2["fever"].len(), 4);

    let tier3 = session
        .submit_tier2(&engine, answers(&[("fever", "yes; yes; no"), ("rash", "no; yes; no")]))
        .unwrap();
    assert_eq!(tier3.keys().collect::<Vec<_>>(), vec!["measles_pattern"]);

    let outcome = session
        .submit_tier3(&engine, answers(&[("measles_pattern", "yes; yes")]))
        .unwrap();
    assert_eq!(
        ranking(outcome),
        vec![
            ("Roseola", 100.0),
            ("Measles", 77.8),
            ("Flu", 40.0),
            ("Kawasaki Disease", 40.0),
        ]
    );
    assert_eq!(outcome.department(), Some("Pediatrics"));
}

#[test]
fn directed_no_answers_skip_tier3() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Dcg);
    session.submit_tier1(&engine, "fever and a rash").unwrap();

    let tier3 = session
        .submit_tier2(&engine, answers(&[("fever", "no; no; no; no"), ("rash", "no")]))
        .unwrap();
    assert!(tier3.is_empty());
    assert_eq!(ranking(session.diagnosis().unwrap()), vec![("Roseola", 50.0)]);
}

#[test]
fn negated_mentions_in_details_add_no_symptoms() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);
    session.submit_tier1(&engine, "fever").unwrap();
    session
        .submit_tier2(&engine, answers(&[("fever", "high, no rash")]))
        .unwrap();

    let ids: Vec<&str> = session.symptoms().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["fever"]);
}

#[test]
fn tier2_answers_can_mention_new_symptoms() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);
    session.submit_tier1(&engine, "fever").unwrap();
    session
        .submit_tier2(&engine, answers(&[("fever", "mild, with a rash")]))
        .unwrap();

    let ids: Vec<&str> = session.symptoms().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["fever", "rash"]);
    assert_eq!(session.reported_symptoms(), vec!["fever"]);
    assert_eq!(session.summary().symptoms, vec!["fever", "rash"]);
}

#[test]
fn answers_for_unknown_subjects_are_dropped() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);
    session.submit_tier1(&engine, "cough").unwrap();
    session
        .submit_tier2(&engine, answers(&[("cough", "wheezing"), ("rash", "itchy")]))
        .unwrap();
    assert_eq!(session.tier2_answers().subjects().collect::<Vec<_>>(), vec!["cough"]);

    session
        .submit_tier3(
            &engine,
            answers(&[("labored_breathing", "yes"), ("measles_pattern", "yes")]),
        )
        .unwrap();
    assert_eq!(
        session.tier3_answers().subjects().collect::<Vec<_>>(),
        vec!["labored_breathing"]
    );
    assert!(!session.evidence(engine.protocol(Mode::Normal)).contains("measles_pattern"));
}

#[test]
fn identical_resubmission_returns_the_stored_questions() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);
    let first = session.submit_tier1(&engine, "fever, cough").unwrap().clone();
    let again = session.submit_tier1(&engine, "cough and fever").unwrap().clone();
    assert_eq!(first, again);
    assert_eq!(session.history().len(), 2);

    let changed = session.submit_tier1(&engine, "rash");
    assert_eq!(
        changed,
        Err(EngineError::InvalidTransition {
            state: SessionState::AwaitingTier2,
            attempted: Tier::Symptoms,
        })
    );

    let tier2 = answers(&[("cough", "wheezing")]);
    session.submit_tier2(&engine, tier2.clone()).unwrap();
    assert!(session.submit_tier2(&engine, tier2).is_ok());
    assert_eq!(session.state(), SessionState::AwaitingTier3);
}

#[test]
fn out_of_order_submissions_are_rejected() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);

    assert_eq!(
        session.submit_tier2(&engine, AnswerSet::new()),
        Err(EngineError::InvalidTransition {
            state: SessionState::AwaitingTier1,
            attempted: Tier::Detail,
        })
    );
    assert_eq!(
        session.submit_tier3(&engine, AnswerSet::new()).map(|_| ()),
        Err(EngineError::InvalidTransition {
            state: SessionState::AwaitingTier1,
            attempted: Tier::Trigger,
        })
    );
    assert_eq!(
        session.diagnosis(),
        Err(EngineError::NotFinished {
            state: SessionState::AwaitingTier1
        })
    );
}

#[test]
fn done_is_terminal() {
    let engine = Engine::builtin();
    let mut session = engine.start(Mode::Normal);
    session.submit_tier1(&engine, "rash").unwrap();
    session.submit_tier2(&engine, AnswerSet::new()).unwrap();
    assert_eq!(session.state(), SessionState::Done);

    for result in [
        session.submit_tier1(&engine, "rash").map(|_| ()),
        session.submit_tier2(&engine, AnswerSet::new()).map(|_| ()),
        session.submit_tier3(&engine, AnswerSet::new()).map(|_| ()),
    ] {
        assert!(matches!(
            result,
            Err(EngineError::InvalidTransition {
                state: SessionState::Done,
                ..
            })
        ));
    }
}

#[test]
fn threshold_is_configurable() {
    let engine = Engine::new(
        Knowledge::builtin(),
        InferenceSettings {
            min_probability: 20.0,
        },
    );
    let mut session = engine.start(Mode::Normal);
    session.submit_tier1(&engine, "rash").unwrap();
    session.submit_tier2(&engine, AnswerSet::new()).unwrap();

    let outcome = session.diagnosis().unwrap();
    assert_eq!(
        ranking(outcome),
        vec![("Roseola", 25.0), ("Fifth Disease", 20.0), ("Rubella", 20.0)]
    );
    assert_eq!(outcome.department(), Some("Pediatrics"));
}

#[test]
fn probabilities_are_bounded_and_sorted() {
    let normal = get_protocol(Mode::Normal);
    let evidence: BTreeSet<String> = normal
        .diseases()
        .iter()
        .flat_map(|d| d.evidence.iter().map(|e| e.feature.clone()))
        .collect();
    let ranked = diagnose(&evidence, normal.as_ref(), &InferenceSettings::default());

    assert_eq!(ranked.len(), normal.diseases().len());
    assert!(ranked.iter().all(|d| d.probability == 100.0));
    let names: Vec<&str> = ranked.iter().map(|d| d.disease.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}
