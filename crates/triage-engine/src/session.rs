//! The per-interaction state machine.
//!
//! `AwaitingTier1 → AwaitingTier2 → AwaitingTier3 → Done`, with tier 3
//! skipped when no trigger fires. Answers only accumulate; a session never
//! moves back to an earlier state.

use std::collections::{BTreeMap, BTreeSet};

use triage_core::models::answer::{AnswerSet, QuestionMap};
use triage_core::models::diagnosis::DiagnosisOutcome;
use triage_core::models::mode::Mode;
use triage_core::models::session::{SessionState, SessionSummary, Tier};
use triage_core::models::symptom::Symptom;
use triage_knowledge::TriageProtocol;
use uuid::Uuid;

use crate::error::EngineError;
use crate::parser::parse_symptoms;
use crate::questions::{detail_features, generate_tier2, generate_tier3};
use crate::text::is_affirmative;
use crate::{inference, Engine};

#[derive(Debug, Clone)]
pub struct DiagnosisSession {
    id: Uuid,
    mode: Mode,
    state: SessionState,
    history: Vec<SessionState>,
    symptoms: BTreeMap<String, Symptom>,
    tier2_questions: QuestionMap,
    tier2_answers: AnswerSet,
    tier3_questions: QuestionMap,
    tier3_answers: AnswerSet,
    outcome: Option<DiagnosisOutcome>,
    created_at: jiff::Timestamp,
    updated_at: jiff::Timestamp,
}

impl DiagnosisSession {
    pub fn new(mode: Mode) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            mode,
            state: SessionState::AwaitingTier1,
            history: vec![SessionState::AwaitingTier1],
            symptoms: BTreeMap::new(),
            tier2_questions: QuestionMap::new(),
            tier2_answers: AnswerSet::new(),
            tier3_questions: QuestionMap::new(),
            tier3_answers: AnswerSet::new(),
            outcome: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Every state the session has entered, in order.
    pub fn history(&self) -> &[SessionState] {
        &self.history
    }

    pub fn symptoms(&self) -> impl Iterator<Item = &Symptom> {
        self.symptoms.values()
    }

    /// Symptom ids reported at tier 1.
    pub fn reported_symptoms(&self) -> Vec<String> {
        self.symptoms
            .values()
            .filter(|s| s.recognized_in == Tier::Symptoms)
            .map(|s| s.id.clone())
            .collect()
    }

    pub fn tier2_questions(&self) -> &QuestionMap {
        &self.tier2_questions
    }

    pub fn tier3_questions(&self) -> &QuestionMap {
        &self.tier3_questions
    }

    pub fn tier2_answers(&self) -> &AnswerSet {
        &self.tier2_answers
    }

    pub fn tier3_answers(&self) -> &AnswerSet {
        &self.tier3_answers
    }

    pub fn updated_at(&self) -> jiff::Timestamp {
        self.updated_at
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            mode: self.mode,
            state: self.state,
            symptoms: self.symptoms.keys().cloned().collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Record the free-text symptom report and return the tier-2 questions.
    ///
    /// Fails with `EmptyInput` (leaving the session untouched) when nothing
    /// is recognized. Recognized symptoms without configured questions still
    /// advance the session, with an empty question set.
    pub fn submit_tier1(&mut self, engine: &Engine, text: &str) -> Result<&QuestionMap, EngineError> {
        let protocol = engine.protocol(self.mode);
        let recognized = parse_symptoms(text, self.mode, protocol.vocabulary());

        match self.state {
            SessionState::AwaitingTier1 => {}
            SessionState::AwaitingTier2 if recognized == self.reported_symptoms().into_iter().collect::<BTreeSet<_>>() => {
                tracing::debug!(session = %self.id, "tier 1 resubmitted unchanged");
                return Ok(&self.tier2_questions);
            }
            state => {
                return Err(EngineError::InvalidTransition {
                    state,
                    attempted: Tier::Symptoms,
                });
            }
        }

        if recognized.is_empty() {
            tracing::debug!(session = %self.id, "no symptoms recognized");
            return Err(EngineError::EmptyInput);
        }

        self.tier2_questions = generate_tier2(&recognized, protocol);
        self.symptoms = recognized
            .into_iter()
            .map(|id| (id.clone(), Symptom::reported(id)))
            .collect();
        self.enter(SessionState::AwaitingTier2);
        Ok(&self.tier2_questions)
    }

    /// Record tier-2 answers and return the tier-3 questions. An empty map
    /// means tier 3 was skipped and the session is already `Done`.
    ///
    /// Answers for subjects that are not reported symptoms are dropped.
    pub fn submit_tier2(&mut self, engine: &Engine, mut answers: AnswerSet) -> Result<&QuestionMap, EngineError> {
        let reported: BTreeSet<String> = self.reported_symptoms().into_iter().collect();
        answers.retain_subjects(|subject| reported.contains(subject));

        match self.state {
            SessionState::AwaitingTier2 => {}
            SessionState::AwaitingTier3 if answers == self.tier2_answers => {
                tracing::debug!(session = %self.id, "tier 2 resubmitted unchanged");
                return Ok(&self.tier3_questions);
            }
            state => {
                return Err(EngineError::InvalidTransition {
                    state,
                    attempted: Tier::Detail,
                });
            }
        }

        let protocol = engine.protocol(self.mode);
        for (subject, text) in answers.iter() {
            if let Some(symptom) = self.symptoms.get_mut(subject) {
                symptom.detail = Some(text.to_string());
            }
            for id in parse_symptoms(text, self.mode, protocol.vocabulary()) {
                self.symptoms
                    .entry(id.clone())
                    .or_insert_with(|| Symptom::mentioned(id));
            }
        }

        self.tier3_questions = generate_tier3(&answers, protocol);
        self.tier2_answers = answers;

        if self.tier3_questions.is_empty() {
            self.finalize(engine);
        } else {
            self.enter(SessionState::AwaitingTier3);
        }
        Ok(&self.tier3_questions)
    }

    /// Record tier-3 answers, compute the diagnosis and finish the session.
    /// Answers for triggers that were not asked are dropped.
    pub fn submit_tier3(&mut self, engine: &Engine, mut answers: AnswerSet) -> Result<&DiagnosisOutcome, EngineError> {
        if self.state != Tier::Trigger.accepted_in() {
            return Err(EngineError::InvalidTransition {
                state: self.state,
                attempted: Tier::Trigger,
            });
        }

        answers.retain_subjects(|subject| self.tier3_questions.contains_key(subject));
        self.tier3_answers = answers;
        self.finalize(engine);
        self.diagnosis()
    }

    /// The delivered outcome. Only available once the session is `Done`.
    pub fn diagnosis(&self) -> Result<&DiagnosisOutcome, EngineError> {
        self.outcome
            .as_ref()
            .ok_or(EngineError::NotFinished { state: self.state })
    }

    /// Every evidence feature gathered so far: symptom ids, detail features
    /// from tier-2 answers, and affirmed triggers.
    pub fn evidence(&self, protocol: &dyn TriageProtocol) -> BTreeSet<String> {
        let mut evidence: BTreeSet<String> = self.symptoms.keys().cloned().collect();
        evidence.extend(detail_features(&self.tier2_answers, protocol));
        evidence.extend(
            self.tier3_answers
                .iter()
                .filter(|(trigger, text)| self.tier3_questions.contains_key(*trigger) && is_affirmative(text))
                .map(|(trigger, _)| trigger.to_string()),
        );
        evidence
    }

    fn finalize(&mut self, engine: &Engine) {
        let diagnoses = engine.diagnose(self);
        self.outcome = Some(inference::outcome(diagnoses));
        self.enter(SessionState::Done);
    }

    fn enter(&mut self, state: SessionState) {
        debug_assert!(state > self.state, "session state must advance");
        tracing::debug!(session = %self.id, mode = %self.mode, from = %self.state, to = %state, "session advanced");
        self.state = state;
        self.history.push(state);
        self.updated_at = jiff::Timestamp::now();
    }
}
