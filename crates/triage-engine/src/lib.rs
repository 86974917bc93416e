pub mod department;
pub mod error;
pub mod inference;
pub mod parser;
pub mod questions;
pub mod session;
pub mod text;

use triage_core::models::diagnosis::CandidateDiagnosis;
use triage_core::models::mode::Mode;
use triage_knowledge::{Knowledge, TriageProtocol};

use crate::inference::InferenceSettings;
use crate::session::DiagnosisSession;

/// The read-only half of triage: knowledge plus scoring settings. Shared by
/// every session; all mutable state lives in [`DiagnosisSession`].
#[derive(Default)]
pub struct Engine {
    knowledge: Knowledge,
    settings: InferenceSettings,
}

impl Engine {
    pub fn new(knowledge: Knowledge, settings: InferenceSettings) -> Self {
        Self {
            knowledge,
            settings,
        }
    }

    /// Built-in protocols with default settings.
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn protocol(&self, mode: Mode) -> &dyn TriageProtocol {
        self.knowledge.protocol(mode)
    }

    pub fn settings(&self) -> &InferenceSettings {
        &self.settings
    }

    /// A fresh session awaiting its symptom report.
    pub fn start(&self, mode: Mode) -> DiagnosisSession {
        let session = DiagnosisSession::new(mode);
        tracing::info!(session = %session.id(), %mode, "session started");
        session
    }

    /// Rank diagnoses from everything the session has gathered so far.
    pub fn diagnose(&self, session: &DiagnosisSession) -> Vec<CandidateDiagnosis> {
        let protocol = self.protocol(session.mode());
        inference::diagnose(&session.evidence(protocol), protocol, &self.settings)
    }
}
