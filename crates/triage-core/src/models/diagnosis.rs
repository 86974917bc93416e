use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Message delivered when no disease clears the evidence threshold.
pub const NO_MATCH_MESSAGE: &str = "No recognized diagnosis — please consult a doctor.";

/// One entry of the differential diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CandidateDiagnosis {
    /// Display name, e.g. "Common Cold".
    pub disease: String,
    /// Independent match score in [0, 100], one decimal place.
    pub probability: f64,
    pub department: String,
}

/// The final result of a session. The two shapes are told apart by which
/// fields are present, never by status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum DiagnosisOutcome {
    Ranked {
        diagnoses: Vec<CandidateDiagnosis>,
        department: String,
    },
    NoMatch {
        message: String,
    },
}

impl DiagnosisOutcome {
    pub fn no_match() -> Self {
        DiagnosisOutcome::NoMatch {
            message: NO_MATCH_MESSAGE.to_string(),
        }
    }

    pub fn diagnoses(&self) -> &[CandidateDiagnosis] {
        match self {
            DiagnosisOutcome::Ranked { diagnoses, .. } => diagnoses,
            DiagnosisOutcome::NoMatch { .. } => &[],
        }
    }

    pub fn department(&self) -> Option<&str> {
        match self {
            DiagnosisOutcome::Ranked { department, .. } => Some(department),
            DiagnosisOutcome::NoMatch { .. } => None,
        }
    }
}
