use triage_core::models::diagnosis::CandidateDiagnosis;
use triage_knowledge::tables::{DiseaseProfile, DEFAULT_DEPARTMENT};
use triage_knowledge::TriageProtocol;

/// The care department for a disease id. Unknown diseases and diseases with
/// no configured department map to [`DEFAULT_DEPARTMENT`].
pub fn department_for(disease_id: &str, protocol: &dyn TriageProtocol) -> String {
    protocol
        .disease(disease_id)
        .map(department_of)
        .unwrap_or(DEFAULT_DEPARTMENT)
        .to_string()
}

pub(crate) fn department_of(profile: &DiseaseProfile) -> &str {
    profile.department.as_deref().unwrap_or(DEFAULT_DEPARTMENT)
}

/// The department of the top-ranked candidate.
pub fn recommend(diagnoses: &[CandidateDiagnosis]) -> Option<&str> {
    diagnoses.first().map(|d| d.department.as_str())
}
