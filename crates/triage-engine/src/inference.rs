//! Differential diagnosis from accumulated evidence.
//!
//! Every evidence feature votes for the diseases it is associated with. A
//! disease's probability is its matched weight over its total weight, so
//! scores are independent per disease and are not normalized to sum to 100.

use std::collections::{BTreeMap, BTreeSet};

use triage_core::models::diagnosis::{CandidateDiagnosis, DiagnosisOutcome};
use triage_knowledge::tables::DiseaseProfile;
use triage_knowledge::TriageProtocol;

use crate::department::{department_of, recommend};

/// Candidates scoring below this are not reported.
pub const DEFAULT_MIN_PROBABILITY: f64 = 30.0;

#[derive(Debug, Clone, Copy)]
pub struct InferenceSettings {
    pub min_probability: f64,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            min_probability: DEFAULT_MIN_PROBABILITY,
        }
    }
}

/// Rank every disease that clears the threshold, highest probability first,
/// ties broken by disease name.
pub fn diagnose(
    evidence: &BTreeSet<String>,
    protocol: &dyn TriageProtocol,
    settings: &InferenceSettings,
) -> Vec<CandidateDiagnosis> {
    let mut scores: BTreeMap<&str, (&DiseaseProfile, f64)> = BTreeMap::new();
    for feature in evidence {
        for (disease, weight) in protocol.associations(feature) {
            scores.entry(disease.id.as_str()).or_insert((disease, 0.0)).1 += weight;
        }
    }

    let mut candidates: Vec<CandidateDiagnosis> = scores
        .into_values()
        .filter_map(|(disease, score)| {
            let total = disease.total_weight();
            if total <= 0.0 {
                return None;
            }
            let probability = round_one_decimal((score / total * 100.0).min(100.0));
            (probability >= settings.min_probability).then(|| CandidateDiagnosis {
                disease: disease.name.clone(),
                probability,
                department: department_of(disease).to_string(),
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.probability
            .total_cmp(&a.probability)
            .then_with(|| a.disease.cmp(&b.disease))
    });

    tracing::info!(
        evidence = evidence.len(),
        candidates = candidates.len(),
        top = candidates.first().map(|c| c.disease.as_str()).unwrap_or("none"),
        "diagnosis computed"
    );
    candidates
}

/// Wrap a ranked list for delivery: the top candidate's department, or the
/// no-match message when nothing cleared the threshold.
pub fn outcome(diagnoses: Vec<CandidateDiagnosis>) -> DiagnosisOutcome {
    match recommend(&diagnoses).map(str::to_string) {
        Some(department) => DiagnosisOutcome::Ranked {
            diagnoses,
            department,
        },
        None => DiagnosisOutcome::no_match(),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
