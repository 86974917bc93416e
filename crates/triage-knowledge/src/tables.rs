use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Department suggested when a disease has none configured.
pub const DEFAULT_DEPARTMENT: &str = "General Pediatrics";

/// A tier-1 symptom the parser can recognize.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SymptomTerm {
    /// Normalized identifier, e.g. "runny_nose".
    pub id: String,
    /// Human-readable label, e.g. "Runny nose".
    pub name: String,
    /// Additional phrases that name this symptom. The id itself (with
    /// underscores read as spaces) always matches.
    #[serde(default)]
    pub phrases: Vec<String>,
}

/// The tier-2 detail questions asked for one symptom.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionSet {
    pub subject: String,
    pub questions: Vec<String>,
}

/// How a tier-2 answer is tested for a detail feature.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum AnswerMatcher {
    /// The answer mentions any of the phrases (whole words, not negated).
    Mentions { phrases: Vec<String> },
    /// The first number in the answer is at least `level`, on a 0-5 scale.
    SeverityAtLeast { level: u8 },
    /// The answer to the `question`-th prompt (zero-based) of the subject's
    /// question set is a yes. Answers to several prompts arrive joined in
    /// prompt order.
    Affirmed { question: usize },
}

/// Highest level a `SeverityAtLeast` matcher may ask for.
pub const MAX_SEVERITY: u8 = 5;

/// Maps a pattern in the tier-2 answer for `subject` to a detail feature.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DetailPattern {
    pub subject: String,
    pub feature: String,
    pub matcher: AnswerMatcher,
}

/// A tier-3 trigger: fires when every required detail feature was found in
/// the tier-2 answers. An affirmative answer to its questions adds the
/// trigger id to the evidence.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TriggerRule {
    pub id: String,
    pub requires: Vec<String>,
    pub questions: Vec<String>,
}

/// One weighted association between an evidence feature and a disease.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Evidence {
    pub feature: String,
    pub weight: f64,
}

/// A candidate disease and the evidence that votes for it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiseaseProfile {
    pub id: String,
    pub name: String,
    pub department: Option<String>,
    pub evidence: Vec<Evidence>,
}

impl DiseaseProfile {
    /// Sum of all evidence weights; the denominator of the match score.
    pub fn total_weight(&self) -> f64 {
        self.evidence.iter().map(|e| e.weight).sum()
    }

    pub fn weight_of(&self, feature: &str) -> Option<f64> {
        self.evidence
            .iter()
            .find(|e| e.feature == feature)
            .map(|e| e.weight)
    }
}

/// A problem found while validating a protocol's tables.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    /// The table entry at fault, e.g. "trigger:stridor".
    pub subject: String,
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}
