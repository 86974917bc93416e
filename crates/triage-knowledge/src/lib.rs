//! triage-knowledge
//!
//! The static symptom/trigger/disease knowledge base. Pure data with no I/O
//! except loading replacement tables from JSON at startup. Defines the
//! vocabulary, question sets, answer patterns, trigger rules and disease
//! associations for each triage mode.

pub mod error;
pub mod file;
pub mod protocols;
pub mod tables;

use std::collections::BTreeSet;

use triage_core::models::mode::Mode;

use error::KnowledgeError;
use tables::{
    AnswerMatcher, DetailPattern, DiseaseProfile, QuestionSet, SymptomTerm, TriggerRule,
    ValidationError, MAX_SEVERITY,
};

/// Trait implemented by each triage protocol (one per mode).
pub trait TriageProtocol: Send + Sync {
    /// The mode this protocol serves.
    fn mode(&self) -> Mode;

    /// Human-readable name (e.g., "Normal triage").
    fn name(&self) -> &str;

    /// Symptoms recognizable at tier 1.
    fn vocabulary(&self) -> &[SymptomTerm];

    /// Tier-2 detail questions, per symptom.
    fn detail_questions(&self) -> &[QuestionSet];

    /// Patterns that turn tier-2 answers into detail features.
    fn detail_patterns(&self) -> &[DetailPattern];

    /// Tier-3 trigger rules.
    fn triggers(&self) -> &[TriggerRule];

    /// Candidate diseases and their weighted evidence.
    fn diseases(&self) -> &[DiseaseProfile];

    fn symptom(&self, id: &str) -> Option<&SymptomTerm> {
        self.vocabulary().iter().find(|s| s.id == id)
    }

    /// Configured tier-2 questions for a symptom. `None` when the symptom has
    /// no questions (an empty list counts as none).
    fn questions_for(&self, symptom_id: &str) -> Option<&[String]> {
        self.detail_questions()
            .iter()
            .find(|q| q.subject == symptom_id)
            .map(|q| q.questions.as_slice())
            .filter(|q| !q.is_empty())
    }

    fn trigger(&self, id: &str) -> Option<&TriggerRule> {
        self.triggers().iter().find(|t| t.id == id)
    }

    fn disease(&self, id: &str) -> Option<&DiseaseProfile> {
        self.diseases().iter().find(|d| d.id == id)
    }

    /// The association row for one feature: every disease it votes for,
    /// with its weight.
    fn associations(&self, feature: &str) -> Vec<(&DiseaseProfile, f64)> {
        self.diseases()
            .iter()
            .filter_map(|d| d.weight_of(feature).map(|w| (d, w)))
            .collect()
    }

    /// Check the tables for internal consistency.
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let symptom_ids: BTreeSet<&str> =
            collect_unique(self.vocabulary().iter().map(|s| s.id.as_str()), "symptom", &mut errors);
        let trigger_ids: BTreeSet<&str> =
            collect_unique(self.triggers().iter().map(|t| t.id.as_str()), "trigger", &mut errors);
        collect_unique(self.diseases().iter().map(|d| d.id.as_str()), "disease", &mut errors);
        collect_unique(
            self.detail_questions().iter().map(|q| q.subject.as_str()),
            "questions",
            &mut errors,
        );

        for set in self.detail_questions() {
            if !symptom_ids.contains(set.subject.as_str()) {
                errors.push(ValidationError::new(
                    format!("questions:{}", set.subject),
                    "question set refers to a symptom outside the vocabulary",
                ));
            }
        }

        let mut detail_features = BTreeSet::new();
        for pattern in self.detail_patterns() {
            let subject = format!("pattern:{}", pattern.feature);
            if !symptom_ids.contains(pattern.subject.as_str()) {
                errors.push(ValidationError::new(
                    &subject,
                    format!("pattern subject '{}' is not in the vocabulary", pattern.subject),
                ));
            }
            match &pattern.matcher {
                AnswerMatcher::Mentions { phrases } if phrases.iter().all(|p| p.trim().is_empty()) => {
                    errors.push(ValidationError::new(&subject, "mentions matcher has no phrases"));
                }
                AnswerMatcher::SeverityAtLeast { level } if *level > MAX_SEVERITY => {
                    errors.push(ValidationError::new(
                        &subject,
                        format!("severity level {level} is outside the 0-{MAX_SEVERITY} scale"),
                    ));
                }
                AnswerMatcher::Affirmed { question } => {
                    let asked = self.questions_for(&pattern.subject).map_or(0, <[String]>::len);
                    if *question >= asked {
                        errors.push(ValidationError::new(
                            &subject,
                            format!(
                                "affirmed question {question} is out of range; '{}' has {asked} questions",
                                pattern.subject
                            ),
                        ));
                    }
                }
                _ => {}
            }
            if symptom_ids.contains(pattern.feature.as_str()) {
                errors.push(ValidationError::new(&subject, "detail feature shadows a symptom id"));
            }
            detail_features.insert(pattern.feature.as_str());
        }

        for trigger in self.triggers() {
            let subject = format!("trigger:{}", trigger.id);
            if trigger.requires.is_empty() {
                errors.push(ValidationError::new(&subject, "trigger has no requirements"));
            }
            if trigger.questions.is_empty() {
                errors.push(ValidationError::new(&subject, "trigger has no questions"));
            }
            for required in &trigger.requires {
                if !detail_features.contains(required.as_str()) {
                    errors.push(ValidationError::new(
                        &subject,
                        format!("requires '{required}', which no detail pattern produces"),
                    ));
                }
            }
            if symptom_ids.contains(trigger.id.as_str()) || detail_features.contains(trigger.id.as_str()) {
                errors.push(ValidationError::new(&subject, "trigger id collides with another feature"));
            }
        }

        for disease in self.diseases() {
            let subject = format!("disease:{}", disease.id);
            if disease.evidence.is_empty() {
                errors.push(ValidationError::new(&subject, "disease has no evidence"));
            }
            if disease.department.as_deref().is_some_and(|d| d.trim().is_empty()) {
                errors.push(ValidationError::new(&subject, "department is blank"));
            }
            let mut listed = BTreeSet::new();
            for evidence in &disease.evidence {
                if !listed.insert(evidence.feature.as_str()) {
                    errors.push(ValidationError::new(
                        &subject,
                        format!("evidence '{}' is listed more than once", evidence.feature),
                    ));
                }
                if !(evidence.weight.is_finite() && evidence.weight > 0.0) {
                    errors.push(ValidationError::new(
                        &subject,
                        format!("weight {} for '{}' must be positive", evidence.weight, evidence.feature),
                    ));
                }
                let feature = evidence.feature.as_str();
                if !symptom_ids.contains(feature)
                    && !detail_features.contains(feature)
                    && !trigger_ids.contains(feature)
                {
                    errors.push(ValidationError::new(
                        &subject,
                        format!("evidence '{feature}' is never produced by this protocol"),
                    ));
                }
            }
        }

        errors
    }
}

fn collect_unique<'a>(
    ids: impl Iterator<Item = &'a str>,
    kind: &str,
    errors: &mut Vec<ValidationError>,
) -> BTreeSet<&'a str> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(format!("{kind}:{id}"), format!("duplicate {kind} entry")));
        }
    }
    seen
}

/// Return all built-in protocols.
pub fn all_protocols() -> Vec<Box<dyn TriageProtocol>> {
    Mode::ALL.into_iter().map(get_protocol).collect()
}

/// Look up the built-in protocol for a mode.
pub fn get_protocol(mode: Mode) -> Box<dyn TriageProtocol> {
    match mode {
        Mode::Normal => Box::new(protocols::normal::Normal),
        Mode::Dcg => Box::new(protocols::dcg::Dcg),
    }
}

/// One protocol per mode, loaded once at startup and read-only afterwards.
pub struct Knowledge {
    normal: Box<dyn TriageProtocol>,
    dcg: Box<dyn TriageProtocol>,
}

impl Knowledge {
    /// The built-in tables for both modes.
    pub fn builtin() -> Self {
        Self {
            normal: get_protocol(Mode::Normal),
            dcg: get_protocol(Mode::Dcg),
        }
    }

    /// Replace the protocol for its mode after validating it.
    pub fn with_protocol(mut self, protocol: Box<dyn TriageProtocol>) -> Result<Self, KnowledgeError> {
        let errors = protocol.validate();
        if !errors.is_empty() {
            return Err(KnowledgeError::Validation {
                protocol: protocol.name().to_string(),
                errors,
            });
        }
        tracing::info!(mode = %protocol.mode(), name = protocol.name(), "protocol replaced");
        match protocol.mode() {
            Mode::Normal => self.normal = protocol,
            Mode::Dcg => self.dcg = protocol,
        }
        Ok(self)
    }

    pub fn protocol(&self, mode: Mode) -> &dyn TriageProtocol {
        match mode {
            Mode::Normal => self.normal.as_ref(),
            Mode::Dcg => self.dcg.as_ref(),
        }
    }
}

impl Default for Knowledge {
    fn default() -> Self {
        Self::builtin()
    }
}
