//! Tier-2 and tier-3 question generation.

use std::collections::BTreeSet;

use triage_core::models::answer::{AnswerSet, QuestionMap, ANSWER_SEPARATOR};
use triage_knowledge::tables::AnswerMatcher;
use triage_knowledge::TriageProtocol;

use crate::text::{first_number, is_affirmative, mentions, tokenize};

/// Detail questions for each given symptom that has any configured. Symptoms
/// without questions are left out.
pub fn generate_tier2<I, S>(symptom_ids: I, protocol: &dyn TriageProtocol) -> QuestionMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    symptom_ids
        .into_iter()
        .filter_map(|id| {
            let id = id.as_ref();
            protocol
                .questions_for(id)
                .map(|questions| (id.to_string(), questions.to_vec()))
        })
        .collect()
}

/// The detail features present in a set of tier-2 answers. A subject's
/// answer is matched as a whole, except by `Affirmed` patterns, which read
/// only the part answering their own prompt.
pub fn detail_features(answers: &AnswerSet, protocol: &dyn TriageProtocol) -> BTreeSet<String> {
    let mut features = BTreeSet::new();
    for (subject, text) in answers.iter() {
        let tokens = tokenize(text);
        for pattern in protocol.detail_patterns().iter().filter(|p| p.subject == subject) {
            let hit = match &pattern.matcher {
                AnswerMatcher::Mentions { phrases } => phrases.iter().any(|p| mentions(&tokens, p)),
                AnswerMatcher::SeverityAtLeast { level } => {
                    first_number(text).is_some_and(|n| n >= u32::from(*level))
                }
                AnswerMatcher::Affirmed { question } => text
                    .split(ANSWER_SEPARATOR)
                    .nth(*question)
                    .is_some_and(is_affirmative),
            };
            if hit {
                features.insert(pattern.feature.clone());
            }
        }
    }
    features
}

/// Follow-up questions for every trigger whose required detail features all
/// appear in the tier-2 answers. An empty map means tier 3 is skipped.
pub fn generate_tier3(tier2_answers: &AnswerSet, protocol: &dyn TriageProtocol) -> QuestionMap {
    let features = detail_features(tier2_answers, protocol);
    let triggered: QuestionMap = protocol
        .triggers()
        .iter()
        .filter(|rule| rule.requires.iter().all(|f| features.contains(f)))
        .filter(|rule| !rule.questions.is_empty())
        .map(|rule| (rule.id.clone(), rule.questions.clone()))
        .collect();

    tracing::debug!(
        features = features.len(),
        triggers = triggered.len(),
        "tier 3 evaluated"
    );
    triggered
}
