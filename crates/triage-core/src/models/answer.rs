use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Follow-up questions grouped by subject key (a symptom id for tier 2, a
/// trigger id for tier 3). Prompts keep their configured order.
pub type QuestionMap = BTreeMap<String, Vec<String>>;

/// Separator used when several answers arrive for the same subject.
pub const ANSWER_SEPARATOR: &str = "; ";

/// The answers collected in one tier, keyed by subject.
///
/// Blank answers are never stored: an absent key and an empty answer mean the
/// same thing to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an answer for `subject`. A second answer for the same subject is
    /// appended rather than replacing the first.
    pub fn push(&mut self, subject: impl Into<String>, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.0
            .entry(subject.into())
            .and_modify(|existing| {
                existing.push_str(ANSWER_SEPARATOR);
                existing.push_str(text);
            })
            .or_insert_with(|| text.to_string());
    }

    /// Add one answer per question for `subject`, in question order. Blank
    /// parts keep their position so the n-th part still answers the n-th
    /// question; nothing is stored when every part is blank.
    pub fn push_parts<S: AsRef<str>>(&mut self, subject: impl Into<String>, parts: &[S]) {
        let parts: Vec<&str> = parts.iter().map(|p| p.as_ref().trim()).collect();
        if parts.iter().all(|p| p.is_empty()) {
            return;
        }
        let joined = parts.join(ANSWER_SEPARATOR);
        self.0
            .entry(subject.into())
            .and_modify(|existing| {
                existing.push_str(ANSWER_SEPARATOR);
                existing.push_str(&joined);
            })
            .or_insert(joined);
    }

    pub fn get(&self, subject: &str) -> Option<&str> {
        self.0.get(subject).map(String::as_str)
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.0.contains_key(subject)
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop every answer whose subject fails `keep`.
    pub fn retain_subjects(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|subject, _| keep(subject));
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut answers = AnswerSet::new();
        for (subject, text) in iter {
            answers.push(subject, text.as_ref());
        }
        answers
    }
}
