//! Free-text symptom recognition.
//!
//! `normal` mode reads delimiter-separated input and matches each piece
//! against the vocabulary, skipping negated words ("no rash"). `dcg` mode
//! runs a small phrase grammar over the whole text: longest multi-word
//! phrase wins, and negated phrases ("no fever or cough") are left out.

use std::collections::{BTreeMap, BTreeSet};

use triage_core::models::mode::Mode;
use triage_knowledge::tables::SymptomTerm;

use crate::text::{is_negated, tokenize, NEGATORS};

const DELIMITERS: &[char] = &[',', ';', '/', '\n', '|'];

/// Words that end a negated list.
const SCOPE_BREAKERS: &[&str] = &["and", "but", "with", "has", "have", "is", "are", "plus", "also"];

/// Recognize symptom ids in `text`. Unknown words are ignored.
pub fn parse_symptoms(text: &str, mode: Mode, vocabulary: &[SymptomTerm]) -> BTreeSet<String> {
    let found = match mode {
        Mode::Normal => parse_delimited(text, vocabulary),
        Mode::Dcg => parse_phrases(text, vocabulary),
    };
    tracing::debug!(%mode, recognized = found.len(), "symptoms parsed");
    found
}

/// Every phrase (including the id itself) of every term, as word lists.
fn phrase_table(vocabulary: &[SymptomTerm]) -> Vec<(Vec<String>, &str)> {
    vocabulary
        .iter()
        .flat_map(|term| {
            std::iter::once(term.id.as_str())
                .chain(term.phrases.iter().map(String::as_str))
                .map(move |phrase| (tokenize(phrase), term.id.as_str()))
        })
        .filter(|(words, _)| !words.is_empty())
        .collect()
}

fn parse_delimited(text: &str, vocabulary: &[SymptomTerm]) -> BTreeSet<String> {
    let lookup: BTreeMap<String, &str> = phrase_table(vocabulary)
        .into_iter()
        .map(|(words, id)| (words.join("_"), id))
        .collect();

    let mut found = BTreeSet::new();
    for segment in text.split(DELIMITERS) {
        let words = tokenize(segment);
        for piece in words.split(|w| w == "and") {
            if piece.is_empty() {
                continue;
            }
            if let Some(id) = lookup.get(&piece.join("_")) {
                found.insert(id.to_string());
                continue;
            }
            for (i, word) in piece.iter().enumerate() {
                if is_negated(piece, i) {
                    continue;
                }
                if let Some(id) = lookup.get(word) {
                    found.insert(id.to_string());
                }
            }
        }
    }
    found
}

fn parse_phrases(text: &str, vocabulary: &[SymptomTerm]) -> BTreeSet<String> {
    let mut phrases = phrase_table(vocabulary);
    // Longest first, so "runny nose" beats "runny".
    phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let tokens = tokenize(text);
    let mut found = BTreeSet::new();
    let mut negated = false;
    let mut i = 0;

    while i < tokens.len() {
        let rest = &tokens[i..];
        if let Some((words, id)) = phrases.iter().find(|(words, _)| rest.starts_with(words)) {
            if !negated {
                found.insert(id.to_string());
            }
            i += words.len();
            negated = negated && matches!(tokens.get(i).map(String::as_str), Some("or" | "nor"));
            continue;
        }

        let word = tokens[i].as_str();
        if NEGATORS.contains(&word) {
            negated = true;
        } else if SCOPE_BREAKERS.contains(&word) {
            negated = false;
        }
        i += 1;
    }
    found
}
