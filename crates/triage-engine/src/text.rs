//! Word-level helpers shared by the symptom parser and the answer matchers.

use triage_core::models::answer::ANSWER_SEPARATOR;

/// Words that negate the phrase that follows them.
pub(crate) const NEGATORS: &[&str] = &[
    "no", "not", "without", "never", "denies", "none", "isnt", "doesnt", "dont", "hasnt",
    "arent", "wasnt",
];

/// Words allowed between a negator and the phrase it negates.
const FILLERS: &[&str] = &["very", "really", "too", "so", "any", "a"];

const AFFIRMATIVES: &[&str] = &["y", "yes", "yeah", "yep", "yup", "true", "1"];

/// Lowercase words, apostrophes dropped ("isn't" → "isnt"), split on anything
/// that is not a letter or digit.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace(['\'', '\u{2019}'], "")
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether the word at `start` is negated by what precedes it.
pub(crate) fn is_negated(tokens: &[String], start: usize) -> bool {
    let mut i = start;
    while i > 0 {
        let previous = tokens[i - 1].as_str();
        if NEGATORS.contains(&previous) {
            return true;
        }
        if !FILLERS.contains(&previous) || start - i >= 2 {
            return false;
        }
        i -= 1;
    }
    false
}

/// Whether `phrase` occurs in `tokens` as whole words, at least once without
/// a negation in front of it.
pub fn mentions(tokens: &[String], phrase: &str) -> bool {
    let phrase = tokenize(phrase);
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return false;
    }
    tokens
        .windows(phrase.len())
        .enumerate()
        .any(|(i, window)| window == phrase.as_slice() && !is_negated(tokens, i))
}

/// The first whole number in the text, e.g. `4` from "about 4/5".
pub fn first_number(text: &str) -> Option<u32> {
    tokenize(text).iter().find_map(|w| w.parse().ok())
}

/// Whether any part of a (possibly joined) answer starts with a yes.
pub fn is_affirmative(text: &str) -> bool {
    text.split(ANSWER_SEPARATOR).any(|part| {
        tokenize(part)
            .first()
            .is_some_and(|w| AFFIRMATIVES.contains(&w.as_str()))
    })
}
