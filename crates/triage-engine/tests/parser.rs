use std::collections::BTreeSet;

use triage_core::models::mode::Mode;
use triage_engine::parser::parse_symptoms;
use triage_engine::text::{first_number, is_affirmative, mentions, tokenize};
use triage_knowledge::get_protocol;

fn parse(text: &str, mode: Mode) -> Vec<String> {
    let protocol = get_protocol(mode);
    parse_symptoms(text, mode, protocol.vocabulary())
        .into_iter()
        .collect()
}

#[test]
fn normal_mode_splits_on_delimiters_and_and() {
    assert_eq!(parse("fever, cough", Mode::Normal), vec!["cough", "fever"]);
    assert_eq!(
        parse("Rash and vomiting; sore throat", Mode::Normal),
        vec!["rash", "sore_throat", "vomiting"]
    );
}

#[test]
fn normal_mode_accepts_ids_aliases_and_single_words() {
    assert_eq!(parse("swollen glands", Mode::Normal), vec!["swollen_glands"]);
    assert_eq!(parse("SWOLLEN_GLANDS", Mode::Normal), vec!["swollen_glands"]);
    assert_eq!(parse("very tired kid", Mode::Normal), vec!["fatigue"]);
    assert_eq!(parse("pink eye / earache", Mode::Normal), vec!["ear_pain", "red_eyes"]);
}

#[test]
fn unknown_words_are_dropped() {
    assert!(parse("xyzzy", Mode::Normal).is_empty());
    assert!(parse("xyzzy", Mode::Dcg).is_empty());
    assert!(parse("", Mode::Normal).is_empty());
}

#[test]
fn normal_mode_skips_negated_words() {
    assert_eq!(parse("high, no rash", Mode::Normal), Vec::<String>::new());
    assert_eq!(parse("cough, not really tired", Mode::Normal), vec!["cough"]);
    assert_eq!(parse("no rash and vomiting", Mode::Normal), vec!["vomiting"]);
}

#[test]
fn dcg_mode_prefers_the_longest_phrase() {
    assert_eq!(
        parse("she has a high temperature and keeps throwing up", Mode::Dcg),
        vec!["fever", "vomiting"]
    );
    assert_eq!(parse("a stuffy nose since monday", Mode::Dcg), vec!["runny_nose"]);
}

#[test]
fn dcg_mode_skips_negated_phrases() {
    assert_eq!(
        parse("high temperature and throwing up, but no rash or cough", Mode::Dcg),
        vec!["fever", "vomiting"]
    );
    assert_eq!(parse("not coughing but has an earache", Mode::Dcg), vec!["ear_pain"]);
    assert!(parse("denies any sore throat", Mode::Dcg).is_empty());
}

#[test]
fn dcg_phrase_starting_with_a_negator_is_still_recognized() {
    assert_eq!(parse("no energy at all", Mode::Dcg), vec!["fatigue"]);
}

#[test]
fn parsing_is_deterministic() {
    let first: BTreeSet<String> = parse("cough, rash, fever", Mode::Normal).into_iter().collect();
    let second: BTreeSet<String> = parse("fever, rash, cough", Mode::Normal).into_iter().collect();
    assert_eq!(first, second);
}

#[test]
fn tokenize_drops_apostrophes_and_punctuation() {
    assert_eq!(tokenize("Isn't it high-grade?"), vec!["isnt", "it", "high", "grade"]);
}

#[test]
fn mentions_matches_whole_words_only() {
    let tokens = tokenize("dry, tickly cough at night");
    assert!(mentions(&tokens, "dry"));
    assert!(mentions(&tokens, "night"));
    assert!(!mentions(&tokens, "nighttime"));
    assert!(!mentions(&tokenize("dryness"), "dry"));
}

#[test]
fn mentions_ignores_negated_words() {
    assert!(!mentions(&tokenize("no wheezing"), "wheezing"));
    assert!(!mentions(&tokenize("not really itchy"), "itchy"));
    assert!(mentions(&tokenize("no fever, but wheezing"), "wheezing"));
}

#[test]
fn first_number_reads_scales() {
    assert_eq!(first_number("about 4/5"), Some(4));
    assert_eq!(first_number("pretty bad"), None);
}

#[test]
fn affirmative_answers() {
    assert!(is_affirmative("yes"));
    assert!(is_affirmative("Y"));
    assert!(is_affirmative("Yeah, since Tuesday"));
    assert!(is_affirmative("no; yes"));
    assert!(!is_affirmative("no"));
    assert!(!is_affirmative("maybe yes"));
    assert!(!is_affirmative(""));
}
