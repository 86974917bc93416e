use triage_core::models::answer::AnswerSet;
use triage_core::models::mode::Mode;
use triage_engine::department::{department_for, recommend};
use triage_engine::questions::{detail_features, generate_tier2, generate_tier3};
use triage_knowledge::get_protocol;
use triage_knowledge::tables::DEFAULT_DEPARTMENT;

#[test]
fn tier2_covers_exactly_the_symptoms_with_questions() {
    let normal = get_protocol(Mode::Normal);
    let questions = generate_tier2(["fever", "cough", "swollen_glands"], normal.as_ref());
    let subjects: Vec<&str> = questions.keys().map(String::as_str).collect();
    assert_eq!(subjects, vec!["cough", "fever"]);
    assert_eq!(questions["fever"].len(), 2);
}

#[test]
fn tier2_is_empty_for_symptoms_without_questions() {
    let normal = get_protocol(Mode::Normal);
    assert!(generate_tier2(["swollen_glands"], normal.as_ref()).is_empty());
    assert!(generate_tier2(Vec::<String>::new(), normal.as_ref()).is_empty());
}

#[test]
fn detail_features_follow_keywords_and_severity() {
    let normal = get_protocol(Mode::Normal);
    let answers: AnswerSet = [
        ("fever", "high-grade since yesterday"),
        ("cough", "no wheezing, just dry"),
        ("fatigue", "4"),
    ]
    .into_iter()
    .collect();
    let features: Vec<String> = detail_features(&answers, normal.as_ref()).into_iter().collect();
    assert_eq!(features, vec!["dry_cough", "high_grade_fever", "severe_fatigue"]);
}

#[test]
fn patterns_only_read_their_own_subject() {
    let normal = get_protocol(Mode::Normal);
    let answers: AnswerSet = [("fever", "wheezing")].into_iter().collect();
    assert!(detail_features(&answers, normal.as_ref()).is_empty());
}

#[test]
fn wheezing_triggers_the_labored_breathing_question() {
    let normal = get_protocol(Mode::Normal);
    let answers: AnswerSet = [("cough", "wheezing")].into_iter().collect();
    let tier3 = generate_tier3(&answers, normal.as_ref());
    assert_eq!(tier3.keys().collect::<Vec<_>>(), vec!["labored_breathing"]);
    assert_eq!(
        tier3["labored_breathing"],
        vec!["Is the child experiencing labored breathing? (y/n)"]
    );
}

#[test]
fn trigger_needs_every_required_feature() {
    let normal = get_protocol(Mode::Normal);
    let partial: AnswerSet = [("vomiting", "frequent")].into_iter().collect();
    assert!(generate_tier3(&partial, normal.as_ref()).is_empty());

    let full: AnswerSet = [("vomiting", "frequent"), ("diarrhea", "watery")]
        .into_iter()
        .collect();
    let tier3 = generate_tier3(&full, normal.as_ref());
    assert!(tier3.contains_key("contamination_exposure"));
}

#[test]
fn same_answer_can_trigger_differently_per_mode() {
    let answers: AnswerSet = [("diarrhea", "watery")].into_iter().collect();
    assert!(generate_tier3(&answers, get_protocol(Mode::Normal).as_ref()).is_empty());
    assert!(
        generate_tier3(&answers, get_protocol(Mode::Dcg).as_ref())
            .contains_key("contamination_exposure")
    );
}

#[test]
fn directed_answers_assert_the_feature_of_their_prompt() {
    let dcg = get_protocol(Mode::Dcg);
    let answers: AnswerSet = [("cough", "no; no; yes"), ("fever", "yes")].into_iter().collect();
    let features: Vec<String> = detail_features(&answers, dcg.as_ref()).into_iter().collect();
    assert_eq!(features, vec!["high_grade_fever", "wheezing"]);

    let tier3 = generate_tier3(&answers, dcg.as_ref());
    assert!(tier3.contains_key("labored_breathing"));
}

#[test]
fn blank_directed_answers_keep_later_prompts_aligned() {
    let dcg = get_protocol(Mode::Dcg);
    let mut answers = AnswerSet::new();
    answers.push_parts("runny_nose", &["", "", "yes"]);
    let features: Vec<String> = detail_features(&answers, dcg.as_ref()).into_iter().collect();
    assert_eq!(features, vec!["thick_discharge"]);
}

#[test]
fn empty_answers_skip_tier3() {
    let dcg = get_protocol(Mode::Dcg);
    assert!(generate_tier3(&AnswerSet::new(), dcg.as_ref()).is_empty());
}

#[test]
fn departments_fall_back_to_general_pediatrics() {
    let normal = get_protocol(Mode::Normal);
    assert_eq!(department_for("bronchiolitis", normal.as_ref()), "Pulmonology");
    assert_eq!(department_for("roseola", normal.as_ref()), "Pediatrics");
    assert_eq!(department_for("dragon_pox", normal.as_ref()), DEFAULT_DEPARTMENT);
    assert_eq!(recommend(&[]), None);
}
