use std::sync::LazyLock;

use triage_core::models::mode::Mode;

use super::shared::{
    affirmed, common_diseases, common_patterns, common_triggers, extend_evidence, mentions,
    questions, term, trigger,
};
use crate::tables::{DetailPattern, DiseaseProfile, QuestionSet, SymptomTerm, TriggerRule};
use crate::TriageProtocol;

/// Directed/guided triage. Symptoms are read with a phrase grammar that
/// understands multi-word descriptions and negation, and the tier-2
/// questions are targeted yes/no prompts.
pub struct Dcg;

static VOCABULARY: LazyLock<Vec<SymptomTerm>> = LazyLock::new(|| {
    vec![
        term(
            "fever",
            "Fever",
            &["feverish", "temperature", "high temperature", "burning up", "hot to the touch"],
        ),
        term("cough", "Cough", &["coughing", "coughs", "hacking"]),
        term(
            "runny_nose",
            "Runny nose",
            &["snotty nose", "stuffy nose", "blocked nose", "nasal discharge", "sniffles"],
        ),
        term("rash", "Rash", &["skin rash", "spots", "blotches", "hives"]),
        term(
            "vomiting",
            "Vomiting",
            &["vomit", "vomited", "throwing up", "threw up", "being sick", "puking"],
        ),
        term(
            "diarrhea",
            "Diarrhea",
            &["diarrhoea", "loose stools", "watery stools", "the runs"],
        ),
        term(
            "fatigue",
            "Fatigue",
            &["tired", "tiredness", "exhausted", "lethargic", "no energy", "sleepy"],
        ),
        term(
            "sore_throat",
            "Sore throat",
            &["throat pain", "scratchy throat", "painful throat"],
        ),
        term("ear_pain", "Ear pain", &["earache", "ear ache", "sore ear"]),
        term(
            "red_eyes",
            "Red eyes",
            &["pink eye", "pinkeye", "bloodshot eyes", "eye redness"],
        ),
        term(
            "swollen_glands",
            "Swollen glands",
            &["swollen neck", "puffy cheeks", "swollen cheeks"],
        ),
    ]
});

/// Directed yes/no prompts per symptom, each bound to the detail feature a
/// yes asserts. Prompt order is answer order.
const DIRECTED: &[(&str, &[(&str, &str)])] = &[
    (
        "fever",
        &[
            ("high_grade_fever", "Is the fever high-grade (above 39 °C)?"),
            ("persistent_fever", "Has the fever lasted more than 3 days?"),
            ("chills", "Is the child having chills or shivering?"),
            ("night_sweats", "Is the child having night sweats?"),
        ],
    ),
    (
        "cough",
        &[
            ("dry_cough", "Is it a dry cough?"),
            ("productive_cough", "Is the cough productive, with mucus or sputum?"),
            ("wheezing", "Do you hear wheezing?"),
            ("barking_cough", "Does the cough sound like barking?"),
            ("whooping", "Are there coughing fits that end in a whoop?"),
            ("worse_at_night", "Does the cough worsen at night?"),
        ],
    ),
    (
        "rash",
        &[
            ("itchy_rash", "Is the rash itchy?"),
            ("widespread_rash", "Is the rash widespread over the body?"),
            ("hand_foot_rash", "Is the rash on the hands, the feet or in the mouth?"),
            ("slapped_cheek", "Are the cheeks bright red, as if slapped?"),
            ("blisters", "Is the rash blistering?"),
            ("peeling_skin", "Is the skin peeling?"),
            ("sandpaper_rash", "Does the rash feel rough, like sandpaper?"),
            ("red_spots", "Is the rash made of small pink or red spots?"),
        ],
    ),
    (
        "vomiting",
        &[
            ("blood_in_vomit", "Is there blood in the vomit?"),
            ("dehydration_signs", "Are there signs of dehydration (dry mouth, few wet nappies)?"),
            ("frequent_vomiting", "Is the vomiting frequent?"),
        ],
    ),
    (
        "diarrhea",
        &[
            ("frequent_loose_stools", "Are stools frequent and loose?"),
            ("abdominal_cramps", "Is the child having abdominal cramps?"),
            ("watery_stool", "Is the stool watery?"),
            ("bloody_stool", "Is there blood in the stool?"),
        ],
    ),
    (
        "runny_nose",
        &[
            ("nasal_congestion", "Is there nasal congestion?"),
            ("sneezing", "Is the child sneezing a lot?"),
            ("thick_discharge", "Is the discharge thick, yellow or green?"),
        ],
    ),
    (
        "fatigue",
        &[
            ("chronic_tiredness", "Is the tiredness persistent or chronic?"),
            ("low_energy", "Is the child low on energy?"),
            ("difficulty_concentrating", "Is concentration difficult?"),
        ],
    ),
    (
        "sore_throat",
        &[
            ("tonsil_exudate", "Are there white patches on the tonsils?"),
            ("painful_swallowing", "Is it painful to swallow?"),
        ],
    ),
    (
        "ear_pain",
        &[
            ("ear_tugging", "Is the child pulling at the ear?"),
            ("ear_discharge", "Is there fluid coming from the ear?"),
        ],
    ),
    (
        "red_eyes",
        &[
            ("eye_discharge", "Is there sticky discharge from the eyes?"),
            ("itchy_eyes", "Are the eyes itchy?"),
        ],
    ),
    (
        "swollen_glands",
        &[
            ("parotid_swelling", "Are the glands below the ears or along the jaw swollen?"),
            ("painful_chewing", "Is it painful to chew?"),
        ],
    ),
];

static QUESTIONS: LazyLock<Vec<QuestionSet>> = LazyLock::new(|| {
    DIRECTED
        .iter()
        .map(|(subject, prompts)| {
            let prompts: Vec<&str> = prompts.iter().map(|(_, prompt)| *prompt).collect();
            questions(subject, &prompts)
        })
        .collect()
});

/// Keyword patterns still apply, so descriptive answers work as well as a
/// bare yes or no.
static PATTERNS: LazyLock<Vec<DetailPattern>> = LazyLock::new(|| {
    let mut patterns = common_patterns();
    patterns.extend([
        mentions("fever", "night_sweats", &["night sweats", "sweats", "sweating"]),
        mentions(
            "vomiting",
            "dehydration_signs",
            &["dehydrated", "dehydration", "dry mouth", "few wet", "no tears", "not drinking"],
        ),
        mentions(
            "fatigue",
            "difficulty_concentrating",
            &["concentration", "concentrating", "focus"],
        ),
        mentions(
            "swollen_glands",
            "parotid_swelling",
            &["below the ears", "under the ears", "jaw", "cheeks"],
        ),
        mentions("swollen_glands", "painful_chewing", &["chew", "chewing"]),
    ]);
    patterns.extend(DIRECTED.iter().flat_map(|(subject, prompts)| {
        prompts
            .iter()
            .enumerate()
            .map(move |(index, (feature, _))| affirmed(subject, feature, index))
    }));
    patterns
});

static TRIGGERS: LazyLock<Vec<TriggerRule>> = LazyLock::new(|| {
    let mut triggers = common_triggers();
    triggers.extend([
        trigger(
            "contamination_exposure",
            &["watery_stool"],
            &["Could this be food or water contamination? (y/n)"],
        ),
        trigger(
            "severe_dehydration",
            &["dehydration_signs"],
            &["Has the child passed no urine for 8 hours or more, or become unusually drowsy? (y/n)"],
        ),
        trigger(
            "sinus_pressure",
            &["thick_discharge", "nasal_congestion"],
            &["Is there sinus pressure? (y/n)"],
        ),
        trigger(
            "sick_contact",
            &["low_energy", "nasal_congestion"],
            &["Was there recent contact with someone who was sick? (y/n)"],
        ),
        trigger(
            "mumps_exposure",
            &["parotid_swelling"],
            &["Is the child unvaccinated against mumps, or in contact with a known case? (y/n)"],
        ),
    ]);
    triggers
});

static DISEASES: LazyLock<Vec<DiseaseProfile>> = LazyLock::new(|| {
    let mut diseases = common_diseases();
    extend_evidence(&mut diseases, "flu", &[("night_sweats", 1.0)]);
    extend_evidence(
        &mut diseases,
        "gastroenteritis",
        &[("dehydration_signs", 1.0), ("severe_dehydration", 1.0)],
    );
    extend_evidence(&mut diseases, "food_poisoning", &[("severe_dehydration", 1.0)]);
    extend_evidence(
        &mut diseases,
        "mumps",
        &[("parotid_swelling", 2.0), ("painful_chewing", 1.0), ("mumps_exposure", 2.0)],
    );
    diseases
});

impl TriageProtocol for Dcg {
    fn mode(&self) -> Mode {
        Mode::Dcg
    }

    fn name(&self) -> &str {
        "Directed triage"
    }

    fn vocabulary(&self) -> &[SymptomTerm] {
        &VOCABULARY
    }

    fn detail_questions(&self) -> &[QuestionSet] {
        &QUESTIONS
    }

    fn detail_patterns(&self) -> &[DetailPattern] {
        &PATTERNS
    }

    fn triggers(&self) -> &[TriggerRule] {
        &TRIGGERS
    }

    fn diseases(&self) -> &[DiseaseProfile] {
        &DISEASES
    }
}
