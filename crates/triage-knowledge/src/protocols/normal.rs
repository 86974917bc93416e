use std::sync::LazyLock;

use triage_core::models::mode::Mode;

use super::shared::{
    common_diseases, common_patterns, common_triggers, questions, severity, term, trigger,
};
use crate::tables::{DetailPattern, DiseaseProfile, QuestionSet, SymptomTerm, TriggerRule};
use crate::TriageProtocol;

/// General triage. Symptoms are read from delimiter-separated input and the
/// tier-2 questions ask for free-text descriptions.
pub struct Normal;

static VOCABULARY: LazyLock<Vec<SymptomTerm>> = LazyLock::new(|| {
    vec![
        term("fever", "Fever", &["feverish", "temperature", "pyrexia"]),
        term("cough", "Cough", &["coughing"]),
        term("runny_nose", "Runny nose", &["runny", "snotty"]),
        term("rash", "Rash", &["rashes"]),
        term("vomiting", "Vomiting", &["vomit", "vomits", "puking"]),
        term("diarrhea", "Diarrhea", &["diarrhoea"]),
        term("fatigue", "Fatigue", &["tired", "tiredness", "lethargic", "lethargy"]),
        term("sore_throat", "Sore throat", &[]),
        term("ear_pain", "Ear pain", &["earache"]),
        term("red_eyes", "Red eyes", &["pink eye", "pinkeye"]),
        term("swollen_glands", "Swollen glands", &["swelling"]),
    ]
});

static QUESTIONS: LazyLock<Vec<QuestionSet>> = LazyLock::new(|| {
    vec![
        questions(
            "fever",
            &[
                "Describe the fever (low-grade / high-grade / intermittent):",
                "How many days has the fever lasted?",
            ],
        ),
        questions(
            "cough",
            &[
                "Type of cough (dry / productive / wheezing / barking / whooping):",
                "When is the cough worst (morning / night / all day)?",
            ],
        ),
        questions(
            "rash",
            &[
                "Describe the rash (localized / widespread / itchy / blisters / red spots):",
                "Where did the rash start (face / cheeks / hands and feet / trunk)?",
            ],
        ),
        questions(
            "vomiting",
            &[
                "Frequency of vomiting (occasional / frequent / severe):",
                "Any noticeable characteristics of the vomit (e.g. with blood, clear)?",
            ],
        ),
        questions(
            "diarrhea",
            &[
                "Severity of diarrhea (mild / moderate / severe):",
                "Any changes in the stool (e.g. watery, with blood)? Any cramps?",
            ],
        ),
        questions(
            "runny_nose",
            &[
                "Runny-nose severity (0-5):",
                "Is the discharge clear or thick and coloured? Any sneezing or congestion?",
            ],
        ),
        questions(
            "fatigue",
            &[
                "Fatigue severity (0-5):",
                "Is the tiredness constant or does it come and go?",
            ],
        ),
        questions(
            "sore_throat",
            &["Describe the throat (white patches / painful to swallow / scratchy):"],
        ),
        questions(
            "ear_pain",
            &["Is the child pulling at the ear? Is there any discharge?"],
        ),
        questions(
            "red_eyes",
            &["Is there discharge or crusting? Are the eyes itchy?"],
        ),
    ]
});

static PATTERNS: LazyLock<Vec<DetailPattern>> = LazyLock::new(|| {
    let mut patterns = common_patterns();
    patterns.push(severity("runny_nose", "severe_runny_nose", 4));
    patterns.push(severity("fatigue", "severe_fatigue", 4));
    patterns
});

static TRIGGERS: LazyLock<Vec<TriggerRule>> = LazyLock::new(|| {
    let mut triggers = common_triggers();
    triggers.extend([
        trigger(
            "contamination_exposure",
            &["frequent_vomiting", "watery_stool"],
            &["Did symptoms start after recent travel, or after food others also got sick from? (y/n)"],
        ),
        trigger(
            "sinus_pressure",
            &["thick_discharge"],
            &["Is there pain or pressure around the eyes or cheeks? (y/n)"],
        ),
        trigger(
            "sick_contact",
            &["severe_fatigue", "severe_runny_nose"],
            &["Was there recent contact with someone who was sick? (y/n)"],
        ),
    ]);
    triggers
});

static DISEASES: LazyLock<Vec<DiseaseProfile>> = LazyLock::new(common_diseases);

impl TriageProtocol for Normal {
    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn name(&self) -> &str {
        "Normal triage"
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
