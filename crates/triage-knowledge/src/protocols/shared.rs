//! Table builders and the entries both built-in protocols have in common.

use crate::tables::{
    AnswerMatcher, DetailPattern, DiseaseProfile, Evidence, QuestionSet, SymptomTerm, TriggerRule,
};

pub(crate) fn term(id: &str, name: &str, phrases: &[&str]) -> SymptomTerm {
    SymptomTerm {
        id: id.to_string(),
        name: name.to_string(),
        phrases: phrases.iter().map(|p| p.to_string()).collect(),
    }
}

pub(crate) fn questions(subject: &str, prompts: &[&str]) -> QuestionSet {
    QuestionSet {
        subject: subject.to_string(),
        questions: prompts.iter().map(|p| p.to_string()).collect(),
    }
}

pub(crate) fn mentions(subject: &str, feature: &str, phrases: &[&str]) -> DetailPattern {
    DetailPattern {
        subject: subject.to_string(),
        feature: feature.to_string(),
        matcher: AnswerMatcher::Mentions {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        },
    }
}

pub(crate) fn severity(subject: &str, feature: &str, level: u8) -> DetailPattern {
    DetailPattern {
        subject: subject.to_string(),
        feature: feature.to_string(),
        matcher: AnswerMatcher::SeverityAtLeast { level },
    }
}

pub(crate) fn affirmed(subject: &str, feature: &str, question: usize) -> DetailPattern {
    DetailPattern {
        subject: subject.to_string(),
        feature: feature.to_string(),
        matcher: AnswerMatcher::Affirmed { question },
    }
}

pub(crate) fn trigger(id: &str, requires: &[&str], prompts: &[&str]) -> TriggerRule {
    TriggerRule {
        id: id.to_string(),
        requires: requires.iter().map(|r| r.to_string()).collect(),
        questions: prompts.iter().map(|p| p.to_string()).collect(),
    }
}

fn disease(id: &str, name: &str, department: &str, evidence: &[(&str, f64)]) -> DiseaseProfile {
    DiseaseProfile {
        id: id.to_string(),
        name: name.to_string(),
        department: Some(department.to_string()),
        evidence: evidence
            .iter()
            .map(|(feature, weight)| Evidence {
                feature: feature.to_string(),
                weight: *weight,
            })
            .collect(),
    }
}

/// Append mode-specific evidence to an existing disease profile.
pub(crate) fn extend_evidence(diseases: &mut [DiseaseProfile], id: &str, evidence: &[(&str, f64)]) {
    if let Some(profile) = diseases.iter_mut().find(|d| d.id == id) {
        profile
            .evidence
            .extend(evidence.iter().map(|(feature, weight)| Evidence {
                feature: feature.to_string(),
                weight: *weight,
            }));
    }
}

/// Keyword patterns over tier-2 answers that mean the same thing in every
/// mode.
pub(crate) fn common_patterns() -> Vec<DetailPattern> {
    vec![
        // fever
        mentions("fever", "high_grade_fever", &["high", "very hot", "39", "40", "41"]),
        mentions("fever", "low_grade_fever", &["low", "mild", "slight"]),
        mentions("fever", "intermittent_fever", &["intermittent", "comes and goes", "on and off"]),
        mentions(
            "fever",
            "persistent_fever",
            &["persistent", "three days", "four days", "five days", "3 days", "4 days", "5 days", "week"],
        ),
        mentions("fever", "chills", &["chills", "shivering", "shaking"]),
        // cough
        mentions("cough", "dry_cough", &["dry", "tickly"]),
        mentions("cough", "productive_cough", &["productive", "phlegm", "mucus", "sputum", "chesty", "wet"]),
        mentions("cough", "wheezing", &["wheezing", "wheeze", "wheezy", "whistling"]),
        mentions("cough", "barking_cough", &["barking", "bark", "seal"]),
        mentions("cough", "whooping", &["whooping", "whoop", "coughing fits"]),
        mentions("cough", "worse_at_night", &["night", "nighttime", "evening"]),
        // rash
        mentions("rash", "itchy_rash", &["itchy", "itching", "itches", "scratching"]),
        mentions("rash", "widespread_rash", &["widespread", "all over", "whole body", "spreading", "trunk"]),
        mentions("rash", "blisters", &["blisters", "blister", "blistering", "fluid filled"]),
        mentions("rash", "red_spots", &["red spots", "pink spots", "spots"]),
        mentions("rash", "peeling_skin", &["peeling", "peel", "flaking"]),
        mentions("rash", "slapped_cheek", &["cheeks", "cheek", "slapped"]),
        mentions("rash", "sandpaper_rash", &["sandpaper", "rough"]),
        mentions("rash", "hand_foot_rash", &["hands", "feet", "palms", "soles", "mouth"]),
        // vomiting
        mentions("vomiting", "frequent_vomiting", &["frequent", "severe", "often", "constant", "every hour"]),
        mentions("vomiting", "blood_in_vomit", &["blood", "bloody"]),
        // diarrhea
        mentions("diarrhea", "watery_stool", &["watery", "water", "liquid"]),
        mentions("diarrhea", "bloody_stool", &["blood", "bloody"]),
        mentions("diarrhea", "frequent_loose_stools", &["severe", "frequent", "moderate", "loose"]),
        mentions(
            "diarrhea",
            "abdominal_cramps",
            &["cramps", "cramping", "tummy ache", "stomach ache", "belly pain"],
        ),
        // runny nose
        mentions("runny_nose", "nasal_congestion", &["congestion", "congested", "stuffy", "blocked"]),
        mentions("runny_nose", "sneezing", &["sneezing", "sneezes", "sneeze"]),
        mentions("runny_nose", "thick_discharge", &["thick", "green", "yellow", "coloured", "colored"]),
        // fatigue
        mentions("fatigue", "chronic_tiredness", &["constant", "persistent", "chronic", "all the time"]),
        mentions("fatigue", "low_energy", &["low energy", "low on energy", "no energy", "sluggish"]),
        // sore throat
        mentions("sore_throat", "tonsil_exudate", &["white", "patches", "pus"]),
        mentions("sore_throat", "painful_swallowing", &["swallow", "swallowing", "painful"]),
        // ear pain
        mentions("ear_pain", "ear_tugging", &["pulling", "tugging", "pulls", "tugs"]),
        mentions("ear_pain", "ear_discharge", &["discharge", "fluid", "pus", "leaking"]),
        // red eyes
        mentions("red_eyes", "eye_discharge", &["discharge", "crusting", "crusty", "sticky", "pus"]),
        mentions("red_eyes", "itchy_eyes", &["itchy", "itching", "rubbing"]),
    ]
}

/// Trigger rules whose follow-up applies to both modes.
pub(crate) fn common_triggers() -> Vec<TriggerRule> {
    vec![
        trigger(
            "measles_pattern",
            &["high_grade_fever", "widespread_rash"],
            &[
                "Did the rash start on the face and spread down to the trunk? (y/n)",
                "Are there tiny white spots inside the cheeks? (y/n)",
            ],
        ),
        trigger(
            "strawberry_tongue",
            &["sandpaper_rash"],
            &["Is the tongue red and bumpy like a strawberry? (y/n)"],
        ),
        trigger(
            "labored_breathing",
            &["wheezing"],
            &["Is the child experiencing labored breathing? (y/n)"],
        ),
        trigger(
            "stridor",
            &["barking_cough"],
            &["Is there a high-pitched noise when the child breathes in? (y/n)"],
        ),
        trigger(
            "kawasaki_signs",
            &["persistent_fever", "peeling_skin"],
            &["Are the eyes red without discharge, and the lips red and cracked? (y/n)"],
        ),
    ]
}

/// The disease catalogue. Weights express how strongly each feature points
/// at the disease; a profile's total weight is its full match.
pub(crate) fn common_diseases() -> Vec<DiseaseProfile> {
    vec![
        disease(
            "common_cold",
            "Common Cold",
            "General Pediatrics",
            &[
                ("runny_nose", 2.0),
                ("sneezing", 2.0),
                ("nasal_congestion", 2.0),
                ("cough", 1.0),
                ("low_grade_fever", 1.0),
                ("sore_throat", 1.0),
                ("sick_contact", 1.0),
            ],
        ),
        disease(
            "flu",
            "Flu",
            "General Pediatrics",
            &[
                ("fever", 2.0),
                ("high_grade_fever", 2.0),
                ("fatigue", 2.0),
                ("cough", 1.0),
                ("dry_cough", 1.0),
                ("chills", 1.0),
            ],
        ),
        disease(
            "strep_throat",
            "Strep Throat",
            "ENT",
            &[
                ("sore_throat", 3.0),
                ("tonsil_exudate", 3.0),
                ("painful_swallowing", 1.0),
                ("fever", 1.0),
            ],
        ),
        disease(
            "ear_infection",
            "Ear Infection",
            "ENT",
            &[
                ("ear_pain", 3.0),
                ("ear_tugging", 2.0),
                ("ear_discharge", 2.0),
                ("fever", 1.0),
            ],
        ),
        disease(
            "bronchitis",
            "Bronchitis",
            "Pulmonology",
            &[
                ("cough", 2.0),
                ("productive_cough", 3.0),
                ("fatigue", 1.0),
                ("low_grade_fever", 1.0),
            ],
        ),
        disease(
            "bronchiolitis",
            "Bronchiolitis",
            "Pulmonology",
            &[
                ("wheezing", 3.0),
                ("labored_breathing", 3.0),
                ("cough", 1.0),
                ("runny_nose", 1.0),
            ],
        ),
        disease(
            "hand_foot_mouth",
            "Hand, Foot and Mouth Disease",
            "Dermatology",
            &[
                ("hand_foot_rash", 3.0),
                ("blisters", 2.0),
                ("rash", 1.0),
                ("fever", 1.0),
            ],
        ),
        disease(
            "conjunctivitis",
            "Conjunctivitis",
            "Ophthalmology",
            &[("red_eyes", 3.0), ("eye_discharge", 2.0), ("itchy_eyes", 1.0)],
        ),
        disease(
            "gastroenteritis",
            "Gastroenteritis",
            "Gastroenterology",
            &[
                ("vomiting", 2.0),
                ("diarrhea", 2.0),
                ("watery_stool", 1.0),
                ("abdominal_cramps", 1.0),
                ("fever", 1.0),
            ],
        ),
        disease(
            "chickenpox",
            "Chickenpox",
            "Dermatology",
            &[
                ("itchy_rash", 3.0),
                ("blisters", 2.0),
                ("rash", 1.0),
                ("fever", 1.0),
            ],
        ),
        disease(
            "measles",
            "Measles",
            "Infectious Disease",
            &[
                ("measles_pattern", 3.0),
                ("high_grade_fever", 1.0),
                ("widespread_rash", 1.0),
                ("rash", 1.0),
                ("fever", 1.0),
                ("cough", 1.0),
                ("red_eyes", 1.0),
            ],
        ),
        disease(
            "mumps",
            "Mumps",
            "Infectious Disease",
            &[
                ("swollen_glands", 3.0),
                ("fever", 1.0),
                ("painful_swallowing", 1.0),
            ],
        ),
        disease(
            "rubella",
            "Rubella",
            "Infectious Disease",
            &[
                ("swollen_glands", 2.0),
                ("rash", 1.0),
                ("red_spots", 1.0),
                ("low_grade_fever", 1.0),
            ],
        ),
        disease(
            "scarlet_fever",
            "Scarlet Fever",
            "Infectious Disease",
            &[
                ("sandpaper_rash", 3.0),
                ("strawberry_tongue", 3.0),
                ("sore_throat", 1.0),
                ("fever", 1.0),
            ],
        ),
        disease(
            "roseola",
            "Roseola",
            "Pediatrics",
            &[("high_grade_fever", 2.0), ("rash", 1.0), ("fever", 1.0)],
        ),
        disease(
            "rsv",
            "RSV",
            "Pulmonology",
            &[
                ("wheezing", 2.0),
                ("labored_breathing", 2.0),
                ("runny_nose", 1.0),
                ("cough", 1.0),
                ("fever", 1.0),
            ],
        ),
        disease(
            "croup",
            "Croup",
            "Pulmonology",
            &[
                ("barking_cough", 3.0),
                ("stridor", 3.0),
                ("cough", 1.0),
                ("fever", 1.0),
            ],
        ),
        disease(
            "kawasaki_disease",
            "Kawasaki Disease",
            "Cardiology",
            &[
                ("persistent_fever", 3.0),
                ("kawasaki_signs", 3.0),
                ("peeling_skin", 2.0),
                ("rash", 1.0),
                ("red_eyes", 1.0),
            ],
        ),
        disease(
            "whooping_cough",
            "Whooping Cough",
            "Pulmonology",
            &[("whooping", 3.0), ("cough", 2.0), ("worse_at_night", 1.0)],
        ),
        disease(
            "fifth_disease",
            "Fifth Disease",
            "Dermatology",
            &[("slapped_cheek", 3.0), ("rash", 1.0), ("low_grade_fever", 1.0)],
        ),
        disease(
            "food_poisoning",
            "Food Poisoning",
            "Gastroenterology",
            &[
                ("contamination_exposure", 3.0),
                ("vomiting", 2.0),
                ("diarrhea", 1.0),
                ("abdominal_cramps", 1.0),
                ("bloody_stool", 1.0),
            ],
        ),
        disease(
            "sinusitis",
            "Sinusitis",
            "ENT",
            &[
                ("thick_discharge", 3.0),
                ("sinus_pressure", 3.0),
                ("runny_nose", 1.0),
                ("nasal_congestion", 1.0),
            ],
        ),
    ]
}
