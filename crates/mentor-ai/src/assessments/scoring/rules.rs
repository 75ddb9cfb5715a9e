use std::collections::BTreeMap;

use tracing::debug;

use super::config::ScoringConfig;
use crate::assessments::domain::{
    Answer, AssessmentKind, Category, Question, QuestionInput, ScoreVector,
};
use crate::assessments::profile::StudentProfile;

/// Subject-name keywords mapped to weighted category contributions.
/// Matched case-insensitively as substrings of the subject name;
/// the first matching row wins.
const SUBJECT_WEIGHTS: &[(&str, &[(Category, f64)])] = &[
    ("math", &[(Category::Engineering, 1.0), (Category::Science, 1.0)]),
    ("physics", &[(Category::Engineering, 1.0), (Category::Science, 1.0)]),
    ("biology", &[(Category::Medical, 1.5)]),
    ("chemistry", &[(Category::Science, 1.0), (Category::Medical, 1.0)]),
    ("business", &[(Category::Commerce, 1.0), (Category::Business, 1.0)]),
    ("economics", &[(Category::Commerce, 1.0), (Category::Business, 1.0)]),
    ("account", &[(Category::Commerce, 1.0), (Category::Business, 1.0)]),
    ("history", &[(Category::Arts, 1.0), (Category::Social, 1.0)]),
    ("political", &[(Category::Arts, 1.0), (Category::Social, 1.0)]),
    ("social", &[(Category::Arts, 1.0), (Category::Social, 1.0)]),
    ("english", &[(Category::Arts, 1.0), (Category::Creative, 1.0)]),
];

/// Declared-stream keywords with their primary and secondary bonus
/// categories. First matching row wins, so "Science (PCM)" resolves to
/// the PCM row rather than the generic science row.
const STREAM_BONUSES: &[(&str, Category, Category)] = &[
    ("pcm", Category::Engineering, Category::Science),
    ("pcb", Category::Medical, Category::Science),
    ("commerce", Category::Commerce, Category::Business),
    ("humanities", Category::Arts, Category::Social),
    ("art", Category::Arts, Category::Creative),
    ("diploma", Category::Diploma, Category::Engineering),
    ("vocational", Category::Diploma, Category::Engineering),
    ("science", Category::Science, Category::Engineering),
];

/// Interest and goal keywords mapped to the categories they signal.
/// Every match adds the configured increment; duplicate matches across
/// keywords accumulate additively with no cap.
const KEYWORD_CATEGORIES: &[(&str, &[Category])] = &[
    ("coding", &[Category::Engineering, Category::Science]),
    ("technology", &[Category::Engineering, Category::Science]),
    ("robot", &[Category::Engineering]),
    ("engineer", &[Category::Engineering]),
    ("doctor", &[Category::Medical, Category::Science]),
    ("medicine", &[Category::Medical]),
    ("health", &[Category::Medical, Category::Social]),
    ("finance", &[Category::Commerce, Category::Business]),
    ("business", &[Category::Business, Category::Commerce]),
    ("entrepreneur", &[Category::Business]),
    ("design", &[Category::Creative, Category::Arts]),
    ("music", &[Category::Creative]),
    ("writing", &[Category::Creative, Category::Arts]),
    ("drawing", &[Category::Creative, Category::Arts]),
    ("teaching", &[Category::Social]),
    ("helping", &[Category::Social, Category::Medical]),
    ("people", &[Category::Social]),
    ("research", &[Category::Science]),
    ("experiment", &[Category::Science]),
    ("trade", &[Category::Diploma]),
    ("practical", &[Category::Diploma]),
    ("mechanic", &[Category::Diploma, Category::Engineering]),
];

/// Broad categories receiving the flat fallback weight when a marks
/// payload is unreadable.
pub(crate) const fn fallback_categories(kind: AssessmentKind) -> &'static [Category] {
    match kind {
        AssessmentKind::Stream => &[Category::Science, Category::Commerce, Category::Arts],
        AssessmentKind::Career => &[
            Category::Science,
            Category::Commerce,
            Category::Arts,
            Category::Business,
        ],
    }
}

/// Weight tier for a percentage mark.
pub(crate) fn marks_tier(value: f64, config: &ScoringConfig) -> f64 {
    if value > config.distinction_threshold {
        config.distinction_weight
    } else if value > config.merit_threshold {
        config.merit_weight
    } else if value > config.pass_threshold {
        config.pass_weight
    } else {
        0.0
    }
}

/// Fixed bonuses derived from the stored profile: declared stream plus
/// interest and goal keyword matches.
pub(crate) fn apply_profile_signals(
    vector: &mut ScoreVector,
    profile: &StudentProfile,
    config: &ScoringConfig,
) {
    if let Some(stream) = profile.stream.as_deref() {
        let stream = stream.to_lowercase();
        if let Some((_, primary, secondary)) = STREAM_BONUSES
            .iter()
            .find(|(keyword, _, _)| stream.contains(keyword))
        {
            vector.add(*primary, config.stream_bonus_primary);
            vector.add(*secondary, config.stream_bonus_secondary);
        }
    }

    apply_keywords(vector, &profile.interests, config.interest_bonus);
    apply_keywords(vector, &profile.goals, config.goal_bonus);
}

fn apply_keywords(vector: &mut ScoreVector, phrases: &[String], bonus: f64) {
    for phrase in phrases {
        let phrase = phrase.to_lowercase();
        for (keyword, categories) in KEYWORD_CATEGORIES {
            if phrase.contains(keyword) {
                for category in *categories {
                    vector.add(*category, bonus);
                }
            }
        }
    }
}

/// One answer's contribution to the running vector. Never fails:
/// unreadable marks degrade to the flat fallback, unknown options and
/// mismatched shapes contribute nothing.
pub(crate) fn apply_answer(
    vector: &mut ScoreVector,
    question: &Question,
    answer: &Answer,
    config: &ScoringConfig,
) {
    match (&question.input, answer) {
        (QuestionInput::SingleChoice { options }, Answer::Choice { option }) => {
            match options.iter().find(|candidate| &candidate.id == option) {
                Some(chosen) => {
                    for (category, weight) in &chosen.weights {
                        vector.add(*category, *weight);
                    }
                }
                None => {
                    debug!(question = %question.id, option, "ignoring unknown option");
                }
            }
        }
        (QuestionInput::SubjectMarks { .. }, Answer::Marks { payload }) => {
            apply_marks(vector, question, payload, config);
        }
        _ => {
            debug!(question = %question.id, "answer shape does not match question input");
        }
    }
}

fn apply_marks(vector: &mut ScoreVector, question: &Question, payload: &str, config: &ScoringConfig) {
    let parsed: Result<BTreeMap<String, f64>, _> = serde_json::from_str(payload);
    let marks = match parsed {
        Ok(marks) => marks,
        Err(err) => {
            debug!(question = %question.id, %err, "unreadable marks payload, applying flat fallback");
            for category in fallback_categories(vector.kind()) {
                vector.add(*category, config.malformed_marks_weight);
            }
            return;
        }
    };

    for (subject, value) in marks {
        // Marks are percentages; anything outside [0, 100] is dropped,
        // matching the intake rule for sheets that bypassed it.
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            continue;
        }
        let tier = marks_tier(value, config);
        if tier <= 0.0 {
            continue;
        }
        let subject = subject.to_lowercase();
        if let Some((_, weights)) = SUBJECT_WEIGHTS
            .iter()
            .find(|(keyword, _)| subject.contains(keyword))
        {
            for (category, multiplier) in *weights {
                vector.add(*category, tier * multiplier);
            }
        }
    }
}
