use super::common::*;
use crate::assessments::bank::{Applicability, QuestionBank};
use crate::assessments::domain::{AnswerSheet, AssessmentKind, Category, QuestionId};

fn ids(questions: &[&crate::assessments::domain::Question]) -> Vec<String> {
    questions
        .iter()
        .map(|question| question.id.to_string())
        .collect()
}

#[test]
fn stream_bank_without_profile_offers_only_unconditional_questions() {
    let bank = QuestionBank::for_kind(AssessmentKind::Stream);

    let applicable = bank.applicable(None, &AnswerSheet::new());

    assert_eq!(
        ids(&applicable),
        vec![
            "stream-favourite-subject",
            "stream-learning-style",
            "stream-career-appeal",
            "stream-study-horizon",
        ]
    );
}

#[test]
fn commerce_profile_unlocks_the_commerce_question_but_not_arts() {
    let bank = QuestionBank::for_kind(AssessmentKind::Stream);
    let profile = profile_with_stream("Commerce with Maths");

    let applicable = bank.applicable(Some(&profile), &AnswerSheet::new());
    let listed = ids(&applicable);

    assert!(listed.contains(&"stream-commerce-interest".to_string()));
    assert!(!listed.contains(&"stream-arts-interest".to_string()));
}

#[test]
fn prior_answer_unlocks_the_science_depth_question() {
    let bank = QuestionBank::for_kind(AssessmentKind::Stream);
    let mut answers = AnswerSheet::new();

    let before = ids(&bank.applicable(None, &answers));
    assert!(!before.contains(&"stream-science-depth".to_string()));

    answers.record(
        QuestionId::new("stream-favourite-subject"),
        choice_answer("maths-science"),
    );

    let after = ids(&bank.applicable(None, &answers));
    assert!(after.contains(&"stream-science-depth".to_string()));
}

#[test]
fn applicable_preserves_bank_order() {
    let bank = QuestionBank::for_kind(AssessmentKind::Career);
    let profile = profile_with_stream("Science (PCM)");

    let applicable = bank.applicable(Some(&profile), &AnswerSheet::new());
    let listed = ids(&applicable);

    let all: Vec<String> = bank
        .questions()
        .iter()
        .map(|question| question.id.to_string())
        .collect();
    let positions: Vec<usize> = listed
        .iter()
        .map(|id| all.iter().position(|candidate| candidate == id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn fully_constrained_bank_falls_back_to_every_question() {
    let options = vec![crate::assessments::domain::AnswerOption {
        id: "only".to_string(),
        text: "only".to_string(),
        weights: vec![(Category::Science, 1.0)],
    }];
    let question = crate::assessments::domain::Question {
        id: QuestionId::new("locked"),
        topic: "fixture".to_string(),
        prompt: "never directly applicable".to_string(),
        input: crate::assessments::domain::QuestionInput::SingleChoice { options },
        applicability: Applicability::StreamMentions("nonexistent".to_string()),
    };
    let bank = QuestionBank::new(AssessmentKind::Stream, vec![question]);

    let applicable = bank.applicable(None, &AnswerSheet::new());

    assert_eq!(ids(&applicable), vec!["locked"]);
}

#[test]
fn education_level_predicate_is_case_insensitive() {
    let mut profile = profile_with_stream("Commerce");
    profile.education_level = "Class-10".to_string();

    let predicate = Applicability::EducationLevelIs("class-10".to_string());

    assert!(predicate.holds(Some(&profile), &AnswerSheet::new()));
    assert!(!predicate.holds(None, &AnswerSheet::new()));
}

#[test]
fn question_lookup_by_id() {
    let bank = QuestionBank::for_kind(AssessmentKind::Career);

    assert!(bank.question(&QuestionId::new("career-recent-marks")).is_some());
    assert!(bank.question(&QuestionId::new("never-shipped")).is_none());
    assert_eq!(bank.kind(), AssessmentKind::Career);
}
