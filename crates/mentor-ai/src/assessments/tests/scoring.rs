use super::common::*;
use crate::assessments::bank::QuestionBank;
use crate::assessments::domain::{AnswerSheet, AssessmentKind, Category, QuestionId};

#[test]
fn worked_example_scores_exactly() {
    let bank = worked_example_bank();
    let mut answers = AnswerSheet::new();
    answers.record(QuestionId::new("q1"), choice_answer("a"));
    answers.record(QuestionId::new("q2"), choice_answer("b"));

    let vector = engine().score(None, &bank, &answers);

    assert_eq!(vector.get(Category::Science), Some(3.0));
    assert_eq!(vector.get(Category::Commerce), Some(4.0));
    assert_eq!(vector.get(Category::Arts), Some(1.0));
    assert_eq!(vector.get(Category::Diploma), Some(3.0));
}

#[test]
fn every_declared_category_is_present_and_non_negative() {
    let bank = QuestionBank::for_kind(AssessmentKind::Career);
    let mut answers = AnswerSheet::new();
    answers.record(
        QuestionId::new("career-work-preference"),
        choice_answer("build-systems"),
    );
    answers.record(QuestionId::new("career-recent-marks"), marks_answer(&[]));

    let vector = engine().score(None, &bank, &answers);

    let categories: Vec<Category> = vector.iter().map(|(category, _)| category).collect();
    assert_eq!(categories, AssessmentKind::Career.categories().to_vec());
    assert!(vector.iter().all(|(_, score)| score >= 0.0));
}

#[test]
fn high_mathematics_marks_reach_engineering_and_science() {
    let bank = QuestionBank::for_kind(AssessmentKind::Career);
    let mut answers = AnswerSheet::new();
    answers.record(
        QuestionId::new("career-recent-marks"),
        marks_answer(&[("Mathematics", 90.0), ("English", 40.0)]),
    );

    let vector = engine().score(None, &bank, &answers);

    // Mathematics at 90 sits in the top tier; English at 40 is below
    // the lowest threshold and contributes nothing.
    assert_eq!(vector.get(Category::Engineering), Some(3.0));
    assert_eq!(vector.get(Category::Science), Some(3.0));
    assert_eq!(vector.get(Category::Arts), Some(0.0));
    assert_eq!(vector.get(Category::Creative), Some(0.0));
}

#[test]
fn biology_marks_use_the_medical_multiplier() {
    let bank = QuestionBank::for_kind(AssessmentKind::Career);
    let mut answers = AnswerSheet::new();
    answers.record(
        QuestionId::new("career-recent-marks"),
        marks_answer(&[("Biology", 80.0)]),
    );

    let vector = engine().score(None, &bank, &answers);

    // Tier 2 at 80, scaled by the 1.5 medical multiplier.
    assert_eq!(vector.get(Category::Medical), Some(3.0));
}

#[test]
fn out_of_range_marks_contribute_nothing() {
    let bank = QuestionBank::for_kind(AssessmentKind::Career);
    let mut answers = AnswerSheet::new();
    answers.record(
        QuestionId::new("career-recent-marks"),
        marks_answer(&[
            ("Mathematics", 90.0),
            ("English", 70.0),
            ("Biology", 1000.0),
        ]),
    );

    let vector = engine().score(None, &bank, &answers);

    // Biology at 1000 is outside the percentage range and is dropped;
    // the in-range subjects still score.
    assert_eq!(vector.get(Category::Medical), Some(0.0));
    assert_eq!(vector.get(Category::Engineering), Some(3.0));
    assert_eq!(vector.get(Category::Arts), Some(1.0));
}

#[test]
fn malformed_marks_payload_degrades_to_flat_fallback() {
    let bank = QuestionBank::for_kind(AssessmentKind::Career);
    let mut answers = AnswerSheet::new();
    answers.record(
        QuestionId::new("career-recent-marks"),
        crate::assessments::domain::Answer::Marks {
            payload: "not a json object".to_string(),
        },
    );

    let vector = engine().score(None, &bank, &answers);

    let weight = scoring_config().malformed_marks_weight;
    assert_eq!(vector.get(Category::Science), Some(weight));
    assert_eq!(vector.get(Category::Commerce), Some(weight));
    assert_eq!(vector.get(Category::Arts), Some(weight));
    assert_eq!(vector.get(Category::Business), Some(weight));
    assert_eq!(vector.get(Category::Engineering), Some(0.0));
}

#[test]
fn declared_pcm_stream_takes_the_pcm_bonus_row() {
    let bank = QuestionBank::for_kind(AssessmentKind::Career);
    let profile = profile_with_stream("Science (PCM)");

    let vector = engine().score(Some(&profile), &bank, &AnswerSheet::new());

    let config = scoring_config();
    // "Science (PCM)" contains both "pcm" and "science"; the first
    // matching row wins, so engineering takes the primary bonus.
    assert_eq!(
        vector.get(Category::Engineering),
        Some(config.stream_bonus_primary)
    );
    assert_eq!(
        vector.get(Category::Science),
        Some(config.stream_bonus_secondary)
    );
}

#[test]
fn interest_keyword_matches_accumulate_without_cap() {
    let bank = QuestionBank::for_kind(AssessmentKind::Career);
    let mut profile = profile_with_stream("Commerce");
    profile.stream = None;
    profile.interests = vec!["coding".to_string(), "robotics club".to_string()];

    let vector = engine().score(Some(&profile), &bank, &AnswerSheet::new());

    let bonus = scoring_config().interest_bonus;
    // "coding" signals engineering and science; "robotics club"
    // matches the robot keyword and adds to engineering again.
    assert_eq!(vector.get(Category::Engineering), Some(2.0 * bonus));
    assert_eq!(vector.get(Category::Science), Some(bonus));
}

#[test]
fn goal_keywords_use_the_goal_bonus() {
    let bank = QuestionBank::for_kind(AssessmentKind::Career);
    let mut profile = profile_with_stream("Commerce");
    profile.stream = None;
    profile.goals = vec!["become a doctor".to_string()];

    let vector = engine().score(Some(&profile), &bank, &AnswerSheet::new());

    let bonus = scoring_config().goal_bonus;
    assert_eq!(vector.get(Category::Medical), Some(bonus));
    assert_eq!(vector.get(Category::Science), Some(bonus));
}

#[test]
fn unknown_option_contributes_nothing() {
    let bank = worked_example_bank();
    let mut answers = AnswerSheet::new();
    answers.record(QuestionId::new("q1"), choice_answer("never-offered"));

    let vector = engine().score(None, &bank, &answers);

    assert!(vector.iter().all(|(_, score)| score == 0.0));
}

#[test]
fn answers_to_unknown_questions_are_dropped() {
    let bank = worked_example_bank();
    let mut answers = AnswerSheet::new();
    answers.record(QuestionId::new("q-removed"), choice_answer("a"));

    let vector = engine().score(None, &bank, &answers);

    assert!(vector.iter().all(|(_, score)| score == 0.0));
}

#[test]
fn scoring_is_idempotent_for_the_same_inputs() {
    let bank = QuestionBank::for_kind(AssessmentKind::Career);
    let profile = profile_with_stream("Commerce");
    let mut answers = AnswerSheet::new();
    answers.record(
        QuestionId::new("career-work-preference"),
        choice_answer("run-numbers"),
    );
    answers.record(
        QuestionId::new("career-recent-marks"),
        marks_answer(&[("Mathematics", 70.0), ("English", 88.0)]),
    );

    let first = engine().score(Some(&profile), &bank, &answers);
    let second = engine().score(Some(&profile), &bank, &answers);

    assert_eq!(first, second);
}
