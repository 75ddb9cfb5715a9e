use super::common::*;
use crate::assessments::domain::{AnswerSheet, AssessmentKind, Category, QuestionId, ScoreVector};
use crate::assessments::ranking::{rank, Confidence};

#[test]
fn worked_example_orders_commerce_science_diploma_arts() {
    let bank = worked_example_bank();
    let mut answers = AnswerSheet::new();
    answers.record(QuestionId::new("q1"), choice_answer("a"));
    answers.record(QuestionId::new("q2"), choice_answer("b"));

    let vector = engine().score(None, &bank, &answers);
    let ranking = rank(&vector);

    let order: Vec<Category> = ranking
        .results
        .iter()
        .map(|result| result.category)
        .collect();
    assert_eq!(
        order,
        vec![
            Category::Commerce,
            Category::Science,
            Category::Diploma,
            Category::Arts
        ]
    );
    assert_eq!(ranking.results[0].position, 1);
    assert_eq!(ranking.results[0].percent_of_max, 100);
}

#[test]
fn rank_is_idempotent() {
    let mut vector = ScoreVector::new(AssessmentKind::Stream);
    vector.add(Category::Science, 7.0);
    vector.add(Category::Commerce, 2.0);
    vector.add(Category::Diploma, 2.0);

    let first = rank(&vector);
    let second = rank(&vector);

    assert_eq!(first, second);
}

#[test]
fn equal_scores_keep_declaration_order_with_low_confidence() {
    let mut vector = ScoreVector::new(AssessmentKind::Stream);
    for category in AssessmentKind::Stream.categories() {
        vector.add(*category, 5.0);
    }

    let ranking = rank(&vector);

    let order: Vec<Category> = ranking
        .results
        .iter()
        .map(|result| result.category)
        .collect();
    assert_eq!(order, AssessmentKind::Stream.categories().to_vec());
    assert_eq!(ranking.confidence, Confidence::Low);
}

#[test]
fn all_zero_vector_ranks_in_declaration_order_with_zero_percents() {
    let vector = ScoreVector::new(AssessmentKind::Career);

    let ranking = rank(&vector);

    let order: Vec<Category> = ranking
        .results
        .iter()
        .map(|result| result.category)
        .collect();
    assert_eq!(order, AssessmentKind::Career.categories().to_vec());
    assert!(ranking
        .results
        .iter()
        .all(|result| result.percent_of_max == 0 && result.percent_of_total == 0));
    assert_eq!(ranking.confidence, Confidence::Low);
    assert_eq!(ranking.results.len(), 8);
}

#[test]
fn percent_of_total_sums_to_one_hundred_within_rounding() {
    let mut vector = ScoreVector::new(AssessmentKind::Career);
    vector.add(Category::Engineering, 7.0);
    vector.add(Category::Medical, 5.0);
    vector.add(Category::Commerce, 3.0);
    vector.add(Category::Science, 1.0);

    let ranking = rank(&vector);

    let sum: i32 = ranking
        .results
        .iter()
        .map(|result| result.percent_of_total as i32)
        .sum();
    assert!((98..=102).contains(&sum), "sum was {sum}");
}

#[test]
fn top_category_dominating_the_rest_is_high_confidence() {
    let mut vector = ScoreVector::new(AssessmentKind::Stream);
    vector.add(Category::Science, 10.0);
    vector.add(Category::Commerce, 4.0);
    vector.add(Category::Arts, 3.0);

    let ranking = rank(&vector);

    assert_eq!(ranking.confidence, Confidence::High);
}

#[test]
fn top_category_above_seventy_percent_of_rest_is_medium_confidence() {
    let mut vector = ScoreVector::new(AssessmentKind::Stream);
    vector.add(Category::Science, 7.0);
    vector.add(Category::Commerce, 5.0);
    vector.add(Category::Arts, 4.0);

    let ranking = rank(&vector);

    // 7 against a rest of 9: above 6.3, below 9.
    assert_eq!(ranking.confidence, Confidence::Medium);
}
