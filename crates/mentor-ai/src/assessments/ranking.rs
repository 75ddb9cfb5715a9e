use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{Category, ScoreVector};

/// How dominant the top-ranked category is over the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// A category's score with its normalized percentages and 1-based rank
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub category: Category,
    pub score: f64,
    pub percent_of_max: u8,
    pub percent_of_total: u8,
    pub position: u8,
}

/// Display-ready ordered result set with a single confidence tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub results: Vec<RankedResult>,
    pub confidence: Confidence,
}

/// Order a score vector descending by raw score. Ties keep the
/// variant's category declaration order (stable sort). Every declared
/// category appears in the output, including all-zero vectors, where
/// percentages are defined as 0 and confidence is Low.
pub fn rank(vector: &ScoreVector) -> Ranking {
    let max = vector.max();
    let total = vector.total();

    let mut results: Vec<RankedResult> = vector
        .iter()
        .map(|(category, score)| RankedResult {
            category,
            score,
            percent_of_max: percent(score, max),
            percent_of_total: percent(score, total),
            position: 0,
        })
        .collect();

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    for (index, result) in results.iter_mut().enumerate() {
        result.position = (index + 1) as u8;
    }

    let confidence = match results.first() {
        Some(top) => {
            let rest = total - top.score;
            if top.score > 0.0 && top.score > rest {
                Confidence::High
            } else if top.score > 0.0 && top.score > 0.7 * rest {
                Confidence::Medium
            } else {
                Confidence::Low
            }
        }
        None => Confidence::Low,
    };

    Ranking {
        results,
        confidence,
    }
}

fn percent(score: f64, denominator: f64) -> u8 {
    if denominator > 0.0 {
        (100.0 * score / denominator).round() as u8
    } else {
        0
    }
}
