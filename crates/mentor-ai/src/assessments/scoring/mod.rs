mod config;
mod rules;

pub use config::ScoringConfig;

use super::bank::QuestionBank;
use super::domain::{AnswerSheet, ScoreVector};
use super::profile::StudentProfile;

/// Stateless classifier applying the rubric configuration to an answer
/// sheet plus optional profile signals.
///
/// `score` is a pure function of its inputs: recomputing with the same
/// bank, profile and answers always yields the same vector, and no
/// respondent input can make it fail.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(
        &self,
        profile: Option<&StudentProfile>,
        bank: &QuestionBank,
        answers: &AnswerSheet,
    ) -> ScoreVector {
        let mut vector = ScoreVector::new(bank.kind());

        if let Some(profile) = profile {
            rules::apply_profile_signals(&mut vector, profile, &self.config);
        }

        for (question_id, answer) in answers.iter() {
            // Answers to questions no longer in the bank are dropped.
            if let Some(question) = bank.question(question_id) {
                rules::apply_answer(&mut vector, question, answer, &self.config);
            }
        }

        vector
    }
}
