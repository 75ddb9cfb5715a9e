use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bank::QuestionBank;
use super::domain::{Answer, AnswerSheet, AssessmentKind, Question, QuestionId, SessionId};
use super::profile::StudentProfile;

/// Intake validation failures. All of these mean "cannot proceed" for
/// the presentation layer; none is fatal.
#[derive(Debug, thiserror::Error)]
pub enum AnswerRejection {
    #[error("question '{0}' is not part of this assessment")]
    UnknownQuestion(QuestionId),
    #[error("question '{0}' is not applicable to the current session")]
    NotApplicable(QuestionId),
    #[error("question '{question}' does not offer option '{option}'")]
    UnknownOption { question: QuestionId, option: String },
    #[error("question '{0}' expects a single choice")]
    ExpectedChoice(QuestionId),
    #[error("question '{0}' expects subject marks")]
    ExpectedMarks(QuestionId),
    #[error("marks payload for question '{0}' could not be read")]
    UnreadableMarks(QuestionId),
    #[error("marks for subject '{subject}' are missing")]
    MissingMark { subject: String },
    #[error("marks for subject '{subject}' must be between 0 and 100, got {value}")]
    MarkOutOfRange { subject: String, value: f64 },
}

/// Answered-versus-applicable progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

/// One respondent's in-flight assessment.
///
/// The session never stores a positional index into the filtered
/// question list; the current question is resolved by identifier as
/// the first applicable question without a recorded answer, so the
/// list shrinking or growing between answers relocates deterministically.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    pub session_id: SessionId,
    pub kind: AssessmentKind,
    pub profile: Option<StudentProfile>,
    pub started_on: NaiveDate,
    answers: AnswerSheet,
    report_recorded: bool,
}

impl AssessmentSession {
    pub fn new(
        session_id: SessionId,
        kind: AssessmentKind,
        profile: Option<StudentProfile>,
        started_on: NaiveDate,
    ) -> Self {
        Self {
            session_id,
            kind,
            profile,
            started_on,
            answers: AnswerSheet::new(),
            report_recorded: false,
        }
    }

    /// Flag the first completed report for this session. Returns true
    /// only for the call that did the flagging, so history is appended
    /// once however often results are recomputed.
    pub fn mark_report_recorded(&mut self) -> bool {
        !std::mem::replace(&mut self.report_recorded, true)
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn applicable<'a>(&self, bank: &'a QuestionBank) -> Vec<&'a Question> {
        bank.applicable(self.profile.as_ref(), &self.answers)
    }

    /// First applicable question without an answer, or `None` once the
    /// assessment is complete.
    pub fn current_question<'a>(&self, bank: &'a QuestionBank) -> Option<&'a Question> {
        self.applicable(bank)
            .into_iter()
            .find(|question| !self.answers.contains(&question.id))
    }

    pub fn progress(&self, bank: &QuestionBank) -> Progress {
        let applicable = self.applicable(bank);
        let answered = applicable
            .iter()
            .filter(|question| self.answers.contains(&question.id))
            .count();
        Progress {
            answered,
            total: applicable.len(),
        }
    }

    /// Applicable questions still lacking an answer.
    pub fn missing(&self, bank: &QuestionBank) -> Vec<QuestionId> {
        self.applicable(bank)
            .into_iter()
            .filter(|question| !self.answers.contains(&question.id))
            .map(|question| question.id.clone())
            .collect()
    }

    pub fn is_complete(&self, bank: &QuestionBank) -> bool {
        self.missing(bank).is_empty()
    }

    /// Validate and record one answer.
    pub fn submit(
        &mut self,
        bank: &QuestionBank,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<(), AnswerRejection> {
        let applicable = self.applicable(bank);
        let question = match applicable
            .into_iter()
            .find(|question| question.id == question_id)
        {
            Some(question) => question,
            None if bank.question(&question_id).is_some() => {
                return Err(AnswerRejection::NotApplicable(question_id));
            }
            None => return Err(AnswerRejection::UnknownQuestion(question_id)),
        };

        validate_answer(question, &answer)?;
        self.answers.record(question_id, answer);
        Ok(())
    }
}

fn validate_answer(question: &Question, answer: &Answer) -> Result<(), AnswerRejection> {
    use super::domain::QuestionInput;

    match (&question.input, answer) {
        (QuestionInput::SingleChoice { options }, Answer::Choice { option }) => {
            if options.iter().any(|candidate| &candidate.id == option) {
                Ok(())
            } else {
                Err(AnswerRejection::UnknownOption {
                    question: question.id.clone(),
                    option: option.clone(),
                })
            }
        }
        (QuestionInput::SingleChoice { .. }, Answer::Marks { .. }) => {
            Err(AnswerRejection::ExpectedChoice(question.id.clone()))
        }
        (QuestionInput::SubjectMarks { .. }, Answer::Choice { .. }) => {
            Err(AnswerRejection::ExpectedMarks(question.id.clone()))
        }
        (QuestionInput::SubjectMarks { subjects }, Answer::Marks { payload }) => {
            let marks: BTreeMap<String, f64> = serde_json::from_str(payload)
                .map_err(|_| AnswerRejection::UnreadableMarks(question.id.clone()))?;

            // Every entry is a percentage, required or not; the engine
            // scores the whole payload.
            for (subject, value) in &marks {
                if !value.is_finite() || !(0.0..=100.0).contains(value) {
                    return Err(AnswerRejection::MarkOutOfRange {
                        subject: subject.clone(),
                        value: *value,
                    });
                }
            }

            for subject in subjects {
                if !marks.keys().any(|name| name.eq_ignore_ascii_case(subject)) {
                    return Err(AnswerRejection::MissingMark {
                        subject: subject.clone(),
                    });
                }
            }
            Ok(())
        }
    }
}
