use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for questions in a bank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for in-flight assessment sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of scoring buckets across both assessment variants.
///
/// Categories are never created or removed at runtime; each variant
/// declares the subset it scores over, in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Science,
    Commerce,
    Arts,
    Diploma,
    Engineering,
    Medical,
    Creative,
    Business,
    Social,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::Science => "science",
            Category::Commerce => "commerce",
            Category::Arts => "arts",
            Category::Diploma => "diploma",
            Category::Engineering => "engineering",
            Category::Medical => "medical",
            Category::Creative => "creative",
            Category::Business => "business",
            Category::Social => "social",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Assessment variants offered to students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    /// Class-10 stream selection: science, commerce, arts or diploma.
    Stream,
    /// Class-12 career-field affinity across eight fields.
    Career,
}

impl AssessmentKind {
    /// Declared categories in their fixed declaration order, which is
    /// also the tie-break order during ranking.
    pub const fn categories(self) -> &'static [Category] {
        match self {
            AssessmentKind::Stream => &[
                Category::Science,
                Category::Commerce,
                Category::Arts,
                Category::Diploma,
            ],
            AssessmentKind::Career => &[
                Category::Engineering,
                Category::Medical,
                Category::Commerce,
                Category::Arts,
                Category::Creative,
                Category::Business,
                Category::Social,
                Category::Science,
            ],
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AssessmentKind::Stream => "stream",
            AssessmentKind::Career => "career",
        }
    }
}

/// One selectable answer to a single-choice question, carrying its
/// per-category weight contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    pub weights: Vec<(Category, f64)>,
}

/// Input shape of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuestionInput {
    SingleChoice { options: Vec<AnswerOption> },
    SubjectMarks { subjects: Vec<String> },
}

/// A question definition from one of the static banks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub topic: String,
    pub prompt: String,
    pub input: QuestionInput,
    pub applicability: crate::assessments::bank::Applicability,
}

/// A respondent's raw answer to one question.
///
/// Subject marks arrive as a serialized value map; the scoring engine
/// parses the payload and degrades gracefully when it is unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Answer {
    Choice { option: String },
    Marks { payload: String },
}

/// Mapping from question identifier to the recorded raw answer.
///
/// Created empty at assessment start and mutated one question at a
/// time; iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSheet {
    answers: BTreeMap<QuestionId, Answer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question: QuestionId, answer: Answer) {
        self.answers.insert(question, answer);
    }

    pub fn get(&self, question: &QuestionId) -> Option<&Answer> {
        self.answers.get(question)
    }

    pub fn contains(&self, question: &QuestionId) -> bool {
        self.answers.contains_key(question)
    }

    /// The chosen option id, when the recorded answer is a choice.
    pub fn selected_option(&self, question: &QuestionId) -> Option<&str> {
        match self.answers.get(question) {
            Some(Answer::Choice { option }) => Some(option.as_str()),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Answer)> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Accumulated score per declared category of one assessment variant.
///
/// Every declared category is present from construction, in
/// declaration order; values never go below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    kind: AssessmentKind,
    entries: Vec<(Category, f64)>,
}

impl ScoreVector {
    pub fn new(kind: AssessmentKind) -> Self {
        Self {
            kind,
            entries: kind
                .categories()
                .iter()
                .map(|category| (*category, 0.0))
                .collect(),
        }
    }

    pub fn kind(&self) -> AssessmentKind {
        self.kind
    }

    /// Add a non-negative contribution. Categories outside the
    /// variant's declared set are dropped, which lets both variants
    /// share the keyword tables.
    pub fn add(&mut self, category: Category, amount: f64) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| *existing == category)
        {
            entry.1 += amount;
        }
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == category)
            .map(|(_, score)| *score)
    }

    /// Entries in category declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn max(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, (_, score)| acc.max(*score))
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, score)| score).sum()
    }
}
