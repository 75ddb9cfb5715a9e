use serde::{Deserialize, Serialize};

use super::domain::{
    AnswerOption, AnswerSheet, AssessmentKind, Category, Question, QuestionId, QuestionInput,
};
use super::profile::StudentProfile;

/// Data-driven inclusion predicate attached to a question.
///
/// Predicates may inspect the optional profile and previously given
/// answers; questions without a constraint use `Always`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Applicability {
    Always,
    /// The declared stream contains the keyword, case-insensitively.
    StreamMentions(String),
    /// The declared education level matches exactly, case-insensitively.
    EducationLevelIs(String),
    /// A prior single-choice answer selected the given option.
    PriorAnswerIs { question: QuestionId, option: String },
    AnyOf(Vec<Applicability>),
}

impl Applicability {
    pub fn holds(&self, profile: Option<&StudentProfile>, answers: &AnswerSheet) -> bool {
        match self {
            Applicability::Always => true,
            Applicability::StreamMentions(keyword) => profile
                .and_then(|profile| profile.stream.as_deref())
                .map(|stream| stream.to_lowercase().contains(&keyword.to_lowercase()))
                .unwrap_or(false),
            Applicability::EducationLevelIs(level) => profile
                .map(|profile| profile.education_level.eq_ignore_ascii_case(level))
                .unwrap_or(false),
            Applicability::PriorAnswerIs { question, option } => {
                answers.selected_option(question) == Some(option.as_str())
            }
            Applicability::AnyOf(alternatives) => alternatives
                .iter()
                .any(|alternative| alternative.holds(profile, answers)),
        }
    }
}

/// Immutable question list for one assessment variant.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    kind: AssessmentKind,
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(kind: AssessmentKind, questions: Vec<Question>) -> Self {
        Self { kind, questions }
    }

    /// The standard bank shipped for a variant.
    pub fn for_kind(kind: AssessmentKind) -> Self {
        match kind {
            AssessmentKind::Stream => stream_bank(),
            AssessmentKind::Career => career_bank(),
        }
    }

    pub fn kind(&self) -> AssessmentKind {
        self.kind
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    /// Questions applicable to the current session state, in bank
    /// order. Re-evaluated on every state change because later
    /// questions' eligibility can depend on earlier answers.
    ///
    /// When profile constraints filter everything out, the list is
    /// regenerated without them; an empty sequence is never returned
    /// from a non-empty bank.
    pub fn applicable(
        &self,
        profile: Option<&StudentProfile>,
        answers: &AnswerSheet,
    ) -> Vec<&Question> {
        let filtered: Vec<&Question> = self
            .questions
            .iter()
            .filter(|question| question.applicability.holds(profile, answers))
            .collect();
        if !filtered.is_empty() {
            return filtered;
        }

        let unconstrained: Vec<&Question> = self
            .questions
            .iter()
            .filter(|question| question.applicability.holds(None, answers))
            .collect();
        if !unconstrained.is_empty() {
            return unconstrained;
        }

        self.questions.iter().collect()
    }
}

fn choice(
    id: &str,
    topic: &str,
    prompt: &str,
    applicability: Applicability,
    options: Vec<AnswerOption>,
) -> Question {
    Question {
        id: QuestionId::new(id),
        topic: topic.to_string(),
        prompt: prompt.to_string(),
        input: QuestionInput::SingleChoice { options },
        applicability,
    }
}

fn marks(
    id: &str,
    topic: &str,
    prompt: &str,
    applicability: Applicability,
    subjects: &[&str],
) -> Question {
    Question {
        id: QuestionId::new(id),
        topic: topic.to_string(),
        prompt: prompt.to_string(),
        input: QuestionInput::SubjectMarks {
            subjects: subjects.iter().map(|subject| subject.to_string()).collect(),
        },
        applicability,
    }
}

fn option(id: &str, text: &str, weights: &[(Category, f64)]) -> AnswerOption {
    AnswerOption {
        id: id.to_string(),
        text: text.to_string(),
        weights: weights.to_vec(),
    }
}

fn stream_mentions(keyword: &str) -> Applicability {
    Applicability::StreamMentions(keyword.to_string())
}

fn prior_answer(question: &str, selected: &str) -> Applicability {
    Applicability::PriorAnswerIs {
        question: QuestionId::new(question),
        option: selected.to_string(),
    }
}

/// Stream-selection bank for class-10 students.
fn stream_bank() -> QuestionBank {
    use Category::{Arts, Commerce, Diploma, Science};

    let questions = vec![
        choice(
            "stream-favourite-subject",
            "academics",
            "Which school subject do you enjoy the most?",
            Applicability::Always,
            vec![
                option(
                    "maths-science",
                    "Mathematics and Science",
                    &[(Science, 3.0), (Diploma, 1.0)],
                ),
                option(
                    "business-studies",
                    "Business Studies and Economics",
                    &[(Commerce, 3.0)],
                ),
                option(
                    "languages-history",
                    "Languages, History and Civics",
                    &[(Arts, 3.0)],
                ),
                option(
                    "practical-workshops",
                    "Practical and workshop sessions",
                    &[(Diploma, 3.0), (Science, 1.0)],
                ),
            ],
        ),
        choice(
            "stream-learning-style",
            "aptitude",
            "How do you prefer to learn something new?",
            Applicability::Always,
            vec![
                option(
                    "experiments",
                    "Running experiments and testing ideas",
                    &[(Science, 3.0)],
                ),
                option(
                    "case-studies",
                    "Working through business case studies",
                    &[(Commerce, 3.0), (Arts, 1.0)],
                ),
                option(
                    "reading-writing",
                    "Reading, writing and discussing",
                    &[(Arts, 3.0)],
                ),
                option(
                    "hands-on",
                    "Building it with my own hands",
                    &[(Diploma, 3.0)],
                ),
            ],
        ),
        choice(
            "stream-career-appeal",
            "aspirations",
            "Which of these careers appeals to you most right now?",
            Applicability::Always,
            vec![
                option(
                    "engineer-doctor",
                    "Engineer, doctor or researcher",
                    &[(Science, 3.0)],
                ),
                option(
                    "ca-banker",
                    "Chartered accountant, banker or analyst",
                    &[(Commerce, 3.0)],
                ),
                option(
                    "lawyer-journalist",
                    "Lawyer, journalist or designer",
                    &[(Arts, 3.0)],
                ),
                option(
                    "technician",
                    "Technician or skilled trade professional",
                    &[(Diploma, 3.0)],
                ),
            ],
        ),
        choice(
            "stream-study-horizon",
            "aspirations",
            "How long are you willing to study before starting to earn?",
            Applicability::Always,
            vec![
                option(
                    "long-degree",
                    "Five years or more, including postgraduate study",
                    &[(Science, 2.0), (Arts, 1.0)],
                ),
                option(
                    "standard-degree",
                    "A standard three or four year degree",
                    &[(Commerce, 2.0), (Arts, 1.0)],
                ),
                option(
                    "short-course",
                    "A short job-oriented course",
                    &[(Diploma, 3.0)],
                ),
            ],
        ),
        choice(
            "stream-science-depth",
            "academics",
            "Which part of science excites you more?",
            prior_answer("stream-favourite-subject", "maths-science"),
            vec![
                option(
                    "numbers-machines",
                    "Numbers, machines and how things work",
                    &[(Science, 3.0), (Diploma, 1.0)],
                ),
                option(
                    "living-things",
                    "Living things and how the body works",
                    &[(Science, 3.0)],
                ),
            ],
        ),
        choice(
            "stream-commerce-interest",
            "interests",
            "Which commerce activity sounds most interesting?",
            stream_mentions("commerce"),
            vec![
                option(
                    "markets",
                    "Following markets and investments",
                    &[(Commerce, 3.0)],
                ),
                option(
                    "own-business",
                    "Planning a business of my own",
                    &[(Commerce, 2.0), (Diploma, 1.0)],
                ),
            ],
        ),
        choice(
            "stream-arts-interest",
            "interests",
            "Which arts pursuit would you pick first?",
            Applicability::AnyOf(vec![stream_mentions("art"), stream_mentions("humanities")]),
            vec![
                option("writing", "Writing and storytelling", &[(Arts, 3.0)]),
                option("performing", "Performing or visual arts", &[(Arts, 3.0)]),
            ],
        ),
    ];

    QuestionBank::new(AssessmentKind::Stream, questions)
}

/// Career-field bank for class-12 students.
fn career_bank() -> QuestionBank {
    use Category::{
        Arts, Business, Commerce, Creative, Engineering, Medical, Science, Social,
    };

    let questions = vec![
        choice(
            "career-work-preference",
            "aptitude",
            "What kind of work would you happily do all day?",
            Applicability::Always,
            vec![
                option(
                    "build-systems",
                    "Designing and building systems or software",
                    &[(Engineering, 3.0), (Science, 1.0)],
                ),
                option(
                    "care-people",
                    "Caring for people and solving health problems",
                    &[(Medical, 3.0), (Social, 1.0)],
                ),
                option(
                    "run-numbers",
                    "Working with money, accounts and markets",
                    &[(Commerce, 3.0), (Business, 1.0)],
                ),
                option(
                    "create-content",
                    "Creating stories, designs or performances",
                    &[(Creative, 3.0), (Arts, 1.0)],
                ),
                option(
                    "lead-teams",
                    "Leading teams and growing a venture",
                    &[(Business, 3.0), (Commerce, 1.0)],
                ),
                option(
                    "serve-community",
                    "Teaching or serving the community",
                    &[(Social, 3.0), (Arts, 1.0)],
                ),
            ],
        ),
        marks(
            "career-recent-marks",
            "academics",
            "Enter your most recent percentage in these subjects.",
            Applicability::Always,
            &["Mathematics", "English"],
        ),
        choice(
            "career-problem-style",
            "aptitude",
            "When a hard problem shows up, what is your first instinct?",
            Applicability::Always,
            vec![
                option(
                    "analyse",
                    "Break it down logically and model it",
                    &[(Engineering, 2.0), (Science, 2.0)],
                ),
                option(
                    "research",
                    "Read up and run a careful investigation",
                    &[(Science, 2.0), (Medical, 1.0)],
                ),
                option(
                    "negotiate",
                    "Talk to people and negotiate a way through",
                    &[(Business, 2.0), (Social, 1.0)],
                ),
                option(
                    "imagine",
                    "Sketch ideas until something clicks",
                    &[(Creative, 2.0), (Arts, 1.0)],
                ),
            ],
        ),
        choice(
            "career-motivation",
            "aspirations",
            "What matters most to you in a future career?",
            Applicability::Always,
            vec![
                option(
                    "innovation",
                    "Inventing things that did not exist before",
                    &[(Engineering, 2.0), (Creative, 1.0)],
                ),
                option(
                    "impact",
                    "Directly improving people's lives",
                    &[(Medical, 2.0), (Social, 2.0)],
                ),
                option(
                    "wealth",
                    "Financial growth and ownership",
                    &[(Business, 2.0), (Commerce, 2.0)],
                ),
                option(
                    "expression",
                    "Freedom to express myself",
                    &[(Creative, 2.0), (Arts, 2.0)],
                ),
            ],
        ),
        choice(
            "career-science-track",
            "interests",
            "Inside science, which direction pulls you?",
            Applicability::AnyOf(vec![
                stream_mentions("pcm"),
                stream_mentions("pcb"),
                stream_mentions("science"),
            ]),
            vec![
                option(
                    "machines-code",
                    "Machines, circuits and code",
                    &[(Engineering, 3.0)],
                ),
                option(
                    "medicine-biology",
                    "Medicine and the life sciences",
                    &[(Medical, 3.0)],
                ),
                option(
                    "pure-research",
                    "Pure research and discovery",
                    &[(Science, 3.0)],
                ),
            ],
        ),
        choice(
            "career-commerce-track",
            "interests",
            "Inside commerce, which role fits you best?",
            stream_mentions("commerce"),
            vec![
                option(
                    "audit-finance",
                    "Auditing, taxation and corporate finance",
                    &[(Commerce, 3.0)],
                ),
                option(
                    "startup",
                    "Building and scaling a startup",
                    &[(Business, 3.0)],
                ),
            ],
        ),
        choice(
            "career-arts-track",
            "interests",
            "Inside the humanities, where would you specialise?",
            Applicability::AnyOf(vec![stream_mentions("art"), stream_mentions("humanities")]),
            vec![
                option(
                    "media",
                    "Media, writing and film",
                    &[(Creative, 3.0), (Arts, 1.0)],
                ),
                option(
                    "policy",
                    "Law, policy and public service",
                    &[(Social, 3.0), (Arts, 1.0)],
                ),
            ],
        ),
        choice(
            "career-higher-study",
            "aspirations",
            "Are you open to five or more years of higher study?",
            Applicability::Always,
            vec![
                option(
                    "yes-long",
                    "Yes, as long as it takes",
                    &[(Medical, 2.0), (Science, 1.0)],
                ),
                option(
                    "prefer-short",
                    "I would rather start working sooner",
                    &[(Business, 1.0), (Commerce, 1.0), (Creative, 1.0)],
                ),
            ],
        ),
    ];

    QuestionBank::new(AssessmentKind::Career, questions)
}
