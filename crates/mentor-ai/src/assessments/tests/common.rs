use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::assessments::bank::{Applicability, QuestionBank};
use crate::assessments::domain::{
    Answer, AnswerOption, AssessmentKind, Category, Question, QuestionId, QuestionInput,
};
use crate::assessments::profile::{
    AssessmentRecord, InMemoryProfileStore, ProfileStore, StoreError, StudentProfile,
};
use crate::assessments::router::assessment_router;
use crate::assessments::scoring::{ScoringConfig, ScoringEngine};
use crate::assessments::service::AssessmentService;

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(scoring_config())
}

pub(super) fn profile_with_stream(stream: &str) -> StudentProfile {
    StudentProfile {
        student_id: "stu-001".to_string(),
        name: "Asha Verma".to_string(),
        education_level: "class-10".to_string(),
        stream: Some(stream.to_string()),
        interests: Vec::new(),
        goals: Vec::new(),
        updated_on: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
    }
}

pub(super) fn marks_answer(marks: &[(&str, f64)]) -> Answer {
    let map: BTreeMap<&str, f64> = marks.iter().copied().collect();
    Answer::Marks {
        payload: serde_json::to_string(&map).expect("marks serialize"),
    }
}

pub(super) fn choice_answer(option: &str) -> Answer {
    Answer::Choice {
        option: option.to_string(),
    }
}

fn weighted_option(id: &str, weights: &[(Category, f64)]) -> AnswerOption {
    AnswerOption {
        id: id.to_string(),
        text: format!("option {id}"),
        weights: weights.to_vec(),
    }
}

fn single_choice(id: &str, options: Vec<AnswerOption>) -> Question {
    Question {
        id: QuestionId::new(id),
        topic: "fixture".to_string(),
        prompt: format!("fixture question {id}"),
        input: QuestionInput::SingleChoice { options },
        applicability: Applicability::Always,
    }
}

/// Two-question stream bank matching the documented worked example:
/// Q1 option-a weights science=3, commerce=1, diploma=1 and Q2
/// option-b weights commerce=3, arts=1, diploma=2.
pub(super) fn worked_example_bank() -> QuestionBank {
    use Category::{Arts, Commerce, Diploma, Science};

    QuestionBank::new(
        AssessmentKind::Stream,
        vec![
            single_choice(
                "q1",
                vec![
                    weighted_option("a", &[(Science, 3.0), (Commerce, 1.0), (Diploma, 1.0)]),
                    weighted_option("b", &[(Arts, 2.0)]),
                ],
            ),
            single_choice(
                "q2",
                vec![
                    weighted_option("a", &[(Science, 1.0)]),
                    weighted_option("b", &[(Commerce, 3.0), (Arts, 1.0), (Diploma, 2.0)]),
                ],
            ),
        ],
    )
}

pub(super) fn build_service() -> (
    Arc<AssessmentService<InMemoryProfileStore>>,
    Arc<InMemoryProfileStore>,
) {
    let store = Arc::new(InMemoryProfileStore::new());
    let service = AssessmentService::new(store.clone(), scoring_config())
        .expect("catalog validates for the standard banks");
    (Arc::new(service), store)
}

pub(super) fn router_with_service(
    service: Arc<AssessmentService<InMemoryProfileStore>>,
) -> axum::Router {
    assessment_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Store whose every operation fails, for degradation tests.
pub(super) struct UnavailableStore;

impl ProfileStore for UnavailableStore {
    fn current(&self) -> Result<Option<StudentProfile>, StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }

    fn save(&self, _profile: StudentProfile) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }

    fn list(&self) -> Result<Vec<StudentProfile>, StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }

    fn append_history(&self, _record: AssessmentRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }

    fn history(&self, _student_id: &str) -> Result<Vec<AssessmentRecord>, StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }
}
