use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Answer, AssessmentKind, Question, QuestionId, QuestionInput, SessionId};
use super::profile::{ProfileStore, StudentProfile};
use super::service::{AssessmentService, ServiceError};
use super::session::Progress;

/// Router builder exposing HTTP endpoints for the assessment flows.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: ProfileStore + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(start_handler::<S>))
        .route(
            "/api/v1/assessments/:session_id/question",
            get(question_handler::<S>),
        )
        .route(
            "/api/v1/assessments/:session_id/answers",
            post(answer_handler::<S>),
        )
        .route(
            "/api/v1/assessments/:session_id/results",
            post(results_handler::<S>),
        )
        .route("/api/v1/profiles", post(save_profile_handler::<S>))
        .route(
            "/api/v1/profiles/current",
            get(current_profile_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartAssessmentRequest {
    pub(crate) kind: AssessmentKind,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionView {
    pub(crate) session_id: SessionId,
    pub(crate) kind: &'static str,
    pub(crate) progress: Progress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) question: Option<QuestionView>,
}

/// Question shape sent to the presentation layer. Option weights are
/// never exposed over the wire.
#[derive(Debug, Serialize)]
pub(crate) struct QuestionView {
    pub(crate) id: QuestionId,
    pub(crate) topic: String,
    pub(crate) prompt: String,
    #[serde(flatten)]
    pub(crate) input: QuestionInputView,
}

#[derive(Debug, Serialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub(crate) enum QuestionInputView {
    SingleChoice { options: Vec<OptionView> },
    SubjectMarks { subjects: Vec<String> },
}

#[derive(Debug, Serialize)]
pub(crate) struct OptionView {
    pub(crate) id: String,
    pub(crate) text: String,
}

impl QuestionView {
    fn from_question(question: Question) -> Self {
        let input = match question.input {
            QuestionInput::SingleChoice { options } => QuestionInputView::SingleChoice {
                options: options
                    .into_iter()
                    .map(|option| OptionView {
                        id: option.id,
                        text: option.text,
                    })
                    .collect(),
            },
            QuestionInput::SubjectMarks { subjects } => {
                QuestionInputView::SubjectMarks { subjects }
            }
        };
        Self {
            id: question.id,
            topic: question.topic,
            prompt: question.prompt,
            input,
        }
    }
}

/// Either a chosen option or a subject-marks map; exactly one must be
/// present.
#[derive(Debug, Deserialize)]
pub(crate) struct AnswerRequest {
    pub(crate) question: QuestionId,
    #[serde(default)]
    pub(crate) option: Option<String>,
    #[serde(default)]
    pub(crate) marks: Option<BTreeMap<String, f64>>,
}

pub(crate) async fn start_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    axum::Json(request): axum::Json<StartAssessmentRequest>,
) -> Response
where
    S: ProfileStore + 'static,
{
    let session = service.start(request.kind);
    let progress = match service.progress(&session.session_id) {
        Ok(progress) => progress,
        Err(err) => return error_response(err),
    };
    let question = match service.current_question(&session.session_id) {
        Ok(question) => question.map(QuestionView::from_question),
        Err(err) => return error_response(err),
    };

    let view = SessionView {
        session_id: session.session_id,
        kind: session.kind.label(),
        progress,
        question,
    };
    (StatusCode::CREATED, axum::Json(view)).into_response()
}

pub(crate) async fn question_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: ProfileStore + 'static,
{
    let id = SessionId(session_id);
    match service.current_question(&id) {
        Ok(Some(question)) => {
            (StatusCode::OK, axum::Json(QuestionView::from_question(question))).into_response()
        }
        Ok(None) => {
            let payload = json!({ "complete": true });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn answer_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<AnswerRequest>,
) -> Response
where
    S: ProfileStore + 'static,
{
    let id = SessionId(session_id);
    let answer = match (request.option, request.marks) {
        (Some(option), None) => Answer::Choice { option },
        (None, Some(marks)) => match serde_json::to_string(&marks) {
            Ok(payload) => Answer::Marks { payload },
            Err(err) => {
                let payload = json!({ "error": err.to_string() });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        },
        _ => {
            let payload = json!({ "error": "provide exactly one of 'option' or 'marks'" });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.submit_answer(&id, request.question, answer) {
        Ok(progress) => (StatusCode::OK, axum::Json(progress)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn results_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: ProfileStore + 'static,
{
    let id = SessionId(session_id);
    match service.results(&id).await {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn save_profile_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    axum::Json(profile): axum::Json<StudentProfile>,
) -> Response
where
    S: ProfileStore + 'static,
{
    match service.save_profile(profile) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn current_profile_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Response
where
    S: ProfileStore + 'static,
{
    match service.current_profile() {
        Ok(Some(profile)) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "no profile saved" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: ServiceError) -> Response {
    let status = match &err {
        ServiceError::UnknownSession(_) => StatusCode::NOT_FOUND,
        ServiceError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Incomplete { .. } => StatusCode::CONFLICT,
        ServiceError::Store(_) | ServiceError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = match &err {
        ServiceError::Incomplete { missing } => json!({
            "error": err.to_string(),
            "missing": missing,
        }),
        _ => json!({ "error": err.to_string() }),
    };
    (status, axum::Json(payload)).into_response()
}
