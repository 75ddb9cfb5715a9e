//! Career and stream guidance assessments.
//!
//! The flow mirrors the student-facing product: a question bank is
//! filtered by applicability, answers accumulate in a sheet, and on
//! completion the scoring engine, ranking and recommendation catalog
//! turn the sheet into a display-ready report.

pub mod bank;
pub mod domain;
pub mod enrichment;
pub mod profile;
pub mod ranking;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use bank::{Applicability, QuestionBank};
pub use domain::{
    Answer, AnswerOption, AnswerSheet, AssessmentKind, Category, Question, QuestionId,
    QuestionInput, ScoreVector, SessionId,
};
pub use enrichment::{CatalogError, Recommendation, RecommendationCatalog, RecommendationRecord};
pub use profile::{
    AssessmentRecord, InMemoryProfileStore, ProfileStore, StoreError, StudentProfile,
};
pub use ranking::{rank, Confidence, RankedResult, Ranking};
pub use router::assessment_router;
pub use scoring::{ScoringConfig, ScoringEngine};
pub use service::{AssessmentReport, AssessmentService, ServiceError};
pub use session::{AnswerRejection, AssessmentSession, Progress};
