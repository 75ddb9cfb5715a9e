use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::bank::QuestionBank;
use super::domain::{Answer, AssessmentKind, Question, QuestionId, SessionId};
use super::enrichment::{CatalogError, Recommendation, RecommendationCatalog};
use super::profile::{AssessmentRecord, ProfileStore, StoreError, StudentProfile};
use super::ranking::{rank, Confidence};
use super::scoring::{ScoringConfig, ScoringEngine};
use super::session::{AnswerRejection, AssessmentSession, Progress};

/// Error raised by the assessment service facade.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("assessment session '{0}' was not found")]
    UnknownSession(SessionId),
    #[error(transparent)]
    Rejected(#[from] AnswerRejection),
    #[error("assessment is incomplete: {} question(s) unanswered", missing.len())]
    Incomplete { missing: Vec<QuestionId> },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Final display-ready payload for a completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub session_id: SessionId,
    pub kind: AssessmentKind,
    pub confidence: Confidence,
    pub recommendations: Vec<Recommendation>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("sess-{id:06}"))
}

/// Facade composing the question banks, scoring engine, ranking and
/// recommendation catalog over a profile store collaborator.
pub struct AssessmentService<S> {
    store: Arc<S>,
    engine: ScoringEngine,
    catalog: RecommendationCatalog,
    stream_bank: QuestionBank,
    career_bank: QuestionBank,
    sessions: Mutex<HashMap<SessionId, AssessmentSession>>,
    processing_delay: Duration,
}

impl<S> AssessmentService<S>
where
    S: ProfileStore + 'static,
{
    /// Build the service, validating the recommendation catalog for
    /// both variants up front so a missing record can never surface at
    /// request time.
    pub fn new(store: Arc<S>, config: ScoringConfig) -> Result<Self, CatalogError> {
        let catalog = RecommendationCatalog::standard();
        catalog.validate(AssessmentKind::Stream)?;
        catalog.validate(AssessmentKind::Career)?;

        Ok(Self {
            store,
            engine: ScoringEngine::new(config),
            catalog,
            stream_bank: QuestionBank::for_kind(AssessmentKind::Stream),
            career_bank: QuestionBank::for_kind(AssessmentKind::Career),
            sessions: Mutex::new(HashMap::new()),
            processing_delay: Duration::ZERO,
        })
    }

    /// Simulated processing delay applied before results are computed.
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    pub fn bank(&self, kind: AssessmentKind) -> &QuestionBank {
        match kind {
            AssessmentKind::Stream => &self.stream_bank,
            AssessmentKind::Career => &self.career_bank,
        }
    }

    /// Start a session, snapshotting the current profile as an
    /// optional signal. A failing store read degrades to no profile.
    pub fn start(&self, kind: AssessmentKind) -> AssessmentSession {
        let profile = match self.store.current() {
            Ok(profile) => profile,
            Err(err) => {
                warn!(%err, "profile store read failed, starting without profile");
                None
            }
        };

        let session = AssessmentSession::new(
            next_session_id(),
            kind,
            profile,
            Utc::now().date_naive(),
        );
        info!(session = %session.session_id, kind = kind.label(), "assessment started");

        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.insert(session.session_id.clone(), session.clone());
        session
    }

    fn with_session<T>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut AssessmentSession) -> T,
    ) -> Result<T, ServiceError> {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| ServiceError::UnknownSession(id.clone()))?;
        Ok(f(session))
    }

    /// The current question for a session, or `None` once complete.
    pub fn current_question(&self, id: &SessionId) -> Result<Option<Question>, ServiceError> {
        self.with_session(id, |session| {
            let bank = match session.kind {
                AssessmentKind::Stream => &self.stream_bank,
                AssessmentKind::Career => &self.career_bank,
            };
            session.current_question(bank).cloned()
        })
    }

    pub fn progress(&self, id: &SessionId) -> Result<Progress, ServiceError> {
        self.with_session(id, |session| {
            let bank = match session.kind {
                AssessmentKind::Stream => &self.stream_bank,
                AssessmentKind::Career => &self.career_bank,
            };
            session.progress(bank)
        })
    }

    /// Validate and record one answer, returning the updated progress.
    pub fn submit_answer(
        &self,
        id: &SessionId,
        question: QuestionId,
        answer: Answer,
    ) -> Result<Progress, ServiceError> {
        self.with_session(id, |session| {
            let bank = match session.kind {
                AssessmentKind::Stream => &self.stream_bank,
                AssessmentKind::Career => &self.career_bank,
            };
            session.submit(bank, question, answer)?;
            Ok(session.progress(bank))
        })?
    }

    /// Compute the ranked, enriched report for a completed session.
    ///
    /// The simulated processing delay runs with no locks held and no
    /// state mutated, so cancelling the future commits nothing. The
    /// computation itself is pure; calling this twice on the same
    /// session yields the same report.
    pub async fn results(&self, id: &SessionId) -> Result<AssessmentReport, ServiceError> {
        let (kind, profile, answers) = {
            let sessions = self.sessions.lock().expect("session mutex poisoned");
            let session = sessions
                .get(id)
                .ok_or_else(|| ServiceError::UnknownSession(id.clone()))?;
            let bank = self.bank(session.kind);
            let missing = session.missing(bank);
            if !missing.is_empty() {
                return Err(ServiceError::Incomplete { missing });
            }
            (
                session.kind,
                session.profile.clone(),
                session.answers().clone(),
            )
        };

        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }

        let bank = self.bank(kind);
        let vector = self.engine.score(profile.as_ref(), bank, &answers);
        let ranking = rank(&vector);
        let recommendations = self.catalog.enrich(&ranking)?;

        let report = AssessmentReport {
            session_id: id.clone(),
            kind,
            confidence: ranking.confidence,
            recommendations,
        };

        let first_completion = {
            let mut sessions = self.sessions.lock().expect("session mutex poisoned");
            sessions
                .get_mut(id)
                .map(AssessmentSession::mark_report_recorded)
                .unwrap_or(false)
        };

        if first_completion {
            if let Some(top) = report.recommendations.first() {
                let record = AssessmentRecord {
                    student_id: profile.map(|profile| profile.student_id),
                    kind,
                    taken_on: Utc::now().date_naive(),
                    top_category: top.result.category,
                    confidence: report.confidence,
                    results: ranking.results.clone(),
                };
                // History is a collaborator, not a gate; results still return.
                if let Err(err) = self.store.append_history(record) {
                    warn!(session = %id, %err, "failed to persist assessment history");
                }
            }
        }

        info!(
            session = %id,
            kind = kind.label(),
            confidence = report.confidence.label(),
            "assessment report computed"
        );
        Ok(report)
    }

    pub fn save_profile(&self, profile: StudentProfile) -> Result<(), ServiceError> {
        self.store.save(profile)?;
        Ok(())
    }

    pub fn current_profile(&self) -> Result<Option<StudentProfile>, ServiceError> {
        Ok(self.store.current()?)
    }
}
