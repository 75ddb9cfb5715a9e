use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use mentor_ai::assessments::{AssessmentKind, ScoringConfig};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn default_scoring_config() -> ScoringConfig {
    ScoringConfig {
        distinction_threshold: 85.0,
        merit_threshold: 75.0,
        pass_threshold: 60.0,
        distinction_weight: 3.0,
        merit_weight: 2.0,
        pass_weight: 1.0,
        stream_bonus_primary: 10.0,
        stream_bonus_secondary: 5.0,
        interest_bonus: 4.0,
        goal_bonus: 3.0,
        malformed_marks_weight: 1.0,
    }
}

pub(crate) fn parse_kind(raw: &str) -> Result<AssessmentKind, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "stream" => Ok(AssessmentKind::Stream),
        "career" => Ok(AssessmentKind::Career),
        other => Err(format!("unknown assessment kind '{other}' (expected 'stream' or 'career')")),
    }
}
