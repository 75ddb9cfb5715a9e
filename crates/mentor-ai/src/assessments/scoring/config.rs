use serde::{Deserialize, Serialize};

/// Rubric configuration for the weighted-point classifier.
///
/// Thresholds apply to percentage marks in [0, 100]; bonuses are the
/// fixed increments added for profile-derived signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub distinction_threshold: f64,
    pub merit_threshold: f64,
    pub pass_threshold: f64,
    pub distinction_weight: f64,
    pub merit_weight: f64,
    pub pass_weight: f64,
    pub stream_bonus_primary: f64,
    pub stream_bonus_secondary: f64,
    pub interest_bonus: f64,
    pub goal_bonus: f64,
    /// Flat weight applied to broad categories when a marks payload
    /// cannot be parsed; keeps scoring total and never failing.
    pub malformed_marks_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
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
}
