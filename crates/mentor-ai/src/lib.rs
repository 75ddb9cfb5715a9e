//! Rule-based career and stream guidance assessments for students.
//!
//! The crate's core is the [`assessments`] module: question banks with
//! conditional applicability, a weighted-point scoring engine, ranking
//! with normalization and a confidence tier, and static recommendation
//! enrichment, exposed through a service facade and an axum router.

pub mod assessments;
pub mod config;
pub mod error;
pub mod telemetry;
