use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentKind, Category};
use super::ranking::{Confidence, RankedResult};

/// Stored student attributes consumed as optional scoring signals.
///
/// Fields are persisted plaintext-equivalent; credential handling and
/// authentication are explicitly out of scope for this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: String,
    pub name: String,
    /// e.g. "class-10" or "class-12".
    pub education_level: String,
    /// Declared stream or education track, free text (e.g. "Science (PCM)").
    pub stream: Option<String>,
    /// Free-text interest keywords.
    pub interests: Vec<String>,
    /// Free-text goal keywords.
    pub goals: Vec<String>,
    pub updated_on: NaiveDate,
}

/// Completed-assessment snapshot appended to a student's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub student_id: Option<String>,
    pub kind: AssessmentKind,
    pub taken_on: NaiveDate,
    pub top_category: Category,
    pub confidence: Confidence,
    pub results: Vec<RankedResult>,
}

/// Error enumeration for profile store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("stored record could not be decoded: {0}")]
    Corrupt(String),
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction so the assessment service can be exercised in
/// isolation. Exactly one writer is assumed; no locking discipline
/// beyond interior mutability is required of implementations.
pub trait ProfileStore: Send + Sync {
    fn current(&self) -> Result<Option<StudentProfile>, StoreError>;
    fn save(&self, profile: StudentProfile) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<StudentProfile>, StoreError>;
    fn append_history(&self, record: AssessmentRecord) -> Result<(), StoreError>;
    fn history(&self, student_id: &str) -> Result<Vec<AssessmentRecord>, StoreError>;
}

/// In-memory store keeping each logical record as a plain JSON blob,
/// matching the opaque key-value contract of the persistence layer.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<BTreeMap<String, String>>,
    current_id: Mutex<Option<String>>,
    records: Mutex<Vec<String>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn current(&self) -> Result<Option<StudentProfile>, StoreError> {
        let current_id = self.current_id.lock().expect("profile store mutex poisoned");
        let Some(id) = current_id.as_ref() else {
            return Ok(None);
        };
        let profiles = self.profiles.lock().expect("profile store mutex poisoned");
        match profiles.get(id) {
            Some(blob) => serde_json::from_str(blob)
                .map(Some)
                .map_err(|err| StoreError::Corrupt(err.to_string())),
            None => Ok(None),
        }
    }

    fn save(&self, profile: StudentProfile) -> Result<(), StoreError> {
        let blob =
            serde_json::to_string(&profile).map_err(|err| StoreError::Corrupt(err.to_string()))?;
        let id = profile.student_id.clone();
        self.profiles
            .lock()
            .expect("profile store mutex poisoned")
            .insert(id.clone(), blob);
        *self.current_id.lock().expect("profile store mutex poisoned") = Some(id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<StudentProfile>, StoreError> {
        let profiles = self.profiles.lock().expect("profile store mutex poisoned");
        profiles
            .values()
            .map(|blob| {
                serde_json::from_str(blob).map_err(|err| StoreError::Corrupt(err.to_string()))
            })
            .collect()
    }

    fn append_history(&self, record: AssessmentRecord) -> Result<(), StoreError> {
        let blob =
            serde_json::to_string(&record).map_err(|err| StoreError::Corrupt(err.to_string()))?;
        self.records
            .lock()
            .expect("profile store mutex poisoned")
            .push(blob);
        Ok(())
    }

    fn history(&self, student_id: &str) -> Result<Vec<AssessmentRecord>, StoreError> {
        let records = self.records.lock().expect("profile store mutex poisoned");
        let mut matching = Vec::new();
        for blob in records.iter() {
            let record: AssessmentRecord =
                serde_json::from_str(blob).map_err(|err| StoreError::Corrupt(err.to_string()))?;
            if record.student_id.as_deref() == Some(student_id) {
                matching.push(record);
            }
        }
        Ok(matching)
    }
}
