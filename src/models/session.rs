//! Lecture session model.
//!
//! A session is one required weekly occurrence of a subject for a batch:
//! the atomic unit of scheduling. Sessions are derived from the catalog
//! once per run and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::SubjectKind;

/// One required weekly occurrence of a subject for a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LectureSession {
    /// Session identifier, `"{batch}-{subject}-{occurrence}"`.
    pub id: String,
    /// Batch attending the session.
    pub batch_id: String,
    /// Subject being taught.
    pub subject_id: String,
    /// Subject kind (denormalized for room-pool selection).
    pub kind: SubjectKind,
    /// Zero-based occurrence index within the week.
    pub occurrence: u32,
    /// The subject's weekly session count (denormalized for prioritization).
    pub weekly_sessions: u32,
    /// Consecutive periods the session occupies.
    pub duration: usize,
}

impl LectureSession {
    /// Creates a session. Duration follows from the subject kind.
    pub fn new(
        batch_id: impl Into<String>,
        subject_id: impl Into<String>,
        kind: SubjectKind,
        occurrence: u32,
    ) -> Self {
        let batch_id = batch_id.into();
        let subject_id = subject_id.into();
        Self {
            id: format!("{batch_id}-{subject_id}-{occurrence}"),
            batch_id,
            subject_id,
            kind,
            occurrence,
            weekly_sessions: 1,
            duration: kind.duration(),
        }
    }

    /// Sets the weekly session count.
    pub fn with_weekly_sessions(mut self, weekly_sessions: u32) -> Self {
        self.weekly_sessions = weekly_sessions;
        self
    }

    /// Deterministic ordering key: batch ID, subject ID, occurrence.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.batch_id
            .cmp(&other.batch_id)
            .then_with(|| self.subject_id.cmp(&other.subject_id))
            .then_with(|| self.occurrence.cmp(&other.occurrence))
    }
}
