//! Student batch model.

use serde::{Deserialize, Serialize};

/// A cohort of students following a common list of subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Unique batch identifier.
    pub id: String,
    /// Display name (e.g., "CSE Sem 3 - Div A").
    pub name: String,
    /// Subject IDs in this batch's curriculum.
    pub subjects: Vec<String>,
}

impl Batch {
    /// Creates a batch with an empty curriculum.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subjects: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a subject to the curriculum. Repeated IDs are ignored.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        let subject_id = subject_id.into();
        if !self.subjects.contains(&subject_id) {
            self.subjects.push(subject_id);
        }
        self
    }

    /// Adds several subjects.
    pub fn with_subjects<I, S>(self, subject_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        subject_ids
            .into_iter()
            .fold(self, |batch, id| batch.with_subject(id))
    }
}
