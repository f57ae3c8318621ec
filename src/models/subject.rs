//! Subject model.
//!
//! A subject is taught a fixed number of times per week. Its kind decides
//! how long each session lasts and which room pool it draws from.

use serde::{Deserialize, Serialize};

/// Periods occupied by a single theory session.
pub const THEORY_DURATION: usize = 1;

/// Periods occupied by a single lab session.
pub const LAB_DURATION: usize = 2;

/// A subject in the curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Theory or lab.
    pub kind: SubjectKind,
    /// Required sessions per week (at least 1 for a meaningful subject).
    pub weekly_sessions: u32,
}

/// Subject classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    /// Single-period lecture held in a classroom.
    Theory,
    /// Two-period practical held in a lab.
    Lab,
}

impl SubjectKind {
    /// Number of consecutive periods a session of this kind occupies.
    #[inline]
    pub fn duration(self) -> usize {
        match self {
            SubjectKind::Theory => THEORY_DURATION,
            SubjectKind::Lab => LAB_DURATION,
        }
    }
}

impl Subject {
    /// Creates a new subject with one weekly session.
    pub fn new(id: impl Into<String>, kind: SubjectKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            weekly_sessions: 1,
        }
    }

    /// Creates a theory subject.
    pub fn theory(id: impl Into<String>) -> Self {
        Self::new(id, SubjectKind::Theory)
    }

    /// Creates a lab subject.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, SubjectKind::Lab)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the weekly session count.
    pub fn with_weekly_sessions(mut self, weekly_sessions: u32) -> Self {
        self.weekly_sessions = weekly_sessions;
        self
    }

    /// Periods per session.
    #[inline]
    pub fn duration(&self) -> usize {
        self.kind.duration()
    }

    /// Total periods this subject needs per batch per week.
    pub fn weekly_units(&self) -> usize {
        self.weekly_sessions as usize * self.duration()
    }
}
