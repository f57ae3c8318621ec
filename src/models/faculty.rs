//! Faculty model.

use serde::{Deserialize, Serialize};

/// A faculty member who can teach a set of subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning department (informational).
    pub department: String,
    /// Subject IDs this faculty is qualified to teach.
    pub can_teach: Vec<String>,
}

impl Faculty {
    /// Creates a new faculty with no qualifications.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department: String::new(),
            can_teach: Vec::new(),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Adds a teachable subject. Repeated IDs are ignored.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        let subject_id = subject_id.into();
        if !self.can_teach.contains(&subject_id) {
            self.can_teach.push(subject_id);
        }
        self
    }

    /// Adds several teachable subjects.
    pub fn with_subjects<I, S>(self, subject_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        subject_ids
            .into_iter()
            .fold(self, |faculty, id| faculty.with_subject(id))
    }

    /// Whether this faculty may teach the given subject.
    pub fn can_teach(&self, subject_id: &str) -> bool {
        self.can_teach.iter().any(|s| s == subject_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faculty_builder() {
        let f = Faculty::new("F001")
            .with_name("Dr. Alan Grant")
            .with_department("Computer Science")
            .with_subjects(["CS101", "CS201L"]);

        assert_eq!(f.id, "F001");
        assert_eq!(f.department, "Computer Science");
        assert!(f.can_teach("CS101"));
        assert!(f.can_teach("CS201L"));
        assert!(!f.can_teach("MAT101"));
    }

    #[test]
    fn test_duplicate_subjects_collapsed() {
        let f = Faculty::new("F1").with_subjects(["A", "B", "A"]);
        assert_eq!(f.can_teach, vec!["A".to_string(), "B".to_string()]);
    }
}
