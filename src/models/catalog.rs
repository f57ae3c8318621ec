//! Catalog snapshot and constraints.
//!
//! The catalog is the read-only input of a generation run: classrooms,
//! labs, faculties, subjects, batches and the capacity constraints.
//! The generator never mutates it and tolerates dangling references.

use serde::{Deserialize, Serialize};

use super::{Batch, Faculty, Room, Subject};

/// Hard limits applied during placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    /// Maximum occupied periods per faculty per day.
    pub max_sessions_per_day_per_faculty: usize,
}

impl Constraints {
    /// Creates constraints with the given faculty daily limit.
    pub fn new(max_sessions_per_day_per_faculty: usize) -> Self {
        Self {
            max_sessions_per_day_per_faculty,
        }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::new(5)
    }
}

/// An immutable snapshot of everything the generator needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Normal classrooms (theory sessions).
    pub rooms: Vec<Room>,
    /// Lab rooms (lab sessions).
    pub labs: Vec<Room>,
    /// Teaching staff.
    pub faculties: Vec<Faculty>,
    /// Curriculum subjects.
    pub subjects: Vec<Subject>,
    /// Student batches.
    pub batches: Vec<Batch>,
    /// Placement limits.
    pub constraints: Constraints,
}

impl Catalog {
    /// Creates an empty catalog with default constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a classroom.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a lab.
    pub fn with_lab(mut self, lab: Room) -> Self {
        self.labs.push(lab);
        self
    }

    /// Adds a faculty.
    pub fn with_faculty(mut self, faculty: Faculty) -> Self {
        self.faculties.push(faculty);
        self
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Adds a batch.
    pub fn with_batch(mut self, batch: Batch) -> Self {
        self.batches.push(batch);
        self
    }

    /// Replaces the constraints.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the faculty daily limit.
    pub fn with_max_sessions_per_day(mut self, max: usize) -> Self {
        self.constraints.max_sessions_per_day_per_faculty = max;
        self
    }

    /// First subject with the given ID.
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// First batch with the given ID.
    pub fn batch(&self, id: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id == id)
    }

    /// First faculty with the given ID.
    pub fn faculty(&self, id: &str) -> Option<&Faculty> {
        self.faculties.iter().find(|f| f.id == id)
    }

    /// First classroom or lab with the given ID.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms
            .iter()
            .chain(self.labs.iter())
            .find(|r| r.id == id)
    }

    /// Faculties qualified for a subject, in catalog order.
    pub fn qualified_faculties<'a>(
        &'a self,
        subject_id: &'a str,
    ) -> impl Iterator<Item = &'a Faculty> + 'a {
        self.faculties.iter().filter(move |f| f.can_teach(subject_id))
    }

    /// Room pool for a session of the given duration: labs for
    /// multi-period sessions, classrooms otherwise.
    pub fn room_pool(&self, duration: usize) -> &[Room] {
        if duration > 1 {
            &self.labs
        } else {
            &self.rooms
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! The sample institute used across tests.

    use super::*;

    pub(crate) fn demo_catalog() -> Catalog {
        let all = [
            "CS101", "CS201L", "PHY101L", "MAT101", "CS102", "CHM101", "CHM101L",
        ];
        let curriculum = [
            "CS101", "CS201L", "PHY101", "PHY101L", "MAT101", "CS102", "CHM101", "CHM101L",
        ];

        Catalog::new()
            .with_room(Room::classroom("C101").with_name("Classroom 101").with_capacity(60))
            .with_room(Room::classroom("C102").with_name("Classroom 102").with_capacity(60))
            .with_room(Room::classroom("C201").with_name("Classroom 201").with_capacity(60))
            .with_lab(Room::lab("L301").with_name("Computer Lab 1").with_capacity(40))
            .with_lab(Room::lab("L302").with_name("Physics Lab").with_capacity(30))
            .with_lab(Room::lab("L303").with_name("Chemistry Lab").with_capacity(30))
            .with_faculty(
                Faculty::new("F001")
                    .with_name("Dr. Alan Grant")
                    .with_department("Computer Science")
                    .with_subjects(all),
            )
            .with_faculty(
                Faculty::new("F002")
                    .with_name("Dr. Ellie Sattler")
                    .with_department("Physics")
                    .with_subjects(all),
            )
            .with_faculty(
                Faculty::new("F003")
                    .with_name("Dr. Ian Malcolm")
                    .with_department("Mathematics")
                    .with_subjects(all),
            )
            .with_subject(
                Subject::theory("CS101")
                    .with_name("Intro to Programming")
                    .with_weekly_sessions(4),
            )
            .with_subject(
                Subject::lab("CS201L")
                    .with_name("Data Structures Lab")
                    .with_weekly_sessions(2),
            )
            .with_subject(
                Subject::theory("PHY101")
                    .with_name("Mechanics")
                    .with_weekly_sessions(3),
            )
            .with_subject(
                Subject::lab("PHY101L")
                    .with_name("Mechanics Lab")
                    .with_weekly_sessions(2),
            )
            .with_subject(
                Subject::theory("MAT101")
                    .with_name("Calculus I")
                    .with_weekly_sessions(4),
            )
            .with_subject(
                Subject::theory("CS102")
                    .with_name("Web Development")
                    .with_weekly_sessions(3),
            )
            .with_subject(
                Subject::theory("CHM101")
                    .with_name("General Chemistry")
                    .with_weekly_sessions(3),
            )
            .with_subject(
                Subject::lab("CHM101L")
                    .with_name("Chemistry Lab")
                    .with_weekly_sessions(1),
            )
            .with_batch(
                Batch::new("B01-A")
                    .with_name("CSE Sem 3 - Div A")
                    .with_subjects(curriculum),
            )
            .with_batch(
                Batch::new("B01-B")
                    .with_name("CSE Sem 3 - Div B")
                    .with_subjects(curriculum),
            )
            .with_max_sessions_per_day(5)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::demo_catalog;
    use super::*;

    #[test]
    fn test_lookups() {
        let c = demo_catalog();
        assert_eq!(c.subject("CS101").map(|s| s.name.as_str()), Some("Intro to Programming"));
        assert!(c.subject("NOPE").is_none());
        assert_eq!(c.batch("B01-B").map(|b| b.subjects.len()), Some(8));
        assert_eq!(c.faculty("F002").map(|f| f.department.as_str()), Some("Physics"));
        assert!(c.room("C101").is_some());
        assert!(c.room("L303").is_some());
        assert!(c.room("X").is_none());
    }

    #[test]
    fn test_qualified_faculties() {
        let c = demo_catalog();
        assert_eq!(c.qualified_faculties("CS101").count(), 3);
        // PHY101 is in the curriculum but nobody teaches it.
        assert_eq!(c.qualified_faculties("PHY101").count(), 0);
    }

    #[test]
    fn test_room_pool() {
        let c = demo_catalog();
        assert!(c.room_pool(1).iter().all(|r| !r.is_lab()));
        assert!(c.room_pool(2).iter().all(|r| r.is_lab()));
    }

    #[test]
    fn test_catalog_from_json() {
        let json = serde_json::json!({
            "rooms": [{ "id": "C101", "name": "Classroom 101", "kind": "Normal", "capacity": 60 }],
            "labs": [{ "id": "L301", "name": "Computer Lab 1", "kind": "Lab", "capacity": 40 }],
            "faculties": [{
                "id": "F001",
                "name": "Dr. Alan Grant",
                "department": "Computer Science",
                "can_teach": ["CS101"]
            }],
            "subjects": [{
                "id": "CS101",
                "name": "Intro",
                "kind": "Theory",
                "weekly_sessions": 2
            }],
            "batches": [{ "id": "B1", "name": "Batch 1", "subjects": ["CS101", "GHOST"] }],
            "constraints": { "max_sessions_per_day_per_faculty": 4 }
        });

        let catalog: Catalog = serde_json::from_value(json).unwrap();
        assert_eq!(catalog.rooms.len(), 1);
        assert!(catalog.labs[0].is_lab());
        assert_eq!(catalog.constraints.max_sessions_per_day_per_faculty, 4);
        assert_eq!(catalog.batches[0].subjects, vec!["CS101", "GHOST"]);
    }
}
