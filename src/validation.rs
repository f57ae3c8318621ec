//! Catalog validation and timetable verification.
//!
//! The generator tolerates malformed catalogs (dangling references are
//! skipped). Callers that want strict input checks run
//! [`validate_catalog`] first. It detects:
//! - Duplicate IDs within and across room pools, and among faculties,
//!   subjects and batches
//! - A subject listed twice by one batch or one faculty
//! - Subject references that do not resolve
//! - Subjects with no weekly sessions
//! - A non-positive faculty daily limit
//! - Classrooms marked as labs and labs marked as classrooms
//! - Taught subjects that no faculty can teach
//! - Taught subjects whose room pool is empty
//! - A calendar without slots
//!
//! [`verify_timetable`] checks a finished timetable against the hard
//! invariants; the generator runs it after every run.

use std::collections::{HashMap, HashSet};

use crate::models::{
    Catalog, Constraints, RoomKind, Timetable, Violation, ViolationType, WeekCalendar,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A batch or faculty references a subject that doesn't exist.
    UnknownSubject,
    /// A subject requires zero sessions per week.
    InvalidWeeklySessions,
    /// A constraint value is out of range.
    InvalidConstraint,
    /// A room sits in the pool of the other kind.
    RoomKindMismatch,
    /// A taught subject has no qualified faculty.
    NoQualifiedFaculty,
    /// A taught subject's room pool is empty.
    NoRoomForKind,
    /// The calendar has no days or no periods.
    EmptyCalendar,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a catalog against a calendar.
///
/// Checks:
/// 1. No duplicate room IDs (classrooms and labs share one namespace)
/// 2. No duplicate faculty, subject or batch IDs, and no subject listed
///    twice by one batch or faculty
/// 3. Classrooms are `Normal`, labs are `Lab`
/// 4. Every subject has at least one weekly session
/// 5. Every subject referenced by a batch or faculty exists
/// 6. Every subject taught to a batch has a qualified faculty and a
///    non-empty room pool
/// 7. The faculty daily limit is positive
/// 8. The calendar has at least one slot
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog, calendar: &WeekCalendar) -> ValidationResult {
    let mut errors = Vec::new();

    let mut room_ids = HashSet::new();
    for r in catalog.rooms.iter().chain(catalog.labs.iter()) {
        if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
    }
    for r in &catalog.rooms {
        if r.kind != RoomKind::Normal {
            errors.push(ValidationError::new(
                ValidationErrorKind::RoomKindMismatch,
                format!("Classroom '{}' is marked as {:?}", r.id, r.kind),
            ));
        }
    }
    for r in &catalog.labs {
        if r.kind != RoomKind::Lab {
            errors.push(ValidationError::new(
                ValidationErrorKind::RoomKindMismatch,
                format!("Lab '{}' is marked as {:?}", r.id, r.kind),
            ));
        }
    }

    check_unique(
        catalog.faculties.iter().map(|f| f.id.as_str()),
        "faculty",
        &mut errors,
    );
    let subject_ids = check_unique(
        catalog.subjects.iter().map(|s| s.id.as_str()),
        "subject",
        &mut errors,
    );
    check_unique(
        catalog.batches.iter().map(|b| b.id.as_str()),
        "batch",
        &mut errors,
    );

    for s in &catalog.subjects {
        if s.weekly_sessions == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeeklySessions,
                format!("Subject '{}' has no weekly sessions", s.id),
            ));
        }
    }

    for f in &catalog.faculties {
        let mut listed = HashSet::new();
        for id in &f.can_teach {
            if !listed.insert(id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Faculty '{}' lists subject '{}' more than once", f.id, id),
                ));
            } else if !subject_ids.contains(id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSubject,
                    format!("Faculty '{}' references unknown subject '{}'", f.id, id),
                ));
            }
        }
    }

    let mut taught: Vec<&str> = Vec::new();
    for b in &catalog.batches {
        let mut listed = HashSet::new();
        for id in &b.subjects {
            if !listed.insert(id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Batch '{}' lists subject '{}' more than once", b.id, id),
                ));
            } else if !subject_ids.contains(id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSubject,
                    format!("Batch '{}' references unknown subject '{}'", b.id, id),
                ));
            } else if !taught.contains(&id.as_str()) {
                taught.push(id);
            }
        }
    }

    for id in taught {
        let Some(subject) = catalog.subject(id) else {
            continue;
        };
        if catalog.qualified_faculties(id).next().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoQualifiedFaculty,
                format!("No faculty can teach subject '{id}'"),
            ));
        }
        if catalog.room_pool(subject.duration()).is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoRoomForKind,
                format!("No room available for {:?} subject '{id}'", subject.kind),
            ));
        }
    }

    if catalog.constraints.max_sessions_per_day_per_faculty == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConstraint,
            "max_sessions_per_day_per_faculty must be positive",
        ));
    }

    if calendar.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyCalendar,
            format!(
                "Calendar has {} day(s) and {} period(s)",
                calendar.day_count(),
                calendar.periods_per_day()
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    ids: impl Iterator<Item = &'a str>,
    what: &str,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {what} ID: {id}"),
            ));
        }
    }
    seen
}

/// Verifies the hard invariants of a timetable.
///
/// Checks:
/// 1. Every entry lies inside the calendar and spans its kind's duration
/// 2. No two entries share a batch, faculty or room in any slot
/// 3. No faculty exceeds the daily limit
///
/// # Returns
/// `Ok(())` if the timetable is sound, `Err(violations)` otherwise.
pub fn verify_timetable(
    timetable: &Timetable,
    constraints: &Constraints,
) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();
    let periods = timetable.calendar.periods_per_day();
    let days = timetable.calendar.day_count();

    for e in &timetable.entries {
        let b = e.block;
        if b.duration != e.kind.duration() {
            violations.push(Violation::invalid_block(
                &e.id,
                format!(
                    "Entry '{}' spans {} period(s), {:?} requires {}",
                    e.id,
                    b.duration,
                    e.kind,
                    e.kind.duration()
                ),
            ));
        }
        if b.day >= days || b.end_period() > periods {
            violations.push(Violation::invalid_block(
                &e.id,
                format!(
                    "Entry '{}' at day {} periods {}..{} leaves the {days}x{periods} grid",
                    e.id,
                    b.day,
                    b.start_period,
                    b.end_period()
                ),
            ));
        }
    }

    // (day, period, resource) -> first entry seen there
    let mut batch_slots: HashMap<(usize, usize, &str), &str> = HashMap::new();
    let mut faculty_slots: HashMap<(usize, usize, &str), &str> = HashMap::new();
    let mut room_slots: HashMap<(usize, usize, &str), &str> = HashMap::new();

    for e in &timetable.entries {
        for p in e.block.start_period..e.block.end_period() {
            let day = e.block.day;
            for (slots, resource, violation_type, label) in [
                (&mut batch_slots, e.batch_id.as_str(), ViolationType::BatchClash, "Batch"),
                (&mut faculty_slots, e.faculty_id.as_str(), ViolationType::FacultyClash, "Faculty"),
                (&mut room_slots, e.room_id.as_str(), ViolationType::RoomClash, "Room"),
            ] {
                if let Some(other) = slots.insert((day, p, resource), e.id.as_str()) {
                    violations.push(Violation::clash(
                        violation_type,
                        resource,
                        format!(
                            "{label} '{resource}' double booked on day {day} period {p} \
                             by '{other}' and '{}'",
                            e.id
                        ),
                    ));
                }
            }
        }
    }

    let max = constraints.max_sessions_per_day_per_faculty;
    let mut loads: Vec<((String, usize), usize)> = timetable.faculty_loads().into_iter().collect();
    loads.sort();
    for ((faculty_id, day), load) in loads {
        if load > max {
            violations.push(Violation::faculty_overload(
                &faculty_id,
                format!("Faculty '{faculty_id}' has {load} periods on day {day}, limit {max}"),
            ));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
