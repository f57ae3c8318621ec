//! Greedy score-based timetable generator.
//!
//! # Algorithm
//!
//! 1. Expand the catalog into lecture sessions.
//! 2. Sort sessions with the rule engine (longest, most frequent first).
//! 3. For each session, search every feasible (day, start, faculty, room)
//!    and commit the best-scoring one, or record the session as
//!    unscheduled.
//! 4. Verify the finished timetable against the hard invariants.
//!
//! Commitments are final: no later session can evict an earlier one.
//!
//! # Complexity
//! O(S · D · P · F · R) where S=sessions, D=days, P=periods, F=qualified
//! faculties, R=rooms in the pool.
//!
//! # Reference
//! Burke & Petrovic (2002), "Recent research directions in automated
//! timetabling", greedy constructive heuristics.

use std::collections::HashMap;

use log::{debug, info, warn};

use super::expansion::expand_sessions;
use super::occupancy::Occupancy;
use super::search::best_candidate;
use crate::dispatching::{PriorityContext, RuleEngine};
use crate::error::{GenerationError, GenerationResult};
use crate::models::{
    Block, Catalog, Faculty, LectureSession, Room, Timetable, TimetableEntry, WeekCalendar,
};
use crate::validation::verify_timetable;

/// Input container for a generation run.
#[derive(Debug, Clone)]
pub struct TimetableRequest {
    /// Catalog snapshot.
    pub catalog: Catalog,
    /// Teaching grid.
    pub calendar: WeekCalendar,
}

impl TimetableRequest {
    /// Creates a request on the default calendar.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            calendar: WeekCalendar::default(),
        }
    }

    /// Sets the calendar.
    pub fn with_calendar(mut self, calendar: WeekCalendar) -> Self {
        self.calendar = calendar;
        self
    }
}

/// Greedy, deterministic timetable generator.
///
/// Holds configuration only; every call to [`generate`](Self::generate)
/// starts from an empty grid.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Batch, Catalog, Faculty, Room, Subject};
/// use u_timetable::scheduler::TimetableGenerator;
///
/// let catalog = Catalog::new()
///     .with_room(Room::classroom("C101"))
///     .with_faculty(Faculty::new("F001").with_subject("CS101"))
///     .with_subject(Subject::theory("CS101").with_weekly_sessions(2))
///     .with_batch(Batch::new("B01").with_subject("CS101"));
///
/// let timetable = TimetableGenerator::new().generate(&catalog).unwrap();
/// assert_eq!(timetable.entry_count(), 2);
/// assert_eq!(timetable.unscheduled_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableGenerator {
    calendar: WeekCalendar,
    rule_engine: RuleEngine,
}

impl TimetableGenerator {
    /// Creates a generator with the default calendar and rule engine.
    pub fn new() -> Self {
        Self {
            calendar: WeekCalendar::default(),
            rule_engine: RuleEngine::timetabling(),
        }
    }

    /// Sets the calendar.
    pub fn with_calendar(mut self, calendar: WeekCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the rule engine used for session ordering.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// The configured calendar.
    pub fn calendar(&self) -> &WeekCalendar {
        &self.calendar
    }

    /// Generates a timetable for the catalog.
    ///
    /// Sessions without a feasible placement end up in
    /// [`Timetable::unscheduled`]; that is not an error. An error means the
    /// run hit an internal defect and no timetable is returned.
    pub fn generate(&self, catalog: &Catalog) -> GenerationResult<Timetable> {
        let sessions = expand_sessions(catalog);
        let context = PriorityContext::from_catalog(catalog);
        let ordered = self.rule_engine.sort(sessions, &context);

        info!(
            "Generating timetable: {} sessions, {} days x {} periods",
            ordered.len(),
            self.calendar.day_count(),
            self.calendar.periods_per_day()
        );

        let mut run = Run::new(catalog, &self.calendar);
        for session in ordered {
            run.place(session)?;
        }
        let timetable = run.finish();

        verify_timetable(&timetable, &catalog.constraints)
            .map_err(GenerationError::InvariantViolated)?;

        info!(
            "Timetable generated: {} entries placed, {} sessions unscheduled",
            timetable.entry_count(),
            timetable.unscheduled_count()
        );
        Ok(timetable)
    }

    /// Generates from a request, using the request's calendar.
    pub fn generate_request(&self, request: &TimetableRequest) -> GenerationResult<Timetable> {
        let generator = Self {
            calendar: request.calendar.clone(),
            rule_engine: self.rule_engine.clone(),
        };
        generator.generate(&request.catalog)
    }
}

impl Default for TimetableGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// State of one run: the grid, the entries committed so far and the
/// candidate pools, all dropped when the run ends.
struct Run<'c> {
    catalog: &'c Catalog,
    occupancy: Occupancy,
    timetable: Timetable,
    classrooms: Vec<&'c Room>,
    labs: Vec<&'c Room>,
    faculty_pools: HashMap<&'c str, Vec<&'c Faculty>>,
}

impl<'c> Run<'c> {
    fn new(catalog: &'c Catalog, calendar: &WeekCalendar) -> Self {
        Self {
            catalog,
            occupancy: Occupancy::new(calendar),
            timetable: Timetable::new(calendar.clone()),
            classrooms: sorted_by_id(&catalog.rooms),
            labs: sorted_by_id(&catalog.labs),
            faculty_pools: HashMap::new(),
        }
    }

    fn faculty_pool(&mut self, subject_id: &str) -> Vec<&'c Faculty> {
        let catalog = self.catalog;
        if let Some(pool) = self.faculty_pools.get(subject_id) {
            return pool.clone();
        }
        let Some(subject) = catalog.subject(subject_id) else {
            return Vec::new();
        };
        let mut pool: Vec<&'c Faculty> = catalog.qualified_faculties(&subject.id).collect();
        pool.sort_by(|a, b| a.id.cmp(&b.id));
        self.faculty_pools.insert(subject.id.as_str(), pool.clone());
        pool
    }

    fn place(&mut self, session: LectureSession) -> GenerationResult<()> {
        let faculties = self.faculty_pool(&session.subject_id);
        let rooms = if session.duration > 1 {
            &self.labs
        } else {
            &self.classrooms
        };
        let max_load = self.catalog.constraints.max_sessions_per_day_per_faculty;

        match best_candidate(&session, &faculties, rooms, &self.occupancy, max_load) {
            Some(c) => {
                let block = Block::new(c.day, c.start_period, session.duration);
                self.commit(&session, block, c.faculty, c.room)?;
                debug!(
                    "Placed {} on day {} period {} with {} in {} (score {})",
                    session.id, c.day, c.start_period, c.faculty.id, c.room.id, c.score
                );
            }
            None => {
                warn!("No feasible placement for session {}", session.id);
                self.timetable.add_unscheduled(session);
            }
        }
        Ok(())
    }

    fn commit(
        &mut self,
        session: &LectureSession,
        block: Block,
        faculty: &Faculty,
        room: &Room,
    ) -> GenerationResult<()> {
        let subject = self.catalog.subject(&session.subject_id).ok_or_else(|| {
            GenerationError::Internal(format!(
                "subject '{}' of session {} disappeared from the catalog",
                session.subject_id, session.id
            ))
        })?;
        let batch = self.catalog.batch(&session.batch_id).ok_or_else(|| {
            GenerationError::Internal(format!(
                "batch '{}' of session {} disappeared from the catalog",
                session.batch_id, session.id
            ))
        })?;

        self.occupancy
            .commit(block, &batch.id, &faculty.id, &room.id)
            .map_err(|e| GenerationError::Internal(format!("commit of {}: {e}", session.id)))?;

        self.timetable.add_entry(TimetableEntry {
            id: session.id.clone(),
            subject_id: subject.id.clone(),
            subject_name: subject.name.clone(),
            faculty_id: faculty.id.clone(),
            faculty_name: faculty.name.clone(),
            room_id: room.id.clone(),
            room_name: room.name.clone(),
            batch_id: batch.id.clone(),
            batch_name: batch.name.clone(),
            kind: session.kind,
            block,
        });
        Ok(())
    }

    fn finish(self) -> Timetable {
        self.timetable
    }
}

fn sorted_by_id(rooms: &[Room]) -> Vec<&Room> {
    let mut sorted: Vec<&Room> = rooms.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::demo_catalog;
    use crate::models::{Batch, Subject, SubjectKind};
    use crate::scheduler::required_units;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn generator(days: usize, periods: usize) -> TimetableGenerator {
        TimetableGenerator::new().with_calendar(WeekCalendar::uniform(days, periods))
    }

    fn single_subject(subject: Subject, max: usize) -> Catalog {
        let id = subject.id.clone();
        Catalog::new()
            .with_room(Room::classroom("C1"))
            .with_lab(Room::lab("L1"))
            .with_faculty(Faculty::new("F1").with_subject(id.as_str()))
            .with_subject(subject)
            .with_batch(Batch::new("B1").with_subject(id))
            .with_max_sessions_per_day(max)
    }

    fn assert_sound(timetable: &Timetable, catalog: &Catalog) {
        assert_eq!(
            timetable.placed_units() + timetable.unscheduled_units(),
            required_units(catalog)
        );
        for e in &timetable.entries {
            assert_eq!(e.block.duration, e.kind.duration());
            assert!(e.block.end_period() <= timetable.calendar.periods_per_day());
        }
        let max = catalog.constraints.max_sessions_per_day_per_faculty;
        assert!(timetable.faculty_loads().values().all(|&load| load <= max));
        assert!(verify_timetable(timetable, &catalog.constraints).is_ok());
    }

    #[test]
    fn test_single_theory_lands_on_interior_period() {
        let catalog = single_subject(Subject::theory("T"), 5);
        let t = generator(6, 7).generate(&catalog).unwrap();

        assert_eq!(t.entry_count(), 1);
        assert_eq!(t.unscheduled_count(), 0);
        let block = t.entries[0].block;
        assert_eq!((block.day, block.start_period), (0, 1));
        assert!(block.start_period > 0 && block.end_period() < 7);
    }

    #[test]
    fn test_entry_carries_catalog_names() {
        let catalog = demo_catalog();
        let t = TimetableGenerator::new().generate(&catalog).unwrap();
        let e = t.entry("B01-A-CS201L-0").unwrap();
        assert_eq!(e.subject_name, "Data Structures Lab");
        assert_eq!(e.kind, SubjectKind::Lab);
        assert!(e.room_id.starts_with('L'));
        assert!(!e.faculty_name.is_empty());
    }

    #[test]
    fn test_competing_labs_leave_one_unscheduled() {
        let catalog = single_subject(Subject::lab("L").with_weekly_sessions(2), 5);
        let t = generator(1, 3).generate(&catalog).unwrap();

        assert_eq!(t.entry_count(), 1);
        assert_eq!(t.unscheduled_count(), 1);
        assert_eq!(t.entries[0].block, Block::new(0, 0, 2));
        assert_eq!(t.entries[0].room_id, "L1");
        assert_eq!(t.unscheduled[0].id, "B1-L-1");
    }

    #[test]
    fn test_competing_batches_share_one_faculty() {
        let catalog = Catalog::new()
            .with_lab(Room::lab("L1"))
            .with_lab(Room::lab("L2"))
            .with_faculty(Faculty::new("F1").with_subject("L"))
            .with_subject(Subject::lab("L").with_weekly_sessions(1))
            .with_batch(Batch::new("B2").with_subject("L"))
            .with_batch(Batch::new("B1").with_subject("L"));
        let t = generator(1, 3).generate(&catalog).unwrap();

        assert_eq!(t.entry_count(), 1);
        assert_eq!(t.entries[0].batch_id, "B1");
        assert_eq!(t.unscheduled[0].batch_id, "B2");
    }

    #[test]
    fn test_loaded_faculty_moves_to_next_day() {
        let catalog = single_subject(Subject::theory("T").with_weekly_sessions(3), 2);
        let t = generator(2, 5).generate(&catalog).unwrap();

        assert_eq!(t.entry_count(), 3);
        assert_eq!(t.faculty_load("F1", 0), 2);
        assert_eq!(t.faculty_load("F1", 1), 1);
        // Second session sits next to the first one.
        assert_eq!(t.entries[0].block, Block::new(0, 1, 1));
        assert_eq!(t.entries[1].block, Block::new(0, 2, 1));
        assert_eq!(t.entries[2].block, Block::new(1, 1, 1));
    }

    #[test]
    fn test_load_limit_leaves_sessions_unscheduled() {
        let catalog = single_subject(Subject::theory("T").with_weekly_sessions(3), 2);
        let t = generator(1, 5).generate(&catalog).unwrap();
        assert_eq!(t.entry_count(), 2);
        assert_eq!(t.unscheduled_count(), 1);
        assert_eq!(t.faculty_load("F1", 0), 2);
    }

    #[test]
    fn test_labs_placed_before_theory() {
        let catalog = Catalog::new()
            .with_room(Room::classroom("C1"))
            .with_lab(Room::lab("L1"))
            .with_faculty(Faculty::new("F1").with_subjects(["T", "L"]))
            .with_subject(Subject::theory("T"))
            .with_subject(Subject::lab("L"))
            .with_batch(Batch::new("B1").with_subjects(["T", "L"]));

        let t = generator(1, 3).generate(&catalog).unwrap();
        assert!(t.is_complete());
        assert_eq!(t.entry("B1-L-0").unwrap().block, Block::new(0, 0, 2));
        assert_eq!(t.entry("B1-T-0").unwrap().block, Block::new(0, 2, 1));

        // Catalog order puts the theory session in the way of the lab.
        let t = generator(1, 3)
            .with_rule_engine(RuleEngine::new())
            .generate(&catalog)
            .unwrap();
        assert_eq!(t.entry("B1-T-0").unwrap().block, Block::new(0, 1, 1));
        assert_eq!(t.unscheduled[0].id, "B1-L-0");
    }

    #[test]
    fn test_unplaceable_sessions_are_data() {
        let catalog = Catalog::new()
            .with_room(Room::classroom("C1"))
            .with_faculty(Faculty::new("F1").with_subject("T"))
            .with_subject(Subject::theory("T"))
            .with_subject(Subject::theory("ORPHAN"))
            .with_subject(Subject::lab("L"))
            .with_batch(Batch::new("B1").with_subjects(["T", "ORPHAN", "L", "GHOST"]));

        let t = TimetableGenerator::new().generate(&catalog).unwrap();
        assert_eq!(t.entry_count(), 1);
        let mut unscheduled: Vec<&str> = t.unscheduled.iter().map(|s| s.id.as_str()).collect();
        unscheduled.sort();
        assert_eq!(unscheduled, vec!["B1-L-0", "B1-ORPHAN-0"]);
    }

    #[test]
    fn test_repeated_subject_keeps_entry_ids_distinct() {
        let mut catalog = single_subject(Subject::theory("T").with_weekly_sessions(2), 5);
        catalog.batches[0].subjects.push("T".into());

        let t = TimetableGenerator::new().generate(&catalog).unwrap();
        assert_eq!(t.entry_count(), 2);
        assert!(t.is_complete());
        assert_ne!(t.entries[0].id, t.entries[1].id);

        let blocks = crate::view::merge_blocks(&t.grid());
        let spans: Vec<usize> = blocks
            .iter()
            .flat_map(|d| d.blocks.iter())
            .map(|b| b.span)
            .collect();
        assert_eq!(spans, vec![1, 1]);
    }

    #[test]
    fn test_empty_calendar_schedules_nothing() {
        let catalog = single_subject(Subject::theory("T").with_weekly_sessions(2), 5);
        let t = TimetableGenerator::new()
            .with_calendar(WeekCalendar::new())
            .generate(&catalog)
            .unwrap();
        assert_eq!(t.entry_count(), 0);
        assert_eq!(t.unscheduled_count(), 2);
        assert!(t.grid().is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let t = TimetableGenerator::new().generate(&Catalog::new()).unwrap();
        assert!(t.is_complete());
        assert_eq!(t.entry_count(), 0);
        assert_eq!(t.grid().len(), 6);
    }

    #[test]
    fn test_demo_catalog() {
        let catalog = demo_catalog();
        let t = TimetableGenerator::new().generate(&catalog).unwrap();

        assert_sound(&t, &catalog);
        // Nobody teaches PHY101.
        assert_eq!(t.unscheduled_count(), 6);
        assert!(t.unscheduled.iter().all(|s| s.subject_id == "PHY101"));
        assert_eq!(t.placed_units(), 48);
        assert_eq!(t.entries_for_batch("B01-A").len(), t.entries_for_batch("B01-B").len());
    }

    #[test]
    fn test_deterministic() {
        let catalog = demo_catalog();
        let generator = TimetableGenerator::new();
        let a = generator.generate(&catalog).unwrap();
        let b = generator.generate(&catalog).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_generate_request_uses_request_calendar() {
        let catalog = single_subject(Subject::theory("T").with_weekly_sessions(2), 5);
        let request = TimetableRequest::new(catalog).with_calendar(WeekCalendar::uniform(1, 1));

        let t = TimetableGenerator::new().generate_request(&request).unwrap();
        assert_eq!(t.calendar.day_count(), 1);
        assert_eq!(t.entry_count(), 1);
        assert_eq!(t.unscheduled_count(), 1);
        // The generator keeps its own calendar.
        assert_eq!(TimetableGenerator::new().calendar().day_count(), 6);
    }

    #[test]
    fn test_generator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TimetableGenerator>();
    }

    fn random_catalog(rng: &mut SmallRng) -> Catalog {
        let subject_count = rng.random_range(1..8);
        let mut catalog = Catalog::new().with_max_sessions_per_day(rng.random_range(1..7));

        for i in 0..rng.random_range(0..4) {
            catalog = catalog.with_room(Room::classroom(format!("C{i}")));
        }
        for i in 0..rng.random_range(0..3) {
            catalog = catalog.with_lab(Room::lab(format!("L{i}")));
        }
        for i in 0..subject_count {
            let id = format!("S{i}");
            let subject = if rng.random_bool(0.3) {
                Subject::lab(id)
            } else {
                Subject::theory(id)
            };
            catalog = catalog.with_subject(subject.with_weekly_sessions(rng.random_range(1..5)));
        }
        for i in 0..rng.random_range(1..5) {
            let mut faculty = Faculty::new(format!("F{i}"));
            for s in 0..subject_count {
                if rng.random_bool(0.5) {
                    faculty = faculty.with_subject(format!("S{s}"));
                }
            }
            catalog = catalog.with_faculty(faculty);
        }
        for i in 0..rng.random_range(1..4) {
            let mut batch = Batch::new(format!("B{i}"));
            for s in 0..subject_count {
                if rng.random_bool(0.6) {
                    batch = batch.with_subject(format!("S{s}"));
                }
            }
            catalog = catalog.with_batch(batch);
        }
        catalog
    }

    #[test]
    fn test_random_catalogs_keep_invariants() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let catalog = random_catalog(&mut rng);
            let calendar = WeekCalendar::uniform(rng.random_range(1..7), rng.random_range(1..9));
            let generator = TimetableGenerator::new().with_calendar(calendar);

            let t = generator.generate(&catalog).unwrap();
            assert_sound(&t, &catalog);
            assert_eq!(t, generator.generate(&catalog).unwrap());
        }
    }
}
