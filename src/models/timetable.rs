//! Timetable (solution) model.
//!
//! A timetable is the outcome of one generation run: the committed entries,
//! each carrying an explicit block descriptor, plus the sessions that could
//! not be placed. The per-day slot grid is assembled on demand from the
//! block descriptors, so the representation is serialization-safe and never
//! relies on reference identity.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{LectureSession, SubjectKind, WeekCalendar};

/// Where an entry sits in the grid.
///
/// The entry occupies periods `[start_period, start_period + duration)`
/// of `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    /// Day index.
    pub day: usize,
    /// First occupied period index.
    pub start_period: usize,
    /// Occupied period count.
    pub duration: usize,
}

impl Block {
    /// Creates a block descriptor.
    pub fn new(day: usize, start_period: usize, duration: usize) -> Self {
        Self {
            day,
            start_period,
            duration,
        }
    }

    /// One past the last occupied period.
    #[inline]
    pub fn end_period(&self) -> usize {
        self.start_period + self.duration
    }

    /// Whether the block covers the given slot.
    #[inline]
    pub fn covers(&self, day: usize, period: usize) -> bool {
        self.day == day && period >= self.start_period && period < self.end_period()
    }

    /// Whether two blocks share at least one slot.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && self.start_period < other.end_period()
            && other.start_period < self.end_period()
    }
}

/// A committed placement with resolved display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableEntry {
    /// Entry identifier (the placed session's ID).
    pub id: String,
    pub subject_id: String,
    pub subject_name: String,
    pub faculty_id: String,
    pub faculty_name: String,
    pub room_id: String,
    pub room_name: String,
    pub batch_id: String,
    pub batch_name: String,
    /// Theory or lab.
    pub kind: SubjectKind,
    /// Grid position.
    pub block: Block,
}

impl TimetableEntry {
    /// Occupied period count.
    #[inline]
    pub fn duration(&self) -> usize {
        self.block.duration
    }
}

/// One (day, period) cell of the assembled grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSlot {
    /// Period index within the day.
    pub period: usize,
    /// Entries occupying this slot (at most one per batch).
    pub entries: Vec<TimetableEntry>,
}

impl GridSlot {
    /// Whether no entry occupies this slot.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One day of the assembled grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDay {
    /// Day index.
    pub day: usize,
    /// Day label from the calendar.
    pub label: String,
    /// Slots in period order.
    pub slots: Vec<GridSlot>,
}

/// The result of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Calendar the timetable was generated for.
    pub calendar: WeekCalendar,
    /// Committed entries in commit order.
    pub entries: Vec<TimetableEntry>,
    /// Sessions that had no feasible placement, in attempt order.
    pub unscheduled: Vec<LectureSession>,
}

/// A broken timetable invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (entry, faculty, batch or room).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two entries of one batch overlap.
    BatchClash,
    /// Two entries of one faculty overlap.
    FacultyClash,
    /// Two entries in one room overlap.
    RoomClash,
    /// A faculty exceeds the daily limit.
    FacultyOverload,
    /// An entry leaves the grid or has the wrong length for its kind.
    InvalidBlock,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
        severity: i32,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
            severity,
        }
    }

    /// Creates a clash violation of the given type.
    pub fn clash(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(violation_type, entity_id, message, 95)
    }

    /// Creates a faculty overload violation.
    pub fn faculty_overload(faculty_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::FacultyOverload, faculty_id, message, 90)
    }

    /// Creates an invalid block violation.
    pub fn invalid_block(entry_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::InvalidBlock, entry_id, message, 100)
    }
}

impl Timetable {
    /// Creates an empty timetable for a calendar.
    pub fn new(calendar: WeekCalendar) -> Self {
        Self {
            calendar,
            entries: Vec::new(),
            unscheduled: Vec::new(),
        }
    }

    /// Adds a committed entry.
    pub fn add_entry(&mut self, entry: TimetableEntry) {
        self.entries.push(entry);
    }

    /// Records an unscheduled session.
    pub fn add_unscheduled(&mut self, session: LectureSession) {
        self.unscheduled.push(session);
    }

    /// Number of committed entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of sessions that could not be placed.
    pub fn unscheduled_count(&self) -> usize {
        self.unscheduled.len()
    }

    /// Whether every session was placed.
    pub fn is_complete(&self) -> bool {
        self.unscheduled.is_empty()
    }

    /// Period units covered by committed entries.
    pub fn placed_units(&self) -> usize {
        self.entries.iter().map(TimetableEntry::duration).sum()
    }

    /// Period units of the unscheduled sessions.
    pub fn unscheduled_units(&self) -> usize {
        self.unscheduled.iter().map(|s| s.duration).sum()
    }

    /// Finds an entry by ID.
    pub fn entry(&self, id: &str) -> Option<&TimetableEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries attended by a batch.
    pub fn entries_for_batch(&self, batch_id: &str) -> Vec<&TimetableEntry> {
        self.entries
            .iter()
            .filter(|e| e.batch_id == batch_id)
            .collect()
    }

    /// Entries taught by a faculty.
    pub fn entries_for_faculty(&self, faculty_id: &str) -> Vec<&TimetableEntry> {
        self.entries
            .iter()
            .filter(|e| e.faculty_id == faculty_id)
            .collect()
    }

    /// Entries held in a room.
    pub fn entries_for_room(&self, room_id: &str) -> Vec<&TimetableEntry> {
        self.entries
            .iter()
            .filter(|e| e.room_id == room_id)
            .collect()
    }

    /// Entries covering a slot.
    pub fn entries_at(&self, day: usize, period: usize) -> Vec<&TimetableEntry> {
        self.entries
            .iter()
            .filter(|e| e.block.covers(day, period))
            .collect()
    }

    /// Occupied periods of a faculty on a day.
    pub fn faculty_load(&self, faculty_id: &str, day: usize) -> usize {
        self.entries
            .iter()
            .filter(|e| e.faculty_id == faculty_id && e.block.day == day)
            .map(TimetableEntry::duration)
            .sum()
    }

    /// Occupied periods per (faculty, day), for every faculty with entries.
    pub fn faculty_loads(&self) -> HashMap<(String, usize), usize> {
        let mut loads: HashMap<(String, usize), usize> = HashMap::new();
        for e in &self.entries {
            *loads.entry((e.faculty_id.clone(), e.block.day)).or_insert(0) += e.duration();
        }
        loads
    }

    /// Assembles the per-day slot grid.
    ///
    /// Every calendar day appears, each with one slot per period. A
    /// multi-period entry appears in each slot it covers, carrying the same
    /// entry ID. Within a slot, entries keep commit order.
    pub fn grid(&self) -> Vec<GridDay> {
        self.grid_filtered(|_| true)
    }

    /// Assembles the grid keeping only entries accepted by `keep`.
    pub fn grid_filtered<F>(&self, keep: F) -> Vec<GridDay>
    where
        F: Fn(&TimetableEntry) -> bool,
    {
        let periods = self.calendar.periods_per_day();
        let mut days: Vec<GridDay> = self
            .calendar
            .days
            .iter()
            .enumerate()
            .map(|(day, label)| GridDay {
                day,
                label: label.clone(),
                slots: (0..periods)
                    .map(|period| GridSlot {
                        period,
                        entries: Vec::new(),
                    })
                    .collect(),
            })
            .collect();

        for entry in self.entries.iter().filter(|e| keep(e)) {
            let Some(grid_day) = days.get_mut(entry.block.day) else {
                continue;
            };
            for period in entry.block.start_period..entry.block.end_period() {
                if let Some(slot) = grid_day.slots.get_mut(period) {
                    slot.entries.push(entry.clone());
                }
            }
        }

        days
    }
}
