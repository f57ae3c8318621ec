//! Run-owned occupancy grid.
//!
//! Tracks, for every (day, period) slot, which batches, faculties and
//! rooms are already in use, plus each faculty's occupied periods per
//! day. Feasibility checks are set lookups instead of grid scans.
//!
//! `commit` is the only mutation point. A grid is created empty at the
//! start of a run and dropped at its end.

use std::collections::{HashMap, HashSet};

use crate::models::{Block, WeekCalendar};

#[derive(Debug, Clone, Default)]
struct SlotState {
    batches: HashSet<String>,
    faculties: HashSet<String>,
    rooms: HashSet<String>,
}

/// Per-slot occupancy sets for one generation run.
#[derive(Debug, Clone)]
pub(crate) struct Occupancy {
    days: usize,
    periods: usize,
    slots: Vec<SlotState>,
    faculty_load: Vec<HashMap<String, usize>>,
}

impl Occupancy {
    /// Creates an empty grid shaped after the calendar.
    pub(crate) fn new(calendar: &WeekCalendar) -> Self {
        let days = calendar.day_count();
        let periods = calendar.periods_per_day();
        Self {
            days,
            periods,
            slots: vec![SlotState::default(); days * periods],
            faculty_load: vec![HashMap::new(); days],
        }
    }

    #[inline]
    pub(crate) fn days(&self) -> usize {
        self.days
    }

    #[inline]
    pub(crate) fn periods(&self) -> usize {
        self.periods
    }

    fn slot(&self, day: usize, period: usize) -> Option<&SlotState> {
        if day >= self.days || period >= self.periods {
            return None;
        }
        self.slots.get(day * self.periods + period)
    }

    /// Whether `[start, start + duration)` on `day` lies inside the grid.
    pub(crate) fn in_bounds(&self, day: usize, start: usize, duration: usize) -> bool {
        duration > 0 && day < self.days && start + duration <= self.periods
    }

    fn range_free<F>(&self, day: usize, start: usize, duration: usize, busy: F) -> bool
    where
        F: Fn(&SlotState) -> bool,
    {
        self.in_bounds(day, start, duration)
            && (start..start + duration).all(|p| self.slot(day, p).is_some_and(|s| !busy(s)))
    }

    /// Whether the batch has no entry in the range.
    pub(crate) fn batch_free(
        &self,
        day: usize,
        start: usize,
        duration: usize,
        batch_id: &str,
    ) -> bool {
        self.range_free(day, start, duration, |s| s.batches.contains(batch_id))
    }

    /// Whether the faculty has no entry in the range.
    pub(crate) fn faculty_free(
        &self,
        day: usize,
        start: usize,
        duration: usize,
        faculty_id: &str,
    ) -> bool {
        self.range_free(day, start, duration, |s| s.faculties.contains(faculty_id))
    }

    /// Whether the room has no entry in the range.
    pub(crate) fn room_free(
        &self,
        day: usize,
        start: usize,
        duration: usize,
        room_id: &str,
    ) -> bool {
        self.range_free(day, start, duration, |s| s.rooms.contains(room_id))
    }

    /// Occupied periods of a faculty on a day.
    pub(crate) fn faculty_load(&self, day: usize, faculty_id: &str) -> usize {
        self.faculty_load
            .get(day)
            .and_then(|loads| loads.get(faculty_id))
            .copied()
            .unwrap_or(0)
    }

    /// Whether the slot holds an entry of the batch. Out-of-range slots
    /// hold nothing.
    pub(crate) fn batch_at(&self, day: usize, period: usize, batch_id: &str) -> bool {
        self.slot(day, period)
            .is_some_and(|s| s.batches.contains(batch_id))
    }

    /// Marks `block` as used by the given batch, faculty and room.
    ///
    /// Returns an error, leaving the grid untouched, if the block leaves
    /// the grid or collides with a batch, faculty or room already present.
    pub(crate) fn commit(
        &mut self,
        block: Block,
        batch_id: &str,
        faculty_id: &str,
        room_id: &str,
    ) -> Result<(), String> {
        let Block {
            day,
            start_period,
            duration,
        } = block;

        if !self.in_bounds(day, start_period, duration) {
            return Err(format!(
                "block day {day} periods {start_period}..{} is outside the {}x{} grid",
                start_period + duration,
                self.days,
                self.periods
            ));
        }
        if !self.batch_free(day, start_period, duration, batch_id)
            || !self.faculty_free(day, start_period, duration, faculty_id)
            || !self.room_free(day, start_period, duration, room_id)
        {
            return Err(format!(
                "block day {day} periods {start_period}..{} collides for batch '{batch_id}', \
                 faculty '{faculty_id}' or room '{room_id}'",
                start_period + duration
            ));
        }

        for period in start_period..start_period + duration {
            let slot = &mut self.slots[day * self.periods + period];
            slot.batches.insert(batch_id.to_string());
            slot.faculties.insert(faculty_id.to_string());
            slot.rooms.insert(room_id.to_string());
        }
        *self.faculty_load[day]
            .entry(faculty_id.to_string())
            .or_insert(0) += duration;

        Ok(())
    }
}
