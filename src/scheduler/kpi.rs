//! Timetable quality metrics (KPIs).
//!
//! Computes placement and load indicators from a finished timetable and
//! the catalog it was generated from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Required units | Period units the catalog asks for per week |
//! | Placed units | Period units covered by entries |
//! | Placement rate | placed / required |
//! | Max daily load | Per faculty, the busiest day's occupied periods |
//! | Room utilization | Occupied periods / calendar slots, per room |
//! | Idle gaps | Free periods between a batch's first and last entry of a day |
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling", soft constraint
//! measures.

use std::collections::{BTreeSet, HashMap};

use crate::models::{Catalog, Timetable};

use super::expansion::required_units;

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Period units the catalog requires.
    pub required_units: usize,
    /// Period units covered by committed entries.
    pub placed_units: usize,
    /// Fraction of required units placed (0.0..1.0).
    pub placement_rate: f64,
    /// Number of committed entries.
    pub placed_sessions: usize,
    /// Number of sessions left unscheduled.
    pub unscheduled_sessions: usize,
    /// Busiest day's occupied periods per faculty with entries.
    pub max_daily_load_by_faculty: HashMap<String, usize>,
    /// Per-room utilization over the whole calendar, for every catalog room.
    pub utilization_by_room: HashMap<String, f64>,
    /// Average room utilization (0.0..1.0).
    pub avg_room_utilization: f64,
    /// Total idle periods inside batch days.
    pub idle_gaps: usize,
}

impl TimetableKpi {
    /// Computes KPIs from a timetable and its input catalog.
    ///
    /// # Arguments
    /// * `timetable` - The generated timetable.
    /// * `catalog` - The catalog it was generated from (for required units
    ///   and the room list).
    pub fn calculate(timetable: &Timetable, catalog: &Catalog) -> Self {
        let required = required_units(catalog);
        let placed = timetable.placed_units();

        let placement_rate = if required == 0 {
            1.0
        } else {
            placed as f64 / required as f64
        };

        let mut max_daily_load_by_faculty: HashMap<String, usize> = HashMap::new();
        for ((faculty_id, _day), load) in timetable.faculty_loads() {
            let max = max_daily_load_by_faculty.entry(faculty_id).or_insert(0);
            *max = (*max).max(load);
        }

        // Utilization
        let slots = timetable.calendar.slot_count();
        let mut room_units: HashMap<&str, usize> = HashMap::new();
        for e in &timetable.entries {
            *room_units.entry(e.room_id.as_str()).or_insert(0) += e.duration();
        }
        let utilization_by_room: HashMap<String, f64> = catalog
            .rooms
            .iter()
            .chain(catalog.labs.iter())
            .map(|r| {
                let used = room_units.get(r.id.as_str()).copied().unwrap_or(0);
                let util = if slots == 0 {
                    0.0
                } else {
                    used as f64 / slots as f64
                };
                (r.id.clone(), util)
            })
            .collect();
        let avg_room_utilization = if utilization_by_room.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_room.values().sum();
            sum / utilization_by_room.len() as f64
        };

        Self {
            required_units: required,
            placed_units: placed,
            placement_rate,
            placed_sessions: timetable.entry_count(),
            unscheduled_sessions: timetable.unscheduled_count(),
            max_daily_load_by_faculty,
            utilization_by_room,
            avg_room_utilization,
            idle_gaps: idle_gaps(timetable),
        }
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_placement_rate: f64, max_idle_gaps: usize) -> bool {
        self.placement_rate >= min_placement_rate && self.idle_gaps <= max_idle_gaps
    }
}

fn idle_gaps(timetable: &Timetable) -> usize {
    let mut occupied: HashMap<(&str, usize), BTreeSet<usize>> = HashMap::new();
    for e in &timetable.entries {
        occupied
            .entry((e.batch_id.as_str(), e.block.day))
            .or_default()
            .extend(e.block.start_period..e.block.end_period());
    }

    occupied
        .values()
        .filter_map(|periods| {
            let first = periods.first()?;
            let last = periods.last()?;
            Some(last - first + 1 - periods.len())
        })
        .sum()
}
