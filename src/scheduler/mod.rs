//! Timetable generation and KPI evaluation.
//!
//! # Algorithm
//!
//! `TimetableGenerator` is a greedy, score-driven constructive heuristic:
//! sessions are expanded from the catalog, ordered by the rule engine, and
//! each one takes the best-scoring feasible (day, period range, faculty,
//! room). It is not optimal, but it is fast and fully deterministic.
//!
//! # KPI
//!
//! `TimetableKpi` computes placement rate, faculty daily loads, room
//! utilization and idle gaps.
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod expansion;
mod greedy;
mod kpi;
mod occupancy;
mod search;

pub use expansion::{expand_sessions, required_units};
pub use greedy::{TimetableGenerator, TimetableRequest};
pub use kpi::TimetableKpi;
pub use search::{ADJACENCY_BONUS, BASE_SCORE, INTERIOR_BONUS, TRAILING_PENALTY};
