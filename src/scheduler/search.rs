//! Candidate search and scoring.
//!
//! # Algorithm
//!
//! For one session, enumerate every `(day, start, faculty, room)` with the
//! block inside the day, in lexicographic order: day, start period, faculty
//! ID, room ID. Infeasible prefixes are rejected early: a start where the
//! batch is busy never reaches the faculty loop, and a busy or fully loaded
//! faculty never reaches the room loop.
//!
//! Each feasible candidate is scored; the first candidate with the highest
//! score wins.
//!
//! # Scoring
//!
//! | Term | Condition |
//! |------|-----------|
//! | +100 | base |
//! | +10 | block touches neither the first nor the last period |
//! | −5 | block starts at the last legal start period |
//! | +5 | previous slot holds an entry of the same batch |
//! | +5 | next slot holds an entry of the same batch |
//!
//! # Complexity
//! O(D · P · F · R · d) set lookups per session, where d is the session
//! duration.

use crate::models::{Faculty, LectureSession, Room};

use super::occupancy::Occupancy;

/// Score every feasible candidate starts from.
pub const BASE_SCORE: i32 = 100;
/// Bonus for blocks away from both day edges.
pub const INTERIOR_BONUS: i32 = 10;
/// Penalty for blocks pushed to the end of the day.
pub const TRAILING_PENALTY: i32 = 5;
/// Bonus per side touching another entry of the same batch.
pub const ADJACENCY_BONUS: i32 = 5;

/// A feasible placement for one session.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate<'a> {
    pub(crate) day: usize,
    pub(crate) start_period: usize,
    pub(crate) faculty: &'a Faculty,
    pub(crate) room: &'a Room,
    pub(crate) score: i32,
}

/// Scores a block for a batch against the current grid.
///
/// Depends only on the block position and the batch's neighbouring
/// entries, never on the faculty or room.
pub(crate) fn score_block(
    occupancy: &Occupancy,
    batch_id: &str,
    day: usize,
    start: usize,
    duration: usize,
) -> i32 {
    let periods = occupancy.periods();
    let end = start + duration;
    let mut score = BASE_SCORE;

    if start > 0 && end < periods {
        score += INTERIOR_BONUS;
    }
    if Some(start) == periods.checked_sub(duration) {
        score -= TRAILING_PENALTY;
    }
    if start > 0 && occupancy.batch_at(day, start - 1, batch_id) {
        score += ADJACENCY_BONUS;
    }
    if occupancy.batch_at(day, end, batch_id) {
        score += ADJACENCY_BONUS;
    }

    score
}

/// Lazily enumerates feasible candidates in lexicographic order.
///
/// `faculties` and `rooms` must already be ordered by ID.
pub(crate) fn feasible_candidates<'a, 'p: 'a>(
    session: &'a LectureSession,
    faculties: &'a [&'p Faculty],
    rooms: &'a [&'p Room],
    occupancy: &'a Occupancy,
    max_daily_load: usize,
) -> impl Iterator<Item = Candidate<'p>> + 'a {
    let duration = session.duration;
    let batch_id = session.batch_id.as_str();
    let last_start = occupancy.periods().checked_sub(duration);

    (0..occupancy.days())
        .flat_map(move |day| {
            last_start
                .into_iter()
                .flat_map(move |last| (0..=last).map(move |start| (day, start)))
        })
        .filter(move |&(day, start)| occupancy.batch_free(day, start, duration, batch_id))
        .flat_map(move |(day, start)| {
            faculties
                .iter()
                .copied()
                .filter(move |f| {
                    occupancy.faculty_load(day, &f.id) + duration <= max_daily_load
                        && occupancy.faculty_free(day, start, duration, &f.id)
                })
                .map(move |faculty| (day, start, faculty))
        })
        .flat_map(move |(day, start, faculty)| {
            rooms
                .iter()
                .copied()
                .filter(move |r| occupancy.room_free(day, start, duration, &r.id))
                .map(move |room| Candidate {
                    day,
                    start_period: start,
                    faculty,
                    room,
                    score: score_block(occupancy, batch_id, day, start, duration),
                })
        })
}

/// Picks the highest-scoring feasible candidate; the earliest wins ties.
pub(crate) fn best_candidate<'a, 'p: 'a>(
    session: &'a LectureSession,
    faculties: &'a [&'p Faculty],
    rooms: &'a [&'p Room],
    occupancy: &'a Occupancy,
    max_daily_load: usize,
) -> Option<Candidate<'p>> {
    feasible_candidates(session, faculties, rooms, occupancy, max_daily_load)
        .reduce(|best, c| if c.score > best.score { c } else { best })
}
