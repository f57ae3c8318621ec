//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Size-based**: LONGEST, FREQUENT
//! - **Scarcity-based**: SCARCE_FACULTY, SCARCE_ROOM
//!
//! # Score Convention
//! All rules return lower scores for sessions that should be placed first.
//!
//! # Reference
//! Coffman, Garey & Johnson (1978), first-fit-decreasing bin packing:
//! placing large items while bins are emptiest improves the fill rate.

use super::{DispatchingRule, PriorityContext, RuleScore};
use crate::models::LectureSession;

/// Longest session first.
///
/// Two-period lab sessions need a pair of consecutive free periods and a
/// lab room, which become scarce as the grid fills.
#[derive(Debug, Clone, Copy)]
pub struct LongestDuration;

impl DispatchingRule for LongestDuration {
    fn name(&self) -> &'static str {
        "LONGEST"
    }

    fn evaluate(&self, session: &LectureSession, _context: &PriorityContext) -> RuleScore {
        -(session.duration as f64)
    }

    fn description(&self) -> &'static str {
        "Longest Session Duration"
    }
}

/// Most frequent subject first.
#[derive(Debug, Clone, Copy)]
pub struct MostWeeklySessions;

impl DispatchingRule for MostWeeklySessions {
    fn name(&self) -> &'static str {
        "FREQUENT"
    }

    fn evaluate(&self, session: &LectureSession, _context: &PriorityContext) -> RuleScore {
        -(session.weekly_sessions as f64)
    }

    fn description(&self) -> &'static str {
        "Most Weekly Sessions"
    }
}

/// Fewest qualified faculties first.
///
/// Subjects missing from the context rank last.
#[derive(Debug, Clone, Copy)]
pub struct FewestQualifiedFaculty;

impl DispatchingRule for FewestQualifiedFaculty {
    fn name(&self) -> &'static str {
        "SCARCE_FACULTY"
    }

    fn evaluate(&self, session: &LectureSession, context: &PriorityContext) -> RuleScore {
        context
            .qualified_faculty
            .get(&session.subject_id)
            .map(|&n| n as f64)
            .unwrap_or(f64::MAX)
    }

    fn description(&self) -> &'static str {
        "Fewest Qualified Faculty"
    }
}

/// Smallest room pool first.
#[derive(Debug, Clone, Copy)]
pub struct FewestRooms;

impl DispatchingRule for FewestRooms {
    fn name(&self) -> &'static str {
        "SCARCE_ROOM"
    }

    fn evaluate(&self, session: &LectureSession, context: &PriorityContext) -> RuleScore {
        context
            .room_pool_size
            .get(&session.duration)
            .map(|&n| n as f64)
            .unwrap_or(f64::MAX)
    }

    fn description(&self) -> &'static str {
        "Fewest Candidate Rooms"
    }
}
