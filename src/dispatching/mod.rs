//! Dispatching rules and rule engine for session prioritization.
//!
//! Orders lecture sessions before placement so that hard-to-place sessions
//! are attempted while the grid is still empty.
//!
//! # Usage
//!
//! ```
//! use u_timetable::dispatching::{PriorityContext, RuleEngine};
//! use u_timetable::dispatching::rules;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::LongestDuration)
//!     .with_tie_breaker(rules::FewestQualifiedFaculty);
//!
//! let context = PriorityContext::new();
//! // let order = engine.sort_indices(&sessions, &context);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::PriorityContext;
pub use engine::{EvaluationMode, RuleEngine, TieBreaker};

use crate::models::LectureSession;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (placed first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates session priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for sessions that should be placed first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "LONGEST").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a session.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, session: &LectureSession, context: &PriorityContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
