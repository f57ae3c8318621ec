//! Rule engine for multi-criteria session prioritization.
//!
//! Every rule scores every session once; the sort then works on the
//! cached score rows.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::{rules, DispatchingRule, PriorityContext, RuleScore};
use crate::models::LectureSession;

/// How multiple rules are combined.
#[derive(Debug, Clone, Default)]
pub enum EvaluationMode {
    /// Apply rules in sequence; use next rule only on ties.
    #[default]
    Sequential,
    /// Compute weighted sum of all rule scores.
    Weighted,
}

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Default)]
pub enum TieBreaker {
    /// Keep the input order (the sort is stable).
    #[default]
    NextRule,
    /// Deterministic by batch ID, subject ID, then occurrence index.
    ById,
}

/// A composable rule engine for session prioritization.
///
/// # Example
/// ```
/// use u_timetable::dispatching::{RuleEngine, TieBreaker};
/// use u_timetable::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::LongestDuration)
///     .with_tie_breaker(rules::MostWeeklySessions)
///     .with_final_tie_breaker(TieBreaker::ById);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<(Arc<dyn DispatchingRule>, f64)>,
    mode: EvaluationMode,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty engine; sorting with it keeps the input order.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mode: EvaluationMode::Sequential,
            tie_breaker: TieBreaker::NextRule,
            epsilon: 1e-9,
        }
    }

    /// The default timetabling order: longest sessions first, then the
    /// most frequent subjects, then by batch, subject and occurrence.
    pub fn timetabling() -> Self {
        Self::new()
            .with_rule(rules::LongestDuration)
            .with_tie_breaker(rules::MostWeeklySessions)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Adds a primary rule (weight 1.0).
    pub fn with_rule<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_weighted_rule(rule, 1.0)
    }

    /// Adds a weighted rule. The weight only matters in `Weighted` mode.
    pub fn with_weighted_rule<R: DispatchingRule + 'static>(
        mut self,
        rule: R,
        weight: f64,
    ) -> Self {
        self.rules.push((Arc::new(rule), weight));
        self
    }

    /// Adds a tie-breaking rule: consulted in `Sequential` mode, weight 0.0
    /// in `Weighted` mode.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_weighted_rule(rule, 0.0)
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Sorts sessions by priority (highest priority first).
    ///
    /// Returns indices into `sessions`. The sort is stable.
    pub fn sort_indices(
        &self,
        sessions: &[LectureSession],
        context: &PriorityContext,
    ) -> Vec<usize> {
        let keys: Vec<Vec<RuleScore>> = sessions.iter().map(|s| self.key(s, context)).collect();

        let mut indices: Vec<usize> = (0..sessions.len()).collect();
        indices.sort_by(|&a, &b| {
            self.compare_keys(&keys[a], &keys[b])
                .then_with(|| self.final_tie_break(&sessions[a], &sessions[b]))
        });
        indices
    }

    /// Returns the sessions in priority order.
    pub fn sort(
        &self,
        sessions: Vec<LectureSession>,
        context: &PriorityContext,
    ) -> Vec<LectureSession> {
        let order = self.sort_indices(&sessions, context);
        let mut slots: Vec<Option<LectureSession>> = sessions.into_iter().map(Some).collect();
        order.into_iter().filter_map(|i| slots[i].take()).collect()
    }

    /// Score row of one session: one entry per rule in `Sequential` mode,
    /// a single weighted sum in `Weighted` mode.
    fn key(&self, session: &LectureSession, context: &PriorityContext) -> Vec<RuleScore> {
        let scores = self
            .rules
            .iter()
            .map(|(rule, weight)| (rule.evaluate(session, context), *weight));
        match self.mode {
            EvaluationMode::Sequential => scores.map(|(score, _)| score).collect(),
            EvaluationMode::Weighted => {
                vec![scores.map(|(score, w)| score * w).sum::<RuleScore>()]
            }
        }
    }

    fn compare_keys(&self, a: &[RuleScore], b: &[RuleScore]) -> Ordering {
        a.iter()
            .zip(b)
            .find(|(x, y)| (*x - *y).abs() > self.epsilon)
            .map_or(Ordering::Equal, |(x, y)| {
                x.partial_cmp(y).unwrap_or(Ordering::Equal)
            })
    }

    fn final_tie_break(&self, a: &LectureSession, b: &LectureSession) -> Ordering {
        match self.tie_breaker {
            TieBreaker::NextRule => Ordering::Equal,
            TieBreaker::ById => a.cmp_key(b),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::timetabling()
    }
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.rules.iter().map(|(rule, _)| rule.name()).collect();
        f.debug_struct("RuleEngine")
            .field("rules", &names)
            .field("mode", &self.mode)
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
