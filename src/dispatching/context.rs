//! Prioritization context for dispatching rule evaluation.

use std::collections::HashMap;

use crate::models::Catalog;

/// Catalog-derived facts that context-aware rules consult.
///
/// Built once per run from the immutable catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct PriorityContext {
    /// Qualified faculty count per subject ID.
    pub qualified_faculty: HashMap<String, usize>,
    /// Size of the room pool per session duration.
    pub room_pool_size: HashMap<usize, usize>,
}

impl PriorityContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the context from a catalog.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut ctx = Self::new();
        for subject in &catalog.subjects {
            let count = catalog.qualified_faculties(&subject.id).count();
            ctx.qualified_faculty.insert(subject.id.clone(), count);
            ctx.room_pool_size
                .entry(subject.duration())
                .or_insert_with(|| catalog.room_pool(subject.duration()).len());
        }
        ctx
    }

    /// Sets the qualified faculty count for a subject.
    pub fn with_qualified_faculty(mut self, subject_id: impl Into<String>, count: usize) -> Self {
        self.qualified_faculty.insert(subject_id.into(), count);
        self
    }

    /// Sets the room pool size for a duration.
    pub fn with_room_pool_size(mut self, duration: usize, size: usize) -> Self {
        self.room_pool_size.insert(duration, size);
        self
    }
}
