//! Room model.
//!
//! Rooms are where sessions take place. Theory sessions use normal
//! classrooms, multi-period lab sessions use lab rooms. The catalog keeps
//! the two pools apart.

use serde::{Deserialize, Serialize};

/// A room that can host sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Room classification.
    pub kind: RoomKind,
    /// Seats available. Informational only; the generator never checks it.
    pub capacity: u32,
}

/// Room classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    /// Ordinary lecture classroom.
    Normal,
    /// Laboratory equipped for lab sessions.
    Lab,
}

impl Room {
    /// Creates a new room of the given kind.
    pub fn new(id: impl Into<String>, kind: RoomKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            capacity: 0,
        }
    }

    /// Creates a normal classroom.
    pub fn classroom(id: impl Into<String>) -> Self {
        Self::new(id, RoomKind::Normal)
    }

    /// Creates a lab room.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, RoomKind::Lab)
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Whether this room is a lab.
    #[inline]
    pub fn is_lab(&self) -> bool {
        self.kind == RoomKind::Lab
    }
}
