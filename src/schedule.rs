//! Day-schedule read model.
//!
//! Schedules are stored elsewhere (keyed by day identifier, format out of
//! this crate's hands); the engine only reads an ordered room list and
//! derives consecutive start/end pairs for "navigate to the next
//! scheduled room". Room identifiers are normalized and deduplicated on
//! the way in so a sloppy stored list cannot produce same-room legs.

use serde::{Deserialize, Serialize};

/// An ordered list of rooms to visit over a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    rooms: Vec<String>,
}

impl Schedule {
    /// Builds a schedule, uppercase-normalizing and deduplicating rooms
    /// while preserving first-occurrence order.
    pub fn new<I, S>(rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = Vec::new();
        for room in rooms {
            let room = room.into().trim().to_uppercase();
            if !room.is_empty() && !seen.contains(&room) {
                seen.push(room);
            }
        }
        Self { rooms: seen }
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// The (current, next) room pair at a wrapping cursor position.
    ///
    /// `None` for an empty schedule. A single-room schedule yields a
    /// degenerate same-room leg, which route requests reject as input.
    pub fn leg(&self, cursor: usize) -> Option<(&str, &str)> {
        if self.rooms.is_empty() {
            return None;
        }
        let current = &self.rooms[cursor % self.rooms.len()];
        let next = &self.rooms[(cursor + 1) % self.rooms.len()];
        Some((current, next))
    }
}
