//! Error taxonomy for the navigation engine.
//!
//! Input errors are reported to the caller without touching session state.
//! Data-integrity problems during path reconstruction are logged and
//! surfaced as "no path" rather than crashing the caller. Image failures
//! degrade to the placeholder image and never fail a route.

use thiserror::Error;

/// User-facing navigation errors.
#[derive(Debug, Error)]
pub enum NavError {
    /// The room identifier is not present in the room index.
    #[error("unknown room: {0}")]
    UnknownRoom(String),

    /// Start and end resolve to the same room.
    #[error("start and end rooms are identical")]
    SameRoom,

    /// The schedule holds no rooms to navigate between.
    #[error("schedule is empty")]
    EmptySchedule,

    /// No route exists between the two rooms, or reconstruction aborted
    /// on a missing matrix entry.
    #[error("no path found from {start} to {end}")]
    NoPath { start: String, end: String },
}

/// Errors from the segment-image fetch layer.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// No imagery is registered for this segment key.
    #[error("no image for segment {0}")]
    Unknown(String),
}
