//! Engine configuration constants.

/// Tunables for the navigation engine.
///
/// The defaults mirror the building data this engine ships with: vertex
/// indices at or below `floor_threshold` lie on the first floor, and edges
/// whose matrix distance equals `stair_distance` are floor connectors
/// rather than walkable distance.
#[derive(Debug, Clone)]
pub struct NavConfig {
    /// Vertex indices above this value belong to the second floor.
    pub floor_threshold: usize,
    /// Sentinel distance marking a stair edge in the distance matrix.
    pub stair_distance: f64,
    /// Arc-length lookahead used to derive the agent heading.
    pub heading_lookahead: f64,
    /// Maximum number of cached segment images.
    pub cache_capacity: usize,
    /// Placeholder shown when a segment has no cached image.
    pub default_image: String,
    /// Background imagery per floor.
    pub first_floor_image: String,
    pub second_floor_image: String,
    /// Suppress agent rotation and keep the view pinned north.
    pub lock_north: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            floor_threshold: 76,
            stair_distance: 10_000.0,
            heading_lookahead: 10.0,
            cache_capacity: 64,
            default_image: "no-streetview.jpg".to_string(),
            first_floor_image: "mainfloorcrunched.png".to_string(),
            second_floor_image: "combscaled.png".to_string(),
            lock_north: false,
        }
    }
}
