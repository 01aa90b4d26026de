//! Core seams for the navigation engine.
//!
//! These are intentionally minimal. The engine never owns the building
//! data; it reads it through `GraphDataProvider`, loaded once before the
//! first route request and immutable afterwards. Segment imagery comes in
//! through `ImageFetcher` so the cache can be exercised without a live
//! image host.

use async_trait::async_trait;

use crate::error::ImageError;
use crate::polyline::Point;

/// Read-only access to the precomputed navigation data.
///
/// Matrices are in Floyd-Warshall "next" form: `next_hop(i, j)` is the
/// vertex to step to when travelling from `i` toward `j`. Distances are
/// non-negative; symmetry is not assumed. A distance equal to the stair
/// sentinel marks a floor-connector edge.
pub trait GraphDataProvider {
    /// Precomputed distance from `from` to `to`, `None` when unreachable.
    fn distance(&self, from: usize, to: usize) -> Option<f64>;

    /// Next vertex on the optimal path from `from` toward `to`.
    fn next_hop(&self, from: usize, to: usize) -> Option<usize>;

    /// Candidate vertices for a room. Room identifiers are matched after
    /// uppercase normalization; a room may touch several vertices.
    fn room_vertices(&self, room: &str) -> Option<&[usize]>;

    /// Coordinates of a vertex in floor-image space.
    fn vertex(&self, index: usize) -> Option<Point>;

    /// Street-view image registered for the directed segment `from -> to`.
    fn segment_image(&self, from: usize, to: usize) -> Option<&str>;

    /// Number of vertices in the graph. Bounds path reconstruction.
    fn vertex_count(&self) -> usize;
}

/// Resolves a segment key to a displayable image URL.
///
/// Implementations fetch and decode the image so the rendering layer can
/// display it without a further round trip. Failures are expected and
/// degrade to the placeholder image.
#[async_trait]
pub trait ImageFetcher: Send + Sync + 'static {
    async fn fetch(&self, key: &str) -> Result<String, ImageError>;
}
