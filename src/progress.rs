//! Scroll-position to path-progress mapping.
//!
//! The UI reports a scalar "distance traveled" on every scroll or slider
//! event. The tracker inverts that into the active path segment via the
//! distance domain (cumulative walking distance per path vertex) and
//! samples the agent's point and heading on the rendered trajectory.
//!
//! Stair-sentinel edges contribute nothing to the domain: the crossing is
//! zero-length for progress purposes and only triggers a floor swap.

use crate::config::NavConfig;
use crate::polyline::{Point, Polyline};
use crate::traits::GraphDataProvider;

/// One sampled animation frame's worth of progress data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekSample {
    pub segment_index: usize,
    pub point: Point,
    pub heading_degrees: f64,
    /// Normalized completion in `[0, 1]`, used for colorization only.
    pub completion: f64,
}

/// Maps a distance-traveled scalar onto segments and trajectory samples.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    domain: Vec<f64>,
    total_distance: f64,
    heading_lookahead: f64,
    lock_north: bool,
}

impl ProgressTracker {
    /// Builds the distance domain for a reconstructed path.
    ///
    /// The total distance comes from the matrix entry for the start/end
    /// pair, less the stair sentinel when the path crosses one; if the
    /// matrix has no entry the accumulated domain distance stands in.
    pub fn new<G: GraphDataProvider>(
        graph: &G,
        path: &[usize],
        stair: Option<usize>,
        config: &NavConfig,
    ) -> Self {
        let mut domain = Vec::with_capacity(path.len());
        let mut accumulated = 0.0;
        for i in 0..path.len() {
            domain.push(accumulated);
            if i + 1 < path.len() {
                let edge = graph.distance(path[i], path[i + 1]).unwrap_or(0.0);
                if edge < config.stair_distance {
                    accumulated += edge;
                }
            }
        }

        let matrix_total = match (path.first(), path.last()) {
            (Some(start), Some(end)) => graph.distance(*start, *end),
            _ => None,
        };
        let mut total_distance = matrix_total.unwrap_or(accumulated);
        if stair.is_some() {
            total_distance -= config.stair_distance;
        }
        // A corrupt matrix entry must not produce a negative extent.
        if total_distance < 0.0 || total_distance.is_nan() {
            total_distance = accumulated;
        }

        Self {
            domain,
            total_distance,
            heading_lookahead: config.heading_lookahead,
            lock_north: config.lock_north,
        }
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    /// Walkable extent of the route; the seek input's maximum.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Greatest `i` with `domain[i] <= distance < domain[i + 1]`; the last
    /// interval extends to infinity.
    pub fn segment_at(&self, distance: f64) -> usize {
        if self.domain.is_empty() {
            return 0;
        }
        for (i, lower) in self.domain.iter().enumerate() {
            let upper = self.domain.get(i + 1).copied().unwrap_or(f64::INFINITY);
            if distance >= *lower && distance < upper {
                return i;
            }
        }
        // Below the first interval; treat as the route start.
        0
    }

    /// Samples the trajectory for a distance-traveled value.
    ///
    /// With `mirrored` set (the suffix of a stair path is rendered and is
    /// addressed from its far end) the offset becomes
    /// `distance + rendered_length - total_distance`, the negation of
    /// `total - distance - rendered_length`. Returns `None` only for an
    /// empty trajectory.
    pub fn seek(&self, distance: f64, line: &Polyline, mirrored: bool) -> Option<SeekSample> {
        let segment_index = self.segment_at(distance);

        let offset = if mirrored {
            distance + line.total_length() - self.total_distance
        } else {
            distance
        };

        let point = line.point_at_length(offset)?;
        let ahead = line.point_at_length(offset + self.heading_lookahead)?;
        let heading_degrees = if self.lock_north {
            90.0
        } else {
            270.0 - (ahead.y - point.y).atan2(ahead.x - point.x).to_degrees()
        };

        let completion = if self.total_distance > 0.0 {
            (distance / self.total_distance).clamp(0.0, 1.0)
        } else {
            // A zero-length route is already complete.
            1.0
        };

        Some(SeekSample {
            segment_index,
            point,
            heading_degrees,
            completion,
        })
    }
}
