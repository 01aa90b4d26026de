//! Polyline representation for rendered trajectories.
//!
//! A trajectory is the on-screen polyline for one floor's portion of a
//! path. The progress tracker addresses it by arc length, so this type
//! supports sampling a point at any offset along the line. Offsets are
//! clamped to the line's extent, matching the behavior of the SVG
//! `getPointAtLength` API the rendering layer ultimately talks to.

use serde::{Deserialize, Serialize};

/// A 2-D point in floor-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_to(&self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// A rendered trajectory as an ordered sequence of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total arc length of the polyline.
    pub fn total_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(pair[1]))
            .sum()
    }

    /// Samples the point at the given arc-length offset.
    ///
    /// Offsets outside `[0, total_length]` clamp to the endpoints. Returns
    /// `None` only when the polyline has no points.
    pub fn point_at_length(&self, offset: f64) -> Option<Point> {
        let first = *self.points.first()?;
        if offset <= 0.0 || self.points.len() == 1 {
            return Some(first);
        }

        let mut remaining = offset;
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let span = a.distance_to(b);
            if remaining <= span && span > 0.0 {
                let t = remaining / span;
                return Some(Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
            }
            remaining -= span;
        }

        self.points.last().copied()
    }
}
