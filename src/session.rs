//! Navigation session orchestration.
//!
//! One session owns one active route: the reconstructed path, its
//! progress tracker, the floor-transition machine, and the image cache's
//! prefetch lifecycle. All session state lives in explicit owned fields
//! and moves through an explicit lifecycle; there is no ambient store.
//! A new route request supersedes the previous route and its in-flight
//! prefetch work.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::color::{ColorRamp, Rgb};
use crate::config::NavConfig;
use crate::error::NavError;
use crate::image_cache::{ImageCache, PreloadHandle};
use crate::pathfind;
use crate::polyline::{Point, Polyline};
use crate::progress::ProgressTracker;
use crate::schedule::Schedule;
use crate::traits::{GraphDataProvider, ImageFetcher};
use crate::transition::{Floor, TransitionMachine, stair_index};

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    PathComputed,
    Rendering,
    Tracking,
}

/// Agent marker data for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentPose {
    pub point: Point,
    pub heading_degrees: f64,
    pub color: Rgb,
}

/// Everything the rendering layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub floor: Floor,
    pub background_image: String,
    /// Points of the currently rendered trajectory half.
    pub trajectory: Vec<Point>,
    pub agent: AgentPose,
    /// Street-view image for the active segment, or the placeholder.
    pub segment_image: String,
    /// True when this seek crossed the stairwell and swapped floors.
    pub transition_occurred: bool,
}

struct ActiveRoute {
    path: Vec<usize>,
    tracker: ProgressTracker,
    machine: TransitionMachine,
    /// Trajectory up to the stair crossing (or the whole path).
    prefix: Polyline,
    /// Trajectory from the stair crossing onward, when one exists.
    suffix: Option<Polyline>,
    current_segment: usize,
}

fn rendered_line(route: &ActiveRoute) -> &Polyline {
    if route.machine.suffix_shown() {
        route.suffix.as_ref().unwrap_or(&route.prefix)
    } else {
        &route.prefix
    }
}

/// Orchestrates pathfinding, progress tracking, floor transitions, and
/// image prefetch for one active route.
pub struct NavigationSession<G, F: ImageFetcher> {
    graph: Arc<G>,
    config: NavConfig,
    cache: ImageCache<F>,
    colors: ColorRamp,
    state: SessionState,
    route: Option<ActiveRoute>,
    preload: Option<PreloadHandle>,
    schedule_cursor: usize,
}

impl<G: GraphDataProvider, F: ImageFetcher> NavigationSession<G, F> {
    pub fn new(graph: Arc<G>, fetcher: F, config: NavConfig) -> Self {
        let cache = ImageCache::new(fetcher, &config);
        Self {
            graph,
            config,
            cache,
            colors: ColorRamp::new(),
            state: SessionState::Idle,
            route: None,
            preload: None,
            schedule_cursor: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn path(&self) -> Option<&[usize]> {
        self.route.as_ref().map(|r| r.path.as_slice())
    }

    pub fn current_segment(&self) -> Option<usize> {
        self.route.as_ref().map(|r| r.current_segment)
    }

    /// Walkable extent of the active route; the seek input's maximum.
    pub fn total_distance(&self) -> Option<f64> {
        self.route.as_ref().map(|r| r.tracker.total_distance())
    }

    pub fn cache(&self) -> &ImageCache<F> {
        &self.cache
    }

    /// Computes and activates a route between two rooms.
    ///
    /// Input errors (unknown room, identical rooms) and "no path" leave
    /// the session exactly as it was. On success the previous route and
    /// its in-flight prefetch are discarded, the new route's imagery
    /// starts prefetching, and the initial frame (distance zero) is
    /// returned with the session in `Rendering`.
    pub fn request_route(&mut self, start_room: &str, end_room: &str) -> Result<Frame, NavError> {
        let start = start_room.trim().to_uppercase();
        let end = end_room.trim().to_uppercase();

        if self.graph.room_vertices(&start).is_none() {
            return Err(NavError::UnknownRoom(start));
        }
        if self.graph.room_vertices(&end).is_none() {
            return Err(NavError::UnknownRoom(end));
        }
        if start == end {
            return Err(NavError::SameRoom);
        }

        let path = pathfind::find_path(self.graph.as_ref(), &start, &end);
        if path.is_empty() {
            warn!(%start, %end, "no path between rooms");
            return Err(NavError::NoPath { start, end });
        }

        let stair = stair_index(self.graph.as_ref(), &path, self.config.stair_distance);
        let (prefix_slice, suffix_slice) = match stair {
            Some(k) => (&path[..k], Some(&path[k..])),
            None => (&path[..], None),
        };

        // Geometry first: a missing coordinate aborts before any state
        // changes and surfaces as "no path".
        let Some(prefix) = self.polyline_for(prefix_slice) else {
            warn!(%start, %end, "vertex coordinate missing, dropping route");
            return Err(NavError::NoPath { start, end });
        };
        let suffix = match suffix_slice {
            Some(slice) => match self.polyline_for(slice) {
                Some(line) => Some(line),
                None => {
                    warn!(%start, %end, "vertex coordinate missing, dropping route");
                    return Err(NavError::NoPath { start, end });
                }
            },
            None => None,
        };

        let tracker = ProgressTracker::new(self.graph.as_ref(), &path, stair, &self.config);
        let machine = TransitionMachine::new(&path, stair, self.config.floor_threshold);

        debug!(
            vertices = path.len(),
            stair = ?stair,
            total = tracker.total_distance(),
            "route activated"
        );

        let handle = self.cache.preload(&path);
        self.preload = Some(handle);
        self.route = Some(ActiveRoute {
            path,
            tracker,
            machine,
            prefix,
            suffix,
            current_segment: 0,
        });
        self.state = SessionState::PathComputed;

        let frame = self
            .sample_frame(0.0)
            .ok_or(NavError::NoPath { start, end })?;
        self.state = SessionState::Rendering;
        Ok(frame)
    }

    /// Maps a scroll/slider distance to a frame.
    ///
    /// The sole integration point between animation seeking and floor
    /// swapping: every call advances the transition machine with the new
    /// segment index. A no-op (`None`) before any route exists.
    pub fn seek(&mut self, distance: f64) -> Option<Frame> {
        let frame = self.sample_frame(distance)?;
        self.state = SessionState::Tracking;
        Some(frame)
    }

    /// Discards the active route and any pending prefetch. Always safe.
    pub fn reset(&mut self) {
        self.cache.cancel_pending();
        self.preload = None;
        self.route = None;
        self.state = SessionState::Idle;
    }

    /// Routes from the schedule's current room to the next, advancing the
    /// wrapping schedule cursor on success.
    pub fn route_next_scheduled(&mut self, schedule: &Schedule) -> Result<Frame, NavError> {
        let (start, end) = schedule.leg(self.schedule_cursor).ok_or(NavError::EmptySchedule)?;
        let (start, end) = (start.to_string(), end.to_string());

        let frame = self.request_route(&start, &end)?;
        self.schedule_cursor = (self.schedule_cursor + 1) % schedule.len();
        Ok(frame)
    }

    /// Barrier for the active route's image prefetch. Optional: callers
    /// that never await still get imagery as fetches land.
    pub async fn await_preload(&mut self) {
        if let Some(handle) = self.preload.take() {
            handle.wait().await;
        }
    }

    fn sample_frame(&mut self, distance: f64) -> Option<Frame> {
        let route = self.route.as_mut()?;

        let mut sample =
            route
                .tracker
                .seek(distance, rendered_line(route), route.machine.suffix_shown())?;

        let fired = route.machine.advance(sample.segment_index);
        if fired.is_some() {
            // The displayed half changed; re-sample the agent on the
            // newly rendered trajectory with the new addressing mode.
            sample =
                route
                    .tracker
                    .seek(distance, rendered_line(route), route.machine.suffix_shown())?;
        }
        route.current_segment = sample.segment_index;

        let segment_image = if sample.segment_index + 1 < route.path.len() {
            self.cache.get(
                route.path[sample.segment_index],
                route.path[sample.segment_index + 1],
            )
        } else {
            self.config.default_image.clone()
        };

        let floor = route.machine.current_floor();
        let background_image = match floor {
            Floor::First => self.config.first_floor_image.clone(),
            Floor::Second => self.config.second_floor_image.clone(),
        };

        Some(Frame {
            floor,
            background_image,
            trajectory: rendered_line(route).points().to_vec(),
            agent: AgentPose {
                point: sample.point,
                heading_degrees: sample.heading_degrees,
                color: self.colors.color_at(sample.completion),
            },
            segment_image,
            transition_occurred: fired.is_some(),
        })
    }

    fn polyline_for(&self, vertices: &[usize]) -> Option<Polyline> {
        let mut points = Vec::with_capacity(vertices.len());
        for &vertex in vertices {
            points.push(self.graph.vertex(vertex)?);
        }
        Some(Polyline::new(points))
    }
}
