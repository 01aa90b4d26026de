//! Floor-transition state machine.
//!
//! A path that crosses a stairwell is rendered in two halves, one per
//! floor. The machine watches the active segment index and decides when
//! the visualization must swap halves, guaranteeing each direction fires
//! exactly once until the opposite crossing re-arms it.
//!
//! Transition names follow the path halves: `EnterSecondFloor` is the
//! forward crossing (render the suffix from the stair onward) and
//! `EnterFirstFloor` the reverse (render the prefix). When the path
//! starts on the upper floor the floor labeling inverts along with the
//! segment classification, so the names stay aligned with the halves.

use tracing::debug;

use crate::traits::GraphDataProvider;

/// Which floor's imagery is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Floor {
    First,
    Second,
}

/// A fired floor swap, dispatched by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorTransition {
    /// Render the path prefix and show its floor.
    EnterFirstFloor,
    /// Render the path suffix from the stair crossing onward.
    EnterSecondFloor,
}

/// Index of the vertex just past the first stair-sentinel edge, if any.
///
/// Only the first sentinel edge is honored; paths with more than one
/// floor crossing are not supported.
pub fn stair_index<G: GraphDataProvider>(
    graph: &G,
    path: &[usize],
    stair_distance: f64,
) -> Option<usize> {
    for i in 0..path.len().saturating_sub(1) {
        if graph.distance(path[i], path[i + 1]) == Some(stair_distance) {
            return Some(i + 1);
        }
    }
    None
}

/// Tracks which half of a stair-crossing path is rendered.
#[derive(Debug)]
pub struct TransitionMachine {
    path: Vec<usize>,
    floor_threshold: usize,
    stair_index: Option<usize>,
    starts_on_second: bool,
    prefix_shown: bool,
    suffix_shown: bool,
    // Reentrancy guard: a transition being applied must not trigger another.
    advancing: bool,
}

impl TransitionMachine {
    pub fn new(path: &[usize], stair_index: Option<usize>, floor_threshold: usize) -> Self {
        let starts_on_second = path.first().is_some_and(|v| *v > floor_threshold);
        Self {
            path: path.to_vec(),
            floor_threshold,
            stair_index,
            starts_on_second,
            prefix_shown: true,
            suffix_shown: false,
            advancing: false,
        }
    }

    /// Index of the vertex after the stair edge, when the path has one.
    pub fn stair(&self) -> Option<usize> {
        self.stair_index
    }

    /// True while the suffix half of the path is rendered.
    pub fn suffix_shown(&self) -> bool {
        self.suffix_shown
    }

    /// Floor of the currently rendered half.
    pub fn current_floor(&self) -> Floor {
        let vertex = if self.suffix_shown {
            self.path.last()
        } else {
            self.path.first()
        };
        match vertex {
            Some(v) if *v > self.floor_threshold => Floor::Second,
            _ => Floor::First,
        }
    }

    /// Re-evaluates the displayed half for a new active segment.
    ///
    /// Returns the transition to apply, or `None` when the segment's floor
    /// is already on screen. Each direction fires at most once until the
    /// opposite crossing re-arms it.
    pub fn advance(&mut self, segment_index: usize) -> Option<FloorTransition> {
        if self.advancing || self.stair_index.is_none() || self.path.is_empty() {
            return None;
        }
        self.advancing = true;

        let idx = segment_index.min(self.path.len() - 1);
        let mut on_suffix_floor = self.path[idx] > self.floor_threshold;
        if self.starts_on_second {
            on_suffix_floor = !on_suffix_floor;
        }

        let fired = if on_suffix_floor && self.prefix_shown {
            self.prefix_shown = false;
            self.suffix_shown = true;
            Some(FloorTransition::EnterSecondFloor)
        } else if !on_suffix_floor && self.suffix_shown {
            self.suffix_shown = false;
            self.prefix_shown = true;
            Some(FloorTransition::EnterFirstFloor)
        } else {
            None
        };

        if let Some(transition) = fired {
            debug!(?transition, segment_index, "floor transition fired");
        }

        self.advancing = false;
        fired
    }
}
