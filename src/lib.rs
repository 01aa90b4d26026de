//! wayfinder — multi-floor indoor navigation engine
//!
//! Reconstructs shortest paths between named rooms from precomputed
//! matrices, drives the animated route view (scroll position to path
//! progress, floor transitions at stairwells), and keeps per-segment
//! street-view imagery prefetched without stalling animation.

pub mod color;
pub mod config;
pub mod error;
pub mod graph_data;
pub mod image_cache;
pub mod pathfind;
pub mod polyline;
pub mod progress;
pub mod schedule;
pub mod session;
pub mod street_view;
pub mod traits;
pub mod transition;
