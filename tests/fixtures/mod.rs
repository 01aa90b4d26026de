//! Test fixtures for wayfinder.
//!
//! Provides a realistic two-floor building graph (chain of corridors
//! joined by one stairwell) plus a scriptable fake image fetcher.

pub mod building;

pub use building::*;
