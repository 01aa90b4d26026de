//! A small two-floor building.
//!
//! Layout (vertex indices; threshold 4 splits the floors):
//!
//! ```text
//! first floor:   0 --10-- 1 --10-- 2 --10-- 3 (stair bottom)    4 (isolated)
//! stairwell:                                3 --sentinel-- 5
//! second floor:  5 (stair top) --10-- 6 --10-- 7
//! ```
//!
//! Rooms: 101=[0], 102=[1,2], 201=[5], 202=[6], 204=[7], STORAGE=[4].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use wayfinder::config::NavConfig;
use wayfinder::error::ImageError;
use wayfinder::graph_data::StaticGraphData;
use wayfinder::polyline::Point;
use wayfinder::traits::ImageFetcher;

pub const STAIR: f64 = 10_000.0;

/// Vertex indices along the only corridor, in walking order.
pub const CHAIN: [usize; 7] = [0, 1, 2, 3, 5, 6, 7];

fn edge(a: usize, b: usize) -> f64 {
    if (a == 3 && b == 5) || (a == 5 && b == 3) {
        STAIR
    } else {
        10.0
    }
}

pub fn building() -> StaticGraphData {
    let n = 8;
    let mut dist = vec![vec![None; n]; n];
    let mut next = vec![vec![None; n]; n];

    for i in 0..CHAIN.len() {
        dist[CHAIN[i]][CHAIN[i]] = Some(0.0);
        for j in 0..CHAIN.len() {
            if i == j {
                continue;
            }
            let (lo, hi) = if i < j { (i, j) } else { (j, i) };
            let total: f64 = (lo..hi).map(|k| edge(CHAIN[k], CHAIN[k + 1])).sum();
            dist[CHAIN[i]][CHAIN[j]] = Some(total);
            next[CHAIN[i]][CHAIN[j]] = Some(if j > i { CHAIN[i + 1] } else { CHAIN[i - 1] });
        }
    }

    let verts = vec![
        Point::new(0.0, 0.0),   // 0
        Point::new(10.0, 0.0),  // 1
        Point::new(20.0, 0.0),  // 2
        Point::new(20.0, 10.0), // 3, stair bottom
        Point::new(30.0, 10.0), // 4, isolated storage room
        Point::new(40.0, 0.0),  // 5, stair top
        Point::new(50.0, 0.0),  // 6
        Point::new(60.0, 0.0),  // 7
    ];

    let rooms = HashMap::from([
        ("101".to_string(), vec![0]),
        ("102".to_string(), vec![1, 2]),
        ("201".to_string(), vec![5]),
        ("202".to_string(), vec![6]),
        ("204".to_string(), vec![7]),
        ("STORAGE".to_string(), vec![4]),
    ]);

    let mut images = HashMap::new();
    for pair in CHAIN.windows(2) {
        images.insert(
            format!("{}-{}", pair[0], pair[1]),
            format!("assets/{}-{}.jpg", pair[0], pair[1]),
        );
    }

    StaticGraphData::new(dist, next, rooms, verts, images).expect("fixture graph is well formed")
}

pub fn config() -> NavConfig {
    NavConfig {
        floor_threshold: 4,
        cache_capacity: 8,
        ..NavConfig::default()
    }
}

/// Scriptable in-memory fetcher: records requested keys, can delay each
/// fetch, and can be told to fail specific keys.
#[derive(Clone, Default)]
pub struct FakeFetcher {
    pub delay: Duration,
    pub fail_keys: HashSet<String>,
    pub fetched: Arc<Mutex<Vec<String>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn failing(keys: &[&str]) -> Self {
        Self {
            fail_keys: keys.iter().map(|k| k.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().len()
    }
}

#[async_trait]
impl ImageFetcher for FakeFetcher {
    async fn fetch(&self, key: &str) -> Result<String, ImageError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.fetched.lock().push(key.to_string());
        if self.fail_keys.contains(key) {
            return Err(ImageError::Unknown(key.to_string()));
        }
        Ok(format!("https://img.test/{}.jpg", key))
    }
}
