//! Static building-data provider (matrices, rooms, vertices, imagery).
//!
//! The navigation data is computed offline and shipped as JSON tables:
//! a distance matrix, a Floyd-Warshall "next" matrix, a room-to-vertices
//! index, a vertex coordinate table, and a directed segment-image lookup.
//! This module loads those tables, validates their shape once, and serves
//! them through `GraphDataProvider` for the rest of the engine.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::polyline::Point;
use crate::traits::GraphDataProvider;

#[derive(Debug, Error)]
pub enum GraphDataError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed data file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The tables disagree on dimensions or reference vertices out of range.
    #[error("inconsistent graph data: {0}")]
    Shape(String),
}

/// Paths of the five data files the provider loads.
#[derive(Debug, Clone)]
pub struct GraphDataFiles {
    pub distance_matrix: std::path::PathBuf,
    pub next_matrix: std::path::PathBuf,
    pub rooms: std::path::PathBuf,
    pub vertices: std::path::PathBuf,
    pub segment_images: std::path::PathBuf,
}

/// In-memory `GraphDataProvider` backed by owned tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticGraphData {
    dist: Vec<Vec<Option<f64>>>,
    next: Vec<Vec<Option<usize>>>,
    rooms: HashMap<String, Vec<usize>>,
    verts: Vec<Point>,
    images: HashMap<String, String>,
}

impl StaticGraphData {
    /// Builds a provider from already-parsed tables, validating shape.
    ///
    /// Room keys are uppercase-normalized here so later lookups can match
    /// user input case-insensitively.
    pub fn new(
        dist: Vec<Vec<Option<f64>>>,
        next: Vec<Vec<Option<usize>>>,
        rooms: HashMap<String, Vec<usize>>,
        verts: Vec<Point>,
        images: HashMap<String, String>,
    ) -> Result<Self, GraphDataError> {
        let n = verts.len();

        if dist.len() != n || next.len() != n {
            return Err(GraphDataError::Shape(format!(
                "matrix height {}/{} does not match vertex count {}",
                dist.len(),
                next.len(),
                n
            )));
        }
        for (i, row) in dist.iter().enumerate() {
            if row.len() != n {
                return Err(GraphDataError::Shape(format!(
                    "distance matrix row {} has width {}, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
        }
        for (i, row) in next.iter().enumerate() {
            if row.len() != n {
                return Err(GraphDataError::Shape(format!(
                    "next matrix row {} has width {}, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if let Some(bad) = row.iter().flatten().find(|hop| **hop >= n) {
                return Err(GraphDataError::Shape(format!(
                    "next matrix row {} references vertex {} out of range",
                    i, bad
                )));
            }
        }

        let mut normalized = HashMap::with_capacity(rooms.len());
        for (room, vertices) in rooms {
            if vertices.is_empty() {
                return Err(GraphDataError::Shape(format!(
                    "room {} maps to no vertices",
                    room
                )));
            }
            if let Some(bad) = vertices.iter().find(|v| **v >= n) {
                return Err(GraphDataError::Shape(format!(
                    "room {} references vertex {} out of range",
                    room, bad
                )));
            }
            normalized.insert(room.trim().to_uppercase(), vertices);
        }

        Ok(Self {
            dist,
            next,
            rooms: normalized,
            verts,
            images,
        })
    }

    /// Loads and validates the five JSON data files.
    pub fn load(files: &GraphDataFiles) -> Result<Self, GraphDataError> {
        let dist = parse_file(&files.distance_matrix)?;
        let next = parse_file(&files.next_matrix)?;
        let rooms = parse_file(&files.rooms)?;
        let verts = parse_file(&files.vertices)?;

        // Segment images ship as a nested from -> to -> url map.
        let nested: HashMap<String, HashMap<String, String>> =
            parse_file(&files.segment_images)?;
        let mut images = HashMap::new();
        for (from, targets) in nested {
            for (to, url) in targets {
                images.insert(format!("{}-{}", from, to), url);
            }
        }

        Self::new(dist, next, rooms, verts, images)
    }
}

fn parse_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, GraphDataError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

impl GraphDataProvider for StaticGraphData {
    fn distance(&self, from: usize, to: usize) -> Option<f64> {
        *self.dist.get(from)?.get(to)?
    }

    fn next_hop(&self, from: usize, to: usize) -> Option<usize> {
        *self.next.get(from)?.get(to)?
    }

    fn room_vertices(&self, room: &str) -> Option<&[usize]> {
        self.rooms
            .get(&room.trim().to_uppercase())
            .map(|v| v.as_slice())
    }

    fn vertex(&self, index: usize) -> Option<Point> {
        self.verts.get(index).copied()
    }

    fn segment_image(&self, from: usize, to: usize) -> Option<&str> {
        self.images
            .get(&format!("{}-{}", from, to))
            .map(|s| s.as_str())
    }

    fn vertex_count(&self) -> usize {
        self.verts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> StaticGraphData {
        StaticGraphData::new(
            vec![
                vec![Some(0.0), Some(4.0)],
                vec![Some(4.0), Some(0.0)],
            ],
            vec![vec![None, Some(1)], vec![Some(0), None]],
            HashMap::from([("Lab".to_string(), vec![0]), ("GYM".to_string(), vec![1])]),
            vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0)],
            HashMap::from([("0-1".to_string(), "seg.jpg".to_string())]),
        )
        .unwrap()
    }

    #[test]
    fn test_room_lookup_is_case_insensitive() {
        let data = tiny();
        assert_eq!(data.room_vertices("lab"), Some(&[0][..]));
        assert_eq!(data.room_vertices("  LAB "), Some(&[0][..]));
        assert_eq!(data.room_vertices("attic"), None);
    }

    #[test]
    fn test_segment_image_is_directional() {
        let data = tiny();
        assert_eq!(data.segment_image(0, 1), Some("seg.jpg"));
        assert_eq!(data.segment_image(1, 0), None);
    }

    #[test]
    fn test_out_of_range_lookups_are_none() {
        let data = tiny();
        assert_eq!(data.distance(0, 9), None);
        assert_eq!(data.next_hop(9, 0), None);
        assert_eq!(data.vertex(9), None);
    }

    #[test]
    fn test_rejects_ragged_matrix() {
        let err = StaticGraphData::new(
            vec![vec![Some(0.0)], vec![Some(0.0), Some(1.0)]],
            vec![vec![None], vec![None, None]],
            HashMap::new(),
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            HashMap::new(),
        )
        .unwrap_err();
        assert!(matches!(err, GraphDataError::Shape(_)));
    }

    #[test]
    fn test_rejects_room_without_vertices() {
        let err = StaticGraphData::new(
            vec![vec![Some(0.0)]],
            vec![vec![None]],
            HashMap::from([("VOID".to_string(), vec![])]),
            vec![Point::new(0.0, 0.0)],
            HashMap::new(),
        )
        .unwrap_err();
        assert!(matches!(err, GraphDataError::Shape(_)));
    }
}
