//! Shortest-path reconstruction over the precomputed matrices.
//!
//! All of this is pure: the matrices were computed offline (Floyd-Warshall
//! "next" form) and the engine only reconstructs vertex sequences from
//! them. A corrupt or disconnected matrix must never hang the caller, so
//! reconstruction is bounded by the vertex count and aborts to an empty
//! path on any missing entry.

use tracing::warn;

use crate::traits::GraphDataProvider;

/// Finds the shortest vertex path between two rooms.
///
/// Returns an empty path when either room is unknown or both identifiers
/// name the same room. Room matching is case-insensitive.
///
/// A room may touch several vertices, so representatives are chosen in two
/// stages: first the start candidate closest to any end candidate, then
/// the end candidate closest to that chosen start. Ties go to the first
/// minimal candidate in input order, which keeps the result deterministic.
pub fn find_path<G: GraphDataProvider>(graph: &G, start_room: &str, end_room: &str) -> Vec<usize> {
    let start_room = start_room.trim().to_uppercase();
    let end_room = end_room.trim().to_uppercase();
    if start_room == end_room {
        return Vec::new();
    }

    let Some(start_candidates) = graph.room_vertices(&start_room) else {
        return Vec::new();
    };
    let Some(end_candidates) = graph.room_vertices(&end_room) else {
        return Vec::new();
    };

    let Some(start) = select_best_node(graph, start_candidates, end_candidates) else {
        return Vec::new();
    };
    let Some(end) = select_best_node(graph, end_candidates, &[start]) else {
        return Vec::new();
    };

    construct_path(graph, start, end)
}

/// Picks the candidate whose minimum distance to any goal is smallest.
///
/// Candidates with no finite distance to any goal are skipped. The first
/// strictly-better candidate wins, so input order breaks ties.
pub fn select_best_node<G: GraphDataProvider>(
    graph: &G,
    candidates: &[usize],
    goals: &[usize],
) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut best_distance = f64::INFINITY;

    for &candidate in candidates {
        let mut min_to_goal = f64::INFINITY;
        for &goal in goals {
            if let Some(dist) = graph.distance(candidate, goal) {
                if dist < min_to_goal {
                    min_to_goal = dist;
                }
            }
        }
        if min_to_goal < best_distance {
            best_distance = min_to_goal;
            best = Some(candidate);
        }
    }

    best
}

/// Walks the next-hop matrix from `start` until `end` is reached.
///
/// A missing entry mid-walk signals a disconnected or corrupt matrix; the
/// partial path is discarded. The walk is hard-bounded by the vertex
/// count so a cyclic matrix cannot loop forever.
pub fn construct_path<G: GraphDataProvider>(graph: &G, start: usize, end: usize) -> Vec<usize> {
    if start == end {
        return vec![start];
    }

    let bound = graph.vertex_count();
    let mut path = vec![start];
    let mut current = start;

    while current != end {
        let Some(next) = graph.next_hop(current, end) else {
            warn!(current, end, "next-hop missing mid-reconstruction, no path");
            return Vec::new();
        };
        path.push(next);
        current = next;

        if path.len() > bound {
            warn!(start, end, bound, "path exceeded vertex count, matrix is cyclic");
            return Vec::new();
        }
    }

    path
}
