//! Point coordinates and the cache of rounded lengths for the edges of a tour.

use crate::{Length, PointId};
use std::collections::HashMap;

/// Euclidean length of `(dx, dy)`, rounded by adding one half and truncating.
///
/// Every rounded length in the crate goes through this function.
pub fn rounded_distance(dx: f64, dy: f64) -> Length {
    ((dx * dx + dy * dy).sqrt() + 0.5) as Length
}

/// Owns the coordinates of every point and caches the rounded length of each
/// edge currently present in the tour.
///
/// Entries are keyed by the smaller point id first, so `(a, b)` and `(b, a)`
/// address the same edge.
#[derive(Debug, Clone)]
pub struct LengthMap {
    x: Vec<f64>,
    y: Vec<f64>,
    lengths: Vec<HashMap<PointId, Length>>,
}

impl LengthMap {
    /// Build the cache for the cycle visiting `ordered_points` in order.
    pub fn new(ordered_points: &[PointId], x: &[f64], y: &[f64]) -> Self {
        let mut map = LengthMap {
            x: x.to_vec(),
            y: y.to_vec(),
            lengths: vec![HashMap::new(); x.len()],
        };

        if let Some(&last) = ordered_points.last() {
            let mut prev = last;
            for &current in ordered_points {
                map.insert(prev, current);
                prev = current;
            }
        }

        map
    }

    /// Cached length of an edge that is currently part of the tour.
    ///
    /// # Panics
    ///
    /// Panics when `(a, b)` is not a cached edge. The tour only asks for
    /// edges it holds, so a miss means the cache and the adjacency diverged.
    pub fn length(&self, a: PointId, b: PointId) -> Length {
        self.lengths[a.min(b)][&a.max(b)]
    }

    /// Cached length of `(a, b)`, or `None` if the edge is not in the tour.
    pub fn get(&self, a: PointId, b: PointId) -> Option<Length> {
        self.lengths[a.min(b)].get(&a.max(b)).copied()
    }

    /// Compute and store the length of `(a, b)`, replacing any previous entry.
    pub fn insert(&mut self, a: PointId, b: PointId) {
        let length = self.compute_length(a, b);
        self.lengths[a.min(b)].insert(a.max(b), length);
    }

    pub fn erase(&mut self, a: PointId, b: PointId) {
        self.lengths[a.min(b)].remove(&a.max(b));
    }

    /// Rounded Euclidean distance between any two points, cached or not.
    pub fn compute_length(&self, a: PointId, b: PointId) -> Length {
        rounded_distance(self.x[a] - self.x[b], self.y[a] - self.y[b])
    }

    /// Number of cached edges.
    pub fn edge_count(&self) -> usize {
        self.lengths.iter().map(HashMap::len).sum()
    }

    pub fn point_count(&self) -> usize {
        self.x.len()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }
}
