//! Cyclic tour stored as undirected adjacency plus a derived direction.

use crate::error::TourError;
use crate::length_map::LengthMap;
use crate::{Length, PointId, INVALID_POINT};

/// Traversals and direction rebuilds always start here.
pub const START: PointId = 0;

/// A Hamiltonian cycle over all points.
///
/// Every point holds two adjacency slots. Since adjacency has no direction,
/// `next` fixes one orientation and is rebuilt by a full traversal after
/// each move. The embedded [`LengthMap`] caches exactly the edges of the
/// cycle.
///
/// `Clone` produces a fully independent copy (cache included), which is how
/// alternatives are explored without touching the current best tour.
#[derive(Debug, Clone)]
pub struct Tour {
    length_map: LengthMap,
    adjacents: Vec<[PointId; 2]>,
    next: Vec<PointId>,
}

impl Tour {
    /// Build the tour visiting `initial_tour` in order and closing back to
    /// its first point.
    pub fn new(initial_tour: &[PointId], x: &[f64], y: &[f64]) -> Result<Self, TourError> {
        let point_count = initial_tour.len();
        validate_order(initial_tour, x.len())?;
        if y.len() != x.len() {
            return Err(TourError::invalid_order(format!(
                "{} x coordinates but {} y coordinates",
                x.len(),
                y.len()
            )));
        }

        let mut tour = Tour {
            length_map: LengthMap::new(initial_tour, x, y),
            adjacents: vec![[INVALID_POINT; 2]; point_count],
            next: vec![INVALID_POINT; point_count],
        };
        tour.reset_adjacencies(initial_tour)?;
        tour.update_next()?;
        Ok(tour)
    }

    pub fn point_count(&self) -> usize {
        self.next.len()
    }

    pub fn length_map(&self) -> &LengthMap {
        &self.length_map
    }

    /// The two points adjacent to `i`, in slot order.
    pub fn neighbors(&self, i: PointId) -> [PointId; 2] {
        self.adjacents[i]
    }

    pub fn next(&self, i: PointId) -> PointId {
        self.next[i]
    }

    /// The adjacency slot of `i` that is not `next(i)`.
    pub fn prev(&self, i: PointId) -> Result<PointId, TourError> {
        let next = self.next[i];
        match self.adjacents[i] {
            [first, second] if first == next && second != next => Ok(second),
            [first, second] if second == next && first != next => Ok(first),
            _ => Err(TourError::MissingPredecessor { point: i }),
        }
    }

    /// Total length of the cycle.
    pub fn length(&self) -> Length {
        (0..self.next.len()).map(|i| self.edge_length(i)).sum()
    }

    /// Cached length of the edge `(i, next(i))`.
    pub fn edge_length(&self, i: PointId) -> Length {
        self.length_map.length(i, self.next[i])
    }

    /// Points in traversal order, starting from point 0.
    pub fn order(&self) -> Result<Vec<PointId>, TourError> {
        let point_count = self.next.len();
        let mut ordered_points = Vec::with_capacity(point_count);
        let mut current = START;
        loop {
            if ordered_points.len() >= point_count {
                return Err(TourError::BrokenCycle {
                    visited: ordered_points.len() + 1,
                    expected: point_count,
                });
            }
            ordered_points.push(current);
            current = self.next[current];
            if current == START {
                break;
            }
        }
        Ok(ordered_points)
    }

    /// Apply the 2-opt move removing `(a, next(a))` and `(b, next(b))` and
    /// adding `(a, b)` and `(next(a), next(b))`.
    ///
    /// `a` and `b` must be distinct and their successor edges must not touch;
    /// the search only proposes such pairs.
    pub fn apply_move(&mut self, a: PointId, b: PointId) -> Result<(), TourError> {
        let next_a = self.next[a];
        let next_b = self.next[b];

        self.length_map.erase(a, next_a);
        self.length_map.erase(b, next_b);
        self.length_map.insert(a, b);
        self.length_map.insert(next_a, next_b);

        self.break_adjacency(a, next_a);
        self.break_adjacency(b, next_b);
        self.create_adjacency(a, b)?;
        self.create_adjacency(next_a, next_b)?;

        self.update_next()
    }

    /// Verify every structural invariant: two distinct, mutual neighbours per
    /// point, `next` drawn from the adjacency, a single cycle over all
    /// points, and a cache holding exactly the cycle's edges.
    pub fn check_invariants(&self) -> Result<(), TourError> {
        for (point, slots) in self.adjacents.iter().enumerate() {
            for &adjacent in slots {
                if adjacent == INVALID_POINT || !self.adjacents[adjacent].contains(&point) {
                    return Err(TourError::DetachedPoint { point });
                }
            }
            if slots[0] == slots[1] || slots.contains(&point) {
                return Err(TourError::MissingPredecessor { point });
            }
            self.prev(point)?;
        }

        let order = self.order()?;
        if order.len() != self.point_count() {
            return Err(TourError::BrokenCycle {
                visited: order.len(),
                expected: self.point_count(),
            });
        }

        let cached_edges = self.length_map.edge_count();
        let all_cached = (0..self.point_count())
            .all(|i| self.length_map.get(i, self.next[i]).is_some());
        if cached_edges != self.point_count() || !all_cached {
            return Err(TourError::BrokenCycle {
                visited: cached_edges,
                expected: self.point_count(),
            });
        }

        Ok(())
    }

    fn reset_adjacencies(&mut self, initial_tour: &[PointId]) -> Result<(), TourError> {
        let mut prev = initial_tour[initial_tour.len() - 1];
        for &point in initial_tour {
            self.create_adjacency(point, prev)?;
            prev = point;
        }
        Ok(())
    }

    /// Re-derive `next` by walking the adjacency from [`START`].
    fn update_next(&mut self) -> Result<(), TourError> {
        let point_count = self.next.len();
        let first = self.adjacents[START][0];
        if first == INVALID_POINT {
            return Err(TourError::DetachedPoint { point: START });
        }

        self.next[START] = first;
        let mut current = START;
        let mut visited = 1;
        loop {
            let prev = current;
            current = self.next[current];
            if current == START {
                break;
            }
            if visited >= point_count {
                return Err(TourError::BrokenCycle {
                    visited: visited + 1,
                    expected: point_count,
                });
            }
            self.next[current] = self.other(current, prev)?;
            visited += 1;
        }

        if visited != point_count {
            return Err(TourError::BrokenCycle {
                visited,
                expected: point_count,
            });
        }
        Ok(())
    }

    /// The neighbour of `point` that is not `adjacent`.
    fn other(&self, point: PointId, adjacent: PointId) -> Result<PointId, TourError> {
        let [first, second] = self.adjacents[point];
        if first == INVALID_POINT || second == INVALID_POINT {
            return Err(TourError::DetachedPoint { point });
        }
        Ok(if first == adjacent { second } else { first })
    }

    fn create_adjacency(&mut self, point1: PointId, point2: PointId) -> Result<(), TourError> {
        self.fill_adjacent(point1, point2)?;
        self.fill_adjacent(point2, point1)
    }

    fn fill_adjacent(&mut self, point: PointId, new_adjacent: PointId) -> Result<(), TourError> {
        let slots = &mut self.adjacents[point];
        match slots.iter_mut().find(|slot| **slot == INVALID_POINT) {
            Some(slot) => {
                *slot = new_adjacent;
                Ok(())
            }
            None => Err(TourError::NoFreeSlot { point }),
        }
    }

    fn break_adjacency(&mut self, point1: PointId, point2: PointId) {
        vacate(&mut self.adjacents[point1], point2);
        vacate(&mut self.adjacents[point2], point1);
    }
}

fn vacate(slots: &mut [PointId; 2], adjacent: PointId) {
    for slot in slots.iter_mut() {
        if *slot == adjacent {
            *slot = INVALID_POINT;
        }
    }
}

/// Check that `order` is a permutation of `0..point_count` long enough to
/// form a cycle.
fn validate_order(order: &[PointId], point_count: usize) -> Result<(), TourError> {
    if order.len() != point_count {
        return Err(TourError::invalid_order(format!(
            "{} points in the ordering but {} coordinates",
            order.len(),
            point_count
        )));
    }
    if point_count < 3 {
        return Err(TourError::invalid_order(format!(
            "a tour needs at least 3 points, got {}",
            point_count
        )));
    }

    let mut seen = vec![false; point_count];
    for &point in order {
        if point >= point_count {
            return Err(TourError::invalid_order(format!(
                "point {} is out of range",
                point
            )));
        }
        if seen[point] {
            return Err(TourError::invalid_order(format!(
                "point {} appears more than once",
                point
            )));
        }
        seen[point] = true;
    }
    Ok(())
}
