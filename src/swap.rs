//! Value types describing 2-opt moves and the edges they remove.

use crate::{Length, PointId, INVALID_POINT};
use serde::{Deserialize, Serialize};

/// A 2-opt move: the successor edges of `a` and `b` are replaced by
/// `(a, b)` and `(next(a), next(b))`.
///
/// `improvement` is the length reduction for an improving move, or the exact
/// cost for a lateral one. The default value means "no move found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub a: PointId,
    pub b: PointId,
    pub improvement: Length,
}

impl Swap {
    pub fn new(a: PointId, b: PointId, improvement: Length) -> Self {
        Swap { a, b, improvement }
    }

    /// Whether this is the empty swap returned when no move exists.
    pub fn is_empty(&self) -> bool {
        self.a == INVALID_POINT || self.b == INVALID_POINT
    }
}

impl Default for Swap {
    fn default() -> Self {
        Swap {
            a: INVALID_POINT,
            b: INVALID_POINT,
            improvement: 0,
        }
    }
}

/// An edge given by a point and its successor.
///
/// Equality ignores direction: `Segment::new(1, 2) == Segment::new(2, 1)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Segment {
    pub a: PointId,
    pub b: PointId,
}

impl Segment {
    pub fn new(a: PointId, b: PointId) -> Self {
        Segment { a, b }
    }

    fn key(&self) -> (PointId, PointId) {
        (self.a.min(self.b), self.a.max(self.b))
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Segment {}

/// The two edges removed by a swap.
///
/// Equality ignores both the order of the segments and their direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pair {
    pub first: Segment,
    pub second: Segment,
}

impl Pair {
    pub fn new(first: Segment, second: Segment) -> Self {
        Pair { first, second }
    }

    fn key(&self) -> ((PointId, PointId), (PointId, PointId)) {
        let (p, q) = (self.first.key(), self.second.key());
        if p <= q {
            (p, q)
        } else {
            (q, p)
        }
    }
}

impl PartialEq for Pair {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pair {}
