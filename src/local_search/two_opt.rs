//! 2-opt neighbourhood: first-improvement scan and hill climbing.

use crate::error::TourError;
use crate::swap::Swap;
use crate::tour::{Tour, START};
use crate::{Length, PointId};
use std::ops::ControlFlow;

use super::observer::{SearchEvent, SearchObserver};
use super::LocalSearch;

/// Length reduction from replacing `(i, next(i))` and `(j, next(j))` with
/// `(i, j)` and `(next(i), next(j))`, or 0 if the exchange does not strictly
/// shorten the tour.
///
/// `current_length` is the combined length of the two edges removed.
pub fn compute_improvement(
    tour: &Tour,
    i: PointId,
    j: PointId,
    current_length: Length,
) -> Length {
    let lengths = tour.length_map();
    let mut new_length = lengths.compute_length(i, j);
    if new_length > current_length {
        return 0;
    }
    new_length += lengths.compute_length(tour.next(i), tour.next(j));
    if new_length < current_length {
        current_length - new_length
    } else {
        0
    }
}

/// Visit every pair `(i, j)` whose successor edges are disjoint and not
/// adjacent, with the combined length of those two edges.
///
/// Pairs are visited in a fixed order from [`START`]: first `START` against
/// every later edge except the one closing the cycle, then each following
/// point against the points after its successor. Stops at the first
/// `Break` and returns its swap.
pub(crate) fn scan_candidates<F>(tour: &Tour, mut visit: F) -> Result<Option<Swap>, TourError>
where
    F: FnMut(PointId, PointId, Length) -> ControlFlow<Swap>,
{
    // The first segment cannot be compared with the last segment.
    let mut end = tour.prev(START)?;
    let first_old_length = tour.edge_length(START);
    let mut i = tour.next(tour.next(START));
    while i != end {
        let current_length = first_old_length + tour.edge_length(i);
        if let ControlFlow::Break(swap) = visit(START, i, current_length) {
            return Ok(Some(swap));
        }
        i = tour.next(i);
    }

    end = tour.prev(end)?;
    let mut i = tour.next(START);
    while i != end {
        let first_old_length = tour.edge_length(i);
        let mut j = tour.next(tour.next(i));
        while j != START {
            let current_length = first_old_length + tour.edge_length(j);
            if let ControlFlow::Break(swap) = visit(i, j, current_length) {
                return Ok(Some(swap));
            }
            j = tour.next(j);
        }
        i = tour.next(i);
    }

    Ok(None)
}

/// The first strictly improving 2-opt move in scan order, or an empty
/// [`Swap`] at a local optimum.
pub fn first_improvement(tour: &Tour) -> Result<Swap, TourError> {
    let found = scan_candidates(tour, |i, j, current_length| {
        match compute_improvement(tour, i, j, current_length) {
            0 => ControlFlow::Continue(()),
            improvement => ControlFlow::Break(Swap::new(i, j, improvement)),
        }
    })?;
    Ok(found.unwrap_or_default())
}

impl<O: SearchObserver> LocalSearch<O> {
    /// Apply first-improvement moves until none is left.
    ///
    /// Returns whether at least one move was applied.
    pub fn hill_climb(&mut self, tour: &mut Tour) -> Result<bool, TourError> {
        let mut swap = first_improvement(tour)?;
        let mut iteration = 1;
        let mut improved = false;
        while swap.improvement > 0 {
            tour.apply_move(swap.a, swap.b)?;
            self.moves_applied += 1;
            improved = true;
            if self.verbose {
                let length = tour.length();
                self.notify(SearchEvent::HillClimbStep {
                    iteration,
                    length,
                    improvement: swap.improvement,
                });
            }
            swap = first_improvement(tour)?;
            iteration += 1;
        }
        Ok(improved)
    }
}
