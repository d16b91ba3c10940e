//! Lateral moves and the escalating perturbation climb.
//!
//! A 2-opt local optimum is left by applying an exchange of a fixed cost
//! (0 for a sideways move), re-optimising while that exchange's edges may
//! not be removed again, and keeping the result only if the whole tour got
//! shorter. Costs are tried in increasing order, each level being the
//! smallest cost above the previous one that some exchange actually has.

use crate::error::TourError;
use crate::swap::{Pair, Segment, Swap};
use crate::tour::Tour;
use crate::{Length, PointId, INVALID_LENGTH};
use std::ops::ControlFlow;

use super::observer::{SearchEvent, SearchObserver};
use super::two_opt::{compute_improvement, scan_candidates};
use super::LocalSearch;

/// Whether exchanging the successor edges of `i` and `j` costs exactly
/// `desired_cost`.
///
/// When the exchange costs more, `next_cost` is lowered to that cost if it
/// is smaller than the current value, so that after a full scan it holds the
/// cheapest level above `desired_cost`.
pub fn is_valid_move(
    tour: &Tour,
    i: PointId,
    j: PointId,
    current_length: Length,
    desired_cost: Length,
    next_cost: &mut Length,
) -> bool {
    let lengths = tour.length_map();
    let new_length =
        lengths.compute_length(i, j) + lengths.compute_length(tour.next(i), tour.next(j));
    let target_length = current_length + desired_cost;
    if new_length > target_length {
        *next_cost = (*next_cost).min(desired_cost + new_length - target_length);
    }
    new_length == target_length
}

/// Every exchange costing exactly `cost`, in scan order.
pub fn find_swaps(
    tour: &Tour,
    cost: Length,
    next_cost: &mut Length,
) -> Result<Vec<Swap>, TourError> {
    let mut swaps = Vec::new();
    scan_candidates(tour, |i, j, current_length| {
        if is_valid_move(tour, i, j, current_length, cost, next_cost) {
            swaps.push(Swap::new(i, j, cost));
        }
        ControlFlow::Continue(())
    })?;
    Ok(swaps)
}

/// Like [`first_improvement`](super::two_opt::first_improvement), but never
/// proposes removing the two edges in `restriction`.
pub fn restricted_first_improvement(tour: &Tour, restriction: &Pair) -> Result<Swap, TourError> {
    let found = scan_candidates(tour, |i, j, current_length| {
        let improvement = compute_improvement(tour, i, j, current_length);
        if improvement > 0 {
            let removed = Pair::new(
                Segment::new(i, tour.next(i)),
                Segment::new(j, tour.next(j)),
            );
            if removed != *restriction {
                return ControlFlow::Break(Swap::new(i, j, improvement));
            }
        }
        ControlFlow::Continue(())
    })?;
    Ok(found.unwrap_or_default())
}

/// The two edges that applying `swap` to `tour` adds, `(a, b)` and
/// `(next(a), next(b))`.
///
/// The re-optimisation after a perturbation may not remove this pair, which
/// would simply undo it.
pub fn perturbation_restriction(tour: &Tour, swap: &Swap) -> Pair {
    Pair::new(
        Segment::new(swap.a, swap.b),
        Segment::new(tour.next(swap.a), tour.next(swap.b)),
    )
}

impl<O: SearchObserver> LocalSearch<O> {
    /// Try each swap in turn on a copy of `tour`, re-optimise, and return the
    /// first copy that ends up strictly shorter than `tour`.
    ///
    /// Returns an unchanged copy of `tour` if none does.
    pub fn perturbation_climb_swaps(
        &mut self,
        swaps: &[Swap],
        tour: &Tour,
    ) -> Result<Tour, TourError> {
        let original_length = tour.length();
        for swap in swaps {
            let restriction = perturbation_restriction(tour, swap);
            let mut new_tour = tour.clone();
            new_tour.apply_move(swap.a, swap.b)?;
            log::debug!(
                "perturbing with ({}, {}) at cost {}",
                swap.a,
                swap.b,
                swap.improvement
            );

            loop {
                let new_swap = restricted_first_improvement(&new_tour, &restriction)?;
                if new_swap.improvement == 0 {
                    break;
                }
                new_tour.apply_move(new_swap.a, new_swap.b)?;
            }
            self.hill_climb(&mut new_tour)?;

            if new_tour.length() < original_length {
                return Ok(new_tour);
            }
        }
        Ok(tour.clone())
    }

    /// Perturbation climb over every exchange costing exactly `cost`.
    pub fn perturbation_climb_at_cost(
        &mut self,
        tour: &Tour,
        cost: Length,
        next_cost: &mut Length,
    ) -> Result<Tour, TourError> {
        let swaps = find_swaps(tour, cost, next_cost)?;
        self.perturbation_climb_swaps(&swaps, tour)
    }

    /// Escalating perturbation climb starting from cost 0.
    ///
    /// Returns the first strictly shorter tour found, or a copy of `tour`
    /// once no higher cost level exists.
    pub fn perturbation_climb(&mut self, tour: &Tour) -> Result<Tour, TourError> {
        let original_length = tour.length();
        let mut current_cost = 0;
        loop {
            self.notify(SearchEvent::CostLevel { cost: current_cost });
            let mut next_cost = INVALID_LENGTH;
            let new_tour = self.perturbation_climb_at_cost(tour, current_cost, &mut next_cost)?;
            if new_tour.length() < original_length {
                return Ok(new_tour);
            }
            if next_cost == INVALID_LENGTH {
                break;
            }
            current_cost = next_cost;
        }
        self.notify(SearchEvent::Exhausted);
        Ok(tour.clone())
    }
}
