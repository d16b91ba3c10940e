//! # lateral-tsp
//!
//! Short (not optimal) closed tours over points in the plane.
//!
//! A tour starts from a given ordering and is improved with first-improvement
//! 2-opt until no improving exchange remains. The search then leaves that
//! local optimum with lateral moves: an exchange of a fixed cost is applied,
//! the tour is re-optimised without undoing that exchange, and the result is
//! kept only if it is strictly shorter. Costs are escalated from 0 upwards
//! until some perturbation pays off or every cost level has been tried.

pub mod config;
pub mod error;
pub mod length_map;
pub mod local_search;
pub mod problem;
pub mod swap;
pub mod tour;
pub mod utils;

use crate::config::Config;
use crate::error::TourError;
use crate::local_search::observer::{LogObserver, SearchEvent, SearchObserver};
use crate::local_search::LocalSearch;
use crate::problem::Problem;
use crate::tour::Tour;
use crate::utils::SearchStatistics;

use std::time::{Duration, Instant};

pub use crate::error::{Error, Result};
pub use crate::swap::{Pair, Segment, Swap};

/// Dense, zero-based point identifier.
pub type PointId = usize;

/// Rounded edge or tour length.
pub type Length = i64;

/// Marks an empty adjacency slot or the missing endpoint of an empty swap.
pub const INVALID_POINT: PointId = PointId::MAX;

/// "No further cost level" when escalating perturbations.
pub const INVALID_LENGTH: Length = Length::MAX;

/// Drives the search: 2-opt descent, then perturbation rounds for as long
/// as they keep shortening the best tour.
pub struct LateralSolver<O: SearchObserver = LogObserver> {
    pub problem: Problem,
    pub config: Config,
    pub initial_order: Vec<PointId>,
    pub best_tour: Option<Tour>,
    pub initial_length: Length,
    pub perturbation_rounds: u32,
    pub run_time: Duration,
    pub local_search: LocalSearch<O>,
    pub start_time: Instant,
}

impl LateralSolver<LogObserver> {
    /// Create a solver starting from the identity order.
    pub fn new(problem: Problem, config: Config) -> Self {
        let verbose = config.verbose;
        LateralSolver::with_observer(problem, config, LocalSearch::new(verbose))
    }
}

impl<O: SearchObserver> LateralSolver<O> {
    /// Create a solver reporting through the given local search.
    pub fn with_observer(problem: Problem, config: Config, local_search: LocalSearch<O>) -> Self {
        let initial_order = (0..problem.point_count()).collect();
        LateralSolver {
            problem,
            config,
            initial_order,
            best_tour: None,
            initial_length: 0,
            perturbation_rounds: 0,
            run_time: Duration::from_secs(0),
            local_search,
            start_time: Instant::now(),
        }
    }

    /// Start from `order` instead of the identity order.
    pub fn with_initial_tour(mut self, order: Vec<PointId>) -> Self {
        self.initial_order = order;
        self.best_tour = None;
        self
    }

    /// Build the tour from the initial ordering and return its length.
    pub fn initialize(&mut self) -> std::result::Result<Length, TourError> {
        let tour = self.build_tour()?;
        Ok(self.best_tour.insert(tour).length())
    }

    /// Hill-climb the best tour to a 2-opt local optimum.
    pub fn descend(&mut self) -> std::result::Result<bool, TourError> {
        self.ensure_initialized()?;
        match self.best_tour.as_mut() {
            Some(tour) => self.local_search.hill_climb(tour),
            None => Ok(false),
        }
    }

    /// Run one escalating perturbation climb against the best tour and
    /// promote the result if it is strictly shorter.
    pub fn perturb(&mut self) -> std::result::Result<bool, TourError> {
        self.ensure_initialized()?;
        let Some(best) = self.best_tour.as_ref() else {
            return Ok(false);
        };

        let best_length = best.length();
        let new_tour = self.local_search.perturbation_climb(best)?;
        let new_length = new_tour.length();
        self.perturbation_rounds += 1;
        if new_length >= best_length {
            return Ok(false);
        }

        self.local_search
            .notify(SearchEvent::PerturbationImproved { length: new_length });
        self.best_tour = Some(new_tour);
        Ok(true)
    }

    /// Run the whole search and return the best tour found.
    pub fn run(&mut self) -> Result<&Tour> {
        self.run_with(|_, _| Ok(()))
    }

    /// Run the whole search, calling `on_improvement` with the best tour
    /// whenever the descent or a perturbation round has shortened it.
    pub fn run_with<F>(&mut self, mut on_improvement: F) -> Result<&Tour>
    where
        F: FnMut(&Problem, &Tour) -> Result<()>,
    {
        self.start_time = Instant::now();
        self.initialize()?;

        // Standard 2-opt hill climbing.
        if self.descend()? {
            if let Some(tour) = self.best_tour.as_ref() {
                on_improvement(&self.problem, tour)?;
            }
        }

        // Perturbation hill climbing.
        if self.config.perturbation {
            while !self.should_terminate() && self.perturb()? {
                if let Some(tour) = self.best_tour.as_ref() {
                    on_improvement(&self.problem, tour)?;
                }
            }
        }

        self.run_time = self.start_time.elapsed();
        let tour = match self.best_tour.take() {
            Some(tour) => tour,
            None => self.build_tour()?,
        };
        Ok(self.best_tour.insert(tour))
    }

    pub fn best_length(&self) -> Option<Length> {
        self.best_tour.as_ref().map(Tour::length)
    }

    pub fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            initial_length: self.initial_length,
            final_length: self.best_length().unwrap_or(self.initial_length),
            hill_climb_moves: self.local_search.moves_applied,
            perturbation_rounds: self.perturbation_rounds,
            runtime: self.run_time,
        }
    }

    /// Check if the round or time budget is used up.
    pub fn should_terminate(&self) -> bool {
        if let Some(max_rounds) = self.config.max_rounds {
            if self.perturbation_rounds >= max_rounds {
                return true;
            }
        }

        if let Some(time_limit) = self.config.time_limit {
            if Instant::now().duration_since(self.start_time) >= time_limit {
                return true;
            }
        }

        false
    }

    fn build_tour(&mut self) -> std::result::Result<Tour, TourError> {
        let tour = Tour::new(&self.initial_order, &self.problem.x, &self.problem.y)?;
        self.initial_length = tour.length();
        self.perturbation_rounds = 0;
        Ok(tour)
    }

    fn ensure_initialized(&mut self) -> std::result::Result<(), TourError> {
        if self.best_tour.is_none() {
            self.initialize()?;
        }
        Ok(())
    }
}
