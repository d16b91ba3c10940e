//! Local search over a [`Tour`](crate::tour::Tour): plain 2-opt hill climbing
//! and the escalating lateral perturbation built on top of it.

pub mod lateral;
pub mod observer;
pub mod two_opt;

use crate::config::Config;

use self::observer::{LogObserver, SearchEvent, SearchObserver, SilentObserver};

/// Entry point for the search procedures that report progress.
///
/// The pure scans (`first_improvement`, `find_swaps`, ...) are free
/// functions in the sub-modules; the climbs that apply moves and emit
/// [`SearchEvent`]s are methods on this type.
pub struct LocalSearch<O: SearchObserver = LogObserver> {
    /// Emit a [`SearchEvent::HillClimbStep`] for every applied move
    pub verbose: bool,
    /// Number of moves applied by hill climbs since creation
    pub moves_applied: usize,
    observer: O,
}

impl LocalSearch<LogObserver> {
    /// Create a local search that reports through the `log` facade.
    pub fn new(verbose: bool) -> Self {
        LocalSearch::with_observer(verbose, LogObserver)
    }

    pub fn from_config(config: &Config) -> Self {
        LocalSearch::new(config.verbose)
    }
}

impl LocalSearch<SilentObserver> {
    /// Create a local search that reports nothing.
    pub fn silent() -> Self {
        LocalSearch::with_observer(false, SilentObserver)
    }
}

impl<O: SearchObserver> LocalSearch<O> {
    pub fn with_observer(verbose: bool, observer: O) -> Self {
        LocalSearch {
            verbose,
            moves_applied: 0,
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Forward an event to the observer.
    pub fn notify(&mut self, event: SearchEvent) {
        self.observer.notify(&event);
    }
}
