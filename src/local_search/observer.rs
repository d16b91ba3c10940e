//! Progress reporting for the search, injected instead of printed.

use crate::Length;
use serde::{Deserialize, Serialize};

/// Something worth reporting while the search runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchEvent {
    /// A hill-climb move was applied.
    HillClimbStep {
        iteration: usize,
        length: Length,
        improvement: Length,
    },
    /// The escalating climb is about to try perturbations of this cost.
    CostLevel { cost: Length },
    /// A perturbation climb produced a strictly shorter tour.
    PerturbationImproved { length: Length },
    /// Every cost level was tried without improvement.
    Exhausted,
}

/// Receives [`SearchEvent`]s from a [`LocalSearch`](super::LocalSearch).
pub trait SearchObserver {
    fn notify(&mut self, event: &SearchEvent);
}

/// Writes progress lines through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn notify(&mut self, event: &SearchEvent) {
        match event {
            SearchEvent::HillClimbStep {
                iteration,
                length,
                improvement,
            } => log::info!(
                "Iteration {} tour length: {} (step improvement: {})",
                iteration,
                length,
                improvement
            ),
            SearchEvent::CostLevel { cost } => log::info!("trying perturbation cost: {}", cost),
            SearchEvent::PerturbationImproved { length } => {
                log::info!("perturbation improvement: {}", length)
            }
            SearchEvent::Exhausted => log::info!("No more perturbations left to try."),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl SearchObserver for SilentObserver {
    fn notify(&mut self, _event: &SearchEvent) {}
}

/// Records every event, in order.
#[derive(Debug, Default, Clone)]
pub struct TraceObserver {
    pub events: Vec<SearchEvent>,
}

impl TraceObserver {
    pub fn new() -> Self {
        TraceObserver::default()
    }

    /// The recorded trace as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}

impl SearchObserver for TraceObserver {
    fn notify(&mut self, event: &SearchEvent) {
        self.events.push(event.clone());
    }
}
