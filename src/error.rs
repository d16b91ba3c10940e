//! Error types for tour construction, tour mutation and file input.

use crate::PointId;
use thiserror::Error as ThisError;

/// A broken structural invariant of a [`Tour`](crate::tour::Tour).
///
/// None of these are recoverable. They mean the adjacency slots, the
/// direction array or the length cache no longer describe a single cycle
/// over all points, and any tour produced afterwards would be invalid.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum TourError {
    #[error("could not determine the point preceding {point}")]
    MissingPredecessor { point: PointId },
    #[error("no free adjacency slot left on point {point}")]
    NoFreeSlot { point: PointId },
    #[error("traversal visited {visited} points, expected a cycle of {expected}")]
    BrokenCycle { visited: usize, expected: usize },
    #[error("point {point} has an empty adjacency slot")]
    DetachedPoint { point: PointId },
    #[error("invalid tour ordering: {0}")]
    InvalidOrder(String),
}

impl TourError {
    pub fn invalid_order(message: impl Into<String>) -> Self {
        Self::InvalidOrder(message.into())
    }
}

/// Crate-level error covering the file readers, config loading and the core.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    Tour(#[from] TourError),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
