//! Configuration parameters for a solver run.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration settings for the lateral 2-opt solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report every hill-climb move
    pub verbose: bool,
    /// Run perturbation rounds after plain 2-opt converges
    pub perturbation: bool,
    /// Maximum number of perturbation rounds
    pub max_rounds: Option<u32>,
    /// Optional time limit, checked between perturbation rounds
    pub time_limit: Option<Duration>,
    /// Directory that improved tours are written to
    pub save_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            verbose: true,
            perturbation: true,
            max_rounds: None,
            time_limit: None,
            save_directory: PathBuf::from("saves"),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Set whether every hill-climb move is reported.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable or disable the perturbation phase.
    pub fn with_perturbation(mut self, perturbation: bool) -> Self {
        self.perturbation = perturbation;
        self
    }

    /// Set the maximum number of perturbation rounds.
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }

    /// Set the directory improved tours are saved to.
    pub fn with_save_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.save_directory = directory.into();
        self
    }
}
