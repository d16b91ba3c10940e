//! Utility functions and structures for saving tours and reporting runs.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Length, PointId};

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Where a tour of `length` for the point set `name` is saved.
pub fn save_file_path(directory: &Path, name: &str, length: Length) -> PathBuf {
    directory.join(format!("{}_{}.txt", name, length))
}

/// Save a tour to a file, one point id per line.
///
/// Missing parent directories are created.
pub fn save_tour<P: AsRef<Path>>(order: &[PointId], path: P) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = BufWriter::new(File::create(path)?);
    for point in order {
        writeln!(file, "{}", point)?;
    }
    file.flush()
}

/// Summary of a solver run.
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    pub initial_length: Length,
    pub final_length: Length,
    pub hill_climb_moves: usize,
    pub perturbation_rounds: u32,
    pub runtime: Duration,
}

impl SearchStatistics {
    /// Relative improvement over the initial tour, in percent.
    pub fn improvement_percent(&self) -> f64 {
        if self.initial_length == 0 {
            return 0.0;
        }
        100.0 * (self.initial_length - self.final_length) as f64 / self.initial_length as f64
    }

    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Search Statistics:
- Initial Length: {}
- Final Length: {}
- Improvement: {:.2}%
- Hill-Climb Moves: {}
- Perturbation Rounds: {}
- Runtime: {}",
            self.initial_length,
            self.final_length,
            self.improvement_percent(),
            self.hill_climb_moves,
            self.perturbation_rounds,
            format_duration(self.runtime)
        )
    }
}
