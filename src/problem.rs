//! Point sets and starting tours.

use crate::error::{Error, Result};
use crate::length_map::rounded_distance;
use crate::{Length, PointId};
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// A set of points in the plane, identified by their index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Problem {
    /// Create a problem from coordinate arrays of equal length.
    pub fn new(name: String, x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Problem { name, x, y }
    }

    /// Create a problem from `(x, y)` pairs.
    pub fn from_points(name: &str, points: &[(f64, f64)]) -> Self {
        let (x, y) = points.iter().copied().unzip();
        Problem::new(name.to_string(), x, y)
    }

    /// Uniformly random points in a `side` x `side` square.
    pub fn random(point_count: usize, side: f64, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (x, y) = (0..point_count)
            .map(|_| (rng.gen_range(0.0..side), rng.gen_range(0.0..side)))
            .unzip();
        Problem::new(format!("random_{}_{}", point_count, seed), x, y)
    }

    pub fn point_count(&self) -> usize {
        self.x.len()
    }

    /// Rounded Euclidean distance, using the same rounding as the tour.
    pub fn distance(&self, a: PointId, b: PointId) -> Length {
        rounded_distance(self.x[a] - self.x[b], self.y[a] - self.y[b])
    }

    /// Length of the closed tour visiting `order`.
    pub fn tour_length(&self, order: &[PointId]) -> Length {
        order
            .iter()
            .circular_tuple_windows()
            .map(|(&a, &b)| self.distance(a, b))
            .sum()
    }

    /// Load a point set from a file.
    ///
    /// One point per line. The last two numbers on a line are its `x` and
    /// `y`, so both `x y` and `id x y` layouts work. Blank lines and lines
    /// starting with `#` are skipped. A first line holding a single integer
    /// is read as the point count and checked against the points found.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = io::BufReader::new(File::open(path)?);

        let mut declared_count = None;
        let mut x = Vec::new();
        let mut y = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line_result?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() == 1 && x.is_empty() && declared_count.is_none() {
                let count = fields[0].parse::<usize>().map_err(|_| {
                    let message = format!("expected a point count, got {:?}", fields[0]);
                    Error::parse(line_number, message)
                })?;
                declared_count = Some(count);
                continue;
            }
            if fields.len() < 2 {
                return Err(Error::parse(line_number, "expected at least two coordinates"));
            }

            let coordinate = |field: &str| {
                field.parse::<f64>().map_err(|_| {
                    Error::parse(line_number, format!("invalid coordinate {:?}", field))
                })
            };
            x.push(coordinate(fields[fields.len() - 2])?);
            y.push(coordinate(fields[fields.len() - 1])?);
        }

        if let Some(count) = declared_count {
            if count != x.len() {
                return Err(Error::parse(
                    1,
                    format!("header declares {} points but {} were read", count, x.len()),
                ));
            }
        }

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "points".to_string());
        Ok(Problem::new(name, x, y))
    }

    /// Read a tour file: whitespace-separated point ids forming a
    /// permutation of all points.
    pub fn read_tour<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PointId>> {
        let reader = io::BufReader::new(File::open(path)?);
        let mut order = Vec::with_capacity(self.point_count());
        let mut seen = vec![false; self.point_count()];

        for (index, line_result) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line_result?;
            for field in line.split_whitespace() {
                let point = field.parse::<PointId>().map_err(|_| {
                    Error::parse(line_number, format!("invalid point id {:?}", field))
                })?;
                if point >= self.point_count() || seen[point] {
                    return Err(Error::parse(
                        line_number,
                        format!("point {} is out of range or repeated", point),
                    ));
                }
                seen[point] = true;
                order.push(point);
            }
        }

        if order.len() != self.point_count() {
            return Err(Error::parse(
                0,
                format!(
                    "tour visits {} of {} points",
                    order.len(),
                    self.point_count()
                ),
            ));
        }
        Ok(order)
    }

    /// The tour from `tour_path` if given, otherwise the identity order.
    pub fn initial_tour(&self, tour_path: Option<&Path>) -> Result<Vec<PointId>> {
        match tour_path {
            Some(path) => self.read_tour(path),
            None => Ok((0..self.point_count()).collect()),
        }
    }

    /// A random permutation of all points.
    pub fn shuffled_tour(&self, seed: u64) -> Vec<PointId> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut order: Vec<PointId> = (0..self.point_count()).collect();
        order.shuffle(&mut rng);
        order
    }
}
