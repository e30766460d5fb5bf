//! Direct positions in coordinate space.

use serde::{Deserialize, Serialize};

/// A position in some coordinate reference system, held as an ordered
/// sequence of coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectPosition {
    pub coordinates: Vec<f64>,
}

impl DirectPosition {
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self { coordinates }
    }

    /// Convenience constructor for the common 2-D case.
    pub fn new_2d(x: f64, y: f64) -> Self {
        Self {
            coordinates: vec![x, y],
        }
    }

    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// Euclidean distance to another position. Coordinates beyond the
    /// smaller dimension are ignored; callers are expected to compare
    /// positions referenced to the same CRS.
    pub fn distance(&self, other: &DirectPosition) -> f64 {
        self.coordinates
            .iter()
            .zip(&other.coordinates)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Coordinate-wise equality within the given tolerance.
    pub fn approx_eq(&self, other: &DirectPosition, tolerance: f64) -> bool {
        self.dimension() == other.dimension()
            && self
                .coordinates
                .iter()
                .zip(&other.coordinates)
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}
