//! Axis-aligned envelopes (bounding boxes) of arbitrary dimension.

use serde::{Deserialize, Serialize};

use crate::position::DirectPosition;

/// Minimum and maximum corner positions of an axis-aligned box.
///
/// For geographic CRS the coordinates are degrees; for projected CRS,
/// meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min: DirectPosition,
    pub max: DirectPosition,
}

impl Envelope {
    pub fn new(min: DirectPosition, max: DirectPosition) -> Self {
        Self { min, max }
    }

    /// Convenience constructor for the common 2-D case.
    pub fn new_2d(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: DirectPosition::new_2d(min_x, min_y),
            max: DirectPosition::new_2d(max_x, max_y),
        }
    }

    /// Smallest envelope containing every given position, or `None` for an
    /// empty input.
    pub fn from_positions<'a, I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a DirectPosition>,
    {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let mut envelope = Envelope::new(first.clone(), first.clone());
        for p in iter {
            envelope.expand_to_include(p);
        }
        Some(envelope)
    }

    pub fn dimension(&self) -> usize {
        self.min.dimension()
    }

    /// Check if a position is contained within this envelope (boundary
    /// inclusive).
    pub fn contains(&self, p: &DirectPosition) -> bool {
        if p.dimension() < self.dimension() {
            return false;
        }
        self.min
            .coordinates
            .iter()
            .zip(&self.max.coordinates)
            .zip(&p.coordinates)
            .all(|((lo, hi), c)| c >= lo && c <= hi)
    }

    /// Grow this envelope to include the given position.
    pub fn expand_to_include(&mut self, p: &DirectPosition) {
        for (i, c) in p.coordinates.iter().enumerate() {
            if i >= self.dimension() {
                break;
            }
            if *c < self.min.coordinates[i] {
                self.min.coordinates[i] = *c;
            }
            if *c > self.max.coordinates[i] {
                self.max.coordinates[i] = *c;
            }
        }
    }

    /// Union of two envelopes of the same dimension.
    pub fn union(&self, other: &Envelope) -> Envelope {
        let mut result = self.clone();
        result.expand_to_include(&other.min);
        result.expand_to_include(&other.max);
        result
    }

    pub fn intersects(&self, other: &Envelope) -> bool {
        self.min
            .coordinates
            .iter()
            .zip(&self.max.coordinates)
            .zip(other.min.coordinates.iter().zip(&other.max.coordinates))
            .all(|((a_lo, a_hi), (b_lo, b_hi))| a_lo <= b_hi && a_hi >= b_lo)
    }
}
