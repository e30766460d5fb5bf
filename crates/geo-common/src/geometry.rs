//! Spatial geometry primitives for coverage domains.

use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::position::DirectPosition;

/// Tolerance for point-on-geometry tests, in coordinate units.
pub const CONTAINS_TOLERANCE: f64 = 1e-9;

/// A spatial element of a coverage domain.
///
/// These are deliberately simple shapes: the coverage model only needs
/// containment, distance and centroid queries, not a full geometry algebra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A single position.
    Point(DirectPosition),
    /// A polyline through the given vertices.
    Curve(Vec<DirectPosition>),
    /// A polygon given by its outer ring (implicitly closed).
    Surface(Vec<DirectPosition>),
    /// A solid approximated by its bounding envelope.
    Solid(Envelope),
}

impl Geometry {
    /// Check if the given position lies on or inside this geometry.
    pub fn contains(&self, p: &DirectPosition) -> bool {
        match self {
            Geometry::Point(point) => point.approx_eq(p, CONTAINS_TOLERANCE),
            Geometry::Curve(vertices) => {
                segments(vertices).any(|(a, b)| segment_distance(a, b, p) <= CONTAINS_TOLERANCE)
            }
            Geometry::Surface(ring) => {
                point_in_ring(ring, p)
                    || segments_closed(ring)
                        .any(|(a, b)| segment_distance(a, b, p) <= CONTAINS_TOLERANCE)
            }
            Geometry::Solid(envelope) => envelope.contains(p),
        }
    }

    /// Distance from the given position to this geometry; zero when the
    /// position is contained.
    pub fn distance_to(&self, p: &DirectPosition) -> f64 {
        match self {
            Geometry::Point(point) => point.distance(p),
            Geometry::Curve(vertices) => segments(vertices)
                .map(|(a, b)| segment_distance(a, b, p))
                .fold(f64::INFINITY, f64::min),
            Geometry::Surface(ring) => {
                if point_in_ring(ring, p) {
                    0.0
                } else {
                    segments_closed(ring)
                        .map(|(a, b)| segment_distance(a, b, p))
                        .fold(f64::INFINITY, f64::min)
                }
            }
            Geometry::Solid(envelope) => {
                if envelope.contains(p) {
                    0.0
                } else {
                    let clamped: Vec<f64> = p
                        .coordinates
                        .iter()
                        .enumerate()
                        .map(|(i, c)| {
                            c.max(envelope.min.coordinates[i])
                                .min(envelope.max.coordinates[i])
                        })
                        .collect();
                    DirectPosition::new(clamped).distance(p)
                }
            }
        }
    }

    /// Arithmetic mean of the defining positions.
    pub fn centroid(&self) -> DirectPosition {
        match self {
            Geometry::Point(point) => point.clone(),
            Geometry::Curve(vertices) | Geometry::Surface(vertices) => mean_position(vertices),
            Geometry::Solid(envelope) => {
                let coordinates = envelope
                    .min
                    .coordinates
                    .iter()
                    .zip(&envelope.max.coordinates)
                    .map(|(lo, hi)| (lo + hi) / 2.0)
                    .collect();
                DirectPosition::new(coordinates)
            }
        }
    }

    /// Bounding envelope, or `None` for a geometry with no vertices.
    pub fn envelope(&self) -> Option<Envelope> {
        match self {
            Geometry::Point(point) => Some(Envelope::new(point.clone(), point.clone())),
            Geometry::Curve(vertices) | Geometry::Surface(vertices) => {
                Envelope::from_positions(vertices)
            }
            Geometry::Solid(envelope) => Some(envelope.clone()),
        }
    }

    /// Check if every defining position of `other` is contained in this
    /// geometry. Used for "lies within" selection queries.
    pub fn contains_geometry(&self, other: &Geometry) -> bool {
        match other {
            Geometry::Point(point) => self.contains(point),
            Geometry::Curve(vertices) | Geometry::Surface(vertices) => {
                !vertices.is_empty() && vertices.iter().all(|v| self.contains(v))
            }
            Geometry::Solid(envelope) => {
                self.contains(&envelope.min) && self.contains(&envelope.max)
            }
        }
    }
}

fn mean_position(vertices: &[DirectPosition]) -> DirectPosition {
    if vertices.is_empty() {
        return DirectPosition::new(Vec::new());
    }
    let dim = vertices[0].dimension();
    let mut sums = vec![0.0; dim];
    for v in vertices {
        for (i, c) in v.coordinates.iter().take(dim).enumerate() {
            sums[i] += c;
        }
    }
    let n = vertices.len() as f64;
    DirectPosition::new(sums.into_iter().map(|s| s / n).collect())
}

fn segments(
    vertices: &[DirectPosition],
) -> impl Iterator<Item = (&DirectPosition, &DirectPosition)> {
    vertices.windows(2).map(|w| (&w[0], &w[1]))
}

/// Segments of a ring, including the closing edge from last back to first.
fn segments_closed(
    ring: &[DirectPosition],
) -> impl Iterator<Item = (&DirectPosition, &DirectPosition)> {
    let closing = if ring.len() >= 2 {
        Some((&ring[ring.len() - 1], &ring[0]))
    } else {
        None
    };
    segments(ring).chain(closing)
}

/// Distance from `p` to the segment `a`-`b`, computed in the first two
/// dimensions.
pub(crate) fn segment_distance(a: &DirectPosition, b: &DirectPosition, p: &DirectPosition) -> f64 {
    let (ax, ay) = (a.coordinates[0], a.coordinates[1]);
    let (bx, by) = (b.coordinates[0], b.coordinates[1]);
    let (px, py) = (p.coordinates[0], p.coordinates[1]);

    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let cx = ax + t * dx;
    let cy = ay + t * dy;
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Ray-casting point-in-polygon test in the first two dimensions.
fn point_in_ring(ring: &[DirectPosition], p: &DirectPosition) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let (px, py) = (p.coordinates[0], p.coordinates[1]);
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].coordinates[0], ring[i].coordinates[1]);
        let (xj, yj) = (ring[j].coordinates[0], ring[j].coordinates[1]);
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Geometry {
        Geometry::Surface(vec![
            DirectPosition::new_2d(0.0, 0.0),
            DirectPosition::new_2d(1.0, 0.0),
            DirectPosition::new_2d(1.0, 1.0),
            DirectPosition::new_2d(0.0, 1.0),
        ])
    }

    #[test]
    fn test_point_contains() {
        let g = Geometry::Point(DirectPosition::new_2d(2.0, 3.0));
        assert!(g.contains(&DirectPosition::new_2d(2.0, 3.0)));
        assert!(!g.contains(&DirectPosition::new_2d(2.0, 3.1)));
    }

    #[test]
    fn test_surface_contains_interior_and_boundary() {
        let square = unit_square();
        assert!(square.contains(&DirectPosition::new_2d(0.5, 0.5)));
        assert!(square.contains(&DirectPosition::new_2d(0.0, 0.5)));
        assert!(!square.contains(&DirectPosition::new_2d(1.5, 0.5)));
    }

    #[test]
    fn test_curve_distance() {
        let curve = Geometry::Curve(vec![
            DirectPosition::new_2d(0.0, 0.0),
            DirectPosition::new_2d(10.0, 0.0),
        ]);
        assert_eq!(curve.distance_to(&DirectPosition::new_2d(5.0, 3.0)), 3.0);
        assert_eq!(curve.distance_to(&DirectPosition::new_2d(13.0, 4.0)), 5.0);
    }

    #[test]
    fn test_surface_distance_zero_inside() {
        let square = unit_square();
        assert_eq!(square.distance_to(&DirectPosition::new_2d(0.5, 0.5)), 0.0);
        assert_eq!(square.distance_to(&DirectPosition::new_2d(2.0, 0.5)), 1.0);
    }

    #[test]
    fn test_centroid() {
        let square = unit_square();
        assert!(square
            .centroid()
            .approx_eq(&DirectPosition::new_2d(0.5, 0.5), 1e-12));
    }

    #[test]
    fn test_contains_geometry() {
        let square = unit_square();
        let inner = Geometry::Point(DirectPosition::new_2d(0.2, 0.2));
        let outer = Geometry::Point(DirectPosition::new_2d(2.0, 2.0));
        assert!(square.contains_geometry(&inner));
        assert!(!square.contains_geometry(&outer));
    }
}
