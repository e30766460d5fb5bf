//! Domain objects: the geometric and temporal elements of a coverage
//! domain.

use geo_common::{DirectPosition, Envelope, Geometry, TemporalExtent};
use serde::{Deserialize, Serialize};

/// An element of a coverage's domain, composed of spatial geometry
/// elements and/or temporal primitives.
///
/// Domain objects are owned by the coverage that enumerates them and are
/// shared across geometry-value pairs behind `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DomainObject {
    pub spatial: Vec<Geometry>,
    pub temporal: Vec<TemporalExtent>,
}

impl DomainObject {
    pub fn new(spatial: Vec<Geometry>, temporal: Vec<TemporalExtent>) -> Self {
        Self { spatial, temporal }
    }

    /// A purely spatial domain object with one geometry element.
    pub fn from_geometry(geometry: Geometry) -> Self {
        Self {
            spatial: vec![geometry],
            temporal: Vec::new(),
        }
    }

    /// A point domain object at the given 2-D position.
    pub fn point(x: f64, y: f64) -> Self {
        Self::from_geometry(Geometry::Point(DirectPosition::new_2d(x, y)))
    }

    /// Check if the position lies on or inside any spatial element.
    pub fn contains(&self, p: &DirectPosition) -> bool {
        self.spatial.iter().any(|g| g.contains(p))
    }

    /// Distance from the position to the nearest spatial element, or
    /// infinity for a purely temporal object.
    pub fn distance_to(&self, p: &DirectPosition) -> f64 {
        self.spatial
            .iter()
            .map(|g| g.distance_to(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Bounding envelope over all spatial elements.
    pub fn envelope(&self) -> Option<Envelope> {
        self.spatial
            .iter()
            .filter_map(|g| g.envelope())
            .reduce(|a, b| a.union(&b))
    }

    /// Check if any temporal element overlaps the given period. An object
    /// with no temporal elements is treated as valid for all time.
    pub fn overlaps_time(&self, period: &TemporalExtent) -> bool {
        self.temporal.is_empty() || self.temporal.iter().any(|t| t.overlaps(period))
    }

    /// Check if every spatial element lies within the given geometry. An
    /// object with no spatial elements never matches a spatial query.
    pub fn within(&self, geometry: &Geometry) -> bool {
        !self.spatial.is_empty() && self.spatial.iter().all(|g| geometry.contains_geometry(g))
    }
}
