//! Geometry-value pairs: one domain object coupled with one record.

use std::sync::Arc;

use geo_common::{Geometry, Record};
use serde::{Deserialize, Serialize};

use crate::domain::DomainObject;

/// A (domain object, attribute-value record) association.
///
/// Discrete coverages materialize these eagerly; continuous coverages may
/// generate them on demand during evaluation and discard them afterwards.
/// The domain object is shared, so cloning a pair is cheap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryValuePair {
    domain: Arc<DomainObject>,
    value: Record,
}

impl GeometryValuePair {
    pub fn new(domain: Arc<DomainObject>, value: Record) -> Self {
        Self { domain, value }
    }

    /// A point-value pair at the given 2-D position.
    pub fn point(x: f64, y: f64, value: Record) -> Self {
        Self::new(Arc::new(DomainObject::point(x, y)), value)
    }

    /// A curve-value pair over the given polyline.
    pub fn curve(vertices: Vec<geo_common::DirectPosition>, value: Record) -> Self {
        Self::new(
            Arc::new(DomainObject::from_geometry(Geometry::Curve(vertices))),
            value,
        )
    }

    /// A surface-value pair over the given polygon ring.
    pub fn surface(ring: Vec<geo_common::DirectPosition>, value: Record) -> Self {
        Self::new(
            Arc::new(DomainObject::from_geometry(Geometry::Surface(ring))),
            value,
        )
    }

    pub fn domain(&self) -> &Arc<DomainObject> {
        &self.domain
    }

    pub fn value(&self) -> &Record {
        &self.value
    }

    /// Shares the same domain object (by identity) as another pair.
    pub fn shares_domain_with(&self, other: &GeometryValuePair) -> bool {
        Arc::ptr_eq(&self.domain, &other.domain)
    }
}
