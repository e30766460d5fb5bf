//! Coordinate reference system identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the coordinate reference system a coverage domain is
/// referenced to.
///
/// This is an identifier, not a projection engine: coordinate transforms
/// are the concern of whatever referencing library an adopter pairs with
/// the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrsId(String);

impl CrsId {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// An EPSG code, e.g. `CrsId::epsg(4326)` for WGS84 geographic.
    pub fn epsg(code: u32) -> Self {
        Self(format!("EPSG:{code}"))
    }

    /// WGS84 geographic (lat/lon in degrees), the usual default.
    pub fn wgs84() -> Self {
        Self::epsg(4326)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CrsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
