//! Scope: the subset of data a quality statement applies to.

use geo_common::Extent;
use serde::{Deserialize, Serialize};

use crate::codes::ScopeLevel;

/// The data a quality statement applies to, identified by hierarchical
/// level and optionally narrowed by extent or a textual description of the
/// instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub level: ScopeLevel,
    pub extent: Option<Extent>,
    pub level_description: Vec<String>,
}

impl Scope {
    pub fn new(level: ScopeLevel) -> Self {
        Self {
            level,
            extent: None,
            level_description: Vec::new(),
        }
    }

    /// The common case: the whole dataset.
    pub fn dataset() -> Self {
        Self::new(ScopeLevel::dataset())
    }

    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn with_level_description(mut self, description: impl Into<String>) -> Self {
        self.level_description.push(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_common::Envelope;

    #[test]
    fn test_scope_builders() {
        let scope = Scope::dataset()
            .with_extent(Extent::spatial(Envelope::new_2d(-10.0, 40.0, 10.0, 60.0)))
            .with_level_description("all gauging stations");
        assert_eq!(scope.level, ScopeLevel::dataset());
        assert!(scope.extent.is_some());
        assert_eq!(scope.level_description.len(), 1);
    }
}
