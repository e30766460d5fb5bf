//! Spatial and temporal extents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;

/// A closed time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalExtent {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TemporalExtent {
    pub fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { begin, end }
    }

    /// A degenerate period covering a single instant.
    pub fn instant(at: DateTime<Utc>) -> Self {
        Self { begin: at, end: at }
    }

    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        at >= &self.begin && at <= &self.end
    }

    pub fn overlaps(&self, other: &TemporalExtent) -> bool {
        self.begin <= other.end && self.end >= other.begin
    }
}

/// The extent of a dataset or coverage domain: space, time, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Extent {
    pub description: Option<String>,
    pub spatial: Option<Envelope>,
    pub temporal: Option<TemporalExtent>,
}

impl Extent {
    pub fn spatial(envelope: Envelope) -> Self {
        Self {
            description: None,
            spatial: Some(envelope),
            temporal: None,
        }
    }

    pub fn temporal(period: TemporalExtent) -> Self {
        Self {
            description: None,
            spatial: None,
            temporal: Some(period),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.spatial.is_none() && self.temporal.is_none() && self.description.is_none()
    }
}
