//! Citations and identifiers for referencing external documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An identifier within some authority's namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub code: String,
    pub authority: Option<String>,
}

impl Identifier {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            authority: None,
        }
    }

    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = Some(authority.into());
        self
    }
}

/// A reference to an external document: a standard, a specification, a
/// measure catalog entry, a source dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub edition: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub identifiers: Vec<Identifier>,
}

impl Citation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            edition: None,
            date: None,
            identifiers: Vec::new(),
        }
    }

    pub fn with_edition(mut self, edition: impl Into<String>) -> Self {
        self.edition = Some(edition.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_identifier(mut self, identifier: Identifier) -> Self {
        self.identifiers.push(identifier);
        self
    }
}
