//! Evaluation methods: how a measure was applied.

use chrono::{DateTime, Utc};
use geo_common::Citation;
use serde::{Deserialize, Serialize};

use crate::codes::EvaluationMethodType;

/// Describes how a quality measure was evaluated. The procedure itself is
/// external, referenced by citation; this type only records the
/// description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMethod {
    pub method_type: Option<EvaluationMethodType>,
    pub description: Option<String>,
    /// Citation of the procedure applied.
    pub procedure: Option<Citation>,
    /// Reference documents supplying details of the procedure.
    pub reference_documents: Vec<Citation>,
    /// Date(s) the evaluation was carried out.
    pub dates: Vec<DateTime<Utc>>,
}

impl EvaluationMethod {
    pub fn new() -> Self {
        Self {
            method_type: None,
            description: None,
            procedure: None,
            reference_documents: Vec::new(),
            dates: Vec::new(),
        }
    }

    pub fn of_type(method_type: EvaluationMethodType) -> Self {
        Self {
            method_type: Some(method_type),
            ..Self::new()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_procedure(mut self, procedure: Citation) -> Self {
        self.procedure = Some(procedure);
        self
    }

    pub fn with_reference_document(mut self, document: Citation) -> Self {
        self.reference_documents.push(document);
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.dates.push(date);
        self
    }
}

impl Default for EvaluationMethod {
    fn default() -> Self {
        Self::new()
    }
}
