//! Result types: the outcome of applying a measure.

use chrono::{DateTime, Utc};
use geo_common::{Citation, Record, RecordType};
use serde::{Deserialize, Serialize};

use crate::scope::Scope;

/// The outcome of applying a quality measure.
///
/// A result may declare its own scope, distinct from the parent
/// element's: heterogeneous sub-region results can then share one element
/// description instead of duplicating the measure and method per
/// sub-region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QualityResult {
    Quantitative(QuantitativeResult),
    Conformance(ConformanceResult),
    Descriptive(DescriptiveResult),
    Coverage(CoverageResult),
}

impl QualityResult {
    pub fn result_scope(&self) -> Option<&Scope> {
        match self {
            QualityResult::Quantitative(r) => r.result_scope.as_ref(),
            QualityResult::Conformance(r) => r.result_scope.as_ref(),
            QualityResult::Descriptive(r) => r.result_scope.as_ref(),
            QualityResult::Coverage(r) => r.result_scope.as_ref(),
        }
    }

    pub fn date_time(&self) -> Option<&DateTime<Utc>> {
        match self {
            QualityResult::Quantitative(r) => r.date_time.as_ref(),
            QualityResult::Conformance(r) => r.date_time.as_ref(),
            QualityResult::Descriptive(r) => r.date_time.as_ref(),
            QualityResult::Coverage(r) => r.date_time.as_ref(),
        }
    }
}

/// Quantified quality values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitativeResult {
    pub values: Vec<Record>,
    pub value_record_type: Option<RecordType>,
    pub value_unit: Option<String>,
    pub result_scope: Option<Scope>,
    pub date_time: Option<DateTime<Utc>>,
}

impl QuantitativeResult {
    pub fn new(values: Vec<Record>) -> Self {
        Self {
            values,
            value_record_type: None,
            value_unit: None,
            result_scope: None,
            date_time: None,
        }
    }

    /// Shorthand for a single real-valued result.
    pub fn single(name: impl Into<String>, value: f64) -> Self {
        Self::new(vec![Record::single(name, value)])
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.value_unit = Some(unit.into());
        self
    }

    pub fn with_record_type(mut self, record_type: RecordType) -> Self {
        self.value_record_type = Some(record_type);
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.result_scope = Some(scope);
        self
    }

    pub fn at(mut self, date_time: DateTime<Utc>) -> Self {
        self.date_time = Some(date_time);
        self
    }
}

/// Pass/fail against a cited specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConformanceResult {
    pub specification: Citation,
    pub explanation: Option<String>,
    pub pass: bool,
    pub result_scope: Option<Scope>,
    pub date_time: Option<DateTime<Utc>>,
}

impl ConformanceResult {
    pub fn new(specification: Citation, pass: bool) -> Self {
        Self {
            specification,
            explanation: None,
            pass,
            result_scope: None,
            date_time: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.result_scope = Some(scope);
        self
    }
}

/// A free-text quality statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveResult {
    pub statement: String,
    pub result_scope: Option<Scope>,
    pub date_time: Option<DateTime<Utc>>,
}

impl DescriptiveResult {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            result_scope: None,
            date_time: None,
        }
    }
}

/// A result shaped as a coverage: per-position quality values delivered as
/// an external coverage resource rather than inline records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    /// Description of the result coverage's content.
    pub content_description: Option<String>,
    /// Reference to the file or resource holding the coverage.
    pub result_file: Option<String>,
    pub result_scope: Option<Scope>,
    pub date_time: Option<DateTime<Utc>>,
}

impl CoverageResult {
    pub fn new() -> Self {
        Self {
            content_description: None,
            result_file: None,
            result_scope: None,
            date_time: None,
        }
    }

    pub fn with_content_description(mut self, description: impl Into<String>) -> Self {
        self.content_description = Some(description.into());
        self
    }

    pub fn with_result_file(mut self, file: impl Into<String>) -> Self {
        self.result_file = Some(file.into());
        self
    }
}

impl Default for CoverageResult {
    fn default() -> Self {
        Self::new()
    }
}
