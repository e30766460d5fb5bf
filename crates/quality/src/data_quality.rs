//! The top-level quality record for a dataset.

use serde::{Deserialize, Serialize};

use crate::element::QualityElement;
use crate::error::{QualityError, QualityResultOf};
use crate::scope::Scope;

/// Provenance of the data: where it came from and how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineage {
    /// General statement about the provenance.
    pub statement: Option<String>,
    /// Names of the source datasets or processing steps involved.
    pub sources: Vec<String>,
}

impl Lineage {
    pub fn with_statement(statement: impl Into<String>) -> Self {
        Self {
            statement: Some(statement.into()),
            sources: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }
}

/// Quality information about the data identified by `scope`.
///
/// A record is only useful if it actually says something: it must carry
/// at least one report or a lineage. That rule is checked by
/// [`validate`](DataQuality::validate) rather than the constructor, so a
/// record can be assembled incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    pub scope: Scope,
    pub reports: Vec<QualityElement>,
    pub lineage: Option<Lineage>,
}

impl DataQuality {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            reports: Vec::new(),
            lineage: None,
        }
    }

    pub fn with_report(mut self, element: QualityElement) -> Self {
        self.reports.push(element);
        self
    }

    pub fn with_lineage(mut self, lineage: Lineage) -> Self {
        self.lineage = Some(lineage);
        self
    }

    /// Checks the structural rules a complete record must satisfy:
    /// at least one of reports / lineage is present, and every report
    /// carries at least one result.
    pub fn validate(&self) -> QualityResultOf<()> {
        if self.reports.is_empty() && self.lineage.is_none() {
            return Err(QualityError::MissingReports);
        }
        for report in &self.reports {
            if report.results.is_empty() {
                return Err(QualityError::EmptyResults {
                    element: format!("{:?}", report.kind),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, QualityElement};
    use crate::result::{QualityResult, QuantitativeResult};

    fn omission_report() -> QualityElement {
        QualityElement::new(ElementKind::CompletenessOmission).with_result(
            QualityResult::Quantitative(
                QuantitativeResult::single("rate of missing items", 2.5).with_unit("percent"),
            ),
        )
    }

    #[test]
    fn test_empty_record_is_rejected() {
        let record = DataQuality::new(Scope::dataset());
        assert!(matches!(
            record.validate(),
            Err(QualityError::MissingReports)
        ));
    }

    #[test]
    fn test_lineage_alone_is_sufficient() {
        let record = DataQuality::new(Scope::dataset())
            .with_lineage(Lineage::with_statement("digitised from 1:25000 map sheets"));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_reports_alone_are_sufficient() {
        let record = DataQuality::new(Scope::dataset()).with_report(omission_report());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_report_without_results_is_rejected() {
        let record = DataQuality::new(Scope::dataset())
            .with_report(QualityElement::new(ElementKind::DomainConsistency));
        match record.validate() {
            Err(QualityError::EmptyResults { element }) => {
                assert_eq!(element, "DomainConsistency");
            }
            other => panic!("expected EmptyResults, got {other:?}"),
        }
    }

    #[test]
    fn test_full_record_round_trips_through_json() {
        let record = DataQuality::new(Scope::dataset())
            .with_report(omission_report())
            .with_lineage(
                Lineage::with_statement("aggregated from national gauging networks")
                    .with_source("station registry 2024-05"),
            );
        record.validate().unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let back: DataQuality = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
