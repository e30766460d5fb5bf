//! Quality elements: one reported aspect of data quality.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codes::EvaluationMethodType;
use crate::measure::MeasureReference;
use crate::method::EvaluationMethod;
use crate::result::QualityResult;

/// The fixed taxonomy of quality element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Excess data present.
    CompletenessCommission,
    /// Data absent that should be present.
    CompletenessOmission,
    /// Adherence to the rules of the conceptual schema.
    ConceptualConsistency,
    /// Adherence of values to their value domains.
    DomainConsistency,
    /// Adherence to the physical structure of the dataset.
    FormatConsistency,
    /// Correctness of explicitly encoded topology.
    TopologicalConsistency,
    /// Closeness of coordinates to values accepted as true.
    AbsolutePositionalAccuracy,
    /// Closeness of relative positions to values accepted as true.
    RelativePositionalAccuracy,
    /// Closeness of gridded positions to values accepted as true.
    GriddedDataPositionalAccuracy,
    /// Correctness of assigned classes.
    ClassificationCorrectness,
    /// Correctness of non-quantitative attributes.
    NonQuantitativeAttributeCorrectness,
    /// Accuracy of quantitative attributes.
    QuantitativeAttributeAccuracy,
    /// Closeness of reported time measurements to values accepted as true.
    AccuracyOfTimeMeasurement,
    /// Correctness of ordered events or sequences.
    TemporalConsistency,
    /// Validity of data with respect to time.
    TemporalValidity,
    /// Degree of adherence to a specific set of user requirements.
    Usability,
    /// Metaquality: trustworthiness of a quality evaluation.
    Confidence,
    /// Metaquality: degree to which the sample used is representative.
    Representativity,
    /// Metaquality: expected uniformity of the results.
    Homogeneity,
}

impl ElementKind {
    /// Whether this kind describes the quality of a quality evaluation
    /// rather than of the data itself.
    pub fn is_metaquality(&self) -> bool {
        matches!(
            self,
            ElementKind::Confidence | ElementKind::Representativity | ElementKind::Homogeneity
        )
    }
}

/// One reported aspect of data quality: what was measured, how, and with
/// what results.
///
/// The measure and evaluation method are the source of truth; the legacy
/// flattened accessors of the pre-19157 model are derived views over
/// them, not duplicated storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityElement {
    pub kind: ElementKind,
    pub measure: Option<MeasureReference>,
    pub evaluation_method: Option<EvaluationMethod>,
    /// At least one result is mandatory; enforced by
    /// [`DataQuality::validate`](crate::DataQuality::validate).
    pub results: Vec<QualityResult>,
}

impl QualityElement {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            measure: None,
            evaluation_method: None,
            results: Vec::new(),
        }
    }

    pub fn with_measure(mut self, measure: MeasureReference) -> Self {
        self.measure = Some(measure);
        self
    }

    pub fn with_evaluation_method(mut self, method: EvaluationMethod) -> Self {
        self.evaluation_method = Some(method);
        self
    }

    pub fn with_result(mut self, result: QualityResult) -> Self {
        self.results.push(result);
        self
    }

    // Legacy flattened accessors, derived from the composed objects.

    /// Names of the measure applied, from the measure reference.
    #[deprecated(note = "use the `measure` reference instead")]
    pub fn names_of_measure(&self) -> Vec<&str> {
        self.measure
            .as_ref()
            .map(|m| m.names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Identifier of the measure applied, from the measure reference.
    #[deprecated(note = "use the `measure` reference instead")]
    pub fn measure_identification(&self) -> Option<Uuid> {
        self.measure.as_ref().and_then(|m| m.identifier)
    }

    /// Description of the measure, from the measure reference.
    #[deprecated(note = "use the `measure` reference instead")]
    pub fn measure_description(&self) -> Option<&str> {
        self.measure.as_ref().and_then(|m| m.description.as_deref())
    }

    /// Type of method used, from the evaluation method.
    #[deprecated(note = "use the `evaluation_method` instead")]
    pub fn evaluation_method_type(&self) -> Option<&EvaluationMethodType> {
        self.evaluation_method
            .as_ref()
            .and_then(|m| m.method_type.as_ref())
    }

    /// Description of the procedure, from the evaluation method.
    #[deprecated(note = "use the `evaluation_method` instead")]
    pub fn evaluation_procedure(&self) -> Option<&geo_common::Citation> {
        self.evaluation_method
            .as_ref()
            .and_then(|m| m.procedure.as_ref())
    }

    /// Dates of the evaluation, from the evaluation method.
    #[deprecated(note = "use the `evaluation_method` instead")]
    pub fn dates(&self) -> &[DateTime<Utc>] {
        self.evaluation_method
            .as_ref()
            .map(|m| m.dates.as_slice())
            .unwrap_or_default()
    }
}
