//! Data-quality model after ISO 19157.
//!
//! A [`DataQuality`] record states how well a scoped subset of data meets
//! some quality measures. The evaluation itself happens elsewhere: this
//! crate only describes what was measured ([`Measure`] /
//! [`MeasureReference`]), how ([`EvaluationMethod`]), over what
//! ([`Scope`]), and with what outcome ([`QualityResult`]).

pub mod codes;
pub mod data_quality;
pub mod element;
pub mod error;
pub mod measure;
pub mod method;
pub mod result;
pub mod scope;

pub use codes::{EvaluationMethodType, ScopeLevel, ValueStructure};
pub use data_quality::{DataQuality, Lineage};
pub use element::{ElementKind, QualityElement};
pub use error::{QualityError, QualityResultOf};
pub use measure::{Measure, MeasureReference};
pub use method::EvaluationMethod;
pub use result::{
    ConformanceResult, CoverageResult, DescriptiveResult, QuantitativeResult, QualityResult,
};
pub use scope::Scope;
