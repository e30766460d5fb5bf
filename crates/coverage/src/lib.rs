//! Coverage model after ISO 19123.
//!
//! A coverage is a function from positions in a spatial, temporal or
//! spatiotemporal domain to records of attribute values. This crate
//! defines the [`Coverage`] contract, the domain and geometry-value pair
//! types it is built from, interpolation bases ([`value_object`]) for
//! continuous coverages, sample-dimension descriptors, and in-memory
//! discrete and continuous implementations.

pub mod codes;
pub mod continuous;
pub mod coverage;
pub mod discrete;
pub mod domain;
pub mod error;
pub mod pair;
pub mod sample;
pub mod value_object;

pub use codes::{
    ColorInterpretation, CommonPointRule, InterpolationMethod, PaletteInterpretation,
    SampleDimensionType,
};
pub use continuous::{
    ContinuousCoverage, SegmentedCurveCoverage, ThiessenPolygonCoverage, TinCoverage,
};
pub use coverage::Coverage;
pub use discrete::DiscreteCoverage;
pub use domain::DomainObject;
pub use error::{EvaluateError, EvaluateResult};
pub use pair::GeometryValuePair;
pub use sample::SampleDimension;
pub use value_object::{ThiessenValuePolygon, ValueCurve, ValueObject, ValueTriangle};
