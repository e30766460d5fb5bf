//! Common primitives shared across the geo-schema crates.

pub mod citation;
pub mod codelist;
pub mod crs;
pub mod envelope;
pub mod extent;
pub mod geometry;
pub mod position;
pub mod record;

pub use citation::{Citation, Identifier};
pub use codelist::{CodeEntry, CodeList};
pub use crs::CrsId;
pub use envelope::Envelope;
pub use extent::{Extent, TemporalExtent};
pub use geometry::Geometry;
pub use position::DirectPosition;
pub use record::{Record, RecordType, Value, ValueType};
