//! Metadata adapter for netCDF headers.
//!
//! Illustrative, non-normative glue: parses a netCDF CDL header (the
//! `ncdump -h` text form) into an attribute dictionary and exposes
//! citation, extent, lineage, data-quality, and sample-dimension views
//! over it. Nothing in the coverage or quality crates depends on this;
//! it shows how an external format's attributes map onto the metadata
//! types.
//!
//! Only header text is read. Variable data access would need the native
//! netCDF/HDF5 libraries and is out of scope here.

pub mod cdl;
pub mod error;
pub mod metadata;
pub mod parameter;

pub use cdl::{AttrValue, CdlHeader, CdlVariable};
pub use error::{NetCdfError, NetCdfResult};
pub use metadata::NetcdfMetadata;
pub use parameter::{Parameter, ParameterList};
