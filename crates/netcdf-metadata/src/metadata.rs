//! Metadata views over a parsed header.
//!
//! One backing header object exposes several orthogonal views: a
//! citation, a geographic extent, a lineage, a data-quality record, and
//! the per-band sample dimensions. Each view reads the conventional
//! attribute names (CF / ACDD) and degrades to `None` when an attribute
//! is absent.

use std::path::Path;

use chrono::{DateTime, Utc};
use coverage::{SampleDimension, SampleDimensionType};
use geo_common::{Citation, Envelope, Extent, Identifier};
use quality::{DataQuality, Lineage, QualityError, Scope};
use tracing::warn;

use crate::cdl::{CdlHeader, CdlVariable};
use crate::error::{NetCdfError, NetCdfResult};

/// Metadata views over one netCDF header.
#[derive(Debug, Clone, PartialEq)]
pub struct NetcdfMetadata {
    header: CdlHeader,
}

impl NetcdfMetadata {
    pub fn from_header(header: CdlHeader) -> Self {
        Self { header }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> NetCdfResult<Self> {
        Ok(Self::from_header(CdlHeader::from_file(path)?))
    }

    pub fn header(&self) -> &CdlHeader {
        &self.header
    }

    /// Citation of the dataset: title, identifier, and creation date.
    /// Falls back to the dataset name when no `title` attribute exists.
    pub fn citation(&self) -> Citation {
        let title = self
            .header
            .str_attribute("title")
            .unwrap_or(&self.header.name);
        let mut citation = Citation::new(title);
        if let Some(id) = self
            .header
            .str_attribute("id")
            .or_else(|| self.header.str_attribute("dataset_name"))
        {
            citation = citation.with_identifier(Identifier::new(id));
        }
        if let Some(date) = self
            .header
            .str_attribute("date_created")
            .and_then(parse_timestamp)
        {
            citation = citation.with_date(date);
        }
        citation
    }

    /// Geographic extent from the `geospatial_*_bound` attributes, when
    /// all four are present.
    pub fn geographic_extent(&self) -> Option<Extent> {
        let west = self.header.f64_attribute("geospatial_westbound_longitude")?;
        let east = self.header.f64_attribute("geospatial_eastbound_longitude")?;
        let south = self.header.f64_attribute("geospatial_southbound_latitude")?;
        let north = self.header.f64_attribute("geospatial_northbound_latitude")?;
        Some(Extent::spatial(Envelope::new_2d(west, south, east, north)))
    }

    /// Provenance from the `history` attribute.
    pub fn lineage(&self) -> Option<Lineage> {
        self.header
            .str_attribute("history")
            .map(Lineage::with_statement)
    }

    /// A dataset-scoped quality record carrying the lineage. Headers
    /// without a `history` attribute cannot produce a valid record.
    pub fn data_quality(&self) -> NetCdfResult<DataQuality> {
        let mut scope = Scope::dataset();
        if let Some(extent) = self.geographic_extent() {
            scope = scope.with_extent(extent);
        }
        let mut record = DataQuality::new(scope);
        if let Some(lineage) = self.lineage() {
            record = record.with_lineage(lineage);
        }
        record.validate().map_err(|e| match e {
            QualityError::MissingReports => {
                NetCdfError::MissingData("history attribute (lineage)".to_string())
            }
            other => NetCdfError::InvalidFormat(other.to_string()),
        })?;
        Ok(record)
    }

    /// One sample dimension per data variable, from the packing
    /// attributes (`scale_factor`, `add_offset`, `_FillValue`, `units`,
    /// `valid_range`). Variables of a storage type with no band
    /// equivalent (e.g. `char`) are skipped.
    pub fn sample_dimensions(&self) -> Vec<SampleDimension> {
        self.header
            .variables
            .iter()
            .filter(|v| v.is_data_variable())
            .filter_map(|v| self.sample_dimension(v))
            .collect()
    }

    fn sample_dimension(&self, variable: &CdlVariable) -> Option<SampleDimension> {
        let sample_type = match sample_type_of(&variable.data_type) {
            Some(t) => t,
            None => {
                warn!(
                    variable = variable.name.as_str(),
                    data_type = variable.data_type.as_str(),
                    "no sample dimension type for storage type"
                );
                return None;
            }
        };
        let description = variable
            .str_attribute("long_name")
            .unwrap_or(&variable.name);
        let mut band = SampleDimension::new(description, sample_type).with_scale_offset(
            variable.f64_attribute("scale_factor").unwrap_or(1.0),
            variable.f64_attribute("add_offset").unwrap_or(0.0),
        );
        if let Some(units) = variable.str_attribute("units") {
            band = band.with_units(units);
        }
        if let Some(fill) = variable.f64_attribute("_FillValue") {
            band = band.with_no_data_value(fill);
        }
        if let Some(range) = variable
            .attribute("valid_range")
            .and_then(crate::cdl::AttrValue::as_f64_list)
            .filter(|r| r.len() == 2)
        {
            band = band.with_range(range[0], range[1]);
        }
        Some(band)
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

fn sample_type_of(data_type: &str) -> Option<SampleDimensionType> {
    match data_type {
        "byte" => Some(SampleDimensionType::signed_8bits()),
        "ubyte" => Some(SampleDimensionType::unsigned_8bits()),
        "short" => Some(SampleDimensionType::signed_16bits()),
        "ushort" => Some(SampleDimensionType::unsigned_16bits()),
        "int" | "long" => Some(SampleDimensionType::signed_32bits()),
        "uint" => Some(SampleDimensionType::unsigned_32bits()),
        "float" => Some(SampleDimensionType::real_32bits()),
        "double" => Some(SampleDimensionType::real_64bits()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"netcdf OR_ABI-L2-CMIPC-M6C13_G16 {
dimensions:
	y = 1500 ;
	x = 2500 ;
variables:
	short CMI(y, x) ;
		CMI:long_name = "ABI L2+ Cloud and Moisture Imagery brightness temperature" ;
		CMI:scale_factor = 0.04926f ;
		CMI:add_offset = 173.15f ;
		CMI:_FillValue = -1s ;
		CMI:units = "K" ;
		CMI:valid_range = 0s, 4094s ;
	byte DQF(y, x) ;
		DQF:long_name = "data quality flags" ;
		DQF:_FillValue = -1b ;
	int goes_imager_projection ;
		goes_imager_projection:perspective_point_height = 35786023. ;

// global attributes:
		:title = "ABI L2 Cloud and Moisture Imagery" ;
		:dataset_name = "OR_ABI-L2-CMIPC-M6C13_G16_s20241361801172.nc" ;
		:date_created = "2024-05-15T18:06:22.8Z" ;
		:geospatial_westbound_longitude = -152.1f ;
		:geospatial_eastbound_longitude = -52.9f ;
		:geospatial_northbound_latitude = 56.8f ;
		:geospatial_southbound_latitude = 14.6f ;
		:history = "Created by CSPP Geo; region = CONUS" ;
}
"#;

    fn sample_metadata() -> NetcdfMetadata {
        NetcdfMetadata::from_header(CdlHeader::parse(SAMPLE).unwrap())
    }

    #[test]
    fn test_citation_view() {
        let citation = sample_metadata().citation();
        assert_eq!(citation.title, "ABI L2 Cloud and Moisture Imagery");
        assert_eq!(
            citation.identifiers[0].code,
            "OR_ABI-L2-CMIPC-M6C13_G16_s20241361801172.nc"
        );
        let expected = Utc
            .with_ymd_and_hms(2024, 5, 15, 18, 6, 22)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(800))
            .unwrap();
        assert_eq!(citation.date, Some(expected));
    }

    #[test]
    fn test_geographic_extent_view() {
        let extent = sample_metadata().geographic_extent().unwrap();
        let envelope = extent.spatial.unwrap();
        assert_eq!(envelope.min.coordinates, vec![-152.1, 14.6]);
        assert_eq!(envelope.max.coordinates, vec![-52.9, 56.8]);
    }

    #[test]
    fn test_data_quality_view() {
        let record = sample_metadata().data_quality().unwrap();
        assert!(record
            .lineage
            .as_ref()
            .and_then(|l| l.statement.as_deref())
            .is_some_and(|s| s.contains("CSPP Geo")));
        assert_eq!(record.scope.level, quality::ScopeLevel::dataset());
        assert!(record.scope.extent.is_some());
    }

    #[test]
    fn test_data_quality_requires_lineage() {
        let header =
            CdlHeader::parse("netcdf bare {\ndimensions:\n\tx = 1 ;\nvariables:\n\tfloat v(x) ;\n}\n")
                .unwrap();
        let metadata = NetcdfMetadata::from_header(header);
        assert!(matches!(
            metadata.data_quality(),
            Err(NetCdfError::MissingData(_))
        ));
    }

    #[test]
    fn test_sample_dimension_view() {
        let bands = sample_metadata().sample_dimensions();
        // CMI and DQF; the scalar projection variable carries no band
        assert_eq!(bands.len(), 2);

        let cmi = &bands[0];
        assert_eq!(cmi.sample_type, SampleDimensionType::signed_16bits());
        assert_eq!(cmi.units.as_deref(), Some("K"));
        assert!((cmi.geophysics(2000.0) - (2000.0 * 0.04926 + 173.15)).abs() < 1e-9);
        assert!(cmi.is_no_data(-1.0));
        assert_eq!(cmi.minimum_value, Some(0.0));
        assert_eq!(cmi.maximum_value, Some(4094.0));

        let dqf = &bands[1];
        assert_eq!(dqf.sample_type, SampleDimensionType::signed_8bits());
        assert_eq!(dqf.description, "data quality flags");
    }
}
