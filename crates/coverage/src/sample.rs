//! Sample dimensions: per-band descriptors of a coverage range.

use serde::{Deserialize, Serialize};

use crate::codes::{ColorInterpretation, PaletteInterpretation, SampleDimensionType};

/// Describes one band of a coverage range: its storage type, the transform
/// to geophysical units, and the values that mean "no data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDimension {
    pub description: String,
    pub sample_type: SampleDimensionType,
    pub category_names: Vec<String>,
    pub no_data_values: Vec<f64>,
    pub minimum_value: Option<f64>,
    pub maximum_value: Option<f64>,
    pub units: Option<String>,
    /// Multiplier from stored values to geophysical values.
    pub scale: f64,
    /// Offset from stored values to geophysical values.
    pub offset: f64,
    color_interpretation: Option<ColorInterpretation>,
    palette_interpretation: Option<PaletteInterpretation>,
}

impl SampleDimension {
    pub fn new(description: impl Into<String>, sample_type: SampleDimensionType) -> Self {
        Self {
            description: description.into(),
            sample_type,
            category_names: Vec::new(),
            no_data_values: Vec::new(),
            minimum_value: None,
            maximum_value: None,
            units: None,
            scale: 1.0,
            offset: 0.0,
            color_interpretation: None,
            palette_interpretation: None,
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_scale_offset(mut self, scale: f64, offset: f64) -> Self {
        self.scale = scale;
        self.offset = offset;
        self
    }

    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum_value = Some(minimum);
        self.maximum_value = Some(maximum);
        self
    }

    pub fn with_no_data_value(mut self, value: f64) -> Self {
        self.no_data_values.push(value);
        self
    }

    pub fn with_category_names(mut self, names: Vec<String>) -> Self {
        self.category_names = names;
        self
    }

    #[deprecated(note = "color information belongs to styling, not to the range description")]
    pub fn with_color_interpretation(mut self, color: ColorInterpretation) -> Self {
        self.color_interpretation = Some(color);
        self
    }

    #[deprecated(note = "color information belongs to styling, not to the range description")]
    pub fn with_palette_interpretation(mut self, palette: PaletteInterpretation) -> Self {
        self.palette_interpretation = Some(palette);
        self
    }

    /// Transform a stored value to geophysical units.
    pub fn geophysics(&self, raw: f64) -> f64 {
        raw * self.scale + self.offset
    }

    /// Check if a stored value is one of the declared no-data values.
    pub fn is_no_data(&self, raw: f64) -> bool {
        self.no_data_values.iter().any(|v| *v == raw)
    }

    #[deprecated(note = "color information belongs to styling, not to the range description")]
    pub fn color_interpretation(&self) -> Option<&ColorInterpretation> {
        self.color_interpretation.as_ref()
    }

    #[deprecated(note = "color information belongs to styling, not to the range description")]
    pub fn palette_interpretation(&self) -> Option<&PaletteInterpretation> {
        self.palette_interpretation.as_ref()
    }
}
