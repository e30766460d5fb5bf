//! Code lists of the coverage model.
//!
//! These are open enumerations: `value_of` on an unrecognized name
//! registers a new code instead of failing, so data carrying codes from a
//! newer edition of the standard still round-trips.

use geo_common::code_list;

code_list! {
    /// Procedure for evaluating a coverage at a position that falls on the
    /// boundary of, or within, two or more overlapping geometric objects.
    pub struct CommonPointRule("CV_CommonPointRule") {
        /// Average the attribute values of the overlapping objects.
        average => ("AVERAGE", "average"),
        /// Take the field-wise lowest attribute values.
        low => ("LOW", "low"),
        /// Take the field-wise highest attribute values.
        high => ("HIGH", "high"),
        /// Return every candidate record.
        all => ("ALL", "all"),
        /// For segmented curves: the value of the segment that starts at
        /// the shared position.
        start => ("START", "start"),
        /// For segmented curves: the value of the segment that ends at the
        /// shared position.
        end => ("END", "end"),
    }
}

code_list! {
    /// Method for deriving an attribute value at a position inside a value
    /// object from the object's control values.
    pub struct InterpolationMethod("CV_InterpolationMethod") {
        /// Value of the nearest control point.
        nearest_neighbour => ("NEAREST_NEIGHBOUR", "nearestneighbour"),
        /// Linear interpolation along a value curve.
        linear => ("LINEAR", "linear"),
        /// Quadratic interpolation along a value curve.
        quadratic => ("QUADRATIC", "quadratic"),
        /// Cubic interpolation along a value curve.
        cubic => ("CUBIC", "cubic"),
        /// Bilinear interpolation within a quadrilateral grid cell.
        bilinear => ("BILINEAR", "bilinear"),
        /// Thiessen-polygon lost-area weighting.
        lost_area => ("LOST_AREA", "lostarea"),
        /// Barycentric interpolation within a triangle.
        barycentric => ("BARYCENTRIC", "barycentric"),
    }
}

code_list! {
    /// Data type of a sample dimension's values.
    pub struct SampleDimensionType("CV_SampleDimensionType") {
        unsigned_1bit => ("UNSIGNED_1BIT", "CV_1BIT"),
        unsigned_2bits => ("UNSIGNED_2BITS", "CV_2BIT"),
        unsigned_4bits => ("UNSIGNED_4BITS", "CV_4BIT"),
        unsigned_8bits => ("UNSIGNED_8BITS", "CV_8BIT_U"),
        signed_8bits => ("SIGNED_8BITS", "CV_8BIT_S"),
        unsigned_16bits => ("UNSIGNED_16BITS", "CV_16BIT_U"),
        signed_16bits => ("SIGNED_16BITS", "CV_16BIT_S"),
        unsigned_32bits => ("UNSIGNED_32BITS", "CV_32BIT_U"),
        signed_32bits => ("SIGNED_32BITS", "CV_32BIT_S"),
        real_32bits => ("REAL_32BITS", "CV_32BIT_REAL"),
        real_64bits => ("REAL_64BITS", "CV_64BIT_REAL"),
    }
}

code_list! {
    /// Color role of a sample dimension. Kept for compatibility with the
    /// legacy OGC 01-004 grid coverage model.
    pub struct ColorInterpretation("CV_ColorInterpretation") {
        undefined => ("UNDEFINED", "CV_Undefined"),
        gray_index => ("GRAY_INDEX", "CV_GrayIndex"),
        palette_index => ("PALETTE_INDEX", "CV_PaletteIndex"),
        red_band => ("RED_BAND", "CV_RedBand"),
        green_band => ("GREEN_BAND", "CV_GreenBand"),
        blue_band => ("BLUE_BAND", "CV_BlueBand"),
        alpha_band => ("ALPHA_BAND", "CV_AlphaBand"),
    }
}

code_list! {
    /// Palette encoding of a sample dimension. Kept for compatibility with
    /// the legacy OGC 01-004 grid coverage model.
    pub struct PaletteInterpretation("CV_PaletteInterpretation") {
        gray => ("GRAY", "CV_Gray"),
        rgb => ("RGB", "CV_RGB"),
        cmyk => ("CMYK", "CV_CMYK"),
        hls => ("HLS", "CV_HLS"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_common::CodeList;

    #[test]
    fn test_common_point_rule_round_trip() {
        for rule in CommonPointRule::values() {
            assert_eq!(CommonPointRule::value_of(rule.name()), rule);
        }
    }

    #[test]
    fn test_unknown_code_is_created_idempotently() {
        let first = CommonPointRule::value_of("WEIGHTED_MEDIAN");
        assert_eq!(first.name(), "WEIGHTED_MEDIAN");
        assert_eq!(CommonPointRule::value_of("WEIGHTED_MEDIAN"), first);
        assert!(CommonPointRule::values().contains(&first));
    }

    #[test]
    fn test_declared_rules_present() {
        let names: Vec<String> = CommonPointRule::values()
            .iter()
            .map(|v| v.name().to_owned())
            .collect();
        for expected in ["AVERAGE", "LOW", "HIGH", "ALL", "START", "END"] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_interpolation_identifier() {
        assert_eq!(
            InterpolationMethod::nearest_neighbour().identifier(),
            Some("nearestneighbour")
        );
        assert_eq!(InterpolationMethod::LIST_IDENTIFIER, "CV_InterpolationMethod");
    }

    #[test]
    fn test_code_lists_are_independent() {
        // Same name in two different lists must give distinct families.
        let gray = ColorInterpretation::gray_index();
        let palette_gray = PaletteInterpretation::gray();
        assert_eq!(gray.name(), "GRAY_INDEX");
        assert_eq!(palette_gray.name(), "GRAY");
        assert!(SampleDimensionType::values().len() >= 11);
    }
}
