//! Code lists of the data-quality model.

use geo_common::code_list;

code_list! {
    /// How a quality measure was evaluated.
    pub struct EvaluationMethodType("DQ_EvaluationMethodTypeCode") {
        /// Full inspection of every item within the evaluated data.
        direct_internal => ("DIRECT_INTERNAL", "directInternal"),
        /// Inspection against reference data external to the evaluated
        /// data.
        direct_external => ("DIRECT_EXTERNAL", "directExternal"),
        /// Estimate based on knowledge about the data's lineage.
        indirect => ("INDIRECT", "indirect"),
    }
}

code_list! {
    /// Structure of a measure's reported value.
    pub struct ValueStructure("DQM_ValueStructure") {
        /// Finite, unordered collection that may contain duplicates.
        bag => ("BAG", "bag"),
        /// Finite, unordered collection without duplicates.
        set => ("SET", "set"),
        /// Finite, ordered collection that may contain duplicates.
        sequence => ("SEQUENCE", "sequence"),
        /// Finite collection of (key, value) pairs.
        table => ("TABLE", "table"),
        /// Rectangular array of numbers.
        matrix => ("MATRIX", "matrix"),
        /// Values defined over a spatial domain.
        coverage => ("COVERAGE", "coverage"),
    }
}

code_list! {
    /// Hierarchical level of the data a quality statement applies to.
    pub struct ScopeLevel("MD_ScopeCode") {
        dataset => ("DATASET", "dataset"),
        series => ("SERIES", "series"),
        feature_type => ("FEATURE_TYPE", "featureType"),
        feature => ("FEATURE", "feature"),
        attribute_type => ("ATTRIBUTE_TYPE", "attributeType"),
        attribute => ("ATTRIBUTE", "attribute"),
    }
}
