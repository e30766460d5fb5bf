//! Quality measures and references to them.
//!
//! The full [`Measure`] is a catalog entry: definition, value type,
//! parameters, examples. Embedding it in every quality report would
//! duplicate verbose catalog text, so an element carries a lightweight
//! [`MeasureReference`] instead, and the reference can be derived from a
//! full measure on demand.

use geo_common::{Citation, ValueType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codes::ValueStructure;

/// A parameter a measure requires beyond the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureParameter {
    pub name: String,
    pub definition: String,
    pub value_type: ValueType,
}

/// Full catalog definition of a quality measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub measure_identifier: Uuid,
    pub name: String,
    pub aliases: Vec<String>,
    /// Names of the quality element kinds this measure applies to.
    pub element_names: Vec<String>,
    pub definition: String,
    pub description: Option<String>,
    pub value_type: ValueType,
    pub value_structure: Option<ValueStructure>,
    pub parameters: Vec<MeasureParameter>,
    pub examples: Vec<String>,
    pub source_references: Vec<Citation>,
}

impl Measure {
    pub fn new(name: impl Into<String>, definition: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            measure_identifier: Uuid::new_v4(),
            name: name.into(),
            aliases: Vec::new(),
            element_names: Vec::new(),
            definition: definition.into(),
            description: None,
            value_type,
            value_structure: None,
            parameters: Vec::new(),
            examples: Vec::new(),
            source_references: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_element_name(mut self, element: impl Into<String>) -> Self {
        self.element_names.push(element.into());
        self
    }

    pub fn with_value_structure(mut self, structure: ValueStructure) -> Self {
        self.value_structure = Some(structure);
        self
    }

    pub fn with_parameter(mut self, parameter: MeasureParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_source_reference(mut self, citation: Citation) -> Self {
        self.source_references.push(citation);
        self
    }
}

/// Lightweight pointer to a measure: enough to identify it in a catalog
/// without embedding the full definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureReference {
    pub identifier: Option<Uuid>,
    pub names: Vec<String>,
    pub description: Option<String>,
}

impl MeasureReference {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            identifier: None,
            names: vec![name.into()],
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An implementation holding a full measure still satisfies the
/// lightweight-reference contract: the reference fields are derived from
/// the measure.
impl From<&Measure> for MeasureReference {
    fn from(measure: &Measure) -> Self {
        let mut names = vec![measure.name.clone()];
        names.extend(measure.aliases.iter().cloned());
        Self {
            identifier: Some(measure.measure_identifier),
            names,
            description: measure.description.clone(),
        }
    }
}
