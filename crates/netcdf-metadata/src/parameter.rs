//! Parameter access over an attribute dictionary.
//!
//! Attributes read through this layer get the full error taxonomy: an
//! unknown name, a value of the wrong type, and an out-of-range value on
//! write are three distinct failures.

use crate::cdl::{AttrValue, CdlVariable};
use crate::error::{NetCdfError, NetCdfResult};

/// One named parameter with its current value and, when the source
/// declared one, a legal numeric range.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: AttrValue,
    pub valid_range: Option<(f64, f64)>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: AttrValue) -> Self {
        Self {
            name: name.into(),
            value,
            valid_range: None,
        }
    }

    pub fn with_valid_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.valid_range = Some((minimum, maximum));
        self
    }

    pub fn as_str(&self) -> NetCdfResult<&str> {
        self.value.as_str().ok_or(NetCdfError::InvalidParameterType {
            name: self.name.clone(),
            expected: "text",
        })
    }

    pub fn as_f64(&self) -> NetCdfResult<f64> {
        self.value.as_f64().ok_or(NetCdfError::InvalidParameterType {
            name: self.name.clone(),
            expected: "number",
        })
    }

    pub fn as_i64(&self) -> NetCdfResult<i64> {
        let value = self.as_f64()?;
        if value.fract() != 0.0 {
            return Err(NetCdfError::InvalidParameterType {
                name: self.name.clone(),
                expected: "integer",
            });
        }
        Ok(value as i64)
    }

    /// Replace the numeric value, enforcing the declared range.
    pub fn set_f64(&mut self, value: f64) -> NetCdfResult<()> {
        if !matches!(self.value, AttrValue::Number(_)) {
            return Err(NetCdfError::InvalidParameterType {
                name: self.name.clone(),
                expected: "number",
            });
        }
        if let Some((minimum, maximum)) = self.valid_range {
            if value < minimum || value > maximum {
                return Err(NetCdfError::InvalidParameterValue {
                    name: self.name.clone(),
                    reason: format!("{value} outside [{minimum}, {maximum}]"),
                });
            }
        }
        self.value = AttrValue::Number(value);
        Ok(())
    }
}

/// An ordered parameter dictionary, typically built from one variable's
/// attributes or a header's global attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterList {
    entries: Vec<Parameter>,
}

impl ParameterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a variable's attributes. A `valid_range` attribute, when
    /// present, becomes the range constraint of every numeric parameter
    /// sharing the variable.
    pub fn from_variable(variable: &CdlVariable) -> Self {
        let range = variable
            .attribute("valid_range")
            .and_then(AttrValue::as_f64_list)
            .filter(|r| r.len() == 2)
            .map(|r| (r[0], r[1]));
        let entries = variable
            .attributes
            .iter()
            .map(|(name, value)| {
                let mut parameter = Parameter::new(name.clone(), value.clone());
                if let (Some((min, max)), AttrValue::Number(_)) = (range, value) {
                    parameter = parameter.with_valid_range(min, max);
                }
                parameter
            })
            .collect();
        Self { entries }
    }

    pub fn from_attributes(attributes: &[(String, AttrValue)]) -> Self {
        Self {
            entries: attributes
                .iter()
                .map(|(name, value)| Parameter::new(name.clone(), value.clone()))
                .collect(),
        }
    }

    pub fn parameter(&self, name: &str) -> NetCdfResult<&Parameter> {
        self.entries
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| NetCdfError::ParameterNotFound(name.to_string()))
    }

    pub fn parameter_mut(&mut self, name: &str) -> NetCdfResult<&mut Parameter> {
        self.entries
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| NetCdfError::ParameterNotFound(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
