//! Attribute-value records and their schemas.
//!
//! A coverage maps positions to records; the record type is the schema
//! those records must share over the whole domain. Fields are ordered, and
//! record equality is field-wise in declaration order.

use serde::{Deserialize, Serialize};

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
}

impl Value {
    /// Numeric view of the value, when it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            Value::Text(_) | Value::Boolean(_) => None,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::Real(_) => ValueType::Real,
            Value::Text(_) => ValueType::Text,
            Value::Boolean(_) => ValueType::Boolean,
        }
    }
}

/// The data type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Integer,
    Real,
    Text,
    Boolean,
}

/// Schema of a record: an ordered list of attribute name / data type pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordType {
    name: String,
    fields: Vec<(String, ValueType)>,
}

impl RecordType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.fields.push((name.into(), value_type));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn field_type(&self, name: &str) -> Option<ValueType> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| *t)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Check that a record has exactly the fields of this type, in order,
    /// with matching data types. Integer values are accepted where a Real
    /// field is declared.
    pub fn conforms(&self, record: &Record) -> bool {
        if record.fields.len() != self.fields.len() {
            return false;
        }
        self.fields
            .iter()
            .zip(&record.fields)
            .all(|((name, declared), (actual_name, value))| {
                name == actual_name
                    && (value.value_type() == *declared
                        || (*declared == ValueType::Real
                            && value.value_type() == ValueType::Integer))
            })
    }
}

/// One attribute-value record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// Shorthand for the ubiquitous single-real-field record.
    pub fn single(name: impl Into<String>, value: f64) -> Self {
        Self::new().with_field(name, Value::Real(value))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, v)| (name.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A new record keeping only the named fields, in this record's order.
    pub fn project(&self, names: &[&str]) -> Record {
        Record {
            fields: self
                .fields
                .iter()
                .filter(|(n, _)| names.contains(&n.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Field-wise equality restricted to the fields present in `other`.
    /// Used for inverse evaluation, where the probe record may name only a
    /// subset of the range fields.
    pub fn matches(&self, other: &Record) -> bool {
        !other.fields.is_empty()
            && other
                .fields
                .iter()
                .all(|(name, value)| self.get(name) == Some(value))
    }
}
