//! CDL header parsing.
//!
//! Parses the text form of a netCDF header (the `ncdump -h` output,
//! i.e. CDL) into an attribute dictionary: dimensions, variables with
//! per-variable attributes, and global attributes. Only the header is
//! understood; reading variable data is out of scope.

use std::path::Path;

use tracing::warn;

use crate::error::{NetCdfError, NetCdfResult};

/// A single attribute value as written in CDL.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Numbers(Vec<f64>),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Numbers(ns) if ns.len() == 1 => Some(ns[0]),
            _ => None,
        }
    }

    pub fn as_f64_list(&self) -> Option<&[f64]> {
        match self {
            AttrValue::Numbers(ns) => Some(ns),
            AttrValue::Number(n) => Some(std::slice::from_ref(n)),
            _ => None,
        }
    }

    /// Human-readable name of the value kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::Text(_) => "text",
            AttrValue::Number(_) => "number",
            AttrValue::Numbers(_) => "number list",
        }
    }
}

/// One variable declaration: storage type, dimensions, and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct CdlVariable {
    pub name: String,
    /// CDL storage type keyword (`short`, `float`, `double`, ...).
    pub data_type: String,
    /// Dimension names in declaration order; empty for scalar variables.
    pub dimensions: Vec<String>,
    pub attributes: Vec<(String, AttrValue)>,
}

impl CdlVariable {
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn str_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AttrValue::as_str)
    }

    pub fn f64_attribute(&self, name: &str) -> Option<f64> {
        self.attribute(name).and_then(AttrValue::as_f64)
    }

    /// Whether the variable spans at least one dimension, i.e. carries
    /// gridded data rather than a scalar container like a projection
    /// definition.
    pub fn is_data_variable(&self) -> bool {
        !self.dimensions.is_empty()
    }
}

/// The parsed header of a netCDF file.
#[derive(Debug, Clone, PartialEq)]
pub struct CdlHeader {
    /// Dataset name from the `netcdf <name> {` line.
    pub name: String,
    pub dimensions: Vec<(String, usize)>,
    pub variables: Vec<CdlVariable>,
    pub global_attributes: Vec<(String, AttrValue)>,
}

#[derive(PartialEq)]
enum Section {
    Preamble,
    Dimensions,
    Variables,
    Global,
}

impl CdlHeader {
    /// Parse CDL header text as produced by `ncdump -h`.
    pub fn parse(text: &str) -> NetCdfResult<CdlHeader> {
        let mut name = None;
        let mut dimensions = Vec::new();
        let mut variables: Vec<CdlVariable> = Vec::new();
        let mut global_attributes = Vec::new();
        let mut section = Section::Preamble;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line == "}" {
                continue;
            }
            if let Some(rest) = line.strip_prefix("netcdf ") {
                name = Some(rest.trim_end_matches('{').trim().to_string());
                continue;
            }
            match line {
                "dimensions:" => {
                    section = Section::Dimensions;
                    continue;
                }
                "variables:" => {
                    section = Section::Variables;
                    continue;
                }
                "// global attributes:" => {
                    section = Section::Global;
                    continue;
                }
                _ => {}
            }

            match section {
                Section::Preamble => {}
                Section::Dimensions => {
                    if let Some((dim, size)) = parse_dimension_line(line) {
                        dimensions.push((dim, size));
                    } else {
                        warn!(line, "skipping unparseable dimension line");
                    }
                }
                Section::Variables => {
                    // Attribute lines carry a ':' before the '='; everything
                    // else is a variable declaration.
                    if is_attribute_line(line) {
                        match parse_attribute_line(line) {
                            Some((owner, attr, value)) if owner.is_empty() => {
                                global_attributes.push((attr, value));
                            }
                            Some((owner, attr, value)) => {
                                match variables.iter_mut().rfind(|v| v.name == owner) {
                                    Some(var) => var.attributes.push((attr, value)),
                                    None => warn!(
                                        owner,
                                        attribute = attr,
                                        "attribute for undeclared variable"
                                    ),
                                }
                            }
                            None => warn!(line, "skipping unparseable attribute line"),
                        }
                    } else if let Some(var) = parse_variable_line(line) {
                        variables.push(var);
                    } else {
                        warn!(line, "skipping unparseable variable line");
                    }
                }
                Section::Global => {
                    if is_attribute_line(line) {
                        match parse_attribute_line(line) {
                            Some((_, attr, value)) => global_attributes.push((attr, value)),
                            None => warn!(line, "skipping unparseable attribute line"),
                        }
                    }
                }
            }
        }

        let name = name.ok_or_else(|| {
            NetCdfError::InvalidFormat("no 'netcdf <name> {' line found".to_string())
        })?;
        Ok(CdlHeader {
            name,
            dimensions,
            variables,
            global_attributes,
        })
    }

    /// Read and parse a header text file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> NetCdfResult<CdlHeader> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn dimension(&self, name: &str) -> Option<usize> {
        self.dimensions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, size)| *size)
    }

    pub fn variable(&self, name: &str) -> Option<&CdlVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn global_attribute(&self, name: &str) -> Option<&AttrValue> {
        self.global_attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn str_attribute(&self, name: &str) -> Option<&str> {
        self.global_attribute(name).and_then(AttrValue::as_str)
    }

    pub fn f64_attribute(&self, name: &str) -> Option<f64> {
        self.global_attribute(name).and_then(AttrValue::as_f64)
    }

    pub fn i64_attribute(&self, name: &str) -> Option<i64> {
        self.f64_attribute(name).map(|v| v as i64)
    }
}

/// "y = 1500 ;" or "time = UNLIMITED ; // (1 currently)"
fn parse_dimension_line(line: &str) -> Option<(String, usize)> {
    let (name, rest) = line.split_once('=')?;
    let value = rest.trim().trim_start_matches("UNLIMITED");
    let value = value.split(';').next()?.trim();
    let size = if value.is_empty() {
        // UNLIMITED: current size is in the trailing comment, if any
        rest.split('(')
            .nth(1)
            .and_then(|c| c.split_whitespace().next())
            .and_then(|n| n.parse().ok())
            .unwrap_or(0)
    } else {
        value.parse().ok()?
    };
    Some((name.trim().to_string(), size))
}

/// "short CMI(y, x) ;" or "int goes_imager_projection ;"
fn parse_variable_line(line: &str) -> Option<CdlVariable> {
    let decl = line.trim_end_matches(';').trim();
    let (data_type, rest) = decl.split_once(char::is_whitespace)?;
    let rest = rest.trim();
    let (name, dims) = match rest.split_once('(') {
        Some((name, dims)) => {
            let dims = dims
                .trim_end_matches(')')
                .split(',')
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect();
            (name.trim(), dims)
        }
        None => (rest, Vec::new()),
    };
    if name.is_empty() {
        return None;
    }
    Some(CdlVariable {
        name: name.to_string(),
        data_type: data_type.to_string(),
        dimensions: dims,
        attributes: Vec::new(),
    })
}

fn is_attribute_line(line: &str) -> bool {
    match (line.find(':'), line.find('=')) {
        (Some(colon), Some(eq)) => colon < eq,
        _ => false,
    }
}

/// "CMI:scale_factor = 0.04926f ;" → ("CMI", "scale_factor", 0.04926)
/// ":title = \"...\" ;"            → ("", "title", "...")
fn parse_attribute_line(line: &str) -> Option<(String, String, AttrValue)> {
    let (lhs, rhs) = line.split_once('=')?;
    let (owner, attr) = lhs.trim().split_once(':')?;
    let value = parse_attribute_value(rhs)?;
    Some((owner.trim().to_string(), attr.trim().to_string(), value))
}

fn parse_attribute_value(rhs: &str) -> Option<AttrValue> {
    let rhs = rhs.trim().trim_end_matches(';').trim();
    if rhs.starts_with('"') {
        // String attributes may embed ';' and '='; take the outermost quotes.
        let start = rhs.find('"')? + 1;
        let end = rhs.rfind('"')?;
        if end < start {
            return None;
        }
        return Some(AttrValue::Text(rhs[start..end].to_string()));
    }
    let mut numbers = Vec::new();
    for part in rhs.split(',') {
        let cleaned = part
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_alphabetic());
        if cleaned.is_empty() {
            continue;
        }
        numbers.push(cleaned.parse::<f64>().ok()?);
    }
    match numbers.len() {
        0 => None,
        1 => Some(AttrValue::Number(numbers[0])),
        _ => Some(AttrValue::Numbers(numbers)),
    }
}
