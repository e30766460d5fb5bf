//! The coverage contract.

use std::sync::Arc;

use geo_common::{CrsId, DirectPosition, Envelope, Extent, Geometry, Record, RecordType, TemporalExtent, Value};
use tracing::warn;

use crate::codes::CommonPointRule;
use crate::domain::DomainObject;
use crate::error::{EvaluateError, EvaluateResult};
use crate::pair::GeometryValuePair;

/// Tolerance for distance ties in `find`.
const TIE_TOLERANCE: f64 = 1e-9;

/// A function from positions in a domain to attribute-value records.
///
/// The range is homogeneous: every record returned by [`evaluate`] and
/// enumerated by [`list`] conforms to [`range_type`] over the whole domain.
///
/// [`evaluate`]: Coverage::evaluate
/// [`list`]: Coverage::list
/// [`range_type`]: Coverage::range_type
pub trait Coverage {
    /// The coordinate reference system the domain is referenced to.
    fn coordinate_reference_system(&self) -> &CrsId;

    /// Bounding box of the coverage domain, in CRS coordinates.
    fn envelope(&self) -> Envelope;

    /// Extents of the domain, in space, time or both.
    fn domain_extents(&self) -> Vec<Extent> {
        vec![Extent::spatial(self.envelope())]
    }

    /// The domain objects, deduplicated by identity when shared across
    /// several geometry-value pairs.
    fn domain_elements(&self) -> Vec<Arc<DomainObject>> {
        let mut elements: Vec<Arc<DomainObject>> = Vec::new();
        for pair in self.list() {
            if !elements.iter().any(|e| Arc::ptr_eq(e, pair.domain())) {
                elements.push(pair.domain().clone());
            }
        }
        elements
    }

    /// The stored attribute records of the range. Continuous coverages
    /// expose their control values here.
    fn range_elements(&self) -> Vec<Record> {
        self.list().iter().map(|p| p.value().clone()).collect()
    }

    /// Schema every record of the range conforms to.
    fn range_type(&self) -> &RecordType;

    /// Tie-break policy for positions on the boundary of, or inside,
    /// multiple domain or value objects. A fixed property of the coverage,
    /// not a per-call parameter.
    fn common_point_rule(&self) -> CommonPointRule;

    /// Every geometry-value pair of the coverage. Empty for an analytical
    /// coverage.
    fn list(&self) -> Vec<GeometryValuePair>;

    /// The pairs whose domain objects lie within the given spatial and/or
    /// temporal components. A `None` component is unconstrained; both
    /// `None` selects everything.
    fn select(
        &self,
        spatial: Option<&Geometry>,
        temporal: Option<&TemporalExtent>,
    ) -> Vec<GeometryValuePair> {
        self.list()
            .into_iter()
            .filter(|pair| {
                spatial.map_or(true, |s| pair.domain().within(s))
                    && temporal.map_or(true, |t| pair.domain().overlaps_time(t))
            })
            .collect()
    }

    /// Up to `limit` pairs ordered by ascending distance from `p`.
    ///
    /// When the pair just beyond the cut is at the same distance as the
    /// last pair returned, the truncation is still deterministic (stable
    /// order of `list`) but a warning is emitted, as the excluded pair is
    /// an equally good answer.
    fn find(&self, p: &DirectPosition, limit: usize) -> Vec<GeometryValuePair> {
        let mut ranked: Vec<(f64, GeometryValuePair)> = self
            .list()
            .into_iter()
            .map(|pair| (pair.domain().distance_to(p), pair))
            .collect();
        ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        if limit > 0 && ranked.len() > limit {
            let last = ranked[limit - 1].0;
            let next = ranked[limit].0;
            if (next - last).abs() <= TIE_TOLERANCE {
                warn!(
                    distance = last,
                    limit, "find: domain objects tied at the limit boundary were truncated"
                );
            }
        }
        ranked.truncate(limit);
        ranked.into_iter().map(|(_, pair)| pair).collect()
    }

    /// The single nearest pair. Shortcut for `find(p, 1)`.
    fn find_nearest(&self, p: &DirectPosition) -> Option<GeometryValuePair> {
        self.find(p, 1).into_iter().next()
    }

    /// The attribute records applicable at `p`.
    ///
    /// With `attributes` unspecified every field of the range type is
    /// returned, otherwise only the named fields. Overlapping candidates
    /// are combined according to [`common_point_rule`].
    ///
    /// [`common_point_rule`]: Coverage::common_point_rule
    fn evaluate(
        &self,
        p: &DirectPosition,
        attributes: Option<&[&str]>,
    ) -> EvaluateResult<Vec<Record>>;

    /// The domain objects whose associated value matches the given record.
    /// The probe may name a subset of the range fields. May legitimately
    /// return an empty set.
    fn evaluate_inverse(&self, value: &Record) -> Vec<Arc<DomainObject>> {
        let mut result: Vec<Arc<DomainObject>> = Vec::new();
        for pair in self.list() {
            if pair.value().matches(value)
                && !result.iter().any(|d| Arc::ptr_eq(d, pair.domain()))
            {
                result.push(pair.domain().clone());
            }
        }
        result
    }
}

/// Combine the candidate records applicable at one position according to
/// the declared common point rule.
///
/// For continuous coverages the candidates are the per-object interpolation
/// results: the rule is applied after interpolation, each overlapping value
/// object having been interpolated independently.
pub(crate) fn apply_common_point_rule(
    rule: &CommonPointRule,
    candidates: Vec<Record>,
) -> EvaluateResult<Vec<Record>> {
    use geo_common::CodeList;

    if candidates.len() <= 1 {
        return Ok(candidates);
    }
    match rule.name() {
        "ALL" => Ok(candidates),
        "START" => Ok(candidates.into_iter().take(1).collect()),
        "END" => Ok(candidates.into_iter().last().into_iter().collect()),
        "AVERAGE" => combine_numeric(candidates, |values| {
            values.iter().sum::<f64>() / values.len() as f64
        }),
        "LOW" => combine_numeric(candidates, |values| {
            values.iter().copied().fold(f64::INFINITY, f64::min)
        }),
        "HIGH" => combine_numeric(candidates, |values| {
            values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        }),
        other => Err(EvaluateError::cannot_evaluate(format!(
            "unsupported common point rule '{other}'"
        ))),
    }
}

/// Field-wise numeric reduction of the candidate records into one record.
fn combine_numeric(
    candidates: Vec<Record>,
    reduce: impl Fn(&[f64]) -> f64,
) -> EvaluateResult<Vec<Record>> {
    let first = &candidates[0];
    let mut combined = Record::new();
    for (name, _) in first.fields() {
        let values: Option<Vec<f64>> = candidates
            .iter()
            .map(|r| r.get(name).and_then(Value::as_f64))
            .collect();
        match values {
            Some(values) => {
                combined = combined.with_field(name, Value::Real(reduce(&values)));
            }
            None => {
                return Err(EvaluateError::cannot_evaluate(format!(
                    "field '{name}' is not numeric and cannot be combined by the common point rule"
                )))
            }
        }
    }
    Ok(vec![combined])
}

/// Restrict records to the requested attribute names, validating the names
/// against the range type. `None` keeps the whole range.
pub(crate) fn select_attributes(
    range_type: &RecordType,
    records: Vec<Record>,
    attributes: Option<&[&str]>,
) -> EvaluateResult<Vec<Record>> {
    let Some(names) = attributes else {
        return Ok(records);
    };
    for name in names {
        if range_type.field_type(name).is_none() {
            return Err(EvaluateError::cannot_evaluate(format!(
                "attribute '{name}' is not part of the range type '{}'",
                range_type.name()
            )));
        }
    }
    Ok(records.into_iter().map(|r| r.project(names)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: &[f64]) -> Vec<Record> {
        values.iter().map(|v| Record::single("v", *v)).collect()
    }

    #[test]
    fn test_rule_average_low_high() {
        let rule = CommonPointRule::average();
        let combined = apply_common_point_rule(&rule, records(&[10.0, 20.0])).unwrap();
        assert_eq!(combined, vec![Record::single("v", 15.0)]);

        let low = apply_common_point_rule(&CommonPointRule::low(), records(&[10.0, 20.0]));
        assert_eq!(low.unwrap(), vec![Record::single("v", 10.0)]);

        let high = apply_common_point_rule(&CommonPointRule::high(), records(&[10.0, 20.0]));
        assert_eq!(high.unwrap(), vec![Record::single("v", 20.0)]);
    }

    #[test]
    fn test_rule_all_start_end() {
        let all = apply_common_point_rule(&CommonPointRule::all(), records(&[1.0, 2.0])).unwrap();
        assert_eq!(all.len(), 2);

        let start =
            apply_common_point_rule(&CommonPointRule::start(), records(&[1.0, 2.0])).unwrap();
        assert_eq!(start, vec![Record::single("v", 1.0)]);

        let end = apply_common_point_rule(&CommonPointRule::end(), records(&[1.0, 2.0])).unwrap();
        assert_eq!(end, vec![Record::single("v", 2.0)]);
    }

    #[test]
    fn test_rule_average_rejects_text() {
        let rule = CommonPointRule::average();
        let candidates = vec![
            Record::new().with_field("label", Value::Text("a".into())),
            Record::new().with_field("label", Value::Text("b".into())),
        ];
        assert!(apply_common_point_rule(&rule, candidates).is_err());
    }

    #[test]
    fn test_unknown_rule_cannot_combine() {
        use geo_common::CodeList;
        let exotic = CommonPointRule::value_of("MEDIAN_OF_MEDIANS");
        assert!(apply_common_point_rule(&exotic, records(&[1.0, 2.0])).is_err());
        // A single candidate needs no combining regardless of the rule.
        assert!(apply_common_point_rule(&exotic, records(&[1.0])).is_ok());
    }

    #[test]
    fn test_select_attributes_validates_names() {
        let range = RecordType::new("range").with_field("v", geo_common::ValueType::Real);
        let all = select_attributes(&range, records(&[1.0]), None).unwrap();
        assert_eq!(all[0].len(), 1);

        let named = select_attributes(&range, records(&[1.0]), Some(&["v"])).unwrap();
        assert_eq!(named[0].len(), 1);

        assert!(select_attributes(&range, records(&[1.0]), Some(&["missing"])).is_err());
    }
}
