//! In-memory discrete coverages.

use geo_common::{CrsId, DirectPosition, Envelope, Geometry, Record, RecordType};

use crate::codes::CommonPointRule;
use crate::coverage::{apply_common_point_rule, select_attributes, Coverage};
use crate::error::{EvaluateError, EvaluateResult};
use crate::pair::GeometryValuePair;

/// A coverage whose domain is a finite set of geometry-value pairs,
/// materialized eagerly.
///
/// The flavor (point, curve, surface or solid coverage) follows from the
/// geometry of the pairs; the constructor requires the geometry variants
/// to be homogeneous, as each ISO discrete-coverage subtype does.
#[derive(Debug, Clone)]
pub struct DiscreteCoverage {
    name: String,
    crs: CrsId,
    range_type: RecordType,
    rule: CommonPointRule,
    pairs: Vec<GeometryValuePair>,
    envelope: Envelope,
}

impl DiscreteCoverage {
    /// Build a discrete coverage from its pairs.
    ///
    /// Fails when the pair list is empty, when a record does not conform
    /// to the range type (the range must be homogeneous), or when the
    /// pairs mix spatial geometry variants.
    pub fn new(
        name: impl Into<String>,
        crs: CrsId,
        range_type: RecordType,
        rule: CommonPointRule,
        pairs: Vec<GeometryValuePair>,
    ) -> EvaluateResult<Self> {
        let name = name.into();
        if pairs.is_empty() {
            return Err(EvaluateError::cannot_evaluate_in(
                name,
                "a discrete coverage needs at least one geometry-value pair",
            ));
        }
        for pair in &pairs {
            if !range_type.conforms(pair.value()) {
                return Err(EvaluateError::cannot_evaluate_in(
                    name,
                    format!(
                        "record {:?} does not conform to range type '{}'",
                        pair.value(),
                        range_type.name()
                    ),
                ));
            }
        }
        let mut variants = pairs
            .iter()
            .flat_map(|p| p.domain().spatial.iter())
            .map(std::mem::discriminant);
        if let Some(first) = variants.next() {
            if variants.any(|v| v != first) {
                return Err(EvaluateError::cannot_evaluate_in(
                    name,
                    "a discrete coverage cannot mix geometry flavors",
                ));
            }
        }
        let envelope = pairs
            .iter()
            .filter_map(|p| p.domain().envelope())
            .reduce(|a, b| a.union(&b))
            .ok_or_else(|| {
                EvaluateError::cannot_evaluate_in(name.as_str(), "coverage has no spatial domain")
            })?;

        Ok(Self {
            name,
            crs,
            range_type,
            rule,
            pairs,
            envelope,
        })
    }

    /// A point coverage: every pair must carry point geometry.
    pub fn points(
        name: impl Into<String>,
        crs: CrsId,
        range_type: RecordType,
        rule: CommonPointRule,
        pairs: Vec<GeometryValuePair>,
    ) -> EvaluateResult<Self> {
        Self::of_variant(name, crs, range_type, rule, pairs, |g| {
            matches!(g, Geometry::Point(_))
        })
    }

    /// A curve coverage: every pair must carry curve geometry.
    pub fn curves(
        name: impl Into<String>,
        crs: CrsId,
        range_type: RecordType,
        rule: CommonPointRule,
        pairs: Vec<GeometryValuePair>,
    ) -> EvaluateResult<Self> {
        Self::of_variant(name, crs, range_type, rule, pairs, |g| {
            matches!(g, Geometry::Curve(_))
        })
    }

    /// A surface coverage: every pair must carry surface geometry.
    pub fn surfaces(
        name: impl Into<String>,
        crs: CrsId,
        range_type: RecordType,
        rule: CommonPointRule,
        pairs: Vec<GeometryValuePair>,
    ) -> EvaluateResult<Self> {
        Self::of_variant(name, crs, range_type, rule, pairs, |g| {
            matches!(g, Geometry::Surface(_))
        })
    }

    fn of_variant(
        name: impl Into<String>,
        crs: CrsId,
        range_type: RecordType,
        rule: CommonPointRule,
        pairs: Vec<GeometryValuePair>,
        accepts: impl Fn(&Geometry) -> bool,
    ) -> EvaluateResult<Self> {
        let name = name.into();
        if let Some(pair) = pairs
            .iter()
            .find(|p| !p.domain().spatial.iter().all(&accepts))
        {
            return Err(EvaluateError::cannot_evaluate_in(
                name,
                format!("pair {:?} has the wrong geometry flavor", pair.domain()),
            ));
        }
        Self::new(name, crs, range_type, rule, pairs)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Coverage for DiscreteCoverage {
    fn coordinate_reference_system(&self) -> &CrsId {
        &self.crs
    }

    fn envelope(&self) -> Envelope {
        self.envelope.clone()
    }

    fn range_type(&self) -> &RecordType {
        &self.range_type
    }

    fn common_point_rule(&self) -> CommonPointRule {
        self.rule.clone()
    }

    fn list(&self) -> Vec<GeometryValuePair> {
        self.pairs.clone()
    }

    fn evaluate(
        &self,
        p: &DirectPosition,
        attributes: Option<&[&str]>,
    ) -> EvaluateResult<Vec<Record>> {
        let candidates: Vec<Record> = self
            .pairs
            .iter()
            .filter(|pair| pair.domain().contains(p))
            .map(|pair| pair.value().clone())
            .collect();
        if candidates.is_empty() {
            return Err(EvaluateError::outside(p.clone()));
        }
        let combined = apply_common_point_rule(&self.rule, candidates).map_err(|e| match e {
            EvaluateError::CannotEvaluate { reason, .. } => {
                EvaluateError::cannot_evaluate_in(self.name.as_str(), reason)
            }
            other => other,
        })?;
        select_attributes(&self.range_type, combined, attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_common::{Value, ValueType};

    fn range() -> RecordType {
        RecordType::new("range").with_field("v", ValueType::Real)
    }

    fn coverage(rule: CommonPointRule, pairs: Vec<GeometryValuePair>) -> DiscreteCoverage {
        DiscreteCoverage::new("test", CrsId::wgs84(), range(), rule, pairs).unwrap()
    }

    #[test]
    fn test_construction_rejects_non_conforming_record() {
        let bad = GeometryValuePair::point(0.0, 0.0, Record::new().with_field("other", Value::Real(1.0)));
        let err = DiscreteCoverage::new("test", CrsId::wgs84(), range(), CommonPointRule::all(), vec![bad]);
        assert!(err.is_err());
    }

    #[test]
    fn test_construction_rejects_empty_and_mixed() {
        assert!(DiscreteCoverage::new(
            "test",
            CrsId::wgs84(),
            range(),
            CommonPointRule::all(),
            vec![]
        )
        .is_err());

        let point = GeometryValuePair::point(0.0, 0.0, Record::single("v", 1.0));
        let curve = GeometryValuePair::curve(
            vec![DirectPosition::new_2d(0.0, 0.0), DirectPosition::new_2d(1.0, 0.0)],
            Record::single("v", 2.0),
        );
        assert!(DiscreteCoverage::new(
            "test",
            CrsId::wgs84(),
            range(),
            CommonPointRule::all(),
            vec![point, curve]
        )
        .is_err());
    }

    #[test]
    fn test_evaluate_outside_domain() {
        let cov = coverage(
            CommonPointRule::all(),
            vec![GeometryValuePair::point(0.0, 0.0, Record::single("v", 1.0))],
        );
        let err = cov.evaluate(&DirectPosition::new_2d(5.0, 5.0), None).unwrap_err();
        assert!(matches!(err, EvaluateError::PointOutsideCoverage { .. }));
    }

    #[test]
    fn test_overlapping_pairs_follow_rule() {
        // Two coincident points: an overlap by construction.
        let pairs = vec![
            GeometryValuePair::point(1.0, 1.0, Record::single("v", 10.0)),
            GeometryValuePair::point(1.0, 1.0, Record::single("v", 30.0)),
        ];
        let p = DirectPosition::new_2d(1.0, 1.0);

        let averaged = coverage(CommonPointRule::average(), pairs.clone());
        assert_eq!(
            averaged.evaluate(&p, None).unwrap(),
            vec![Record::single("v", 20.0)]
        );

        let all = coverage(CommonPointRule::all(), pairs);
        assert_eq!(all.evaluate(&p, None).unwrap().len(), 2);
    }

    #[test]
    fn test_rule_application_is_deterministic() {
        let pairs = vec![
            GeometryValuePair::point(1.0, 1.0, Record::single("v", 10.0)),
            GeometryValuePair::point(1.0, 1.0, Record::single("v", 30.0)),
        ];
        let cov = coverage(CommonPointRule::average(), pairs);
        let p = DirectPosition::new_2d(1.0, 1.0);
        let first = cov.evaluate(&p, None).unwrap();
        for _ in 0..10 {
            assert_eq!(cov.evaluate(&p, None).unwrap(), first);
        }
    }

    #[test]
    fn test_attribute_selection() {
        let range = RecordType::new("range")
            .with_field("t", ValueType::Real)
            .with_field("rh", ValueType::Real);
        let record = Record::new()
            .with_field("t", Value::Real(21.0))
            .with_field("rh", Value::Real(0.4));
        let cov = DiscreteCoverage::new(
            "test",
            CrsId::wgs84(),
            range,
            CommonPointRule::all(),
            vec![GeometryValuePair::point(0.0, 0.0, record)],
        )
        .unwrap();

        let p = DirectPosition::new_2d(0.0, 0.0);
        let only_t = cov.evaluate(&p, Some(&["t"])).unwrap();
        assert_eq!(only_t, vec![Record::new().with_field("t", Value::Real(21.0))]);
        assert!(cov.evaluate(&p, Some(&["dewpoint"])).is_err());
    }

    #[test]
    fn test_find_ordering_and_limit() {
        let cov = coverage(
            CommonPointRule::all(),
            vec![
                GeometryValuePair::point(0.0, 0.0, Record::single("v", 1.0)),
                GeometryValuePair::point(5.0, 0.0, Record::single("v", 2.0)),
                GeometryValuePair::point(1.0, 0.0, Record::single("v", 3.0)),
            ],
        );
        let found = cov.find(&DirectPosition::new_2d(0.0, 0.0), 2);
        assert_eq!(found.len(), 2);
        let values: Vec<f64> = found
            .iter()
            .map(|p| p.value().get("v").unwrap().as_f64().unwrap())
            .collect();
        assert_eq!(values, vec![1.0, 3.0]);

        // Distances are non-decreasing for any limit.
        let all = cov.find(&DirectPosition::new_2d(0.3, 0.7), 10);
        let query = DirectPosition::new_2d(0.3, 0.7);
        let distances: Vec<f64> = all.iter().map(|p| p.domain().distance_to(&query)).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_find_tie_at_limit_truncates_deterministically() {
        // Three pairs equidistant from the query, limit below the tie
        // count: the result still has exactly `limit` entries and repeat
        // calls return the same pairs in the same order.
        let cov = coverage(
            CommonPointRule::all(),
            vec![
                GeometryValuePair::point(1.0, 0.0, Record::single("v", 1.0)),
                GeometryValuePair::point(0.0, 1.0, Record::single("v", 2.0)),
                GeometryValuePair::point(-1.0, 0.0, Record::single("v", 3.0)),
            ],
        );
        let p = DirectPosition::new_2d(0.0, 0.0);
        let first = cov.find(&p, 2);
        assert_eq!(first.len(), 2);
        let names = |found: &[GeometryValuePair]| -> Vec<f64> {
            found
                .iter()
                .map(|pair| pair.value().get("v").unwrap().as_f64().unwrap())
                .collect()
        };
        for _ in 0..20 {
            assert_eq!(names(&cov.find(&p, 2)), names(&first));
        }
    }

    #[test]
    fn test_envelope_covers_all_pairs() {
        let cov = coverage(
            CommonPointRule::all(),
            vec![
                GeometryValuePair::point(-3.0, 2.0, Record::single("v", 1.0)),
                GeometryValuePair::point(4.0, -1.0, Record::single("v", 2.0)),
            ],
        );
        assert_eq!(cov.envelope(), Envelope::new_2d(-3.0, -1.0, 4.0, 2.0));
    }
}
