//! Continuous coverages: evaluation by locate-then-interpolate.
//!
//! A continuous coverage returns a distinct record for any position in its
//! domain. Evaluation is two-step: locate the value objects enclosing the
//! position, then interpolate within each using its control values. When a
//! position falls on a shared boundary the candidates are interpolated
//! independently and combined with the coverage's common point rule.

use std::sync::Arc;

use geo_common::{CrsId, DirectPosition, Envelope, Record, RecordType};

use crate::codes::{CommonPointRule, InterpolationMethod};
use crate::coverage::{apply_common_point_rule, select_attributes, Coverage};
use crate::error::{EvaluateError, EvaluateResult};
use crate::pair::GeometryValuePair;
use crate::value_object::{ThiessenValuePolygon, ValueCurve, ValueObject, ValueTriangle};

/// Tolerance for distance ties between candidate value objects.
const TIE_TOLERANCE: f64 = 1e-9;

/// A coverage evaluated by interpolation within value objects.
pub trait ContinuousCoverage: Coverage {
    /// The value objects used to evaluate the coverage.
    fn elements(&self) -> Vec<&dyn ValueObject>;

    /// The interpolation method used within each value object.
    fn interpolation_method(&self) -> InterpolationMethod;

    /// Types of any additional interpolation parameters. Most methods need
    /// none.
    fn interpolation_parameter_types(&self) -> Option<&RecordType> {
        None
    }

    /// The value objects whose extent contains the given position.
    fn locate(&self, p: &DirectPosition) -> Vec<&dyn ValueObject> {
        self.elements()
            .into_iter()
            .filter(|v| v.contains(p))
            .collect()
    }
}

/// Interpolate every candidate object at `p` and combine the results with
/// the common point rule, restricted to the requested attributes.
fn interpolate_candidates(
    name: &str,
    rule: &CommonPointRule,
    range_type: &RecordType,
    candidates: &[&dyn ValueObject],
    p: &DirectPosition,
    attributes: Option<&[&str]>,
) -> EvaluateResult<Vec<Record>> {
    if candidates.is_empty() {
        return Err(EvaluateError::outside(p.clone()));
    }
    let records: Vec<Record> = candidates
        .iter()
        .map(|v| v.interpolate(p))
        .collect::<EvaluateResult<_>>()
        .map_err(|e| annotate(name, e))?;
    let combined = apply_common_point_rule(rule, records).map_err(|e| annotate(name, e))?;
    select_attributes(range_type, combined, attributes)
}

fn annotate(name: &str, error: EvaluateError) -> EvaluateError {
    match error {
        EvaluateError::CannotEvaluate {
            reason,
            coverage: None,
        } => EvaluateError::cannot_evaluate_in(name, reason),
        other => other,
    }
}

/// Unique control pairs across a set of value objects, deduplicated by
/// domain-object identity.
fn collect_controls<'a>(objects: impl Iterator<Item = &'a dyn ValueObject>) -> Vec<GeometryValuePair> {
    let mut pairs: Vec<GeometryValuePair> = Vec::new();
    for object in objects {
        for control in object.controls() {
            if !pairs
                .iter()
                .any(|p| Arc::ptr_eq(p.domain(), control.domain()))
            {
                pairs.push(control.clone());
            }
        }
    }
    pairs
}

fn union_envelope<'a>(
    name: &str,
    objects: impl Iterator<Item = &'a dyn ValueObject>,
) -> EvaluateResult<Envelope> {
    objects
        .filter_map(|o| o.geometry().envelope())
        .reduce(|a, b| a.union(&b))
        .ok_or_else(|| EvaluateError::cannot_evaluate_in(name, "coverage has no spatial domain"))
}

/// A triangulated irregular network: values are interpolated
/// barycentrically within each triangle.
#[derive(Debug, Clone)]
pub struct TinCoverage {
    name: String,
    crs: CrsId,
    range_type: RecordType,
    rule: CommonPointRule,
    triangles: Vec<ValueTriangle>,
    envelope: Envelope,
}

impl TinCoverage {
    pub fn new(
        name: impl Into<String>,
        crs: CrsId,
        range_type: RecordType,
        rule: CommonPointRule,
        triangles: Vec<ValueTriangle>,
    ) -> EvaluateResult<Self> {
        let name = name.into();
        if triangles.is_empty() {
            return Err(EvaluateError::cannot_evaluate_in(
                name,
                "a TIN coverage needs at least one triangle",
            ));
        }
        for triangle in &triangles {
            for control in triangle.controls() {
                if !range_type.conforms(control.value()) {
                    return Err(EvaluateError::cannot_evaluate_in(
                        name,
                        format!(
                            "control record does not conform to range type '{}'",
                            range_type.name()
                        ),
                    ));
                }
            }
        }
        let envelope = union_envelope(
            name.as_str(),
            triangles.iter().map(|t| t as &dyn ValueObject),
        )?;
        Ok(Self {
            name,
            crs,
            range_type,
            rule,
            triangles,
            envelope,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Coverage for TinCoverage {
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
        collect_controls(self.triangles.iter().map(|t| t as &dyn ValueObject))
    }

    fn evaluate(
        &self,
        p: &DirectPosition,
        attributes: Option<&[&str]>,
    ) -> EvaluateResult<Vec<Record>> {
        let candidates = self.locate(p);
        interpolate_candidates(&self.name, &self.rule, &self.range_type, &candidates, p, attributes)
    }
}

impl ContinuousCoverage for TinCoverage {
    fn elements(&self) -> Vec<&dyn ValueObject> {
        self.triangles.iter().map(|t| t as &dyn ValueObject).collect()
    }

    fn interpolation_method(&self) -> InterpolationMethod {
        InterpolationMethod::barycentric()
    }
}

/// A coverage partitioning a window into Thiessen polygons around point
/// generators; each position takes the value of its nearest generator.
#[derive(Debug, Clone)]
pub struct ThiessenPolygonCoverage {
    name: String,
    crs: CrsId,
    range_type: RecordType,
    rule: CommonPointRule,
    polygons: Vec<ThiessenValuePolygon>,
    window: Envelope,
}

impl ThiessenPolygonCoverage {
    /// Build the coverage from point generators clipped to a window.
    pub fn new(
        name: impl Into<String>,
        crs: CrsId,
        range_type: RecordType,
        rule: CommonPointRule,
        generators: Vec<GeometryValuePair>,
        window: Envelope,
    ) -> EvaluateResult<Self> {
        let name = name.into();
        if generators.is_empty() {
            return Err(EvaluateError::cannot_evaluate_in(
                name,
                "a Thiessen polygon coverage needs at least one generator",
            ));
        }
        for generator in &generators {
            if !range_type.conforms(generator.value()) {
                return Err(EvaluateError::cannot_evaluate_in(
                    name,
                    format!(
                        "generator record does not conform to range type '{}'",
                        range_type.name()
                    ),
                ));
            }
        }
        let shared = Arc::new(generators);
        let polygons = shared
            .iter()
            .map(|g| ThiessenValuePolygon::new(g.clone(), shared.clone()))
            .collect();
        Ok(Self {
            name,
            crs,
            range_type,
            rule,
            polygons,
            window,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Coverage for ThiessenPolygonCoverage {
    fn coordinate_reference_system(&self) -> &CrsId {
        &self.crs
    }

    fn envelope(&self) -> Envelope {
        self.window.clone()
    }

    fn range_type(&self) -> &RecordType {
        &self.range_type
    }

    fn common_point_rule(&self) -> CommonPointRule {
        self.rule.clone()
    }

    fn list(&self) -> Vec<GeometryValuePair> {
        self.polygons.iter().map(|p| p.generator().clone()).collect()
    }

    fn evaluate(
        &self,
        p: &DirectPosition,
        attributes: Option<&[&str]>,
    ) -> EvaluateResult<Vec<Record>> {
        if !self.window.contains(p) {
            return Err(EvaluateError::outside(p.clone()));
        }
        let candidates = self.locate(p);
        interpolate_candidates(&self.name, &self.rule, &self.range_type, &candidates, p, attributes)
    }
}

impl ContinuousCoverage for ThiessenPolygonCoverage {
    fn elements(&self) -> Vec<&dyn ValueObject> {
        self.polygons.iter().map(|p| p as &dyn ValueObject).collect()
    }

    fn interpolation_method(&self) -> InterpolationMethod {
        InterpolationMethod::nearest_neighbour()
    }
}

/// A coverage over a network of value curves; values vary linearly along
/// each curve segment.
#[derive(Debug, Clone)]
pub struct SegmentedCurveCoverage {
    name: String,
    crs: CrsId,
    range_type: RecordType,
    rule: CommonPointRule,
    curves: Vec<ValueCurve>,
    /// Positions farther than this from every curve are outside the domain.
    max_distance: f64,
    envelope: Envelope,
}

impl SegmentedCurveCoverage {
    pub fn new(
        name: impl Into<String>,
        crs: CrsId,
        range_type: RecordType,
        rule: CommonPointRule,
        curves: Vec<ValueCurve>,
        max_distance: f64,
    ) -> EvaluateResult<Self> {
        let name = name.into();
        if curves.is_empty() {
            return Err(EvaluateError::cannot_evaluate_in(
                name,
                "a segmented curve coverage needs at least one curve",
            ));
        }
        for curve in &curves {
            for control in curve.controls() {
                if !range_type.conforms(control.value()) {
                    return Err(EvaluateError::cannot_evaluate_in(
                        name,
                        format!(
                            "control record does not conform to range type '{}'",
                            range_type.name()
                        ),
                    ));
                }
            }
        }
        let envelope =
            union_envelope(name.as_str(), curves.iter().map(|c| c as &dyn ValueObject))?;
        Ok(Self {
            name,
            crs,
            range_type,
            rule,
            curves,
            max_distance,
            envelope,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// The curve nearest to `p` within `max_distance`. Equidistant curves
    /// are ambiguous and reported as an error rather than picked from
    /// arbitrarily.
    pub fn curve(&self, p: &DirectPosition) -> EvaluateResult<&ValueCurve> {
        let nearest = self.nearest_curves(p)?;
        if nearest.len() > 1 {
            return Err(EvaluateError::cannot_evaluate_in(
                self.name.as_str(),
                "position is equidistant from multiple curves",
            ));
        }
        Ok(nearest[0])
    }

    /// All curves tied for nearest within `max_distance`.
    fn nearest_curves(&self, p: &DirectPosition) -> EvaluateResult<Vec<&ValueCurve>> {
        let mut best = f64::INFINITY;
        for curve in &self.curves {
            best = best.min(curve.geometry().distance_to(p));
        }
        if best > self.max_distance {
            return Err(EvaluateError::outside(p.clone()));
        }
        Ok(self
            .curves
            .iter()
            .filter(|c| c.geometry().distance_to(p) <= best + TIE_TOLERANCE)
            .collect())
    }
}

impl Coverage for SegmentedCurveCoverage {
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
        collect_controls(self.curves.iter().map(|c| c as &dyn ValueObject))
    }

    fn evaluate(
        &self,
        p: &DirectPosition,
        attributes: Option<&[&str]>,
    ) -> EvaluateResult<Vec<Record>> {
        let candidates: Vec<&dyn ValueObject> = self
            .nearest_curves(p)?
            .into_iter()
            .map(|c| c as &dyn ValueObject)
            .collect();
        interpolate_candidates(&self.name, &self.rule, &self.range_type, &candidates, p, attributes)
    }
}

impl ContinuousCoverage for SegmentedCurveCoverage {
    fn elements(&self) -> Vec<&dyn ValueObject> {
        self.curves.iter().map(|c| c as &dyn ValueObject).collect()
    }

    fn interpolation_method(&self) -> InterpolationMethod {
        InterpolationMethod::linear()
    }

    /// For a segmented curve network, containment means "within the
    /// evaluation distance", not exact incidence.
    fn locate(&self, p: &DirectPosition) -> Vec<&dyn ValueObject> {
        self.curves
            .iter()
            .filter(|c| c.geometry().distance_to(p) <= self.max_distance)
            .map(|c| c as &dyn ValueObject)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_common::{Value, ValueType};

    fn range() -> RecordType {
        RecordType::new("range").with_field("v", ValueType::Real)
    }

    fn pair(x: f64, y: f64, v: f64) -> GeometryValuePair {
        GeometryValuePair::point(x, y, Record::single("v", v))
    }

    fn value(records: &[Record]) -> f64 {
        records[0].get("v").unwrap().as_f64().unwrap()
    }

    fn two_triangle_tin(rule: CommonPointRule) -> TinCoverage {
        // Two triangles sharing the edge (0,0)-(1,1).
        let a = pair(0.0, 0.0, 0.0);
        let b = pair(1.0, 0.0, 10.0);
        let c = pair(1.0, 1.0, 20.0);
        let d = pair(0.0, 1.0, 30.0);
        let t1 = ValueTriangle::new([a.clone(), b, c.clone()]).unwrap();
        let t2 = ValueTriangle::new([a, c, d]).unwrap();
        TinCoverage::new("tin", CrsId::wgs84(), range(), rule, vec![t1, t2]).unwrap()
    }

    #[test]
    fn test_tin_interior_evaluation() {
        let tin = two_triangle_tin(CommonPointRule::average());
        // Strictly inside the lower triangle.
        let v = value(&tin.evaluate(&DirectPosition::new_2d(0.7, 0.2), None).unwrap());
        // w_a = 0.3, w_b = 0.5, w_c = 0.2 -> 0*0.3 + 10*0.5 + 20*0.2 = 9.0
        assert!((v - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_tin_shared_edge_combined_by_rule() {
        let tin = two_triangle_tin(CommonPointRule::average());
        let on_edge = DirectPosition::new_2d(0.5, 0.5);
        let candidates = tin.locate(&on_edge);
        assert_eq!(candidates.len(), 2);

        // Both triangles interpolate the same value on the shared edge, so
        // the average equals either.
        let v = value(&tin.evaluate(&on_edge, None).unwrap());
        assert!((v - 10.0).abs() < 1e-9);

        let all = two_triangle_tin(CommonPointRule::all());
        assert_eq!(all.evaluate(&on_edge, None).unwrap().len(), 2);
    }

    #[test]
    fn test_tin_outside_domain() {
        let tin = two_triangle_tin(CommonPointRule::average());
        let err = tin
            .evaluate(&DirectPosition::new_2d(5.0, 5.0), None)
            .unwrap_err();
        assert!(matches!(err, EvaluateError::PointOutsideCoverage { .. }));
    }

    #[test]
    fn test_tin_list_deduplicates_shared_controls() {
        let tin = two_triangle_tin(CommonPointRule::average());
        // Four distinct control points despite six triangle corners.
        assert_eq!(tin.list().len(), 4);
        assert_eq!(tin.domain_elements().len(), 4);
    }

    #[test]
    fn test_thiessen_nearest_generator() {
        let window = Envelope::new_2d(0.0, -5.0, 10.0, 5.0);
        let cov = ThiessenPolygonCoverage::new(
            "thiessen",
            CrsId::wgs84(),
            range(),
            CommonPointRule::average(),
            vec![pair(0.0, 0.0, 1.0), pair(10.0, 0.0, 5.0)],
            window,
        )
        .unwrap();

        let v = value(&cov.evaluate(&DirectPosition::new_2d(2.0, 0.0), None).unwrap());
        assert_eq!(v, 1.0);

        // Equidistant from both generators: combined by the rule.
        let mid = value(&cov.evaluate(&DirectPosition::new_2d(5.0, 0.0), None).unwrap());
        assert_eq!(mid, 3.0);

        // Outside the clip window.
        assert!(matches!(
            cov.evaluate(&DirectPosition::new_2d(20.0, 0.0), None),
            Err(EvaluateError::PointOutsideCoverage { .. })
        ));
    }

    #[test]
    fn test_thiessen_text_tie_cannot_average() {
        let range = RecordType::new("range").with_field("label", ValueType::Text);
        let label = |s: &str| Record::new().with_field("label", Value::Text(s.into()));
        let cov = ThiessenPolygonCoverage::new(
            "thiessen",
            CrsId::wgs84(),
            range,
            CommonPointRule::average(),
            vec![
                GeometryValuePair::point(0.0, 0.0, label("a")),
                GeometryValuePair::point(10.0, 0.0, label("b")),
            ],
            Envelope::new_2d(0.0, -5.0, 10.0, 5.0),
        )
        .unwrap();
        let err = cov
            .evaluate(&DirectPosition::new_2d(5.0, 0.0), None)
            .unwrap_err();
        assert!(matches!(err, EvaluateError::CannotEvaluate { .. }));
    }

    #[test]
    fn test_segmented_curve_evaluation() {
        let curve =
            ValueCurve::new(vec![pair(0.0, 0.0, 0.0), pair(10.0, 0.0, 100.0)]).unwrap();
        let cov = SegmentedCurveCoverage::new(
            "river",
            CrsId::wgs84(),
            range(),
            CommonPointRule::average(),
            vec![curve],
            1.0,
        )
        .unwrap();

        // Near the curve: projected onto it and interpolated.
        let v = value(&cov.evaluate(&DirectPosition::new_2d(2.5, 0.5), None).unwrap());
        assert!((v - 25.0).abs() < 1e-9);

        // Beyond max_distance.
        assert!(matches!(
            cov.evaluate(&DirectPosition::new_2d(5.0, 3.0), None),
            Err(EvaluateError::PointOutsideCoverage { .. })
        ));

        // The accessor refuses to pick between equidistant curves.
        let second =
            ValueCurve::new(vec![pair(0.0, 2.0, 0.0), pair(10.0, 2.0, 50.0)]).unwrap();
        let two = SegmentedCurveCoverage::new(
            "rivers",
            CrsId::wgs84(),
            range(),
            CommonPointRule::average(),
            vec![
                ValueCurve::new(vec![pair(0.0, 0.0, 0.0), pair(10.0, 0.0, 100.0)]).unwrap(),
                second,
            ],
            5.0,
        )
        .unwrap();
        assert!(two.curve(&DirectPosition::new_2d(5.0, 1.0)).is_err());
        // evaluate still succeeds: both candidates are interpolated and
        // averaged.
        let averaged = value(&two.evaluate(&DirectPosition::new_2d(5.0, 1.0), None).unwrap());
        assert!((averaged - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_interpolation_methods_declared() {
        let tin = two_triangle_tin(CommonPointRule::average());
        assert_eq!(
            tin.interpolation_method(),
            InterpolationMethod::barycentric()
        );
        assert!(tin.interpolation_parameter_types().is_none());
    }
}
