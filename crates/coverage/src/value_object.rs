//! Value objects: interpolation bases for continuous coverages.
//!
//! A value object couples a geometry with the control geometry-value pairs
//! that support interpolation within it. The concrete shapes here are the
//! three ISO 19123 bases actually used by the continuous coverages in this
//! crate: curves, triangles, and Thiessen polygons.

use std::sync::Arc;

use geo_common::{geometry::CONTAINS_TOLERANCE, DirectPosition, Geometry, Record, Value};

use crate::domain::DomainObject;
use crate::error::{EvaluateError, EvaluateResult};
use crate::pair::GeometryValuePair;

/// Tolerance used to detect ties and degenerate configurations.
const AMBIGUITY_TOLERANCE: f64 = 1e-9;

/// An interpolation basis built from control geometry-value pairs.
pub trait ValueObject {
    /// The geometry this object covers.
    fn geometry(&self) -> &DomainObject;

    /// The control pairs supporting interpolation.
    fn controls(&self) -> &[GeometryValuePair];

    /// Check if the position lies within this object's extent.
    fn contains(&self, p: &DirectPosition) -> bool;

    /// Derive the record at the given position from the control values.
    fn interpolate(&self, p: &DirectPosition) -> EvaluateResult<Record>;
}

/// Position of a point control pair.
fn control_position(pair: &GeometryValuePair) -> EvaluateResult<&DirectPosition> {
    match pair.domain().spatial.first() {
        Some(Geometry::Point(p)) => Ok(p),
        _ => Err(EvaluateError::cannot_evaluate(
            "control pair is not a point-value pair",
        )),
    }
}

/// Linear blend of two records. Numeric fields are interpolated; other
/// fields take the value of the nearer control.
fn blend(a: &Record, b: &Record, t: f64) -> Record {
    let mut result = Record::new();
    for (name, value) in a.fields() {
        let blended = match (value.as_f64(), b.get(name).and_then(Value::as_f64)) {
            (Some(va), Some(vb)) => Value::Real(va * (1.0 - t) + vb * t),
            _ => {
                if t < 0.5 {
                    value.clone()
                } else {
                    b.get(name).cloned().unwrap_or_else(|| value.clone())
                }
            }
        };
        result = result.with_field(name, blended);
    }
    result
}

/// A curve with point controls at its vertices; values vary linearly along
/// each segment.
#[derive(Debug, Clone)]
pub struct ValueCurve {
    domain: Arc<DomainObject>,
    controls: Vec<GeometryValuePair>,
}

impl ValueCurve {
    /// Build a value curve from ordered point-value pairs. At least two
    /// controls are required.
    pub fn new(controls: Vec<GeometryValuePair>) -> EvaluateResult<Self> {
        if controls.len() < 2 {
            return Err(EvaluateError::cannot_evaluate(
                "a value curve needs at least two control points",
            ));
        }
        let vertices: Vec<DirectPosition> = controls
            .iter()
            .map(|c| control_position(c).cloned())
            .collect::<EvaluateResult<_>>()?;
        Ok(Self {
            domain: Arc::new(DomainObject::from_geometry(Geometry::Curve(vertices))),
            controls,
        })
    }

    /// Locate the curve segment nearest to `p`, returning the segment index
    /// and the interpolation parameter along it.
    ///
    /// A position equidistant from two segments that do not share a control
    /// (a self-intersecting or folded curve) is ambiguous and is reported
    /// as an error rather than resolved arbitrarily.
    pub fn segment(&self, p: &DirectPosition) -> EvaluateResult<(usize, f64)> {
        let positions: Vec<&DirectPosition> = self
            .controls
            .iter()
            .map(control_position)
            .collect::<EvaluateResult<_>>()?;

        let mut best: Option<(usize, f64)> = None;
        let mut candidates: Vec<usize> = Vec::new();
        for i in 0..positions.len() - 1 {
            let d = Geometry::Curve(vec![positions[i].clone(), positions[i + 1].clone()])
                .distance_to(p);
            match best {
                Some((_, best_d)) if d > best_d + AMBIGUITY_TOLERANCE => {}
                Some((_, best_d)) if (d - best_d).abs() <= AMBIGUITY_TOLERANCE => {
                    candidates.push(i);
                }
                _ => {
                    best = Some((i, d));
                    candidates.clear();
                    candidates.push(i);
                }
            }
        }
        let (index, _) = best.ok_or_else(|| {
            EvaluateError::cannot_evaluate("value curve has no segments")
        })?;
        if candidates.iter().any(|&c| c.abs_diff(index) > 1) {
            return Err(EvaluateError::cannot_evaluate(
                "position is equidistant from non-adjacent curve segments",
            ));
        }

        let a = positions[index];
        let b = positions[index + 1];
        let len_sq = a
            .coordinates
            .iter()
            .zip(&b.coordinates)
            .map(|(x, y)| (y - x) * (y - x))
            .sum::<f64>();
        let t = if len_sq == 0.0 {
            0.0
        } else {
            let dot = a
                .coordinates
                .iter()
                .zip(&b.coordinates)
                .zip(&p.coordinates)
                .map(|((ax, bx), px)| (px - ax) * (bx - ax))
                .sum::<f64>();
            (dot / len_sq).clamp(0.0, 1.0)
        };
        Ok((index, t))
    }
}

impl ValueObject for ValueCurve {
    fn geometry(&self) -> &DomainObject {
        &self.domain
    }

    fn controls(&self) -> &[GeometryValuePair] {
        &self.controls
    }

    fn contains(&self, p: &DirectPosition) -> bool {
        self.domain.distance_to(p) <= CONTAINS_TOLERANCE
    }

    fn interpolate(&self, p: &DirectPosition) -> EvaluateResult<Record> {
        let (index, t) = self.segment(p)?;
        Ok(blend(
            self.controls[index].value(),
            self.controls[index + 1].value(),
            t,
        ))
    }
}

/// A triangle with point controls at its corners; values are interpolated
/// barycentrically.
#[derive(Debug, Clone)]
pub struct ValueTriangle {
    domain: Arc<DomainObject>,
    controls: Vec<GeometryValuePair>,
}

impl ValueTriangle {
    pub fn new(controls: [GeometryValuePair; 3]) -> EvaluateResult<Self> {
        let ring: Vec<DirectPosition> = controls
            .iter()
            .map(|c| control_position(c).cloned())
            .collect::<EvaluateResult<_>>()?;
        Ok(Self {
            domain: Arc::new(DomainObject::from_geometry(Geometry::Surface(ring))),
            controls: controls.to_vec(),
        })
    }

    /// Barycentric coordinates of `p` with respect to the three corners.
    /// A degenerate (zero-area) triangle cannot support interpolation.
    pub fn barycentric(&self, p: &DirectPosition) -> EvaluateResult<[f64; 3]> {
        let a = control_position(&self.controls[0])?;
        let b = control_position(&self.controls[1])?;
        let c = control_position(&self.controls[2])?;
        let (x1, y1) = (a.coordinates[0], a.coordinates[1]);
        let (x2, y2) = (b.coordinates[0], b.coordinates[1]);
        let (x3, y3) = (c.coordinates[0], c.coordinates[1]);
        let (px, py) = (p.coordinates[0], p.coordinates[1]);

        let det = (y2 - y3) * (x1 - x3) + (x3 - x2) * (y1 - y3);
        if det.abs() < AMBIGUITY_TOLERANCE {
            return Err(EvaluateError::cannot_evaluate(
                "degenerate triangle: interpolation is singular",
            ));
        }
        let w1 = ((y2 - y3) * (px - x3) + (x3 - x2) * (py - y3)) / det;
        let w2 = ((y3 - y1) * (px - x3) + (x1 - x3) * (py - y3)) / det;
        Ok([w1, w2, 1.0 - w1 - w2])
    }
}

impl ValueObject for ValueTriangle {
    fn geometry(&self) -> &DomainObject {
        &self.domain
    }

    fn controls(&self) -> &[GeometryValuePair] {
        &self.controls
    }

    fn contains(&self, p: &DirectPosition) -> bool {
        self.barycentric(p)
            .map(|w| w.iter().all(|v| *v >= -AMBIGUITY_TOLERANCE))
            .unwrap_or(false)
    }

    fn interpolate(&self, p: &DirectPosition) -> EvaluateResult<Record> {
        let weights = self.barycentric(p)?;
        let mut result = Record::new();
        for (name, value) in self.controls[0].value().fields() {
            let numeric: Option<Vec<f64>> = self
                .controls
                .iter()
                .map(|c| c.value().get(name).and_then(Value::as_f64))
                .collect();
            let interpolated = match numeric {
                Some(values) => Value::Real(
                    values
                        .iter()
                        .zip(&weights)
                        .map(|(v, w)| v * w)
                        .sum::<f64>(),
                ),
                None => {
                    // Non-numeric fields only make sense exactly at a corner.
                    let corner = weights
                        .iter()
                        .position(|w| (*w - 1.0).abs() <= AMBIGUITY_TOLERANCE);
                    match corner {
                        Some(i) => self.controls[i]
                            .value()
                            .get(name)
                            .cloned()
                            .unwrap_or_else(|| value.clone()),
                        None => {
                            return Err(EvaluateError::cannot_evaluate(format!(
                                "field '{name}' is not numeric and cannot be interpolated"
                            )))
                        }
                    }
                }
            };
            result = result.with_field(name, interpolated);
        }
        Ok(result)
    }
}

/// The Thiessen (Voronoi) polygon of one generating control point.
///
/// The polygon's region is defined implicitly by the full generator set:
/// a position belongs to the polygon when its generator is at least as
/// close as every other generator. Every position in the polygon takes the
/// generator's value.
#[derive(Debug, Clone)]
pub struct ThiessenValuePolygon {
    control: GeometryValuePair,
    controls: Vec<GeometryValuePair>,
    generators: Arc<Vec<GeometryValuePair>>,
}

impl ThiessenValuePolygon {
    pub fn new(
        control: GeometryValuePair,
        generators: Arc<Vec<GeometryValuePair>>,
    ) -> Self {
        Self {
            controls: vec![control.clone()],
            control,
            generators,
        }
    }

    pub fn generator(&self) -> &GeometryValuePair {
        &self.control
    }
}

impl ValueObject for ThiessenValuePolygon {
    fn geometry(&self) -> &DomainObject {
        self.control.domain()
    }

    fn controls(&self) -> &[GeometryValuePair] {
        &self.controls
    }

    fn contains(&self, p: &DirectPosition) -> bool {
        let own = self.control.domain().distance_to(p);
        self.generators
            .iter()
            .all(|g| own <= g.domain().distance_to(p) + AMBIGUITY_TOLERANCE)
    }

    fn interpolate(&self, _p: &DirectPosition) -> EvaluateResult<Record> {
        Ok(self.control.value().clone())
    }
}
