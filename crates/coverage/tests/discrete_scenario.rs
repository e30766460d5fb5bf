//! End-to-end scenario over a small discrete point coverage.

use coverage::{CommonPointRule, Coverage, DiscreteCoverage, GeometryValuePair};
use geo_common::{CrsId, DirectPosition, Record, RecordType, ValueType};

fn sample_coverage() -> DiscreteCoverage {
    let range = RecordType::new("range").with_field("v", ValueType::Real);
    DiscreteCoverage::new(
        "sample",
        CrsId::wgs84(),
        range,
        CommonPointRule::average(),
        vec![
            GeometryValuePair::point(0.0, 0.0, Record::single("v", 10.0)),
            GeometryValuePair::point(1.0, 0.0, Record::single("v", 20.0)),
            GeometryValuePair::point(0.0, 1.0, Record::single("v", 30.0)),
        ],
    )
    .unwrap()
}

#[test]
fn evaluate_at_stored_position_returns_stored_record() {
    let cov = sample_coverage();
    let records = cov
        .evaluate(&DirectPosition::new_2d(0.0, 0.0), None)
        .unwrap();
    assert_eq!(records, vec![Record::single("v", 10.0)]);
}

#[test]
fn find_returns_nearest_pair_first() {
    let cov = sample_coverage();
    let found = cov.find(&DirectPosition::new_2d(0.1, 0.1), 1);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].value(), &Record::single("v", 10.0));

    let nearest = cov.find_nearest(&DirectPosition::new_2d(0.1, 0.1)).unwrap();
    assert_eq!(nearest.value(), &Record::single("v", 10.0));
}

#[test]
fn evaluate_inverse_returns_matching_domain_object() {
    let cov = sample_coverage();
    let domains = cov.evaluate_inverse(&Record::single("v", 20.0));
    assert_eq!(domains.len(), 1);
    assert!(domains[0].contains(&DirectPosition::new_2d(1.0, 0.0)));

    assert!(cov.evaluate_inverse(&Record::single("v", 99.0)).is_empty());
}

#[test]
fn evaluate_and_inverse_are_consistent_over_the_whole_list() {
    let cov = sample_coverage();
    for pair in cov.list() {
        let position = match &pair.domain().spatial[0] {
            geo_common::Geometry::Point(p) => p.clone(),
            other => panic!("expected point domain, got {other:?}"),
        };
        // evaluate at the pair's own position returns the pair's record.
        let records = cov.evaluate(&position, None).unwrap();
        assert_eq!(records, vec![pair.value().clone()]);

        // the inverse maps the record back to the pair's domain object.
        let domains = cov.evaluate_inverse(pair.value());
        assert!(domains.iter().any(|d| d.contains(&position)));
    }
}

#[test]
fn select_filters_by_spatial_component() {
    let cov = sample_coverage();
    let near_origin = geo_common::Geometry::Surface(vec![
        DirectPosition::new_2d(-0.5, -0.5),
        DirectPosition::new_2d(0.5, -0.5),
        DirectPosition::new_2d(0.5, 0.5),
        DirectPosition::new_2d(-0.5, 0.5),
    ]);
    let selected = cov.select(Some(&near_origin), None);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].value(), &Record::single("v", 10.0));

    // Unconstrained selection returns everything.
    assert_eq!(cov.select(None, None).len(), 3);
}
