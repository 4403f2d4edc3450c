//! IndexedSpace trait compliance test helpers.
//!
//! These functions verify that an `IndexedSpace` implementation satisfies
//! the invariants required by the trait contract. Reused across backend
//! test modules (SphereSpace, GridSpace).

use crate::space::IndexedSpace;
use indexmap::IndexSet;

/// Assert that `distance(a, a) == 0.0` for all indices.
pub fn assert_distance_reflexive(space: &dyn IndexedSpace) {
    for i in 0..space.len() {
        let d = space.distance(i, i).expect("in-range index");
        assert!(d.abs() < f64::EPSILON, "distance({i}, {i}) = {d}, expected 0.0");
    }
}

/// Assert that `distance(a, b) == distance(b, a)` for all index pairs.
pub fn assert_distance_symmetric(space: &dyn IndexedSpace) {
    for a in 0..space.len() {
        for b in 0..space.len() {
            let dab = space.distance(a, b).expect("in-range index");
            let dba = space.distance(b, a).expect("in-range index");
            assert!(
                (dab - dba).abs() < f64::EPSILON,
                "distance({a}, {b}) = {dab} != distance({b}, {a}) = {dba}"
            );
        }
    }
}

/// Assert triangle inequality: `d(a, c) <= d(a, b) + d(b, c)` for all triples.
pub fn assert_distance_triangle_inequality(space: &dyn IndexedSpace) {
    let n = space.len();
    for a in 0..n {
        for b in 0..n {
            for c in 0..n {
                let dac = space.distance(a, c).expect("in-range index");
                let dab = space.distance(a, b).expect("in-range index");
                let dbc = space.distance(b, c).expect("in-range index");
                assert!(
                    dac <= dab + dbc + 1e-9,
                    "triangle inequality violated: d({a},{c})={dac} > d({a},{b})={dab} + d({b},{c})={dbc}"
                );
            }
        }
    }
}

/// Assert that every point quantizes back to its own index.
pub fn assert_nearest_round_trip(space: &dyn IndexedSpace) {
    for i in 0..space.len() {
        let p = space.point(i).expect("in-range index");
        assert_eq!(space.nearest_index(p), i, "nearest_index(point({i})) != {i}");
    }
}

/// Assert that the reverse lookup inverts `point`.
pub fn assert_index_of_round_trip(space: &dyn IndexedSpace) {
    for i in 0..space.len() {
        let p = space.point(i).expect("in-range index");
        assert_eq!(space.index_of(p), Some(i), "index_of(point({i})) != {i}");
    }
}

/// Assert that `points()` has exactly `len()` distinct entries.
pub fn assert_points_complete(space: &dyn IndexedSpace) {
    let points = space.points();
    assert_eq!(points.len(), space.len());
    assert!(!space.is_empty());
    let unique: IndexSet<_> = points.iter().map(|p| p.to_array().map(f64::to_bits)).collect();
    assert_eq!(unique.len(), space.len(), "points() has duplicates");
}

/// Assert that indices at or past `len()` are rejected.
pub fn assert_out_of_range_rejected(space: &dyn IndexedSpace) {
    let n = space.len();
    assert!(space.point(n).is_none());
    assert!(space.distance(0, n).is_err());
    assert!(space.distance(n, 0).is_err());
    assert!(space.check_index(n).is_err());
    assert!(space.check_index(n - 1).is_ok());
}

/// Run all 7 compliance checks on a space.
pub fn run_full_compliance(space: &dyn IndexedSpace) {
    assert_distance_reflexive(space);
    assert_distance_symmetric(space);
    assert_distance_triangle_inequality(space);
    assert_nearest_round_trip(space);
    assert_index_of_round_trip(space);
    assert_points_complete(space);
    assert_out_of_range_rejected(space);
}
