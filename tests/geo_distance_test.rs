// ABOUTME: Tests for great-circle distance
// ABOUTME: Validates identity, symmetry, known separations, and numerical stability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use packwalk::engine::geo::{distance_km, path_distance_km};
use packwalk_core::models::Coordinate;

#[test]
fn test_distance_to_self_is_zero() {
    for (lat, lon) in [(0.0, 0.0), (37.5665, 126.978), (-45.0, 170.0), (89.9, -179.9)] {
        let point = Coordinate::new(lat, lon);
        assert!(distance_km(point, point).abs() < f64::EPSILON);
    }
}

#[test]
fn test_distance_is_symmetric() {
    let pairs = [
        (Coordinate::new(37.0, 127.0), Coordinate::new(37.01, 127.02)),
        (Coordinate::new(0.0, 0.0), Coordinate::new(0.5, -0.5)),
        (Coordinate::new(-33.86, 151.2), Coordinate::new(51.5, -0.12)),
    ];
    for (a, b) in pairs {
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-12);
    }
}

#[test]
fn test_distance_is_never_negative() {
    let a = Coordinate::new(10.0, 10.0);
    let b = Coordinate::new(10.0, 10.0 + 1e-12);
    assert!(distance_km(a, b) >= 0.0);
}

#[test]
fn test_one_millidegree_of_latitude() {
    // ~111 meters anywhere on the sphere.
    let a = Coordinate::new(37.0, 127.0);
    let b = Coordinate::new(37.001, 127.0);
    let d = distance_km(a, b);
    assert!((d - 0.111).abs() < 0.001, "got {d}");
}

#[test]
fn test_seoul_to_busan_scale() {
    // ~325 km great-circle; sanity check at city scale.
    let seoul = Coordinate::new(37.5665, 126.978);
    let busan = Coordinate::new(35.1796, 129.0756);
    let d = distance_km(seoul, busan);
    assert!((300.0..350.0).contains(&d), "got {d}");
}

#[test]
fn test_near_identical_points_are_stable_not_nan() {
    let a = Coordinate::new(37.0, 127.0);
    for delta in [1e-9, 1e-11, 1e-13, 1e-15] {
        let b = Coordinate::new(37.0 + delta, 127.0);
        let d = distance_km(a, b);
        assert!(d.is_finite(), "delta {delta} produced {d}");
        assert!(d >= 0.0);
    }
}

#[test]
fn test_path_distance_accumulates() {
    let path = [
        Coordinate::new(37.0, 127.0),
        Coordinate::new(37.001, 127.0),
        Coordinate::new(37.001, 127.001),
        Coordinate::new(37.002, 127.001),
    ];
    let expected: f64 = path.windows(2).map(|w| distance_km(w[0], w[1])).sum();
    assert!((path_distance_km(&path) - expected).abs() < 1e-12);
}

#[test]
fn test_path_distance_trivial_paths() {
    assert!(path_distance_km(&[]).abs() < f64::EPSILON);
    assert!(path_distance_km(&[Coordinate::new(1.0, 1.0)]).abs() < f64::EPSILON);
}
