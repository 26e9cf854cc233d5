//! Behavioural tests for the proximity engine: metric properties of the
//! distance evaluator, soundness of the envelope, and agreement between the
//! count and enumerate query modes.

use freight_geo::{
    count_within, destination, distance_miles, enumerate, Candidate, CandidateSource, Envelope,
    Point, Radius, RadiusQuery,
};

fn p(lat: f64, lng: f64) -> Point {
    Point::new(lat, lng).unwrap()
}

/// A spread of points across both hemispheres, avoiding the exact poles.
fn sample_points() -> Vec<Point> {
    let mut points = Vec::new();
    for lat in (-80..=80).step_by(20) {
        for lng in (-170..=170).step_by(34) {
            points.push(p(lat as f64 + 0.37, lng as f64 - 0.21));
        }
    }
    points
}

// =========================================================================
// Distance evaluator
// =========================================================================

#[test]
fn distance_to_self_is_zero() {
    for a in sample_points() {
        assert_eq!(distance_miles(a, a), 0.0, "{a}");
    }
}

#[test]
fn distance_is_symmetric() {
    let points = sample_points();
    for a in &points {
        for b in &points {
            let ab = distance_miles(*a, *b);
            let ba = distance_miles(*b, *a);
            assert!((ab - ba).abs() < 1e-9, "{a} {b}: {ab} vs {ba}");
            assert!(ab >= 0.0);
        }
    }
}

#[test]
fn distance_obeys_triangle_inequality() {
    let points: Vec<_> = sample_points().into_iter().step_by(3).collect();
    for a in &points {
        for b in &points {
            for c in &points {
                let direct = distance_miles(*a, *c);
                let via = distance_miles(*a, *b) + distance_miles(*b, *c);
                assert!(direct <= via + 1e-3, "{a} -> {b} -> {c}");
            }
        }
    }
}

// =========================================================================
// Bounding-box reducer
// =========================================================================

#[test]
fn bounded_envelope_never_excludes_a_true_match() {
    let radii = [1.0, 25.0, 150.0, 450.0, 1200.0];
    for center in sample_points() {
        for miles in radii {
            let radius = Radius::miles(miles).unwrap();
            let envelope = Envelope::around(center, radius);
            if envelope.is_unbounded() {
                continue;
            }
            for bearing in (0..360).step_by(5) {
                for fraction in [0.25, 0.5, 0.9, 0.999, 1.0] {
                    let candidate = destination(center, bearing as f64, miles * fraction);
                    if distance_miles(center, candidate) <= miles {
                        assert!(
                            envelope.contains(candidate),
                            "center {center} radius {miles}: {candidate} escaped {envelope:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn center_at_latitude_89_falls_back_to_unbounded() {
    let envelope = Envelope::around(p(89.0, -94.5), Radius::miles(500.0).unwrap());
    assert!(envelope.is_unbounded());
}

#[test]
fn unbounded_envelope_excludes_nothing() {
    let center = p(88.0, 0.0);
    let query = RadiusQuery::new(center, Radius::miles(300.0).unwrap());
    let envelope = query.envelope();
    assert!(envelope.is_unbounded());

    let fleet: Vec<_> = sample_points()
        .into_iter()
        .enumerate()
        .map(|(i, point)| Candidate::new(i, point))
        .collect();
    assert_eq!(fleet.scan(&envelope).len(), fleet.len());

    // A truck just over the pole is still found.
    let over_the_top = vec![Candidate::new(0, p(89.0, 180.0))];
    assert_eq!(count_within(&over_the_top, &query), 1);
}

// =========================================================================
// Query modes
// =========================================================================

#[test]
fn kansas_city_example() {
    let fleet = vec![
        Candidate::new("1000A", p(39.0, -94.5)),
        Candidate::new("2000B", p(45.0, -94.5)),
        Candidate::new("3000C", p(50.0, -94.5)),
    ];
    let query = RadiusQuery::new(p(39.0, -94.5), Radius::miles(450.0).unwrap());

    assert_eq!(count_within(&fleet, &query), 2);

    let entries = enumerate(&fleet, &query);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].id, "1000A");
    assert_eq!(entries[0].display_distance(), "0.00 miles");
    assert!((entries[1].distance_miles - 414.0).abs() < 2.0);
    assert!((entries[2].distance_miles - 759.0).abs() < 2.0);
}

#[test]
fn count_matches_enumerate_filtered_by_radius() {
    let fleet: Vec<_> = sample_points()
        .into_iter()
        .enumerate()
        .map(|(i, point)| Candidate::new(i, point))
        .collect();

    for center in sample_points().into_iter().step_by(7) {
        for miles in [100.0, 450.0, 2500.0] {
            let query = RadiusQuery::new(center, Radius::miles(miles).unwrap());
            let enumerated = enumerate(&fleet, &query)
                .into_iter()
                .filter(|e| e.within(query.radius))
                .count();
            assert_eq!(count_within(&fleet, &query), enumerated, "{center} {miles}");
        }
    }
}

#[test]
fn queries_are_idempotent() {
    let fleet = vec![
        Candidate::new(1, p(40.7, -74.0)),
        Candidate::new(2, p(41.9, -87.6)),
    ];
    let query = RadiusQuery::new(p(40.0, -75.0), Radius::miles(120.0).unwrap());
    assert_eq!(count_within(&fleet, &query), count_within(&fleet, &query));
    assert_eq!(enumerate(&fleet, &query), enumerate(&fleet, &query));
}
