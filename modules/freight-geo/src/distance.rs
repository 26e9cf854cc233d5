use crate::point::Point;

pub const EARTH_RADIUS_MILES: f64 = 3958.8;
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Compass bearings in degrees.
pub const NORTH: f64 = 0.0;
pub const EAST: f64 = 90.0;
pub const SOUTH: f64 = 180.0;
pub const WEST: f64 = 270.0;

/// Distance unit for haversine calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Miles,
    Meters,
    Kilometers,
}

impl DistanceUnit {
    fn earth_radius(self) -> f64 {
        match self {
            Self::Miles => EARTH_RADIUS_MILES,
            Self::Meters => EARTH_RADIUS_METERS,
            Self::Kilometers => EARTH_RADIUS_KM,
        }
    }
}

/// Haversine great-circle distance between two points in the specified unit.
pub fn haversine_distance(a: Point, b: Point, unit: DistanceUnit) -> f64 {
    unit.earth_radius() * central_angle(a, b)
}

/// Great-circle distance in miles. Symmetric, and exactly zero for equal points.
pub fn distance_miles(a: Point, b: Point) -> f64 {
    haversine_distance(a, b, DistanceUnit::Miles)
}

/// Inclusive radius check: a candidate exactly on the circle is a match.
pub fn is_within_radius(distance: f64, radius_miles: f64) -> bool {
    distance <= radius_miles
}

fn central_angle(a: Point, b: Point) -> f64 {
    let (lat1, lng1) = a.to_radians();
    let (lat2, lng2) = b.to_radians();

    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    // Rounding can push h a hair past 1 for antipodal pairs.
    2.0 * h.min(1.0).sqrt().asin()
}

/// Point reached by travelling `distance_miles` from `origin` along the great
/// circle that leaves it at `bearing_degrees` (0 = north, 90 = east).
///
/// Longitude of the result is normalised to [-180, 180). Travelling north
/// or south across a pole comes back down the opposite meridian, which shows
/// up as a 180 degree longitude flip.
pub fn destination(origin: Point, bearing_degrees: f64, distance_miles: f64) -> Point {
    let (lat1, _) = origin.to_radians();
    let bearing = bearing_degrees.to_radians();
    let delta = distance_miles / EARTH_RADIUS_MILES;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
    let dlng =
        (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    // Added in degrees so a zero offset leaves the origin longitude bit-identical.
    Point::from_degrees(
        lat2.to_degrees(),
        normalize_longitude(origin.longitude() + dlng.to_degrees()),
    )
}

/// Wrap a longitude in degrees into [-180, 180).
pub fn normalize_longitude(longitude: f64) -> f64 {
    if (-180.0..180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Signed east-west separation from `from` to `to`, in (-180, 180].
pub fn longitude_delta(from: f64, to: f64) -> f64 {
    let d = normalize_longitude(to - from);
    if d == -180.0 {
        180.0
    } else {
        d
    }
}
