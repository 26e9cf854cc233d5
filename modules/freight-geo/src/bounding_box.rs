//! Rectangular pre-filter around a radius query.
//!
//! The envelope may over-include but must never drop a point that lies
//! within the radius. Near the poles a lat/lng rectangle cannot satisfy that,
//! so the reducer gives up and reports [`Envelope::Unbounded`].

use serde::Serialize;
use tracing::debug;

use crate::distance::{destination, longitude_delta, EARTH_RADIUS_MILES, EAST, NORTH, SOUTH, WEST};
use crate::point::{Point, Radius};

/// Longitudes closer than this are treated as the same meridian.
const MERIDIAN_TOLERANCE_DEGREES: f64 = 1e-9;

/// Outward padding on every edge; absorbs rounding for points exactly on the circle.
const EDGE_PADDING_DEGREES: f64 = 1e-9;

/// Inclusive lat/lng rectangle. `west <= east` always; no antimeridian wrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn contains(&self, point: Point) -> bool {
        (self.south..=self.north).contains(&point.latitude())
            && (self.west..=self.east).contains(&point.longitude())
    }

    pub fn spans_all_longitudes(&self) -> bool {
        self.west <= -180.0 && self.east >= 180.0
    }
}

/// Result of the bounding-box reduction for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Envelope {
    Bounded(BoundingBox),
    /// No safe rectangle exists; every candidate must be scanned.
    Unbounded,
}

impl Envelope {
    /// Compute the envelope of the disc of `radius` around `center`.
    ///
    /// 1. Project due north and due south by the radius.
    /// 2. If either projection leaves the center's meridian, or the disc reaches
    ///    a pole, fall back to `Unbounded`.
    /// 3. Project east and west from whichever of the two is farther from the
    ///    equator; the parallel there is shortest, so the east/west reach is widest.
    /// 4. If the longitude span would cross ±180, keep the latitude bounds and
    ///    take every longitude.
    pub fn around(center: Point, radius: Radius) -> Self {
        let miles = radius.as_miles();
        let north = destination(center, NORTH, miles);
        let south = destination(center, SOUTH, miles);

        if !on_meridian(center, north) || !on_meridian(center, south) {
            debug!(%center, %radius, "radius projection leaves the meridian, scanning unbounded");
            return Envelope::Unbounded;
        }
        if reaches_pole(center, miles) {
            debug!(%center, %radius, "radius reaches a pole, scanning unbounded");
            return Envelope::Unbounded;
        }

        let anchor = if north.latitude().abs() >= south.latitude().abs() {
            north
        } else {
            south
        };
        let north_east = destination(anchor, EAST, miles);
        let north_west = destination(anchor, WEST, miles);

        let east_reach = longitude_delta(anchor.longitude(), north_east.longitude());
        let west_reach = longitude_delta(anchor.longitude(), north_west.longitude());

        let mut east = center.longitude() + east_reach + EDGE_PADDING_DEGREES;
        let mut west = center.longitude() + west_reach - EDGE_PADDING_DEGREES;
        if east > 180.0 || west < -180.0 {
            debug!(%center, %radius, "radius crosses the antimeridian, widening to all longitudes");
            east = 180.0;
            west = -180.0;
        }

        Envelope::Bounded(BoundingBox {
            north: (north.latitude() + EDGE_PADDING_DEGREES).min(90.0),
            south: (south.latitude() - EDGE_PADDING_DEGREES).max(-90.0),
            east,
            west,
        })
    }

    pub fn contains(&self, point: Point) -> bool {
        match self {
            Envelope::Bounded(bbox) => bbox.contains(point),
            Envelope::Unbounded => true,
        }
    }

    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        match self {
            Envelope::Bounded(bbox) => Some(bbox),
            Envelope::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Envelope::Unbounded)
    }
}

fn on_meridian(center: Point, projected: Point) -> bool {
    longitude_delta(center.longitude(), projected.longitude()).abs() <= MERIDIAN_TOLERANCE_DEGREES
}

fn reaches_pole(center: Point, miles: f64) -> bool {
    let angular_radius = (miles / EARTH_RADIUS_MILES).to_degrees();
    center.latitude().abs() + angular_radius >= 90.0
}
