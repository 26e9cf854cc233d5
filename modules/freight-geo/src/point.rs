use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// Radius used when a query does not name one.
pub const DEFAULT_RADIUS_MILES: f64 = 450.0;

/// A validated WGS-84 coordinate in degrees.
///
/// Construction, including deserialization, rejects non-finite values and
/// anything outside [-90, 90] / [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "RawPoint")]
pub struct Point {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawPoint> for Point {
    type Error = GeoError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        Point::new(raw.latitude, raw.longitude)
    }
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// For values produced by our own trigonometry, already in range.
    pub(crate) fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: longitude.clamp(-180.0, 180.0),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude and longitude in radians.
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// A strictly positive search radius in miles.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "f64", into = "f64")]
pub struct Radius(f64);

impl Radius {
    pub fn miles(miles: f64) -> Result<Self, GeoError> {
        if !miles.is_finite() || miles <= 0.0 {
            return Err(GeoError::InvalidRadius(miles));
        }
        Ok(Self(miles))
    }

    pub fn as_miles(self) -> f64 {
        self.0
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self(DEFAULT_RADIUS_MILES)
    }
}

impl TryFrom<f64> for Radius {
    type Error = GeoError;

    fn try_from(miles: f64) -> Result<Self, Self::Error> {
        Radius::miles(miles)
    }
}

impl From<Radius> for f64 {
    fn from(radius: Radius) -> Self {
        radius.0
    }
}

impl std::fmt::Display for Radius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} miles", self.0)
    }
}
