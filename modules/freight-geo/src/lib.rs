//! Geospatial proximity engine for freight matching.
//!
//! A radius query runs in two stages: the [`Envelope`] reducer cheaply drops
//! candidates outside a conservative lat/lng rectangle, then the distance
//! evaluator computes great-circle miles for the survivors.

pub mod bounding_box;
pub mod cache;
pub mod distance;
pub mod error;
pub mod point;
pub mod proximity;

pub use bounding_box::{BoundingBox, Envelope};
pub use cache::BatchContext;
pub use distance::{
    destination, distance_miles, haversine_distance, is_within_radius, DistanceUnit,
    EARTH_RADIUS_MILES,
};
pub use error::GeoError;
pub use point::{Point, Radius, DEFAULT_RADIUS_MILES};
pub use proximity::{
    count_within, enumerate, evaluate, rank_by_distance, Candidate, CandidateSource, MatchEntry,
    MatchResult, QueryMode, RadiusQuery,
};
