use thiserror::Error;

/// Rejected geometric inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    #[error("radius must be a positive number of miles, got {0}")]
    InvalidRadius(f64),
}
