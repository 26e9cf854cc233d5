use freight_geo::GeoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreightError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{kind} matching query does not exist: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl FreightError {
    pub fn not_found(kind: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}
