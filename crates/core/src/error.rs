use thiserror::Error;

/// Errors raised while building domain values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid geometry: non-finite coordinate ({longitude}, {latitude})")]
    NonFiniteCoordinate { longitude: f64, latitude: f64 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
