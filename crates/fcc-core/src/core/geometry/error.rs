use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GeometryError {
    #[error("Invalid {name}: expected a finite positive value, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("Invalid scale factors {factors:?}: every factor must be finite and non-zero")]
    InvalidScale { factors: [f64; 3] },

    #[error("Reflection plane normal must be a finite non-zero vector")]
    DegenerateNormal,

    #[error("Non-finite {0}")]
    NonFinite(&'static str),
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidDimension { name, value })
    }
}
