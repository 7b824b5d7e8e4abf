use crate::core::geometry::error::GeometryError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum LatticeError {
    #[error("Invalid transform for {lattice}: {reason}")]
    InvalidTransform {
        lattice: &'static str,
        reason: String,
    },

    #[error("Feature not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Lattice failed its design consistency check: {0}")]
    DesignConsistency(String),

    #[error("Invalid lattice parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Applying a {transform} transform would make the lattice singular")]
    SingularTransform { transform: &'static str },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
