use super::config::ConfigError;
use crate::core::geometry::error::GeometryError;
use crate::core::lattice::error::LatticeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Lattice error: {source}")]
    Lattice {
        #[from]
        source: LatticeError,
    },

    #[error("Geometry error: {source}")]
    Geometry {
        #[from]
        source: GeometryError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("No lattice sites fall inside the {shape} bounding shape")]
    EmptyCanvas { shape: &'static str },

    #[error("Canvas would contain {cells} unit cells, above the limit of {limit}")]
    CanvasTooLarge { cells: u128, limit: u128 },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
