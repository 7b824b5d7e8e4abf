use crate::core::geometry::Point;
use crate::core::geometry::error::GeometryError;
use crate::core::geometry::shapes::{Cube, Cuboctahedron, Shape, Sphere};
use crate::core::lattice::error::LatticeError;
use crate::core::lattice::fcc::FccLattice;
use crate::core::lattice::orientation::Orientation;
use crate::core::lattice::unit_cell_lattice::DEFAULT_TOLERANCE;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeConfig {
    pub iad: f64,
    pub orientation: Orientation,
    pub tolerance: f64,
}

impl LatticeConfig {
    pub fn build(&self) -> Result<FccLattice, LatticeError> {
        FccLattice::aligned_with(self.orientation, self.iad)?.with_tolerance(self.tolerance)
    }
}

/// The region of space a nanoparticle is cut from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeConfig {
    Cube { edge_length: f64, center: Point },
    Cuboctahedron { edge_length: f64, center: Point },
    Sphere { radius: f64, center: Point },
}

impl ShapeConfig {
    pub fn build(&self) -> Result<Box<dyn Shape>, GeometryError> {
        let shape: Box<dyn Shape> = match *self {
            ShapeConfig::Cube {
                edge_length,
                center,
            } => Box::new(Cube::centered(edge_length, center)?),
            ShapeConfig::Cuboctahedron {
                edge_length,
                center,
            } => Box::new(Cuboctahedron::new(edge_length, center)?),
            ShapeConfig::Sphere { radius, center } => Box::new(Sphere::new(radius, center)?),
        };
        Ok(shape)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ShapeConfig::Cube { .. } => "cube",
            ShapeConfig::Cuboctahedron { .. } => "cuboctahedron",
            ShapeConfig::Sphere { .. } => "sphere",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub lattice: LatticeConfig,
    pub shape: ShapeConfig,
}

#[derive(Default)]
pub struct BuildConfigBuilder {
    iad: Option<f64>,
    orientation: Option<Orientation>,
    tolerance: Option<f64>,
    shape: Option<ShapeConfig>,
}

impl BuildConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iad(mut self, iad: f64) -> Self {
        self.iad = Some(iad);
        self
    }
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn shape(mut self, shape: ShapeConfig) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn build(self) -> Result<BuildConfig, ConfigError> {
        let lattice = LatticeConfig {
            iad: self.iad.ok_or(ConfigError::MissingParameter("iad"))?,
            orientation: self
                .orientation
                .ok_or(ConfigError::MissingParameter("orientation"))?,
            tolerance: self.tolerance.unwrap_or(DEFAULT_TOLERANCE),
        };
        Ok(BuildConfig {
            lattice,
            shape: self.shape.ok_or(ConfigError::MissingParameter("shape"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cuboctahedron() -> ShapeConfig {
        ShapeConfig::Cuboctahedron {
            edge_length: 2.0,
            center: Point::origin(),
        }
    }

    #[test]
    fn builder_assembles_complete_config() {
        let config = BuildConfigBuilder::new()
            .iad(2.88)
            .orientation(Orientation::Fcc100)
            .tolerance(1e-6)
            .shape(cuboctahedron())
            .build()
            .unwrap();
        assert_eq!(config.lattice.iad, 2.88);
        assert_eq!(config.lattice.orientation, Orientation::Fcc100);
        assert_eq!(config.lattice.tolerance, 1e-6);
        assert_eq!(config.shape, cuboctahedron());
    }

    #[test]
    fn builder_defaults_tolerance() {
        let config = BuildConfigBuilder::new()
            .iad(1.0)
            .orientation(Orientation::Fcc100)
            .shape(cuboctahedron())
            .build()
            .unwrap();
        assert_eq!(config.lattice.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn builder_reports_first_missing_parameter() {
        assert_eq!(
            BuildConfigBuilder::new().shape(cuboctahedron()).build(),
            Err(ConfigError::MissingParameter("iad"))
        );
        assert_eq!(
            BuildConfigBuilder::new().iad(1.0).shape(cuboctahedron()).build(),
            Err(ConfigError::MissingParameter("orientation"))
        );
        assert_eq!(
            BuildConfigBuilder::new()
                .iad(1.0)
                .orientation(Orientation::Fcc100)
                .build(),
            Err(ConfigError::MissingParameter("shape"))
        );
    }

    #[test]
    fn lattice_config_builds_oriented_lattice() {
        let config = LatticeConfig {
            iad: 1.0,
            orientation: Orientation::Fcc111 {
                triangles_aligned_with_x: true,
            },
            tolerance: DEFAULT_TOLERANCE,
        };
        let lattice = config.build().unwrap();
        assert!(lattice.is_on_lattice(&Point::new(1.0, 0.0, 0.0)));

        let unsupported = LatticeConfig {
            orientation: Orientation::Fcc110,
            ..config
        };
        assert!(matches!(unsupported.build(), Err(LatticeError::NotImplemented(_))));
    }

    #[test]
    fn shape_config_builds_centered_shapes() {
        let cube = ShapeConfig::Cube {
            edge_length: 2.0,
            center: Point::new(1.0, 1.0, 1.0),
        }
        .build()
        .unwrap();
        assert_eq!(cube.bounding_box(), (Point::origin(), Point::new(2.0, 2.0, 2.0)));

        let sphere = ShapeConfig::Sphere {
            radius: -1.0,
            center: Point::origin(),
        };
        assert!(sphere.build().is_err());
        assert_eq!(sphere.kind(), "sphere");
    }
}
