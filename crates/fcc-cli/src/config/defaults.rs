use fccnano::core::lattice::orientation::Orientation;
use fccnano::core::lattice::unit_cell_lattice::DEFAULT_TOLERANCE;

use crate::cli::ShapeKind;

pub struct DefaultsConfig {
    pub orientation: Orientation,
    pub tolerance: f64,
    pub shape: ShapeKind,
    pub center: [f64; 3],
    pub element: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Fcc100,
            tolerance: DEFAULT_TOLERANCE,
            shape: ShapeKind::Cuboctahedron,
            center: [0.0, 0.0, 0.0],
            element: "Au".to_string(),
        }
    }
}
