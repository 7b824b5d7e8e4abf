use super::error::LatticeError;
use super::orientation::Orientation;
use super::unit_cell::UnitCell;
use super::unit_cell_lattice::UnitCellLattice;
use crate::core::geometry::Point;
use crate::core::geometry::shapes::Cube;
use crate::core::geometry::tiling::CubicTiling;
use crate::core::geometry::transform::{ScaleFunc, TransformFunc};
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::SQRT_2;
use tracing::debug;

/// Number of nearest neighbors of every FCC site.
pub const COORDINATION_NUMBER: usize = 12;

/// Relative tolerance of the design consistency check on the composed linear map.
const DESIGN_TOLERANCE: f64 = 1e-9;

const REFERENCE_BASIS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.0, 0.5, 0.5],
    [0.5, 0.0, 0.5],
];

const REFERENCE_NEIGHBORS: [[f64; 3]; COORDINATION_NUMBER] = [
    [0.0, -0.5, 0.5],
    [-0.5, -0.5, 0.0],
    [-0.5, 0.0, 0.5],
    [0.5, -0.5, 0.0],
    [0.0, -0.5, -0.5],
    [-0.5, 0.0, -0.5],
    [-0.5, 0.5, 0.0],
    [0.0, 0.5, 0.5],
    [0.5, 0.0, 0.5],
    [0.5, 0.0, -0.5],
    [0.0, 0.5, -0.5],
    [0.5, 0.5, 0.0],
];

/// A face-centered cubic lattice parameterized by its interatomic distance (IAD).
///
/// The reference lattice has a unit cubic cell with one corner atom and three face-center
/// atoms, giving a nearest-neighbor distance of [`REF_IAD`](Self::REF_IAD). Construction
/// scales it isometrically to the requested IAD; further transforms may rotate, reflect,
/// shift or isometrically rescale it.
///
/// Neighbor queries are purely geometric. [`are_neighbors`](Self::are_neighbors) is a
/// distance threshold and [`get_neighbors`](Self::get_neighbors) offsets any point by the
/// coordination pattern; neither checks that its inputs are on the lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct FccLattice {
    lattice: UnitCellLattice,
    iad: f64,
    neighbors_pattern: [Vector3<f64>; COORDINATION_NUMBER],
}

impl FccLattice {
    /// Nearest-neighbor distance of the reference lattice with unit cell edge 1.
    pub const REF_IAD: f64 = SQRT_2 / 2.0;

    /// Builds an FCC lattice with interatomic distance `iad`, aligned with {100}.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidParameter`] if `iad` is not finite and positive,
    /// and [`LatticeError::DesignConsistency`] if the constructed lattice fails its
    /// invariant check.
    pub fn new(iad: f64) -> Result<Self, LatticeError> {
        if !iad.is_finite() || iad <= 0.0 {
            return Err(LatticeError::InvalidParameter { name: "iad", value: iad });
        }

        let cell = UnitCell::new(
            CubicTiling::new(Cube::unit()),
            REFERENCE_BASIS.iter().map(|f| Vector3::from(*f)).collect(),
        );
        let mut result = Self {
            lattice: UnitCellLattice::new(cell),
            iad: Self::REF_IAD,
            neighbors_pattern: REFERENCE_NEIGHBORS.map(Vector3::from),
        };
        result.apply_transform(&ScaleFunc::isometric(iad / Self::REF_IAD)?.into())?;
        result.ensure_consistent()?;

        debug!(iad, "Constructed FCC lattice.");
        Ok(result)
    }

    pub fn aligned_with_100(iad: f64) -> Result<Self, LatticeError> {
        Self::new(iad)
    }

    /// # Errors
    ///
    /// Always returns [`LatticeError::NotImplemented`].
    pub fn aligned_with_110(iad: f64) -> Result<Self, LatticeError> {
        Self::aligned_with(Orientation::Fcc110, iad)
    }

    /// Builds a lattice whose {111} close-packed planes are normal to Z.
    pub fn aligned_with_111(iad: f64, triangles_aligned_with_x: bool) -> Result<Self, LatticeError> {
        Self::aligned_with(
            Orientation::Fcc111 {
                triangles_aligned_with_x,
            },
            iad,
        )
    }

    pub fn aligned_with(orientation: Orientation, iad: f64) -> Result<Self, LatticeError> {
        let rotation = orientation.rotation()?;
        let mut result = Self::new(iad)?;
        if let Some(rotation) = rotation {
            result.apply_transform(&rotation.into())?;
        }
        debug!(%orientation, "Aligned FCC lattice.");
        Ok(result)
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, LatticeError> {
        self.lattice = self.lattice.with_tolerance(tolerance)?;
        Ok(self)
    }

    /// Checks that the IAD is positive and that the composed linear map is a similarity
    /// with ratio `iad / REF_IAD`.
    pub fn is_consistent_with_design(&self) -> bool {
        if !self.lattice.is_consistent_with_design() || !(self.iad.is_finite() && self.iad > 0.0)
        {
            return false;
        }
        let ratio = self.iad / Self::REF_IAD;
        let linear = self.lattice.forward_map().linear;
        let gram = linear.transpose() * linear;
        (gram - Matrix3::identity() * ratio * ratio).norm() <= DESIGN_TOLERANCE * ratio * ratio
    }

    fn ensure_consistent(&self) -> Result<(), LatticeError> {
        if self.is_consistent_with_design() {
            Ok(())
        } else {
            Err(LatticeError::DesignConsistency(format!(
                "composed transform does not match IAD {}",
                self.iad
            )))
        }
    }

    /// Applies `transform` to the lattice.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidTransform`] for a non-isometric scale, since the IAD
    /// would no longer be a single scalar. On error the lattice is left unchanged.
    pub fn apply_transform(&mut self, transform: &TransformFunc) -> Result<(), LatticeError> {
        let iad = match transform {
            TransformFunc::Scale(scale) if scale.is_isometric() => self.iad * scale.factors().x.abs(),
            TransformFunc::Scale(scale) => {
                return Err(LatticeError::InvalidTransform {
                    lattice: "FccLattice",
                    reason: format!("can only scale isometrically, got factors {:?}", scale.factors()),
                });
            }
            _ => self.iad,
        };
        self.lattice.apply_transform(transform)?;
        self.iad = iad;
        Ok(())
    }

    pub fn transformed(mut self, transform: &TransformFunc) -> Result<Self, LatticeError> {
        self.apply_transform(transform)?;
        Ok(self)
    }

    pub fn is_on_lattice(&self, point: &Point) -> bool {
        self.lattice.is_on_lattice(point)
    }

    pub fn are_neighbors(&self, p1: &Point, p2: &Point) -> bool {
        (p2 - p1).norm() <= self.iad
    }

    /// Returns the 12 points at the coordination-shell offsets around `point`.
    pub fn get_neighbors(&self, point: &Point) -> [Point; COORDINATION_NUMBER] {
        let reference = self.lattice.to_reference(point);
        self.neighbors_pattern
            .map(|offset| self.lattice.from_reference(&(reference + offset)))
    }

    /// Integer key identifying an on-lattice point, or `None` if `point` is off-lattice.
    ///
    /// The key is twice the point's reference coordinates, which are integers for every
    /// FCC site.
    pub fn site_key(&self, point: &Point) -> Option<[i64; 3]> {
        if !self.is_on_lattice(point) {
            return None;
        }
        Some(doubled_reference_key(&self.lattice.to_reference(point)))
    }

    pub fn unit_cell_lattice(&self) -> &UnitCellLattice {
        &self.lattice
    }

    pub fn to_reference(&self, point: &Point) -> Point {
        self.lattice.to_reference(point)
    }

    pub fn from_reference(&self, point: &Point) -> Point {
        self.lattice.from_reference(point)
    }

    pub fn iad(&self) -> f64 {
        self.iad
    }

    pub fn lattice_constant(&self) -> f64 {
        self.iad / Self::REF_IAD
    }

    pub fn fcc100_layer_spacing(&self) -> f64 {
        self.iad * 0.5
    }

    pub fn fcc110_layer_spacing(&self) -> f64 {
        self.iad * SQRT_2 / 2.0
    }

    pub fn fcc111_layer_spacing(&self) -> f64 {
        self.iad * SQRT_2 / 3.0f64.sqrt()
    }

    pub fn layer_spacing(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Fcc100 => self.fcc100_layer_spacing(),
            Orientation::Fcc110 => self.fcc110_layer_spacing(),
            Orientation::Fcc111 { .. } => self.fcc111_layer_spacing(),
        }
    }
}

/// Twice the reference coordinates, rounded to integers.
pub(crate) fn doubled_reference_key(reference: &Point) -> [i64; 3] {
    let doubled = reference.coords * 2.0;
    [
        doubled.x.round() as i64,
        doubled.y.round() as i64,
        doubled.z.round() as i64,
    ]
}
