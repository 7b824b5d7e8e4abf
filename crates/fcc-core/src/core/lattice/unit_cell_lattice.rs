use super::error::LatticeError;
use super::unit_cell::UnitCell;
use crate::core::geometry::Point;
use crate::core::geometry::transform::{AffineMap, TransformFunc};
use tracing::trace;

/// Default on-lattice tolerance, in reference-cell units (the reference cell has edge 1).
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// A lattice generated by tiling a reference unit cell, seen through a stack of
/// coordinate transforms.
///
/// The reference cell is never mutated. Every applied [`TransformFunc`] is composed
/// after the previous ones into `forward` (reference → ambient), and `inverse` is kept
/// in step so that [`to_reference`](Self::to_reference) and
/// [`from_reference`](Self::from_reference) stay mutual inverses.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCellLattice {
    reference_cell: UnitCell,
    forward: AffineMap,
    inverse: AffineMap,
    tolerance: f64,
}

impl UnitCellLattice {
    pub fn new(reference_cell: UnitCell) -> Self {
        Self {
            reference_cell,
            forward: AffineMap::identity(),
            inverse: AffineMap::identity(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, LatticeError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(LatticeError::InvalidParameter {
                name: "tolerance",
                value: tolerance,
            });
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    pub fn reference_cell(&self) -> &UnitCell {
        &self.reference_cell
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The composed map from the reference frame to ambient coordinates.
    pub fn forward_map(&self) -> &AffineMap {
        &self.forward
    }

    pub fn to_reference(&self, point: &Point) -> Point {
        self.inverse.apply(point)
    }

    pub fn from_reference(&self, point: &Point) -> Point {
        self.forward.apply(point)
    }

    pub fn apply_transform(&mut self, transform: &TransformFunc) -> Result<(), LatticeError> {
        let forward = self.forward.then(&transform.to_affine());
        let inverse = forward
            .inverse()
            .filter(AffineMap::is_finite)
            .ok_or(LatticeError::SingularTransform {
                transform: transform.name(),
            })?;
        trace!(transform = transform.name(), "Composed transform onto lattice.");
        self.forward = forward;
        self.inverse = inverse;
        Ok(())
    }

    /// Consumes the lattice and returns it with `transform` applied.
    pub fn transformed(mut self, transform: &TransformFunc) -> Result<Self, LatticeError> {
        self.apply_transform(transform)?;
        Ok(self)
    }

    /// Returns `true` if `point` coincides with a basis atom of some cell, within the
    /// lattice tolerance measured in reference-cell units.
    pub fn is_on_lattice(&self, point: &Point) -> bool {
        self.basis_index_of(point).is_some()
    }

    /// Index of the basis atom that `point` sits on, if any.
    pub fn basis_index_of(&self, point: &Point) -> Option<usize> {
        let tiling = self.reference_cell.tiling();
        let (_, frac) = tiling.to_fractional(&self.to_reference(point));
        self.reference_cell
            .fractional_positions()
            .iter()
            .position(|basis| {
                (frac - basis).iter().all(|d| {
                    let wrapped = d - d.round();
                    wrapped.abs() <= self.tolerance
                })
            })
    }

    /// Ambient positions of the basis atoms of cell `index` of the reference tiling.
    pub fn sites_in_cell(&self, index: [i64; 3]) -> Vec<Point> {
        let origin = self.reference_cell.tiling().cell_origin(index);
        self.reference_cell
            .absolute_positions(&origin)
            .iter()
            .map(|p| self.from_reference(p))
            .collect()
    }

    pub fn is_consistent_with_design(&self) -> bool {
        self.forward.is_finite()
            && self.inverse.is_finite()
            && (self.forward.linear * self.inverse.linear - nalgebra::Matrix3::identity()).norm()
                < 1e-9
    }
}
